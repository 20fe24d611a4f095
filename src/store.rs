//! The storage module
//! Flat, append-only vector storage with brute-force scan

use crate::error::{IndexError, Result};

/// Row-major storage of fixed-length vectors keyed by caller-supplied ids.
///
/// Vectors are stored contiguously as `[v1_d1, v1_d2, ..., v2_d1, v2_d2, ...]`
/// and `identifiers[i]` belongs to the `i`-th row. Identifiers are not
/// deduplicated: appending the same id twice yields two rows.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dim: usize,
    vectors: Vec<f32>,
    identifiers: Vec<i64>,
}

impl VectorStore {
    /// Creates an empty store whose rows all have `dim` components.
    ///
    /// # Examples
    ///
    /// ```
    /// use simdb::VectorStore;
    ///
    /// let store = VectorStore::new(3);
    /// assert_eq!(store.len(), 0);
    /// assert_eq!(store.dim(), 3);
    /// ```
    pub fn new(dim: usize) -> VectorStore {
        VectorStore { dim, vectors: Vec::new(), identifiers: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Appends one row.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - `vector.len() != dim`; the store is unchanged
    pub fn append(&mut self, vector: &[f32], identifier: i64) -> Result<()> {
        self.check_dim(vector)?;

        self.vectors.extend_from_slice(vector);
        self.identifiers.push(identifier);
        Ok(())
    }

    /// Appends every `(vectors[i], identifiers[i])` pair, or nothing at all.
    ///
    /// Every input is validated before the first write, so a failed call
    /// leaves the store exactly as it was. Returns the number of rows appended.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` - the two inputs have different lengths
    /// * `DimensionMismatch` - some vector's length is not `dim`
    ///
    /// # Examples
    ///
    /// ```
    /// use simdb::VectorStore;
    ///
    /// let mut store = VectorStore::new(2);
    /// let added = store.append_batch(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[7, 9]).unwrap();
    /// assert_eq!(added, 2);
    ///
    /// // One bad row rejects the whole batch
    /// assert!(store.append_batch(&[vec![1.0, 0.0], vec![1.0]], &[1, 2]).is_err());
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn append_batch(&mut self, vectors: &[Vec<f32>], identifiers: &[i64]) -> Result<usize> {
        if vectors.len() != identifiers.len() {
            return Err(IndexError::LengthMismatch {
                vectors: vectors.len(),
                identifiers: identifiers.len(),
            });
        }

        for vector in vectors {
            self.check_dim(vector)?;
        }

        self.vectors.reserve(vectors.len() * self.dim);
        for vector in vectors {
            self.vectors.extend_from_slice(vector);
        }
        self.identifiers.extend_from_slice(identifiers);

        Ok(identifiers.len())
    }

    /// Lazily scores every row against `query` in insertion order.
    ///
    /// Yields `(identifier, score_fn(query, row))`. The iterator borrows the
    /// store, so it observes one consistent state; call again to restart.
    pub fn scan<'a, F>(&'a self, query: &'a [f32], score_fn: F) -> impl Iterator<Item = (i64, f32)> + 'a
    where
        F: Fn(&[f32], &[f32]) -> f32 + 'a,
    {
        (0..self.len()).map(move |i| (self.identifiers[i], score_fn(query, self.row(i))))
    }

    /// Slices row `index` out of the flat buffer.
    pub(crate) fn row(&self, index: usize) -> &[f32] {
        let start = index * self.dim;
        &self.vectors[start..start + self.dim]
    }

    fn check_dim(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        Ok(())
    }
}
