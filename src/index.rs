//! The index module
//! Cosine similarity search over a shared [`VectorStore`]

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::store::VectorStore;
use crate::vector::{dot_product, l2_normalize};

/// One search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "id")]
    pub identifier: i64,
    pub score: f32,
}

/// Candidate in the bounded top-k heap.
///
/// Ordered so that "greater" means "ranks higher": larger score first, and on
/// equal scores the earlier-inserted row (lower `seq`) wins.
#[derive(Debug)]
struct Ranked {
    score: f32,
    seq: usize,
    identifier: i64,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN ranks with -inf; -0.0 and 0.0 tie
        rank_key(self.score)
            .partial_cmp(&rank_key(other.score))
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn rank_key(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}

/// Exact cosine-similarity index with a fixed dimension.
///
/// Every vector is scaled to unit length before it is stored or compared, so
/// the inner product of two stored rows is their cosine similarity. The index
/// is `Sync`: searches share a read lock, adds take the write lock for the
/// whole batch, so a reader sees either all of a batch or none of it.
#[derive(Debug)]
pub struct SimilarityIndex {
    dim: usize,
    store: RwLock<VectorStore>,
}

impl SimilarityIndex {
    /// Creates an empty index for `dim`-component vectors.
    pub fn new(dim: usize) -> SimilarityIndex {
        SimilarityIndex { dim, store: RwLock::new(VectorStore::new(dim)) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalizes and stores every `(identifier, vector)` item.
    ///
    /// All items are validated before anything is written; one wrong-sized
    /// vector rejects the whole call and the index is unchanged. Identifiers
    /// are not checked for uniqueness.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of items added, `items.len()`
    /// * `Err(IndexError::DimensionMismatch)` - Some vector is not `dim` long
    ///
    /// # Examples
    ///
    /// ```
    /// use simdb::SimilarityIndex;
    ///
    /// let index = SimilarityIndex::new(2);
    /// assert_eq!(index.add(vec![(1, vec![3.0, 4.0]), (2, vec![0.0, 1.0])]).unwrap(), 2);
    ///
    /// // Wrong dimension, nothing is stored
    /// assert!(index.add(vec![(3, vec![1.0, 0.0]), (4, vec![1.0])]).is_err());
    /// assert_eq!(index.len(), 2);
    /// ```
    pub fn add(&self, items: Vec<(i64, Vec<f32>)>) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let mut identifiers = Vec::with_capacity(items.len());
        let mut vectors = Vec::with_capacity(items.len());
        for (identifier, mut vector) in items {
            self.check_dim(&vector)?;
            l2_normalize(&mut vector);
            identifiers.push(identifier);
            vectors.push(vector);
        }

        let added = self.write().append_batch(&vectors, &identifiers)?;
        debug!(added, dim = self.dim, "vectors added");
        Ok(added)
    }

    /// Returns the `top_k` entries most similar to `query`, best first.
    ///
    /// Scores are cosine similarities. Equal scores keep insertion order. Fewer
    /// than `top_k` results come back when the index is smaller, and none when
    /// `top_k` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use simdb::SimilarityIndex;
    ///
    /// let index = SimilarityIndex::new(2);
    /// index.add(vec![(1, vec![1.0, 0.0]), (2, vec![0.0, 1.0]), (3, vec![1.0, 1.0])]).unwrap();
    ///
    /// let hits = index.search(vec![1.0, 0.0], 2).unwrap();
    /// assert_eq!(hits.len(), 2);
    /// assert_eq!(hits[0].identifier, 1);
    /// assert_eq!(hits[1].identifier, 3);
    /// assert!((hits[1].score - 0.7071).abs() < 1e-4);
    /// ```
    pub fn search(&self, mut query: Vec<f32>, top_k: usize) -> Result<Vec<Hit>> {
        self.check_dim(&query)?;
        if top_k == 0 {
            return Ok(Vec::new());
        }
        l2_normalize(&mut query);

        let start = Instant::now();
        let store = self.read();
        let scanned = store.len();
        let hits = select_top_k(store.scan(&query, dot_product), top_k.min(scanned));
        drop(store);

        debug!(scanned, top_k, returned = hits.len(), elapsed_us = start.elapsed().as_micros() as u64, "search done");
        Ok(hits)
    }

    fn check_dim(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        Ok(())
    }

    // A poisoned lock still guards a consistent store: appends validate before
    // writing, so a panicking writer cannot leave a half-appended batch.
    fn read(&self) -> RwLockReadGuard<'_, VectorStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VectorStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the `k` best `(identifier, score)` pairs with a size-`k` min-heap.
///
/// The input order is the insertion order and breaks score ties.
fn select_top_k(scored: impl Iterator<Item = (i64, f32)>, k: usize) -> Vec<Hit> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(k + 1);
    for (seq, (identifier, score)) in scored.enumerate() {
        let candidate = Ranked { score, seq, identifier };
        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if let Some(Reverse(worst)) = heap.peek() {
            if candidate > *worst {
                heap.pop();
                heap.push(Reverse(candidate));
            }
        }
    }

    // Ascending Reverse order is descending rank
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(r)| Hit { identifier: r.identifier, score: r.score })
        .collect()
}
