//! # simdb - An Exact Cosine Similarity Index
//!
//! simdb keeps fixed-dimension vectors in memory keyed by caller-supplied
//! `i64` ids. Vectors are L2-normalized on insertion and at query time and
//! searched with a brute-force dot product scan, which equals cosine
//! similarity for normalized vectors. A zero vector is left as is and scores
//! 0 against everything.
//!
//! ## Example
//!
//! ```
//! use simdb::SimilarityIndex;
//!
//! let index = SimilarityIndex::new(3);
//!
//! // Insert vectors
//! index.add(vec![
//!     (1, vec![1.0, 0.0, 0.0]),
//!     (2, vec![0.0, 1.0, 0.0]),
//!     (3, vec![0.7, 0.7, 0.0]),
//! ]).unwrap();
//!
//! // Search for similar vectors
//! let results = index.search(vec![1.0, 0.0, 0.0], 2).unwrap();
//! assert_eq!(results[0].identifier, 1); // Most similar vector
//! ```

pub mod vector;
pub mod config;
pub mod error;
pub mod server;
mod store;
mod index;

pub use error::{IndexError, Result};
pub use index::{Hit, SimilarityIndex};
pub use store::VectorStore;
