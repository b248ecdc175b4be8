//! Keyword-occurrence indexing and frequency-ranked retrieval.
//!
//! The crate turns raw token streams into an inverted index that maps each
//! normalized keyword to the documents containing it, ordered by descending
//! occurrence frequency, and answers two-keyword OR queries with up to five
//! ranked document ids.
//!
//! Pipeline, leaves first:
//!
//! - [`keyword`]: raw token -> normalized keyword (or rejection)
//! - [`noise`]: the excluded-word set consulted during normalization
//! - [`document`]: one document's token stream -> keyword frequency map
//! - [`index`]: the persistent keyword -> occurrence-sequence mapping,
//!   maintained by binary-search ordered insertion
//! - [`query`]: top-5 ranked merge over two occurrence sequences
//! - [`engine`]: the constructed facade tying the above together under a
//!   single-writer / many-reader locking discipline
//! - [`persist`]: on-disk snapshots of a built index
//!
//! The crate performs no corpus I/O itself: callers hand it document ids and
//! raw token streams and get ranked document ids back.

pub mod document;
pub mod engine;
pub mod index;
pub mod keyword;
pub mod noise;
pub mod persist;
pub mod query;

pub use engine::SearchEngine;
pub use index::{KeywordIndex, Occurrence};
pub use keyword::{normalize, Keyword};
pub use noise::NoiseSet;
pub use query::MAX_RESULTS;
