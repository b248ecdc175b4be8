use crate::document::load_document;
use crate::index::{KeywordIndex, Occurrence};
use crate::noise::NoiseSet;
use crate::query;
use anyhow::Result;
use parking_lot::RwLock;

/// The assembled retrieval engine: an immutable noise set plus the global
/// index behind a single-writer / many-reader lock.
///
/// Indexing is expected to run to completion before queries start, but the
/// locking keeps the structure sound either way: document loading is pure
/// and runs outside the lock, each merge holds the write lock alone, and
/// queries share read locks. No operation performs I/O.
pub struct SearchEngine {
    noise: NoiseSet,
    index: RwLock<KeywordIndex>,
}

impl SearchEngine {
    /// An engine with an empty index and the supplied noise set.
    pub fn new(noise: NoiseSet) -> Self {
        Self {
            noise,
            index: RwLock::new(KeywordIndex::new()),
        }
    }

    /// An engine with the built-in English noise-word list.
    pub fn standard() -> Self {
        Self::new(NoiseSet::standard())
    }

    /// Wraps an already-built index, e.g. one loaded from a snapshot.
    pub fn from_index(noise: NoiseSet, index: KeywordIndex) -> Self {
        Self {
            noise,
            index: RwLock::new(index),
        }
    }

    /// Consumes the engine, handing the index back for snapshotting.
    pub fn into_index(self) -> KeywordIndex {
        self.index.into_inner()
    }

    /// Loads one document's raw token stream and merges it into the index.
    ///
    /// Fails if `document` was indexed before or the merge receives a
    /// corrupt frequency; the index is untouched in that case.
    pub fn index_document<I, S>(&self, document: &str, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = load_document(document, tokens, &self.noise);
        tracing::debug!(document, keywords = keywords.len(), "merging document");
        self.index.write().merge_document(document, keywords)
    }

    /// Ranked two-keyword OR query; see [`query::top_search`].
    pub fn query(&self, first: &str, second: &str) -> Vec<String> {
        query::top_search(&self.index.read(), first, second)
    }

    /// The occurrence sequence currently indexed for `keyword`.
    pub fn occurrences(&self, keyword: &str) -> Option<Vec<Occurrence>> {
        self.index.read().occurrences(keyword).map(|s| s.to_vec())
    }

    pub fn document_count(&self) -> usize {
        self.index.read().document_count()
    }

    pub fn keyword_count(&self) -> usize {
        self.index.read().keyword_count()
    }

    pub fn noise(&self) -> &NoiseSet {
        &self.noise
    }
}
