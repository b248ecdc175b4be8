use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use littlesearch::persist::{load_index, IndexPaths, MetaFile};
use littlesearch::{query, KeywordIndex};

/// A query session over one loaded index snapshot.
pub struct QueryApp {
    index: KeywordIndex,
    meta: MetaFile,
}

/// Shape of one answered query under `--json`.
#[derive(Serialize)]
pub struct QueryOutput {
    pub first: String,
    pub second: String,
    pub results: Vec<String>,
}

impl QueryApp {
    /// Loads a snapshot produced by the indexer.
    pub fn open<P: AsRef<Path>>(index_dir: P) -> Result<Self> {
        let (index, meta) = load_index(&IndexPaths::new(index_dir))?;
        tracing::debug!(
            num_docs = meta.num_docs,
            num_keywords = meta.num_keywords,
            "index loaded"
        );
        Ok(Self { index, meta })
    }

    /// Answers a two-keyword query. Raw inputs are folded to the index's
    /// lowercase keyword form; anything else (punctuation, noise words)
    /// simply matches nothing.
    pub fn query(&self, first: &str, second: &str) -> Vec<String> {
        query::top_search(&self.index, &first.to_lowercase(), &second.to_lowercase())
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn meta(&self) -> &MetaFile {
        &self.meta
    }
}
