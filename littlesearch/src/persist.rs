//! On-disk snapshots of a built index.
//!
//! A snapshot is three files under one directory: `index.bin` (the
//! keyword records, bincode), `docs.bin` (the document registry,
//! bincode) and `meta.json` (human-readable build info). Loading goes
//! back through [`KeywordIndex::from_records`], so a tampered or
//! truncated snapshot is rejected rather than served.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::index::{IndexRecords, KeywordIndex};

/// Version written into `meta.json`; bumped when the file layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Build information stored next to the binary artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_keywords: u32,
    pub created_at: String,
    pub version: u32,
}

/// Locations of the snapshot files under a single root directory.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn records(&self) -> PathBuf {
        self.root.join("index.bin")
    }

    pub fn documents(&self) -> PathBuf {
        self.root.join("docs.bin")
    }

    pub fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_records(paths: &IndexPaths, records: &IndexRecords) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    let bytes = bincode::serialize(records)?;
    let mut file = File::create(paths.records())?;
    file.write_all(&bytes)?;
    Ok(())
}

pub fn load_records(paths: &IndexPaths) -> Result<IndexRecords> {
    let mut file = File::open(paths.records())
        .with_context(|| format!("no index records at {}", paths.records().display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let records = bincode::deserialize(&bytes)?;
    Ok(records)
}

pub fn save_documents(paths: &IndexPaths, documents: &HashSet<String>) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    let bytes = bincode::serialize(documents)?;
    let mut file = File::create(paths.documents())?;
    file.write_all(&bytes)?;
    Ok(())
}

pub fn load_documents(paths: &IndexPaths) -> Result<HashSet<String>> {
    let mut file = File::open(paths.documents())
        .with_context(|| format!("no document registry at {}", paths.documents().display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let documents = bincode::deserialize(&bytes)?;
    Ok(documents)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    let mut file = File::create(paths.meta())?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let json = fs::read_to_string(paths.meta())
        .with_context(|| format!("no meta file at {}", paths.meta().display()))?;
    let meta = serde_json::from_str(&json)?;
    Ok(meta)
}

/// Loads a complete snapshot, re-validating the records on the way in.
pub fn load_index(paths: &IndexPaths) -> Result<(KeywordIndex, MetaFile)> {
    let meta = load_meta(paths)?;
    ensure!(
        meta.version == FORMAT_VERSION,
        "index format version {} is not supported (expected {FORMAT_VERSION})",
        meta.version
    );
    let records = load_records(paths)?;
    let documents = load_documents(paths)?;
    let index = KeywordIndex::from_records(records, documents)?;
    ensure!(
        index.document_count() == meta.num_docs as usize,
        "meta file claims {} documents but the registry holds {}",
        meta.num_docs,
        index.document_count()
    );
    Ok((index, meta))
}
