use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use littlesearch::persist::{save_documents, save_meta, save_records, IndexPaths, MetaFile, FORMAT_VERSION};
use littlesearch::{NoiseSet, SearchEngine};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a keyword occurrence index from text documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a document list or a directory of .txt files
    Build {
        /// Input path (a document-list file, or a directory walked for .txt files)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Noise-word file, whitespace-separated; defaults to the built-in list
        #[arg(long)]
        noise_words: Option<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, noise_words } => {
            build_index(&input, &output, noise_words.as_deref())
        }
    }
}

fn build_index(input: &str, output: &str, noise_words: Option<&str>) -> Result<()> {
    let noise = match noise_words {
        Some(path) => noise_from_file(Path::new(path))?,
        None => {
            tracing::info!("no noise-word file supplied, using the built-in list");
            NoiseSet::standard()
        }
    };

    let documents = collect_documents(Path::new(input))?;
    if documents.is_empty() {
        bail!("no documents to index under {input}");
    }

    let engine = SearchEngine::new(noise);
    for (document, path) in &documents {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read document file {}", path.display()))?;
        engine.index_document(document, text.split_whitespace())?;
    }

    let index = engine.into_index();
    tracing::info!(
        num_docs = index.document_count(),
        num_keywords = index.keyword_count(),
        "ingested documents"
    );

    let out_paths = IndexPaths::new(output);
    save_records(&out_paths, &index.to_records())?;
    save_documents(&out_paths, index.documents())?;
    let meta = MetaFile {
        num_docs: index.document_count() as u32,
        num_keywords: index.keyword_count() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    save_meta(&out_paths, &meta)?;

    tracing::info!(output, "index build complete");
    Ok(())
}

/// Resolves the input into `(document id, file path)` pairs.
///
/// A directory is walked for `.txt` files, each identified by its path. A
/// plain file is a document list: every non-empty line names one document
/// file, resolved relative to the list itself, with the line kept verbatim
/// as the document id. The pairs come back sorted so builds are
/// reproducible regardless of walk order.
fn collect_documents(input: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();

    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                found.push((p.display().to_string(), p.to_path_buf()));
            }
        }
    } else {
        let listing = fs::read_to_string(input)
            .with_context(|| format!("cannot read document list {}", input.display()))?;
        let base = input.parent().unwrap_or(Path::new(""));
        for line in listing.lines() {
            let name = line.trim();
            if !name.is_empty() {
                found.push((name.to_string(), base.join(name)));
            }
        }
    }

    found.sort();
    Ok(found)
}

fn noise_from_file(path: &Path) -> Result<NoiseSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read noise-word file {}", path.display()))?;
    let mut noise = NoiseSet::new();
    for word in text.split_whitespace() {
        noise.insert(word);
    }
    tracing::info!(noise_words = noise.len(), "loaded noise words");
    Ok(noise)
}
