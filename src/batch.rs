use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::io::{
    call_title_from_path, read_markup_file, write_metadata_table, write_round_tables, MetadataRecord,
};
use crate::models::{Diagnostic, DiagnosticKind, TranscriptMetadata};
use crate::stages::{parse_document, ParserConfig};

/// Configuration for a directory-wide run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory searched for markup files
    pub input_dir: PathBuf,
    /// Directory receiving `presentation/`, `QA/` and `meta_data.csv`
    pub out_dir: PathBuf,
    /// Glob, relative to `input_dir`, selecting the documents
    pub pattern: String,
    /// Worker threads; `None` uses one per core
    pub jobs: Option<usize>,
    /// Write the per-call paragraph tables
    pub write_content: bool,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            out_dir: out_dir.into(),
            pattern: "**/*.html".to_string(),
            jobs: None,
            write_content: true,
        }
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.out_dir.join("meta_data.csv")
    }
}

/// Result of processing a single file within a batch
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub call_title: String,
    /// `None` only if the metadata could not be encoded
    pub record: Option<MetadataRecord>,
    pub content_parsed: bool,
    pub tables: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Totals for a finished batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub documents: usize,
    pub content_parsed: usize,
    pub tables_written: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub metadata_path: PathBuf,
}

/// Find the documents under `input_dir` matching `pattern`, sorted by path
pub fn discover_documents(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = input_dir.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    let mut paths: Vec<PathBuf> = glob::glob(&full_pattern)
        .with_context(|| format!("Invalid glob pattern: {}", full_pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read, parse and write one document. Failures are folded into diagnostics.
pub fn process_document(path: &Path, config: &BatchConfig, parser: &ParserConfig) -> DocumentOutcome {
    let call_title = call_title_from_path(path);
    let mut diagnostics = Vec::new();
    let mut tables = Vec::new();

    let (metadata, content_parsed) = match read_markup_file(path) {
        Ok(markup) => {
            let parsed = parse_document(&markup, &call_title, parser);
            diagnostics.extend(parsed.diagnostics);

            if config.write_content && parsed.content_parsed {
                match write_round_tables(&parsed.transcript, &config.out_dir) {
                    Ok(paths) => tables = paths,
                    Err(e) => {
                        warn!("{}: {:#}", call_title, e);
                        diagnostics.push(Diagnostic::new(
                            &call_title,
                            DiagnosticKind::WriteFailed {
                                reason: format!("{:#}", e),
                            },
                        ));
                    }
                }
            }
            (parsed.transcript.metadata, parsed.content_parsed)
        }
        Err(e) => {
            warn!("{}: {:#}", call_title, e);
            diagnostics.push(Diagnostic::new(
                &call_title,
                DiagnosticKind::ReadFailed {
                    reason: format!("{:#}", e),
                },
            ));
            (TranscriptMetadata::new(&call_title), false)
        }
    };

    let record = match MetadataRecord::from_metadata(&metadata) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("{}: {:#}", call_title, e);
            diagnostics.push(Diagnostic::new(
                &call_title,
                DiagnosticKind::WriteFailed {
                    reason: format!("{:#}", e),
                },
            ));
            None
        }
    };

    DocumentOutcome {
        path: path.to_path_buf(),
        call_title,
        record,
        content_parsed,
        tables,
        diagnostics,
    }
}

/// Parse every matching document on a worker pool, then write the
/// aggregated metadata table once all workers are done.
pub fn run_batch(config: &BatchConfig, parser: &ParserConfig) -> Result<BatchSummary> {
    let paths = discover_documents(&config.input_dir, &config.pattern)?;
    info!("Found {} documents in {:?}", paths.len(), config.input_dir);

    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create directory: {:?}", config.out_dir))?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = config.jobs.filter(|&n| n > 0) {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build().context("Failed to build worker pool")?;

    let outcomes: Vec<DocumentOutcome> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| process_document(path, config, parser))
            .collect()
    });

    let records: Vec<MetadataRecord> = outcomes.iter().filter_map(|o| o.record.clone()).collect();
    let metadata_path = config.metadata_path();
    write_metadata_table(&records, &metadata_path)?;

    let summary = BatchSummary {
        documents: outcomes.len(),
        content_parsed: outcomes.iter().filter(|o| o.content_parsed).count(),
        tables_written: outcomes.iter().map(|o| o.tables.len()).sum(),
        diagnostics: outcomes.into_iter().flat_map(|o| o.diagnostics).collect(),
        metadata_path,
    };
    info!(
        "Parsed {} documents ({} with content), {} tables, {} diagnostics",
        summary.documents,
        summary.content_parsed,
        summary.tables_written,
        summary.diagnostics.len()
    );

    Ok(summary)
}
