// src/lib.rs
pub mod a3m;
pub mod annotate;
pub mod config;
pub mod error;
pub mod header;
pub mod pairs;
pub mod paralogs;
pub mod taxdb;
pub mod types;

use rayon::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::a3m::{read_a3m, to_a3m_string, write_a3m};
use crate::annotate::{annotate_records, to_sequence_records};
use crate::config::AnnotateOptions;
use crate::paralogs::select_paralogs_with;
use crate::taxdb::TaxonomyTable;
use crate::types::{AnnotatedRecord, FileSummary, SequenceRecord};

pub use crate::error::{Error, Result};

/// Annotation of one alignment. Text is generated on demand.
pub struct AnnotationResults {
    /// Records as parsed from the alignment.
    pub records: Vec<SequenceRecord>,
    /// Records after the taxonomy join (fan-out included).
    pub annotated: Vec<AnnotatedRecord>,
    /// Query plus paralog hits, if the paralog criteria were met.
    pub paralogs: Option<Vec<SequenceRecord>>,
}

impl AnnotationResults {
    /// Annotates `records`, extracting paralogs when `options.extract_paralogs` is set.
    pub fn build(records: Vec<SequenceRecord>, table: &TaxonomyTable, options: &AnnotateOptions) -> Self {
        let annotated = annotate_records(&records, table);
        let paralogs = if options.extract_paralogs {
            select_paralogs_with(&annotated, &options.criteria)
        } else {
            None
        };
        Self {
            records,
            annotated,
            paralogs,
        }
    }

    pub fn get_annotated_text(&self) -> String {
        to_a3m_string(&to_sequence_records(&self.annotated))
    }

    pub fn get_paralog_text(&self) -> Option<String> {
        self.paralogs.as_deref().map(to_a3m_string)
    }

    pub fn unmatched_count(&self) -> usize {
        self.annotated.iter().filter(|a| !a.is_matched()).count()
    }
}

/// `path` with `suffix` appended to its file name (`x.a3m` -> `x.a3m.tax`).
pub fn output_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Annotates one alignment file and writes `<file><tax_suffix>` next to it,
/// plus `<file><paralog_suffix>` when paralogs were selected. With paralog
/// extraction enabled, a paralog file left by an earlier run is removed when the
/// file no longer qualifies.
pub fn annotate_msa_file(
    path: &Path,
    table: &TaxonomyTable,
    options: &AnnotateOptions,
) -> Result<FileSummary> {
    let records = read_a3m(path)?;
    let results = AnnotationResults::build(records, table, options);

    if results.annotated.is_empty() {
        log::warn!("{}: no records, writing empty output", path.display());
    }

    let annotated_output = output_path(path, &options.tax_suffix);
    write_a3m(&to_sequence_records(&results.annotated), &annotated_output)?;
    log::debug!("Wrote {}", annotated_output.display());

    let paralog_output = match &results.paralogs {
        Some(paralogs) => {
            let out = output_path(path, &options.paralog_suffix);
            write_a3m(paralogs, &out)?;
            log::info!(
                "{}: wrote {} paralog candidates to {}",
                path.display(),
                paralogs.len() - 1,
                out.display()
            );
            Some(out)
        }
        None => {
            let stale = output_path(path, &options.paralog_suffix);
            if options.extract_paralogs && stale.is_file() {
                fs::remove_file(&stale)?;
                log::info!("{}: removed stale {}", path.display(), stale.display());
            }
            None
        }
    };

    Ok(FileSummary {
        input: path.to_path_buf(),
        annotated_output,
        records_in: results.records.len(),
        records_out: results.annotated.len(),
        unmatched: results.unmatched_count(),
        paralog_output,
    })
}

/// Alignment files with the configured extension directly inside `dir`, sorted.
pub fn find_msa_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|ext| ext == extension).unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Annotates `msa_path`: a single file, or every alignment file of a directory.
///
/// Files of a directory are processed in parallel against the shared table; the
/// first failure aborts the batch.
pub fn annotate_msa_path(
    msa_path: &Path,
    table: &TaxonomyTable,
    options: &AnnotateOptions,
) -> Result<Vec<FileSummary>> {
    let files = if msa_path.is_dir() {
        find_msa_files(msa_path, &options.a3m_extension)?
    } else {
        vec![msa_path.to_path_buf()]
    };
    log::info!("Annotating {} alignment file(s)", files.len());

    files
        .par_iter()
        .map(|path| annotate_msa_file(path, table, options))
        .collect()
}

/// Convenience wrapper: loads the taxonomy table and annotates `msa_path`.
pub fn add_taxonomy_to_msa<P: AsRef<Path>, Q: AsRef<Path>>(
    taxonomy_path: P,
    msa_path: Q,
    options: &AnnotateOptions,
) -> Result<Vec<FileSummary>> {
    let table = TaxonomyTable::load(taxonomy_path)?;
    annotate_msa_path(msa_path.as_ref(), &table, options)
}
