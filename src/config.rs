//src/config.rs

use crate::paralogs::ParalogCriteria;

/// Suffix appended to an alignment path for its annotated copy.
pub const DEFAULT_TAX_SUFFIX: &str = ".tax";

/// Suffix appended to an alignment path for its paralog subset.
pub const DEFAULT_PARALOG_SUFFIX: &str = ".paralogs";

/// How alignment files are annotated and where the results go.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub tax_suffix: String,
    pub paralog_suffix: String,
    /// Write a paralog file next to each annotated file when the criteria hold.
    pub extract_paralogs: bool,
    pub criteria: ParalogCriteria,
    /// Extension of alignment files picked up from a directory.
    pub a3m_extension: String,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            tax_suffix: DEFAULT_TAX_SUFFIX.to_string(),
            paralog_suffix: DEFAULT_PARALOG_SUFFIX.to_string(),
            extract_paralogs: true,
            criteria: ParalogCriteria::default(),
            a3m_extension: "a3m".to_string(),
        }
    }
}
