//src/taxdb.rs

use ahash::{AHashMap, AHashSet};
use std::io::BufRead;
use std::path::Path;

use crate::a3m::open_text;
use crate::error::{Error, Result};
use crate::types::TaxonomyRow;

/// Number of columns written by
/// `mmseqs convertalis --format-output target,evalue,taxid,taxname,taxlineage`.
pub const TAXONOMY_COLUMNS: usize = 5;

/// Taxonomy hits grouped by target id.
///
/// A target may map to several distinct rows; all of them are kept, in file order,
/// so joins against the table fan out the way a relational left join does.
#[derive(Debug, Default, Clone)]
pub struct TaxonomyTable {
    by_target: AHashMap<String, Vec<TaxonomyRow>>,
    rows: usize,
}

impl TaxonomyTable {
    /// Parses a taxonomy table file in the format:
    /// ```text
    /// <target>\t<evalue>\t<taxid>\t<taxname>\t<taxlineage>
    /// ```
    /// `.gz` files are decompressed on the fly.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_text(path)?;
        let table = Self::parse(reader, path)?;
        log::info!(
            "Loaded taxonomy table {} with {} rows for {} targets",
            path.display(),
            table.rows,
            table.by_target.len()
        );
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::parse(reader, Path::new("-"))
    }

    fn parse<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut seen: AHashSet<TaxonomyRow> = AHashSet::new();
        let mut table = TaxonomyTable::default();

        for (lineno, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() != TAXONOMY_COLUMNS {
                return Err(Error::MalformedTable {
                    path: source.to_path_buf(),
                    line: lineno + 1,
                    expected: TAXONOMY_COLUMNS,
                    fields: parts.len(),
                });
            }

            let row = TaxonomyRow {
                target: parts[0].to_string(),
                evalue: parts[1].to_string(),
                taxid: parts[2].to_string(),
                taxname: parts[3].replace(' ', "_"),
                taxlineage: parts[4].replace(' ', "_"),
            };

            // Exact duplicates collapse onto the first occurrence
            if !seen.insert(row.clone()) {
                continue;
            }
            table.by_target.entry(row.target.clone()).or_default().push(row);
            table.rows += 1;
        }

        Ok(table)
    }

    /// All distinct rows for `target`, in file order. Empty when there is no hit.
    pub fn lookup(&self, target: &str) -> &[TaxonomyRow] {
        self.by_target
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.by_target.keys().map(String::as_str)
    }
}
