//src/paralogs.rs

use ahash::AHashMap;

use crate::types::{AnnotatedRecord, SequenceRecord};

/// Distinct multi-hit taxa needed before paralogs are emitted.
pub const DEFAULT_MIN_PARALOG_TAXA: usize = 3;

/// Hits a taxon needs to count as a paralog taxon.
pub const DEFAULT_MIN_TAXON_COUNT: usize = 2;

/// Thresholds for paralog extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParalogCriteria {
    /// Minimum number of distinct paralog taxa needed to emit anything.
    pub min_paralog_taxa: usize,
    /// Minimum number of hits for a taxon to count as a paralog taxon.
    pub min_taxon_count: usize,
}

impl Default for ParalogCriteria {
    fn default() -> Self {
        Self {
            min_paralog_taxa: DEFAULT_MIN_PARALOG_TAXA,
            min_taxon_count: DEFAULT_MIN_TAXON_COUNT,
        }
    }
}

/// Selects hits from taxa that are represented more than once in the alignment,
/// using the default criteria. See [`select_paralogs_with`].
pub fn select_paralogs(annotated: &[AnnotatedRecord]) -> Option<Vec<SequenceRecord>> {
    select_paralogs_with(annotated, &ParalogCriteria::default())
}

/// Groups annotated records by `taxname` and keeps the records of every taxon with
/// at least `min_taxon_count` hits, sorted by `(taxname, evalue)`.
///
/// E-values are compared as strings, as written by the search tool. Returns `None`
/// when fewer than `min_paralog_taxa` such taxa exist. Otherwise the result starts
/// with the query (`annotated[0]`, original header and sequence), followed by the
/// selected hits with `id|taxname|taxid|evalue|taxlineage` headers.
pub fn select_paralogs_with(
    annotated: &[AnnotatedRecord],
    criteria: &ParalogCriteria,
) -> Option<Vec<SequenceRecord>> {
    let query = annotated.first()?;

    let mut sorted: Vec<&AnnotatedRecord> = annotated.iter().collect();
    sorted.sort_by(|a, b| (&a.taxname, &a.evalue).cmp(&(&b.taxname, &b.evalue)));

    let mut taxon_counts: AHashMap<&str, usize> = AHashMap::new();
    for record in sorted.iter().copied() {
        *taxon_counts.entry(record.taxname.as_str()).or_insert(0) += 1;
    }
    let paralog_taxa = taxon_counts
        .values()
        .filter(|&&count| count >= criteria.min_taxon_count)
        .count();

    if paralog_taxa < criteria.min_paralog_taxa {
        log::debug!(
            "{} paralog taxa found, {} required; no paralog output",
            paralog_taxa,
            criteria.min_paralog_taxa
        );
        return None;
    }

    let mut selected = Vec::with_capacity(sorted.len() + 1);
    selected.push(SequenceRecord::new(
        query.original_header.clone(),
        query.sequence.clone(),
    ));
    selected.extend(
        sorted
            .into_iter()
            .filter(|r| taxon_counts[r.taxname.as_str()] >= criteria.min_taxon_count)
            .map(|r| SequenceRecord::new(r.short_header(), r.sequence.clone())),
    );
    Some(selected)
}
