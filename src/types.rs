//src/types.rs

/// Placeholder written for every taxonomy field of a sequence with no taxonomy hit.
pub const MISSING: &str = "nan";

/// One `>header` / sequence pair of an alignment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Header text without the leading `>`.
    pub header: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }
}

/// One row of the `convertalis` taxonomy table:
///
/// ```text
/// <target>\t<evalue>\t<taxid>\t<taxname>\t<taxlineage>
/// ```
///
/// Values are kept exactly as written by the search tool (e-values are not reparsed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxonomyRow {
    pub target: String,
    pub evalue: String,
    pub taxid: String,
    pub taxname: String,
    pub taxlineage: String,
}

/// An alignment record joined against one taxonomy row (or against nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub sequence: String,
    /// Header of the alignment record as parsed, before annotation.
    pub original_header: String,
    /// Primary identifier (header field 0).
    pub id: String,
    /// Header fields after the identifier, in original order.
    pub extra_fields: Vec<String>,
    pub taxname: String,
    pub taxid: String,
    pub evalue: String,
    pub taxlineage: String,
}

impl AnnotatedRecord {
    /// Record for a sequence without any taxonomy hit.
    pub fn unmatched(source: &SequenceRecord, id: &str, extra_fields: Vec<String>) -> Self {
        Self {
            sequence: source.sequence.clone(),
            original_header: source.header.clone(),
            id: id.to_string(),
            extra_fields,
            taxname: MISSING.to_string(),
            taxid: MISSING.to_string(),
            evalue: MISSING.to_string(),
            taxlineage: MISSING.to_string(),
        }
    }

    pub fn from_hit(
        source: &SequenceRecord,
        id: &str,
        extra_fields: Vec<String>,
        hit: &TaxonomyRow,
    ) -> Self {
        Self {
            sequence: source.sequence.clone(),
            original_header: source.header.clone(),
            id: id.to_string(),
            extra_fields,
            taxname: hit.taxname.clone(),
            taxid: hit.taxid.clone(),
            evalue: hit.evalue.clone(),
            taxlineage: hit.taxlineage.clone(),
        }
    }

    pub fn is_matched(&self) -> bool {
        !(self.taxname == MISSING
            && self.taxid == MISSING
            && self.evalue == MISSING
            && self.taxlineage == MISSING)
    }

    /// Annotated header: `id|taxname|taxid|evalue|<extra fields>|taxlineage`.
    pub fn header(&self) -> String {
        let mut fields: Vec<&str> = Vec::with_capacity(5 + self.extra_fields.len());
        fields.push(&self.id);
        fields.push(&self.taxname);
        fields.push(&self.taxid);
        fields.push(&self.evalue);
        fields.extend(self.extra_fields.iter().map(String::as_str));
        fields.push(&self.taxlineage);
        fields.join("|")
    }

    /// Header without the original extra fields: `id|taxname|taxid|evalue|taxlineage`.
    pub fn short_header(&self) -> String {
        [
            self.id.as_str(),
            self.taxname.as_str(),
            self.taxid.as_str(),
            self.evalue.as_str(),
            self.taxlineage.as_str(),
        ]
        .join("|")
    }
}

/// What happened to one alignment file during annotation.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub input: std::path::PathBuf,
    pub annotated_output: std::path::PathBuf,
    /// Records parsed from the input.
    pub records_in: usize,
    /// Records written (after taxonomy fan-out).
    pub records_out: usize,
    /// Records without any taxonomy hit.
    pub unmatched: usize,
    /// Set when a paralog file was written.
    pub paralog_output: Option<std::path::PathBuf>,
}
