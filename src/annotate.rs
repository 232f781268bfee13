//src/annotate.rs

use crate::header::{infer_delimiter, mixed_delimiter_headers, split_header};
use crate::taxdb::TaxonomyTable;
use crate::types::{AnnotatedRecord, SequenceRecord};

/// Left-joins alignment records against the taxonomy table on their primary id.
///
/// Headers are split with one delimiter inferred for the whole file. A record
/// whose id has `m` taxonomy rows yields `m` annotated records (in table order),
/// a record without rows yields one record with `nan` taxonomy fields.
pub fn annotate_records(records: &[SequenceRecord], table: &TaxonomyTable) -> Vec<AnnotatedRecord> {
    let headers: Vec<&str> = records.iter().map(|r| r.header.as_str()).collect();
    let delimiter = infer_delimiter(&headers);

    let mixed = mixed_delimiter_headers(&headers, delimiter);
    if mixed > 0 {
        log::warn!(
            "{} of {} headers do not use the inferred {} delimiter; their fields will be mis-split",
            mixed,
            headers.len(),
            delimiter
        );
    }

    let mut annotated = Vec::with_capacity(records.len());
    for record in records {
        let fields = split_header(&record.header, delimiter);
        let id = fields[0];
        let extra: Vec<String> = fields[1..].iter().map(|s| s.to_string()).collect();

        let hits = table.lookup(id);
        if hits.is_empty() {
            annotated.push(AnnotatedRecord::unmatched(record, id, extra));
            continue;
        }
        for hit in hits {
            annotated.push(AnnotatedRecord::from_hit(record, id, extra.clone(), hit));
        }
    }

    log::debug!(
        "Annotated {} records into {} rows ({} delimiter)",
        records.len(),
        annotated.len(),
        delimiter
    );
    annotated
}

/// Annotated records as writer input, headers in annotated order.
pub fn to_sequence_records(annotated: &[AnnotatedRecord]) -> Vec<SequenceRecord> {
    annotated
        .iter()
        .map(|a| SequenceRecord::new(a.header(), a.sequence.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a3m::{parse_a3m, to_a3m_string};
    use crate::types::MISSING;
    use std::io::Cursor;

    fn table(text: &str) -> TaxonomyTable {
        TaxonomyTable::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_end_to_end_headers() {
        let records =
            parse_a3m(">q\nAAA\n>t1|speciesA\nAAA\n>t2|speciesA\nAAC\n>t3|speciesB\nAAG").unwrap();
        let table = table(
            "t1\t1e-20\t11\tspeciesA\troot;A\n\
             t2\t3e-15\t11\tspeciesA\troot;A\n\
             t3\t4e-09\t22\tspeciesB\troot;B\n",
        );

        let annotated = annotate_records(&records, &table);
        let headers: Vec<String> = annotated.iter().map(AnnotatedRecord::header).collect();
        assert_eq!(
            headers,
            vec![
                "q|nan|nan|nan|nan",
                "t1|speciesA|11|1e-20|speciesA|root;A",
                "t2|speciesA|11|3e-15|speciesA|root;A",
                "t3|speciesB|22|4e-09|speciesB|root;B",
            ]
        );

        let text = to_a3m_string(&to_sequence_records(&annotated));
        assert!(text.starts_with(">q|nan|nan|nan|nan\nAAA\n>t1|speciesA|11|1e-20|"));
        assert!(text.ends_with("\nAAG"));
    }

    #[test]
    fn test_fan_out_count() {
        let records = parse_a3m(">q\nMK\n>a\nMK\n>b\nMR\n>c\nMQ").unwrap();
        let table = table(
            "b\t1e-5\t1\tx\tl1\n\
             b\t1e-5\t2\ty\tl2\n\
             b\t1e-5\t3\tz\tl3\n\
             c\t1e-3\t4\tw\tl4\n",
        );
        let annotated = annotate_records(&records, &table);

        // N - 1 + M
        assert_eq!(annotated.len(), 4 - 1 + 3);
        let b: Vec<&AnnotatedRecord> = annotated.iter().filter(|a| a.id == "b").collect();
        assert_eq!(b.len(), 3);
        assert!(b.iter().all(|a| a.sequence == "MR"));
        assert_eq!(
            b.iter().map(|a| a.taxid.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        // left order is kept
        assert_eq!(
            annotated.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec!["q", "a", "b", "b", "b", "c"]
        );
    }

    #[test]
    fn test_missing_match_sentinel() {
        let records = vec![SequenceRecord::new("lonely", "MKV")];
        let annotated = annotate_records(&records, &TaxonomyTable::default());
        assert_eq!(annotated.len(), 1);
        let a = &annotated[0];
        assert!(!a.is_matched());
        for v in [&a.taxname, &a.taxid, &a.evalue, &a.taxlineage] {
            assert_eq!(v, MISSING);
        }
        assert_eq!(a.header(), "lonely|nan|nan|nan|nan");
    }

    #[test]
    fn test_tab_headers_keep_extra_fields_in_order() {
        let records = vec![
            SequenceRecord::new("101", "MKV"),
            SequenceRecord::new("UniRef100_X\t120\t0.85\t1e-30", "MKI"),
        ];
        let table = table("UniRef100_X\t1e-30\t9606\tHomo sapiens\tk_Metazoa;s_Homo sapiens\n");
        let annotated = annotate_records(&records, &table);
        assert_eq!(
            annotated[1].header(),
            "UniRef100_X|Homo_sapiens|9606|1e-30|120|0.85|1e-30|k_Metazoa;s_Homo_sapiens"
        );
        assert_eq!(annotated[0].header(), "101|nan|nan|nan|nan");
    }

    #[test]
    fn test_tab_header_in_pipe_file_stays_unmatched() {
        let records = parse_a3m(">q\nAAA\n>t1\tx\nAAC\n>t2|a\nAAG").unwrap();
        let table = table(
            "t1\t1e-20\t11\tspeciesA\troot;A\n\
             t2\t3e-15\t11\tspeciesA\troot;A\n",
        );
        assert_eq!(mixed_delimiter_headers(&["q", "t1\tx", "t2|a"], infer_delimiter(&["t2|a"])), 1);

        let annotated = annotate_records(&records, &table);
        assert_eq!(annotated.len(), 3);
        let mis_split = &annotated[1];
        assert_eq!(mis_split.id, "t1\tx");
        assert!(mis_split.extra_fields.is_empty());
        assert!(!mis_split.is_matched());
        assert_eq!(mis_split.header(), "t1\tx|nan|nan|nan|nan");
        assert_eq!(mis_split.original_header, "t1\tx");
        assert!(annotated[2].is_matched());
    }

    #[test]
    fn test_original_header_is_kept() {
        let records = parse_a3m(">q|extra\nAAA\n>t1|a\nAAC").unwrap();
        let table = table("t1\t1e-20\t11\tspeciesA\troot;A\n");
        let annotated = annotate_records(&records, &table);
        assert_eq!(annotated[0].original_header, "q|extra");
        assert_eq!(annotated[0].id, "q");
        assert_eq!(annotated[1].original_header, "t1|a");
    }

    #[test]
    fn test_empty_input() {
        assert!(annotate_records(&[], &TaxonomyTable::default()).is_empty());
    }
}
