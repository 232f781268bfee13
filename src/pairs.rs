//src/pairs.rs

use ahash::AHashMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::a3m::open_text;
use crate::error::{Error, Result};
use crate::header::{infer_delimiter, split_header};
use crate::types::SequenceRecord;

/// Target id -> full target sequence, from
/// `mmseqs convertalis --format-output target,tseq`.
pub type SequenceMap = AHashMap<String, String>;

/// One row of the paired-sequence table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRow {
    pub id_1: String,
    pub seq_1: String,
    pub id_2: String,
    pub seq_2: String,
}

/// Parses a `target\tsequence` table. Later rows for the same target win.
pub fn load_sequence_map<P: AsRef<Path>>(path: P) -> Result<SequenceMap> {
    let path = path.as_ref();
    let reader = open_text(path)?;

    let mut map = SequenceMap::new();
    for (lineno, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let parts: Vec<&str> = line.trim().split('\t').collect();
        if parts.len() < 2 {
            return Err(Error::MalformedTable {
                path: path.to_path_buf(),
                line: lineno + 1,
                expected: 2,
                fields: parts.len(),
            });
        }
        map.insert(parts[0].to_string(), parts[1].to_string());
    }
    log::info!("Loaded {} target sequences from {}", map.len(), path.display());
    Ok(map)
}

fn primary_ids(records: &[SequenceRecord]) -> Vec<&str> {
    let headers: Vec<&str> = records.iter().map(|r| r.header.as_str()).collect();
    let delimiter = infer_delimiter(&headers);
    headers
        .into_iter()
        .map(|h| split_header(h, delimiter)[0])
        .collect()
}

/// Pairs the records of two alignments by position and resolves both primary ids
/// to full sequences. Positions where either id is unknown, or where one alignment
/// has already ended, are dropped.
pub fn build_pair_table(
    sequences: &SequenceMap,
    msa_1: &[SequenceRecord],
    msa_2: &[SequenceRecord],
) -> Vec<PairRow> {
    let ids_1 = primary_ids(msa_1);
    let ids_2 = primary_ids(msa_2);

    ids_1
        .into_iter()
        .zip(ids_2)
        .filter_map(|(id_1, id_2)| {
            let seq_1 = sequences.get(id_1)?;
            let seq_2 = sequences.get(id_2)?;
            Some(PairRow {
                id_1: id_1.to_string(),
                seq_1: seq_1.clone(),
                id_2: id_2.to_string(),
                seq_2: seq_2.clone(),
            })
        })
        .collect()
}

/// Tab-separated text with an `id_1 seq_1 id_2 seq_2` header line.
pub fn pair_table_to_string(rows: &[PairRow]) -> String {
    let mut output = String::new();
    output.push_str("id_1\tseq_1\tid_2\tseq_2\n");
    for row in rows {
        writeln!(output, "{}\t{}\t{}\t{}", row.id_1, row.seq_1, row.id_2, row.seq_2).unwrap();
    }
    output
}

pub fn write_pair_table<P: AsRef<Path>>(rows: &[PairRow], path: P) -> Result<()> {
    fs::write(path.as_ref(), pair_table_to_string(rows))?;
    log::info!("Wrote {} sequence pairs to {}", rows.len(), path.as_ref().display());
    Ok(())
}
