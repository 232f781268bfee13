//src/a3m.rs

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};
use crate::types::SequenceRecord;

/// Opens `path` for buffered reading, gunzipping files ending in `.gz`.
pub(crate) fn open_text<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Parses a3m/FASTA text into records, in file order.
///
/// Lines are trimmed. `#` lines and blank lines are ignored, a `>` line opens a
/// new record and every other line is appended to the open record's sequence.
pub fn parse_a3m(text: &str) -> Result<Vec<SequenceRecord>> {
    let mut records: Vec<SequenceRecord> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            records.push(SequenceRecord::new(header, String::new()));
            continue;
        }
        if line.is_empty() {
            continue;
        }
        match records.last_mut() {
            Some(record) => record.sequence.push_str(line),
            None => {
                return Err(Error::Parse {
                    line: lineno + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(records)
}

/// Reads and parses an a3m file (plain or `.gz`).
pub fn read_a3m<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let mut reader = open_text(path)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_a3m(&text)
}

/// Serializes records as alternating header and sequence lines.
///
/// Headers get a `>` unless they already start with one. No trailing newline.
pub fn to_a3m_string(records: &[SequenceRecord]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(records.len() * 2);
    for record in records {
        if record.header.starts_with('>') {
            lines.push(record.header.clone());
        } else {
            lines.push(format!(">{}", record.header));
        }
        lines.push(record.sequence.clone());
    }
    lines.join("\n")
}

/// Writes `records` to `path`, replacing any existing file.
pub fn write_a3m<P: AsRef<Path>>(records: &[SequenceRecord], path: P) -> Result<()> {
    let mut f = File::create(path.as_ref())?;
    f.write_all(to_a3m_string(records).as_bytes())?;
    f.flush()?;
    Ok(())
}
