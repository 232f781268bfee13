//src/header.rs

use std::fmt;

/// Field separator of alignment headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Pipe => write!(f, "pipe"),
        }
    }
}

/// Picks the delimiter for a whole file from its last header:
/// pipe if that header contains `|`, tab otherwise.
pub fn infer_delimiter<S: AsRef<str>>(headers: &[S]) -> Delimiter {
    match headers.last() {
        Some(h) if h.as_ref().contains('|') => Delimiter::Pipe,
        _ => Delimiter::Tab,
    }
}

/// Splits a header into fields. Field 0 is the primary identifier.
pub fn split_header(header: &str, delimiter: Delimiter) -> Vec<&str> {
    header.split(delimiter.as_char()).collect()
}

/// Counts headers that contain the other delimiter but not the chosen one,
/// i.e. headers whose split under `delimiter` is probably wrong.
pub fn mixed_delimiter_headers<S: AsRef<str>>(headers: &[S], delimiter: Delimiter) -> usize {
    let (chosen, other) = match delimiter {
        Delimiter::Pipe => ('|', '\t'),
        Delimiter::Tab => ('\t', '|'),
    };
    headers
        .iter()
        .map(AsRef::as_ref)
        .filter(|h| h.contains(other) && !h.contains(chosen))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_last_header_only() {
        assert_eq!(infer_delimiter(&["q", "a|b"]), Delimiter::Pipe);
        assert_eq!(infer_delimiter(&["a|b", "c\td"]), Delimiter::Tab);
        assert_eq!(infer_delimiter::<&str>(&[]), Delimiter::Tab);
    }

    #[test]
    fn test_split() {
        assert_eq!(split_header("t1|speciesA|x", Delimiter::Pipe), vec!["t1", "speciesA", "x"]);
        assert_eq!(split_header("t1\t55\t0.9", Delimiter::Tab), vec!["t1", "55", "0.9"]);
        assert_eq!(split_header("q", Delimiter::Pipe), vec!["q"]);
        // inconsistent header is mis-split, not rejected
        assert_eq!(split_header("t1\tx", Delimiter::Pipe), vec!["t1\tx"]);
    }

    #[test]
    fn test_mixed_delimiters() {
        let headers = ["q", "a|b", "c\td", "e|f"];
        assert_eq!(mixed_delimiter_headers(&headers, Delimiter::Pipe), 1);
        assert_eq!(mixed_delimiter_headers(&headers, Delimiter::Tab), 2);
    }
}
