//! Line-delimited record source.

use hashdex_common::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads records from a line-delimited text stream.
///
/// Each line is trimmed of surrounding whitespace; blank lines are skipped;
/// the remaining lines become records in stream order.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            records.push(trimmed.to_string());
        }
    }
    Ok(records)
}

/// Opens a word file and reads its records.
pub fn load_records(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashdex_common::HashdexError;
    use std::io::Cursor;
    use std::io::Write;

    #[test]
    fn test_read_records_trims_and_skips_blanks() {
        let input = "apple\n  banana  \n\n   \ncherry\n";
        let records = read_records(Cursor::new(input)).unwrap();
        assert_eq!(records, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_read_records_preserves_stream_order() {
        let input = "zebra\napple\nmango\n";
        let records = read_records(Cursor::new(input)).unwrap();
        assert_eq!(records, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_read_records_empty_stream() {
        let records = read_records(Cursor::new("")).unwrap();
        assert!(records.is_empty());

        let records = read_records(Cursor::new("\n\n  \n")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_records_without_trailing_newline() {
        let records = read_records(Cursor::new("alpha\nbeta")).unwrap();
        assert_eq!(records, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "one\ntwo\n\nthree").unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_load_records_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        let result = load_records(&path);
        assert!(matches!(result, Err(HashdexError::Io(_))));
    }
}
