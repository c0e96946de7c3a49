//! Roster CSV reader.
//!
//! Decodes the export, skips the title rows at the top of the sheet and
//! yields the remaining lines as [`RawRow`]s. No roster semantics here
//! beyond the expected column count.

use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

use crate::error::{ReadError, ReadResult};
use crate::models::{RawRow, COLUMN_COUNT};

/// Rows at the top of the export that carry sheet metadata and column titles.
pub const HEADER_ROWS: usize = 2;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Result of reading a roster export
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data rows, in file order
    pub rows: Vec<RawRow>,
    /// Encoding used to decode the file
    pub encoding: String,
    /// Number of header rows discarded
    pub header_rows: usize,
    /// Number of blank data rows ignored
    pub blank_rows: usize,
}

/// Guess the encoding of an export with chardet.
///
/// Returns the lowercase WHATWG name encoding_rs knows the guess by, so the
/// result can go straight to [`decode_content`]. Plain ASCII reports as UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _confidence, _language) = chardet::detect(bytes);
    if charset.eq_ignore_ascii_case("ascii") {
        return "utf-8".to_string();
    }
    encoding_rs::Encoding::for_label(charset.as_bytes())
        .map(|codec| codec.name().to_lowercase())
        .unwrap_or_else(|| charset.to_lowercase())
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> ReadResult<String> {
    let encoding_error = || ReadError::Encoding {
        encoding: encoding.to_string(),
    };

    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec()).map_err(|_| encoding_error()),
        label => {
            let codec = encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(encoding_error)?;
            let (text, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(encoding_error());
            }
            Ok(text.into_owned())
        }
    }
}

/// Decode an export, returning the text and the encoding used.
///
/// UTF-8 is tried first. Anything else goes through detection, and
/// Windows-1252 is the last resort since desktop spreadsheet tools save in it.
pub fn decode_auto(bytes: &[u8]) -> ReadResult<(String, String)> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_string(), "utf-8".to_string()));
    }

    let detected = detect_encoding(bytes);
    match decode_content(bytes, &detected) {
        Ok(text) => Ok((text, detected)),
        Err(_) => {
            let fallback = "windows-1252".to_string();
            let text = decode_content(bytes, &fallback)?;
            Ok((text, fallback))
        }
    }
}

/// Read roster rows from a reader, skipping `header_rows` leading records.
///
/// Blank rows are dropped. A data row with fewer than [`COLUMN_COUNT`]
/// cells is an error.
pub fn read_rows<R: Read>(reader: R, header_rows: usize) -> ReadResult<(Vec<RawRow>, usize)> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut blank_rows = 0;

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        if idx < header_rows {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        let row = RawRow::new(line, record.iter().map(str::to_string).collect());

        if row.is_blank() {
            blank_rows += 1;
            continue;
        }

        if row.cells.len() < COLUMN_COUNT {
            return Err(ReadError::MalformedRow {
                line,
                expected: COLUMN_COUNT,
                found: row.cells.len(),
            });
        }

        rows.push(row);
    }

    Ok((rows, blank_rows))
}

/// Parse an already-decoded roster export.
pub fn parse_str(content: &str, encoding: impl Into<String>) -> ReadResult<ParseResult> {
    let (rows, blank_rows) = read_rows(content.as_bytes(), HEADER_ROWS)?;

    Ok(ParseResult {
        rows,
        encoding: encoding.into(),
        header_rows: HEADER_ROWS,
        blank_rows,
    })
}

/// Parse roster bytes, decoding them first.
pub fn parse_bytes(bytes: &[u8]) -> ReadResult<ParseResult> {
    let (content, encoding) = decode_auto(bytes)?;
    parse_str(&content, encoding)
}

/// Read and parse a roster export from disk.
///
/// # Example
/// ```ignore
/// let result = read_roster_file("Team Roster - Main Sheet.csv")?;
/// println!("Encoding: {}, rows: {}", result.encoding, result.rows.len());
/// ```
pub fn read_roster_file<P: AsRef<Path>>(path: P) -> ReadResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn data_line(nickname: &str) -> String {
        let mut cells = vec![""; COLUMN_COUNT];
        cells[0] = "Active";
        cells[1] = nickname;
        cells.join(",")
    }

    fn sheet(lines: &[String]) -> String {
        let mut content = String::from("Team Roster,,\nStatus,Nickname,Notes\n");
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        content
    }

    #[test]
    fn test_header_rows_skipped() {
        let content = sheet(&[data_line("alice"), data_line("bob")]);
        let result = parse_str(&content, "utf-8").unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.header_rows, 2);
        assert_eq!(result.rows[0].get(Column::Nickname), "alice");
        assert_eq!(result.rows[0].line, 3);
        assert_eq!(result.rows[1].line, 4);
    }

    #[test]
    fn test_quoted_cells() {
        let mut cells = vec![String::new(); COLUMN_COUNT];
        cells[1] = "\"Smith, \"\"Doc\"\"\"".to_string();
        let content = sheet(&[cells.join(",")]);
        let result = parse_str(&content, "utf-8").unwrap();

        assert_eq!(result.rows[0].get(Column::Nickname), "Smith, \"Doc\"");
    }

    #[test]
    fn test_blank_rows_ignored() {
        let blank = vec![""; COLUMN_COUNT].join(",");
        let content = sheet(&[data_line("alice"), blank.clone(), blank]);
        let result = parse_str(&content, "utf-8").unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.blank_rows, 2);
    }

    #[test]
    fn test_short_row_is_error() {
        let content = sheet(&[data_line("alice"), "Active,bob,x".to_string()]);
        let err = parse_str(&content, "utf-8").unwrap_err();

        match err {
            ReadError::MalformedRow { line, expected, found } => {
                assert_eq!(line, 4);
                assert_eq!(expected, COLUMN_COUNT);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_extra_columns_kept_but_unused() {
        let content = sheet(&[format!("{},extra", data_line("alice"))]);
        let result = parse_str(&content, "utf-8").unwrap();

        assert_eq!(result.rows[0].cells.len(), COLUMN_COUNT + 1);
    }

    #[test]
    fn test_headers_only() {
        let result = parse_str(&sheet(&[]), "utf-8").unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(sheet(&[data_line("zoë")]).as_bytes());
        let result = parse_bytes(&bytes).unwrap();

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.rows[0].get(Column::Status), "Active");
        assert_eq!(result.rows[0].get(Column::Nickname), "zoë");
    }

    #[test]
    fn test_windows_1252_decoding() {
        // "René" in Windows-1252
        let bytes: &[u8] = &[0x52, 0x65, 0x6E, 0xE9];
        let decoded = decode_content(bytes, "windows-1252").unwrap();
        assert_eq!(decoded, "René");
    }

    #[test]
    fn test_non_utf8_falls_back() {
        let bytes: &[u8] = &[0x52, 0x65, 0x6E, 0xE9, 0x0A];
        let (text, encoding) = decode_auto(bytes).unwrap();
        assert!(text.starts_with("Ren"));
        assert_ne!(encoding, "utf-8");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_roster_file(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn test_detect_encoding_names() {
        assert_eq!(detect_encoding(b"Nickname,Team\nalice,PR\n"), "utf-8");

        let guess = detect_encoding(&[0x52, 0x65, 0x6E, 0xE9, 0x0A]);
        assert_eq!(guess, guess.to_lowercase());
    }
}
