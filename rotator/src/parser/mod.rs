//! CSV input decoding with encoding and delimiter auto-detection.
//!
//! Produces [`InputRow`]s: records that carry both an `id` and a `json`
//! field. Everything else in the file is ignored.

use std::path::Path;

use serde_json::Value;

use crate::error::{CsvError, CsvResult, InputError, InputResult, RowError};
use crate::models::{DecodedRow, InputRow};

/// Header of the identifier column
pub const ID_COLUMN: &str = "id";

/// Header of the JSON array column
pub const JSON_COLUMN: &str = "json";

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Rows that have both `id` and `json`, in file order
    pub rows: Vec<InputRow>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
    /// Number of data records read (header excluded)
    pub rows_read: usize,
}

impl ParseResult {
    /// Records dropped because `id` or `json` was missing
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows.len()
    }
}

/// Check the input path before anything is read.
///
/// The extension check comes first, then existence.
pub fn validate_input_path(path: Option<&Path>, require_csv_extension: bool) -> InputResult<&Path> {
    let path = path.ok_or(InputError::MissingPath)?;

    if require_csv_extension && path.extension().and_then(|e| e.to_str()) != Some("csv") {
        return Err(InputError::InvalidExtension(path.to_path_buf()));
    }

    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    Ok(path)
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // Windows-1252 maps every printable ISO-8859-1 byte to the same character
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => {
            let decoder = encoding_rs::Encoding::for_label(other.as_bytes())
                .ok_or_else(|| CsvError::Encoding(format!("unsupported encoding '{}'", other)))?;
            decoder.decode(bytes).0.into_owned()
        }
    };

    Ok(strip_bom(&content).to_string())
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Ties go to the earlier candidate; defaults to `,`.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Decode CSV content into rows that have both `id` and `json`.
///
/// Empty fields count as missing. Extra columns are ignored. A record
/// shorter than the header is kept with its trailing fields missing; one
/// longer than the header is a decode error.
pub fn read_rows(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<InputRow>, usize)> {
    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::Decode {
        line: 0,
        message: format!("delimiter '{}' is not a single-byte character", delimiter),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let id_index = headers.iter().position(|h| h == ID_COLUMN);
    let json_index = headers.iter().position(|h| h == JSON_COLUMN);

    let mut rows = Vec::new();
    let mut rows_read = 0;

    for record in reader.records() {
        let record = record?;
        rows_read += 1;

        if record.len() > headers.len() {
            return Err(CsvError::Decode {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!(
                    "column header mismatch: expected {} columns, got {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let field = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
        };

        if let (Some(id), Some(json)) = (field(id_index), field(json_index)) {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(InputRow::new(line, id, json));
        }
    }

    Ok((headers, rows, rows_read))
}

/// Parse CSV content with an optional delimiter override.
pub fn parse_content(content: &str, delimiter: Option<char>, encoding: String) -> CsvResult<ParseResult> {
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(content));
    let (headers, rows, rows_read) = read_rows(content, delimiter)?;

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
        rows_read,
    })
}

/// Parse CSV bytes with auto-detection of encoding (and delimiter unless given).
///
/// Valid UTF-8 is taken as is; detection only runs on other bytes.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return parse_content(strip_bom(content), delimiter, "utf-8".to_string());
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_content(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection.
///
/// # Example
/// ```ignore
/// let result = parse_file("matrices.csv", None)?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.rows.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

/// Decode the `json` field of a row. Malformed JSON is fatal for the run.
pub fn decode_row(row: InputRow) -> Result<DecodedRow, RowError> {
    let elements: Value = serde_json::from_str(&row.json).map_err(|source| RowError::MalformedJson {
        line: row.line,
        id: row.id.clone(),
        source,
    })?;

    Ok(DecodedRow {
        line: row.line,
        id: row.id,
        elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_simple_csv() {
        let csv = "id,json\n1,\"[1,2,3,4]\"\n2,[5]";
        let result = parse_content(csv, None, "utf-8".into()).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.headers, vec!["id", "json"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].id, "1");
        assert_eq!(result.rows[0].json, "[1,2,3,4]");
        assert_eq!(result.rows[1].json, "[5]");
    }

    #[test]
    fn test_line_numbers() {
        let csv = "id,json\n1,[1]\n2,[2]";
        let result = parse_content(csv, None, "utf-8".into()).unwrap();

        assert_eq!(result.rows[0].line, 2);
        assert_eq!(result.rows[1].line, 3);
    }

    #[test]
    fn test_rows_missing_fields_skipped() {
        let csv = "id,json\n1,[1]\n,[2]\n3,\n4\n5,[5]";
        let result = parse_content(csv, None, "utf-8".into()).unwrap();

        let ids: Vec<&str> = result.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(result.rows_read, 5);
        assert_eq!(result.rows_skipped(), 3);
    }

    #[test]
    fn test_extra_columns_and_order() {
        let csv = "note,json,id\nx,\"[1,2]\",a\ny,[3],b";
        let result = parse_content(csv, None, "utf-8".into()).unwrap();

        assert_eq!(result.rows[0], InputRow::new(2, "a", "[1,2]"));
        assert_eq!(result.rows[1], InputRow::new(3, "b", "[3]"));
    }

    #[test]
    fn test_record_longer_than_header_rejected() {
        let csv = "id,json\n1,[1]\n2,[2],extra\n3,[3]";
        match parse_content(csv, None, "utf-8".into()) {
            Err(CsvError::Decode { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 2 columns, got 3"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.rows)),
        }
    }

    #[test]
    fn test_missing_header_skips_everything() {
        let csv = "id,data\n1,[1]";
        let result = parse_content(csv, None, "utf-8".into()).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.rows_skipped(), 1);
    }

    #[test]
    fn test_explicit_delimiter() {
        let csv = "id;json\n1;[1,2,3,4]";
        let result = parse_content(csv, Some(';'), "utf-8".into()).unwrap();
        assert_eq!(result.rows[0].json, "[1,2,3,4]");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("id,json\n1,\"[1;2]\""), ',');
        assert_eq!(detect_delimiter("id;json\n1;[1,2]"), ';');
        assert_eq!(detect_delimiter("id\tjson"), '\t');
        assert_eq!(detect_delimiter("id|json"), '|');
        assert_eq!(detect_delimiter("id"), ',');
        assert_eq!(detect_delimiter(""), ',');
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = "\u{feff}id,json\n1,[1]".as_bytes();
        let result = parse_bytes(bytes, None).unwrap();
        assert_eq!(result.headers[0], "id");
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");

        // 0xA4 is the currency sign in ISO-8859-1, not the euro
        assert_eq!(decode_content(&[0xA4], "iso-8859-1").unwrap(), "\u{a4}");
    }

    #[test]
    fn test_utf8_text_kept_verbatim() {
        let csv = "id,json\n1,\"[\"\"Müller\"\",\"\"€\"\",\"\"ä\"\",\"\"→\"\"]\"\n";
        let result = parse_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.rows[0].json, "[\"Müller\",\"€\",\"ä\",\"→\"]");

        for text in ["Société", "α", "ž", "İstanbul", "😀"] {
            let csv = format!("id,json\n1,\"[\"\"{}\"\",1,2,3]\"\n", text);
            let result = parse_bytes(csv.as_bytes(), None).unwrap();
            assert_eq!(result.rows[0].json, format!("[\"{}\",1,2,3]", text));
        }
    }

    #[test]
    fn test_non_utf8_bytes_detected() {
        let mut bytes = b"id,json\n1,\"[\"\"Soci".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"t");
        bytes.push(0xE9);
        bytes.extend_from_slice(b"\"\"]\"\n");

        let result = parse_bytes(&bytes, None).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert!(result.rows[0].json.starts_with("[\"Soci"));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        assert!(matches!(
            decode_content(b"id,json", "no-such-charset"),
            Err(CsvError::Encoding(_))
        ));
    }

    #[test]
    fn test_non_byte_delimiter_rejected() {
        let err = read_rows("id,json", '→').unwrap_err();
        assert!(err.to_string().contains("single-byte"));
    }

    #[test]
    fn test_decode_row() {
        let row = decode_row(InputRow::new(2, "a", "[1, \"b\", null]")).unwrap();
        assert_eq!(row.elements, json!([1, "b", null]));

        let err = decode_row(InputRow::new(9, "bad", "[1,")).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_validate_input_path() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("input.csv");
        std::fs::write(&csv_path, "id,json\n").unwrap();

        assert!(validate_input_path(Some(csv_path.as_path()), true).is_ok());
        assert!(matches!(
            validate_input_path(None, true),
            Err(InputError::MissingPath)
        ));
        assert!(matches!(
            validate_input_path(Some(dir.path().join("input.txt").as_path()), true),
            Err(InputError::InvalidExtension(_))
        ));
        assert!(matches!(
            validate_input_path(Some(dir.path().join("input.CSV").as_path()), true),
            Err(InputError::InvalidExtension(_))
        ));
        assert!(matches!(
            validate_input_path(Some(dir.path().join("absent.csv").as_path()), true),
            Err(InputError::NotFound(_))
        ));
    }

    #[test]
    fn test_extension_check_can_be_disabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "id,json\n").unwrap();
        assert!(validate_input_path(Some(path.as_path()), false).is_ok());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "id,json\n1,\"[1,2,3,4]\"\n").unwrap();

        let result = parse_file(&path, None).unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.rows.len(), 1);
    }
}
