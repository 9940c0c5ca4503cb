//! Raw table reading for spreadsheet exports.
//!
//! Reads one uploaded file into an untyped table of string cells. Files
//! named `*.csv` are parsed as delimited text with an explicit ordered list
//! of decode attempts (UTF-8, then GBK); anything else is opened as a
//! workbook and the first sheet is used.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use encoding_rs::{Encoding, GBK, UTF_8};
use pricing_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Encodings attempted for delimited text, in order. The first clean decode
/// wins; if every attempt fails, the last failure is surfaced.
const TEXT_ENCODINGS: [&Encoding; 2] = [UTF_8, GBK];

/// Parsed but untyped input table: original column names plus string cells.
///
/// Transient from the pipeline's point of view (rows are re-read on every
/// run) but cached by content hash to avoid re-parsing unchanged bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from already-parsed parts.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Read a table from file bytes, dispatching on the file name extension.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        if is_delimited_text(file_name) {
            Self::from_csv_bytes(bytes)
        } else {
            Self::from_workbook_bytes(bytes)
        }
    }

    /// Read a table from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        Self::from_bytes(file_name, &bytes)
    }

    /// Parse delimited text, trying each configured encoding in order.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let text = decode_text(bytes)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::file_read(format!("invalid CSV header: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| Error::file_read(format!("invalid CSV record: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = columns.len(), rows = rows.len(), "parsed delimited text");
        Ok(Self::new(columns, rows))
    }

    /// Parse a spreadsheet workbook, reading the first sheet.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| Error::file_read(format!("unreadable workbook: {e}")))?;

        let sheet_names = workbook.sheet_names();
        let sheet = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| Error::file_read("workbook has no sheets"))?;
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| Error::file_read(format!("unreadable sheet {sheet:?}: {e}")))?;

        let mut sheet_rows = range.rows();
        let columns: Vec<String> = sheet_rows
            .next()
            .map(|cells| cells.iter().map(cell_to_string).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<String>> = sheet_rows
            .map(|cells| cells.iter().map(cell_to_string).collect())
            .collect();

        debug!(sheet = %sheet, columns = columns.len(), rows = rows.len(), "parsed workbook");
        Ok(Self::new(columns, rows))
    }

    /// Column names as they appeared in the input.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows (header excluded).
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Whether the file name denotes delimited text rather than a workbook.
fn is_delimited_text(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Decode text bytes, short-circuiting on the first clean decode.
fn decode_text(bytes: &[u8]) -> Result<String> {
    let mut last_err = Error::file_read("no decode attempt was made");
    for encoding in TEXT_ENCODINGS {
        match try_decode(bytes, encoding) {
            Ok(text) => {
                debug!(encoding = encoding.name(), "decoded input text");
                return Ok(text);
            }
            Err(err) => last_err = err,
        }
    }
    Err(last_err)
}

/// Attempt a single strict decode under one encoding.
fn try_decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(Error::file_read(format!(
            "input is not valid {}",
            encoding.name()
        )))
    } else {
        Ok(text.into_owned())
    }
}

/// Render a workbook cell as the string the cleaner will coerce.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
