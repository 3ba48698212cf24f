//! Table CSV reading and writing.
//!
//! A [`TableSet`] is stored as one `<table>.csv` per table in a directory.
//! Reading detects the text encoding, so tables re-saved by a spreadsheet in
//! Latin-1 or Windows-1252 load without mangled names.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CsvError, CsvResult};
use crate::table::{schema_for, TableData, TableKind, TableSet};

/// A table read from CSV, with what was detected along the way.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub table: TableData,
    pub encoding: String,
    pub delimiter: u8,
}

/// File name of a table inside a table directory.
pub fn table_file_name(kind: TableKind) -> String {
    format!("{}.csv", kind.name())
}

// =============================================================================
// Detection
// =============================================================================

/// Detect the encoding of raw bytes. Valid UTF-8 is taken as is; anything
/// else is left to chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Labels encoding_rs does not know fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };
    if text.contains('\u{0}') {
        return Err(CsvError::EncodingError(format!(
            "{} content contains NUL bytes",
            encoding
        )));
    }
    Ok(text)
}

/// Detect the delimiter by counting occurrences in the header line.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let mut best = b',';
    let mut best_count = 0;
    for sep in [b',', b';', b'\t', b'|'] {
        let count = first_line.bytes().filter(|&b| b == sep).count();
        if count > best_count {
            best_count = count;
            best = sep;
        }
    }
    best
}

// =============================================================================
// Reading
// =============================================================================

/// Parse one table from raw CSV bytes.
///
/// Column types come from the table's schema by column name; columns the
/// schema does not know are text. `None` for `delimiter` detects it.
pub fn parse_table_bytes(
    kind: TableKind,
    bytes: &[u8],
    delimiter: Option<u8>,
) -> CsvResult<ParsedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(CsvError::NoHeaders(table_file_name(kind)));
    }

    let schema = schema_for(kind);
    let column_types = headers.iter().map(|h| schema.type_of(h)).collect();
    let mut table = TableData::new(headers, column_types);

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != table.headers.len() {
            return Err(CsvError::RaggedRow {
                table: kind.name().to_string(),
                row,
                expected: table.headers.len(),
                found: record.len(),
            });
        }
        table.records.push(record.iter().map(str::to_string).collect());
    }

    Ok(ParsedTable {
        table,
        encoding,
        delimiter,
    })
}

pub fn read_table_file(
    kind: TableKind,
    path: &Path,
    delimiter: Option<u8>,
) -> CsvResult<ParsedTable> {
    let bytes = fs::read(path)?;
    parse_table_bytes(kind, &bytes, delimiter)
}

/// Read a table directory back into a [`TableSet`].
///
/// The four standard tables are required; each IAT table is read when its
/// file exists.
pub fn read_tables(dir: &Path, delimiter: Option<u8>) -> CsvResult<TableSet> {
    let mut tables = TableSet::default();
    for kind in TableKind::ALL {
        let path = dir.join(table_file_name(kind));
        if !path.is_file() {
            if kind.is_iat() {
                continue;
            }
            return Err(CsvError::MissingTable(path.display().to_string()));
        }
        let parsed = read_table_file(kind, &path, delimiter)?;
        tables.replace(kind, parsed.table);
    }
    Ok(tables)
}

// =============================================================================
// Writing
// =============================================================================

pub fn write_table<W: Write>(writer: W, table: &TableData, delimiter: u8) -> CsvResult<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    out.write_record(&table.headers)?;
    for record in &table.records {
        out.write_record(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Write every present table to `dir`, creating it if needed.
///
/// IAT table files left over from an earlier run are removed when the set
/// has no IAT tables, so reading the directory back yields the same set.
pub fn write_tables(dir: &Path, tables: &TableSet, delimiter: u8) -> CsvResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for kind in TableKind::ALL {
        let path = dir.join(table_file_name(kind));
        match tables.get(kind) {
            Some(table) => {
                table.validate_shape(kind.name())?;
                write_table(fs::File::create(&path)?, table, delimiter)?;
                written.push(path);
            }
            None if path.is_file() => fs::remove_file(&path)?,
            None => {}
        }
    }
    Ok(written)
}
