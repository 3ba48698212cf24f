//! Flat table representation of an ACH file.
//!
//! A [`TableSet`] holds seven named tables. Every table is a [`TableData`]:
//! ordered column names, ordered rows of text cells and one [`ColumnType`]
//! per column.
//!
//! ```text
//! file_header   1 row
//! batches       batch_index
//! entries       batch_index, entry_index
//! addenda       batch_index, entry_index, addenda_index
//! iat_batches   ┐
//! iat_entries   ├ present only when the file has IAT batches
//! iat_addenda   ┘
//! ```
//!
//! Only in-place cell edits are supported. Adding or removing rows does not
//! add or remove records when the tables are applied back onto a file.

pub mod index;
pub mod row;
pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{CsvError, CsvResult};

pub use index::{AddendaIndex, BatchIndex, EntryIndex};
pub use row::{ColumnMap, RowBuilder, RowReader};
pub use schema::{schema_for, ColumnDef, TableSchema, SCHEMA_VERSION};

// =============================================================================
// Column Types
// =============================================================================

/// Type tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Datetime,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Datetime => "datetime",
        }
    }

    /// Convert a cell to a typed JSON value.
    ///
    /// Empty cells become `null`. Integer and real cells that do not parse
    /// fall back to the trimmed string. Datetime cells stay strings.
    pub fn parse_value(&self, value: &str) -> Value {
        let value = value.trim();
        if value.is_empty() {
            return Value::Null;
        }
        match self {
            Self::Integer => value
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(value.to_string())),
            Self::Real => value
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(value.to_string())),
            Self::Datetime | Self::Text => Value::String(value.to_string()),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Table Kinds
// =============================================================================

/// The seven tables of a [`TableSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    FileHeader,
    Batches,
    Entries,
    Addenda,
    IatBatches,
    IatEntries,
    IatAddenda,
}

impl TableKind {
    pub const ALL: [TableKind; 7] = [
        Self::FileHeader,
        Self::Batches,
        Self::Entries,
        Self::Addenda,
        Self::IatBatches,
        Self::IatEntries,
        Self::IatAddenda,
    ];

    /// Table name, also used as the CSV file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileHeader => "file_header",
            Self::Batches => "batches",
            Self::Entries => "entries",
            Self::Addenda => "addenda",
            Self::IatBatches => "iat_batches",
            Self::IatEntries => "iat_entries",
            Self::IatAddenda => "iat_addenda",
        }
    }

    pub fn is_iat(&self) -> bool {
        matches!(self, Self::IatBatches | Self::IatEntries | Self::IatAddenda)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| format!("unknown table '{}'", s))
    }
}

// =============================================================================
// Table Data
// =============================================================================

/// One table: headers, rows of text cells and per-column types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
    pub column_types: Vec<ColumnType>,
}

impl TableData {
    pub fn new(headers: Vec<String>, column_types: Vec<ColumnType>) -> Self {
        Self {
            headers,
            records: Vec::new(),
            column_types,
        }
    }

    /// Empty table laid out after a schema.
    pub fn from_schema(schema: &TableSchema) -> Self {
        Self::new(schema.headers(), schema.column_types())
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_index(column)
            .and_then(|i| self.column_types.get(i).copied())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.records.get(row)?.get(col).map(String::as_str)
    }

    /// Typed value of a cell, see [`ColumnType::parse_value`].
    pub fn value(&self, row: usize, column: &str) -> Option<Value> {
        let cell = self.cell(row, column)?;
        let column_type = self.column_type(column).unwrap_or(ColumnType::Text);
        Some(column_type.parse_value(cell))
    }

    /// Overwrite a cell. Returns the previous value, or `None` if the row or
    /// column does not exist.
    pub fn set_cell(
        &mut self,
        row: usize,
        column: &str,
        value: impl Into<String>,
    ) -> Option<String> {
        let col = self.column_index(column)?;
        let cell = self.records.get_mut(row)?.get_mut(col)?;
        Some(std::mem::replace(cell, value.into()))
    }

    /// Check every row has one cell per header and one type per header.
    pub fn validate_shape(&self, table: &str) -> CsvResult<()> {
        let expected = self.headers.len();
        if self.column_types.len() != expected {
            return Err(CsvError::RaggedRow {
                table: format!("{} column types", table),
                row: 0,
                expected,
                found: self.column_types.len(),
            });
        }
        for (row, record) in self.records.iter().enumerate() {
            if record.len() != expected {
                return Err(CsvError::RaggedRow {
                    table: table.to_string(),
                    row,
                    expected,
                    found: record.len(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Table Set
// =============================================================================

/// The seven tables produced by flattening one ACH file.
///
/// The IAT tables are `None` when the file had no IAT batches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSet {
    pub file_header: TableData,
    pub batches: TableData,
    pub entries: TableData,
    pub addenda: TableData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat_batches: Option<TableData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat_entries: Option<TableData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat_addenda: Option<TableData>,
}

impl TableSet {
    pub fn get(&self, kind: TableKind) -> Option<&TableData> {
        match kind {
            TableKind::FileHeader => Some(&self.file_header),
            TableKind::Batches => Some(&self.batches),
            TableKind::Entries => Some(&self.entries),
            TableKind::Addenda => Some(&self.addenda),
            TableKind::IatBatches => self.iat_batches.as_ref(),
            TableKind::IatEntries => self.iat_entries.as_ref(),
            TableKind::IatAddenda => self.iat_addenda.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: TableKind) -> Option<&mut TableData> {
        match kind {
            TableKind::FileHeader => Some(&mut self.file_header),
            TableKind::Batches => Some(&mut self.batches),
            TableKind::Entries => Some(&mut self.entries),
            TableKind::Addenda => Some(&mut self.addenda),
            TableKind::IatBatches => self.iat_batches.as_mut(),
            TableKind::IatEntries => self.iat_entries.as_mut(),
            TableKind::IatAddenda => self.iat_addenda.as_mut(),
        }
    }

    /// Swap in an edited table, returning the one it replaces.
    ///
    /// Replacing an IAT table that is absent installs it.
    pub fn replace(&mut self, kind: TableKind, table: TableData) -> Option<TableData> {
        match kind {
            TableKind::FileHeader => Some(std::mem::replace(&mut self.file_header, table)),
            TableKind::Batches => Some(std::mem::replace(&mut self.batches, table)),
            TableKind::Entries => Some(std::mem::replace(&mut self.entries, table)),
            TableKind::Addenda => Some(std::mem::replace(&mut self.addenda, table)),
            TableKind::IatBatches => self.iat_batches.replace(table),
            TableKind::IatEntries => self.iat_entries.replace(table),
            TableKind::IatAddenda => self.iat_addenda.replace(table),
        }
    }

    pub fn has_iat(&self) -> bool {
        self.iat_batches.is_some() || self.iat_entries.is_some() || self.iat_addenda.is_some()
    }

    /// Present tables in canonical order.
    pub fn tables(&self) -> impl Iterator<Item = (TableKind, &TableData)> {
        TableKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|table| (kind, table)))
    }

    pub fn file_header(&self) -> &TableData {
        &self.file_header
    }

    pub fn batches(&self) -> &TableData {
        &self.batches
    }

    pub fn entries(&self) -> &TableData {
        &self.entries
    }

    pub fn addenda(&self) -> &TableData {
        &self.addenda
    }

    pub fn iat_batches(&self) -> Option<&TableData> {
        self.iat_batches.as_ref()
    }

    pub fn iat_entries(&self) -> Option<&TableData> {
        self.iat_entries.as_ref()
    }

    pub fn iat_addenda(&self) -> Option<&TableData> {
        self.iat_addenda.as_ref()
    }

    pub fn file_header_mut(&mut self) -> &mut TableData {
        &mut self.file_header
    }

    pub fn batches_mut(&mut self) -> &mut TableData {
        &mut self.batches
    }

    pub fn entries_mut(&mut self) -> &mut TableData {
        &mut self.entries
    }

    pub fn addenda_mut(&mut self) -> &mut TableData {
        &mut self.addenda
    }

    pub fn iat_batches_mut(&mut self) -> Option<&mut TableData> {
        self.iat_batches.as_mut()
    }

    pub fn iat_entries_mut(&mut self) -> Option<&mut TableData> {
        self.iat_entries.as_mut()
    }

    pub fn iat_addenda_mut(&mut self) -> Option<&mut TableData> {
        self.iat_addenda.as_mut()
    }
}
