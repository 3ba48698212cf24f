//! Row-level helpers for writing and reading table cells by column name.
//!
//! [`RowBuilder`] fills one row of a schema during flattening.
//! [`ColumnMap`] resolves column positions once per table and [`RowReader`]
//! uses it to apply cells back onto model fields during reconstruction.

use std::collections::HashMap;
use std::str::FromStr;

use super::index::{AddendaIndex, BatchIndex, EntryIndex};
use super::schema::TableSchema;
use super::{TableData, TableKind};
use crate::error::{ReconstructError, ReconstructResult};

// =============================================================================
// Writing
// =============================================================================

/// One row of a schema, every cell initially empty.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    schema: &'static TableSchema,
    cells: Vec<String>,
}

impl RowBuilder {
    pub fn new(schema: &'static TableSchema) -> Self {
        Self {
            schema,
            cells: vec![String::new(); schema.len()],
        }
    }

    /// Set a cell verbatim.
    pub fn set(&mut self, column: &str, value: impl ToString) -> &mut Self {
        match self.schema.position(column) {
            Some(i) => self.cells[i] = value.to_string(),
            None => debug_assert!(false, "{} has no column {}", self.schema.kind, column),
        }
        self
    }

    /// Set a cell with surrounding padding removed.
    pub fn text(&mut self, column: &str, value: &str) -> &mut Self {
        self.set(column, value.trim())
    }

    pub fn finish(self) -> Vec<String> {
        self.cells
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Column name to position, resolved once per table.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    table: TableKind,
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn new(table: TableKind, data: &TableData) -> Self {
        let positions = data
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();
        Self { table, positions }
    }

    pub fn table(&self) -> TableKind {
        self.table
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Position of a row identity column; fatal when absent.
    pub fn require(&self, column: &'static str) -> ReconstructResult<usize> {
        self.position(column)
            .ok_or(ReconstructError::MissingIndexColumn {
                table: self.table,
                column,
            })
    }

    pub fn reader<'a>(&'a self, row: usize, record: &'a [String]) -> RowReader<'a> {
        RowReader {
            columns: self,
            row,
            record,
        }
    }
}

/// Read access to one row through a [`ColumnMap`].
///
/// Columns absent from the table leave their target untouched.
#[derive(Debug, Clone, Copy)]
pub struct RowReader<'a> {
    columns: &'a ColumnMap,
    row: usize,
    record: &'a [String],
}

impl<'a> RowReader<'a> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn table(&self) -> TableKind {
        self.columns.table
    }

    /// Raw cell, `None` when the column is absent or the row is short.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        let i = self.columns.position(column)?;
        self.record.get(i).map(String::as_str)
    }

    fn required(&self, column: &'static str) -> ReconstructResult<&'a str> {
        let i = self.columns.require(column)?;
        Ok(self.record.get(i).map(String::as_str).unwrap_or(""))
    }

    pub fn batch_index(&self) -> ReconstructResult<BatchIndex> {
        BatchIndex::parse(self.required(BatchIndex::COLUMN)?, self.table(), self.row)
    }

    pub fn entry_index(&self) -> ReconstructResult<EntryIndex> {
        EntryIndex::parse(self.required(EntryIndex::COLUMN)?, self.table(), self.row)
    }

    pub fn addenda_index(&self) -> ReconstructResult<AddendaIndex> {
        AddendaIndex::parse(self.required(AddendaIndex::COLUMN)?, self.table(), self.row)
    }

    /// Overwrite `target` with the cell when the column is present.
    pub fn apply_text(&self, column: &str, target: &mut String) {
        if let Some(value) = self.text(column) {
            *target = value.to_string();
        }
    }

    /// Parse the cell into `target` when the column is present.
    ///
    /// A cell that does not parse is a [`ReconstructError::InvalidValue`].
    pub fn apply_number<T: FromStr>(&self, column: &str, target: &mut T) -> ReconstructResult<()> {
        let Some(value) = self.text(column) else {
            return Ok(());
        };
        *target = value
            .trim()
            .parse()
            .map_err(|_| ReconstructError::InvalidValue {
                table: self.table(),
                row: self.row,
                column: column.to_string(),
                value: value.to_string(),
            })?;
        Ok(())
    }
}
