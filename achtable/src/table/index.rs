//! Positional row identity handles.
//!
//! `batch_index`, `entry_index` and `addenda_index` are zero-based positions
//! assigned at flatten time. They are kept as distinct types so a batch
//! position can never be used to look up an entry.

use std::fmt;

use super::schema::col;
use super::TableKind;
use crate::error::{ReconstructError, ReconstructResult};

macro_rules! index_handle {
    ($(#[$meta:meta])* $name:ident, $column:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Column holding this index.
            pub const COLUMN: &'static str = $column;

            pub fn new(position: usize) -> Self {
                Self(position)
            }

            pub fn get(self) -> usize {
                self.0
            }

            /// Parse a cell. Anything but a non-negative integer is a
            /// [`ReconstructError::MalformedIndex`].
            pub fn parse(cell: &str, table: TableKind, row: usize) -> ReconstructResult<Self> {
                cell.trim()
                    .parse::<usize>()
                    .map(Self)
                    .map_err(|_| ReconstructError::MalformedIndex {
                        table,
                        row,
                        column: Self::COLUMN,
                        value: cell.to_string(),
                    })
            }

            /// Resolve into `items`, failing with
            /// [`ReconstructError::IndexOutOfRange`].
            pub fn resolve<'a, T>(
                self,
                items: &'a mut [T],
                table: TableKind,
                row: usize,
            ) -> ReconstructResult<&'a mut T> {
                let len = items.len();
                items
                    .get_mut(self.0)
                    .ok_or_else(|| ReconstructError::IndexOutOfRange {
                        table,
                        row,
                        column: Self::COLUMN,
                        index: self.0,
                        len,
                    })
            }

            /// Resolve into `items`, `None` when out of range.
            pub fn lookup<'a, T>(self, items: &'a mut [T]) -> Option<&'a mut T> {
                items.get_mut(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_handle!(
    /// Position of a batch within its family (standard or IAT).
    BatchIndex,
    col::BATCH_INDEX
);

index_handle!(
    /// Position of an entry within its batch.
    EntryIndex,
    col::ENTRY_INDEX
);

index_handle!(
    /// Running position of an addenda record among all addenda of one entry.
    AddendaIndex,
    col::ADDENDA_INDEX
);
