//! Transformation module.
//!
//! Moves an ACH file between its hierarchical and tabular forms:
//! - Addenda codec: one addenda variant to one wide row and back
//! - Flatten: file to [`TableSet`](crate::table::TableSet)
//! - Isolate: independent working copy of a file
//! - Reconstruct: edited tables back onto a copy of the original
//! - Session: original plus tables, rebuilt on demand
//! - Pipeline: JSON files and table directories

pub mod addenda_codec;
pub mod flatten;
pub mod isolate;
pub mod pipeline;
pub mod reconstruct;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;

pub use addenda_codec::{decode_iat, decode_standard, encode_iat, encode_standard, AddendaRecord};
pub use flatten::flatten;
pub use isolate::isolate;
pub use pipeline::*;
pub use reconstruct::reconstruct;
pub use session::EditSession;
