//! Readers for the plain text rate tables.

mod tables;

pub use tables::{TableIO, read_column, read_constants, read_rows};
