//! Access layer for the query core.
//!
//! This module provides the value and row abstractions the expression
//! subsystem evaluates against:
//!
//! - **Value**: Type-safe representation of column values
//! - **AttrType**: Supported value kinds, including SQL NULL
//! - **Tuple**: Read-only row interface addressable by (table, column)
//! - **TupleCellSpec**: Locator for a column within a tuple
//!
//! Tuples are produced by the executor; the core only consumes the
//! `Tuple` trait. `RowTuple` is a plain in-memory implementation used at
//! the executor boundary and in tests.

pub mod tuple;
pub mod value;

pub use tuple::{RowTuple, Tuple, TupleCellSpec, TupleError, TupleResult};
pub use value::{AttrType, Value, EPSILON};
