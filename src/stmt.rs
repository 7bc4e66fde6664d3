//! Validated statement objects.
//!
//! These are the planner's inputs: statement trees produced by the
//! (out-of-scope) analyzer with every table, column, and literal fully
//! resolved. The plan generator consumes them by value and moves their
//! expressions into the operator tree.

pub mod filter;
pub mod select;
pub mod statement;

pub use filter::{FilterStmt, FilterTarget, FilterUnit};
pub use select::{GroupByUnit, JoinStmt, OrderByUnit, SelectStmt};
pub use statement::{
    CalcStmt, CreateTableStmt, DeleteStmt, ExplainStmt, InsertStmt, Stmt, UpdateStmt,
};
