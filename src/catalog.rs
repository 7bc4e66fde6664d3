//! Table and column metadata consumed by the planner.
//!
//! The analyzer resolves names against a catalog and hands the planner
//! fully bound descriptors:
//!
//! - **TableInfo**: A table's name and column layout
//! - **ColumnInfo**: One column's name and value kind
//! - **Field**: A column bound to its table, as referenced by expressions
//!
//! Tables are shared behind `Arc`: statements and plan operators hold
//! references to the same metadata the analyzer resolved against.

pub mod column_info;
pub mod field;
pub mod table_info;

pub use column_info::ColumnInfo;
pub use field::Field;
pub use table_info::TableInfo;
