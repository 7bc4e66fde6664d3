use crate::access::Value;
use crate::catalog::{ColumnInfo, TableInfo};
use crate::expression::Expression;
use crate::stmt::filter::FilterStmt;
use crate::stmt::select::SelectStmt;
use std::sync::Arc;

/// Standalone expression evaluation: `SELECT 1 + 2` without a table.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcStmt {
    pub expressions: Vec<Expression>,
}

impl CalcStmt {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions }
    }
}

/// A validated INSERT: rows of raw values, already checked against the
/// table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub table: Arc<TableInfo>,
    pub rows: Vec<Vec<Value>>,
}

impl InsertStmt {
    pub fn new(table: Arc<TableInfo>, rows: Vec<Vec<Value>>) -> Self {
        Self { table, rows }
    }
}

/// A validated single-column UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub table: Arc<TableInfo>,
    pub field_name: String,
    pub value: Value,
    pub filter: FilterStmt,
}

impl UpdateStmt {
    pub fn new(
        table: Arc<TableInfo>,
        field_name: impl Into<String>,
        value: Value,
        filter: FilterStmt,
    ) -> Self {
        Self {
            table,
            field_name: field_name.into(),
            value,
            filter,
        }
    }
}

/// A validated DELETE.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub table: Arc<TableInfo>,
    pub filter: FilterStmt,
}

impl DeleteStmt {
    pub fn new(table: Arc<TableInfo>, filter: FilterStmt) -> Self {
        Self { table, filter }
    }
}

/// EXPLAIN wrapping any other statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainStmt {
    pub child: Box<Stmt>,
}

impl ExplainStmt {
    pub fn new(child: Stmt) -> Self {
        Self {
            child: Box::new(child),
        }
    }
}

/// CREATE TABLE. DDL is handled by the catalog layer, not the logical
/// planner.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

/// A validated statement, ready for planning.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Calc(CalcStmt),
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    Explain(ExplainStmt),
    CreateTable(CreateTableStmt),
}

impl Stmt {
    /// Statement kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Calc(_) => "CALC",
            Stmt::Select(_) => "SELECT",
            Stmt::Insert(_) => "INSERT",
            Stmt::Update(_) => "UPDATE",
            Stmt::Delete(_) => "DELETE",
            Stmt::Explain(_) => "EXPLAIN",
            Stmt::CreateTable(_) => "CREATE TABLE",
        }
    }
}
