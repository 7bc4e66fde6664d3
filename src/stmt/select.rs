use crate::catalog::{Field, TableInfo};
use crate::expression::Expression;
use crate::stmt::filter::FilterStmt;
use std::sync::Arc;

/// An explicit INNER JOIN clause: the ON condition for joining the next
/// declared table onto the tables before it.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStmt {
    pub condition: FilterStmt,
}

impl JoinStmt {
    pub fn new(condition: FilterStmt) -> Self {
        Self { condition }
    }
}

/// One GROUP BY column.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByUnit {
    pub field: Field,
}

impl GroupByUnit {
    pub fn new(field: Field) -> Self {
        Self { field }
    }
}

/// One ORDER BY column with its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByUnit {
    pub field: Field,
    pub asc: bool,
}

impl OrderByUnit {
    pub fn asc(field: Field) -> Self {
        Self { field, asc: true }
    }

    pub fn desc(field: Field) -> Self {
        Self { field, asc: false }
    }
}

/// A validated SELECT.
///
/// `tables` keeps declaration order; with explicit joins,
/// `joins[i]` carries the condition between `tables[i]` and
/// `tables[i + 1]`. Projected expressions are fields or aggregations.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub tables: Vec<Arc<TableInfo>>,
    pub query_exprs: Vec<Expression>,
    pub joins: Vec<JoinStmt>,
    pub groups: Vec<GroupByUnit>,
    pub orders: Vec<OrderByUnit>,
    pub filter: FilterStmt,
}

impl SelectStmt {
    pub fn new(tables: Vec<Arc<TableInfo>>, query_exprs: Vec<Expression>) -> Self {
        Self {
            tables,
            query_exprs,
            joins: Vec::new(),
            groups: Vec::new(),
            orders: Vec::new(),
            filter: FilterStmt::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterStmt) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_joins(mut self, joins: Vec<JoinStmt>) -> Self {
        self.joins = joins;
        self
    }

    pub fn with_groups(mut self, groups: Vec<GroupByUnit>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_orders(mut self, orders: Vec<OrderByUnit>) -> Self {
        self.orders = orders;
        self
    }
}
