//! Logical operator tree representation.
//!
//! Logical operators abstract away physical implementation details and
//! describe only the operations needed to produce the result. Each node
//! is a kind tag plus an ordered list of owned children; data flows
//! bottom-up from leaves (table scans) to the root.

use crate::access::Value;
use crate::catalog::{Field, TableInfo};
use crate::expression::{AggregationExpr, Expression};
use crate::stmt::OrderByUnit;
use std::sync::Arc;

/// Kind tag and payload of a logical operator.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOperatorKind {
    /// Leaf scan producing tuples from a table. `readonly` is false for
    /// scans feeding UPDATE/DELETE.
    TableGet {
        table: Arc<TableInfo>,
        fields: Vec<Field>,
        readonly: bool,
    },

    /// Filter tuples by a boolean expression.
    Predicate { expression: Expression },

    /// Combine two child streams. An inner join's condition lives in
    /// the `Predicate` directly above this node.
    Join,

    /// Fold grouped tuple streams through aggregate state machines.
    Aggregation {
        aggregations: Vec<AggregationExpr>,
        query_fields: Vec<Field>,
        group_fields: Vec<Field>,
    },

    /// Sort tuples.
    Order { orders: Vec<OrderByUnit> },

    /// Project output expressions.
    Project { expressions: Vec<Expression> },

    /// Evaluate table-free expressions.
    Calc { expressions: Vec<Expression> },

    /// Append rows to a table.
    Insert {
        table: Arc<TableInfo>,
        rows: Vec<Vec<Value>>,
    },

    /// Overwrite one column of the tuples produced by the child chain.
    Update {
        table: Arc<TableInfo>,
        field_name: String,
        value: Value,
    },

    /// Remove the tuples produced by the child chain.
    Delete { table: Arc<TableInfo> },

    /// Describe the child plan instead of executing it.
    Explain,
}

impl LogicalOperatorKind {
    fn name(&self) -> &'static str {
        match self {
            LogicalOperatorKind::TableGet { .. } => "TableGet",
            LogicalOperatorKind::Predicate { .. } => "Predicate",
            LogicalOperatorKind::Join => "Join",
            LogicalOperatorKind::Aggregation { .. } => "Aggregation",
            LogicalOperatorKind::Order { .. } => "Order",
            LogicalOperatorKind::Project { .. } => "Project",
            LogicalOperatorKind::Calc { .. } => "Calc",
            LogicalOperatorKind::Insert { .. } => "Insert",
            LogicalOperatorKind::Update { .. } => "Update",
            LogicalOperatorKind::Delete { .. } => "Delete",
            LogicalOperatorKind::Explain => "Explain",
        }
    }
}

/// Node in the logical plan.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOperator {
    kind: LogicalOperatorKind,
    children: Vec<LogicalOperator>,
}

impl LogicalOperator {
    pub fn new(kind: LogicalOperatorKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: LogicalOperator) {
        self.children.push(child);
    }

    pub fn kind(&self) -> &LogicalOperatorKind {
        &self.kind
    }

    pub fn children(&self) -> &[LogicalOperator] {
        &self.children
    }

    /// Render this subtree as an indented one-node-per-line summary,
    /// the form surfaced by EXPLAIN.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(self.kind.name());
        match &self.kind {
            LogicalOperatorKind::TableGet {
                table, readonly, ..
            } => {
                out.push_str(&format!(
                    ": {}{}",
                    table.name,
                    if *readonly { "" } else { " (for write)" }
                ));
            }
            LogicalOperatorKind::Aggregation { aggregations, .. } => {
                let names: Vec<String> = aggregations
                    .iter()
                    .map(|a| a.cell_spec(true).alias().to_string())
                    .collect();
                out.push_str(&format!(": {}", names.join(", ")));
            }
            LogicalOperatorKind::Order { orders } => {
                let keys: Vec<String> = orders
                    .iter()
                    .map(|o| {
                        format!(
                            "{}.{} {}",
                            o.field.table_name(),
                            o.field.field_name(),
                            if o.asc { "ASC" } else { "DESC" }
                        )
                    })
                    .collect();
                out.push_str(&format!(": {}", keys.join(", ")));
            }
            LogicalOperatorKind::Update {
                table, field_name, ..
            } => {
                out.push_str(&format!(": {}.{}", table.name, field_name));
            }
            LogicalOperatorKind::Insert { table, rows } => {
                out.push_str(&format!(": {} ({} rows)", table.name, rows.len()));
            }
            LogicalOperatorKind::Delete { table } => {
                out.push_str(&format!(": {}", table.name));
            }
            _ => {}
        }
        out.push('\n');
        for child in &self.children {
            child.describe_into(out, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AttrType;
    use crate::catalog::ColumnInfo;

    fn scan(name: &str) -> LogicalOperator {
        let table = Arc::new(TableInfo::new(
            name,
            vec![ColumnInfo::new("id", AttrType::Int)],
        ));
        LogicalOperator::new(LogicalOperatorKind::TableGet {
            table,
            fields: vec![],
            readonly: true,
        })
    }

    #[test]
    fn test_add_child_keeps_order() {
        let mut join = LogicalOperator::new(LogicalOperatorKind::Join);
        join.add_child(scan("a"));
        join.add_child(scan("b"));
        assert_eq!(join.children().len(), 2);
        assert!(matches!(
            join.children()[0].kind(),
            LogicalOperatorKind::TableGet { table, .. } if table.name == "a"
        ));
    }

    #[test]
    fn test_describe_renders_tree() {
        let mut join = LogicalOperator::new(LogicalOperatorKind::Join);
        join.add_child(scan("a"));
        join.add_child(scan("b"));
        let mut project = LogicalOperator::new(LogicalOperatorKind::Project {
            expressions: vec![],
        });
        project.add_child(join);

        let rendered = project.describe();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Project");
        assert_eq!(lines[1], "  Join");
        assert_eq!(lines[2], "    TableGet: a");
        assert_eq!(lines[3], "    TableGet: b");
    }
}
