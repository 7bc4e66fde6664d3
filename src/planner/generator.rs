//! Logical plan generation from validated statements.

use crate::catalog::{Field, TableInfo};
use crate::expression::{AggregationExpr, ConjunctionType, Expression};
use crate::planner::error::{PlanError, PlanResult};
use crate::planner::logical::{LogicalOperator, LogicalOperatorKind};
use crate::stmt::{
    CalcStmt, DeleteStmt, ExplainStmt, FilterStmt, FilterTarget, InsertStmt, SelectStmt, Stmt,
    UpdateStmt,
};
use std::sync::Arc;
use tracing::warn;

/// Builds logical operator trees from validated statements.
#[derive(Debug, Default)]
pub struct LogicalPlanGenerator;

impl LogicalPlanGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the logical plan for `stmt`, consuming it.
    pub fn create(&self, stmt: Stmt) -> PlanResult<LogicalOperator> {
        match stmt {
            Stmt::Calc(calc) => Ok(Self::create_calc_plan(calc)),
            Stmt::Select(select) => self.create_select_plan(select),
            Stmt::Insert(insert) => Ok(Self::create_insert_plan(insert)),
            Stmt::Update(update) => Ok(Self::create_update_plan(update)),
            Stmt::Delete(delete) => Ok(Self::create_delete_plan(delete)),
            Stmt::Explain(explain) => self.create_explain_plan(explain),
            other => {
                warn!(kind = other.kind_name(), "statement kind has no logical plan");
                Err(PlanError::UnsupportedStatement(other.kind_name()))
            }
        }
    }

    fn create_calc_plan(stmt: CalcStmt) -> LogicalOperator {
        LogicalOperator::new(LogicalOperatorKind::Calc {
            expressions: stmt.expressions,
        })
    }

    /// SELECT composition: per-table scans joined left-deep, then the
    /// optional predicate/aggregation/order stages, then the projection.
    fn create_select_plan(&self, stmt: SelectStmt) -> PlanResult<LogicalOperator> {
        let SelectStmt {
            tables,
            query_exprs,
            joins,
            groups,
            orders,
            filter,
        } = stmt;
        let is_inner_join = !joins.is_empty();

        let mut query_fields: Vec<Field> = Vec::new();
        let mut aggregations: Vec<AggregationExpr> = Vec::new();
        let mut table_oper: Option<LogicalOperator> = None;

        for (index, table) in tables.iter().enumerate() {
            // Columns of this table referenced by the projection; the
            // scan reads only those.
            let mut fields: Vec<Field> = Vec::new();
            for expr in &query_exprs {
                match expr {
                    Expression::Field(field_expr) => {
                        if field_expr.field().table_name() == table.name {
                            fields.push(field_expr.field().clone());
                            query_fields.push(field_expr.field().clone());
                        }
                    }
                    Expression::Aggregation(aggr_expr) => {
                        if aggr_expr.field().table_name() == table.name {
                            fields.push(aggr_expr.field().clone());
                            aggregations.push(aggr_expr.clone());
                        }
                    }
                    _ => return Err(PlanError::UnsupportedProjection),
                }
            }

            let scan = LogicalOperator::new(LogicalOperatorKind::TableGet {
                table: Arc::clone(table),
                fields,
                readonly: true,
            });

            table_oper = Some(match table_oper.take() {
                None => scan,
                Some(left) => {
                    let mut join = LogicalOperator::new(LogicalOperatorKind::Join);
                    join.add_child(left);
                    join.add_child(scan);
                    // The ON condition sits directly above its join; a
                    // conditionless join stays bare.
                    let condition = if is_inner_join {
                        joins
                            .get(index - 1)
                            .and_then(|join_stmt| Self::create_filter_plan(&join_stmt.condition))
                    } else {
                        None
                    };
                    match condition {
                        Some(mut predicate) => {
                            predicate.add_child(join);
                            predicate
                        }
                        None => join,
                    }
                }
            });
        }

        // Every projected scalar column must be one of the grouping
        // columns.
        if !groups.is_empty() {
            for field in &query_fields {
                let contained = groups.iter().any(|group| {
                    group.field.table_name() == field.table_name()
                        && group.field.field_name() == field.field_name()
                });
                if !contained {
                    warn!(
                        table = field.table_name(),
                        column = field.field_name(),
                        "selected field must appear in GROUP BY"
                    );
                    return Err(PlanError::GroupBySelectInvalid {
                        table: field.table_name().to_string(),
                        column: field.field_name().to_string(),
                    });
                }
            }
        }

        let predicate_oper = Self::create_filter_plan(&filter);
        let aggr_oper = if aggregations.is_empty() {
            None
        } else {
            Some(LogicalOperator::new(LogicalOperatorKind::Aggregation {
                aggregations,
                query_fields,
                group_fields: groups.into_iter().map(|group| group.field).collect(),
            }))
        };
        let order_by_oper = if orders.is_empty() {
            None
        } else {
            Some(LogicalOperator::new(LogicalOperatorKind::Order { orders }))
        };

        // Chain the stages bottom-up, skipping the absent ones; the
        // projection always tops the plan.
        let mut root = table_oper;
        for stage in [predicate_oper, aggr_oper, order_by_oper] {
            if let Some(mut oper) = stage {
                if let Some(child) = root.take() {
                    oper.add_child(child);
                }
                root = Some(oper);
            }
        }
        let mut project_oper = LogicalOperator::new(LogicalOperatorKind::Project {
            expressions: query_exprs,
        });
        if let Some(child) = root.take() {
            project_oper.add_child(child);
        }
        Ok(project_oper)
    }

    /// Turn a filter into a predicate operator: each unit becomes a
    /// comparison, ANDed under a single conjunction. An empty filter
    /// produces no operator.
    fn create_filter_plan(filter: &FilterStmt) -> Option<LogicalOperator> {
        if filter.is_empty() {
            return None;
        }
        let comparisons: Vec<Expression> = filter
            .units
            .iter()
            .map(|unit| {
                Expression::comparison(
                    unit.comp,
                    Self::target_expr(&unit.left),
                    Self::target_expr(&unit.right),
                )
            })
            .collect();
        let expression = Expression::conjunction(ConjunctionType::And, comparisons);
        Some(LogicalOperator::new(LogicalOperatorKind::Predicate {
            expression,
        }))
    }

    fn target_expr(target: &FilterTarget) -> Expression {
        match target {
            FilterTarget::Attr(field) => Expression::field(field.clone()),
            FilterTarget::Value(value) => Expression::value(value.clone()),
        }
    }

    fn create_insert_plan(stmt: InsertStmt) -> LogicalOperator {
        LogicalOperator::new(LogicalOperatorKind::Insert {
            table: stmt.table,
            rows: stmt.rows,
        })
    }

    fn create_update_plan(stmt: UpdateStmt) -> LogicalOperator {
        let UpdateStmt {
            table,
            field_name,
            value,
            filter,
        } = stmt;
        let table_get_oper = Self::writable_scan(&table);
        let mut update_oper = LogicalOperator::new(LogicalOperatorKind::Update {
            table,
            field_name,
            value,
        });
        match Self::create_filter_plan(&filter) {
            Some(mut predicate_oper) => {
                predicate_oper.add_child(table_get_oper);
                update_oper.add_child(predicate_oper);
            }
            None => update_oper.add_child(table_get_oper),
        }
        update_oper
    }

    fn create_delete_plan(stmt: DeleteStmt) -> LogicalOperator {
        let DeleteStmt { table, filter } = stmt;
        let table_get_oper = Self::writable_scan(&table);
        let mut delete_oper = LogicalOperator::new(LogicalOperatorKind::Delete { table });
        match Self::create_filter_plan(&filter) {
            Some(mut predicate_oper) => {
                predicate_oper.add_child(table_get_oper);
                delete_oper.add_child(predicate_oper);
            }
            None => delete_oper.add_child(table_get_oper),
        }
        delete_oper
    }

    /// Writable scan over every user column of `table`, as needed by
    /// UPDATE and DELETE.
    fn writable_scan(table: &Arc<TableInfo>) -> LogicalOperator {
        let fields: Vec<Field> = table
            .user_columns()
            .map(|column| Field::new(Arc::clone(table), column.clone()))
            .collect();
        LogicalOperator::new(LogicalOperatorKind::TableGet {
            table: Arc::clone(table),
            fields,
            readonly: false,
        })
    }

    fn create_explain_plan(&self, stmt: ExplainStmt) -> PlanResult<LogicalOperator> {
        let child_oper = self.create(*stmt.child)?;
        let mut explain_oper = LogicalOperator::new(LogicalOperatorKind::Explain);
        explain_oper.add_child(child_oper);
        Ok(explain_oper)
    }
}
