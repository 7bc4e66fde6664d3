//! Stateful aggregate expressions.
//!
//! An [`AggregationExpr`] is both a node in the expression tree and a
//! per-group accumulator. The aggregation operator drives it through
//! `begin_aggr` / `aggr_tuple` / `get_result`; NULL operands never reach
//! the accumulators.

use crate::access::{AttrType, Tuple, TupleCellSpec, Value};
use crate::catalog::Field;
use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::expression::expr::FieldExpr;
use crate::expression::operator::AggregateFunction;
use std::cmp::Ordering;

/// Aggregate over one column of the input stream.
///
/// The accumulator starts `Undefined` and only becomes defined once a
/// non-null operand arrives; an all-null (or empty) group yields NULL
/// for every function except COUNT, which yields 0.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationExpr {
    func: AggregateFunction,
    field: Field,
    field_expr: FieldExpr,
    attr_type: AttrType,
    i_val: i64,
    f_val: f64,
    value: Value,
    has_record: bool,
}

impl AggregationExpr {
    pub fn new(field: Field, func: AggregateFunction) -> Self {
        let attr_type = match func {
            AggregateFunction::Max | AggregateFunction::Min | AggregateFunction::Sum => {
                field.attr_type()
            }
            AggregateFunction::Avg => AttrType::Float,
            AggregateFunction::Count => AttrType::Int,
        };
        let field_expr = FieldExpr::new(field.clone());
        Self {
            func,
            field,
            field_expr,
            attr_type,
            i_val: 0,
            f_val: 0.0,
            value: Value::Undefined,
            has_record: false,
        }
    }

    pub fn func(&self) -> AggregateFunction {
        self.func
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Static result type: MAX/MIN/SUM keep the field's type, AVG is
    /// float, COUNT is int.
    pub fn value_type(&self) -> AttrType {
        self.attr_type
    }

    /// Display spec for the result column, aliased `FUNC(col)` or
    /// `FUNC(table.col)`.
    pub fn cell_spec(&self, with_table_name: bool) -> TupleCellSpec {
        let alias = if with_table_name {
            format!(
                "{}({}.{})",
                self.func.name(),
                self.field.table_name(),
                self.field.field_name()
            )
        } else {
            format!("{}({})", self.func.name(), self.field.field_name())
        };
        TupleCellSpec::with_alias(self.field.table_name(), self.field.field_name(), alias)
    }

    /// Reset the accumulator for a new group.
    pub fn begin_aggr(&mut self) {
        self.i_val = 0;
        self.f_val = 0.0;
        self.value = Value::Undefined;
        self.has_record = false;
    }

    /// Fold one row into the accumulator. NULL operands are skipped and
    /// leave the state untouched.
    pub fn aggr_tuple(&mut self, tuple: &dyn Tuple) -> ExpressionResult<()> {
        let value = self.field_expr.get_value(tuple)?;
        if value.is_null() {
            return Ok(());
        }
        self.has_record = true;
        self.accumulate(value)
    }

    fn accumulate(&mut self, value: Value) -> ExpressionResult<()> {
        match self.func {
            AggregateFunction::Max => {
                if self.value == Value::Undefined
                    || self.value.compare(&value) == Some(Ordering::Less)
                {
                    self.value = value;
                }
            }
            AggregateFunction::Min => {
                if self.value == Value::Undefined
                    || self.value.compare(&value) == Some(Ordering::Greater)
                {
                    self.value = value;
                }
            }
            AggregateFunction::Sum => match self.attr_type {
                AttrType::Int => self.i_val += i64::from(value.get_int()),
                AttrType::Float => self.f_val += value.get_float(),
                _ => {
                    return Err(ExpressionError::NonNumericAggregate {
                        func: self.func,
                        operand: value.attr_type(),
                    })
                }
            },
            AggregateFunction::Avg => {
                match value {
                    Value::Int(i) => self.f_val += f64::from(i),
                    Value::Float(f) => self.f_val += f,
                    other => {
                        return Err(ExpressionError::NonNumericAggregate {
                            func: self.func,
                            operand: other.attr_type(),
                        })
                    }
                }
                self.i_val += 1;
            }
            AggregateFunction::Count => self.i_val += 1,
        }
        Ok(())
    }

    /// Emit the final value for the current group.
    pub fn get_result(&self) -> Value {
        if !self.has_record {
            // Nothing survived the null filter: COUNT is 0, the rest
            // are NULL.
            return match self.func {
                AggregateFunction::Count => Value::Int(self.i_val as i32),
                _ => Value::Null,
            };
        }

        match self.func {
            AggregateFunction::Max | AggregateFunction::Min => self.value.clone(),
            AggregateFunction::Count => Value::Int(self.i_val as i32),
            AggregateFunction::Sum => match self.attr_type {
                AttrType::Int => Value::Int(self.i_val as i32),
                _ => Value::Float(self.f_val),
            },
            AggregateFunction::Avg => {
                if self.i_val == 0 {
                    Value::Float(0.0)
                } else {
                    Value::Float(self.f_val / self.i_val as f64)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::RowTuple;
    use crate::catalog::{ColumnInfo, TableInfo};
    use std::sync::Arc;

    fn score_field(data_type: AttrType) -> Field {
        let table = Arc::new(TableInfo::new(
            "t",
            vec![ColumnInfo::new("score", data_type)],
        ));
        Field::new(Arc::clone(&table), table.columns[0].clone())
    }

    fn feed(expr: &mut AggregationExpr, values: Vec<Value>) {
        expr.begin_aggr();
        for value in values {
            let mut tuple = RowTuple::default();
            tuple.push(TupleCellSpec::new("t", "score"), value);
            expr.aggr_tuple(&tuple).unwrap();
        }
    }

    #[test]
    fn test_result_types() {
        let int_field = score_field(AttrType::Int);
        assert_eq!(
            AggregationExpr::new(int_field.clone(), AggregateFunction::Max).value_type(),
            AttrType::Int
        );
        assert_eq!(
            AggregationExpr::new(int_field.clone(), AggregateFunction::Sum).value_type(),
            AttrType::Int
        );
        assert_eq!(
            AggregationExpr::new(int_field.clone(), AggregateFunction::Avg).value_type(),
            AttrType::Float
        );
        assert_eq!(
            AggregationExpr::new(int_field, AggregateFunction::Count).value_type(),
            AttrType::Int
        );
    }

    #[test]
    fn test_max_min() {
        let mut max = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Max);
        feed(
            &mut max,
            vec![Value::Int(3), Value::Null, Value::Int(9), Value::Int(1)],
        );
        assert_eq!(max.get_result(), Value::Int(9));

        let mut min = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Min);
        feed(
            &mut min,
            vec![Value::Int(3), Value::Int(9), Value::Null, Value::Int(1)],
        );
        assert_eq!(min.get_result(), Value::Int(1));
    }

    #[test]
    fn test_max_ties_keep_earlier() {
        let mut max = AggregationExpr::new(score_field(AttrType::Chars), AggregateFunction::Max);
        feed(
            &mut max,
            vec![
                Value::Chars("b".to_string()),
                Value::Chars("b".to_string()),
            ],
        );
        assert_eq!(max.get_result(), Value::Chars("b".to_string()));
    }

    #[test]
    fn test_sum_int_and_float() {
        let mut sum = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Sum);
        feed(
            &mut sum,
            vec![Value::Int(10), Value::Int(20), Value::Null, Value::Int(30)],
        );
        assert_eq!(sum.get_result(), Value::Int(60));

        let mut sum = AggregationExpr::new(score_field(AttrType::Float), AggregateFunction::Sum);
        feed(&mut sum, vec![Value::Float(1.5), Value::Float(2.5)]);
        assert_eq!(sum.get_result(), Value::Float(4.0));
    }

    #[test]
    fn test_sum_rejects_non_numeric_field() {
        let mut sum = AggregationExpr::new(score_field(AttrType::Chars), AggregateFunction::Sum);
        sum.begin_aggr();
        let mut tuple = RowTuple::default();
        tuple.push(
            TupleCellSpec::new("t", "score"),
            Value::Chars("x".to_string()),
        );
        assert!(matches!(
            sum.aggr_tuple(&tuple),
            Err(ExpressionError::NonNumericAggregate { .. })
        ));
    }

    #[test]
    fn test_avg_skips_nulls() {
        let mut avg = AggregationExpr::new(score_field(AttrType::Float), AggregateFunction::Avg);
        feed(
            &mut avg,
            vec![Value::Float(10.0), Value::Null, Value::Float(20.0)],
        );
        assert_eq!(avg.get_result(), Value::Float(15.0));
    }

    #[test]
    fn test_avg_int_operands() {
        let mut avg = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Avg);
        feed(&mut avg, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(avg.get_result(), Value::Float(1.5));
    }

    #[test]
    fn test_count_skips_nulls() {
        let mut count = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Count);
        feed(
            &mut count,
            vec![Value::Int(1), Value::Null, Value::Int(3), Value::Null],
        );
        assert_eq!(count.get_result(), Value::Int(2));
    }

    #[test]
    fn test_empty_group() {
        for (func, expected) in [
            (AggregateFunction::Count, Value::Int(0)),
            (AggregateFunction::Max, Value::Null),
            (AggregateFunction::Min, Value::Null),
            (AggregateFunction::Sum, Value::Null),
            (AggregateFunction::Avg, Value::Null),
        ] {
            let mut expr = AggregationExpr::new(score_field(AttrType::Int), func);
            feed(&mut expr, vec![]);
            assert_eq!(expr.get_result(), expected, "{:?}", func);
        }
    }

    #[test]
    fn test_all_null_group_matches_empty() {
        for (func, expected) in [
            (AggregateFunction::Count, Value::Int(0)),
            (AggregateFunction::Sum, Value::Null),
        ] {
            let mut expr = AggregationExpr::new(score_field(AttrType::Int), func);
            feed(&mut expr, vec![Value::Null, Value::Null]);
            assert_eq!(expr.get_result(), expected, "{:?}", func);
        }
    }

    #[test]
    fn test_begin_aggr_resets_between_groups() {
        let mut sum = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Sum);
        feed(&mut sum, vec![Value::Int(5), Value::Int(5)]);
        assert_eq!(sum.get_result(), Value::Int(10));

        feed(&mut sum, vec![Value::Int(1)]);
        assert_eq!(sum.get_result(), Value::Int(1));
    }

    #[test]
    fn test_cell_spec_alias() {
        let expr = AggregationExpr::new(score_field(AttrType::Int), AggregateFunction::Avg);
        assert_eq!(expr.cell_spec(false).alias(), "AVG(score)");
        assert_eq!(expr.cell_spec(true).alias(), "AVG(t.score)");
    }
}
