//! Expression tree definitions and evaluation.

use crate::access::{AttrType, Tuple, TupleCellSpec, Value, EPSILON};
use crate::catalog::Field;
use crate::expression::aggregate::AggregationExpr;
use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::expression::operator::{ArithmeticOp, CompOp, ConjunctionType};
use std::cmp::Ordering;
use tracing::warn;

/// Expression tree node.
///
/// Every variant supports the same capability set: a static result type
/// (`value_type`), evaluation against a row (`get_value`), and tuple-free
/// constant folding (`try_get_value`). Children are exclusively owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference to a table column
    Field(FieldExpr),

    /// Literal constant value
    Value(ValueExpr),

    /// Kind conversion applied to a child expression
    Cast(CastExpr),

    /// Binary comparison producing a boolean
    Comparison(ComparisonExpr),

    /// AND/OR over an ordered child list, short-circuiting left to right
    Conjunction(ConjunctionExpr),

    /// Arithmetic with numeric promotion
    Arithmetic(ArithmeticExpr),

    /// Stateful aggregate; driven by the aggregation operator
    Aggregation(AggregationExpr),
}

impl Expression {
    /// Create a column reference expression.
    pub fn field(field: Field) -> Self {
        Expression::Field(FieldExpr::new(field))
    }

    /// Create a literal expression.
    pub fn value(value: Value) -> Self {
        Expression::Value(ValueExpr::new(value))
    }

    /// Create a cast expression.
    pub fn cast(child: Expression, target: AttrType) -> Self {
        Expression::Cast(CastExpr::new(child, target))
    }

    /// Create a comparison expression.
    pub fn comparison(op: CompOp, left: Expression, right: Expression) -> Self {
        Expression::Comparison(ComparisonExpr::new(op, left, right))
    }

    /// Create a conjunction over `children`.
    pub fn conjunction(conjunction_type: ConjunctionType, children: Vec<Expression>) -> Self {
        Expression::Conjunction(ConjunctionExpr::new(conjunction_type, children))
    }

    /// Create a binary arithmetic expression.
    pub fn arithmetic(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Expression::Arithmetic(ArithmeticExpr::new(op, left, right))
    }

    /// Create a unary negation.
    pub fn negative(operand: Expression) -> Self {
        Expression::Arithmetic(ArithmeticExpr::negative(operand))
    }

    /// Static result type of this expression.
    pub fn value_type(&self) -> AttrType {
        match self {
            Expression::Field(e) => e.value_type(),
            Expression::Value(e) => e.value_type(),
            Expression::Cast(e) => e.value_type(),
            Expression::Comparison(_) => AttrType::Bool,
            Expression::Conjunction(_) => AttrType::Bool,
            Expression::Arithmetic(e) => e.value_type(),
            Expression::Aggregation(e) => e.value_type(),
        }
    }

    /// Evaluate this expression against a row.
    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        match self {
            Expression::Field(e) => e.get_value(tuple),
            Expression::Value(e) => Ok(e.value().clone()),
            Expression::Cast(e) => e.get_value(tuple),
            Expression::Comparison(e) => e.get_value(tuple),
            Expression::Conjunction(e) => e.get_value(tuple),
            Expression::Arithmetic(e) => e.get_value(tuple),
            // Aggregates are not scalar expressions; their output comes
            // from the accumulator API.
            Expression::Aggregation(_) => Ok(Value::Undefined),
        }
    }

    /// Evaluate without a row. Fails with
    /// [`ExpressionError::RowDependent`] if any leaf needs one.
    pub fn try_get_value(&self) -> ExpressionResult<Value> {
        match self {
            Expression::Field(_) => Err(ExpressionError::RowDependent),
            Expression::Value(e) => Ok(e.value().clone()),
            Expression::Cast(e) => e.try_get_value(),
            Expression::Comparison(e) => e.try_get_value(),
            Expression::Conjunction(e) => e.try_get_value(),
            Expression::Arithmetic(e) => e.try_get_value(),
            Expression::Aggregation(_) => Ok(Value::Undefined),
        }
    }
}

/// Column reference in an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpr {
    field: Field,
}

impl FieldExpr {
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn value_type(&self) -> AttrType {
        self.field.attr_type()
    }

    /// Locator for this column's cell in a tuple.
    pub fn cell_spec(&self) -> TupleCellSpec {
        TupleCellSpec::new(self.field.table_name(), self.field.field_name())
    }

    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        Ok(tuple.find_cell(&self.cell_spec())?)
    }
}

/// Literal value in an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueExpr {
    value: Value,
}

impl ValueExpr {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> AttrType {
        self.value.attr_type()
    }
}

/// Kind conversion applied to a child expression.
///
/// The supported cast matrix is deliberately small: identity casts and
/// anything-with-a-boolean-reading to `Bool`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    child: Box<Expression>,
    target: AttrType,
}

impl CastExpr {
    pub fn new(child: Expression, target: AttrType) -> Self {
        Self {
            child: Box::new(child),
            target,
        }
    }

    pub fn value_type(&self) -> AttrType {
        self.target
    }

    fn cast(&self, value: Value) -> ExpressionResult<Value> {
        if value.attr_type() == self.target {
            return Ok(value);
        }
        match self.target {
            AttrType::Bool => match value.get_boolean() {
                Some(b) => Ok(Value::Bool(b)),
                None => Err(self.unsupported(value.attr_type())),
            },
            _ => Err(self.unsupported(value.attr_type())),
        }
    }

    fn unsupported(&self, from: AttrType) -> ExpressionError {
        warn!(?from, to = ?self.target, "unsupported cast");
        ExpressionError::UnsupportedCast {
            from,
            to: self.target,
        }
    }

    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        let value = self.child.get_value(tuple)?;
        self.cast(value)
    }

    pub fn try_get_value(&self) -> ExpressionResult<Value> {
        let value = self.child.try_get_value()?;
        self.cast(value)
    }
}

/// Binary comparison producing a boolean.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpr {
    op: CompOp,
    left: Box<Expression>,
    right: Box<Expression>,
}

impl ComparisonExpr {
    pub fn new(op: CompOp, left: Expression, right: Expression) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn op(&self) -> CompOp {
        self.op
    }

    /// Compare two already-evaluated operands.
    ///
    /// A NULL right operand is meaningful only under `IS`/`IS NOT`; every
    /// other operator yields false. Otherwise the operands are related
    /// through [`Value::compare`], and an incomparable pair (NULL on the
    /// left, cross-kind operands) also yields false.
    pub fn compare_value(&self, left: &Value, right: &Value) -> ExpressionResult<bool> {
        if right.is_null() {
            return Ok(match self.op {
                CompOp::Is => left.is_null(),
                CompOp::IsNot => !left.is_null(),
                _ => false,
            });
        }

        match self.op {
            CompOp::Is | CompOp::IsNot => {
                warn!(op = self.op.symbol(), "comparison operator requires a NULL right operand");
                Err(ExpressionError::UnsupportedComparison {
                    op: self.op,
                    left: left.attr_type(),
                    right: right.attr_type(),
                })
            }
            _ => Ok(match left.compare(right) {
                None => false,
                Some(ord) => match self.op {
                    CompOp::Eq => ord == Ordering::Equal,
                    CompOp::Le => ord != Ordering::Greater,
                    CompOp::Ne => ord != Ordering::Equal,
                    CompOp::Lt => ord == Ordering::Less,
                    CompOp::Ge => ord != Ordering::Less,
                    CompOp::Gt => ord == Ordering::Greater,
                    CompOp::Is | CompOp::IsNot => unreachable!("handled above"),
                },
            }),
        }
    }

    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        let left = self.left.get_value(tuple)?;
        let right = self.right.get_value(tuple)?;
        Ok(Value::Bool(self.compare_value(&left, &right)?))
    }

    /// Constant-fold: only a comparison between two literals folds.
    pub fn try_get_value(&self) -> ExpressionResult<Value> {
        if let (Expression::Value(left), Expression::Value(right)) =
            (self.left.as_ref(), self.right.as_ref())
        {
            let result = self.compare_value(left.value(), right.value())?;
            return Ok(Value::Bool(result));
        }
        Err(ExpressionError::RowDependent)
    }
}

/// AND/OR over an ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConjunctionExpr {
    conjunction_type: ConjunctionType,
    children: Vec<Expression>,
}

impl ConjunctionExpr {
    pub fn new(conjunction_type: ConjunctionType, children: Vec<Expression>) -> Self {
        Self {
            conjunction_type,
            children,
        }
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    /// Short-circuit evaluation, left to right. With no child forcing a
    /// stop (including the empty list), the result is the operator's
    /// identity: true for AND, false for OR.
    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        self.evaluate_with(|child| child.get_value(tuple))
    }

    pub fn try_get_value(&self) -> ExpressionResult<Value> {
        self.evaluate_with(|child| child.try_get_value())
    }

    fn evaluate_with<F>(&self, mut eval: F) -> ExpressionResult<Value>
    where
        F: FnMut(&Expression) -> ExpressionResult<Value>,
    {
        for child in &self.children {
            let value = eval(child)?;
            let truth = value
                .get_boolean()
                .ok_or(ExpressionError::NotBoolean(value.attr_type()))?;
            let stop = match self.conjunction_type {
                ConjunctionType::And => !truth,
                ConjunctionType::Or => truth,
            };
            if stop {
                return Ok(Value::Bool(truth));
            }
        }

        Ok(Value::Bool(self.conjunction_type == ConjunctionType::And))
    }
}

/// What a division yields when the divisor is zero (or within
/// [`EPSILON`] of zero for floats).
///
/// `SaturateToMax` mirrors engines without NULL-aware arithmetic;
/// `PropagateNull` gives the standard SQL answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionByZeroPolicy {
    #[default]
    SaturateToMax,
    PropagateNull,
}

/// Arithmetic with numeric promotion.
///
/// `right` is absent for unary negation. Two integer operands stay
/// integer except under division, which always produces a float.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpr {
    op: ArithmeticOp,
    left: Box<Expression>,
    right: Option<Box<Expression>>,
    div_policy: DivisionByZeroPolicy,
}

impl ArithmeticExpr {
    pub fn new(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Some(Box::new(right)),
            div_policy: DivisionByZeroPolicy::default(),
        }
    }

    pub fn negative(operand: Expression) -> Self {
        Self {
            op: ArithmeticOp::Negative,
            left: Box::new(operand),
            right: None,
            div_policy: DivisionByZeroPolicy::default(),
        }
    }

    pub fn with_division_policy(mut self, policy: DivisionByZeroPolicy) -> Self {
        self.div_policy = policy;
        self
    }

    pub fn op(&self) -> ArithmeticOp {
        self.op
    }

    pub fn value_type(&self) -> AttrType {
        match &self.right {
            None => self.left.value_type(),
            Some(right) => {
                if self.left.value_type() == AttrType::Int
                    && right.value_type() == AttrType::Int
                    && self.op != ArithmeticOp::Div
                {
                    AttrType::Int
                } else {
                    AttrType::Float
                }
            }
        }
    }

    fn calc(
        op: ArithmeticOp,
        target: AttrType,
        left: &Value,
        right: &Value,
        policy: DivisionByZeroPolicy,
    ) -> Value {
        match op {
            ArithmeticOp::Add => {
                if target == AttrType::Int {
                    Value::Int(left.get_int().wrapping_add(right.get_int()))
                } else {
                    Value::Float(left.get_float() + right.get_float())
                }
            }
            ArithmeticOp::Sub => {
                if target == AttrType::Int {
                    Value::Int(left.get_int().wrapping_sub(right.get_int()))
                } else {
                    Value::Float(left.get_float() - right.get_float())
                }
            }
            ArithmeticOp::Mul => {
                if target == AttrType::Int {
                    Value::Int(left.get_int().wrapping_mul(right.get_int()))
                } else {
                    Value::Float(left.get_float() * right.get_float())
                }
            }
            ArithmeticOp::Div => {
                if target == AttrType::Int {
                    if right.get_int() == 0 {
                        match policy {
                            DivisionByZeroPolicy::SaturateToMax => Value::Int(i32::MAX),
                            DivisionByZeroPolicy::PropagateNull => Value::Null,
                        }
                    } else {
                        Value::Int(left.get_int().wrapping_div(right.get_int()))
                    }
                } else if right.get_float().abs() < EPSILON {
                    match policy {
                        DivisionByZeroPolicy::SaturateToMax => Value::Float(f64::MAX),
                        DivisionByZeroPolicy::PropagateNull => Value::Null,
                    }
                } else {
                    Value::Float(left.get_float() / right.get_float())
                }
            }
            ArithmeticOp::Negative => {
                if target == AttrType::Int {
                    Value::Int(left.get_int().wrapping_neg())
                } else {
                    Value::Float(-left.get_float())
                }
            }
        }
    }

    fn calc_value(&self, left: &Value, right: &Value) -> Value {
        Self::calc(self.op, self.value_type(), left, right, self.div_policy)
    }

    pub fn get_value(&self, tuple: &dyn Tuple) -> ExpressionResult<Value> {
        let left = self.left.get_value(tuple)?;
        let right = match &self.right {
            Some(right) => right.get_value(tuple)?,
            None => Value::Undefined,
        };
        Ok(self.calc_value(&left, &right))
    }

    /// Constant-fold: succeeds iff every leaf folds.
    pub fn try_get_value(&self) -> ExpressionResult<Value> {
        let left = self.left.try_get_value()?;
        let right = match &self.right {
            Some(right) => right.try_get_value()?,
            None => Value::Undefined,
        };
        Ok(self.calc_value(&left, &right))
    }
}
