//! Expression evaluation framework for the query core.
//!
//! This module provides:
//! - The typed expression tree (fields, literals, casts, comparisons,
//!   conjunctions, arithmetic, aggregations)
//! - Polymorphic evaluation against tuples and tuple-free constant folding
//! - Stateful aggregate accumulators driven by the aggregation operator
//!
//! Expressions exclusively own their children; the plan generator moves
//! them out of validated statements and into the operator tree.

pub mod aggregate;
pub mod error;
pub mod expr;
pub mod operator;

pub use aggregate::AggregationExpr;
pub use error::{ExpressionError, ExpressionResult};
pub use expr::{
    ArithmeticExpr, CastExpr, ComparisonExpr, ConjunctionExpr, DivisionByZeroPolicy, Expression,
    FieldExpr, ValueExpr,
};
pub use operator::{AggregateFunction, ArithmeticOp, CompOp, ConjunctionType};
