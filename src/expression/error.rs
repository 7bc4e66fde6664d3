//! Error types for expression evaluation.

use crate::access::{AttrType, TupleError};
use crate::expression::operator::{AggregateFunction, CompOp};
use thiserror::Error;

/// Errors that can occur during expression evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Cast between kinds outside the supported matrix.
    #[error("unsupported cast from {from:?} to {to:?}")]
    UnsupportedCast { from: AttrType, to: AttrType },

    /// Comparison operator applied to operands it cannot relate
    /// (e.g. `IS` against a non-null right operand).
    #[error("operator {} cannot compare {left:?} and {right:?}", .op.symbol())]
    UnsupportedComparison {
        op: CompOp,
        left: AttrType,
        right: AttrType,
    },

    /// A conjunction child produced a value with no boolean reading.
    #[error("conjunction operand is not a boolean: {0:?}")]
    NotBoolean(AttrType),

    /// Aggregate accumulator fed a kind it cannot fold.
    #[error("{func} cannot aggregate {operand:?} values")]
    NonNumericAggregate {
        func: AggregateFunction,
        operand: AttrType,
    },

    /// Constant folding requested on an expression that needs a row.
    #[error("expression depends on a row and cannot be constant-folded")]
    RowDependent,

    /// Propagated from the tuple interface (e.g. cell not found).
    #[error(transparent)]
    Tuple(#[from] TupleError),
}

/// Result type for expression operations.
pub type ExpressionResult<T> = Result<T, ExpressionError>;
