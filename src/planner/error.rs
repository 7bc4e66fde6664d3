//! Error types for logical planning.

use thiserror::Error;

/// Errors that can occur while building a logical plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Statement kind the logical planner does not handle.
    #[error("no logical plan for {0} statements")]
    UnsupportedStatement(&'static str),

    /// A projected scalar column is missing from the GROUP BY list.
    #[error("selected field {table}.{column} must appear in GROUP BY")]
    GroupBySelectInvalid { table: String, column: String },

    /// SELECT projections must be plain fields or aggregations.
    #[error("cannot project this expression shape")]
    UnsupportedProjection,
}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
