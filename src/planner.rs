//! Logical query planning.
//!
//! The plan generator turns validated statements into a tree of logical
//! operators ready for a physical planner:
//!
//! - **LogicalOperator**: A kind-tagged node with ordered, owned children
//! - **LogicalPlanGenerator**: Dispatch over statement kinds and the
//!   SELECT composition rules (scan, join, predicate, aggregation,
//!   order, project)
//!
//! The generator transfers ownership of statement-attached expressions
//! into the resulting tree; operators never alias each other's children.

pub mod error;
pub mod generator;
pub mod logical;

pub use error::{PlanError, PlanResult};
pub use generator::LogicalPlanGenerator;
pub use logical::{LogicalOperator, LogicalOperatorKind};
