//! Reference model for model-based testing.
//!
//! The model is a simplified registry that captures the tree invariants
//! without the real registry's map-plus-order bookkeeping. It serves as the
//! oracle against which the real implementation is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Behavior not mechanism: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod registry;

pub use operation::{Operation, OperationError, OperationResult};
pub use registry::ModelRegistry;
