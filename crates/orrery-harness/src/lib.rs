//! Model-based testing harness for the reference frame registry.
//!
//! Pairs an obviously-correct [`ModelRegistry`] with a [`RealRegistry`]
//! driver over the production registry. Randomly generated operation
//! sequences are applied to both; any divergence in results is a bug in one
//! of them.

pub mod driver;
pub mod model;

pub use driver::RealRegistry;
pub use model::{ModelRegistry, Operation, OperationError, OperationResult};
