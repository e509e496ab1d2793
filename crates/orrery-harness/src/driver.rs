//! Driver applying operations to the real frame registry.

use orrery_frames::{FrameRegistry, ReferenceFrame};

use crate::model::{Operation, OperationError, OperationResult};

/// Wraps the real [`FrameRegistry`] behind the same operation interface as
/// the model, mapping real errors onto the comparable taxonomy.
#[derive(Debug, Default)]
pub struct RealRegistry {
    inner: FrameRegistry,
}

impl RealRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the wrapped registry for invariant checks.
    pub fn inner(&self) -> &FrameRegistry {
        &self.inner
    }

    /// Apply an operation and report its outcome.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { name, parent } => {
                let frame = match ReferenceFrame::new(name.clone(), parent.as_deref()) {
                    Ok(frame) => frame,
                    Err(_) => return OperationResult::Error(OperationError::EmptyName),
                };
                match self.inner.register(frame) {
                    Ok(()) => OperationResult::Ok,
                    Err(err) => OperationResult::Error(err.into()),
                }
            },
            Operation::Finalize => match self.inner.finalize() {
                Ok(()) => OperationResult::Ok,
                Err(err) => OperationResult::Error(err.into()),
            },
            Operation::ResolveRoot => match self.inner.resolve_root() {
                Ok(root) => OperationResult::Root(root.name().to_owned()),
                Err(err) => OperationResult::Error(err.into()),
            },
            Operation::PathToRoot { name } => match self.inner.path_to_root(name) {
                Ok(path) => OperationResult::Path(path.map(str::to_owned).collect()),
                Err(err) => OperationResult::Error(err.into()),
            },
        }
    }
}
