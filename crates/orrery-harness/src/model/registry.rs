//! Reference model of the frame registry.

use crate::model::operation::{Operation, OperationError, OperationResult};

/// Obviously-correct registry model over a flat list of (name, parent)
/// pairs in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    frames: Vec<(String, Option<String>)>,
    finalized: bool,
}

impl ModelRegistry {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if no frames are registered.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True once finalize has succeeded and nothing was added since.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Apply an operation and report its outcome.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { name, parent } => self.register(name, parent.as_deref()),
            Operation::Finalize => self.finalize(),
            Operation::ResolveRoot => self.resolve_root(),
            Operation::PathToRoot { name } => self.path_to_root(name),
        }
    }

    fn parent_of(&self, name: &str) -> Option<Option<&str>> {
        self.frames
            .iter()
            .find(|(frame, _)| frame == name)
            .map(|(_, parent)| parent.as_deref())
    }

    fn register(&mut self, name: &str, parent: Option<&str>) -> OperationResult {
        if name.is_empty() {
            return OperationResult::Error(OperationError::EmptyName);
        }
        if self.parent_of(name).is_some() {
            return OperationResult::Error(OperationError::DuplicateName {
                name: name.to_owned(),
            });
        }
        // Empty parent strings mean parentless.
        let parent = parent.filter(|p| !p.is_empty()).map(str::to_owned);
        self.frames.push((name.to_owned(), parent));
        self.finalized = false;
        OperationResult::Ok
    }

    fn finalize(&mut self) -> OperationResult {
        for (name, parent) in &self.frames {
            if let Some(parent) = parent {
                if self.parent_of(parent).is_none() {
                    return OperationResult::Error(OperationError::DanglingParent {
                        frame: name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        if let OperationResult::Error(err) = self.resolve_root() {
            return OperationResult::Error(err);
        }

        // Any walk that takes more parent hops than there are frames loops.
        for (name, _) in &self.frames {
            let mut hops = self.frames.len();
            let mut current = name.as_str();
            while let Some(Some(parent)) = self.parent_of(current) {
                if hops == 0 {
                    return OperationResult::Error(OperationError::CyclicParent {
                        frame: name.clone(),
                    });
                }
                hops -= 1;
                current = parent;
            }
        }

        self.finalized = true;
        OperationResult::Ok
    }

    fn resolve_root(&self) -> OperationResult {
        let mut roots = self.frames.iter().filter(|(_, parent)| parent.is_none());
        let Some((first, _)) = roots.next() else {
            return OperationResult::Error(OperationError::NoRoot);
        };
        if let Some((second, _)) = roots.next() {
            return OperationResult::Error(OperationError::MultipleRoot {
                first: first.clone(),
                second: second.clone(),
            });
        }
        OperationResult::Root(first.clone())
    }

    fn path_to_root(&self, name: &str) -> OperationResult {
        if self.parent_of(name).is_none() {
            return OperationResult::Error(OperationError::UnknownFrame {
                name: name.to_owned(),
            });
        }

        // Bounded by the frame count; stops at the root or at the first
        // unregistered parent.
        let mut path = Vec::new();
        let mut remaining = self.frames.len();
        let mut current = Some(name.to_owned());
        while remaining > 0 {
            let Some(name) = current.take() else { break };
            let Some(parent) = self.parent_of(&name) else { break };
            current = parent.map(str::to_owned);
            path.push(name);
            remaining -= 1;
        }
        OperationResult::Path(path)
    }
}
