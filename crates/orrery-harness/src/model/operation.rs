//! Operations for model-based registry testing.
//!
//! Operations represent all registry actions the driver can perform. They
//! are generated randomly by proptest and applied to both the model and the
//! real registry, whose results must match exactly.

use orrery_frames::RegistryError;

/// Registry operations under test.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Register a frame under the given name with an optional parent.
    Register {
        /// Frame name (may be empty to exercise the rejection path).
        name: String,
        /// Parent frame name; `None` or empty means parentless.
        parent: Option<String>,
    },

    /// Check the tree invariants over everything registered so far.
    Finalize,

    /// Resolve the unique parentless frame.
    ResolveRoot,

    /// Walk the parent chain from the named frame.
    PathToRoot {
        /// Starting frame name.
        name: String,
    },
}

/// Result of applying an operation, comparable between model and real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded with no interesting output.
    Ok,

    /// `ResolveRoot` succeeded with this root name.
    Root(String),

    /// `PathToRoot` yielded these names, starting frame first.
    Path(Vec<String>),

    /// Operation failed with an expected error.
    Error(OperationError),
}

impl OperationResult {
    /// Check if the operation succeeded.
    pub fn is_ok(&self) -> bool {
        !matches!(self, OperationResult::Error(_))
    }

    /// Check if the operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

/// Expected errors, mirroring the real registry's error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Frame name was empty.
    EmptyName,

    /// A frame with this name already exists.
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// A parent name never resolved.
    DanglingParent {
        /// Frame whose parent is missing.
        frame: String,
        /// The missing parent name.
        parent: String,
    },

    /// No parentless frame exists.
    NoRoot,

    /// More than one parentless frame exists.
    MultipleRoot {
        /// First parentless frame, in registration order.
        first: String,
        /// Second parentless frame.
        second: String,
    },

    /// The named frame is not registered.
    UnknownFrame {
        /// The unknown name.
        name: String,
    },

    /// A parent chain loops instead of reaching the root.
    CyclicParent {
        /// First frame, in registration order, whose chain loops.
        frame: String,
    },
}

impl From<RegistryError> for OperationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateName { name } => Self::DuplicateName { name },
            RegistryError::UnresolvedParent { frame, parent }
            | RegistryError::DanglingParent { frame, parent } => {
                Self::DanglingParent { frame, parent }
            },
            RegistryError::NoRoot => Self::NoRoot,
            RegistryError::MultipleRoot { first, second } => Self::MultipleRoot { first, second },
            RegistryError::UnknownFrame { name } => Self::UnknownFrame { name },
            RegistryError::CyclicParent { frame } => Self::CyclicParent { frame },
        }
    }
}
