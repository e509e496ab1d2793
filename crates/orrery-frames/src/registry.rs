//! Reference frame registry.
//!
//! Owns the set of [`ReferenceFrame`] nodes for one federate and enforces
//! the tree invariants: unique names, exactly one root, and every parent
//! name resolving to a registered frame.
//!
//! ## Registration order
//!
//! Two contracts are offered:
//!
//! - [`FrameRegistry::register`] defers parent resolution, so frames may be
//!   added in any order; [`FrameRegistry::finalize`] then rejects any parent
//!   name that never resolved.
//! - [`FrameRegistry::register_resolved`] is the strict variant for callers
//!   building the tree top-down: the parent must already be registered.
//!
//! Because parents are referenced by name and the finalize pass walks every
//! parent chain, the tree property is a constructive guarantee: a finalized
//! registry cannot contain a cycle or a dangling parent.

use std::collections::HashMap;

use crate::frame::ReferenceFrame;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A frame with this name is already registered.
    #[error("duplicate reference frame name: {name}")]
    DuplicateName {
        /// The conflicting frame name.
        name: String,
    },

    /// Strict registration requires the parent to be registered first.
    #[error("parent frame '{parent}' of '{frame}' is not registered yet")]
    UnresolvedParent {
        /// The frame being registered.
        frame: String,
        /// Its unregistered parent.
        parent: String,
    },

    /// A parent name never resolved by the time the registry was finalized.
    #[error("parent frame '{parent}' of '{frame}' was never registered")]
    DanglingParent {
        /// The frame whose parent is missing.
        frame: String,
        /// The missing parent name.
        parent: String,
    },

    /// Every registered frame names a parent.
    #[error("no root reference frame is registered")]
    NoRoot,

    /// More than one frame has no parent.
    #[error("multiple root reference frames: '{first}' and '{second}'")]
    MultipleRoot {
        /// First parentless frame, in registration order.
        first: String,
        /// Second parentless frame.
        second: String,
    },

    /// The named frame is not registered.
    #[error("unknown reference frame: {name}")]
    UnknownFrame {
        /// The unknown frame name.
        name: String,
    },

    /// A parent chain loops instead of reaching the root.
    #[error("parent chain of '{frame}' never reaches the root")]
    CyclicParent {
        /// A frame on or below the looping chain.
        frame: String,
    },
}

/// Name-keyed registry of reference frames, preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct FrameRegistry {
    frames: HashMap<String, ReferenceFrame>,
    order: Vec<String>,
    finalized: bool,
}

impl FrameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered frames.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no frames are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True if a frame with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    /// True once [`Self::finalize`] has succeeded and no frame was added
    /// since.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Look up a frame by name.
    pub fn get(&self, name: &str) -> Option<&ReferenceFrame> {
        self.frames.get(name)
    }

    /// Look up a frame by name for mutation (state updates, publish flag).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ReferenceFrame> {
        self.frames.get_mut(name)
    }

    /// Iterate frames in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceFrame> {
        self.order.iter().filter_map(|name| self.frames.get(name))
    }

    /// Register a frame, deferring parent resolution to [`Self::finalize`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a frame with the same
    /// name is already registered.
    pub fn register(&mut self, frame: ReferenceFrame) -> Result<(), RegistryError> {
        if self.frames.contains_key(frame.name()) {
            return Err(RegistryError::DuplicateName { name: frame.name().to_owned() });
        }
        self.finalized = false;
        self.order.push(frame.name().to_owned());
        self.frames.insert(frame.name().to_owned(), frame);
        Ok(())
    }

    /// Register a frame whose parent must already be registered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnresolvedParent`] when the parent is not
    /// registered yet, or [`RegistryError::DuplicateName`] as for
    /// [`Self::register`].
    pub fn register_resolved(&mut self, frame: ReferenceFrame) -> Result<(), RegistryError> {
        if let Some(parent) = frame.parent() {
            if !self.frames.contains_key(parent) {
                return Err(RegistryError::UnresolvedParent {
                    frame: frame.name().to_owned(),
                    parent: parent.to_owned(),
                });
            }
        }
        self.register(frame)
    }

    /// Check the tree invariants over all registered frames.
    ///
    /// Scans in registration order: first for parent names that never
    /// resolved, then for the unique root, then that every parent chain
    /// reaches the root. Idempotent on success.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DanglingParent`], [`RegistryError::NoRoot`],
    /// [`RegistryError::MultipleRoot`], or [`RegistryError::CyclicParent`].
    pub fn finalize(&mut self) -> Result<(), RegistryError> {
        for name in &self.order {
            if let Some(frame) = self.frames.get(name) {
                if let Some(parent) = frame.parent() {
                    if !self.frames.contains_key(parent) {
                        return Err(RegistryError::DanglingParent {
                            frame: name.clone(),
                            parent: parent.to_owned(),
                        });
                    }
                }
            }
        }

        self.check_unique_root()?;

        // Parents all resolve and exactly one root exists, but deferred
        // registration can still express a cycle among non-root frames. A
        // chain of `len` frames makes at most `len - 1` parent hops, so any
        // walk that exceeds that is looping.
        for name in &self.order {
            let mut hops = self.order.len();
            let mut current = name.as_str();
            while let Some(parent) = self.frames.get(current).and_then(ReferenceFrame::parent) {
                if hops == 0 {
                    return Err(RegistryError::CyclicParent { frame: name.clone() });
                }
                hops -= 1;
                current = parent;
            }
        }

        self.finalized = true;
        Ok(())
    }

    /// Resolve the unique parentless frame.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoRoot`] or [`RegistryError::MultipleRoot`].
    pub fn resolve_root(&self) -> Result<&ReferenceFrame, RegistryError> {
        self.check_unique_root()?;
        self.iter().find(|frame| frame.is_root()).ok_or(RegistryError::NoRoot)
    }

    /// Lazy path from the named frame up to and including the root.
    ///
    /// The iterator is restartable (it is `Clone`) and yields at most
    /// [`Self::len`] names for any starting frame, even on a registry that
    /// has not been finalized.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFrame`] when `name` is not
    /// registered.
    pub fn path_to_root(&self, name: &str) -> Result<PathToRoot<'_>, RegistryError> {
        let (start, _) = self
            .frames
            .get_key_value(name)
            .ok_or_else(|| RegistryError::UnknownFrame { name: name.to_owned() })?;
        Ok(PathToRoot { frames: &self.frames, next: Some(start.as_str()), remaining: self.len() })
    }

    fn check_unique_root(&self) -> Result<(), RegistryError> {
        let mut roots = self.iter().filter(|frame| frame.is_root());
        let Some(first) = roots.next() else {
            return Err(RegistryError::NoRoot);
        };
        if let Some(second) = roots.next() {
            return Err(RegistryError::MultipleRoot {
                first: first.name().to_owned(),
                second: second.name().to_owned(),
            });
        }
        Ok(())
    }
}

/// Iterator over frame names from a starting frame up to the root.
///
/// Stops early if a parent name is not registered (possible only before a
/// successful [`FrameRegistry::finalize`]), and is bounded by the number of
/// registered frames so it terminates even on a cyclic parent chain.
#[derive(Debug, Clone)]
pub struct PathToRoot<'a> {
    frames: &'a HashMap<String, ReferenceFrame>,
    next: Option<&'a str>,
    remaining: usize,
}

impl<'a> Iterator for PathToRoot<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let name = self.next.take()?;
        let frame = self.frames.get(name)?;
        self.remaining -= 1;
        self.next = frame.parent();
        Some(frame.name())
    }
}
