//! Frame registry integration and property tests.

#![allow(clippy::unwrap_used)]

use orrery_frames::{FrameRegistry, ReferenceFrame, RegistryError};
use proptest::prelude::*;

fn frame(name: &str, parent: Option<&str>) -> ReferenceFrame {
    ReferenceFrame::new(name, parent).unwrap()
}

#[test]
fn two_frame_tree_finalizes() {
    let mut registry = FrameRegistry::new();
    registry.register(frame("RootFrame", None)).unwrap();
    registry.register(frame("FrameA", Some("RootFrame"))).unwrap();

    registry.finalize().unwrap();
    assert_eq!(registry.resolve_root().unwrap().name(), "RootFrame");
    assert_eq!(registry.len(), 2);
}

#[test]
fn finalize_is_idempotent() {
    let mut registry = FrameRegistry::new();
    registry.register(frame("RootFrame", None)).unwrap();
    registry.register(frame("FrameA", Some("RootFrame"))).unwrap();

    registry.finalize().unwrap();
    registry.finalize().unwrap();
    assert!(registry.is_finalized());
}

#[test]
fn registering_reopens_a_finalized_registry() {
    let mut registry = FrameRegistry::new();
    registry.register(frame("RootFrame", None)).unwrap();
    registry.finalize().unwrap();
    assert!(registry.is_finalized());

    registry.register(frame("FrameA", Some("RootFrame"))).unwrap();
    assert!(!registry.is_finalized());
    registry.finalize().unwrap();
}

#[test]
fn dangling_parent_names_the_offender() {
    let mut registry = FrameRegistry::new();
    registry.register(frame("FrameA", Some("RootFrame"))).unwrap();
    registry.register(frame("FrameB", Some("FrameA"))).unwrap();

    let err = registry.finalize().unwrap_err();
    assert_eq!(
        err,
        RegistryError::DanglingParent {
            frame: "FrameA".to_owned(),
            parent: "RootFrame".to_owned(),
        }
    );
}

/// Build a registry from a parent-index table: frame 0 is the root and the
/// parent of frame `i` (for `i >= 1`) is a frame with a smaller index, so
/// registration in index order always respects parent-before-child.
fn tree_from_parents(parents: &[usize]) -> FrameRegistry {
    let mut registry = FrameRegistry::new();
    registry.register_resolved(frame("frame0", None)).unwrap();
    for (child, parent) in parents.iter().enumerate() {
        let name = format!("frame{}", child + 1);
        let parent = format!("frame{parent}");
        registry.register_resolved(frame(&name, Some(&parent))).unwrap();
    }
    registry
}

proptest! {
    /// For any parent-before-child registration order the registry
    /// finalizes, resolves a unique root, and every path terminates at the
    /// root within `len()` steps.
    #[test]
    fn parent_before_child_orders_always_finalize(raw in prop::collection::vec(any::<u64>(), 0..8)) {
        // Map arbitrary values into valid parent indices (< child index).
        let parents: Vec<usize> = raw
            .iter()
            .enumerate()
            .map(|(i, v)| usize::try_from(*v).unwrap_or(usize::MAX) % (i + 1))
            .collect();

        let mut registry = tree_from_parents(&parents);
        registry.finalize().unwrap();

        let root = registry.resolve_root().unwrap().name().to_owned();
        prop_assert_eq!(&root, "frame0");

        let names: Vec<String> = registry.iter().map(|f| f.name().to_owned()).collect();
        for name in &names {
            let path: Vec<_> = registry.path_to_root(name).unwrap().collect();
            prop_assert!(path.len() <= registry.len());
            prop_assert_eq!(path.first().copied(), Some(name.as_str()));
            prop_assert_eq!(path.last().copied(), Some("frame0"));
        }
    }

    /// Registering the same name twice always fails, whatever else is in
    /// the registry.
    #[test]
    fn duplicate_name_always_fails(extra in prop::collection::vec("[a-d]{1,4}", 0..5), dup in "[a-d]{1,4}") {
        let mut registry = FrameRegistry::new();
        registry.register(frame(&dup, None)).unwrap();
        for name in extra {
            // Other registrations may or may not collide; ignore those.
            let _ = registry.register(frame(&name, None));
        }
        let err = registry.register(frame(&dup, None)).unwrap_err();
        prop_assert_eq!(err, RegistryError::DuplicateName { name: dup });
    }
}
