//! End-to-end configuration scenarios for `FederateSession`.

#![allow(clippy::unwrap_used)]

use orrery_core::{BaseTimeUnit, FrameObject, RoleConfig, RoleFlags, TimeCoordinator};
use orrery_frames::ReferenceFrame;
use orrery_session::{FederateSession, SessionAction, SessionError, SessionState};
use proptest::prelude::*;

/// A root frame publisher managing the root frame and one owned child.
fn rrfp_session() -> FederateSession {
    let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
    session
        .set_roles(RoleConfig::new(RoleFlags::ROOT_FRAME_PUBLISHER, "Master", "Pacing"))
        .unwrap();
    session
        .set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
        .unwrap();
    session.register_frame(ReferenceFrame::new("RootFrame", None).unwrap()).unwrap();
    session.register_frame(ReferenceFrame::new("FrameA", Some("RootFrame")).unwrap()).unwrap();
    session
        .set_root_frame_object(FrameObject::new("RootFrame", "root_ref_frame.frame_packing", false))
        .unwrap();
    session
        .add_frame_object(FrameObject::new("FrameA", "ref_frame_A.frame_packing", true))
        .unwrap();
    session
}

#[test]
fn root_frame_publisher_publishes_root_and_owned_frames() {
    let mut session = rrfp_session();
    session.set_run_duration(Some(10.0)).unwrap();

    let actions = session.initialize().unwrap();

    assert_eq!(session.state(), SessionState::Initialized);
    assert_eq!(session.publishers(), vec!["RootFrame", "FrameA"]);

    // Root object first, then registration order.
    assert_eq!(
        actions[0],
        SessionAction::Publish {
            frame_name: "RootFrame".into(),
            packing_handle: "root_ref_frame.frame_packing".into(),
        }
    );
    assert_eq!(
        actions[1],
        SessionAction::Publish {
            frame_name: "FrameA".into(),
            packing_handle: "ref_frame_A.frame_packing".into(),
        }
    );
    assert!(actions.contains(&SessionAction::SetTerminateTime { seconds: 10.0 }));
}

#[test]
fn non_publisher_subscribes_to_the_root_frame() {
    let mut session = FederateSession::new("Other", "SpaceFOM_Roles_Test");
    session.set_roles(RoleConfig::new(RoleFlags::empty(), "Master", "Pacing")).unwrap();
    session
        .set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
        .unwrap();
    session.register_frame(ReferenceFrame::new("RootFrame", None).unwrap()).unwrap();
    session
        .set_root_frame_object(FrameObject::new("RootFrame", "root_ref_frame.frame_packing", false))
        .unwrap();

    let actions = session.initialize().unwrap();

    assert!(session.publishers().is_empty());
    assert_eq!(
        actions[0],
        SessionAction::Subscribe {
            frame_name: "RootFrame".into(),
            packing_handle: "root_ref_frame.frame_packing".into(),
        }
    );
}

#[test]
fn missing_parent_frame_fails_initialization() {
    let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
    session
        .set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
        .unwrap();
    // FrameA references a parent that was never registered.
    session.register_frame(ReferenceFrame::new("FrameA", Some("RootFrame")).unwrap()).unwrap();

    let err = session.initialize().unwrap_err();
    assert!(matches!(err, SessionError::Registry(_)));
    // Failure leaves the session mutable for correction.
    assert_eq!(session.state(), SessionState::Configuring);
    session.register_frame(ReferenceFrame::new("RootFrame", None).unwrap()).unwrap();
    session.initialize().unwrap();
}

#[test]
fn unbounded_run_emits_no_terminate_time() {
    let mut session = rrfp_session();
    // No run duration configured.
    let actions = session.initialize().unwrap();

    assert!(
        !actions.iter().any(|a| matches!(a, SessionAction::SetTerminateTime { .. })),
        "unbounded run must not schedule a terminate time"
    );

    // Without a configured end the session only terminates on request.
    session.start().unwrap();
    assert_eq!(session.state(), SessionState::Running);
    session.terminate("operator request").unwrap();
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn initialize_is_one_shot() {
    let mut session = rrfp_session();
    session.initialize().unwrap();
    assert!(matches!(session.initialize(), Err(SessionError::AlreadyInitialized)));
}

#[test]
fn invalid_initial_frame_state_fails_initialization() {
    use orrery_frames::{FrameState, QuaternionData};

    let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
    session
        .set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
        .unwrap();
    session.register_frame(ReferenceFrame::new("RootFrame", None).unwrap()).unwrap();

    // A non-unit attitude is accepted at construction but must not freeze.
    let bad_state = FrameState {
        attitude: QuaternionData { scalar: 0.5, vector: [0.0; 3] },
        ..FrameState::default()
    };
    session
        .register_frame(ReferenceFrame::with_state("FrameA", Some("RootFrame"), bad_state).unwrap())
        .unwrap();

    assert!(matches!(session.initialize(), Err(SessionError::State(_))));
    assert_eq!(session.state(), SessionState::Configuring);
}

#[test]
fn invalid_lookahead_aborts_before_freezing() {
    let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
    session
        .set_time(TimeCoordinator::new(-1.0, BaseTimeUnit::Microseconds, true, true))
        .unwrap();
    session.register_frame(ReferenceFrame::new("RootFrame", None).unwrap()).unwrap();

    assert!(matches!(session.initialize(), Err(SessionError::Time(_))));
    assert_eq!(session.state(), SessionState::Configuring);
}

#[test]
fn summary_reports_frozen_configuration() {
    let mut session = rrfp_session();
    session.set_run_duration(Some(10.0)).unwrap();
    session.initialize().unwrap();

    insta::assert_snapshot!(session.to_string(), @r"
    federate 'RRFP' in federation 'SpaceFOM_Roles_Test' [Initialized]
    roles: master=false pacing=false rrfp=true
    time: lookahead=0.25 s, units=microseconds, regulating=true, constrained=true
    run duration: 10 s
    frames: 2 (root 'RootFrame')
    ");
}

proptest! {
    /// Every accepted run duration must surface as a terminate-time request.
    #[test]
    fn accepted_run_duration_schedules_termination(seconds in 1e-6..1e9f64) {
        let mut session = rrfp_session();
        session.set_run_duration(Some(seconds)).unwrap();
        let actions = session.initialize().unwrap();
        let expected = SessionAction::SetTerminateTime { seconds };
        prop_assert!(actions.contains(&expected));
    }
}
