//! Federate session state machine.
//!
//! `FederateSession` composes the role configuration, time-management
//! policy, and frame registry into one federate configuration and walks the
//! lifecycle:
//!
//! ```text
//! Unconfigured -> Configuring -> Initialized -> Running -> Terminated
//! ```
//!
//! Mutation is only legal while `Unconfigured`/`Configuring`. A successful
//! `initialize()` validates the whole configuration, resolves discovery
//! directions, freezes the session, and returns actions for the external
//! executive and transport collaborators to execute. The session itself
//! performs no I/O and opens no connection.
//!
//! After `Initialized` the configuration is immutable; the external runtime
//! may read it freely. `Running` and `Terminated` are driven entirely from
//! outside: with no run duration configured the session never terminates on
//! its own.

use std::fmt;

use orrery_core::{
    BindingDirection, FrameObject, RoleConfig, TimeCoordinator, resolve_bindings,
};
use orrery_frames::{FrameRegistry, ReferenceFrame, RegistryError};

use crate::{actions::SessionAction, error::SessionError};

/// Lifecycle state of a federate session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fresh session, nothing configured yet.
    Unconfigured,
    /// At least one configuration mutation has been applied.
    Configuring,
    /// Configuration validated and frozen.
    Initialized,
    /// The external executive is stepping the simulation.
    Running,
    /// The run ended (run duration reached or external termination).
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unconfigured => "Unconfigured",
            Self::Configuring => "Configuring",
            Self::Initialized => "Initialized",
            Self::Running => "Running",
            Self::Terminated => "Terminated",
        };
        f.write_str(name)
    }
}

/// One federate's complete run configuration.
pub struct FederateSession {
    federate_name: String,
    federation_name: String,
    roles: RoleConfig,
    time: TimeCoordinator,
    registry: FrameRegistry,
    root_object: Option<FrameObject>,
    objects: Vec<FrameObject>,
    run_duration: Option<f64>,
    state: SessionState,
}

impl FederateSession {
    /// Create an unconfigured session for the named federate and federation
    /// execution.
    pub fn new(federate_name: impl Into<String>, federation_name: impl Into<String>) -> Self {
        Self {
            federate_name: federate_name.into(),
            federation_name: federation_name.into(),
            roles: RoleConfig::default(),
            time: TimeCoordinator::default(),
            registry: FrameRegistry::new(),
            root_object: None,
            objects: Vec::new(),
            run_duration: None,
            state: SessionState::Unconfigured,
        }
    }

    /// Enter `Configuring` on the first mutation; reject mutation once the
    /// configuration is frozen.
    fn touch(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Unconfigured => {
                self.state = SessionState::Configuring;
                Ok(())
            },
            SessionState::Configuring => Ok(()),
            SessionState::Initialized | SessionState::Running | SessionState::Terminated => {
                Err(SessionError::AlreadyInitialized)
            },
        }
    }

    /// Set the role configuration.
    pub fn set_roles(&mut self, roles: RoleConfig) -> Result<(), SessionError> {
        self.touch()?;
        self.roles = roles;
        Ok(())
    }

    /// Set the time-management configuration.
    pub fn set_time(&mut self, time: TimeCoordinator) -> Result<(), SessionError> {
        self.touch()?;
        self.time = time;
        Ok(())
    }

    /// Register a reference frame. Parent resolution is deferred to
    /// `initialize()`, so registration order does not matter.
    pub fn register_frame(&mut self, frame: ReferenceFrame) -> Result<(), SessionError> {
        self.touch()?;
        self.registry.register(frame)?;
        Ok(())
    }

    /// Set the managed object for the root reference frame.
    ///
    /// Its discovery direction is gated solely by the Root Reference Frame
    /// Publisher role; the object's ownership flag is ignored.
    pub fn set_root_frame_object(&mut self, object: FrameObject) -> Result<(), SessionError> {
        self.touch()?;
        self.check_duplicate_object(&object)?;
        self.root_object = Some(object);
        Ok(())
    }

    /// Add a managed frame object.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DuplicateObject`] when an object with the
    /// same frame name or packing handle was already added.
    pub fn add_frame_object(&mut self, object: FrameObject) -> Result<(), SessionError> {
        self.touch()?;
        self.check_duplicate_object(&object)?;
        self.objects.push(object);
        Ok(())
    }

    /// Set or clear the run duration in seconds.
    ///
    /// `None` means the run has no configured end: the session then never
    /// terminates on its own and only an external request ends it.
    pub fn set_run_duration(&mut self, seconds: Option<f64>) -> Result<(), SessionError> {
        self.touch()?;
        if let Some(value) = seconds {
            if !(value.is_finite() && value > 0.0) {
                return Err(SessionError::InvalidRunDuration { seconds: value });
            }
        }
        self.run_duration = seconds;
        Ok(())
    }

    fn check_duplicate_object(&self, candidate: &FrameObject) -> Result<(), SessionError> {
        let conflicts = |existing: &FrameObject| {
            existing.frame_name == candidate.frame_name
                || existing.packing_handle == candidate.packing_handle
        };
        if self.root_object.as_ref().is_some_and(conflicts)
            || self.objects.iter().any(conflicts)
        {
            return Err(SessionError::DuplicateObject { name: candidate.frame_name.clone() });
        }
        Ok(())
    }

    /// Validate the configuration, freeze it, and produce the actions for
    /// the external collaborators.
    ///
    /// Validation order: frame tree invariants, initial frame states, root
    /// frame resolution, managed-object frame references, time management.
    /// Any failure aborts
    /// before actions are produced, so no partial federation join can
    /// occur. Calling `initialize()` on an initialized session fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyInitialized`],
    /// [`SessionError::MissingRootFrame`] (no resolvable root),
    /// [`SessionError::RootFrameMismatch`], or any propagated registry or
    /// time-management error.
    pub fn initialize(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        match self.state {
            SessionState::Unconfigured | SessionState::Configuring => {},
            SessionState::Initialized | SessionState::Running | SessionState::Terminated => {
                return Err(SessionError::AlreadyInitialized);
            },
        }

        self.registry.finalize().map_err(|err| match err {
            RegistryError::NoRoot => SessionError::MissingRootFrame,
            other => SessionError::from(other),
        })?;

        // Frames constructed with an explicit initial state are not
        // validated at construction time; a bad state must not freeze.
        for frame in self.registry.iter() {
            frame.state().validate()?;
        }

        let root_name = self.registry.resolve_root()?.name().to_owned();

        if let Some(root_object) = &self.root_object {
            if root_object.frame_name != root_name {
                return Err(SessionError::RootFrameMismatch {
                    configured: root_object.frame_name.clone(),
                    resolved: root_name,
                });
            }
        }

        // Root object first, then the rest in the order they were added.
        let objects: Vec<FrameObject> =
            self.root_object.iter().chain(self.objects.iter()).cloned().collect();
        let bindings = resolve_bindings(&self.roles, &self.registry, &root_name, &objects)?;

        self.time.validate()?;

        let mut publish_count = 0usize;
        let mut actions = Vec::with_capacity(bindings.len() + 2);
        for binding in bindings {
            let publish = binding.direction == BindingDirection::Publish;
            if let Some(frame) = self.registry.get_mut(&binding.frame_name) {
                frame.set_publisher(publish);
            }
            tracing::debug!(
                frame = %binding.frame_name,
                handle = %binding.packing_handle,
                direction = if publish { "publish" } else { "subscribe" },
                "resolved frame binding"
            );
            let action = if publish {
                publish_count += 1;
                SessionAction::Publish {
                    frame_name: binding.frame_name,
                    packing_handle: binding.packing_handle,
                }
            } else {
                SessionAction::Subscribe {
                    frame_name: binding.frame_name,
                    packing_handle: binding.packing_handle,
                }
            };
            actions.push(action);
        }

        if let Some(seconds) = self.run_duration {
            actions.push(SessionAction::SetTerminateTime { seconds });
        }

        let subscribe_count = objects.len() - publish_count;
        actions.push(SessionAction::Log {
            message: format!(
                "federate '{}' configured for federation '{}': {publish_count} publish, \
                 {subscribe_count} subscribe",
                self.federate_name, self.federation_name
            ),
        });

        self.state = SessionState::Initialized;
        tracing::info!(
            federate = %self.federate_name,
            federation = %self.federation_name,
            frames = self.registry.len(),
            publish = publish_count,
            subscribe = subscribe_count,
            "federate configuration frozen"
        );

        Ok(actions)
    }

    /// Hand-off point for the external executive: `Initialized -> Running`.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Initialized {
            return Err(SessionError::InvalidState {
                expected: "Initialized",
                actual: self.state,
            });
        }
        self.state = SessionState::Running;
        tracing::info!(federate = %self.federate_name, "run started");
        Ok(())
    }

    /// External termination: legal from `Running` (duration reached or
    /// terminate request) and from `Initialized` (abort before start).
    pub fn terminate(&mut self, reason: &str) -> Result<(), SessionError> {
        match self.state {
            SessionState::Initialized | SessionState::Running => {
                self.state = SessionState::Terminated;
                tracing::info!(federate = %self.federate_name, reason, "run terminated");
                Ok(())
            },
            _ => Err(SessionError::InvalidState {
                expected: "Initialized or Running",
                actual: self.state,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Federate name.
    pub fn federate_name(&self) -> &str {
        &self.federate_name
    }

    /// Federation execution name.
    pub fn federation_name(&self) -> &str {
        &self.federation_name
    }

    /// Role configuration (frozen after initialize).
    pub fn roles(&self) -> &RoleConfig {
        &self.roles
    }

    /// Time-management configuration (frozen after initialize).
    pub fn time(&self) -> &TimeCoordinator {
        &self.time
    }

    /// Frame registry (frozen after initialize).
    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Configured run duration, if any.
    pub fn run_duration(&self) -> Option<f64> {
        self.run_duration
    }

    /// Names of the frames this federate publishes, in registration order.
    ///
    /// Meaningful after `initialize()` has stamped the directions.
    pub fn publishers(&self) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|frame| frame.is_publisher())
            .map(ReferenceFrame::name)
            .collect()
    }
}

impl fmt::Display for FederateSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "federate '{}' in federation '{}' [{}]",
            self.federate_name, self.federation_name, self.state
        )?;
        writeln!(
            f,
            "roles: master={} pacing={} rrfp={}",
            self.roles.is_master(),
            self.roles.is_pacing(),
            self.roles.is_root_frame_publisher()
        )?;
        let units = self.time.base_units.map_or("unset", |u| u.as_str());
        writeln!(
            f,
            "time: lookahead={} s, units={units}, regulating={}, constrained={}",
            self.time.lookahead_seconds, self.time.regulating, self.time.constrained
        )?;
        match self.run_duration {
            Some(seconds) => writeln!(f, "run duration: {seconds} s")?,
            None => writeln!(f, "run duration: unbounded")?,
        }
        match self.registry.resolve_root() {
            Ok(root) => write!(f, "frames: {} (root '{}')", self.registry.len(), root.name()),
            Err(_) => write!(f, "frames: {} (root unresolved)", self.registry.len()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orrery_core::{BaseTimeUnit, RoleFlags};

    use super::*;

    fn frame(name: &str, parent: Option<&str>) -> ReferenceFrame {
        ReferenceFrame::new(name, parent).unwrap()
    }

    #[test]
    fn new_session_is_unconfigured() {
        let session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        assert_eq!(session.state(), SessionState::Unconfigured);
    }

    #[test]
    fn first_mutation_enters_configuring() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.set_run_duration(Some(10.0)).unwrap();
        assert_eq!(session.state(), SessionState::Configuring);
    }

    #[test]
    fn non_positive_run_duration_is_rejected() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        assert!(matches!(
            session.set_run_duration(Some(0.0)),
            Err(SessionError::InvalidRunDuration { .. })
        ));
        assert!(matches!(
            session.set_run_duration(Some(-1.0)),
            Err(SessionError::InvalidRunDuration { .. })
        ));
    }

    #[test]
    fn duplicate_object_is_rejected_on_add() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.add_frame_object(FrameObject::new("FrameA", "ref_frame_A", true)).unwrap();

        let err =
            session.add_frame_object(FrameObject::new("FrameA", "other_handle", true)).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateObject { .. }));

        // Same handle under a different frame name also conflicts.
        let err =
            session.add_frame_object(FrameObject::new("FrameB", "ref_frame_A", true)).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateObject { .. }));
    }

    #[test]
    fn initialize_requires_a_root() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
            .unwrap();
        assert!(matches!(session.initialize(), Err(SessionError::MissingRootFrame)));
    }

    #[test]
    fn mutation_after_initialize_fails() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.register_frame(frame("RootFrame", None)).unwrap();
        session.set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
            .unwrap();
        session.initialize().unwrap();

        assert!(matches!(
            session.register_frame(frame("FrameA", Some("RootFrame"))),
            Err(SessionError::AlreadyInitialized)
        ));
        assert!(matches!(
            session.set_roles(RoleConfig::new(RoleFlags::MASTER, "M", "P")),
            Err(SessionError::AlreadyInitialized)
        ));
    }

    #[test]
    fn root_object_must_match_resolved_root() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.register_frame(frame("RootFrame", None)).unwrap();
        session.register_frame(frame("FrameA", Some("RootFrame"))).unwrap();
        session.set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
            .unwrap();
        session.set_root_frame_object(FrameObject::new("FrameA", "ref_frame_A", false)).unwrap();

        assert!(matches!(
            session.initialize(),
            Err(SessionError::RootFrameMismatch { configured, resolved })
                if configured == "FrameA" && resolved == "RootFrame"
        ));
    }

    #[test]
    fn start_and_terminate_walk_the_lifecycle() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        session.register_frame(frame("RootFrame", None)).unwrap();
        session.set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))
            .unwrap();
        session.initialize().unwrap();

        assert!(matches!(
            session.terminate("early"),
            Ok(())
        ));
        assert_eq!(session.state(), SessionState::Terminated);

        // Terminated is final.
        assert!(matches!(session.start(), Err(SessionError::InvalidState { .. })));
        assert!(matches!(session.terminate("again"), Err(SessionError::InvalidState { .. })));
    }

    #[test]
    fn start_requires_initialized() {
        let mut session = FederateSession::new("RRFP", "SpaceFOM_Roles_Test");
        assert!(matches!(session.start(), Err(SessionError::InvalidState { .. })));
    }
}
