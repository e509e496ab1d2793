//! Orrery federate configuration binary.
//!
//! # Usage
//!
//! ```bash
//! # Configure the root reference frame publisher with a 10 s run
//! orrery-run --federate RRFP --stop 10.0
//!
//! # No configured end time: the run only stops on external request
//! orrery-run --federate RRFP --nostop
//! ```

use clap::Parser;
use orrery_core::{BaseTimeUnit, FrameObject, RoleConfig, RoleFlags, TimeCoordinator};
use orrery_frames::{FrameState, ReferenceFrame};
use orrery_session::FederateSession;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Orrery federate run configuration
#[derive(Parser, Debug)]
#[command(name = "orrery-run")]
#[command(about = "Configure and freeze a federate run configuration")]
#[command(version)]
struct Args {
    /// Federate name
    #[arg(short, long, default_value = "RRFP")]
    federate: String,

    /// Federation execution name
    #[arg(long, default_value = "SpaceFOM_Roles_Test")]
    federation: String,

    /// Name of the master federate
    #[arg(short, long, default_value = "Master")]
    master: String,

    /// Name of the pacing federate
    #[arg(short, long, default_value = "Pacing")]
    pacing: String,

    /// Run duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    stop: f64,

    /// Leave the run without a configured end time
    #[arg(long)]
    nostop: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("configuring federate '{}'", args.federate);

    let mut session = FederateSession::new(&args.federate, &args.federation);

    session.set_roles(RoleConfig::new(
        RoleFlags::ROOT_FRAME_PUBLISHER,
        &args.master,
        &args.pacing,
    ))?;
    session.set_time(TimeCoordinator::new(0.25, BaseTimeUnit::Microseconds, true, true))?;

    session.register_frame(ReferenceFrame::new("RootFrame", None)?)?;
    let frame_a_state = FrameState { position: [10.0, 10.0, 10.0], ..FrameState::default() };
    session.register_frame(ReferenceFrame::with_state(
        "FrameA",
        Some("RootFrame"),
        frame_a_state,
    )?)?;

    session
        .set_root_frame_object(FrameObject::new("RootFrame", "root_ref_frame.frame_packing", false))?;
    session.add_frame_object(FrameObject::new("FrameA", "ref_frame_A.frame_packing", true))?;

    if !args.nostop {
        session.set_run_duration(Some(args.stop))?;
    }

    let actions = session.initialize()?;
    for action in &actions {
        tracing::info!(?action, "configuration action");
    }

    tracing::info!(summary = %session, "configuration frozen");

    Ok(())
}
