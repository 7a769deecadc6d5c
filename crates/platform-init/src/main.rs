//! platform-init entry point.
//!
//! Loads a subsystem's hardware description and dispatches its init
//! operation sequence, one independent transaction per operation. Meant
//! to run once at boot before the platform daemons start.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use platform_hwdesc::HwDesc;
use platform_i2c::init_devices;

/// Initialize the devices of one switch platform subsystem.
#[derive(Debug, Parser)]
#[command(name = "platform-init", version)]
struct Args {
    /// Subsystem name to register, e.g. "base".
    subsystem: String,

    /// Directory containing the subsystem's description files.
    path: PathBuf,
}

/// Initialize tracing/logging.
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run(args: &Args) -> anyhow::Result<usize> {
    let mut store = HwDesc::new();
    store
        .add_subsystem(&args.subsystem, &args.path)
        .with_context(|| format!("failed to load subsystem '{}'", args.subsystem))?;
    store
        .load_devices(&args.subsystem)
        .context("failed to load devices description")?;

    let dispatched = init_devices(&store, &args.subsystem)?;
    Ok(dispatched)
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    info!(
        "--- Initializing subsystem {} from {} ---",
        args.subsystem,
        args.path.display()
    );

    match run(&args) {
        Ok(dispatched) => {
            info!("dispatched {} init operations", dispatched);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("platform-init error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
