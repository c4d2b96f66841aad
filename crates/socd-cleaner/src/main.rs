//! SOCD cleaner daemon – entry point.
//!
//! Wires the keyboard locator, the evdev capture service, the uinput
//! virtual device, and the cleaning pump together, then blocks until
//! Ctrl-C or the physical stream ends.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ locate_keyboard()        -- /dev/input/by-id scan, operator prompt
//!  └─ EvdevInputSource         -- reader thread, blocking kernel reads
//!  └─ UinputKeyboard           -- virtual output device
//!  └─ run_pump()               -- control loop (spawn_blocking task)
//!       └─ CleanInputUseCase   -- SOCD resolution + full re-broadcast
//!  └─ keystate monitor         -- optional diagnostic thread
//! ```
//!
//! # Usage
//!
//! ```text
//! sudo socd-cleaner [OPTIONS]
//!
//! Options:
//!   --device <PATH>             Input device node to read; skips discovery
//!   --monitor-interval <SECS>   Keystate dump interval, 0 = off [default: 0]
//! ```
//!
//! Root is required: reading `/dev/input/*` and creating uinput devices are
//! privileged operations.  Exit status is 0 on graceful shutdown (signal or
//! device unplugged mid-run) and 1 on any setup failure or on the physical
//! read failing before any event was consumed.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use socd_cleaner::application::clean_input::CleanInputUseCase;
use socd_cleaner::application::run_loop::{run_pump, PumpOutcome};
use socd_cleaner::infrastructure::event_source::{linux::EvdevInputSource, InputSource};
use socd_cleaner::infrastructure::locator::{locate_keyboard, StdinPrompt};
use socd_cleaner::infrastructure::monitor::{spawn_monitor, SharedKeystates};
use socd_cleaner::infrastructure::virtual_output::uinput::UinputKeyboard;
use socd_core::TrackedKey;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// SOCD-cleaning keyboard daemon.
///
/// Reads the physical keyboard, resolves simultaneous opposing directions
/// with last-input priority, and re-emits the four movement keys through a
/// virtual device.
#[derive(Debug, Parser)]
#[command(name = "socd-cleaner", about = "SOCD-cleaning keyboard daemon for Linux", version)]
struct Cli {
    /// Input device node to read from (e.g. /dev/input/by-id/...-event-kbd).
    ///
    /// When omitted, the daemon scans the standard device directories and
    /// prompts if more than one keyboard is found.
    #[arg(long, env = "SOCD_DEVICE")]
    device: Option<PathBuf>,

    /// Seconds between keystate diagnostic dumps; 0 disables the monitor.
    #[arg(long, default_value_t = 0, env = "SOCD_MONITOR_INTERVAL")]
    monitor_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!("SOCD cleaner starting");

    if !nix::unistd::geteuid().is_root() {
        anyhow::bail!("this program must run as root to read keyboard input and create uinput devices");
    }

    // ── Physical device ───────────────────────────────────────────────────────
    let device_path = match cli.device {
        Some(path) => path,
        None => {
            // Blocks on the operator prompt when several keyboards match.
            let mut prompt = StdinPrompt;
            locate_keyboard(&mut prompt).context("locating keyboard device")?
        }
    };

    let source =
        EvdevInputSource::open(&device_path).context("opening physical keyboard device")?;

    // ── Virtual output device ─────────────────────────────────────────────────
    let mut keyboard =
        UinputKeyboard::create(&TrackedKey::ALL).context("creating virtual output device")?;

    // ── Shutdown flag and Ctrl-C handler ──────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_signal = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_signal.store(false, Ordering::Relaxed);
        }
    });

    // ── Keystate monitor (optional) ───────────────────────────────────────────
    let shared = Arc::new(SharedKeystates::new());
    let monitor = if cli.monitor_interval > 0 {
        Some(
            spawn_monitor(
                Arc::clone(&shared),
                Duration::from_secs(cli.monitor_interval),
                Arc::clone(&running),
            )
            .context("spawning keystate monitor")?,
        )
    } else {
        None
    };

    // ── Pump ──────────────────────────────────────────────────────────────────
    let events = source.start().context("starting capture service")?;

    let shared_pump = Arc::clone(&shared);
    let running_pump = Arc::clone(&running);
    let (result, mut keyboard) = tokio::task::spawn_blocking(move || {
        let mut use_case = CleanInputUseCase::new();
        let result = run_pump(
            &events,
            &mut use_case,
            &mut keyboard,
            &shared_pump,
            &running_pump,
        );
        (result, keyboard)
    })
    .await
    .context("pump task panicked")?;

    // ── Cleanup – runs on every exit path before the outcome is judged ────────
    running.store(false, Ordering::Relaxed);
    source.stop();
    keyboard.destroy();
    if let Some(handle) = monitor {
        if handle.join().is_err() {
            warn!("keystate monitor thread panicked");
        }
    }

    match result.context("event pump failed")? {
        PumpOutcome::Cancelled => info!("stopping."),
        PumpOutcome::SourceClosed { transitions } => {
            info!(transitions, "physical stream ended; stopping.");
        }
    }

    Ok(())
}
