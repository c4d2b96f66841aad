//! Best-effort keystate monitor.
//!
//! An optional diagnostic thread that periodically logs the real and
//! virtual keystates.  The control thread publishes a snapshot into
//! [`SharedKeystates`] after each resolved transition; the monitor reads
//! the atomics on its own schedule.  Staleness between the per-key loads
//! has no correctness impact – this is display only, the live model stays
//! owned by the control thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use socd_core::{KeyStates, Snapshot, TrackedKey};

/// Tick used to re-check the shutdown flag between dumps, so stopping the
/// daemon never waits for a full monitor interval.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// Lock-free published copy of the keystate model.
#[derive(Default)]
pub struct SharedKeystates {
    real: [AtomicBool; TrackedKey::COUNT],
    virt: [AtomicBool; TrackedKey::COUNT],
}

impl SharedKeystates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the current model.  Called by the control thread only.
    pub fn publish(&self, states: &KeyStates) {
        for (i, key) in TrackedKey::ALL.iter().enumerate() {
            self.real[i].store(states.real_pressed(*key), Ordering::Relaxed);
            self.virt[i].store(states.virtual_pressed(*key), Ordering::Relaxed);
        }
    }

    /// Reads the last published state.
    pub fn load(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for i in 0..TrackedKey::COUNT {
            snapshot.real[i] = self.real[i].load(Ordering::Relaxed);
            snapshot.virt[i] = self.virt[i].load(Ordering::Relaxed);
        }
        snapshot
    }
}

/// Spawns the monitor thread.  It logs one dump per `interval` until
/// `running` clears, then exits.
pub fn spawn_monitor(
    shared: Arc<SharedKeystates>,
    interval: Duration,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("socd-keystate-monitor".to_string())
        .spawn(move || {
            let mut elapsed = Duration::ZERO;
            while running.load(Ordering::Relaxed) {
                thread::sleep(SHUTDOWN_POLL);
                elapsed += SHUTDOWN_POLL;
                if elapsed < interval {
                    continue;
                }
                elapsed = Duration::ZERO;

                let snapshot = shared.load();
                info!(
                    "keystates {{ w: {}, a: {}, s: {}, d: {} }} virtual {{ w: {}, a: {}, s: {}, d: {} }}",
                    snapshot.real_pressed(TrackedKey::Up) as u8,
                    snapshot.real_pressed(TrackedKey::Left) as u8,
                    snapshot.real_pressed(TrackedKey::Down) as u8,
                    snapshot.real_pressed(TrackedKey::Right) as u8,
                    snapshot.virtual_pressed(TrackedKey::Up) as u8,
                    snapshot.virtual_pressed(TrackedKey::Left) as u8,
                    snapshot.virtual_pressed(TrackedKey::Down) as u8,
                    snapshot.virtual_pressed(TrackedKey::Right) as u8,
                );
            }
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use socd_core::{KeyAction, KeyTransition, SocdResolver};

    #[test]
    fn test_publish_then_load_round_trips() {
        // Arrange
        let shared = SharedKeystates::new();
        let mut resolver = SocdResolver::new();
        resolver.apply(KeyTransition {
            key: TrackedKey::Up,
            action: KeyAction::Press,
        });
        resolver.apply(KeyTransition {
            key: TrackedKey::Down,
            action: KeyAction::Press,
        });

        // Act
        shared.publish(resolver.states());
        let snapshot = shared.load();

        // Assert – the published copy matches the live model
        assert_eq!(snapshot, resolver.states().snapshot());
        assert!(snapshot.real_pressed(TrackedKey::Up));
        assert!(!snapshot.virtual_pressed(TrackedKey::Up));
        assert!(snapshot.virtual_pressed(TrackedKey::Down));
    }

    #[test]
    fn test_monitor_thread_exits_when_running_clears() {
        let shared = Arc::new(SharedKeystates::new());
        let running = Arc::new(AtomicBool::new(true));
        let handle = spawn_monitor(
            Arc::clone(&shared),
            Duration::from_secs(60),
            Arc::clone(&running),
        )
        .expect("spawn");

        running.store(false, Ordering::Relaxed);

        // Joins well before the 60s interval thanks to the shutdown poll
        handle.join().expect("monitor thread panicked");
    }
}
