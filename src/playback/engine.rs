//! Timed playback of a [`PathModel`].
//!
//! The controller is a small state machine:
//!
//! ```text
//! Idle --start--> Playing --(path exhausted)--> Completed
//!                    |
//!                    +------cancel------------> Cancelled
//! ```
//!
//! While playing, a tokio task ticks at a fixed interval and each tick
//! reveals exactly one fix. The tick body and `cancel` both run under the
//! session lock, so once `cancel` returns no tick can reach the ports.

use crate::core::{segment_for, Coordinate, Extent};
use crate::playback::{PathModel, PlaybackConfig, PlaybackError, PlaybackState};
use crate::ports::Ports;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest tick period accepted from configuration
const MIN_TICK: Duration = Duration::from_millis(1);

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A fix was revealed; holds the new revealed count
    Revealed(usize),
    /// The path was already exhausted and playback finished
    Completed,
    /// The session is not playing, nothing was done
    Stopped,
}

/// State shared between the controller handle and its tick task
struct SessionCore {
    model: PathModel,
    state: PlaybackState,
    ports: Ports,
    config: PlaybackConfig,
}

impl SessionCore {
    fn step(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Stopped;
        }

        if self.model.is_complete() {
            self.state = PlaybackState::Completed;
            let extent = Extent::from_coordinates(self.model.revealed().iter().map(Coordinate::from));
            if let Some(extent) = extent {
                self.ports.camera.fit_to_bounds(
                    extent,
                    self.config.fit_padding_px,
                    self.config.fit_duration_ms,
                );
            }
            info!(fixes = self.model.len(), "playback completed");
            return TickOutcome::Completed;
        }

        let fix = match self.model.advance() {
            Ok(fix) => fix.clone(),
            Err(e) => {
                // is_complete() was checked above
                warn!(error = %e, "advance failed, stopping playback");
                self.state = PlaybackState::Completed;
                return TickOutcome::Completed;
            }
        };
        let revealed = self.model.revealed_count();
        debug!(revealed, total = self.model.len(), timestamp = %fix.timestamp, "tick");

        self.ports.render.add_point(&fix);
        self.ports.timeline.append_entry(&fix.timestamp);
        if let Some(prev) = self.model.previous_fix() {
            self.ports.render.add_segment(&segment_for(prev, &fix));
        }
        self.ports
            .camera
            .center_on(Coordinate::from(&fix), self.config.center_duration_ms);

        TickOutcome::Revealed(revealed)
    }
}

fn lock(core: &Mutex<SessionCore>) -> MutexGuard<'_, SessionCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives one playback session
pub struct PlaybackController {
    core: Arc<Mutex<SessionCore>>,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl PlaybackController {
    pub fn new(model: PathModel, ports: Ports, config: PlaybackConfig) -> Self {
        let interval = config.tick_interval().max(MIN_TICK);
        Self {
            core: Arc::new(Mutex::new(SessionCore {
                model,
                state: PlaybackState::Idle,
                ports,
                config,
            })),
            task: None,
            interval,
        }
    }

    pub fn state(&self) -> PlaybackState {
        lock(&self.core).state
    }

    pub fn revealed_count(&self) -> usize {
        lock(&self.core).model.revealed_count()
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Begin ticking. The first fix is revealed one interval from now.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        {
            let mut core = lock(&self.core);
            if core.state != PlaybackState::Idle {
                return Err(PlaybackError::InvalidTransition {
                    from: core.state,
                    action: "start",
                });
            }
            core.state = PlaybackState::Playing;
            info!(
                fixes = core.model.len(),
                interval_ms = self.interval.as_millis() as u64,
                "playback started"
            );
        }

        let core = Arc::clone(&self.core);
        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            // a late tick is delayed, never followed by a catch-up burst
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = lock(&core).step();
                match outcome {
                    TickOutcome::Revealed(_) => continue,
                    TickOutcome::Completed | TickOutcome::Stopped => break,
                }
            }
        }));
        Ok(())
    }

    /// Stop a playing session. No port call originates from this
    /// controller after this returns.
    pub fn cancel(&mut self) -> Result<(), PlaybackError> {
        {
            let mut core = lock(&self.core);
            if core.state != PlaybackState::Playing {
                return Err(PlaybackError::InvalidTransition {
                    from: core.state,
                    action: "cancel",
                });
            }
            core.state = PlaybackState::Cancelled;
            info!(
                revealed = core.model.revealed_count(),
                total = core.model.len(),
                "playback cancelled"
            );
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }

    /// Wait for the tick task to end, by completion or cancellation
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.take() {
            // a cancelled task reports a JoinError, which is expected here
            let _ = task.await;
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if self.is_playing() {
            let _ = self.cancel();
        }
    }
}
