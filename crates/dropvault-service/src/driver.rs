//! Upload driver: ticks a shared workspace from a tokio timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::workspace::Workspace;

/// Why [`UploadDriver::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// The shutdown signal fired (or its sender was dropped).
    Shutdown,
    /// No upload was left and the driver was told to stop when idle.
    Idle,
}

/// Advances a shared [`Workspace`] by one simulator tick per timer period.
#[derive(Debug, Clone)]
pub struct UploadDriver {
    /// Shared session state
    workspace: Arc<Mutex<Workspace>>,
    /// Real time between ticks
    period: Duration,
    /// Simulated time added per tick
    step: Duration,
    /// Return once no upload is active
    stop_when_idle: bool,
}

impl UploadDriver {
    /// Create a driver whose real period equals the simulator tick interval.
    pub async fn new(workspace: Arc<Mutex<Workspace>>) -> Self {
        let step = workspace.lock().await.uploads().config().tick_interval();
        Self {
            workspace,
            period: step,
            step,
            stop_when_idle: false,
        }
    }

    /// Use a different real-time period (simulated step unchanged).
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    /// Return [`DriverExit::Idle`] as soon as no upload is active.
    pub fn stop_when_idle(mut self, stop: bool) -> Self {
        self.stop_when_idle = stop;
        self
    }

    /// The shared workspace.
    pub fn workspace(&self) -> &Arc<Mutex<Workspace>> {
        &self.workspace
    }

    /// Tick until shutdown, or until idle when configured to.
    ///
    /// On shutdown every pending upload is abandoned so no timer state
    /// outlives the driver.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) -> DriverExit {
        tracing::info!(
            period_ms = self.period.as_millis() as u64,
            step_ms = self.step.as_millis() as u64,
            stop_when_idle = self.stop_when_idle,
            "Upload driver started"
        );

        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.stop_when_idle && self.workspace.lock().await.uploads().is_idle() {
                tracing::info!("Upload driver idle, stopping");
                return DriverExit::Idle;
            }

            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        let abandoned = self.workspace.lock().await.shutdown();
                        tracing::info!(abandoned, "Upload driver received shutdown signal");
                        return DriverExit::Shutdown;
                    }
                }
                _ = ticker.tick() => {
                    let mut workspace = self.workspace.lock().await;
                    workspace.advance(self.step);
                    tracing::debug!(
                        active = workspace.uploads().active_count(),
                        at = %workspace.now(),
                        "Upload driver tick"
                    );
                }
            }
        }
    }
}
