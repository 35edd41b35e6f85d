//! Periodic background save.
//!
//! # Responsibility
//! - Run a caller-supplied save function on a fixed interval.
//! - Stop cleanly on `stop()`, on restart and on drop.
//!
//! # Invariants
//! - The first save runs one full interval after `start`, never immediately.
//! - At most one timer task is alive per `Autosave`.
//! - A failing save is logged and the timer keeps running.

use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub enum AutosaveError {
    /// `start` was called outside a tokio runtime.
    NoRuntime(TryCurrentError),
    /// A zero interval would spin.
    ZeroInterval,
}

impl Display for AutosaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRuntime(err) => write!(f, "autosave needs a tokio runtime: {err}"),
            Self::ZeroInterval => write!(f, "autosave interval must be greater than zero"),
        }
    }
}

impl Error for AutosaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoRuntime(err) => Some(err),
            Self::ZeroInterval => None,
        }
    }
}

struct TimerTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl TimerTask {
    fn shutdown(self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

/// Owns the autosave timer. Dropping it cancels the timer.
pub struct Autosave {
    interval: Duration,
    task: Option<TimerTask>,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

impl Autosave {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the timer, replacing any running one.
    pub fn start<F, E>(&mut self, mut save_fn: F) -> Result<(), AutosaveError>
    where
        F: FnMut() -> Result<(), E> + Send + 'static,
        E: Display,
    {
        if self.interval.is_zero() {
            return Err(AutosaveError::ZeroInterval);
        }
        let runtime = Handle::try_current().map_err(AutosaveError::NoRuntime)?;
        self.stop();

        let period = self.interval;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => match save_fn() {
                        Ok(()) => debug!("event=autosave module=service status=ok"),
                        Err(err) => warn!(
                            "event=autosave module=service status=error error={}",
                            err
                        ),
                    },
                }
            }
        });

        info!(
            "event=autosave_start module=service status=ok interval_ms={}",
            period.as_millis()
        );
        self.task = Some(TimerTask { cancel, handle });
        Ok(())
    }

    /// Cancels the timer if one is running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.shutdown();
            info!("event=autosave_stop module=service status=ok");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.stop();
    }
}
