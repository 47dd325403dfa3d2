//! Race between user input and the auto-dismiss timer.
//!
//! Each watcher runs as its own task and reports through a oneshot channel,
//! so its single send never waits on the coordinator. The first report wins;
//! the other watcher is aborted and anything it may already have sent is
//! dropped with its channel.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::input::InputEvent;
use crate::outcome::DismissOutcome;

/// Errors that end the race without an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissError {
    /// The input source went away while no timer was armed
    InputClosed,
}

impl std::fmt::Display for DismissError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DismissError::InputClosed => {
                write!(f, "input source closed before the notification was dismissed")
            }
        }
    }
}

impl std::error::Error for DismissError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceState {
    Running,
    Resolved(DismissOutcome),
}

#[derive(Debug)]
pub struct DismissalCoordinator {
    timeout: Option<Duration>,
    state: RaceState,
}

impl DismissalCoordinator {
    /// `timeout` of `None` or zero keeps the popup up until the user acts.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout: timeout.filter(|d| !d.is_zero()),
            state: RaceState::Running,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    /// Start both watchers and wait for the first outcome.
    ///
    /// Must be awaited inside a tokio runtime with the time driver enabled.
    /// Once resolved, later calls return the same outcome without starting
    /// anything.
    pub async fn run(
        &mut self,
        events: mpsc::UnboundedReceiver<InputEvent>,
    ) -> Result<DismissOutcome, DismissError> {
        if let RaceState::Resolved(outcome) = self.state {
            return Ok(outcome);
        }

        let (input_tx, mut input_rx) = oneshot::channel();
        let input = tokio::spawn(watch_input(events, input_tx));

        let (timer_tx, mut timer_rx) = oneshot::channel();
        let timer = self
            .timeout
            .map(|duration| tokio::spawn(watch_timeout(duration, timer_tx)));

        let result = tokio::select! {
            Ok(outcome) = &mut input_rx => Ok(outcome),
            Ok(outcome) = &mut timer_rx => Ok(outcome),
            else => Err(DismissError::InputClosed),
        };

        abandon(input);
        if let Some(timer) = timer {
            abandon(timer);
        }

        if let Ok(outcome) = result {
            debug!(%outcome, "notification resolved");
            self.state = RaceState::Resolved(outcome);
        }
        result
    }
}

fn abandon(task: JoinHandle<()>) {
    if !task.is_finished() {
        task.abort();
    }
}

async fn watch_input(
    mut events: mpsc::UnboundedReceiver<InputEvent>,
    tx: oneshot::Sender<DismissOutcome>,
) {
    while let Some(event) = events.recv().await {
        if let Some(outcome) = event.outcome() {
            _ = tx.send(outcome);
            return;
        }
        trace!(?event, "ignoring input");
    }
    debug!("input source closed");
}

async fn watch_timeout(duration: Duration, tx: oneshot::Sender<DismissOutcome>) {
    tokio::time::sleep(duration).await;
    _ = tx.send(DismissOutcome::TimedOut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_disables_timer() {
        let coordinator = DismissalCoordinator::new(Some(Duration::ZERO));
        assert_eq!(coordinator.timeout(), None);
        assert_eq!(coordinator.state(), RaceState::Running);
    }

    #[test]
    fn test_error_display() {
        let err = DismissError::InputClosed;
        assert!(err.to_string().contains("input source closed"));
    }
}
