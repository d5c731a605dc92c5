//! Leaderboard scheduler
//!
//! Runs the [`RankReconciler`] on a fixed interval in a background task.
//! At most one run executes at a time, each run is bounded by a timeout,
//! and shutdown abandons an in-flight run (its transaction rolls back).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use duck_common::LeaderboardConfig;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::reconciler::RankReconciler;

/// Timing of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between the starts of two runs
    pub interval: Duration,
    /// Upper bound for a single run
    pub run_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4 * 60 * 60),
            run_timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl From<&LeaderboardConfig> for SchedulerConfig {
    fn from(config: &LeaderboardConfig) -> Self {
        Self {
            interval: config.interval(),
            run_timeout: config.timeout(),
        }
    }
}

/// Lifecycle state of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not started, or shut down
    Stopped,
    /// Waiting for the next tick
    Idle,
    /// A run is in progress
    Executing,
}

/// How a single run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Ranks reconciled; the number of ducks re-ranked
    Updated(u64),
    /// Another run was still executing
    Skipped,
    /// The run exceeded its timeout and was abandoned
    TimedOut,
    /// Shutdown was requested while the run was executing
    Cancelled,
    /// The reconciler returned an error
    Failed(String),
}

/// What a run does when another run holds the run lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    /// Wait for the other run to finish, then run
    Wait,
    /// Give up with [`RunOutcome::Skipped`]
    Skip,
}

/// Everything a run needs, shared between the loop task and `run_once`
#[derive(Clone)]
struct Runner {
    reconciler: RankReconciler,
    config: SchedulerConfig,
    started: Arc<AtomicBool>,
    state: Arc<Mutex<SchedulerState>>,
    run_lock: Arc<tokio::sync::Mutex<()>>,
}

impl Runner {
    async fn execute(
        &self,
        shutdown: &mut watch::Receiver<bool>,
        overlap: Overlap,
    ) -> RunOutcome {
        if *shutdown.borrow() {
            return RunOutcome::Cancelled;
        }

        let _running = match (overlap, self.run_lock.try_lock()) {
            (_, Ok(guard)) => guard,
            (Overlap::Skip, Err(_)) => {
                tracing::debug!("Leaderboard run already executing, skipping");
                return RunOutcome::Skipped;
            }
            (Overlap::Wait, Err(_)) => {
                tracing::debug!("Leaderboard run waiting for the previous run");
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => {
                        tracing::debug!("Leaderboard run cancelled by shutdown");
                        return RunOutcome::Cancelled;
                    }
                    guard = self.run_lock.lock() => guard,
                }
            }
        };

        *self.state.lock() = SchedulerState::Executing;

        let outcome = tokio::select! {
            biased;
            _ = shutdown.changed() => RunOutcome::Cancelled,
            result = tokio::time::timeout(self.config.run_timeout, self.reconciler.reconcile()) => {
                match result {
                    Ok(Ok(changed)) => RunOutcome::Updated(changed),
                    Ok(Err(e)) => RunOutcome::Failed(e.to_string()),
                    Err(_) => RunOutcome::TimedOut,
                }
            }
        };

        self.finish_run(shutdown);

        match &outcome {
            RunOutcome::Updated(0) => tracing::debug!("Leaderboard already up to date"),
            RunOutcome::Updated(changed) => {
                tracing::info!(changed, "Leaderboard ranks updated");
            }
            RunOutcome::TimedOut => tracing::debug!(
                timeout_secs = self.config.run_timeout.as_secs(),
                "Leaderboard run timed out, changes rolled back"
            ),
            RunOutcome::Cancelled => tracing::debug!("Leaderboard run cancelled by shutdown"),
            RunOutcome::Failed(error) => tracing::error!(error = %error, "Leaderboard run failed"),
            RunOutcome::Skipped => {}
        }

        outcome
    }

    /// Leave `Executing`. Checked under the state lock so a run never
    /// overwrites the `Stopped` written by a concurrent shutdown.
    fn finish_run(&self, shutdown: &watch::Receiver<bool>) {
        let mut state = self.state.lock();
        *state = if self.started.load(Ordering::SeqCst) && !*shutdown.borrow() {
            SchedulerState::Idle
        } else {
            SchedulerState::Stopped
        };
    }

    async fn run_loop(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !*shutdown.borrow() {
            let tick = tokio::select! {
                biased;
                _ = shutdown.changed() => false,
                _ = ticker.tick() => true,
            };
            if !tick {
                break;
            }

            self.execute(&mut shutdown, Overlap::Wait).await;
        }

        *self.state.lock() = SchedulerState::Stopped;
        tracing::info!("Leaderboard scheduler stopped");
    }
}

/// Periodic leaderboard reconciliation
pub struct LeaderboardScheduler {
    runner: Runner,
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl LeaderboardScheduler {
    pub fn new(reconciler: RankReconciler, config: SchedulerConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            runner: Runner {
                reconciler,
                config,
                started: Arc::new(AtomicBool::new(false)),
                state: Arc::new(Mutex::new(SchedulerState::Stopped)),
                run_lock: Arc::new(tokio::sync::Mutex::new(())),
            },
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    /// Spawn the background loop. The first run happens one interval after
    /// start. Returns `false` if the scheduler was already started.
    pub fn start(&self) -> bool {
        if self.runner.started.swap(true, Ordering::SeqCst) {
            tracing::warn!("Leaderboard scheduler is already running");
            return false;
        }

        *self.runner.state.lock() = SchedulerState::Idle;

        let runner = self.runner.clone();
        let shutdown = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(runner.run_loop(shutdown));
        *self.handle.lock() = Some(handle);

        tracing::info!(
            interval_secs = self.runner.config.interval.as_secs(),
            timeout_secs = self.runner.config.run_timeout.as_secs(),
            "Leaderboard scheduler started"
        );
        true
    }

    /// Run a reconciliation now, outside the schedule.
    ///
    /// Returns [`RunOutcome::Skipped`] if a run is already executing. A
    /// scheduled tick that fires meanwhile waits for this run instead.
    pub async fn run_once(&self) -> RunOutcome {
        let mut shutdown = self.shutdown_tx.subscribe();
        self.runner.execute(&mut shutdown, Overlap::Skip).await
    }

    pub fn state(&self) -> SchedulerState {
        *self.runner.state.lock()
    }

    pub fn config(&self) -> SchedulerConfig {
        self.runner.config
    }

    /// Stop the loop and wait for it to finish. An executing run is
    /// abandoned. Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        *self.runner.state.lock() = SchedulerState::Stopped;

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Leaderboard scheduler task panicked");
            }
        }

        *self.runner.state.lock() = SchedulerState::Stopped;
    }
}

impl std::fmt::Debug for LeaderboardScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardScheduler")
            .field("config", &self.runner.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
