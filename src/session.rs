//! Session runtime - one tokio task that owns a `MoodEngine` and its timers.
//!
//! Every timer (mood sampler, particle spawner, particle expiry, lightning
//! auto-clear) is a branch of a single `select!` loop, so the engine is only
//! ever touched from one place. Gestures arrive through a mailbox that is
//! polled ahead of the timers: a reset always lands before the next sample.
//!
//! Dropping the [`PalHandle`] aborts the task, taking every timer with it.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::engine::{EntropySource, Gesture, MoodEngine, Signals, TickOutcome};
use crate::errors::{PalError, Result};

/// Default period of the mood sampler.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Runtime knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How often the engine re-derives its mood
    pub sample_interval: Duration,
    /// Whether the particle spawner runs at all
    pub particles: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            particles: true,
        }
    }
}

#[derive(Debug)]
enum Command {
    Interact(Gesture),
    Shutdown,
}

/// Handle to a running session.
#[derive(Debug)]
pub struct PalHandle {
    commands: mpsc::UnboundedSender<Command>,
    signals: watch::Receiver<Signals>,
    task: Option<JoinHandle<()>>,
}

impl PalHandle {
    /// Queue a gesture for the engine.
    pub fn interact(&self, gesture: Gesture) -> Result<()> {
        self.commands
            .send(Command::Interact(gesture))
            .map_err(|_| PalError::SessionClosed)
    }

    /// Receiver that observes every published change.
    pub fn signals(&self) -> watch::Receiver<Signals> {
        self.signals.clone()
    }

    /// Latest published signals.
    pub fn current(&self) -> Signals {
        self.signals.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the session and wait for its task to exit.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("session task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PalHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Hand `emit` the current signals and then every change that is more than
/// particle churn, until the pet breaks or the session goes away.
///
/// Summaries never carry particles. Returns how many were emitted.
pub async fn watch_summaries<E>(
    mut signals: watch::Receiver<Signals>,
    mut emit: impl FnMut(&Signals) -> std::result::Result<(), E>,
) -> std::result::Result<usize, E> {
    let mut last: Option<Signals> = None;
    let mut emitted = 0;

    loop {
        let summary = Signals {
            particles: Vec::new(),
            ..signals.borrow_and_update().clone()
        };
        if last.as_ref() != Some(&summary) {
            emit(&summary)?;
            emitted += 1;
            if summary.broken {
                break;
            }
            last = Some(summary);
        }
        if signals.changed().await.is_err() {
            tracing::debug!("session closed while watching");
            break;
        }
    }

    Ok(emitted)
}

/// Spawns sessions onto the current tokio runtime.
pub struct Session;

impl Session {
    /// Start a fresh engine. Must be called from within a tokio runtime.
    pub fn spawn(options: SessionOptions, entropy: Box<dyn EntropySource>) -> PalHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (signals_tx, signals_rx) = watch::channel(Signals::default());

        let actor = SessionActor {
            engine: MoodEngine::new(0),
            entropy,
            options,
            epoch: Instant::now(),
            signals: signals_tx,
        };
        let task = tokio::spawn(actor.run(command_rx));

        PalHandle {
            commands: command_tx,
            signals: signals_rx,
            task: Some(task),
        }
    }
}

struct SessionActor {
    engine: MoodEngine,
    entropy: Box<dyn EntropySource>,
    options: SessionOptions,
    epoch: Instant,
    signals: watch::Sender<Signals>,
}

impl SessionActor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!(
            sample_ms = self.options.sample_interval.as_millis() as u64,
            "session started"
        );

        let mut sampler = time::interval(self.options.sample_interval);
        sampler.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut spawn_every: Option<Duration> = None;
        let mut next_spawn: Option<Instant> = None;

        loop {
            // Re-arm the spawner whenever the mood changes its cadence
            let cadence = if self.options.particles {
                self.engine.particle_spawn_interval_ms().map(Duration::from_millis)
            } else {
                None
            };
            if cadence != spawn_every {
                spawn_every = cadence;
                next_spawn = cadence.map(|every| Instant::now() + every);
            }

            let expiry = self
                .engine
                .next_deadline_ms()
                .map(|ms| self.epoch + Duration::from_millis(ms));
            let halted = self.engine.is_broken();

            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::Interact(gesture)) => {
                        let now = self.now_ms();
                        if self.engine.interact(gesture, now) {
                            sampler.reset();
                            self.publish(now);
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },

                _ = sampler.tick(), if !halted => {
                    let now = self.now_ms();
                    match self.engine.tick(now, self.entropy.as_mut()) {
                        TickOutcome::Unchanged { .. } | TickOutcome::Halted => {}
                        TickOutcome::Changed { .. } | TickOutcome::Broke { .. } => self.publish(now),
                    }
                }

                () = sleep_until_or_never(next_spawn), if next_spawn.is_some() && !halted => {
                    let now = self.now_ms();
                    if self.engine.spawn_particle(now, self.entropy.as_mut()) {
                        self.publish(now);
                    }
                    next_spawn = spawn_every.map(|every| Instant::now() + every);
                }

                () = sleep_until_or_never(expiry), if expiry.is_some() => {
                    let now = self.now_ms();
                    if self.engine.expire(now) {
                        self.publish(now);
                    }
                }
            }
        }

        tracing::debug!(mood = self.engine.mood(), "session stopped");
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn publish(&self, now_ms: u64) {
        let snapshot = self.engine.snapshot(now_ms);
        self.signals.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

/// A branch precondition keeps the `None` case from ever being polled.
async fn sleep_until_or_never(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
