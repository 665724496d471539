//! Tick Driver
//!
//! The fixed-interval scheduler that runs the simulation in real time.
//! Input edges arrive on an mpsc channel and are applied between ticks;
//! frame events fan out on a broadcast channel for whatever sinks are
//! listening (renderer, effect layer, score display).
//!
//! Pauses and the death countdown live inside the core as tick counters,
//! so stopping the driver cancels *everything* - there are no detached
//! timers to orphan.

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::events::FrameEvent;
use crate::game::input::InputCommand;
use crate::game::player::Player;
use crate::game::tick::tick;
use crate::game::world::World;

/// Capacity of the frame-event broadcast channel. Slow sinks that lag
/// behind simply miss frames; the simulation never blocks on them.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Errors surfaced by the driver handle.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver task has already shut down.
    #[error("driver is closed")]
    Closed,
}

/// Handle to a running tick driver.
pub struct Driver {
    commands: mpsc::UnboundedSender<InputCommand>,
    events: broadcast::Sender<FrameEvent>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<(Player, World)>,
}

impl Driver {
    /// Take ownership of a player and world and start ticking them at the
    /// player's configured frame interval.
    pub fn spawn(mut player: Player, mut world: World) -> Driver {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<InputCommand>();
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let interval = Duration::from_millis(player.config.frame_interval_ms);
        let events = event_tx.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_ms = interval.as_millis() as u64, "driver started");

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            debug!("driver shutdown requested");
                            break;
                        }
                    }
                    command = command_rx.recv() => {
                        match command {
                            Some(command) => player.apply_command(&mut world, command),
                            // All handles gone; nothing can reach us
                            None => break,
                        }
                    }
                    _ = ticker.tick() => {
                        if !world.is_running() {
                            continue;
                        }
                        let result = tick(&mut player, &mut world);
                        for event in result.events {
                            // Fire-and-forget; no receivers is fine
                            let _ = events.send(event);
                        }
                        if result.removed {
                            info!("player removed, driver exiting");
                            break;
                        }
                    }
                }
            }

            (player, world)
        });

        Driver {
            commands: command_tx,
            events: event_tx,
            shutdown: shutdown_tx,
            handle,
        }
    }

    /// Queue an input edge for the next tick boundary.
    pub fn send(&self, command: InputCommand) -> Result<(), DriverError> {
        self.commands.send(command).map_err(|_| DriverError::Closed)
    }

    /// Subscribe to the frame-event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<FrameEvent> {
        self.events.subscribe()
    }

    /// Cancel the recurring tick and reclaim the simulation state.
    pub async fn stop(self) -> (Player, World) {
        if self.shutdown.send(true).is_err() {
            debug!("driver already stopped");
        }
        self.handle.await.expect("driver task panicked")
    }

    /// Wait for the driver to finish on its own (player removal).
    pub async fn join(self) -> (Player, World) {
        self.handle.await.expect("driver task panicked")
    }
}

// =============================================================================
// TESTS
// =============================================================================
