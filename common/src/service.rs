use log::{debug, error, info, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::clock::{ClockTick, GameClock};
use crate::constants::SERVICE_MAILBOX_CAPACITY;
use crate::error::{GameError, GameResult};
use crate::{Direction, GameController, GameEvent, Snapshot, Speed};

/// Everything the game task reacts to arrives through one mailbox, so
/// requests and ticks are handled strictly one after another.
#[derive(Debug)]
pub enum GameMessage {
    Start,
    SetSpeed {
        speed: Speed,
        reply: Option<oneshot::Sender<GameResult<()>>>,
    },
    Direction(Direction),
    Tick(ClockTick),
    Shutdown,
}

impl From<ClockTick> for GameMessage {
    fn from(tick: ClockTick) -> Self {
        GameMessage::Tick(tick)
    }
}

/// Cloneable front door to a running game task.
#[derive(Clone)]
pub struct GameHandle {
    tx: mpsc::Sender<GameMessage>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    fn send(&self, message: GameMessage) -> GameResult<()> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => GameError::MailboxFull,
            mpsc::error::TrySendError::Closed(_) => GameError::ServiceClosed,
        })
    }

    /// Start or restart a round. Ignored while one is playing.
    pub fn start(&self) -> GameResult<()> {
        self.send(GameMessage::Start)
    }

    pub fn request_direction(&self, direction: Direction) -> GameResult<()> {
        self.send(GameMessage::Direction(direction))
    }

    /// Queues a speed change without waiting for the verdict. A rejected
    /// change simply never shows up in the snapshots.
    pub fn try_set_speed(&self, speed: Speed) -> GameResult<()> {
        self.send(GameMessage::SetSpeed { speed, reply: None })
    }

    pub async fn set_speed(&self, speed: Speed) -> GameResult<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(GameMessage::SetSpeed { speed, reply: Some(reply) })
            .await
            .map_err(|_| GameError::ServiceClosed)?;
        rx.await.map_err(|_| GameError::ServiceClosed)?
    }

    pub fn shutdown(&self) -> GameResult<()> {
        self.send(GameMessage::Shutdown)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }
}

/// Spawns the task that owns `controller` and returns a handle to it.
pub fn spawn_game(controller: GameController) -> (GameHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(SERVICE_MAILBOX_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

    // Weak, so the mailbox closes once every handle is dropped.
    let clock_tx = tx.downgrade();
    let service = GameService {
        controller,
        clock: GameClock::new(),
        clock_tx,
        snapshots: snapshot_tx,
    };
    let handle = tokio::spawn(service.run(rx));

    (GameHandle { tx, snapshots: snapshot_rx }, handle)
}

struct GameService {
    controller: GameController,
    clock: GameClock,
    clock_tx: mpsc::WeakSender<GameMessage>,
    snapshots: watch::Sender<Snapshot>,
}

impl GameService {
    async fn run(mut self, mut rx: mpsc::Receiver<GameMessage>) {
        info!("game service started");
        while let Some(message) = rx.recv().await {
            match message {
                GameMessage::Shutdown => break,
                GameMessage::Start => self.start(),
                GameMessage::SetSpeed { speed, reply } => {
                    let result = self.controller.set_speed(speed);
                    match &result {
                        Ok(()) => {
                            debug!("speed set to {}", speed);
                            self.publish();
                        }
                        Err(e) => debug!("speed change to {} rejected: {}", speed, e),
                    }
                    if let Some(reply) = reply {
                        let _ = reply.send(result);
                    }
                }
                GameMessage::Direction(direction) => {
                    self.controller.request_direction(direction);
                }
                GameMessage::Tick(tick) => self.tick(tick),
            }
        }

        self.clock.stop();
        info!("game service stopped");
    }

    fn start(&mut self) {
        match self.controller.start() {
            Ok(true) => {
                let period = self.controller.speed().tick_interval();
                self.clock
                    .start(self.controller.round_id(), period, self.clock_tx.clone());
                self.publish();
            }
            Ok(false) => {}
            Err(e) => error!("failed to start round: {}", e),
        }
    }

    fn tick(&mut self, tick: ClockTick) {
        if tick.round_id != self.controller.round_id() || !self.controller.is_playing() {
            debug!(
                "dropping stale tick for round {}, clock is on {:?}",
                tick.round_id,
                self.clock.round_id()
            );
            return;
        }

        match self.controller.tick() {
            Ok(events) => {
                let finished = events
                    .iter()
                    .any(|e| matches!(e, GameEvent::SnakeDied { .. } | GameEvent::BoardFilled));
                if finished {
                    self.clock.stop();
                }
            }
            Err(e) => {
                warn!("tick failed, stopping clock: {}", e);
                self.clock.stop();
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.controller.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    fn controller() -> GameController {
        GameController::new(GameConfig { seed: Some(9), ..GameConfig::default() }).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_for_other_rounds_are_dropped() {
        let (game, _task) = spawn_game(controller());
        let mut updates = game.subscribe();
        game.start().unwrap();
        updates.changed().await.unwrap();
        assert_eq!(game.snapshot().round_id, 1);

        for round_id in [0, 2, 7] {
            game.tx.send(GameMessage::Tick(ClockTick { round_id })).await.unwrap();
        }
        // The reply arrives only after the ticks ahead of it were handled.
        assert_eq!(game.set_speed(Speed::Fast).await, Err(GameError::SpeedLocked));
        assert_eq!(game.snapshot().tick, 0);

        game.tx.send(GameMessage::Tick(ClockTick { round_id: 1 })).await.unwrap();
        assert_eq!(game.set_speed(Speed::Fast).await, Err(GameError::SpeedLocked));
        assert_eq!(game.snapshot().tick, 1);
    }
}
