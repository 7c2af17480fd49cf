use std::time::Duration;

use log::{debug, trace};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// A tick fired for a specific round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub round_id: u64,
}

struct Ticker {
    round_id: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Repeating timer driving one round at a time.
///
/// Arming the clock for a new round always cancels the previous timer first,
/// so there is never more than one live ticker.
#[derive(Default)]
pub struct GameClock {
    ticker: Option<Ticker>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts sending a `ClockTick` for `round_id` every `period`, the first
    /// one a full period from now. Must be called inside a tokio runtime.
    ///
    /// The ticker only holds a weak sender, so it never keeps the receiving
    /// mailbox open on its own.
    pub fn start<T>(&mut self, round_id: u64, period: Duration, tx: mpsc::WeakSender<T>)
    where
        T: From<ClockTick> + Send + 'static,
    {
        self.stop();

        let token = CancellationToken::new();
        let child = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    _ = child.cancelled() => {
                        trace!("clock for round {} cancelled", round_id);
                        break;
                    }

                    _ = interval.tick() => {
                        let Some(tx) = tx.upgrade() else {
                            debug!("clock for round {} lost its receiver", round_id);
                            break;
                        };
                        if tx.send(ClockTick { round_id }.into()).await.is_err() {
                            debug!("clock for round {} lost its receiver", round_id);
                            break;
                        }
                    }
                }
            }
        });

        debug!("clock armed for round {} every {:?}", round_id, period);
        self.ticker = Some(Ticker { round_id, token, handle });
    }

    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("clock for round {} stopped", ticker.round_id);
            ticker.token.cancel();
            ticker.handle.abort();
        }
    }

    /// Round the live ticker belongs to, if any.
    pub fn round_id(&self) -> Option<u64> {
        self.ticker.as_ref().map(|t| t.round_id)
    }
}

impl Drop for GameClock {
    fn drop(&mut self) {
        self.stop();
    }
}
