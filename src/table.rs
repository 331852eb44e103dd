//! Shared access to one game from several async participants.
//!
//! The engine sits behind a single mutex held for the whole of each `apply`,
//! so chain and run resolution is never observed half done and callers are
//! queued rather than interleaved. Committed actions are mirrored in commit
//! order on a broadcast channel, which is what a network transport or a UI
//! subscribes to.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, broadcast, watch};

use crate::action::{Action, PlayerId};
use crate::deck::{Deck, ShuffledDeck};
use crate::error::TableError;
use crate::game::RuleEngine;
use crate::state::{GameStatus, GameView, Outcome, ResumeContext, Snapshot};
use crate::strategy::{Strategy, StrategyConfig};

const MIRROR_CAPACITY: usize = 256;

/// One committed action, as mirrored to subscribers.
#[derive(Clone, Debug)]
pub struct Committed {
    pub actor: PlayerId,
    pub action: Action,
    pub outcome: Outcome,
}

/// Cloneable handle to a game shared between a UI, drivers and transports.
pub struct Table<D = ShuffledDeck> {
    engine: Arc<Mutex<RuleEngine<D>>>,
    mirror: broadcast::Sender<Committed>,
    paused: Arc<watch::Sender<bool>>,
}

impl<D> Clone for Table<D> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            mirror: self.mirror.clone(),
            paused: Arc::clone(&self.paused),
        }
    }
}

impl<D: Deck> Table<D> {
    pub fn new(engine: RuleEngine<D>) -> Self {
        let (mirror, _) = broadcast::channel(MIRROR_CAPACITY);
        let (paused, _) = watch::channel(engine.status() == GameStatus::Paused);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            mirror,
            paused: Arc::new(paused),
        }
    }

    /// Receive every action committed from now on, in commit order.
    pub fn subscribe(&self) -> broadcast::Receiver<Committed> {
        self.mirror.subscribe()
    }

    pub fn pause_signal(&self) -> watch::Receiver<bool> {
        self.paused.subscribe()
    }

    /// Apply an action, waiting behind any action already in flight.
    pub async fn apply(&self, actor: PlayerId, action: Action) -> Result<Outcome, TableError> {
        let mut engine = self.engine.lock().await;
        self.commit(&mut engine, actor, action)
    }

    /// Apply an action unless another one is in flight.
    pub fn try_apply(&self, actor: PlayerId, action: Action) -> Result<Outcome, TableError> {
        let mut engine = self.engine.try_lock().map_err(|_| TableError::Busy)?;
        self.commit(&mut engine, actor, action)
    }

    pub async fn pause(&self) -> Result<ResumeContext, TableError> {
        let mut engine = self.engine.lock().await;
        let context = engine.pause()?;
        self.paused.send_replace(true);
        Ok(context)
    }

    pub async fn resume(&self) -> Option<ResumeContext> {
        let mut engine = self.engine.lock().await;
        let context = engine.resume()?;
        self.paused.send_replace(false);
        Some(context)
    }

    pub async fn view(&self, perspective: PlayerId) -> GameView {
        self.engine.lock().await.view(perspective)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Run a read-only query against the engine inside the critical section.
    pub async fn inspect<R>(&self, query: impl FnOnce(&RuleEngine<D>) -> R) -> R {
        let engine = self.engine.lock().await;
        query(&engine)
    }

    fn commit(
        &self,
        engine: &mut MutexGuard<'_, RuleEngine<D>>,
        actor: PlayerId,
        action: Action,
    ) -> Result<Outcome, TableError> {
        let outcome = engine.apply(actor, action).inspect_err(|err| {
            log::warn!("{actor} {action:?} rejected: {err}");
        })?;
        // No subscribers is fine; the mirror is optional.
        let _ = self.mirror.send(Committed {
            actor,
            action,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }
}

/// Result of one driver step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Applied(Outcome),
    /// The seat does not hold authority to act.
    Waiting,
    Finished,
    /// Authority is ours but nothing is legal (deck and discard exhausted).
    Stalled,
}

/// Drives one seat with a [`Strategy`], thinking for a while before each move.
///
/// A pause during the thinking delay throws the pending decision away; after
/// resume the driver looks at the game again and decides afresh. A decision is
/// also dropped when anything else changed the game while it was being made.
pub struct OpponentDriver {
    seat: PlayerId,
    strategy: Box<dyn Strategy>,
    think_delay: Duration,
}

impl OpponentDriver {
    pub fn new(seat: PlayerId, strategy: Box<dyn Strategy>, think_delay: Duration) -> Self {
        Self {
            seat,
            strategy,
            think_delay,
        }
    }

    /// Driver whose think delay comes from the strategy tunables.
    pub fn from_config(
        seat: PlayerId,
        strategy: Box<dyn Strategy>,
        config: &StrategyConfig,
    ) -> Self {
        Self::new(seat, strategy, config.think_delay())
    }

    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    /// Decide and submit at most one action.
    pub async fn step<D: Deck>(&mut self, table: &Table<D>) -> Result<Step, TableError> {
        let mut paused = table.pause_signal();
        loop {
            if paused.wait_for(|is_paused| !*is_paused).await.is_err() {
                return Ok(Step::Waiting);
            }
            let (view, legal_actions, revision) = {
                let engine = table.engine.lock().await;
                match engine.status() {
                    GameStatus::Ended => return Ok(Step::Finished),
                    GameStatus::Paused => continue,
                    GameStatus::Active => {}
                }
                if engine.authorized_actor() != Some(self.seat) {
                    return Ok(Step::Waiting);
                }
                (
                    engine.view(self.seat),
                    engine.legal_actions(self.seat)?,
                    engine.revision(),
                )
            };
            if legal_actions.is_empty() {
                return Ok(Step::Stalled);
            }
            let decision = self.strategy.decide(&view, &legal_actions);

            if !self.think_delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.think_delay) => {}
                    _ = paused.wait_for(|is_paused| *is_paused) => {
                        log::debug!("{} decision dropped by pause", self.seat);
                        continue;
                    }
                }
            }

            let mut engine = table.engine.lock().await;
            if engine.revision() != revision {
                log::warn!("{} decision went stale, deciding again", self.seat);
                continue;
            }
            return table
                .commit(&mut engine, self.seat, decision)
                .map(Step::Applied);
        }
    }

    /// Keep stepping until the seat loses authority or the game stops.
    pub async fn play_turn<D: Deck>(
        &mut self,
        table: &Table<D>,
    ) -> Result<Vec<Outcome>, TableError> {
        let mut outcomes = Vec::new();
        while let Step::Applied(outcome) = self.step(table).await? {
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
