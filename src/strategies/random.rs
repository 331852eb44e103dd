use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::state::GameView;
use crate::strategy::Strategy;

/// Baseline strategy that samples uniformly from the legal action set.
pub struct RandomStrategy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Strategy for RandomStrategy<R> {
    fn decide(&mut self, _view: &GameView, legal_actions: &[Action]) -> Action {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .expect("at least one legal action must be available")
    }
}
