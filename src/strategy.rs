use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::state::GameView;

/// Interface for anything that picks moves: computer opponents, stdin
/// players or proxies for a remote human.
///
/// The engine re-validates every returned action, so a misbehaving strategy
/// only ever earns a `RuleError`.
pub trait Strategy: Send {
    fn decide(&mut self, view: &GameView, legal_actions: &[Action]) -> Action;
}

/// Tunables for the computer opponent, loadable from JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    /// Chance of reaching for a special card when a plain number would also do.
    pub special_preference: f64,
    /// Pause before each decision is submitted.
    pub think_delay_ms: u64,
    /// Stack a held +2 instead of drawing whenever a chain reaches us.
    pub always_stack_chain: bool,
    /// Extend runs with wild cards instead of saving them.
    pub spend_wilds_in_run: bool,
    pub seed: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            special_preference: 0.7,
            think_delay_ms: 800,
            always_stack_chain: true,
            spend_wilds_in_run: false,
            seed: 0xA11C_E5ED,
        }
    }
}

impl StrategyConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}
