//! Draw-chain bookkeeping.
//!
//! A chain opens when a `PlusTwo` is played under normal interaction. The
//! responder either stacks another `PlusTwo` (the chain grows and the
//! responder flips) or draws the whole penalty, which closes the chain.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;

/// Live state of an open chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainTracker {
    per_card_penalty: u32,
    stacked_count: u32,
    total_penalty: u32,
    responder: PlayerId,
}

impl ChainTracker {
    /// Chain opened by `opener`; the other player must respond. Each stacked
    /// card adds `per_card_penalty` to the draw owed.
    pub fn open(opener: PlayerId, per_card_penalty: u32) -> Self {
        Self {
            per_card_penalty,
            stacked_count: 1,
            total_penalty: per_card_penalty,
            responder: opener.other(),
        }
    }

    /// Another `PlusTwo` lands on the chain; the responder flips.
    pub fn stack(&mut self) {
        self.stacked_count += 1;
        self.total_penalty += self.per_card_penalty;
        self.responder = self.responder.other();
        debug_assert_eq!(
            self.total_penalty,
            self.stacked_count * self.per_card_penalty
        );
    }

    pub fn per_card_penalty(&self) -> u32 {
        self.per_card_penalty
    }

    pub fn stacked_count(&self) -> u32 {
        self.stacked_count
    }

    pub fn total_penalty(&self) -> u32 {
        self.total_penalty
    }

    pub fn responder(&self) -> PlayerId {
        self.responder
    }

    pub fn view(&self) -> ChainView {
        ChainView {
            stacked_count: self.stacked_count,
            total_penalty: self.total_penalty,
            responder: self.responder,
        }
    }
}

/// Read-only copy of a chain for views and strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainView {
    pub stacked_count: u32,
    pub total_penalty: u32,
    pub responder: PlayerId,
}
