//! Multi-card run bookkeeping.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Live state of an open run. Only the initiator may act while it exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceTracker {
    initiator: PlayerId,
    run_color: Color,
    cards_played: u32,
    last_card: Card,
}

impl SequenceTracker {
    /// Opens a run with `first` as its first card. `run_color` never changes afterwards.
    pub fn open(initiator: PlayerId, run_color: Color, first: Card) -> Self {
        assert!(!run_color.is_wild(), "a run needs a concrete colour");
        Self {
            initiator,
            run_color,
            cards_played: 1,
            last_card: first,
        }
    }

    /// Whether `card` may extend this run.
    #[inline]
    pub fn accepts(&self, card: &Card) -> bool {
        card.color() == self.run_color || card.is_wild()
    }

    pub fn push(&mut self, card: Card) {
        debug_assert!(self.accepts(&card), "run card must match the run colour");
        self.cards_played += 1;
        self.last_card = card;
    }

    pub fn initiator(&self) -> PlayerId {
        self.initiator
    }

    pub fn run_color(&self) -> Color {
        self.run_color
    }

    pub fn cards_played(&self) -> u32 {
        self.cards_played
    }

    pub fn last_card(&self) -> Card {
        self.last_card
    }

    pub fn view(&self) -> SequenceView {
        SequenceView {
            initiator: self.initiator,
            run_color: self.run_color,
            cards_played: self.cards_played,
            last_card: self.last_card,
        }
    }

    /// Closes the run, reporting whether the engine forced the close.
    pub fn finish(self, forced: bool) -> RunEnded {
        RunEnded {
            forced,
            card_count: self.cards_played,
            run_color: self.run_color,
            last_card: self.last_card,
        }
    }
}

/// Read-only copy of a run for views and strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceView {
    pub initiator: PlayerId,
    pub run_color: Color,
    pub cards_played: u32,
    pub last_card: Card,
}

/// Reported once a run closes, whether ended by the player or forced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEnded {
    pub forced: bool,
    pub card_count: u32,
    pub run_color: Color,
    pub last_card: Card,
}
