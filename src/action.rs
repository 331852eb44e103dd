use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// One of the two seats at the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// The local (usually human) player.
    Player,
    /// The computer or remote opponent.
    Opponent,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::Player, PlayerId::Opponent];

    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerId::Player => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Player,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::Player => 0,
            PlayerId::Opponent => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Player => f.write_str("Player"),
            PlayerId::Opponent => f.write_str("Opponent"),
        }
    }
}

/// Action submitted to the rule engine by a UI, strategy or remote proxy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the actor's hand onto the discard pile.
    Play(Card),
    /// Draw a card, or the full penalty when answering a draw chain.
    Draw,
    /// Name the active colour after a colour-changing card.
    ChooseColor(Color),
    /// Voluntarily close the actor's open run.
    EndRun,
}

impl Action {
    /// Returns the card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play(card) => Some(*card),
            _ => None,
        }
    }
}
