//! Scoring for finished games.
//!
//! Winner-only rule: the winner scores the face value of every card left in
//! the loser's hand (numbers count their rank, coloured specials 20, wilds 50).
//! The loser scores nothing and unfinished games score nothing.

use crate::card::Card;
use crate::deck::Deck;
use crate::game::RuleEngine;

/// Points carried by a set of cards left in hand.
pub fn hand_points(cards: &[Card]) -> u32 {
    cards.iter().map(Card::points).sum()
}

/// Points awarded to the winner of a finished game, or `None` while it is running.
pub fn winner_points<D: Deck>(engine: &RuleEngine<D>) -> Option<u32> {
    let winner = engine.winner()?;
    Some(engine.hand(winner.other()).points())
}
