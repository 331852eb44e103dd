use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Unordered multiset of cards held by one player.
///
/// Insertion order is kept only so that views render stably; no rule depends on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Removes one copy of `card`. Returns false when the hand holds none.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|held| held == card) {
            Some(index) => {
                self.cards.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn count(&self, card: &Card) -> usize {
        self.cards.iter().filter(|held| *held == card).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Any card that may extend a run of `run_color`.
    pub fn has_run_card(&self, run_color: Color) -> bool {
        self.cards
            .iter()
            .any(|card| card.color() == run_color || card.is_wild())
    }

    /// Count of cards per colour, indexed Red, Blue, Green, Yellow, Wild.
    pub fn color_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for card in &self.cards {
            counts[card.color().index()] += 1;
        }
        counts
    }

    pub fn points(&self) -> u32 {
        self.cards.iter().map(Card::points).sum()
    }
}
