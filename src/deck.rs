use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::{Card, full_deck};
use crate::error::DeckError;

/// Card supply the rule engine draws from and discards onto.
///
/// The engine never looks inside; it only draws, discards, asks for a
/// reshuffle when the draw pile runs dry and puts cards back when an
/// all-or-nothing penalty draw cannot be completed.
pub trait Deck {
    fn draw_one(&mut self) -> Result<Card, DeckError>;

    fn discard(&mut self, card: Card);

    /// Moves every discarded card except the current top back into the draw pile.
    fn reshuffle_from_discard_except_top(&mut self) -> Result<(), DeckError>;

    /// Returns cards drawn during a failed penalty draw, given in the order
    /// they were drawn; the first of them must be the next card drawn.
    fn restore(&mut self, cards: Vec<Card>);

    /// Must be exact: the engine rejects penalty draws it cannot cover by
    /// comparing these counts before it draws anything.
    fn draw_pile_len(&self) -> usize;

    fn discard_pile_len(&self) -> usize;
}

/// Seeded draw pile plus discard pile.
#[derive(Clone)]
pub struct ShuffledDeck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: StdRng,
}

impl ShuffledDeck {
    /// Full deck shuffled with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut draw_pile = full_deck();
        draw_pile.shuffle(&mut rng);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            rng,
        }
    }

    /// Unshuffled deck where `draw_order[0]` is drawn first.
    pub fn stacked(mut draw_order: Vec<Card>, seed: u64) -> Self {
        draw_order.reverse();
        Self {
            draw_pile: draw_order,
            discard_pile: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }
}

impl Deck for ShuffledDeck {
    fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.draw_pile.pop().ok_or(DeckError::Empty)
    }

    fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn reshuffle_from_discard_except_top(&mut self) -> Result<(), DeckError> {
        let Some(top) = self.discard_pile.pop() else {
            return Err(DeckError::StillEmpty);
        };
        if self.discard_pile.is_empty() {
            self.discard_pile.push(top);
            return Err(DeckError::StillEmpty);
        }
        let mut recycled = std::mem::take(&mut self.discard_pile);
        recycled.shuffle(&mut self.rng);
        // Recycled cards go underneath whatever is still waiting to be drawn.
        recycled.append(&mut self.draw_pile);
        self.draw_pile = recycled;
        self.discard_pile.push(top);
        log::info!("reshuffled discard pile, {} cards to draw", self.draw_pile.len());
        Ok(())
    }

    fn restore(&mut self, cards: Vec<Card>) {
        self.draw_pile.extend(cards.into_iter().rev());
    }

    fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }
}
