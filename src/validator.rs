use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, Kind};

/// The most recently played card and the colour currently governing play.
///
/// `active_color` differs from `card.color()` after a colour change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardTop {
    pub card: Card,
    pub active_color: Color,
}

impl DiscardTop {
    pub fn new(card: Card, active_color: Color) -> Self {
        Self { card, active_color }
    }

    /// A freshly revealed card whose own colour governs.
    pub fn revealed(card: Card) -> Self {
        Self {
            card,
            active_color: card.color(),
        }
    }
}

/// Plain legality of `card` on `top`, ignoring any open chain or run.
#[inline]
pub fn is_legal(card: &Card, top: &DiscardTop) -> bool {
    if card.is_wild() {
        return true;
    }
    if card.color() == top.active_color {
        return true;
    }
    if card.kind() == Kind::Number && top.card.kind() == Kind::Number {
        return card.rank() == top.card.rank();
    }
    card.kind() == top.card.kind() && card.kind() != Kind::Number
}

/// Cards in `hand` that [`is_legal`] accepts, in hand order.
pub fn legal_cards<'a>(
    hand: impl IntoIterator<Item = &'a Card>,
    top: &'a DiscardTop,
) -> impl Iterator<Item = &'a Card> {
    hand.into_iter().filter(move |card| is_legal(card, top))
}
