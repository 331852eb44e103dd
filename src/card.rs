use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Colour printed on a card. `Wild` cards carry no colour of their own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Color {
    /// The four colours a player may name when a colour choice is pending.
    pub const CHOOSABLE: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    #[inline]
    pub fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Wild => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// Face of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Number,
    /// Keeps the turn and demands one more play or draw.
    Plus,
    /// Opens a draw chain against the other player.
    PlusTwo,
    Stop,
    Reverse,
    ChangeColor,
    /// Opens a same-colour run.
    Run,
    /// Wild run; the player names the run colour.
    SuperRun,
}

impl Kind {
    #[inline]
    pub fn is_wild_kind(self) -> bool {
        matches!(self, Kind::ChangeColor | Kind::SuperRun)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Number => "Number",
            Kind::Plus => "Plus",
            Kind::PlusTwo => "+2",
            Kind::Stop => "Stop",
            Kind::Reverse => "Reverse",
            Kind::ChangeColor => "ChangeColor",
            Kind::Run => "Run",
            Kind::SuperRun => "SuperRun",
        };
        f.write_str(name)
    }
}

pub const MIN_RANK: u8 = 0;
pub const MAX_RANK: u8 = 9;
pub const COPIES_PER_RANK: usize = 2;
pub const COPIES_PER_ACTION: usize = 2;
pub const WILD_COPIES: usize = 4;
pub const HAND_SIZE: usize = 7;
/// Cards added to the chain penalty by each stacked `PlusTwo`.
pub const PER_CARD_PENALTY: u32 = 2;
pub const DECK_SIZE: usize = 124;

const COLORED_ACTIONS: [Kind; 5] = [Kind::Plus, Kind::PlusTwo, Kind::Stop, Kind::Reverse, Kind::Run];

/// Immutable card value. Two cards with equal fields are interchangeable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    color: Color,
    kind: Kind,
    rank: Option<u8>,
}

impl Card {
    /// Numbered card. Panics on a wild colour or a rank outside `0..=9`.
    pub fn number(color: Color, rank: u8) -> Self {
        Self::try_new(color, Kind::Number, Some(rank)).expect("invalid number card")
    }

    /// Coloured special card such as `Plus`, `PlusTwo`, `Stop`, `Reverse` or `Run`.
    pub fn action(color: Color, kind: Kind) -> Self {
        Self::try_new(color, kind, None).expect("invalid coloured action card")
    }

    /// `ChangeColor` or `SuperRun`.
    pub fn wild(kind: Kind) -> Self {
        Self::try_new(Color::Wild, kind, None).expect("invalid wild card")
    }

    /// Checked constructor for untrusted input.
    pub fn try_new(color: Color, kind: Kind, rank: Option<u8>) -> Result<Self, CardError> {
        match (kind, rank) {
            (Kind::Number, None) => return Err(CardError::MissingRank),
            (Kind::Number, Some(r)) if r > MAX_RANK => return Err(CardError::RankOutOfRange(r)),
            (Kind::Number, Some(_)) => {}
            (_, Some(_)) => return Err(CardError::UnexpectedRank(kind)),
            (_, None) => {}
        }
        if color.is_wild() != kind.is_wild_kind() {
            return Err(CardError::ColorMismatch { color, kind });
        }
        Ok(Self { color, kind, rank })
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn rank(&self) -> Option<u8> {
        self.rank
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color.is_wild()
    }

    /// True when a successful play keeps the turn with the same player.
    #[inline]
    pub fn is_continuation(&self) -> bool {
        matches!(self.kind, Kind::Plus | Kind::Stop | Kind::Reverse)
    }

    /// Everything that is not a plain number.
    #[inline]
    pub fn is_special(&self) -> bool {
        !matches!(self.kind, Kind::Number)
    }

    /// Penalty points a card is worth when left in the losing hand.
    pub fn points(&self) -> u32 {
        match (self.kind, self.rank) {
            (Kind::Number, Some(rank)) => u32::from(rank),
            _ if self.is_wild() => 50,
            _ => 20,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.rank) {
            (Kind::Number, Some(rank)) => write!(f, "{} {}", self.color, rank),
            _ if self.is_wild() => write!(f, "{}", self.kind),
            _ => write!(f, "{} {}", self.color, self.kind),
        }
    }
}

/// Builds the full 124-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::CHOOSABLE {
        deck.push(Card::number(color, MIN_RANK));
        for rank in (MIN_RANK + 1)..=MAX_RANK {
            for _ in 0..COPIES_PER_RANK {
                deck.push(Card::number(color, rank));
            }
        }
        for kind in COLORED_ACTIONS {
            for _ in 0..COPIES_PER_ACTION {
                deck.push(Card::action(color, kind));
            }
        }
    }
    for kind in [Kind::ChangeColor, Kind::SuperRun] {
        deck.extend(std::iter::repeat(Card::wild(kind)).take(WILD_COPIES));
    }
    deck
}
