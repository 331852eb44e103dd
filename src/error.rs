use thiserror::Error;

use crate::card::{Color, Kind};

/// Reasons the rule engine refuses an action. The engine state is untouched
/// whenever one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("game is paused or has ended")]
    NotActive,
    #[error("the acting player is not authorized to act now")]
    WrongActor,
    #[error("card cannot be played on the current discard")]
    IllegalCard,
    /// Never produced: `Action::Draw` carries no count, so a draw can never
    /// mismatch the penalty owed. Kept so callers can match the full set of
    /// rule failures.
    #[error("drawing is not allowed right now")]
    IllegalDraw,
    #[error("no colour choice is pending")]
    NoColorChoicePending,
    #[error("a colour must be chosen before anything else")]
    ColorChoiceRequired,
    #[error("{0} is not a colour that can be named")]
    InvalidColorChoice(Color),
    #[error("the draw chain must be answered with a +2 or a draw")]
    ChainResponseRequired,
    #[error("the open run must be continued or ended")]
    RunContinuationRequired,
    #[error("there is no open run to end")]
    NoRunActive,
    #[error("a bonus play or draw is owed before the turn can end")]
    BonusActionRequired,
    #[error("card is not in the acting player's hand")]
    CardNotInHand,
    #[error("deck cannot supply the required cards even after reshuffling")]
    DeckExhausted,
}

/// Errors raised by the deck collaborator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    #[error("draw pile is empty")]
    Empty,
    #[error("nothing to reshuffle: draw and discard piles are both empty")]
    StillEmpty,
}

/// Card construction rejected because it would break a card invariant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    #[error("number cards need a rank")]
    MissingRank,
    #[error("rank {0} is out of range")]
    RankOutOfRange(u8),
    #[error("{0} cards carry no rank")]
    UnexpectedRank(Kind),
    #[error("colour {color} does not fit a {kind} card")]
    ColorMismatch { color: Color, kind: Kind },
}

/// Errors raised while setting a game up.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Errors surfaced by the shared table layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("another action is already in flight")]
    Busy,
}
