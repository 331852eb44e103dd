//! Rule engine for a two-player UNO-style card game with +2 draw chains and
//! same-colour runs, plus pluggable strategies for the computer opponent.

pub mod action;
pub mod card;
pub mod chain;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod score;
pub mod sequence;
pub mod state;
pub mod strategies;
pub mod strategy;
pub mod table;
pub mod validator;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::card::{Card, Color, Kind, full_deck};
pub use crate::chain::{ChainTracker, ChainView};
pub use crate::deck::{Deck, ShuffledDeck};
pub use crate::error::{CardError, DeckError, GameError, RuleError, TableError};
pub use crate::game::{GameBuilder, GameConfig, RuleEngine};
pub use crate::hand::Hand;
pub use crate::score::{hand_points, winner_points};
pub use crate::sequence::{RunEnded, SequenceTracker, SequenceView};
pub use crate::state::{
    GameSettings, GameStatus, GameView, InteractionState, Outcome, ResumeContext, Snapshot,
    TurnState,
};
pub use crate::strategies::{
    HeuristicStrategy, HumanStrategy, RandomStrategy, create_strategy_from_spec, label_for_spec,
};
pub use crate::strategy::{Strategy, StrategyConfig};
pub use crate::table::{Committed, OpponentDriver, Step, Table};
pub use crate::validator::{DiscardTop, is_legal};
pub use crate::visualize::{VisualOptions, describe_action, describe_outcome, render_view};
