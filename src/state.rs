use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayerId};
use crate::card::{Card, HAND_SIZE, PER_CARD_PENALTY};
use crate::chain::ChainView;
use crate::error::GameError;
use crate::sequence::{RunEnded, SequenceView};
use crate::validator::DiscardTop;

/// Constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub hand_size: usize,
    pub per_card_penalty: u32,
}

impl GameSettings {
    pub fn new(hand_size: usize, per_card_penalty: u32) -> Result<Self, GameError> {
        if hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if per_card_penalty == 0 {
            return Err(GameError::InvalidConfiguration(
                "a +2 chain must cost at least one card",
            ));
        }
        Ok(Self {
            hand_size,
            per_card_penalty,
        })
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            hand_size: HAND_SIZE,
            per_card_penalty: PER_CARD_PENALTY,
        }
    }
}

/// Who may currently submit an action.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnState {
    PlayerTurn,
    OpponentTurn,
    /// Setup and teardown only.
    Neutral,
}

impl TurnState {
    pub fn of(player: PlayerId) -> Self {
        match player {
            PlayerId::Player => TurnState::PlayerTurn,
            PlayerId::Opponent => TurnState::OpponentTurn,
        }
    }

    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            TurnState::PlayerTurn => Some(PlayerId::Player),
            TurnState::OpponentTurn => Some(PlayerId::Opponent),
            TurnState::Neutral => None,
        }
    }
}

/// Which sub-protocol constrains the legal actions right now.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InteractionState {
    Normal,
    ColorPending,
    RunActive,
    ChainActive,
}

/// Lifecycle flag, orthogonal to turn and interaction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Paused,
    Ended,
}

/// What a paused game was waiting for, kept so a driver can re-decide after resume.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeContext {
    pub awaiting: Option<PlayerId>,
    pub interaction: InteractionState,
    pub revision: u64,
}

/// Public state after an action, safe to show either player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub status: GameStatus,
    pub turn: TurnState,
    pub interaction: InteractionState,
    pub discard_top: DiscardTop,
    /// Hand sizes indexed Player, Opponent.
    pub hand_sizes: [usize; 2],
    pub draw_pile_count: usize,
    pub chain: Option<ChainView>,
    pub sequence: Option<SequenceView>,
    pub pending_bonus: bool,
    pub winner: Option<PlayerId>,
    pub revision: u64,
}

impl Snapshot {
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.hand_sizes[player.index()]
    }
}

/// Everything one player may see, handed to strategies and UIs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameView {
    pub perspective: PlayerId,
    pub hand: Vec<Card>,
    pub opponent_hand_size: usize,
    pub discard_top: DiscardTop,
    pub status: GameStatus,
    pub turn: TurnState,
    pub interaction_state: InteractionState,
    pub chain_info: Option<ChainView>,
    pub sequence_info: Option<SequenceView>,
    pub pending_bonus: bool,
    pub draw_pile_count: usize,
    pub winner: Option<PlayerId>,
}

impl GameView {
    /// True when the viewing player holds authority to act.
    pub fn is_my_move(&self) -> bool {
        if self.status != GameStatus::Active {
            return false;
        }
        let authorized = match (self.chain_info, self.sequence_info) {
            (Some(chain), _) => Some(chain.responder),
            (_, Some(run)) => Some(run.initiator),
            _ => self.turn.active_player(),
        };
        authorized == Some(self.perspective)
    }
}

/// Observable consequences of one accepted action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub actor: PlayerId,
    pub action: Action,
    pub cards_drawn: u32,
    /// Authority to act moved to the other player.
    pub turn_advanced: bool,
    pub color_prompt_required: bool,
    pub game_ended: Option<PlayerId>,
    pub run_ended: Option<RunEnded>,
    pub reshuffled: bool,
    pub snapshot: Snapshot,
}

impl Outcome {
    /// Card that landed on the discard pile, if any.
    pub fn played(&self) -> Option<Card> {
        self.action.card()
    }
}
