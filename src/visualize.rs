use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::state::{GameStatus, GameView, InteractionState, Outcome};

/// Customize view rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_hand_indices: bool,
    pub show_deck_size: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hand_indices: true,
            show_deck_size: true,
        }
    }
}

pub fn render_view(view: &GameView) -> String {
    render_view_with_options(view, VisualOptions::default())
}

pub fn render_view_with_options(view: &GameView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match (view.status, view.winner) {
        (GameStatus::Active, _) => String::from("Active"),
        (GameStatus::Paused, _) => String::from("Paused"),
        (GameStatus::Ended, Some(winner)) => format!("Ended (winner: {winner})"),
        (GameStatus::Ended, None) => String::from("Ended"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(
        out,
        "Turn: {:?}{}",
        view.turn,
        if view.is_my_move() { " (You)" } else { "" }
    );
    let top = &view.discard_top;
    if top.card.is_wild() {
        let _ = writeln!(out, "Discard: {} (colour {})", top.card, top.active_color);
    } else {
        let _ = writeln!(out, "Discard: {}", top.card);
    }
    match view.interaction_state {
        InteractionState::Normal if view.pending_bonus => {
            let _ = writeln!(out, "Bonus play or draw owed");
        }
        InteractionState::Normal => {}
        InteractionState::ColorPending => {
            let _ = writeln!(out, "Waiting for a colour choice");
        }
        InteractionState::ChainActive => {
            if let Some(chain) = view.chain_info {
                let _ = writeln!(
                    out,
                    "+2 chain: {} stacked, {} to draw, {} must answer",
                    chain.stacked_count, chain.total_penalty, chain.responder
                );
            }
        }
        InteractionState::RunActive => {
            if let Some(run) = view.sequence_info {
                let _ = writeln!(
                    out,
                    "{} run by {}: {} cards, last {}",
                    run.run_color, run.initiator, run.cards_played, run.last_card
                );
            }
        }
    }
    if options.show_deck_size {
        let _ = writeln!(out, "Draw pile: {}", view.draw_pile_count);
    }
    let _ = writeln!(out, "Opponent hand size: {}", view.opponent_hand_size);
    if view.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries = view
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                if options.show_hand_indices {
                    format!("{idx}:{}", format_card(card))
                } else {
                    format_card(card)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Hand: {entries}");
    }
    out
}

pub fn describe_action(view: &GameView, action: &Action) -> String {
    match action {
        Action::Play(card) => {
            if view.interaction_state == InteractionState::ChainActive {
                format!("Stack {} on the chain", format_card(card))
            } else {
                format!("Play {}", format_card(card))
            }
        }
        Action::Draw => match view.chain_info {
            Some(chain) if view.interaction_state == InteractionState::ChainActive => {
                format!("Draw {} penalty cards", chain.total_penalty)
            }
            _ => String::from("Draw a card"),
        },
        Action::ChooseColor(color) => format!("Choose {color}"),
        Action::EndRun => String::from("End run"),
    }
}

/// One-line summary of an accepted action for logs and spectators.
pub fn describe_outcome(outcome: &Outcome) -> String {
    let mut parts = vec![match outcome.action {
        Action::Play(card) => format!("{} played {}", outcome.actor, format_card(&card)),
        Action::Draw => format!("{} drew {}", outcome.actor, outcome.cards_drawn),
        Action::ChooseColor(color) => format!("{} chose {color}", outcome.actor),
        Action::EndRun => format!("{} ended the run", outcome.actor),
    }];
    if outcome.reshuffled {
        parts.push(String::from("discard pile reshuffled"));
    }
    if let Some(run) = outcome.run_ended {
        let how = if run.forced { "forced" } else { "voluntary" };
        parts.push(format!(
            "{} run of {} ended ({how})",
            run.run_color, run.card_count
        ));
    }
    if outcome.color_prompt_required {
        parts.push(String::from("colour choice required"));
    }
    if let Some(winner) = outcome.game_ended {
        parts.push(format!("{winner} wins"));
    } else if outcome.turn_advanced {
        parts.push(String::from("turn passes"));
    }
    parts.join("; ")
}

fn format_card(card: &Card) -> String {
    card.to_string()
}
