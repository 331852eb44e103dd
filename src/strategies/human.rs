use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::card::Color;
use crate::state::{GameView, InteractionState};
use crate::strategy::Strategy;
use crate::visualize::{describe_action, render_view};

/// Strategy that asks a person at the terminal.
///
/// Besides the listed index, `d` draws, `e` ends a run and a colour name
/// answers a colour prompt.
pub struct HumanStrategy {
    name: String,
}

/// What one line of input asked for.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Pick(Action),
    Help,
    Quit,
    Unknown(String),
}

impl HumanStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, view: &GameView, legal_actions: &[Action]) {
        println!("\n--- {} to act as {} ---", self.name, view.perspective);
        println!("{}", render_view(view));
        for (index, action) in legal_actions.iter().enumerate() {
            println!("  {index:>2}) {}", describe_action(view, action));
        }
        print!("> ");
        let _ = io::stdout().flush();
    }

    fn hint(view: &GameView) -> &'static str {
        match view.interaction_state {
            InteractionState::Normal => "Play a listed card or 'd' to draw one.",
            InteractionState::ColorPending => "Name a colour: red, blue, green or yellow.",
            InteractionState::RunActive => "Keep playing run-colour cards, or 'e' to end the run.",
            InteractionState::ChainActive => "Stack a +2, or 'd' to take the whole penalty.",
        }
    }
}

fn parse_reply(line: &str, legal_actions: &[Action]) -> Reply {
    let text = line.trim().to_ascii_lowercase();
    let wanted = match text.as_str() {
        "q" | "quit" => return Reply::Quit,
        "?" | "h" | "help" => return Reply::Help,
        "d" | "draw" => Some(Action::Draw),
        "e" | "end" => Some(Action::EndRun),
        "red" => Some(Action::ChooseColor(Color::Red)),
        "blue" => Some(Action::ChooseColor(Color::Blue)),
        "green" => Some(Action::ChooseColor(Color::Green)),
        "yellow" => Some(Action::ChooseColor(Color::Yellow)),
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|index| legal_actions.get(index).copied()),
    };
    match wanted {
        Some(action) if legal_actions.contains(&action) => Reply::Pick(action),
        _ => Reply::Unknown(text),
    }
}

impl Default for HumanStrategy {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Strategy for HumanStrategy {
    fn decide(&mut self, view: &GameView, legal_actions: &[Action]) -> Action {
        let stdin = io::stdin();
        loop {
            self.prompt(view, legal_actions);
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // Closed input counts as leaving the table.
                Ok(0) => std::process::exit(0),
                Ok(_) => {}
                Err(err) => {
                    eprintln!("could not read input: {err}");
                    continue;
                }
            }
            match parse_reply(&line, legal_actions) {
                Reply::Pick(action) => return action,
                Reply::Help => println!("{}", Self::hint(view)),
                Reply::Quit => std::process::exit(0),
                Reply::Unknown(text) => println!("'{text}' is not one of the choices."),
            }
        }
    }
}
