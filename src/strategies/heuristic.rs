use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::Action;
use crate::card::{Card, Color, Kind};
use crate::hand::Hand;
use crate::state::{GameView, InteractionState};
use crate::strategy::{Strategy, StrategyConfig};

/// Rule-based computer opponent.
///
/// In plain English:
/// - When a colour must be named, name the colour we hold most of.
/// - Answer a draw chain with a +2 when we hold one, otherwise take the cards.
/// - Inside a run, shed plain run-colour cards first and keep a continuation
///   card for last so the turn stays with us once the run closes. Wild cards
///   are saved unless the config says to spend them.
/// - Otherwise, most of the time (`special_preference`) reach for a special
///   card; else dump the highest number in our strongest colour. Wild cards
///   go last. Against a nearly empty opposing hand, attack with specials.
/// - Draw only when nothing can be played.
pub struct HeuristicStrategy {
    config: StrategyConfig,
    rng: StdRng,
}

impl HeuristicStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    fn plays(legal_actions: &[Action]) -> impl Iterator<Item = Card> + '_ {
        legal_actions.iter().filter_map(Action::card)
    }

    /// Colour with the most cards in `hand`; the first such colour on ties.
    fn strongest_color(hand: &Hand) -> Option<Color> {
        let counts = hand.color_counts();
        Color::CHOOSABLE
            .into_iter()
            .filter(|color| counts[color.index()] > 0)
            .max_by(|a, b| {
                counts[a.index()]
                    .cmp(&counts[b.index()])
                    .then_with(|| b.index().cmp(&a.index()))
            })
    }

    fn choose_color(&mut self, view: &GameView) -> Color {
        let hand = Hand::from_cards(view.hand.clone());
        Self::strongest_color(&hand).unwrap_or_else(|| {
            let pick = self.rng.gen_range(0..Color::CHOOSABLE.len());
            Color::CHOOSABLE[pick]
        })
    }

    fn respond_to_chain(&self, view: &GameView, legal_actions: &[Action]) -> Option<Action> {
        let stack = Self::plays(legal_actions).find(|card| card.kind() == Kind::PlusTwo);
        let danger = view.opponent_hand_size <= 2;
        match stack {
            Some(card) if self.config.always_stack_chain || danger => Some(Action::Play(card)),
            _ => legal_actions
                .iter()
                .find(|action| matches!(action, Action::Draw))
                .copied(),
        }
    }

    fn continue_run(&self, legal_actions: &[Action]) -> Action {
        let mut colored: Vec<Card> = Self::plays(legal_actions)
            .filter(|card| !card.is_wild())
            .collect();
        // Plain cards first, continuation cards last, higher ranks before lower.
        colored.sort_by_key(|card| (card.is_continuation(), std::cmp::Reverse(card.rank())));
        if let Some(card) = colored.first() {
            return Action::Play(*card);
        }
        if self.config.spend_wilds_in_run {
            if let Some(card) = Self::plays(legal_actions).find(Card::is_wild) {
                return Action::Play(card);
            }
        }
        Action::EndRun
    }

    fn special_score(card: &Card, view: &GameView, hand: &Hand) -> i32 {
        let counts = hand.color_counts();
        let same_color = counts[card.color().index()] as i32;
        let under_pressure = view.opponent_hand_size <= 2;
        match card.kind() {
            // A run is worth more the more same-coloured cards it can shed.
            Kind::Run => 10 + 6 * (same_color - 1),
            Kind::PlusTwo if under_pressure => 40,
            Kind::PlusTwo => 15,
            Kind::Stop | Kind::Reverse if under_pressure => 30,
            Kind::Stop | Kind::Reverse => 12,
            Kind::Plus => 8,
            _ => 0,
        }
    }

    fn number_score(card: &Card, hand: &Hand) -> i32 {
        let counts = hand.color_counts();
        let same_color = counts[card.color().index()] as i32;
        same_color * 10 + i32::from(card.rank().unwrap_or(0))
    }

    fn wild_score(card: &Card, hand: &Hand) -> i32 {
        let deepest = hand.color_counts()[..4].iter().copied().max().unwrap_or(0) as i32;
        match card.kind() {
            Kind::SuperRun if deepest >= 2 => 10 + deepest,
            Kind::SuperRun => 0,
            _ => 5,
        }
    }

    fn normal_play(&mut self, view: &GameView, legal_actions: &[Action]) -> Option<Action> {
        let hand = Hand::from_cards(view.hand.clone());
        let plays: Vec<Card> = Self::plays(legal_actions).collect();
        let best_special = plays
            .iter()
            .filter(|card| card.is_special() && !card.is_wild())
            .max_by_key(|card| Self::special_score(card, view, &hand))
            .copied();
        let best_number = plays
            .iter()
            .filter(|card| card.kind() == Kind::Number)
            .max_by_key(|card| Self::number_score(card, &hand))
            .copied();
        let best_wild = plays
            .iter()
            .filter(|card| card.is_wild())
            .max_by_key(|card| Self::wild_score(card, &hand))
            .copied();

        let preference = self.config.special_preference.clamp(0.0, 1.0);
        let prefer_special = view.opponent_hand_size <= 2 || self.rng.gen_bool(preference);
        let ordered = if prefer_special {
            [best_special, best_number, best_wild]
        } else {
            [best_number, best_special, best_wild]
        };
        ordered.into_iter().flatten().next().map(Action::Play)
    }
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

impl Strategy for HeuristicStrategy {
    fn decide(&mut self, view: &GameView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "heuristic strategy requires at least one legal action"
        );
        let chosen = match view.interaction_state {
            InteractionState::ColorPending => Some(Action::ChooseColor(self.choose_color(view))),
            InteractionState::ChainActive => self.respond_to_chain(view, legal_actions),
            InteractionState::RunActive => Some(self.continue_run(legal_actions)),
            InteractionState::Normal => self.normal_play(view, legal_actions),
        };
        match chosen {
            Some(action) if legal_actions.contains(&action) => action,
            _ => legal_actions
                .iter()
                .find(|action| matches!(action, Action::Draw))
                .copied()
                .unwrap_or(legal_actions[0]),
        }
    }
}
