use crate::action::{Action, PlayerId};
use crate::card::{Card, Color, HAND_SIZE, Kind, PER_CARD_PENALTY};
use crate::chain::ChainTracker;
use crate::deck::{Deck, ShuffledDeck};
use crate::error::{DeckError, GameError, RuleError};
use crate::hand::Hand;
use crate::sequence::{RunEnded, SequenceTracker};
use crate::state::{
    GameSettings, GameStatus, GameView, InteractionState, Outcome, ResumeContext, Snapshot,
    TurnState,
};
use crate::validator::{DiscardTop, is_legal, legal_cards};

const DEFAULT_SEED: u64 = 0x5EED_C0DE_5EED_C0DE;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub hand_size: usize,
    /// Cards owed per `PlusTwo` on a draw chain.
    pub per_card_penalty: u32,
    pub starting_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_size: HAND_SIZE,
            per_card_penalty: PER_CARD_PENALTY,
            starting_player: PlayerId::Player,
        }
    }
}

/// Builder that enables deterministic deck, hand and starter injection for tests.
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
    hands: Option<[Vec<Card>; 2]>,
    starter: Option<Card>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn with_per_card_penalty(mut self, per_card_penalty: u32) -> Self {
        self.config.per_card_penalty = per_card_penalty;
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.config.starting_player = player;
        self
    }

    /// Replace the shuffled deck with `draw_order`, drawn front to back.
    pub fn with_deck(mut self, draw_order: Vec<Card>) -> Self {
        self.deck = Some(draw_order);
        self
    }

    /// Skip dealing and hand these cards to the players.
    pub fn with_hands(mut self, player: Vec<Card>, opponent: Vec<Card>) -> Self {
        self.hands = Some([player, opponent]);
        self
    }

    /// Skip revealing a starter from the deck and open with `card` instead.
    pub fn with_starter(mut self, card: Card) -> Self {
        self.starter = Some(card);
        self
    }

    pub fn build(self) -> Result<RuleEngine, GameError> {
        let deck = match &self.deck {
            Some(cards) => ShuffledDeck::stacked(cards.clone(), self.config.seed),
            None => ShuffledDeck::new(self.config.seed),
        };
        self.build_with(deck)
    }

    /// Build on top of a caller-supplied deck collaborator.
    pub fn build_with<D: Deck>(self, deck: D) -> Result<RuleEngine<D>, GameError> {
        RuleEngine::setup(self, deck)
    }
}

/// Why a colour choice is pending; decides what happens once it is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColorPurpose {
    ChangeColor,
    SuperRun,
    RunEnd,
    Starter,
}

/// Interaction state together with the data each sub-protocol needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interaction {
    Normal,
    ColorPending(ColorPurpose),
    Run(SequenceTracker),
    Chain(ChainTracker),
}

impl Interaction {
    fn state(&self) -> InteractionState {
        match self {
            Interaction::Normal => InteractionState::Normal,
            Interaction::ColorPending(_) => InteractionState::ColorPending,
            Interaction::Run(_) => InteractionState::RunActive,
            Interaction::Chain(_) => InteractionState::ChainActive,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Active,
    Paused(ResumeContext),
    Ended { winner: PlayerId },
}

/// Consequences collected while an action resolves.
#[derive(Default)]
struct Effects {
    cards_drawn: u32,
    color_prompt_required: bool,
    game_ended: Option<PlayerId>,
    run_ended: Option<RunEnded>,
    reshuffled: bool,
}

/// Turn and rule engine for a two-player game.
///
/// `apply` is the only mutation surface. Every call validates fully before
/// touching state, so a returned [`RuleError`] leaves the engine unchanged.
#[derive(Clone)]
pub struct RuleEngine<D = ShuffledDeck> {
    settings: GameSettings,
    lifecycle: Lifecycle,
    turn: TurnState,
    interaction: Interaction,
    hands: [Hand; 2],
    top: DiscardTop,
    pending_bonus: bool,
    deck: D,
    revision: u64,
}

impl RuleEngine<ShuffledDeck> {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder::from_config(config).build()
    }
}

impl<D: Deck> RuleEngine<D> {
    pub fn status(&self) -> GameStatus {
        match self.lifecycle {
            Lifecycle::Active => GameStatus::Active,
            Lifecycle::Paused(_) => GameStatus::Paused,
            Lifecycle::Ended { .. } => GameStatus::Ended,
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.active_player()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn discard_top(&self) -> DiscardTop {
        self.top
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player.index()]
    }

    pub fn chain(&self) -> Option<&ChainTracker> {
        match &self.interaction {
            Interaction::Chain(chain) => Some(chain),
            _ => None,
        }
    }

    pub fn sequence(&self) -> Option<&SequenceTracker> {
        match &self.interaction {
            Interaction::Run(run) => Some(run),
            _ => None,
        }
    }

    pub fn pending_bonus(&self) -> bool {
        self.pending_bonus
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.lifecycle {
            Lifecycle::Ended { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ended { .. })
    }

    /// Bumped by every successful mutation, pause and resume.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn deck(&self) -> &D {
        &self.deck
    }

    /// Party allowed to act now. A chain responder or run initiator takes
    /// precedence over the plain turn holder.
    pub fn authorized_actor(&self) -> Option<PlayerId> {
        match &self.interaction {
            Interaction::Chain(chain) => Some(chain.responder()),
            Interaction::Run(run) => Some(run.initiator()),
            _ => self.turn.active_player(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status(),
            turn: self.turn,
            interaction: self.interaction.state(),
            discard_top: self.top,
            hand_sizes: [self.hands[0].len(), self.hands[1].len()],
            draw_pile_count: self.deck.draw_pile_len(),
            chain: self.chain().map(ChainTracker::view),
            sequence: self.sequence().map(SequenceTracker::view),
            pending_bonus: self.pending_bonus,
            winner: self.winner(),
            revision: self.revision,
        }
    }

    pub fn view(&self, perspective: PlayerId) -> GameView {
        GameView {
            perspective,
            hand: self.hand(perspective).as_slice().to_vec(),
            opponent_hand_size: self.hand(perspective.other()).len(),
            discard_top: self.top,
            status: self.status(),
            turn: self.turn,
            interaction_state: self.interaction.state(),
            chain_info: self.chain().map(ChainTracker::view),
            sequence_info: self.sequence().map(SequenceTracker::view),
            pending_bonus: self.pending_bonus,
            draw_pile_count: self.deck.draw_pile_len(),
            winner: self.winner(),
        }
    }

    /// Every action `apply` would accept from `actor` right now.
    pub fn legal_actions(&self, actor: PlayerId) -> Result<Vec<Action>, RuleError> {
        if self.status() != GameStatus::Active {
            return Ok(Vec::new());
        }
        if self.authorized_actor() != Some(actor) {
            return Err(RuleError::WrongActor);
        }
        let hand = self.hand(actor);
        let mut actions = Vec::new();
        let mut push_play = |card: &Card| {
            let action = Action::Play(*card);
            if !actions.contains(&action) {
                actions.push(action);
            }
        };
        match &self.interaction {
            Interaction::Normal => {
                legal_cards(hand.iter(), &self.top).for_each(&mut push_play);
                if self.can_supply(1) {
                    actions.push(Action::Draw);
                }
            }
            Interaction::ColorPending(_) => {
                actions.extend(Color::CHOOSABLE.into_iter().map(Action::ChooseColor));
            }
            Interaction::Run(run) => {
                hand.iter()
                    .filter(|card| run.accepts(card))
                    .for_each(&mut push_play);
                actions.push(Action::EndRun);
            }
            Interaction::Chain(chain) => {
                hand.iter()
                    .filter(|card| card.kind() == Kind::PlusTwo)
                    .for_each(&mut push_play);
                if self.can_supply(chain.total_penalty() as usize) {
                    actions.push(Action::Draw);
                }
            }
        }
        Ok(actions)
    }

    /// Validate and apply one action.
    pub fn apply(&mut self, actor: PlayerId, action: Action) -> Result<Outcome, RuleError> {
        if self.status() != GameStatus::Active {
            return Err(RuleError::NotActive);
        }
        if self.authorized_actor() != Some(actor) {
            return Err(RuleError::WrongActor);
        }
        let mut effects = Effects::default();
        let next = match self.interaction {
            Interaction::Normal => self.apply_normal(actor, action, &mut effects)?,
            Interaction::ColorPending(purpose) => {
                self.apply_color_choice(actor, purpose, action, &mut effects)?
            }
            Interaction::Run(run) => self.apply_run(actor, run, action, &mut effects)?,
            Interaction::Chain(chain) => self.apply_chain(actor, chain, action, &mut effects)?,
        };
        Ok(self.commit(actor, action, next, effects))
    }

    /// Freeze the game. All chain and run state is kept as is.
    pub fn pause(&mut self) -> Result<ResumeContext, RuleError> {
        if self.status() != GameStatus::Active {
            return Err(RuleError::NotActive);
        }
        let context = ResumeContext {
            awaiting: self.authorized_actor(),
            interaction: self.interaction.state(),
            revision: self.revision,
        };
        self.lifecycle = Lifecycle::Paused(context);
        self.revision += 1;
        log::info!("game paused awaiting {:?}", context.awaiting);
        Ok(context)
    }

    /// Lift a pause, returning what the game was waiting for.
    pub fn resume(&mut self) -> Option<ResumeContext> {
        let Lifecycle::Paused(context) = self.lifecycle else {
            return None;
        };
        self.lifecycle = Lifecycle::Active;
        self.revision += 1;
        log::info!("game resumed awaiting {:?}", context.awaiting);
        Some(context)
    }

    fn setup(builder: GameBuilder, mut deck: D) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            hands,
            starter,
            ..
        } = builder;
        let settings = GameSettings::new(config.hand_size, config.per_card_penalty)?;
        let start = config.starting_player;
        let hands = match hands {
            Some([player, opponent]) => [Hand::from_cards(player), Hand::from_cards(opponent)],
            None => {
                let mut hands = [Hand::new(), Hand::new()];
                for _ in 0..settings.hand_size {
                    for seat in [start, start.other()] {
                        hands[seat.index()].add(deck.draw_one()?);
                    }
                }
                hands
            }
        };
        if hands.iter().any(Hand::is_empty) {
            return Err(GameError::InvalidConfiguration("both players need cards"));
        }
        let starter = match starter {
            Some(card) => card,
            None => deck.draw_one()?,
        };
        deck.discard(starter);

        let mut engine = Self {
            settings,
            lifecycle: Lifecycle::Active,
            turn: TurnState::Neutral,
            interaction: Interaction::Normal,
            hands,
            top: DiscardTop::revealed(starter),
            pending_bonus: false,
            deck,
            revision: 0,
        };
        engine.reveal_starter(start);
        log::debug!("game set up: starter {starter}, {:?} to act", engine.turn);
        Ok(engine)
    }

    /// Apply the revealed starter's effect before anyone acts.
    fn reveal_starter(&mut self, start: PlayerId) {
        let starter = self.top.card;
        if starter.is_wild() {
            self.turn = TurnState::of(start);
            self.interaction = Interaction::ColorPending(ColorPurpose::Starter);
        } else if starter.is_continuation() {
            self.turn = TurnState::of(start.other());
        } else {
            self.turn = TurnState::of(start);
        }
    }

    fn apply_normal(
        &mut self,
        actor: PlayerId,
        action: Action,
        effects: &mut Effects,
    ) -> Result<PlayerId, RuleError> {
        match action {
            Action::Play(card) => {
                self.check_in_hand(actor, &card)?;
                if !is_legal(&card, &self.top) {
                    return Err(RuleError::IllegalCard);
                }
                self.pending_bonus = false;
                let active_color = if card.is_wild() {
                    self.top.active_color
                } else {
                    card.color()
                };
                self.place(actor, card, active_color);
                if self.check_winner(actor, effects) {
                    return Ok(actor);
                }
                Ok(self.resolve_play(actor, card, effects))
            }
            Action::Draw => {
                let drawn = self.draw_cards(1, effects)?;
                self.hands[actor.index()].extend(drawn);
                self.pending_bonus = false;
                Ok(actor.other())
            }
            Action::ChooseColor(_) => Err(RuleError::NoColorChoicePending),
            Action::EndRun if self.pending_bonus => Err(RuleError::BonusActionRequired),
            Action::EndRun => Err(RuleError::NoRunActive),
        }
    }

    /// Post-play effect of a card played under normal interaction.
    fn resolve_play(&mut self, actor: PlayerId, card: Card, effects: &mut Effects) -> PlayerId {
        match card.kind() {
            Kind::Number => actor.other(),
            Kind::Plus => {
                self.pending_bonus = true;
                actor
            }
            Kind::PlusTwo => {
                let chain = ChainTracker::open(actor, self.settings.per_card_penalty);
                log::debug!("chain opened by {actor}, {} owed", chain.total_penalty());
                self.interaction = Interaction::Chain(chain);
                chain.responder()
            }
            // Two seats: skipping the opponent hands the turn straight back.
            Kind::Stop | Kind::Reverse => actor,
            Kind::ChangeColor => {
                self.interaction = Interaction::ColorPending(ColorPurpose::ChangeColor);
                effects.color_prompt_required = true;
                actor
            }
            Kind::SuperRun => {
                self.interaction = Interaction::ColorPending(ColorPurpose::SuperRun);
                effects.color_prompt_required = true;
                actor
            }
            Kind::Run => self.open_run(actor, card.color(), card, effects),
        }
    }

    fn apply_color_choice(
        &mut self,
        actor: PlayerId,
        purpose: ColorPurpose,
        action: Action,
        effects: &mut Effects,
    ) -> Result<PlayerId, RuleError> {
        let Action::ChooseColor(color) = action else {
            return Err(RuleError::ColorChoiceRequired);
        };
        if color.is_wild() {
            return Err(RuleError::InvalidColorChoice(color));
        }
        self.top.active_color = color;
        self.interaction = Interaction::Normal;
        let next = match purpose {
            ColorPurpose::ChangeColor | ColorPurpose::RunEnd => actor.other(),
            ColorPurpose::Starter => actor,
            ColorPurpose::SuperRun => self.open_run(actor, color, self.top.card, effects),
        };
        Ok(next)
    }

    fn open_run(
        &mut self,
        actor: PlayerId,
        run_color: Color,
        first: Card,
        effects: &mut Effects,
    ) -> PlayerId {
        let run = SequenceTracker::open(actor, run_color, first);
        log::debug!("{actor} opened a {run_color} run");
        self.interaction = Interaction::Run(run);
        self.check_forced_end(actor, run, effects)
    }

    fn apply_run(
        &mut self,
        actor: PlayerId,
        mut run: SequenceTracker,
        action: Action,
        effects: &mut Effects,
    ) -> Result<PlayerId, RuleError> {
        match action {
            Action::Play(card) => {
                self.check_in_hand(actor, &card)?;
                if !run.accepts(&card) {
                    return Err(RuleError::IllegalCard);
                }
                self.place(actor, card, run.run_color());
                run.push(card);
                self.interaction = Interaction::Run(run);
                if self.check_winner(actor, effects) {
                    return Ok(actor);
                }
                Ok(self.check_forced_end(actor, run, effects))
            }
            Action::EndRun => Ok(self.close_run(actor, run, false, effects)),
            Action::Draw | Action::ChooseColor(_) => Err(RuleError::RunContinuationRequired),
        }
    }

    /// Close the run when the initiator has nothing left to extend it with.
    fn check_forced_end(
        &mut self,
        actor: PlayerId,
        run: SequenceTracker,
        effects: &mut Effects,
    ) -> PlayerId {
        if self.hands[actor.index()].has_run_card(run.run_color()) {
            actor
        } else {
            self.close_run(actor, run, true, effects)
        }
    }

    /// End a run and advance the turn according to its last card.
    fn close_run(
        &mut self,
        actor: PlayerId,
        run: SequenceTracker,
        forced: bool,
        effects: &mut Effects,
    ) -> PlayerId {
        let ended = run.finish(forced);
        log::debug!(
            "{actor} run ended after {} cards (forced: {forced})",
            ended.card_count
        );
        effects.run_ended = Some(ended);
        self.interaction = Interaction::Normal;
        match ended.last_card.kind() {
            Kind::Plus => {
                self.pending_bonus = true;
                actor
            }
            Kind::Stop | Kind::Reverse => actor,
            Kind::ChangeColor => {
                self.interaction = Interaction::ColorPending(ColorPurpose::RunEnd);
                effects.color_prompt_required = true;
                actor
            }
            _ => actor.other(),
        }
    }

    fn apply_chain(
        &mut self,
        actor: PlayerId,
        mut chain: ChainTracker,
        action: Action,
        effects: &mut Effects,
    ) -> Result<PlayerId, RuleError> {
        match action {
            Action::Play(card) if card.kind() == Kind::PlusTwo => {
                self.check_in_hand(actor, &card)?;
                self.place(actor, card, card.color());
                chain.stack();
                log::debug!("{actor} stacked the chain to {}", chain.total_penalty());
                self.interaction = Interaction::Chain(chain);
                if self.check_winner(actor, effects) {
                    return Ok(actor);
                }
                Ok(chain.responder())
            }
            Action::Draw => {
                let drawn = self.draw_cards(chain.total_penalty(), effects)?;
                self.hands[actor.index()].extend(drawn);
                self.interaction = Interaction::Normal;
                log::debug!("{actor} drew {} to close the chain", effects.cards_drawn);
                Ok(actor.other())
            }
            _ => Err(RuleError::ChainResponseRequired),
        }
    }

    fn check_in_hand(&self, actor: PlayerId, card: &Card) -> Result<(), RuleError> {
        if self.hands[actor.index()].contains(card) {
            Ok(())
        } else {
            Err(RuleError::CardNotInHand)
        }
    }

    fn place(&mut self, actor: PlayerId, card: Card, active_color: Color) {
        let removed = self.hands[actor.index()].remove(&card);
        assert!(removed, "validated card vanished from hand");
        self.deck.discard(card);
        self.top = DiscardTop::new(card, active_color);
    }

    fn check_winner(&mut self, actor: PlayerId, effects: &mut Effects) -> bool {
        if !self.hands[actor.index()].is_empty() {
            return false;
        }
        self.lifecycle = Lifecycle::Ended { winner: actor };
        self.interaction = Interaction::Normal;
        self.pending_bonus = false;
        effects.game_ended = Some(actor);
        log::info!("{actor} emptied their hand and wins");
        true
    }

    fn can_supply(&self, count: usize) -> bool {
        let recyclable = self.deck.discard_pile_len().saturating_sub(1);
        self.deck.draw_pile_len() + recyclable >= count
    }

    /// Draw exactly `count` cards or none at all.
    ///
    /// The supply check trusts the deck's reported pile sizes. A deck that
    /// over-reports gets its drawn cards back through [`Deck::restore`], but a
    /// reshuffle it already performed is not undone.
    fn draw_cards(&mut self, count: u32, effects: &mut Effects) -> Result<Vec<Card>, RuleError> {
        if !self.can_supply(count as usize) {
            return Err(RuleError::DeckExhausted);
        }
        let mut drawn = Vec::with_capacity(count as usize);
        let mut just_reshuffled = false;
        while drawn.len() < count as usize {
            match self.deck.draw_one() {
                Ok(card) => {
                    drawn.push(card);
                    just_reshuffled = false;
                }
                Err(DeckError::Empty) if !just_reshuffled => {
                    match self.deck.reshuffle_from_discard_except_top() {
                        Ok(()) => {
                            effects.reshuffled = true;
                            just_reshuffled = true;
                        }
                        Err(_) => {
                            self.deck.restore(drawn);
                            return Err(RuleError::DeckExhausted);
                        }
                    }
                }
                Err(_) => {
                    self.deck.restore(drawn);
                    return Err(RuleError::DeckExhausted);
                }
            }
        }
        effects.cards_drawn = count;
        Ok(drawn)
    }

    fn commit(
        &mut self,
        actor: PlayerId,
        action: Action,
        next: PlayerId,
        effects: Effects,
    ) -> Outcome {
        self.turn = if self.is_finished() {
            TurnState::Neutral
        } else {
            TurnState::of(next)
        };
        debug_assert!(
            self.is_finished() || self.authorized_actor() == Some(next),
            "turn bookkeeping disagrees with interaction state"
        );
        self.revision += 1;
        let turn_advanced = !self.is_finished() && next != actor;
        log::debug!("{actor} {action:?} accepted, {:?} next", self.turn);
        Outcome {
            actor,
            action,
            cards_drawn: effects.cards_drawn,
            turn_advanced,
            color_prompt_required: effects.color_prompt_required,
            game_ended: effects.game_ended,
            run_ended: effects.run_ended,
            reshuffled: effects.reshuffled,
            snapshot: self.snapshot(),
        }
    }
}
