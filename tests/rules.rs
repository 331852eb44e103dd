use unoduel::{
    Action, Card, Color, Deck, DeckError, GameBuilder, GameError, GameStatus, InteractionState,
    Kind, PlayerId, RuleEngine, RuleError, ShuffledDeck, TurnState,
};

const P: PlayerId = PlayerId::Player;
const O: PlayerId = PlayerId::Opponent;

fn num(color: Color, rank: u8) -> Card {
    Card::number(color, rank)
}

fn special(color: Color, kind: Kind) -> Card {
    Card::action(color, kind)
}

fn filler(count: usize) -> Vec<Card> {
    (0..count).map(|i| num(Color::Yellow, (i % 10) as u8)).collect()
}

fn rigged(player: Vec<Card>, opponent: Vec<Card>, starter: Card) -> Result<RuleEngine, GameError> {
    GameBuilder::new()
        .with_hands(player, opponent)
        .with_starter(starter)
        .with_deck(filler(20))
        .build()
}

#[test]
fn dealt_game_starts_with_full_hands() -> Result<(), GameError> {
    let engine = GameBuilder::new()
        .with_seed(11)
        .with_starter(num(Color::Red, 4))
        .build()?;
    assert_eq!(engine.hand(P).len(), 7);
    assert_eq!(engine.hand(O).len(), 7);
    assert_eq!(engine.status(), GameStatus::Active);
    assert_eq!(engine.turn_state(), TurnState::PlayerTurn);
    assert_eq!(engine.interaction_state(), InteractionState::Normal);
    assert_eq!(engine.deck().draw_pile_len(), 124 - 14);
    Ok(())
}

#[test]
fn zero_hand_size_is_rejected() {
    let result = GameBuilder::new().with_hand_size(0).build();
    assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
}

#[test]
fn rank_match_is_legal_and_passes_turn() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![num(Color::Blue, 5), num(Color::Green, 1)],
        vec![num(Color::Yellow, 2)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Play(num(Color::Blue, 5)))?;
    assert!(outcome.turn_advanced);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    assert_eq!(engine.discard_top().active_color, Color::Blue);
    assert_eq!(outcome.snapshot.hand_size(P), 1);
    Ok(())
}

#[test]
fn rejected_actions_leave_state_untouched() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![num(Color::Green, 1), num(Color::Blue, 7)],
        vec![num(Color::Red, 2)],
        num(Color::Red, 5),
    )?;
    let before = engine.snapshot();
    assert_eq!(
        engine.apply(P, Action::Play(num(Color::Green, 1))),
        Err(RuleError::IllegalCard)
    );
    assert_eq!(
        engine.apply(P, Action::Play(num(Color::Red, 9))),
        Err(RuleError::CardNotInHand)
    );
    assert_eq!(
        engine.apply(O, Action::Play(num(Color::Red, 2))),
        Err(RuleError::WrongActor)
    );
    assert_eq!(
        engine.apply(P, Action::ChooseColor(Color::Blue)),
        Err(RuleError::NoColorChoicePending)
    );
    assert_eq!(engine.apply(P, Action::EndRun), Err(RuleError::NoRunActive));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.hand(P).len(), 2);
    Ok(())
}

#[test]
fn draw_chain_escalates_and_resolves() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
        vec![special(Color::Blue, Kind::PlusTwo), num(Color::Blue, 3)],
        num(Color::Red, 5),
    )?;
    let opened = engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let chain = opened.snapshot.chain.expect("chain open");
    assert_eq!((chain.stacked_count, chain.total_penalty), (1, 2));
    assert_eq!(chain.responder, O);
    assert_eq!(engine.interaction_state(), InteractionState::ChainActive);

    assert_eq!(
        engine.apply(O, Action::Play(num(Color::Blue, 3))),
        Err(RuleError::ChainResponseRequired)
    );
    assert_eq!(
        engine.apply(P, Action::Draw),
        Err(RuleError::WrongActor)
    );

    let stacked = engine.apply(O, Action::Play(special(Color::Blue, Kind::PlusTwo)))?;
    let chain = stacked.snapshot.chain.expect("chain still open");
    assert_eq!((chain.stacked_count, chain.total_penalty), (2, 4));
    assert_eq!(chain.responder, P);
    assert!(stacked.turn_advanced);

    assert_eq!(
        engine.apply(P, Action::EndRun),
        Err(RuleError::ChainResponseRequired)
    );
    let hand_before = engine.hand(P).len();
    let resolved = engine.apply(P, Action::Draw)?;
    assert_eq!(resolved.cards_drawn, 4);
    assert_eq!(engine.hand(P).len(), hand_before + 4);
    assert_eq!(engine.interaction_state(), InteractionState::Normal);
    assert!(engine.chain().is_none());
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    assert!(resolved.turn_advanced);
    Ok(())
}

#[test]
fn chain_draw_is_all_or_nothing() -> Result<(), GameError> {
    let mut engine = GameBuilder::new()
        .with_hands(
            vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
            vec![num(Color::Blue, 3)],
        )
        .with_starter(num(Color::Red, 5))
        .with_deck(Vec::new())
        .build()?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let revision = engine.revision();
    assert_eq!(engine.apply(O, Action::Draw), Err(RuleError::DeckExhausted));
    assert_eq!(engine.hand(O).len(), 1);
    assert_eq!(engine.revision(), revision);
    let chain = engine.chain().expect("chain stays open for a retry");
    assert_eq!(chain.total_penalty(), 2);
    assert_eq!(engine.legal_actions(O)?, Vec::new());
    Ok(())
}

#[test]
fn chain_draw_reshuffles_discards() -> Result<(), GameError> {
    let mut engine = GameBuilder::new()
        .with_hands(
            vec![
                num(Color::Red, 1),
                num(Color::Red, 2),
                special(Color::Red, Kind::PlusTwo),
                num(Color::Green, 8),
            ],
            vec![num(Color::Blue, 3), num(Color::Red, 7), num(Color::Red, 6)],
        )
        .with_starter(num(Color::Red, 5))
        .with_deck(vec![num(Color::Yellow, 9)])
        .build()?;
    engine.apply(P, Action::Play(num(Color::Red, 1)))?;
    engine.apply(O, Action::Play(num(Color::Red, 7)))?;
    engine.apply(P, Action::Play(num(Color::Red, 2)))?;
    engine.apply(O, Action::Play(num(Color::Red, 6)))?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let outcome = engine.apply(O, Action::Draw)?;
    assert!(outcome.reshuffled);
    assert_eq!(outcome.cards_drawn, 2);
    assert_eq!(engine.hand(O).len(), 3);
    Ok(())
}

#[test]
fn run_continues_with_wilds_and_ends_voluntarily() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Run),
            num(Color::Red, 3),
            num(Color::Red, 7),
            Card::wild(Kind::SuperRun),
            Card::wild(Kind::ChangeColor),
            num(Color::Blue, 2),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let opened = engine.apply(P, Action::Play(special(Color::Red, Kind::Run)))?;
    assert!(!opened.turn_advanced);
    assert_eq!(engine.interaction_state(), InteractionState::RunActive);

    engine.apply(P, Action::Play(num(Color::Red, 3)))?;
    engine.apply(P, Action::Play(num(Color::Red, 7)))?;
    assert_eq!(
        engine.apply(P, Action::Play(num(Color::Blue, 2))),
        Err(RuleError::IllegalCard)
    );
    assert_eq!(
        engine.apply(P, Action::Draw),
        Err(RuleError::RunContinuationRequired)
    );
    assert_eq!(
        engine.apply(O, Action::Play(num(Color::Green, 4))),
        Err(RuleError::WrongActor)
    );
    engine.apply(P, Action::Play(Card::wild(Kind::SuperRun)))?;
    let run = engine.sequence().expect("run open");
    assert_eq!(run.run_color(), Color::Red);
    assert_eq!(run.cards_played(), 4);
    assert_eq!(engine.discard_top().active_color, Color::Red);

    let ended = engine.apply(P, Action::EndRun)?;
    let summary = ended.run_ended.expect("run ended");
    assert!(!summary.forced);
    assert_eq!(summary.card_count, 4);
    assert_eq!(summary.run_color, Color::Red);
    assert!(ended.turn_advanced);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    assert_eq!(engine.interaction_state(), InteractionState::Normal);
    Ok(())
}

#[test]
fn run_is_forced_closed_when_nothing_matches() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Run),
            num(Color::Red, 3),
            num(Color::Blue, 2),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::Run)))?;
    let outcome = engine.apply(P, Action::Play(num(Color::Red, 3)))?;
    let summary = outcome.run_ended.expect("forced end");
    assert!(summary.forced);
    assert_eq!(summary.card_count, 2);
    assert_eq!(summary.run_color, Color::Red);
    assert!(outcome.turn_advanced);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn run_opened_without_followers_closes_immediately() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Red, Kind::Run), num(Color::Blue, 2)],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Play(special(Color::Red, Kind::Run)))?;
    let summary = outcome.run_ended.expect("forced end");
    assert!(summary.forced);
    assert_eq!(summary.card_count, 1);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn run_ending_on_continuation_card_keeps_turn() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Run),
            special(Color::Red, Kind::Stop),
            num(Color::Blue, 2),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::Run)))?;
    let outcome = engine.apply(P, Action::Play(special(Color::Red, Kind::Stop)))?;
    assert!(outcome.run_ended.expect("forced end").forced);
    assert!(!outcome.turn_advanced);
    assert_eq!(engine.authorized_actor(), Some(P));
    assert_eq!(engine.interaction_state(), InteractionState::Normal);
    Ok(())
}

#[test]
fn run_ending_on_change_color_prompts() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Run),
            Card::wild(Kind::ChangeColor),
            num(Color::Blue, 2),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::Run)))?;
    let outcome = engine.apply(P, Action::Play(Card::wild(Kind::ChangeColor)))?;
    assert!(outcome.color_prompt_required);
    assert_eq!(engine.interaction_state(), InteractionState::ColorPending);
    let chosen = engine.apply(P, Action::ChooseColor(Color::Blue))?;
    assert!(chosen.turn_advanced);
    assert_eq!(engine.discard_top().active_color, Color::Blue);
    Ok(())
}

#[test]
fn super_run_uses_the_chosen_colour() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            Card::wild(Kind::SuperRun),
            num(Color::Green, 1),
            num(Color::Green, 2),
            num(Color::Blue, 5),
        ],
        vec![num(Color::Yellow, 4)],
        num(Color::Red, 5),
    )?;
    let played = engine.apply(P, Action::Play(Card::wild(Kind::SuperRun)))?;
    assert!(played.color_prompt_required);
    assert_eq!(engine.interaction_state(), InteractionState::ColorPending);
    assert_eq!(
        engine.apply(P, Action::Play(num(Color::Green, 1))),
        Err(RuleError::ColorChoiceRequired)
    );
    assert_eq!(
        engine.apply(P, Action::ChooseColor(Color::Wild)),
        Err(RuleError::InvalidColorChoice(Color::Wild))
    );
    engine.apply(P, Action::ChooseColor(Color::Green))?;
    assert_eq!(engine.interaction_state(), InteractionState::RunActive);
    assert_eq!(engine.sequence().map(|run| run.run_color()), Some(Color::Green));
    assert_eq!(engine.discard_top().active_color, Color::Green);

    engine.apply(P, Action::Play(num(Color::Green, 1)))?;
    let outcome = engine.apply(P, Action::Play(num(Color::Green, 2)))?;
    let summary = outcome.run_ended.expect("forced end");
    assert_eq!(summary.card_count, 3);
    assert_eq!(summary.run_color, Color::Green);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn emptying_the_hand_ends_the_game() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![num(Color::Red, 3)],
        vec![num(Color::Blue, 9)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Play(num(Color::Red, 3)))?;
    assert_eq!(outcome.game_ended, Some(P));
    assert_eq!(engine.status(), GameStatus::Ended);
    assert_eq!(engine.winner(), Some(P));
    assert_eq!(engine.turn_state(), TurnState::Neutral);
    assert_eq!(engine.apply(O, Action::Draw), Err(RuleError::NotActive));
    assert_eq!(engine.apply(P, Action::Draw), Err(RuleError::NotActive));
    assert_eq!(engine.legal_actions(O)?, Vec::new());
    Ok(())
}

#[test]
fn stacking_the_last_card_wins() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
        vec![special(Color::Blue, Kind::PlusTwo)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let outcome = engine.apply(O, Action::Play(special(Color::Blue, Kind::PlusTwo)))?;
    assert_eq!(outcome.game_ended, Some(O));
    assert!(engine.chain().is_none());
    Ok(())
}

#[test]
fn change_color_blocks_until_chosen() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            Card::wild(Kind::ChangeColor),
            num(Color::Blue, 1),
            num(Color::Yellow, 3),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Play(Card::wild(Kind::ChangeColor)))?;
    assert!(outcome.color_prompt_required);
    assert!(!outcome.turn_advanced);
    assert_eq!(engine.apply(P, Action::Draw), Err(RuleError::ColorChoiceRequired));
    assert_eq!(
        engine.apply(P, Action::Play(num(Color::Blue, 1))),
        Err(RuleError::ColorChoiceRequired)
    );
    assert_eq!(
        engine.apply(O, Action::ChooseColor(Color::Green)),
        Err(RuleError::WrongActor)
    );
    let chosen = engine.apply(P, Action::ChooseColor(Color::Blue))?;
    assert!(chosen.turn_advanced);
    assert_eq!(engine.discard_top().active_color, Color::Blue);
    assert_eq!(engine.discard_top().card, Card::wild(Kind::ChangeColor));
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn plus_demands_one_more_action() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Plus),
            num(Color::Red, 2),
            num(Color::Blue, 9),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Play(special(Color::Red, Kind::Plus)))?;
    assert!(!outcome.turn_advanced);
    assert!(engine.pending_bonus());
    assert_eq!(
        engine.apply(P, Action::EndRun),
        Err(RuleError::BonusActionRequired)
    );
    let outcome = engine.apply(P, Action::Play(num(Color::Red, 2)))?;
    assert!(outcome.turn_advanced);
    assert!(!engine.pending_bonus());
    Ok(())
}

#[test]
fn plus_bonus_can_be_a_draw() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Red, Kind::Plus), num(Color::Blue, 9)],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::Plus)))?;
    let outcome = engine.apply(P, Action::Draw)?;
    assert_eq!(outcome.cards_drawn, 1);
    assert!(outcome.turn_advanced);
    assert!(!engine.pending_bonus());
    assert_eq!(engine.hand(P).len(), 2);
    Ok(())
}

#[test]
fn stop_and_reverse_skip_the_opponent() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![
            special(Color::Red, Kind::Stop),
            special(Color::Red, Kind::Reverse),
            num(Color::Red, 1),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let stop = engine.apply(P, Action::Play(special(Color::Red, Kind::Stop)))?;
    assert!(!stop.turn_advanced);
    let reverse = engine.apply(P, Action::Play(special(Color::Red, Kind::Reverse)))?;
    assert!(!reverse.turn_advanced);
    assert_eq!(engine.turn_state(), TurnState::PlayerTurn);
    Ok(())
}

#[test]
fn plain_draw_takes_one_card_and_passes() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![num(Color::Blue, 9)],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let outcome = engine.apply(P, Action::Draw)?;
    assert_eq!(outcome.cards_drawn, 1);
    assert!(outcome.turn_advanced);
    assert_eq!(engine.hand(P).len(), 2);
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn pause_freezes_an_open_chain() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
        vec![num(Color::Blue, 3)],
        num(Color::Red, 5),
    )?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let context = engine.pause()?;
    assert_eq!(context.awaiting, Some(O));
    assert_eq!(context.interaction, InteractionState::ChainActive);
    assert_eq!(engine.status(), GameStatus::Paused);
    assert_eq!(engine.apply(O, Action::Draw), Err(RuleError::NotActive));
    assert_eq!(engine.pause(), Err(RuleError::NotActive));
    assert_eq!(engine.legal_actions(O)?, Vec::new());

    let resumed = engine.resume().expect("was paused");
    assert_eq!(resumed, context);
    assert_eq!(engine.resume(), None);
    let outcome = engine.apply(O, Action::Draw)?;
    assert_eq!(outcome.cards_drawn, 2);
    Ok(())
}

#[test]
fn wild_starter_asks_the_starting_player_for_a_colour() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![num(Color::Blue, 9), num(Color::Green, 1)],
        vec![num(Color::Green, 4)],
        Card::wild(Kind::ChangeColor),
    )?;
    assert_eq!(engine.interaction_state(), InteractionState::ColorPending);
    assert_eq!(engine.legal_actions(P)?.len(), 4);
    let outcome = engine.apply(P, Action::ChooseColor(Color::Blue))?;
    assert!(!outcome.turn_advanced);
    assert_eq!(engine.authorized_actor(), Some(P));
    engine.apply(P, Action::Play(num(Color::Blue, 9)))?;
    Ok(())
}

#[test]
fn skip_starter_hands_the_first_turn_over() -> Result<(), GameError> {
    let engine = GameBuilder::new()
        .with_hands(vec![num(Color::Blue, 9)], vec![num(Color::Green, 4)])
        .with_starter(special(Color::Red, Kind::Stop))
        .with_starting_player(P)
        .build()?;
    assert_eq!(engine.turn_state(), TurnState::OpponentTurn);
    Ok(())
}

#[test]
fn every_listed_action_is_accepted() -> Result<(), GameError> {
    let engine = rigged(
        vec![
            num(Color::Red, 3),
            num(Color::Red, 3),
            special(Color::Blue, Kind::Run),
            special(Color::Red, Kind::PlusTwo),
            Card::wild(Kind::SuperRun),
            num(Color::Green, 5),
            num(Color::Green, 8),
        ],
        vec![num(Color::Green, 4)],
        num(Color::Red, 5),
    )?;
    let actions = engine.legal_actions(P)?;
    // Duplicate red threes collapse into a single play; the blue run and green eight are illegal.
    assert_eq!(actions.len(), 5);
    assert!(actions.contains(&Action::Draw));
    for action in actions {
        let mut trial = engine.clone();
        trial.apply(P, action)?;
    }
    assert_eq!(engine.legal_actions(O), Err(RuleError::WrongActor));
    Ok(())
}

#[test]
fn views_follow_authority_through_a_chain() -> Result<(), GameError> {
    let mut engine = rigged(
        vec![special(Color::Blue, Kind::PlusTwo), num(Color::Red, 2)],
        vec![num(Color::Green, 6), num(Color::Green, 7)],
        num(Color::Blue, 3),
    )?;
    assert!(engine.view(P).is_my_move());
    assert!(!engine.view(O).is_my_move());

    let outcome = engine.apply(P, Action::Play(special(Color::Blue, Kind::PlusTwo)))?;
    assert_eq!(outcome.played(), Some(special(Color::Blue, Kind::PlusTwo)));
    let view = engine.view(O);
    assert!(view.is_my_move());
    assert_eq!(view.opponent_hand_size, 1);
    assert_eq!(view.chain_info.map(|chain| chain.total_penalty), Some(2));
    assert_eq!(engine.legal_actions(O)?, vec![Action::Draw]);
    assert_eq!(engine.legal_actions(P), Err(RuleError::WrongActor));
    Ok(())
}

#[test]
fn chain_penalty_follows_settings() -> Result<(), GameError> {
    let mut engine = GameBuilder::new()
        .with_hands(
            vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
            vec![special(Color::Blue, Kind::PlusTwo), num(Color::Green, 4)],
        )
        .with_starter(num(Color::Red, 5))
        .with_deck(filler(20))
        .with_per_card_penalty(3)
        .build()?;
    assert_eq!(engine.settings().per_card_penalty, 3);
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    engine.apply(O, Action::Play(special(Color::Blue, Kind::PlusTwo)))?;
    let chain = engine.chain().expect("chain open");
    assert_eq!(chain.total_penalty(), 6);
    let outcome = engine.apply(P, Action::Draw)?;
    assert_eq!(outcome.cards_drawn, 6);
    assert_eq!(engine.hand(P).len(), 7);
    Ok(())
}

#[test]
fn zero_chain_penalty_is_rejected() {
    let built = GameBuilder::new().with_per_card_penalty(0).build();
    assert!(matches!(built, Err(GameError::InvalidConfiguration(_))));
}

#[test]
fn normal_play_lists_each_matching_card_once() -> Result<(), GameError> {
    let engine = rigged(
        vec![
            num(Color::Red, 2),
            num(Color::Red, 2),
            num(Color::Blue, 5),
            num(Color::Green, 1),
            Card::wild(Kind::ChangeColor),
        ],
        vec![num(Color::Yellow, 3)],
        num(Color::Red, 5),
    )?;
    assert_eq!(
        engine.legal_actions(P)?,
        vec![
            Action::Play(num(Color::Red, 2)),
            Action::Play(num(Color::Blue, 5)),
            Action::Play(Card::wild(Kind::ChangeColor)),
            Action::Draw,
        ]
    );
    Ok(())
}

/// Reports more cards than it holds and never recycles its discards.
struct OverReportingDeck {
    inner: ShuffledDeck,
    phantom: usize,
}

impl Deck for OverReportingDeck {
    fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.inner.draw_one()
    }

    fn discard(&mut self, card: Card) {
        self.inner.discard(card);
    }

    fn reshuffle_from_discard_except_top(&mut self) -> Result<(), DeckError> {
        Err(DeckError::StillEmpty)
    }

    fn restore(&mut self, cards: Vec<Card>) {
        self.inner.restore(cards);
    }

    fn draw_pile_len(&self) -> usize {
        self.inner.draw_pile_len() + self.phantom
    }

    fn discard_pile_len(&self) -> usize {
        self.inner.discard_pile_len()
    }
}

#[test]
fn short_penalty_draw_puts_cards_back() -> Result<(), GameError> {
    let hidden = num(Color::Green, 9);
    let deck = OverReportingDeck {
        inner: ShuffledDeck::stacked(vec![hidden], 1),
        phantom: 5,
    };
    let mut engine = GameBuilder::new()
        .with_hands(
            vec![special(Color::Red, Kind::PlusTwo), num(Color::Red, 1)],
            vec![num(Color::Blue, 3)],
        )
        .with_starter(num(Color::Red, 5))
        .build_with(deck)?;
    engine.apply(P, Action::Play(special(Color::Red, Kind::PlusTwo)))?;
    let before = engine.snapshot();

    assert_eq!(engine.apply(O, Action::Draw), Err(RuleError::DeckExhausted));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.hand(O).len(), 1);
    assert!(engine.chain().is_some());
    assert_eq!(engine.deck().inner.draw_pile_len(), 1);
    assert_eq!(engine.deck().inner.clone().draw_one(), Ok(hidden));
    Ok(())
}
