use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};

use unoduel::{
    GameBuilder, PlayerId, Strategy, StrategyConfig, create_strategy_from_spec, describe_action,
    describe_outcome, label_for_spec, render_view, winner_points,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play games between two strategies (human, random, heuristic)."
)]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Base RNG seed; game N uses seed + N
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Show the game state and chosen action before every move
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Safety cap on actions per game; games exceeding it are aborted
    #[arg(long = "max-actions", default_value_t = 2000)]
    max_actions: usize,

    /// JSON file with heuristic strategy tunables
    #[arg(long = "strategy-config")]
    strategy_config: Option<PathBuf>,

    /// Two strategy specs, player first: e.g. human heuristic
    specs: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = match args.specs.len() {
        0 => vec![String::from("human"), String::from("heuristic")],
        2 => args.specs.clone(),
        other => return Err(format!("expected exactly 2 strategies, received {other}").into()),
    };
    let config = match &args.strategy_config {
        Some(path) => StrategyConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => StrategyConfig::default(),
    };

    let mut wins = [0usize; 2];
    let mut points = [0u64; 2];
    let mut aborted = 0usize;
    for game_index in 0..args.games {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::with_capacity(2);
        for (index, spec) in specs.iter().enumerate() {
            strategies.push(create_strategy_from_spec(spec, index, &config)?);
        }
        let seed = args.seed.wrapping_add(game_index as u64);
        let starting_player = if game_index % 2 == 0 {
            PlayerId::Player
        } else {
            PlayerId::Opponent
        };
        match play_game(seed, starting_player, &mut strategies, &args)? {
            Some((winner, score)) => {
                wins[winner as usize] += 1;
                points[winner as usize] += u64::from(score);
            }
            None => aborted += 1,
        }
    }

    println!("Played {} game(s), {aborted} aborted.", args.games);
    for (index, spec) in specs.iter().enumerate() {
        println!(
            "  {:<10} wins {:>5}  points {:>7}",
            label_for_spec(spec),
            wins[index],
            points[index]
        );
    }
    Ok(())
}

fn play_game(
    seed: u64,
    starting_player: PlayerId,
    strategies: &mut [Box<dyn Strategy>],
    args: &Args,
) -> Result<Option<(u8, u32)>, Box<dyn Error>> {
    let mut engine = GameBuilder::new()
        .with_seed(seed)
        .with_starting_player(starting_player)
        .build()?;
    for _ in 0..args.max_actions {
        if engine.is_finished() {
            break;
        }
        let Some(actor) = engine.authorized_actor() else {
            break;
        };
        let view = engine.view(actor);
        let legal_actions = engine.legal_actions(actor)?;
        if legal_actions.is_empty() {
            println!("{actor} has no legal action; the deck is exhausted.");
            return Ok(None);
        }
        let seat = match actor {
            PlayerId::Player => 0,
            PlayerId::Opponent => 1,
        };
        if args.visualize {
            println!("{}", render_view(&view));
        }
        let action = strategies[seat].decide(&view, &legal_actions);
        if args.visualize {
            println!("{actor} chose: {}", describe_action(&view, &action));
        }
        let outcome = engine.apply(actor, action)?;
        if args.visualize {
            println!("{}\n", describe_outcome(&outcome));
        }
    }

    match (engine.winner(), winner_points(&engine)) {
        (Some(winner), Some(score)) => {
            println!("Game finished. Winner: {winner} ({score} points).");
            let seat = match winner {
                PlayerId::Player => 0,
                PlayerId::Opponent => 1,
            };
            Ok(Some((seat, score)))
        }
        _ => {
            println!("Max action limit {} reached. Stopping game.", args.max_actions);
            Ok(None)
        }
    }
}
