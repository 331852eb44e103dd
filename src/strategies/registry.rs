use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::strategies::{HeuristicStrategy, HumanStrategy, RandomStrategy};
use crate::strategy::{Strategy, StrategyConfig};

/// Returns a normalized label for a strategy spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a strategy from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - heuristic[:special_preference]
pub fn create_strategy_from_spec(
    spec: &str,
    index: usize,
    config: &StrategyConfig,
) -> Result<Box<dyn Strategy>, Box<dyn Error>> {
    let argument = spec.split_once(':').map(|(_, value)| value.trim());
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = argument
                .map(str::to_string)
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanStrategy::new(name)))
        }
        "random" => {
            let seed = argument
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(config.seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomStrategy::new(StdRng::seed_from_u64(seed))))
        }
        "heuristic" => {
            let mut config = config.clone();
            if let Some(value) = argument {
                config.special_preference = value
                    .parse::<f64>()
                    .map_err(|_| format!("invalid special preference: {value}"))?;
            }
            config.seed ^= index as u64;
            Ok(Box::new(HeuristicStrategy::new(config)))
        }
        _ => Err(format!("unrecognized strategy spec: {spec}").into()),
    }
}
