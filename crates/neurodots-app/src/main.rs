//! Headless driver for the neurodots simulation.
//!
//! Stands in for the rendering layer: ticks the population, hands control
//! to natural selection once every dot is terminal, and logs generational
//! progress instead of drawing it.

use anyhow::Result;
use neurodots_core::{Population, SimulationConfig, Vec2};
use tracing::info;

const TARGET: Vec2 = Vec2::new(50.0, 50.0);

fn main() -> Result<()> {
    init_tracing();

    let config = SimulationConfig {
        rng_seed: env_u64("NEURODOTS_SEED"),
        ..SimulationConfig::default()
    };
    let generations = env_u64("NEURODOTS_GENERATIONS").unwrap_or(25) as u32;

    let mut population = Population::new(config)?;
    if let Some(dot) = population.dots().first() {
        info!("brain topology:\n{}", dot.brain().network().summary());
    }
    info!(
        population = population.dots().len(),
        generations, "starting neurodots simulation"
    );

    while population.generation().0 <= generations {
        if population.all_dead() {
            report(&population);
            population.natural_selection(TARGET)?;
        } else {
            population.update(TARGET);
        }
    }

    info!(min_step = population.min_step(), "simulation finished");
    Ok(())
}

fn report(population: &Population) {
    let successes = population
        .dots()
        .iter()
        .filter(|dot| dot.is_success())
        .count();
    info!(
        generation = population.generation().0,
        successes,
        min_step = population.min_step(),
        "generation complete"
    );
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}
