use neurodots_core::{Generation, Population, SimulationConfig, Vec2};

fn scenario_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        population_size: 4,
        world_width: 100,
        world_height: 100,
        dot_size: 4,
        step_budget: 50,
        min_target_distance: 5.0,
        mutation_ratio: 0.05,
        sample_interval: 10,
        learning_rate: 0.5,
        epochs: 3,
        batch_size: 4,
        rng_seed: Some(seed),
    }
}

/// Drive until every dot is terminal; the step budget bounds the loop.
fn run_generation(population: &mut Population, target: Vec2) {
    let budget = population.config().step_budget;
    for _ in 0..=budget {
        if population.all_dead() {
            return;
        }
        population.update(target);
    }
    assert!(population.all_dead(), "budget should terminate every dot");
}

#[test]
fn a_full_generation_terminates_and_rolls_over() {
    let mut population = Population::new(scenario_config(0xFEED)).expect("population");
    let target = Vec2::new(50.0, 50.0);

    assert_eq!(population.generation(), Generation(1));
    assert_eq!(population.dots().len(), 4);
    assert!(!population.all_dead());

    run_generation(&mut population, target);

    for dot in population.dots() {
        // Terminal flags are mutually exclusive.
        assert!(dot.is_dead() ^ dot.is_success());
        assert!(dot.is_terminal());
    }

    population.natural_selection(target).expect("selection");

    assert_eq!(population.dots().len(), 4);
    assert_eq!(population.generation(), Generation(2));
    assert!(population.dots()[0].is_champion());
    assert!(population.dots()[1..].iter().all(|dot| !dot.is_champion()));
    assert!(population.dots().iter().all(|dot| !dot.is_terminal()));
}

#[test]
fn generations_advance_repeatedly() {
    let mut population = Population::new(scenario_config(0xACE)).expect("population");
    let target = Vec2::new(50.0, 50.0);

    for expected in 1..=3_u32 {
        assert_eq!(population.generation(), Generation(expected));
        run_generation(&mut population, target);
        population.natural_selection(target).expect("selection");
        assert!(population.min_step() <= population.config().step_budget);
    }
    assert_eq!(population.generation(), Generation(4));
}

#[test]
fn seeded_runs_are_deterministic() {
    let target = Vec2::new(50.0, 50.0);
    let mut first = Population::new(scenario_config(0xD1CE)).expect("population");
    let mut second = Population::new(scenario_config(0xD1CE)).expect("population");

    run_generation(&mut first, target);
    run_generation(&mut second, target);

    let positions_first: Vec<_> = first.dots().iter().map(|dot| dot.position()).collect();
    let positions_second: Vec<_> = second.dots().iter().map(|dot| dot.position()).collect();
    assert_eq!(positions_first, positions_second);

    first.natural_selection(target).expect("selection");
    second.natural_selection(target).expect("selection");
    assert_eq!(first.min_step(), second.min_step());
}
