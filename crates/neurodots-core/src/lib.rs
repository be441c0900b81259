//! Core types for the neurodots simulation.
//!
//! A population of dots, each steered by a small feed-forward network,
//! learns to reach a target across generations: better dots are more likely
//! to seed the next generation, their recorded trajectories become the
//! retraining data for offspring brains, and that data is stochastically
//! mutated between generations.

use neurodots_net::{
    Activation, Dataset, Dense, Layer, NetworkError, NeuralNetwork, Sample, Tensor, TensorShape,
};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of position inputs wired into each brain.
pub const BRAIN_INPUTS: usize = 2;
/// Number of movement-decision outputs produced by each brain.
pub const BRAIN_OUTPUTS: usize = 4;
/// Width of the two hidden layers.
const HIDDEN_WIDTH: usize = 4;

/// Acceleration applied per active movement intent.
const ACCELERATION_GAIN: f32 = 50.0;
/// Velocity magnitude cap.
const MAX_SPEED: f32 = 5.0;
/// Vertical margin between the spawn point and the lower bound.
const SPAWN_MARGIN: f32 = 10.0;

/// 2D vector used for positions, velocities, and accelerations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// In-place component-wise addition.
    pub fn add(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }

    /// Clamp the magnitude to `max`, preserving direction.
    pub fn limit(&mut self, max: f32) {
        let magnitude_squared = self.x * self.x + self.y * self.y;
        if magnitude_squared <= max * max {
            return;
        }
        let magnitude = magnitude_squared.sqrt();
        self.x = self.x / magnitude * max;
        self.y = self.y / magnitude * max;
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Generation counter, bumped once per wholesale population replacement.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Generation(pub u32);

impl Generation {
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Indicates an invalid simulation parameter or network topology.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A configuration field failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Brain network construction rejected the hyperparameters.
    #[error("network construction failed: {0}")]
    Network(#[from] NetworkError),
}

/// Static configuration for a simulation run. Fixed at population creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Number of dots per generation.
    pub population_size: usize,
    /// Width of the world in world units.
    pub world_width: u32,
    /// Height of the world in world units.
    pub world_height: u32,
    /// Side length of a dot; bounds checks use half of it.
    pub dot_size: u32,
    /// Steps a dot may take before dying of exhaustion.
    pub step_budget: usize,
    /// Distance to the target below which a dot succeeds.
    pub min_target_distance: f32,
    /// Probability that an inherited training example is replaced with a
    /// randomized one.
    pub mutation_ratio: f32,
    /// Steps between appending a (position, decision) example to a dot's
    /// dataset.
    pub sample_interval: usize,
    /// Gradient-descent learning rate for brain training.
    pub learning_rate: f32,
    /// Training epochs per brain construction.
    pub epochs: usize,
    /// Mini-batch size for brain training.
    pub batch_size: usize,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 80,
            world_width: 700,
            world_height: 700,
            dot_size: 10,
            step_budget: 300,
            min_target_distance: 5.0,
            mutation_ratio: 0.01,
            sample_interval: 75,
            learning_rate: 0.5,
            epochs: 30,
            batch_size: 16,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Validate the configuration before a population is built from it.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.population_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "population_size must be non-zero",
            ));
        }
        if self.world_width == 0 || self.world_height == 0 {
            return Err(SimulationError::InvalidConfig(
                "world dimensions must be non-zero",
            ));
        }
        if self.dot_size == 0
            || self.dot_size >= self.world_width
            || self.dot_size >= self.world_height
        {
            return Err(SimulationError::InvalidConfig(
                "dot_size must be non-zero and smaller than the world",
            ));
        }
        if self.step_budget == 0 {
            return Err(SimulationError::InvalidConfig(
                "step_budget must be non-zero",
            ));
        }
        if !self.min_target_distance.is_finite() || self.min_target_distance <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "min_target_distance must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_ratio) {
            return Err(SimulationError::InvalidConfig(
                "mutation_ratio must be within [0, 1]",
            ));
        }
        if self.sample_interval == 0 {
            return Err(SimulationError::InvalidConfig(
                "sample_interval must be non-zero",
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "learning_rate must be positive",
            ));
        }
        if self.epochs == 0 || self.batch_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "epochs and batch_size must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the configured RNG seed, generating one from entropy if
    /// absent.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

/// A network plus the dataset accumulated from its dot's lived trajectory
/// and a step counter.
///
/// There is no weight-copy path between brains: every brain randomizes its
/// weights at layer construction and immediately retrains on whatever
/// dataset it was handed. A "copy" of a champion is therefore a fresh brain
/// with an empty dataset.
#[derive(Debug)]
pub struct Brain {
    network: NeuralNetwork,
    dataset: Dataset,
    step_budget: usize,
    sample_interval: usize,
    steps: usize,
}

impl Brain {
    /// Build the fixed 2 → 4 → 4 → 4 sigmoid stack and train it on the
    /// supplied dataset (an empty dataset trains as a no-op beyond the
    /// random weight initialization).
    pub fn new(
        config: &SimulationConfig,
        dataset: Dataset,
        rng: &mut SmallRng,
    ) -> Result<Self, SimulationError> {
        let layers = vec![
            Layer::Dense(Dense::new(
                BRAIN_INPUTS,
                HIDDEN_WIDTH,
                Activation::from_raw(0),
                rng,
            )),
            Layer::Dense(Dense::new(
                HIDDEN_WIDTH,
                HIDDEN_WIDTH,
                Activation::from_raw(0),
                rng,
            )),
            Layer::Dense(Dense::new(
                HIDDEN_WIDTH,
                BRAIN_OUTPUTS,
                Activation::from_raw(0),
                rng,
            )),
        ];
        let mut network = NeuralNetwork::new(
            layers,
            config.learning_rate,
            config.epochs,
            config.batch_size,
        )?;
        network.train(&dataset, rng);
        Ok(Self {
            network,
            dataset,
            step_budget: config.step_budget,
            sample_interval: config.sample_interval,
            steps: 0,
        })
    }

    /// Predict a raw 4-component movement decision from a position.
    pub fn decide(&mut self, position: Vec2) -> [f32; BRAIN_OUTPUTS] {
        let input = Tensor::new(
            TensorShape::one_d(BRAIN_INPUTS),
            vec![position.x, position.y],
        );
        let prediction = self.network.predict(&input);
        [prediction[0], prediction[1], prediction[2], prediction[3]]
    }

    /// Count one simulation step and, every `sample_interval` steps, append
    /// the (post-move position → decision) pair to the dataset: the dot
    /// trains its future self on its own past decisions.
    pub fn record_step(&mut self, position: Vec2, decision: [f32; BRAIN_OUTPUTS]) {
        self.steps += 1;
        if self.steps % self.sample_interval == 0 {
            self.dataset.push(Sample::new(
                Tensor::new(
                    TensorShape::one_d(BRAIN_INPUTS),
                    vec![position.x, position.y],
                ),
                Tensor::new(TensorShape::one_d(BRAIN_OUTPUTS), decision.to_vec()),
            ));
        }
    }

    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub const fn step_budget(&self) -> usize {
        self.step_budget
    }

    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub const fn network(&self) -> &NeuralNetwork {
        &self.network
    }
}

/// World bounds and thresholds a dot carries for its lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
struct Bounds {
    width: u32,
    height: u32,
    dot_size: u32,
    min_target_distance: f32,
}

impl Bounds {
    fn from_config(config: &SimulationConfig) -> Self {
        Self {
            width: config.world_width,
            height: config.world_height,
            dot_size: config.dot_size,
            min_target_distance: config.min_target_distance,
        }
    }

    fn spawn_position(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 / 2.0,
            self.height as f32 - SPAWN_MARGIN,
        )
    }
}

/// One agent: a brain plus kinematic state and terminal flags.
///
/// Lifecycle is one-way: active → dead or success. Terminal dots ignore
/// further updates.
#[derive(Debug)]
pub struct Dot {
    brain: Brain,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    dead: bool,
    success: bool,
    champion: bool,
    bounds: Bounds,
}

impl Dot {
    /// Spawn a dot at the bottom-centre of the world.
    #[must_use]
    pub fn new(config: &SimulationConfig, brain: Brain) -> Self {
        let bounds = Bounds::from_config(config);
        Self {
            brain,
            position: bounds.spawn_position(),
            velocity: Vec2::default(),
            acceleration: Vec2::default(),
            dead: false,
            success: false,
            champion: false,
            bounds,
        }
    }

    /// Respawn slot-zero copy of a champion: same bounds, fresh brain with
    /// an empty dataset, flagged as the champion. Learned weights are not
    /// preserved — there is no weight-copy path by design.
    fn champion_copy(
        &self,
        config: &SimulationConfig,
        rng: &mut SmallRng,
    ) -> Result<Dot, SimulationError> {
        let brain = Brain::new(config, Dataset::default(), rng)?;
        Ok(Self {
            brain,
            position: self.bounds.spawn_position(),
            velocity: Vec2::default(),
            acceleration: Vec2::default(),
            dead: false,
            success: false,
            champion: true,
            bounds: self.bounds,
        })
    }

    /// Advance one tick: predict, move, record, then evaluate termination.
    pub fn update(&mut self, target: Vec2) {
        if self.dead || self.success {
            return;
        }

        self.advance();

        if self.brain.steps() >= self.brain.step_budget() {
            self.dead = true;
            return;
        }

        let half = self.bounds.dot_size as f32 / 2.0;
        let max_x = self.bounds.width as f32 - half;
        let max_y = self.bounds.height as f32 - half;
        if self.position.x <= half
            || self.position.x >= max_x
            || self.position.y <= half
            || self.position.y >= max_y
        {
            self.dead = true;
            return;
        }

        if self.position.distance(target) < self.bounds.min_target_distance {
            self.success = true;
        }
    }

    /// Ask the brain for a decision, apply kinematics, and record the step.
    fn advance(&mut self) {
        let decision = self.brain.decide(self.position);
        let left = decision[0].round();
        let up = decision[1].round();
        let right = decision[2].round();
        let down = decision[3].round();

        self.acceleration = Vec2::new(
            (right - left) * ACCELERATION_GAIN,
            (down - up) * ACCELERATION_GAIN,
        );
        self.velocity.add(self.acceleration);
        self.velocity.limit(MAX_SPEED);
        self.position.add(self.velocity);
        self.brain.record_step(self.position, decision);
    }

    /// Fitness of a terminal (or still-active) dot against the target.
    ///
    /// Successful dots reward fewer steps; unsuccessful dots reward
    /// proximity. `steps >= 1` whenever `success` is set because the move
    /// precedes the success check, so the step division is well-defined;
    /// a zero distance is excluded by the success threshold.
    #[must_use]
    pub fn fitness(&self, target: Vec2) -> f32 {
        if self.success {
            let size = self.bounds.dot_size as f32;
            let steps = self.brain.steps() as f32;
            1.0 / (size * size) + 10_000.0 / (steps * steps)
        } else {
            let distance = self.position.distance(target);
            1.0 / (distance * distance)
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.dead || self.success
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn is_champion(&self) -> bool {
        self.champion
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub const fn brain(&self) -> &Brain {
        &self.brain
    }
}

/// The current generation of dots and the generational loop over them.
///
/// The dot collection is replaced wholesale at each generational
/// transition, never mutated in place.
#[derive(Debug)]
pub struct Population {
    dots: Vec<Dot>,
    generation: Generation,
    min_step: usize,
    config: SimulationConfig,
    rng: SmallRng,
}

impl Population {
    /// Validate the configuration and spawn the first generation with
    /// empty-dataset brains.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = config.seeded_rng();
        let mut dots = Vec::with_capacity(config.population_size);
        for _ in 0..config.population_size {
            let brain = Brain::new(&config, Dataset::default(), &mut rng)?;
            dots.push(Dot::new(&config, brain));
        }
        Ok(Self {
            dots,
            generation: Generation::first(),
            min_step: config.step_budget,
            config,
            rng,
        })
    }

    /// Advance every dot one tick; terminal dots ignore the call.
    pub fn update(&mut self, target: Vec2) {
        for dot in &mut self.dots {
            dot.update(target);
        }
    }

    /// True iff every dot is terminal — the driver's signal to run
    /// [`Population::natural_selection`] instead of [`Population::update`].
    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.dots.iter().all(Dot::is_terminal)
    }

    /// Replace the generation: score fitness, pick the champion and a
    /// breeding reference, derive mutated datasets, and retrain offspring
    /// brains. Call only once every dot is terminal.
    ///
    /// Champion and breeding reference are independent fitness-proportionate
    /// concerns: the champion merely claims slot zero's flag, while the
    /// reference's dataset seeds every other slot. They may be different
    /// dots, which injects diversity.
    pub fn natural_selection(&mut self, target: Vec2) -> Result<(), SimulationError> {
        let fitness: Vec<f32> = self.dots.iter().map(|dot| dot.fitness(target)).collect();
        let fitness_sum: f32 = fitness.iter().sum();

        let champion_index = fitness
            .iter()
            .enumerate()
            .max_by_key(|(_, value)| OrderedFloat(**value))
            .map_or(0, |(index, _)| index);

        let min_step = self
            .dots
            .iter()
            .filter(|dot| dot.is_success())
            .map(|dot| dot.brain().steps())
            .min()
            .unwrap_or(self.config.step_budget);

        let reference_index = self.select_reference(&fitness, fitness_sum);
        let reference_dataset = self.dots[reference_index].brain().dataset().clone();

        let mut next = Vec::with_capacity(self.dots.len());
        next.push(self.dots[champion_index].champion_copy(&self.config, &mut self.rng)?);
        for _ in 1..self.dots.len() {
            let dataset = self.mutate_dataset(&reference_dataset);
            let brain = Brain::new(&self.config, dataset, &mut self.rng)?;
            next.push(Dot::new(&self.config, brain));
        }

        self.dots = next;
        self.min_step = min_step;
        self.generation = self.generation.next();
        Ok(())
    }

    /// Fitness-proportionate draw: a uniform threshold in
    /// `[0, fitness_sum]` against the running prefix sum. Falls back to the
    /// last dot so floating-point round-off can never leave the draw empty.
    fn select_reference(&mut self, fitness: &[f32], fitness_sum: f32) -> usize {
        let threshold = self.rng.random::<f32>() * fitness_sum;
        let mut running = 0.0_f32;
        for (index, value) in fitness.iter().enumerate() {
            running += value;
            if running >= threshold {
                return index;
            }
        }
        fitness.len() - 1
    }

    /// Item-wise dataset inheritance: keep each example with probability
    /// `1 - mutation_ratio`, otherwise replace it with a freshly randomized
    /// (position, decision) pair drawn from the world bounds.
    fn mutate_dataset(&mut self, source: &Dataset) -> Dataset {
        let mut items = Vec::with_capacity(source.len());
        for sample in source.items() {
            if self.rng.random::<f32>() >= self.config.mutation_ratio {
                items.push(sample.clone());
            } else {
                items.push(self.random_sample());
            }
        }
        Dataset::new(items)
    }

    fn random_sample(&mut self) -> Sample {
        let width = self.config.world_width as f32;
        let height = self.config.world_height as f32;
        let position = vec![
            self.rng.random_range(0.0..=width),
            self.rng.random_range(0.0..=height),
        ];
        let decision: Vec<f32> = (0..BRAIN_OUTPUTS)
            .map(|_| self.rng.random_range(0.0..=1.0_f32).round())
            .collect();
        Sample::new(
            Tensor::new(TensorShape::one_d(BRAIN_INPUTS), position),
            Tensor::new(TensorShape::one_d(BRAIN_OUTPUTS), decision),
        )
    }

    /// Ordered dots of the current generation, for observation.
    #[must_use]
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Minimum step count among the previous generation's successful dots;
    /// the step budget until a dot has succeeded.
    #[must_use]
    pub const fn min_step(&self) -> usize {
        self.min_step
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SimulationConfig {
        SimulationConfig {
            population_size: 3,
            world_width: 100,
            world_height: 100,
            dot_size: 4,
            step_budget: 40,
            min_target_distance: 5.0,
            mutation_ratio: 0.01,
            sample_interval: 5,
            learning_rate: 0.5,
            epochs: 2,
            batch_size: 4,
            rng_seed: Some(0xBADD_0075),
        }
    }

    fn test_brain(config: &SimulationConfig, seed: u64) -> Brain {
        let mut rng = SmallRng::seed_from_u64(seed);
        Brain::new(config, Dataset::default(), &mut rng).expect("brain")
    }

    #[test]
    fn limit_preserves_direction_and_caps_magnitude() {
        let mut velocity = Vec2::new(30.0, 40.0);
        velocity.limit(5.0);
        assert!((velocity.x - 3.0).abs() < 1e-5);
        assert!((velocity.y - 4.0).abs() < 1e-5);

        let mut slow = Vec2::new(1.0, 1.0);
        slow.limit(5.0);
        assert_eq!(slow, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn config_validation_rejects_bad_fields() {
        let mut config = test_config();
        config.population_size = 0;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_)),
        ));

        let mut config = test_config();
        config.mutation_ratio = 1.5;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.dot_size = 100;
        assert!(config.validate().is_err());

        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn brain_records_on_the_sample_interval() {
        let config = test_config();
        let mut brain = test_brain(&config, 1);
        let decision = [0.0, 0.0, 1.0, 1.0];
        for _ in 0..config.sample_interval - 1 {
            brain.record_step(Vec2::new(10.0, 10.0), decision);
        }
        assert!(brain.dataset().is_empty());
        brain.record_step(Vec2::new(10.0, 10.0), decision);
        assert_eq!(brain.dataset().len(), 1);
        let sample = &brain.dataset().items()[0];
        assert_eq!(sample.input().body(), &[10.0, 10.0]);
        assert_eq!(sample.target().body(), &decision);
    }

    #[test]
    fn decide_produces_four_bounded_components() {
        let config = test_config();
        let mut brain = test_brain(&config, 2);
        let decision = brain.decide(Vec2::new(50.0, 50.0));
        assert!(decision
            .iter()
            .all(|v| (0.0..=1.0).contains(v) && v.is_finite()));
    }

    #[test]
    fn terminal_dots_ignore_updates() {
        let config = test_config();
        let mut dot = Dot::new(&config, test_brain(&config, 3));
        dot.dead = true;
        let position = dot.position;
        dot.update(Vec2::new(50.0, 50.0));
        assert_eq!(dot.position, position);
        assert_eq!(dot.brain.steps(), 0);
    }

    #[test]
    fn step_budget_exhaustion_kills_the_dot() {
        let config = test_config();
        let mut dot = Dot::new(&config, test_brain(&config, 4));
        let target = Vec2::new(-1_000.0, -1_000.0); // unreachable
        for _ in 0..config.step_budget {
            if dot.is_terminal() {
                break;
            }
            dot.update(target);
        }
        assert!(dot.is_terminal());
        assert!(dot.brain.steps() <= config.step_budget);
    }

    #[test]
    fn successful_dots_with_fewer_steps_score_higher() {
        let config = test_config();
        let target = Vec2::new(50.0, 50.0);

        let mut fast = Dot::new(&config, test_brain(&config, 5));
        fast.success = true;
        fast.brain.steps = 10;

        let mut slow = Dot::new(&config, test_brain(&config, 6));
        slow.success = true;
        slow.brain.steps = 20;

        assert!(fast.fitness(target) > slow.fitness(target));
    }

    #[test]
    fn closer_unsuccessful_dots_score_higher() {
        let config = test_config();
        let target = Vec2::new(50.0, 50.0);

        let mut near = Dot::new(&config, test_brain(&config, 7));
        near.dead = true;
        near.position = Vec2::new(45.0, 50.0);

        let mut far = Dot::new(&config, test_brain(&config, 8));
        far.dead = true;
        far.position = Vec2::new(10.0, 10.0);

        assert!(near.fitness(target) > far.fitness(target));
    }

    #[test]
    fn reference_selection_always_picks_a_dot() {
        let config = test_config();
        let mut population = Population::new(config).expect("population");
        let fitness = [0.2_f32, 0.5, 0.3];
        let sum: f32 = fitness.iter().sum();
        for _ in 0..64 {
            let index = population.select_reference(&fitness, sum);
            assert!(index < fitness.len());
        }
    }

    #[test]
    fn zero_mutation_ratio_keeps_the_dataset_verbatim() {
        let mut config = test_config();
        config.mutation_ratio = 0.0;
        let mut population = Population::new(config).expect("population");
        let source = marker_dataset();
        let derived = population.mutate_dataset(&source);
        assert_eq!(derived, source);
    }

    #[test]
    fn full_mutation_ratio_replaces_every_item() {
        let mut config = test_config();
        config.mutation_ratio = 1.0;
        let mut population = Population::new(config).expect("population");
        let source = marker_dataset();
        let derived = population.mutate_dataset(&source);
        assert_eq!(derived.len(), source.len());
        for sample in derived.items() {
            // Marker inputs sit far outside the randomization range.
            assert_ne!(sample.input().body(), &[9_999.0, 9_999.0]);
        }
    }

    fn marker_dataset() -> Dataset {
        let items = (0..6)
            .map(|i| {
                Sample::new(
                    Tensor::new(TensorShape::one_d(2), vec![9_999.0, 9_999.0]),
                    Tensor::new(TensorShape::one_d(4), vec![i as f32 % 2.0; 4]),
                )
            })
            .collect();
        Dataset::new(items)
    }

    #[test]
    fn min_step_tracks_the_fastest_success() {
        let config = test_config();
        let mut population = Population::new(config.clone()).expect("population");
        for dot in &mut population.dots {
            dot.dead = true;
        }
        population.dots[1].dead = false;
        population.dots[1].success = true;
        population.dots[1].brain.steps = 17;

        population
            .natural_selection(Vec2::new(50.0, 50.0))
            .expect("selection");
        assert_eq!(population.min_step(), 17);
        assert_eq!(population.generation(), Generation(2));
    }

    #[test]
    fn min_step_defaults_to_the_budget_without_successes() {
        let config = test_config();
        let budget = config.step_budget;
        let mut population = Population::new(config).expect("population");
        for dot in &mut population.dots {
            dot.dead = true;
        }
        population
            .natural_selection(Vec2::new(50.0, 50.0))
            .expect("selection");
        assert_eq!(population.min_step(), budget);
    }
}
