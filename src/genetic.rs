//! Genetic operators and population evolution for the PID tuner.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chromosome::Chromosome;
use crate::config::{Boundary, Config, ConfigError, GeneticConfig, SimulationConfig};
use crate::simulation::ControlSystemSimulator;

/// Tournament size used when producing a generation.
pub const TOURNAMENT_SIZE: usize = 2;

/// The genetic operators: tournament selection, crossover and mutation.
///
/// The operators are stateless apart from their configured parameters;
/// every random decision is drawn from the caller-supplied source, which
/// keeps them deterministic under a seeded generator.
pub struct GeneticOperators {
    pid_boundary: Boundary,
    eta_boundary: Boundary,
    mutation_probability: f64,
    crossover_rate: f64,
}

impl GeneticOperators {
    /// Build the operator set from the GA configuration.
    pub fn new(config: &GeneticConfig) -> Self {
        GeneticOperators {
            pid_boundary: config.pid_boundary,
            eta_boundary: config.eta_boundary,
            mutation_probability: config.mutation_probability,
            crossover_rate: config.crossover_rate,
        }
    }

    /// Tournament selection over precomputed fitness values.
    ///
    /// Draws one baseline index and `k` challenger indices, all uniform
    /// over the full population, and returns the lowest-fitness index
    /// seen. Comparison is strict, so ties keep the earlier candidate.
    pub fn tournament_select<R: Rng>(
        &self,
        rng: &mut R,
        fitness_values: &[f64],
        k: usize,
    ) -> usize {
        let mut selection_index = rng.gen_range(0..fitness_values.len());

        for _ in 0..k {
            let index = rng.gen_range(0..fitness_values.len());
            if fitness_values[index] < fitness_values[selection_index] {
                selection_index = index;
            }
        }

        selection_index
    }

    /// Cross two parents into one child.
    ///
    /// With probability `1 - crossover_rate` the child is parent 1
    /// unchanged. Otherwise a single uniform draw picks one of five
    /// equally wide gene-combination patterns; the last band returns
    /// parent 2 entirely.
    pub fn cross_over<R: Rng>(
        &self,
        rng: &mut R,
        parent_1: &Chromosome,
        parent_2: &Chromosome,
    ) -> Chromosome {
        if rng.gen::<f64>() >= self.crossover_rate {
            return *parent_1;
        }

        let random_number = rng.gen::<f64>();
        if random_number < 1.0 / 5.0 {
            Chromosome::new(parent_2.kp, parent_1.ki, parent_1.kd, parent_2.eta)
        } else if random_number < 2.0 / 5.0 {
            Chromosome::new(parent_1.kp, parent_2.ki, parent_1.kd, parent_2.eta)
        } else if random_number < 3.0 / 5.0 {
            Chromosome::new(parent_1.kp, parent_1.ki, parent_2.kd, parent_1.eta)
        } else if random_number < 4.0 / 5.0 {
            Chromosome::new(parent_2.kp, parent_1.ki, parent_2.kd, parent_1.eta)
        } else {
            *parent_2
        }
    }

    /// Mutate at most one gene of the chromosome.
    ///
    /// One shared perturbation magnitude is drawn from `[-0.3, 0.3]`, then
    /// four independent draws are tested else-if against nested fractions
    /// of the mutation probability (0.25, 0.5, 0.75, 1.0). The first
    /// threshold that fires perturbs its gene (eta scaled by 4) and clamps
    /// it into its boundary. Later genes are strictly less likely to
    /// mutate than earlier ones; that asymmetry is part of the observable
    /// behavior.
    pub fn mutate<R: Rng>(&self, rng: &mut R, chromosome: Chromosome) -> Chromosome {
        let mut result = chromosome;
        let value_scale_number = rng.gen_range(-0.3..0.3);

        if rng.gen::<f64>() < self.mutation_probability * 0.25 {
            result.kp += rng.gen::<f64>() * value_scale_number;
            result.kp = self.pid_boundary.clamp(result.kp);
        } else if rng.gen::<f64>() < self.mutation_probability * 0.5 {
            result.ki += rng.gen::<f64>() * value_scale_number;
            result.ki = self.pid_boundary.clamp(result.ki);
        } else if rng.gen::<f64>() < self.mutation_probability * 0.75 {
            result.kd += rng.gen::<f64>() * value_scale_number;
            result.kd = self.pid_boundary.clamp(result.kd);
        } else if rng.gen::<f64>() < self.mutation_probability {
            result.eta += 4.0 * rng.gen::<f64>() * value_scale_number;
            result.eta = self.eta_boundary.clamp(result.eta);
        }

        result
    }
}

/// The genetic algorithm: owns the population, evaluates fitness through
/// the control-system simulator and evolves generation by generation.
pub struct GeneticAlgorithm {
    operators: GeneticOperators,
    population_number: usize,
    simulation_config: SimulationConfig,
    population: Vec<Chromosome>,
    rng: ChaCha8Rng,
}

impl GeneticAlgorithm {
    /// Validate the configuration and sample the initial population, each
    /// gene drawn uniformly from its boundary.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let ga = &config.genetic_algorithm;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let population: Vec<Chromosome> = (0..ga.population_number)
            .map(|_| Chromosome::sample(&mut rng, &ga.pid_boundary, &ga.eta_boundary))
            .collect();

        debug!(
            "sampled initial population of {} chromosomes",
            population.len()
        );

        Ok(GeneticAlgorithm {
            operators: GeneticOperators::new(ga),
            population_number: ga.population_number,
            simulation_config: config.control_system.clone(),
            population,
            rng,
        })
    }

    /// The current population, in index order.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Fitness of one individual: a fresh simulator run over the shared
    /// simulation configuration. No caching.
    pub fn calculate_fitness(&self, index: usize) -> f64 {
        let mut control_system =
            ControlSystemSimulator::new(&self.population[index], &self.simulation_config);

        control_system.run();
        control_system.get_fitness_value()
    }

    /// Fitness of every individual, index order preserved.
    pub fn evaluate_population(&self) -> Vec<f64> {
        (0..self.population_number)
            .map(|index| self.calculate_fitness(index))
            .collect()
    }

    /// Replace the population with one full generation of children.
    ///
    /// For each slot a parent index is tournament-selected on the full
    /// population; the crossover partner is the next index, wrapping to
    /// the front at the end (so a single-individual population crosses
    /// with itself). Crossover then mutation produce the child by value.
    pub fn produce_next_generation(&mut self) {
        let fitness_values = self.evaluate_population();

        let mut new_population = Vec::with_capacity(self.population_number);
        for _ in 0..self.population_number {
            let parent_index =
                self.operators
                    .tournament_select(&mut self.rng, &fitness_values, TOURNAMENT_SIZE);
            let partner_index = (parent_index + 1) % self.population_number;

            let child = self.operators.cross_over(
                &mut self.rng,
                &self.population[parent_index],
                &self.population[partner_index],
            );
            new_population.push(self.operators.mutate(&mut self.rng, child));
        }

        self.population = new_population;
    }
}
