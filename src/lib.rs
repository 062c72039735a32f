//! # GA PID Tuner
//!
//! Offline tuning of a discrete-time PID controller driving a nonlinear
//! plant, using a genetic algorithm as the optimizer.
//!
//! Given a plant model and a square-wave reference signal, the tuner
//! searches for the PID gains (and one plant nonlinearity coefficient)
//! that minimize the summed absolute tracking error over one simulated
//! run. Each candidate is scored by a deterministic closed-loop
//! simulation; a generational genetic algorithm with tournament
//! selection, banded crossover and sparse single-gene mutation drives
//! the search.

pub mod chromosome;
pub mod config;
pub mod genetic;
pub mod simulation;
pub mod utils;

use crate::chromosome::Chromosome;
use crate::config::{Config, ConfigError};
use crate::genetic::GeneticAlgorithm;
use crate::utils::TuningStatistics;

use log::{debug, info};
use std::time::{Duration, Instant};

/// The main structure that orchestrates a tuning run.
pub struct TunerAlgorithm {
    pub config: Config,
    pub genetic: GeneticAlgorithm,
    pub best_chromosome: Option<Chromosome>,
    pub best_fitness: f64,
    pub generations: u32,
    pub run_time: Duration,
    pub start_time: Instant,
}

impl TunerAlgorithm {
    /// Create a new tuner for the given configuration.
    ///
    /// The best chromosome starts as the first individual, so a run
    /// whose every fitness is NaN (a plant diverging to infinity) still
    /// returns a chromosome instead of panicking.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let genetic = GeneticAlgorithm::new(&config)?;
        let best_chromosome = Some(genetic.population()[0]);

        Ok(TunerAlgorithm {
            config,
            genetic,
            best_chromosome,
            best_fitness: f64::INFINITY,
            generations: 0,
            run_time: Duration::from_secs(0),
            start_time: Instant::now(),
        })
    }

    /// Evolve the population for the given number of generations and
    /// return the best chromosome seen over the whole run.
    ///
    /// The generation count is the caller's stopping decision; `run` may
    /// be called again to continue from the current population.
    pub fn run(&mut self, generations: u32) -> Chromosome {
        self.start_time = Instant::now();

        self.record_best();

        for _ in 0..generations {
            self.genetic.produce_next_generation();
            self.generations += 1;
            self.record_best();

            debug!(
                "generation {}: best fitness {:.4}",
                self.generations, self.best_fitness
            );
        }

        self.run_time = self.start_time.elapsed();

        info!(
            "finished after {} generations, best fitness {:.4}",
            self.generations, self.best_fitness
        );

        // Seeded with the first individual at construction, so always
        // present.
        self.best_chromosome.unwrap()
    }

    /// Scan the current population and keep the lowest fitness seen so
    /// far. Strict comparison, so a NaN fitness can never become best.
    fn record_best(&mut self) {
        for (index, fitness) in self.genetic.evaluate_population().into_iter().enumerate() {
            if fitness < self.best_fitness {
                self.best_fitness = fitness;
                self.best_chromosome = Some(self.genetic.population()[index]);
            }
        }
    }

    /// Summarize the run so far.
    pub fn statistics(&self) -> TuningStatistics {
        let best = self.best_chromosome.unwrap_or(Chromosome::new(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        ));

        TuningStatistics {
            generations: self.generations,
            runtime: self.run_time,
            best_fitness: self.best_fitness,
            best_kp: best.kp,
            best_ki: best.ki,
            best_kd: best.kd,
            best_eta: best.eta,
        }
    }
}
