//! Configuration parameters for the GA-based PID tuner.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A closed `[min, max]` interval used to bound gene values and the
/// controller output. Serialized as a two-element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary(pub f64, pub f64);

impl Boundary {
    /// Create a new boundary from its lower and upper limits.
    pub fn new(min: f64, max: f64) -> Self {
        Boundary(min, max)
    }

    /// The lower limit.
    pub fn min(&self) -> f64 {
        self.0
    }

    /// The upper limit.
    pub fn max(&self) -> f64 {
        self.1
    }

    /// Clamp a value into the boundary.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.0 {
            self.0
        } else if value > self.1 {
            self.1
        } else {
            value
        }
    }

    /// Check whether a value lies inside the boundary.
    pub fn contains(&self, value: f64) -> bool {
        self.0 <= value && value <= self.1
    }

    /// Draw a uniform sample from the boundary.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.0..=self.1)
    }

    /// Both limits finite and correctly ordered.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.0 <= self.1
    }
}

/// Errors detected when validating a configuration. Raised once at
/// construction time and propagated to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population-number must be at least 1")]
    EmptyPopulation,
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("{name} is not a valid boundary: [{min}, {max}]")]
    InvalidBoundary {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("period * slicing-per-period must be at least 2, got {samples}")]
    TooFewSamples { samples: usize },
    #[error("initial-y-now must be finite, got {value}")]
    NonFiniteInitialOutput { value: f64 },
}

/// Parameters of the genetic algorithm itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneticConfig {
    /// Boundary applied uniformly to the kp, ki and kd genes
    #[serde(rename = "PID-boundary")]
    pub pid_boundary: Boundary,
    /// Boundary of the eta gene
    pub eta_boundary: Boundary,
    /// Number of chromosomes in the population
    pub population_number: usize,
    /// Probability that a child is mutated
    pub mutation_probability: f64,
    /// Probability that crossover actually occurs
    pub crossover_rate: f64,
}

/// Parameters of one control-system simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimulationConfig {
    /// Plant output at time zero
    pub initial_y_now: f64,
    /// Number of square-wave cycles in the reference signal
    pub period: usize,
    /// Samples per cycle
    pub slicing_per_period: usize,
    /// Clamp applied to the controller action u
    pub u_boundary: Boundary,
}

impl SimulationConfig {
    /// Total number of time steps in one run.
    pub fn samples(&self) -> usize {
        self.period * self.slicing_per_period
    }
}

/// Full configuration: GA parameters plus the shared simulation setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub genetic_algorithm: GeneticConfig,
    pub control_system: SimulationConfig,
    /// Seed for the random source; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            genetic_algorithm: GeneticConfig {
                pid_boundary: Boundary(0.0, 2.0),
                eta_boundary: Boundary(0.0, 1.0),
                population_number: 100,
                mutation_probability: 0.1,
                crossover_rate: 0.8,
            },
            control_system: SimulationConfig {
                initial_y_now: 0.0,
                period: 4,
                slicing_per_period: 50,
                u_boundary: Boundary(-5.0, 5.0),
            },
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the boundary shared by the kp, ki and kd genes.
    pub fn with_pid_boundary(mut self, min: f64, max: f64) -> Self {
        self.genetic_algorithm.pid_boundary = Boundary(min, max);
        self
    }

    /// Set the boundary of the eta gene.
    pub fn with_eta_boundary(mut self, min: f64, max: f64) -> Self {
        self.genetic_algorithm.eta_boundary = Boundary(min, max);
        self
    }

    /// Set the population size.
    pub fn with_population_number(mut self, n: usize) -> Self {
        self.genetic_algorithm.population_number = n;
        self
    }

    /// Set the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.genetic_algorithm.mutation_probability = p;
        self
    }

    /// Set the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.genetic_algorithm.crossover_rate = rate;
        self
    }

    /// Set the plant output at time zero.
    pub fn with_initial_y_now(mut self, y: f64) -> Self {
        self.control_system.initial_y_now = y;
        self
    }

    /// Set the number of reference-signal cycles.
    pub fn with_period(mut self, period: usize) -> Self {
        self.control_system.period = period;
        self
    }

    /// Set the number of samples per cycle.
    pub fn with_slicing_per_period(mut self, slicing: usize) -> Self {
        self.control_system.slicing_per_period = slicing;
        self
    }

    /// Set the clamp applied to the controller action.
    pub fn with_u_boundary(mut self, min: f64, max: f64) -> Self {
        self.control_system.u_boundary = Boundary(min, max);
        self
    }

    /// Set the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ga = &self.genetic_algorithm;
        let cs = &self.control_system;

        if ga.population_number < 1 {
            return Err(ConfigError::EmptyPopulation);
        }

        for (name, value) in [
            ("mutation-probability", ga.mutation_probability),
            ("crossover-rate", ga.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        for (name, boundary) in [
            ("PID-boundary", ga.pid_boundary),
            ("eta-boundary", ga.eta_boundary),
            ("u-boundary", cs.u_boundary),
        ] {
            if !boundary.is_valid() {
                return Err(ConfigError::InvalidBoundary {
                    name,
                    min: boundary.0,
                    max: boundary.1,
                });
            }
        }

        if cs.samples() < 2 {
            return Err(ConfigError::TooFewSamples {
                samples: cs.samples(),
            });
        }

        if !cs.initial_y_now.is_finite() {
            return Err(ConfigError::NonFiniteInitialOutput {
                value: cs.initial_y_now,
            });
        }

        Ok(())
    }
}
