//! Chromosome representation for the genetic algorithm population.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Boundary;

/// One candidate solution: the three PID gains plus the plant
/// nonlinearity coefficient eta.
///
/// Chromosomes are plain values. Crossover and mutation build new ones
/// instead of editing a parent in place, so the same parent can safely
/// feed several children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chromosome {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Coefficient of the plant's nonlinear term
    pub eta: f64,
}

impl Chromosome {
    /// Create a chromosome from explicit gene values.
    pub fn new(kp: f64, ki: f64, kd: f64, eta: f64) -> Self {
        Chromosome { kp, ki, kd, eta }
    }

    /// Sample a chromosome uniformly: kp, ki and kd from the PID
    /// boundary, eta from its own boundary, each gene independent.
    pub fn sample<R: Rng>(rng: &mut R, pid_boundary: &Boundary, eta_boundary: &Boundary) -> Self {
        Chromosome {
            kp: pid_boundary.sample(rng),
            ki: pid_boundary.sample(rng),
            kd: pid_boundary.sample(rng),
            eta: eta_boundary.sample(rng),
        }
    }

    /// Check that every gene lies inside the configured boundaries.
    pub fn is_within(&self, pid_boundary: &Boundary, eta_boundary: &Boundary) -> bool {
        pid_boundary.contains(self.kp)
            && pid_boundary.contains(self.ki)
            && pid_boundary.contains(self.kd)
            && eta_boundary.contains(self.eta)
    }
}
