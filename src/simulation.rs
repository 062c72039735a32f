//! Discrete-time simulation of the PID-controlled nonlinear plant.

use crate::chromosome::Chromosome;
use crate::config::{Boundary, SimulationConfig};
use crate::utils::square_wave;

/// One deterministic simulation run of the closed loop: a PID controller
/// driving the nonlinear plant, tracking a square-wave reference.
///
/// The simulator is a pure function of `(chromosome, config)`: it holds no
/// shared state and performs no I/O, so each fitness evaluation gets a
/// throwaway instance.
///
/// The plant law needs output and action values two steps back, but the
/// loop keeps a single `fore` slot per series, refreshed to the current
/// value at the end of every step. After the first step the t-2 terms are
/// therefore approximated by t-1 values. This first-order state retention
/// is the modeled dynamics; widening it to a true two-deep history would
/// change the numerics.
pub struct ControlSystemSimulator {
    kp: f64,
    ki: f64,
    kd: f64,
    eta: f64,
    u_boundary: Boundary,
    /// Square-wave reference the controller tracks
    pub reference_signal: Vec<f64>,
    /// Plant output at each time step
    pub outputs: Vec<f64>,
    /// Tracking error at each time step
    pub errors: Vec<f64>,
    y_now: f64,
    y_fore: f64,
    u_now: f64,
    u_fore: f64,
    error_now: f64,
    error_fore: f64,
    error_sum: f64,
}

impl ControlSystemSimulator {
    /// Set up a run for one chromosome: build the reference signal and
    /// initialize the loop state at time zero.
    pub fn new(chromosome: &Chromosome, config: &SimulationConfig) -> Self {
        let reference_signal = square_wave(config.period, config.samples());

        let y_now = config.initial_y_now;
        let error_now = reference_signal[0] - y_now;

        let mut simulator = ControlSystemSimulator {
            kp: chromosome.kp,
            ki: chromosome.ki,
            kd: chromosome.kd,
            eta: chromosome.eta,
            u_boundary: config.u_boundary,
            reference_signal,
            outputs: vec![y_now],
            errors: vec![error_now],
            y_now,
            y_fore: 0.0,
            u_now: 0.0,
            u_fore: 0.0,
            error_now,
            error_fore: 0.0,
            error_sum: 0.0,
        };
        simulator.update_u_now();
        simulator
    }

    /// PID law: `u = kp*e + ki*sum(e) + kd*(e - e_fore)`, clamped into the
    /// configured action boundary.
    fn update_u_now(&mut self) {
        let u_next = self.kp * self.error_now
            + self.ki * self.error_sum
            + self.kd * (self.error_now - self.error_fore);

        self.u_now = self.u_boundary.clamp(u_next);
    }

    /// Plant law: linear recurrence in y and u plus the eta-weighted
    /// sinusoidal term.
    fn update_y_now(&mut self) {
        self.y_now = 2.6 * self.y_now - 1.2 * self.y_fore
            + self.u_now
            + 1.2 * self.u_fore
            + self.eta
                * self.y_now
                * (self.u_now + self.u_fore + self.y_now + self.y_fore).sin();
    }

    /// Run the closed loop over every remaining time step.
    ///
    /// Each step advances the plant, measures the new tracking error,
    /// recomputes the controller action, then shifts the `fore` slots.
    /// The error sum fed into the integral term is the sum over steps
    /// strictly before the current one.
    ///
    /// Boundary behavior: with fewer than two total samples the loop body
    /// never executes and the fitness degenerates to `|error_0|`. Such
    /// configurations are rejected by [`Config::validate`], so this arm is
    /// reachable only when a `SimulationConfig` is built directly.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    pub fn run(&mut self) {
        for index in 1..self.reference_signal.len() {
            self.update_y_now();
            self.error_now = self.reference_signal[index] - self.y_now;
            self.update_u_now();

            self.error_sum += self.error_now;
            self.errors.push(self.error_now);
            self.error_fore = self.error_now;

            self.outputs.push(self.y_now);
            self.y_fore = self.y_now;

            self.u_fore = self.u_now;
        }
    }

    /// Fitness of the run: the L1 norm of the error history. Lower is
    /// better; always non-negative.
    pub fn get_fitness_value(&self) -> f64 {
        self.errors.iter().map(|error| error.abs()).sum()
    }
}
