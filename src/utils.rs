//! Utility functions and structures for the PID tuner.

use std::time::Duration;

/// Sample a unit-amplitude square wave with 50% duty over `[0, 1]`.
///
/// Returns `samples` points covering `cycles` full cycles, sample `i`
/// taken at phase `cycles * i / samples`: `+1.0` through the first half
/// of each cycle, `-1.0` through the second. The wave starts high.
pub fn square_wave(cycles: usize, samples: usize) -> Vec<f64> {
    (0..samples)
        .map(|i| {
            let phase = (cycles * i) as f64 / samples as f64;
            if phase.fract() < 0.5 {
                1.0
            } else {
                -1.0
            }
        })
        .collect()
}

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Summary of one tuning run.
pub struct TuningStatistics {
    pub generations: u32,
    pub runtime: Duration,
    pub best_fitness: f64,
    pub best_kp: f64,
    pub best_ki: f64,
    pub best_kd: f64,
    pub best_eta: f64,
}

impl TuningStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Tuning Statistics:
- Generations: {}
- Runtime: {}
- Best Fitness: {:.4}
- Best Kp: {:.4}
- Best Ki: {:.4}
- Best Kd: {:.4}
- Best Eta: {:.4}",
            self.generations,
            format_duration(self.runtime),
            self.best_fitness,
            self.best_kp,
            self.best_ki,
            self.best_kd,
            self.best_eta
        )
    }
}
