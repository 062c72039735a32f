//! End-to-end tests for a whole tuning run.

use ga_pid_tuner::chromosome::Chromosome;
use ga_pid_tuner::config::Config;
use ga_pid_tuner::TunerAlgorithm;

/// A small, numerically tame configuration with a fixed seed.
fn create_test_config() -> Config {
    Config::new()
        .with_pid_boundary(0.0, 0.5)
        .with_eta_boundary(0.0, 0.01)
        .with_population_number(20)
        .with_mutation_probability(0.2)
        .with_crossover_rate(0.8)
        .with_initial_y_now(0.0)
        .with_period(1)
        .with_slicing_per_period(10)
        .with_u_boundary(-1.0, 1.0)
        .with_seed(1234)
}

#[test]
fn test_invalid_config_is_rejected_at_construction() {
    let config = create_test_config().with_population_number(0);
    assert!(TunerAlgorithm::new(config).is_err());
}

#[test]
fn test_run_tracks_a_valid_best_chromosome() {
    let config = create_test_config();
    let mut algorithm = TunerAlgorithm::new(config.clone()).unwrap();

    let best = algorithm.run(5);

    assert_eq!(algorithm.generations, 5);
    assert!(algorithm.best_fitness.is_finite());
    assert!(algorithm.best_fitness >= 0.0);
    assert_eq!(algorithm.best_chromosome, Some(best));
    assert!(best.is_within(
        &config.genetic_algorithm.pid_boundary,
        &config.genetic_algorithm.eta_boundary,
    ));
}

#[test]
fn test_best_fitness_never_exceeds_initial_population_best() {
    let mut algorithm = TunerAlgorithm::new(create_test_config()).unwrap();

    let initial_best = algorithm
        .genetic
        .evaluate_population()
        .into_iter()
        .fold(f64::INFINITY, f64::min);

    algorithm.run(10);

    assert!(algorithm.best_fitness <= initial_best);
}

#[test]
fn test_runs_with_same_seed_agree() {
    let config = create_test_config();
    let mut first = TunerAlgorithm::new(config.clone()).unwrap();
    let mut second = TunerAlgorithm::new(config).unwrap();

    let best_first = first.run(5);
    let best_second = second.run(5);

    assert_eq!(best_first, best_second);
    assert_eq!(first.best_fitness, second.best_fitness);
}

#[test]
fn test_run_can_be_continued() {
    let mut algorithm = TunerAlgorithm::new(create_test_config()).unwrap();

    algorithm.run(3);
    let fitness_after_three = algorithm.best_fitness;

    algorithm.run(2);

    assert_eq!(algorithm.generations, 5);
    assert!(algorithm.best_fitness <= fitness_after_three);
}

#[test]
fn test_divergent_plant_still_returns_a_chromosome() {
    // Zero gains leave the plant uncontrolled from y = 1; it grows until
    // the output overflows to infinity and every error, and therefore
    // every fitness, becomes NaN. The run must still hand back a
    // chromosome instead of panicking.
    let config = Config::new()
        .with_pid_boundary(0.0, 0.0)
        .with_eta_boundary(0.0, 0.0)
        .with_population_number(3)
        .with_initial_y_now(1.0)
        .with_period(1)
        .with_slicing_per_period(5000)
        .with_u_boundary(-1.0, 1.0)
        .with_seed(1);
    let mut algorithm = TunerAlgorithm::new(config).unwrap();

    let best = algorithm.run(1);

    // Every individual really does score NaN in this setup.
    assert!(algorithm
        .genetic
        .evaluate_population()
        .iter()
        .all(|fitness| fitness.is_nan()));
    assert_eq!(best, Chromosome::new(0.0, 0.0, 0.0, 0.0));
    assert!(algorithm.best_fitness.is_infinite());
}

#[test]
fn test_statistics_reflect_the_run() {
    let mut algorithm = TunerAlgorithm::new(create_test_config()).unwrap();
    algorithm.run(4);

    let statistics = algorithm.statistics();
    assert_eq!(statistics.generations, 4);
    assert_eq!(statistics.best_fitness, algorithm.best_fitness);

    let report = statistics.format();
    assert!(report.contains("Generations: 4"));
    assert!(report.contains("Best Fitness:"));
}
