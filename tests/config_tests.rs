//! Unit tests for configuration validation and wire names.

use ga_pid_tuner::config::{Boundary, Config, ConfigError};

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_builder_sets_nested_fields() {
    let config = Config::new()
        .with_pid_boundary(-1.0, 1.0)
        .with_eta_boundary(0.0, 0.2)
        .with_population_number(7)
        .with_mutation_probability(0.3)
        .with_crossover_rate(0.9)
        .with_initial_y_now(0.5)
        .with_period(2)
        .with_slicing_per_period(16)
        .with_u_boundary(-3.0, 3.0)
        .with_seed(99);

    assert_eq!(config.genetic_algorithm.pid_boundary, Boundary(-1.0, 1.0));
    assert_eq!(config.genetic_algorithm.population_number, 7);
    assert_eq!(config.control_system.samples(), 32);
    assert_eq!(config.seed, Some(99));
}

#[test]
fn test_empty_population_is_rejected() {
    let result = Config::new().with_population_number(0).validate();
    assert!(matches!(result, Err(ConfigError::EmptyPopulation)));
}

#[test]
fn test_out_of_range_probabilities_are_rejected() {
    let result = Config::new().with_mutation_probability(1.5).validate();
    assert!(matches!(
        result,
        Err(ConfigError::ProbabilityOutOfRange { name: "mutation-probability", .. })
    ));

    let result = Config::new().with_crossover_rate(-0.1).validate();
    assert!(matches!(
        result,
        Err(ConfigError::ProbabilityOutOfRange { name: "crossover-rate", .. })
    ));
}

#[test]
fn test_inverted_and_non_finite_boundaries_are_rejected() {
    let result = Config::new().with_pid_boundary(2.0, -2.0).validate();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidBoundary { name: "PID-boundary", .. })
    ));

    let result = Config::new().with_u_boundary(f64::NEG_INFINITY, 1.0).validate();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidBoundary { name: "u-boundary", .. })
    ));
}

#[test]
fn test_too_short_simulation_is_rejected() {
    let result = Config::new()
        .with_period(1)
        .with_slicing_per_period(1)
        .validate();
    assert!(matches!(result, Err(ConfigError::TooFewSamples { samples: 1 })));

    let result = Config::new().with_slicing_per_period(0).validate();
    assert!(matches!(result, Err(ConfigError::TooFewSamples { samples: 0 })));
}

#[test]
fn test_non_finite_initial_output_is_rejected() {
    let result = Config::new().with_initial_y_now(f64::NAN).validate();
    assert!(matches!(result, Err(ConfigError::NonFiniteInitialOutput { .. })));
}

#[test]
fn test_config_deserializes_from_kebab_case_keys() {
    let json = r#"{
        "genetic-algorithm": {
            "PID-boundary": [0.0, 2.0],
            "eta-boundary": [0.0, 1.0],
            "population-number": 25,
            "mutation-probability": 0.15,
            "crossover-rate": 0.85
        },
        "control-system": {
            "initial-y-now": 0.0,
            "period": 1,
            "slicing-per-period": 4,
            "u-boundary": [-1.0, 1.0]
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.genetic_algorithm.population_number, 25);
    assert_eq!(config.genetic_algorithm.pid_boundary, Boundary(0.0, 2.0));
    assert_eq!(config.control_system.u_boundary, Boundary(-1.0, 1.0));
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = Config::new().with_seed(5);
    let json = serde_json::to_string(&config).unwrap();

    assert!(json.contains("\"PID-boundary\""));
    assert!(json.contains("\"slicing-per-period\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.seed, Some(5));
    assert_eq!(
        parsed.genetic_algorithm.population_number,
        config.genetic_algorithm.population_number
    );
}

#[test]
fn test_boundary_clamp_and_contains() {
    let boundary = Boundary(-1.0, 1.0);

    assert_eq!(boundary.clamp(-2.0), -1.0);
    assert_eq!(boundary.clamp(0.5), 0.5);
    assert_eq!(boundary.clamp(3.0), 1.0);
    assert!(boundary.contains(1.0));
    assert!(!boundary.contains(1.0001));
}
