//! Basic example of tuning a PID controller with the genetic algorithm.

use ga_pid_tuner::config::Config;
use ga_pid_tuner::TunerAlgorithm;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Configure the tuner
    let config = Config::new()
        .with_pid_boundary(0.0, 2.0)
        .with_eta_boundary(0.0, 0.5)
        .with_population_number(50)
        .with_mutation_probability(0.1)
        .with_crossover_rate(0.8)
        .with_initial_y_now(0.0)
        .with_period(2)
        .with_slicing_per_period(25)
        .with_u_boundary(-5.0, 5.0)
        .with_seed(2023);

    // Create and run the tuner
    println!("Starting tuning run (100 generations)");
    let mut algorithm = TunerAlgorithm::new(config)?;
    let best = algorithm.run(100);

    // Print results
    println!("Best fitness: {:.4}", algorithm.best_fitness);
    println!(
        "Best gains: kp = {:.4}, ki = {:.4}, kd = {:.4}, eta = {:.4}",
        best.kp, best.ki, best.kd, best.eta
    );
    println!();
    println!("{}", algorithm.statistics().format());

    Ok(())
}
