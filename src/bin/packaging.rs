//! Packs a randomly generated item catalog with the knapsack GA and prints
//! each generation's best selection.
//!
//! Usage: `packaging [SEED]`. Set `RUST_LOG=debug` for engine logging.

use std::process::ExitCode;

use knapsack_ga::catalog::Catalog;
use knapsack_ga::ga::{GaConfig, GaRunner, GenerationStats, Population};
use knapsack_ga::random::create_rng;

const NUM_ITEMS: usize = 10;

fn main() -> ExitCode {
    env_logger::init();

    let seed = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => rand::random(),
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            eprintln!("invalid seed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = GaConfig::default().with_seed(seed);
    println!("seed = {seed}");
    println!("max_generations = {}", config.max_generations);
    println!("num_items = {NUM_ITEMS}");
    println!("population_size = {}", config.population_size);
    println!("mutation_rate = {:.2}", config.mutation_rate);
    println!("crossover_rate = {:.2}", config.crossover_rate);
    println!("knapsack_capacity = {}", config.knapsack_capacity);
    println!("elitism_count = {}", config.elitism_count);

    let mut rng = create_rng(seed);
    let catalog = Catalog::random(NUM_ITEMS, &mut rng);
    println!("\nItems (volume, benefit):");
    for (i, item) in catalog.iter().enumerate() {
        println!("  {i:>2}: ({}, {})", item.volume, item.benefit);
    }
    println!(
        "total volume = {} (capacity {})\n",
        catalog.total_volume(),
        config.knapsack_capacity
    );

    let result = match GaRunner::run_with_observer(catalog, &config, report_generation) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(last) = result.history.latest() {
        println!("BEST POPULATION");
        print!("{last}");
    }
    println!(
        "BEST SOLUTION: {}  Fit: {}  Vol: {}",
        result.best,
        result.best.fitness(),
        result.best.volume()
    );
    println!(
        "BEST OF RUN:   {}  Fit: {}  Vol: {}",
        result.best_of_run,
        result.best_of_run.fitness(),
        result.best_of_run.volume()
    );
    println!(
        "Generations: {} ({})",
        result.generations,
        if result.converged {
            "fitness stable"
        } else {
            "budget exhausted"
        }
    );

    ExitCode::SUCCESS
}

fn report_generation(stats: &GenerationStats, population: &Population) {
    if stats.generation == 0 {
        println!("Initial Population:");
    } else {
        println!("Current Population:");
    }
    print!("{population}");

    let genes: Vec<&str> = stats
        .best_chromosome
        .iter()
        .map(|&packed| if packed { "1" } else { "0" })
        .collect();
    println!(
        "Generation {:>3}  best: {}  Fit: {}  Vol: {}  mean fitness: {:.2}",
        stats.generation,
        genes.join(" "),
        stats.best_fitness,
        stats.best_volume,
        stats.mean_fitness
    );
}
