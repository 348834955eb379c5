// Demonstration: generate a maze, train a policy on it, and print the result.
//
// Build/run from this repo root:
//   cargo run --example maze_demo -- --size 11 --seed 42

use std::env;

use qmaze::{
    policy_map, solve, LearnerConfig, MazeEnvironment, MazeGenerator, PolicyLearner,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let size: usize = arg_value(&args, "--size")
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(11);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let generator = MazeGenerator::default();
    let mut maze_seed = seed;
    let mut maze = MazeEnvironment::new(generator.generate_seeded(size, size, maze_seed));
    while !maze.is_fully_connected() {
        if maze_seed - seed >= 100 {
            eprintln!("No fully connected {0}x{0} maze found in 100 seeds", size);
            std::process::exit(1);
        }
        maze_seed += 1;
        maze = MazeEnvironment::new(generator.generate_seeded(size, size, maze_seed));
    }
    println!("Maze (seed {}):", maze_seed);
    print!("{}", maze);
    println!();

    let mut table = match PolicyLearner::allocate_table(&maze) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let mut learner = match PolicyLearner::new(LearnerConfig::default(), seed) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let report = match learner.train(&mut table, &mut maze) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Training failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("{}", report);

    match policy_map(&table, &maze) {
        Ok(map) => print!("{}", map),
        Err(e) => eprintln!("Policy map failed: {}", e),
    }
    println!();

    match solve(&table, &mut maze, qmaze::Coord::origin()) {
        Ok(path) => {
            println!("Solved from origin in {} steps:", path.len() - 1);
            print!("{}", maze);
        }
        Err(e) => eprintln!("Solve failed: {}", e),
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
