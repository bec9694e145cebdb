use std::process::ExitCode;

use winterval::{Strategy, WeightedIntervalScheduler};

/// Textbook instance: (start, finish, weight), ids assigned 1..=8 in this order.
const ACTIVITIES: [(i64, i64, i64); 8] = [
    (0, 6, 60),
    (1, 4, 50),
    (5, 7, 30),
    (3, 5, 20),
    (3, 9, 70),
    (5, 9, 40),
    (6, 10, 30),
    (8, 11, 20),
];

/// Describes the raw input in the order given, numbered from 1.
fn input_lines(intervals: &[(i64, i64, i64)]) -> Vec<String> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, (start, finish, weight))| {
            format!("Activity {}: [{start}, {finish}] weight={weight}", i + 1)
        })
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    // An optional argument restricts the run to a single strategy.
    let strategies = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<Strategy>() {
            Ok(strategy) => vec![strategy],
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Strategy::ALL.to_vec(),
    };

    let scheduler = match WeightedIntervalScheduler::new(&ACTIVITIES) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Input activities:");
    for line in input_lines(&ACTIVITIES) {
        println!("  {line}");
    }

    println!("\nActivities sorted by finish time:");
    for (i, activity) in scheduler.schedule().iter().enumerate() {
        println!("  [{i}] {activity}");
    }

    println!("\nCompatibility p(j):");
    print!("{}", scheduler.compatibility());

    for strategy in strategies {
        match scheduler.solve(strategy) {
            Ok(weight) => println!("\n{strategy}: maximum weight {weight}"),
            Err(e) => println!("\n{strategy}: {e}"),
        }
    }

    let solution = scheduler.solve_with_reconstruction();
    println!("\nSelected activities (weight {}):", solution.weight);
    for activity in &solution.selected {
        println!("  {activity}");
    }

    ExitCode::SUCCESS
}
