use std::time::Instant;

use mazerl::{
    generators::{Generator, generate_maze},
    logging::init_file_logging,
    solvers::{Solver, solve_maze},
};

/// Runs every generator/solver pair without rendering and reports the average time.
/// Usage: `profile [iterations] [size]`
fn main() -> Result<(), mazerl::MazeError> {
    let _guard = init_file_logging(".", "profile.log");

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(10)
        .max(1);
    let size = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(21);

    for generator in Generator::ALL {
        for solver in Solver::ALL {
            let started = Instant::now();
            let mut steps = 0;
            for i in 0..num_iters {
                let grid = generate_maze(generator, size, size, Some(u64::from(i)), None)?;
                steps += solve_maze(&grid, solver, None)?.len();
            }
            let elapsed = started.elapsed() / num_iters;
            tracing::info!(
                "[profile] {} + {}: {:?} per run",
                generator,
                solver,
                elapsed
            );
            println!(
                "{generator} + {solver}: {elapsed:?} per run, {} steps on average",
                steps / num_iters as usize
            );
        }
    }
    Ok(())
}
