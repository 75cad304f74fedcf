use mazerl::{
    MazeError, StepHook,
    generators::{Generator, generate_maze},
    logging::init_file_logging,
    render::TerminalRenderer,
    solvers::{QLearningConfig, Solver, solve_dijkstra, solve_maze, solve_q_learning},
};

fn read_line(input: &mut String) -> std::io::Result<&str> {
    input.clear();
    std::io::stdin().read_line(input)?;
    Ok(input.trim())
}

/// Prints a numbered menu and returns the chosen entry.
fn select<T: Copy + std::fmt::Display>(
    title: &str,
    options: &[T],
    input: &mut String,
) -> std::io::Result<Option<T>> {
    println!("{title}");
    for (i, option) in options.iter().enumerate() {
        println!("{}. {}", i + 1, option);
    }
    let choice = read_line(input)?
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied());
    Ok(choice)
}

fn main() -> std::io::Result<()> {
    let _guard = init_file_logging(".", "maze.log");
    let mut input = String::new();

    println!("Enter maze dimensions (rows cols). Both must be odd and at least 3:");
    // Parse the input dimensions
    let dims = read_line(&mut input)?
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<usize>().ok())
        .collect::<Vec<_>>();
    let &[rows, cols] = dims.as_slice() else {
        eprintln!("Please enter two valid numbers for rows and cols.");
        return Ok(());
    };

    let Some(generator) = select("Select maze generation algorithm:", &Generator::ALL, &mut input)?
    else {
        eprintln!("Invalid selection.");
        return Ok(());
    };
    let Some(solver) = select("Select maze solving algorithm:", &Solver::ALL, &mut input)? else {
        eprintln!("Invalid selection.");
        return Ok(());
    };

    println!("Seed (leave empty for a random maze):");
    let seed = read_line(&mut input)?.parse::<u64>().ok();

    println!("Animate? [Y/n]:");
    let animate = !read_line(&mut input)?.eq_ignore_ascii_case("n");

    let mut renderer = TerminalRenderer::from_env();
    let hook = animate.then_some(&mut renderer as &mut dyn StepHook);
    let grid = match generate_maze(generator, rows, cols, seed, hook) {
        Ok(grid) => grid,
        Err(MazeError::Cancelled) => return Ok(()),
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    let result = match solver {
        // Training takes many thousands of actions; draw a fraction of them
        Solver::QLearning => {
            let mut renderer = TerminalRenderer::from_env().every(50);
            let hook = animate.then_some(&mut renderer as &mut dyn StepHook);
            let config = QLearningConfig {
                seed,
                ..Default::default()
            };
            solve_q_learning(&grid, &config, hook)
        }
        _ => {
            let hook = animate.then_some(&mut renderer as &mut dyn StepHook);
            solve_maze(&grid, solver, hook)
        }
    };

    match result {
        Ok(path) => {
            let optimal = solve_dijkstra(&grid, None).map(|p| p.len()).unwrap_or(0);
            println!(
                "Maze solved! {} found a path of {} steps (shortest is {}).",
                solver,
                path.len(),
                optimal
            );
        }
        Err(MazeError::Cancelled) => println!("Cancelled."),
        Err(e) => println!("No path found: {e}"),
    }
    Ok(())
}
