//! Perfect maze generation on odd-sized grids and three ways to walk them: uniform-cost
//! relaxation, best-first (A*) relaxation and tabular Q-learning.
//!
//! ```no_run
//! use mazerl::{generators::{Generator, generate_maze}, solvers::{Solver, solve_maze}};
//!
//! let grid = generate_maze(Generator::Kruskal, 15, 15, Some(42), None)?;
//! let path = solve_maze(&grid, Solver::Dijkstra, None)?;
//! println!("{} steps", path.len());
//! # Ok::<(), mazerl::MazeError>(())
//! ```

pub mod disjoint_set;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod observer;
pub mod render;
pub mod solvers;

pub use error::MazeError;
pub use maze::{Cell, Coord, Direction, Grid, Path};
pub use observer::{Frame, StepHook};
