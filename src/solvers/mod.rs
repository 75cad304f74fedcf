mod astar;
mod dijkstra;
mod env;
mod qlearning;

pub use astar::solve_astar;
pub use dijkstra::solve_dijkstra;
pub use env::{QMaze, Transition};
pub use qlearning::{QLearningConfig, QTable, Rewards, UpdateRule, solve_q_learning};

use crate::{
    error::MazeError,
    maze::{Coord, Direction, Grid, Path},
    observer::{Frame, Observer, StepHook},
};

/// Distance value of cells the wave front has not reached.
pub const INF: u32 = u32::MAX;

/// Per-cell `(direction toward the goal, distance to the goal)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    cells: Box<[(Option<Direction>, u32)]>,
    cols: usize,
}

impl DistanceField {
    fn new(rows: usize, cols: usize) -> Self {
        DistanceField {
            cells: vec![(None, INF); rows * cols].into_boxed_slice(),
            cols,
        }
    }

    fn idx(&self, coord: Coord) -> usize {
        coord.0 * self.cols + coord.1
    }

    /// Raw stored distance, [`INF`] if unreached.
    pub fn raw(&self, coord: Coord) -> u32 {
        self.cells[self.idx(coord)].1
    }

    /// Number of moves from `coord` to the goal, if the goal is reachable from it.
    pub fn distance(&self, coord: Coord) -> Option<u32> {
        Some(self.raw(coord)).filter(|&d| d != INF)
    }

    /// First move on a shortest route from `coord` to the goal.
    pub fn direction(&self, coord: Coord) -> Option<Direction> {
        self.cells[self.idx(coord)].0
    }

    fn set(&mut self, coord: Coord, direction: Option<Direction>, distance: u32) {
        let idx = self.idx(coord);
        self.cells[idx] = (direction, distance);
    }
}

/// Order in which pending cells leave the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierOrder {
    /// Smallest distance first (Dijkstra).
    UniformCost,
    /// Smallest distance plus Manhattan distance to the start first (A*).
    BestFirst,
}

/// Cells waiting to be settled.
trait Frontier {
    fn push(&mut self, coord: Coord, distance: u32);
    fn pop(&mut self) -> Option<Coord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dijkstra,
    AStar,
    QLearning,
}

impl Solver {
    /// Available maze solvers
    pub const ALL: [Solver; 3] = [Solver::Dijkstra, Solver::AStar, Solver::QLearning];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::QLearning => write!(f, "Q-Learning"),
        }
    }
}

/// Solves `grid` with the chosen solver. Q-learning runs with [`QLearningConfig::default`].
pub fn solve_maze(
    grid: &Grid,
    solver: Solver,
    hook: Option<&mut dyn StepHook>,
) -> Result<Path, MazeError> {
    let path = match solver {
        Solver::Dijkstra => solve_dijkstra(grid, hook),
        Solver::AStar => solve_astar(grid, hook),
        Solver::QLearning => solve_q_learning(grid, &QLearningConfig::default(), hook),
    }?;
    tracing::info!("[solve] {} found a path of {} steps", solver, path.len());
    Ok(path)
}

/// Computes every cell's distance to the goal and the first move of a shortest route there.
pub fn relax(
    grid: &Grid,
    order: FrontierOrder,
    hook: Option<&mut dyn StepHook>,
) -> Result<DistanceField, MazeError> {
    let (start, goal) = endpoints(grid)?;
    let mut observer = Observer::new(hook);
    match order {
        FrontierOrder::UniformCost => {
            let frontier = dijkstra::SortedFrontier::default();
            relax_with(grid, goal, frontier, &mut observer)
        }
        FrontierOrder::BestFirst => {
            let frontier = astar::HeuristicFrontier::new(start);
            relax_with(grid, goal, frontier, &mut observer)
        }
    }
}

/// Start and goal of a solvable grid.
fn endpoints(grid: &Grid) -> Result<(Coord, Coord), MazeError> {
    match (grid.start(), grid.goal()) {
        (Some(start), Some(goal)) => Ok((start, goal)),
        _ => {
            tracing::warn!("[solve] grid is missing its start or goal cell");
            Err(MazeError::Unreachable)
        }
    }
}

/// Wave-front relaxation outward from the goal, settling cells in frontier order.
fn relax_with(
    grid: &Grid,
    goal: Coord,
    mut frontier: impl Frontier,
    observer: &mut Observer<'_>,
) -> Result<DistanceField, MazeError> {
    let mut distances = DistanceField::new(grid.rows(), grid.cols());
    // Walls count as settled from the outset
    let mut settled = grid.cells().iter().map(|c| !c.is_open()).collect::<Vec<_>>();

    distances.set(goal, None, 0);
    frontier.push(goal, 0);

    let mut pops = 0usize;
    while let Some(current) = frontier.pop() {
        let idx = grid.ravel_index(current);
        // Stale entry left behind by an improved distance
        if settled[idx] {
            continue;
        }
        pops += 1;

        let candidate = distances.raw(current) + 1;
        for (direction, neighbor) in grid.neighbors(current) {
            if candidate < distances.raw(neighbor) {
                // Stepping back from the neighbour leads here
                distances.set(neighbor, Some(direction.opposite()), candidate);
                frontier.push(neighbor, candidate);
            }
        }
        settled[idx] = true;

        observer.notify(Frame::Relax {
            grid,
            distances: &distances,
            settled: current,
        })?;
    }
    tracing::debug!("[relax] settled {} cells", pops);
    Ok(distances)
}

/// Reconstructs the start-to-goal path from a relaxed distance field.
fn trace_path(
    grid: &Grid,
    distances: &DistanceField,
    observer: &mut Observer<'_>,
) -> Result<Path, MazeError> {
    let (start, goal) = endpoints(grid)?;
    if distances.distance(start).is_none() {
        tracing::info!("[solve] goal is not reachable from {:?}", start);
        return Err(MazeError::Unreachable);
    }
    Path::trace(grid, start, goal, |c| distances.direction(c), observer)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_distance_field_matches_bfs() {
        let grid = looped();
        let goal = grid.goal().unwrap();
        let expected = bfs_distances(&grid, goal);
        for order in [FrontierOrder::UniformCost, FrontierOrder::BestFirst] {
            let field = relax(&grid, order, None).unwrap();
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let expected = expected[grid.ravel_index((row, col))];
                    assert_eq!(field.distance((row, col)), expected, "{order:?} at ({row}, {col})");
                }
            }
            assert_eq!(field.distance(goal), Some(0));
            assert_eq!(field.direction(goal), None);
        }
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = walled_off();
        let field = relax(&grid, FrontierOrder::UniformCost, None).unwrap();
        assert_eq!(field.distance((1, 1)), None);
        assert_eq!(field.raw((1, 1)), INF);
        for solver in Solver::ALL {
            assert_eq!(solve_maze(&grid, solver, None), Err(MazeError::Unreachable));
        }
    }

    #[test]
    fn test_missing_endpoints() {
        let grid = Grid::parse("#####\n#S..#\n#####").unwrap();
        assert_eq!(
            relax(&grid, FrontierOrder::UniformCost, None),
            Err(MazeError::Unreachable)
        );
    }
}
