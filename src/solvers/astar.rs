use std::{cmp::Reverse, collections::BinaryHeap};

use super::{Frontier, endpoints, relax_with, trace_path};
use crate::{
    error::MazeError,
    maze::{Coord, Grid, Path, manhattan},
    observer::{Observer, StepHook},
};

#[derive(Debug, PartialEq, Eq)]
struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Coord,
    /// Cost to reach this cell from the goal
    traveling_cost: u32,
    /// Estimated cost to reach the start from this cell
    heuristic_cost: u32,
}

impl TrackedCell {
    fn total_cost(&self) -> u32 {
        self.traveling_cost.saturating_add(self.heuristic_cost)
    }
}

impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Prefer lower total cost, then cells closer to the target, then a stable coordinate order
        self.total_cost()
            .cmp(&other.total_cost())
            .then(self.heuristic_cost.cmp(&other.heuristic_cost))
            .then(self.coord.cmp(&other.coord))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending cells ordered by distance so far plus Manhattan distance to `target`.
///
/// The wave starts at the goal, so the target is the start cell. Manhattan distance never
/// overestimates on a 4-connected unit grid, so cells still settle with exact distances.
#[derive(Debug)]
pub(super) struct HeuristicFrontier {
    target: Coord,
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<TrackedCell>>,
}

impl HeuristicFrontier {
    pub(super) fn new(target: Coord) -> Self {
        HeuristicFrontier {
            target,
            heap: BinaryHeap::new(),
        }
    }
}

impl Frontier for HeuristicFrontier {
    fn push(&mut self, coord: Coord, distance: u32) {
        let heuristic = u32::try_from(manhattan(coord, self.target)).unwrap_or(u32::MAX);
        self.heap.push(Reverse(TrackedCell {
            coord,
            traveling_cost: distance,
            heuristic_cost: heuristic,
        }));
    }

    fn pop(&mut self) -> Option<Coord> {
        self.heap.pop().map(|Reverse(cell)| cell.coord)
    }
}

/// Best-first relaxation from the goal, steered toward the start, then the shortest path.
///
/// Produces the same distances as [`super::solve_dijkstra`]; only the settling order differs.
pub fn solve_astar(grid: &Grid, hook: Option<&mut dyn StepHook>) -> Result<Path, MazeError> {
    let (start, goal) = endpoints(grid)?;
    let mut observer = Observer::new(hook);
    let distances = relax_with(grid, goal, HeuristicFrontier::new(start), &mut observer)?;
    trace_path(grid, &distances, &mut observer)
}
