use std::collections::VecDeque;

use super::{Frontier, endpoints, relax_with, trace_path};
use crate::{
    error::MazeError,
    maze::{Coord, Grid, Path},
    observer::{Observer, StepHook},
};

/// Pending cells kept sorted by distance, smallest at the front.
///
/// Every edge weighs 1, so a binary-searched insertion keeps the deque ordered without a heap.
/// Entries with equal distance leave in insertion order.
#[derive(Debug, Default)]
pub(super) struct SortedFrontier {
    queue: VecDeque<(u32, Coord)>,
}

impl Frontier for SortedFrontier {
    fn push(&mut self, coord: Coord, distance: u32) {
        let at = self.queue.partition_point(|&(d, _)| d <= distance);
        self.queue.insert(at, (distance, coord));
    }

    fn pop(&mut self) -> Option<Coord> {
        self.queue.pop_front().map(|(_, coord)| coord)
    }
}

/// Uniform-cost relaxation from the goal, then the shortest start-to-goal path.
pub fn solve_dijkstra(grid: &Grid, hook: Option<&mut dyn StepHook>) -> Result<Path, MazeError> {
    let (_, goal) = endpoints(grid)?;
    let mut observer = Observer::new(hook);
    let distances = relax_with(grid, goal, SortedFrontier::default(), &mut observer)?;
    trace_path(grid, &distances, &mut observer)
}
