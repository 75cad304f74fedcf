use crate::{
    error::MazeError,
    observer::{Frame, Observer},
};

use super::{Coord, Direction, Grid};

/// A solution route: one optional arrow per cell plus the ordered moves from start to goal.
///
/// The arrow at the start cell is always cleared so the start marker is never covered;
/// the full move sequence is still available through [`Path::steps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    arrows: Box<[Option<Direction>]>,
    steps: Vec<Direction>,
    rows: usize,
    cols: usize,
    start: Coord,
    goal: Coord,
}

impl Path {
    fn empty(rows: usize, cols: usize, start: Coord, goal: Coord) -> Self {
        Path {
            arrows: vec![None; rows * cols].into_boxed_slice(),
            steps: Vec::new(),
            rows,
            cols,
            start,
            goal,
        }
    }

    /// Follows `next_move` from `start` until `goal`, recording every move.
    ///
    /// Fails with [`MazeError::Unreachable`] if a cell on the way has no move, a move leaves
    /// the grid or enters a wall, or the walk revisits a cell.
    pub(crate) fn trace(
        grid: &Grid,
        start: Coord,
        goal: Coord,
        mut next_move: impl FnMut(Coord) -> Option<Direction>,
        observer: &mut Observer<'_>,
    ) -> Result<Path, MazeError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut path = Path::empty(rows, cols, start, goal);
        let mut seen = vec![false; rows * cols];
        let mut current = start;
        while current != goal {
            let idx = grid.ravel_index(current);
            if seen[idx] {
                tracing::warn!("[path] move chain loops at {:?}", current);
                return Err(MazeError::Unreachable);
            }
            seen[idx] = true;

            let direction = next_move(current).ok_or(MazeError::Unreachable)?;
            let next = direction
                .step(current, rows, cols)
                .filter(|&n| grid[n].is_open())
                .ok_or(MazeError::Unreachable)?;

            path.steps.push(direction);
            if current != start {
                path.arrows[idx] = Some(direction);
            }
            current = next;
            observer.notify(Frame::Trace { grid, path: &path })?;
        }
        Ok(path)
    }

    /// Number of moves from start to goal.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Moves in order, starting at the start cell.
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// The arrow drawn on `coord`, if the path leaves that cell. Always `None` at the start.
    pub fn direction_at(&self, coord: Coord) -> Option<Direction> {
        if coord.0 >= self.rows || coord.1 >= self.cols {
            return None;
        }
        self.arrows[coord.0 * self.cols + coord.1]
    }

    /// Every coordinate visited, from start to goal inclusive.
    pub fn walk(&self) -> Vec<Coord> {
        let mut coords = Vec::with_capacity(self.steps.len() + 1);
        coords.push(self.start);
        let mut current = self.start;
        for direction in &self.steps {
            // Steps were validated against the grid when the path was traced.
            if let Some(next) = direction.step(current, self.rows, self.cols) {
                current = next;
                coords.push(current);
            }
        }
        coords
    }
}
