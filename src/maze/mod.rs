pub mod cell;
mod grid;
mod path;

pub use cell::Cell;
pub use grid::Grid;
pub use path::Path;

/// `(row, col)` position in a grid.
pub type Coord = (usize, usize);

/// One of the four moves available from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in action-index order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(row, col)` delta of the move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Action index used by the Q-table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// # Panics
    /// If `index >= 4`.
    pub fn from_index(index: usize) -> Direction {
        Direction::ALL[index]
    }

    /// Moves `coord` `distance` cells in this direction, returning `None` when that leaves a
    /// `rows x cols` grid.
    pub fn step_by(self, coord: Coord, distance: usize, rows: usize, cols: usize) -> Option<Coord> {
        let (row, col) = coord;
        // NOTE: Wrapping underflow yields a huge index that the bounds check below rejects,
        // and saturating addition can only produce an index >= rows/cols, which is rejected too.
        let next = match self {
            Direction::Up => (row.wrapping_sub(distance), col),
            Direction::Down => (row.saturating_add(distance), col),
            Direction::Left => (row, col.wrapping_sub(distance)),
            Direction::Right => (row, col.saturating_add(distance)),
        };
        (next.0 < rows && next.1 < cols).then_some(next)
    }

    /// Moves `coord` one cell in this direction.
    pub fn step(self, coord: Coord, rows: usize, cols: usize) -> Option<Coord> {
        self.step_by(coord, 1, rows, cols)
    }
}

/// Manhattan distance between two coordinates.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
