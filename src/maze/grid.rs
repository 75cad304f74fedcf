use crate::error::MazeError;

use super::{Coord, Direction, cell::Cell};

/// A `rows x cols` array of cells stored row-major in one flat allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Creates an all-wall grid laid out for node cells at odd coordinates.
    /// Both dimensions must be odd and at least 3, and the grid must hold at least two nodes
    /// so that start and goal are distinct.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        let valid = rows >= 3 && cols >= 3 && rows % 2 == 1 && cols % 2 == 1 && rows * cols > 9;
        if !valid {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Grid::filled(rows, cols, Cell::Wall))
    }

    /// Creates a grid of arbitrary shape filled with `cell`, with no layout checks.
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Grid {
            data: vec![cell; rows * cols].into_boxed_slice(),
            rows,
            cols,
        }
    }

    /// Parses a grid from text rows: `#` wall, `.` or space free, `S` start, `G` goal.
    /// Returns `None` for ragged input or unknown characters.
    pub fn parse(text: &str) -> Option<Self> {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let cols = lines.first()?.chars().count();
        let mut data = Vec::with_capacity(lines.len() * cols);
        for line in &lines {
            if line.chars().count() != cols {
                return None;
            }
            for c in line.chars() {
                data.push(match c {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Free,
                    'S' => Cell::Start,
                    'G' => Cell::Goal,
                    _ => return None,
                });
            }
        }
        Some(Grid {
            data: data.into_boxed_slice(),
            rows: lines.len(),
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of node cells, i.e. cells at odd coordinates.
    pub fn node_count(&self) -> usize {
        (self.rows / 2) * (self.cols / 2)
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    /// Node cells sit at odd `(row, col)`.
    pub fn is_node(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && coord.0 % 2 == 1 && coord.1 % 2 == 1
    }

    /// Flattened row-major index, also used as the Q-learning state id.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 * self.cols + coord.1
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.ravel_index(coord);
        self.data[idx] = cell;
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// First coordinate holding `cell`, scanning row-major.
    pub fn find(&self, cell: Cell) -> Option<Coord> {
        self.data
            .iter()
            .position(|&c| c == cell)
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    pub fn start(&self) -> Option<Coord> {
        self.find(Cell::Start)
    }

    pub fn goal(&self) -> Option<Coord> {
        self.find(Cell::Goal)
    }

    /// Open cells one step away from `coord`, with the direction that leads to them.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            d.step(coord, self.rows, self.cols)
                .filter(|&n| self[n].is_open())
                .map(|n| (d, n))
        })
    }

    /// Fills the node cells with free space, leaving every wall candidate closed.
    pub(crate) fn carve_chessboard(&mut self) {
        (1..self.rows).step_by(2).for_each(|row| {
            (1..self.cols).step_by(2).for_each(|col| {
                self.set((row, col), Cell::Free);
            })
        });
    }

    /// Places the start at `(1, 1)` and the goal at the opposite corner node.
    pub(crate) fn place_endpoints(&mut self) {
        self.set((1, 1), Cell::Start);
        self.set((self.rows - 2, self.cols - 2), Cell::Goal);
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(self.is_in_bounds(index), "grid index {index:?} out of bounds");
        &self.data[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        assert!(self.is_in_bounds(index), "grid index {index:?} out of bounds");
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = match self[(row, col)] {
                    Cell::Wall => '#',
                    Cell::Free => '.',
                    Cell::Start => 'S',
                    Cell::Goal => 'G',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
