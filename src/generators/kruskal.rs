use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    disjoint_set::DisjointSet,
    error::MazeError,
    maze::{Cell, Coord, Grid},
    observer::{Frame, Observer},
};

/// Wall cell separating two adjacent node cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WallCandidate {
    wall: Coord,
    cell1: Coord,
    cell2: Coord,
}

/// Maps a node cell to its disjoint-set index.
fn node_id(coord: Coord, cols: usize) -> usize {
    (coord.0 / 2) * (cols / 2) + coord.1 / 2
}

/// Interior cells with exactly one even coordinate, i.e. walls between two nodes.
fn wall_candidates(rows: usize, cols: usize) -> Vec<WallCandidate> {
    (1..rows - 1)
        .flat_map(|row| (1..cols - 1).map(move |col| (row, col)))
        .filter_map(|(row, col)| match (row % 2 == 1, col % 2 == 1) {
            // Odd row, even column: separates a left and a right node
            (true, false) => Some(WallCandidate {
                wall: (row, col),
                cell1: (row, col - 1),
                cell2: (row, col + 1),
            }),
            // Even row, odd column: separates an upper and a lower node
            (false, true) => Some(WallCandidate {
                wall: (row, col),
                cell1: (row - 1, col),
                cell2: (row + 1, col),
            }),
            _ => None,
        })
        .collect()
}

/// Randomized Kruskal: knock down shuffled walls whenever they join two separate regions.
pub fn randomized_kruskal(
    rows: usize,
    cols: usize,
    rng: &mut StdRng,
    observer: &mut Observer<'_>,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(rows, cols)?;
    grid.carve_chessboard();
    observer.notify(Frame::Generate {
        grid: &grid,
        carved: None,
    })?;

    let mut sets = DisjointSet::new(grid.node_count());
    let mut walls = wall_candidates(rows, cols);
    walls.shuffle(rng);

    while sets.count() > 1 {
        // A connected candidate graph always merges to one set before running out
        let Some(candidate) = walls.pop() else {
            break;
        };
        let id1 = node_id(candidate.cell1, cols);
        let id2 = node_id(candidate.cell2, cols);

        // If cells are not yet connected, remove the wall between them
        if sets.find(id1) != sets.find(id2) {
            sets.union(id1, id2);
            grid.set(candidate.wall, Cell::Free);
            observer.notify(Frame::Generate {
                grid: &grid,
                carved: Some(candidate.wall),
            })?;
        }
    }
    debug_assert_eq!(sets.count(), 1);
    tracing::debug!(
        "[kruskal] spanning tree complete, {} candidates left unexamined",
        walls.len()
    );

    grid.place_endpoints();
    observer.notify(Frame::Generate {
        grid: &grid,
        carved: None,
    })?;
    Ok(grid)
}
