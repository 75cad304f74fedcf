use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    error::MazeError,
    generators::random_node,
    maze::{Cell, Direction, Grid},
    observer::{Frame, Observer},
};

/// Iterative randomized depth-first search ("recursive backtracker").
///
/// Carves from a random node, always pushing deeper while an unvisited node is two cells
/// away and backtracking only at dead ends, which gives long winding corridors.
pub fn randomized_dfs(
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

    let mut visited = vec![false; rows * cols];
    let start = random_node(&grid, rng);
    visited[grid.ravel_index(start)] = true;

    // The stack keeps only visited node cells
    let mut stack = vec![start];
    let mut directions = Direction::ALL;
    while let Some(cell) = stack.pop() {
        directions.shuffle(rng);
        let next = directions.iter().find_map(|&d| {
            let target = d.step_by(cell, 2, rows, cols)?;
            (!visited[grid.ravel_index(target)]).then_some((d, target))
        });

        if let Some((direction, target)) = next {
            // A node two cells away always has its connecting wall in bounds
            if let Some(wall) = direction.step(cell, rows, cols) {
                grid.set(wall, Cell::Free);
                visited[grid.ravel_index(target)] = true;
                observer.notify(Frame::Generate {
                    grid: &grid,
                    carved: Some(wall),
                })?;
            }
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(target);
        }
    }

    grid.place_endpoints();
    observer.notify(Frame::Generate {
        grid: &grid,
        carved: None,
    })?;
    tracing::debug!("[dfs] finished carving from {:?}", start);
    Ok(grid)
}
