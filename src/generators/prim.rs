use rand::{Rng, rngs::StdRng};

use crate::{
    error::MazeError,
    generators::{node_neighbors, random_node},
    maze::{Cell, Coord, Grid},
    observer::{Frame, Observer},
};

/// Adds every `(wall, node)` pair leading out of `node` to a still-unvisited node.
/// Entries are not de-duplicated, so a node can be queued once per visited neighbour.
fn expand_frontier(frontier: &mut Vec<(Coord, Coord)>, node: Coord, grid: &Grid) {
    frontier.extend(node_neighbors(node, grid).filter(|&(_, target)| grid[target] == Cell::Wall));
}

/// Randomized Prim: grow one region by opening a random frontier wall at a time.
pub fn randomized_prim(
    rows: usize,
    cols: usize,
    rng: &mut StdRng,
    observer: &mut Observer<'_>,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(rows, cols)?;

    // Initialize the starting point
    let start = random_node(&grid, rng);
    grid.set(start, Cell::Free);
    observer.notify(Frame::Generate {
        grid: &grid,
        carved: Some(start),
    })?;

    let mut frontier = Vec::new();
    expand_frontier(&mut frontier, start, &grid);

    let mut stale = 0usize;
    while !frontier.is_empty() {
        // Randomly select a candidate from the frontier
        let idx = rng.random_range(0..frontier.len());
        let (wall, node) = frontier.swap_remove(idx);

        // Already reached through another wall; drawing it again is a no-op
        if grid[node] != Cell::Wall {
            stale += 1;
            continue;
        }

        grid.set(wall, Cell::Free);
        grid.set(node, Cell::Free);
        observer.notify(Frame::Generate {
            grid: &grid,
            carved: Some(wall),
        })?;
        expand_frontier(&mut frontier, node, &grid);
    }
    tracing::debug!("[prim] region complete, skipped {} stale frontier entries", stale);

    grid.place_endpoints();
    observer.notify(Frame::Generate {
        grid: &grid,
        carved: None,
    })?;
    Ok(grid)
}
