use rand::{SeedableRng, rngs::StdRng};

mod dfs;
mod kruskal;
mod prim;

use dfs::randomized_dfs;
use kruskal::randomized_kruskal;
use prim::randomized_prim;

use crate::{
    error::MazeError,
    maze::{Coord, Direction, Grid},
    observer::{Observer, StepHook},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Dfs,
    Kruskal,
    Prim,
}

impl Generator {
    /// Available maze generators
    pub const ALL: [Generator; 3] = [Generator::Dfs, Generator::Kruskal, Generator::Prim];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

/// Builds a `rows x cols` perfect maze with the chosen algorithm.
///
/// The hook, if any, sees the grid after every carved wall and may cancel the run, in which
/// case no grid is returned.
pub fn generate_maze(
    generator: Generator,
    rows: usize,
    cols: usize,
    seed: Option<u64>,
    hook: Option<&mut dyn StepHook>,
) -> Result<Grid, MazeError> {
    let mut rng = get_rng(seed);
    let mut observer = Observer::new(hook);
    let grid = match generator {
        Generator::Dfs => randomized_dfs(rows, cols, &mut rng, &mut observer),
        Generator::Kruskal => randomized_kruskal(rows, cols, &mut rng, &mut observer),
        Generator::Prim => randomized_prim(rows, cols, &mut rng, &mut observer),
    }?;
    tracing::info!(
        "[generate] {} built a {}x{} maze ({} nodes)",
        generator,
        rows,
        cols,
        grid.node_count()
    );
    Ok(grid)
}

/// Node cells two steps away from `node`, paired with the wall cell between them.
fn node_neighbors(node: Coord, grid: &Grid) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    Direction::ALL.into_iter().filter_map(move |d| {
        let target = d.step_by(node, 2, grid.rows(), grid.cols())?;
        let wall = d.step(node, grid.rows(), grid.cols())?;
        Some((wall, target))
    })
}

/// Picks a random node cell.
fn random_node(grid: &Grid, rng: &mut StdRng) -> Coord {
    use rand::Rng;
    (
        2 * rng.random_range(0..grid.rows() / 2) + 1,
        2 * rng.random_range(0..grid.cols() / 2) + 1,
    )
}


#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::observer::Frame;

    #[test]
    fn test_node_neighbors_at_corner() {
        let grid = Grid::new(5, 5).unwrap();
        let neighbors = node_neighbors((1, 1), &grid).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![((2, 1), (3, 1)), ((1, 2), (1, 3))]);
    }

    #[test]
    fn test_every_generator_rejects_even_dimensions() {
        for generator in Generator::ALL {
            assert_eq!(
                generate_maze(generator, 6, 7, Some(1), None),
                Err(MazeError::InvalidDimensions { rows: 6, cols: 7 })
            );
        }
    }

    #[test]
    fn test_every_generator_builds_a_tree() {
        for generator in Generator::ALL {
            for seed in 0..5 {
                let grid = generate_maze(generator, 9, 13, Some(seed), None).unwrap();
                let opened = test_support::assert_spanning(&grid);
                assert_eq!(opened, grid.node_count() - 1, "{generator} seed {seed}");
            }
        }
    }

    #[test]
    fn test_cancel_returns_no_grid() {
        for generator in Generator::ALL {
            let mut carves = 0;
            let mut hook = |frame: Frame<'_>| {
                if let Frame::Generate {
                    carved: Some(_), ..
                } = frame
                {
                    carves += 1;
                }
                if carves >= 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            };
            let result = generate_maze(generator, 11, 11, Some(3), Some(&mut hook));
            assert_eq!(result, Err(MazeError::Cancelled));
        }
    }
}
