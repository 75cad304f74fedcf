use std::{collections::VecDeque, ops::ControlFlow};

use mazerl::{
    Cell, Coord, Frame, Grid, MazeError, Path,
    generators::{Generator, generate_maze},
    solvers::{
        FrontierOrder, QLearningConfig, Solver, relax, solve_astar, solve_dijkstra, solve_maze,
        solve_q_learning,
    },
};

/// Plain BFS step counts from `from` to every open cell.
fn bfs(grid: &Grid, from: Coord) -> Vec<Option<u32>> {
    let mut dist = vec![None; grid.rows() * grid.cols()];
    dist[grid.ravel_index(from)] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(c) = queue.pop_front() {
        let d = dist[grid.ravel_index(c)].unwrap_or(0);
        for (_, n) in grid.neighbors(c) {
            let idx = grid.ravel_index(n);
            if dist[idx].is_none() {
                dist[idx] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

fn carved_links(grid: &Grid) -> usize {
    (0..grid.rows())
        .flat_map(|r| (0..grid.cols()).map(move |c| (r, c)))
        .filter(|&(r, c)| (r % 2 == 1) != (c % 2 == 1) && grid[(r, c)].is_open())
        .count()
}

fn assert_valid_path(grid: &Grid, path: &Path) {
    let cells = path.walk();
    assert_eq!(cells.len(), path.len() + 1);
    assert_eq!(cells.first().copied(), grid.start());
    assert_eq!(cells.last().copied(), grid.goal());
    assert!(cells.iter().all(|&c| grid[c] != Cell::Wall));
    assert_eq!(path.direction_at(path.start()), None);
}

#[test]
fn generated_mazes_are_spanning_trees() {
    for generator in Generator::ALL {
        for (rows, cols) in [(5, 5), (7, 11), (15, 15), (21, 9)] {
            let grid = generate_maze(generator, rows, cols, Some(rows as u64), None).unwrap();
            let from_start = bfs(&grid, (1, 1));
            for r in (1..rows).step_by(2) {
                for c in (1..cols).step_by(2) {
                    assert!(
                        from_start[grid.ravel_index((r, c))].is_some(),
                        "{generator}: node ({r}, {c}) unreachable"
                    );
                }
            }
            assert_eq!(carved_links(&grid), grid.node_count() - 1, "{generator}");
            assert_eq!(grid.start(), Some((1, 1)));
            assert_eq!(grid.goal(), Some((rows - 2, cols - 2)));
        }
    }
}

#[test]
fn fixed_seed_is_deterministic() {
    for generator in Generator::ALL {
        let a = generate_maze(generator, 21, 31, Some(1234), None).unwrap();
        let b = generate_maze(generator, 21, 31, Some(1234), None).unwrap();
        assert_eq!(a, b, "{generator}");
    }
}

#[test]
fn relaxed_distances_match_bfs() {
    for generator in Generator::ALL {
        for seed in 0..10 {
            let grid = generate_maze(generator, 5, 5, Some(seed), None).unwrap();
            let expected = bfs(&grid, grid.goal().unwrap());
            for order in [FrontierOrder::UniformCost, FrontierOrder::BestFirst] {
                let field = relax(&grid, order, None).unwrap();
                for r in 0..grid.rows() {
                    for c in 0..grid.cols() {
                        assert_eq!(field.distance((r, c)), expected[grid.ravel_index((r, c))]);
                    }
                }
            }
        }
    }
}

#[test]
fn shortest_paths_are_valid_and_optimal() {
    for generator in Generator::ALL {
        let grid = generate_maze(generator, 15, 21, Some(5), None).unwrap();
        let field = relax(&grid, FrontierOrder::UniformCost, None).unwrap();
        let expected = field.distance(grid.start().unwrap()).unwrap() as usize;
        for path in [solve_dijkstra(&grid, None).unwrap(), solve_astar(&grid, None).unwrap()] {
            assert_valid_path(&grid, &path);
            assert_eq!(path.len(), expected);
        }
    }
}

#[test]
fn dfs_seed_42_matches_bfs_step_count() {
    let grid = generate_maze(Generator::Dfs, 5, 5, Some(42), None).unwrap();
    assert_eq!(grid.start(), Some((1, 1)));
    assert_eq!(grid.goal(), Some((3, 3)));
    let expected = bfs(&grid, (1, 1))[grid.ravel_index((3, 3))].unwrap() as usize;
    let path = solve_maze(&grid, Solver::Dijkstra, None).unwrap();
    assert_eq!(path.len(), expected);
    // Any spanning tree of the four corner nodes leaves a two-link route between opposites
    assert_eq!(expected, 4);
}

#[test]
fn q_learning_reaches_the_goal_on_small_mazes() {
    for seed in 0..3 {
        let grid = generate_maze(Generator::Prim, 7, 7, Some(seed), None).unwrap();
        let config = QLearningConfig {
            seed: Some(seed),
            max_steps: Some(10_000_000),
            ..Default::default()
        };
        let path = solve_q_learning(&grid, &config, None).unwrap();
        assert_valid_path(&grid, &path);
        assert!(path.len() >= solve_dijkstra(&grid, None).unwrap().len());
    }
}

#[test]
fn cancellation_is_reported_not_a_partial_result() {
    let grid = generate_maze(Generator::Kruskal, 9, 9, Some(2), None).unwrap();
    for solver in Solver::ALL {
        let mut seen = 0;
        let mut hook = |_frame: Frame<'_>| {
            seen += 1;
            if seen > 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let result = solve_maze(&grid, solver, Some(&mut hook));
        assert_eq!(result, Err(MazeError::Cancelled), "{solver}");
        assert!(result.unwrap_err().is_cancelled());
    }
}

#[test]
fn rejects_even_dimensions() {
    assert_eq!(
        generate_maze(Generator::Dfs, 10, 11, None, None),
        Err(MazeError::InvalidDimensions { rows: 10, cols: 11 })
    );
}
