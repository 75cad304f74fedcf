use super::qlearning::Rewards;
use crate::maze::{Cell, Coord, Direction, Grid};

/// Outcome of one environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Flattened `row * cols + col` index before the move.
    pub state: usize,
    pub action: Direction,
    pub reward: f64,
    /// Flattened index after the move. Equal to `state` after a wall crash.
    pub next_state: usize,
    /// The move crashed into a wall or reached the goal.
    pub terminated: bool,
    pub reached_goal: bool,
}

/// Maze environment for a single Q-learning agent.
///
/// The grid itself is never mutated: the agent position is tracked separately, so the goal
/// is always present again after [`QMaze::reset`].
pub struct QMaze<'g> {
    grid: &'g Grid,
    rewards: Rewards,
    start: Coord,
    position: Coord,
    /// Cells entered during the current episode
    visited: Vec<bool>,
    /// Last direction taken out of each cell during the current episode
    exits: Vec<Option<Direction>>,
    terminated: bool,
}

impl<'g> QMaze<'g> {
    pub fn new(grid: &'g Grid, start: Coord, rewards: Rewards) -> Self {
        let cells = grid.rows() * grid.cols();
        QMaze {
            grid,
            rewards,
            start,
            position: start,
            visited: vec![false; cells],
            exits: vec![None; cells],
            terminated: false,
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Flattened index of the agent's cell.
    pub fn state(&self) -> usize {
        self.grid.ravel_index(self.position)
    }

    /// Last direction the agent left `coord` by in this episode, if any.
    pub fn exit(&self, coord: Coord) -> Option<Direction> {
        self.exits[self.grid.ravel_index(coord)]
    }

    /// Puts the agent back on the start and forgets the episode.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.visited.fill(false);
        self.exits.fill(None);
        self.terminated = false;
    }

    /// Tries to move the agent one cell.
    ///
    /// A wall (or the grid edge) ends the episode with the crash penalty and the agent stays
    /// put. The goal ends it with the goal reward. Any other cell costs the step cost, or the
    /// revisit penalty if the agent has already been there this episode.
    pub fn step(&mut self, action: Direction) -> Transition {
        let state = self.state();
        let target = action
            .step(self.position, self.grid.rows(), self.grid.cols())
            .filter(|&t| self.grid[t].is_open());

        let (reward, reached_goal) = match target {
            None => {
                self.terminated = true;
                self.exits[state] = None;
                (self.rewards.crash, false)
            }
            Some(target) => {
                self.exits[state] = Some(action);
                self.position = target;
                let idx = self.grid.ravel_index(target);
                let revisit = std::mem::replace(&mut self.visited[idx], true);
                if self.grid[target] == Cell::Goal {
                    self.terminated = true;
                    (self.rewards.goal, true)
                } else {
                    self.terminated = false;
                    if revisit {
                        (self.rewards.revisit, false)
                    } else {
                        (self.rewards.step, false)
                    }
                }
            }
        };

        Transition {
            state,
            action,
            reward,
            next_state: self.state(),
            terminated: self.terminated,
            reached_goal,
        }
    }
}
