use rand::Rng;

use super::{
    FrontierOrder, endpoints,
    env::{QMaze, Transition},
    relax,
};
use crate::{
    error::MazeError,
    generators::get_rng,
    maze::{Direction, Grid, Path},
    observer::{Frame, Observer, StepHook},
};

/// Reward magnitudes handed out by [`QMaze::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    /// Moving into a wall. Must be negative; it also scales the episode reset threshold.
    pub crash: f64,
    /// Reaching the goal.
    pub goal: f64,
    /// Stepping onto a cell already visited this episode.
    pub revisit: f64,
    /// Stepping onto a fresh cell.
    pub step: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            crash: -1.0,
            goal: 1.0,
            revisit: -0.25,
            step: -0.04,
        }
    }
}

/// How a Q-value moves toward its one-step target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRule {
    /// `Q[s,a] += α·(r + γ·max Q[s'])`, without subtracting the current estimate.
    #[default]
    Simplified,
    /// Standard tabular Q-learning: `Q[s,a] += α·(r + γ·max Q[s'] − Q[s,a])`.
    TemporalDifference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QLearningConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    /// Exploration never drops below this; must be positive for training to terminate.
    pub epsilon_floor: f64,
    /// Subtracted from epsilon after every action.
    pub epsilon_decay: f64,
    pub rewards: Rewards,
    pub update_rule: UpdateRule,
    /// Give up after this many actions. `None` trains until the goal is reached.
    pub max_steps: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon_floor: 0.1,
            epsilon_decay: 0.0005,
            rewards: Rewards::default(),
            update_rule: UpdateRule::default(),
            max_steps: None,
            seed: None,
        }
    }
}

impl QLearningConfig {
    pub fn validate(&self) -> Result<(), MazeError> {
        let checks = [
            (
                self.learning_rate > 0.0 && self.learning_rate <= 1.0,
                "learning_rate must be in (0, 1]",
            ),
            (
                (0.0..=1.0).contains(&self.discount_factor),
                "discount_factor must be in [0, 1]",
            ),
            (
                self.epsilon_floor > 0.0 && self.epsilon_floor <= 1.0,
                "epsilon_floor must be in (0, 1]",
            ),
            (
                self.epsilon_decay >= 0.0,
                "epsilon_decay must not be negative",
            ),
            (self.rewards.crash < 0.0, "crash reward must be negative"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, msg)) => Err(MazeError::InvalidConfig(msg.to_string())),
            None => Ok(()),
        }
    }
}

/// Dense `(state, action)` value table, one row per grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<[f64; 4]>,
}

impl QTable {
    pub fn new(states: usize) -> Self {
        QTable {
            values: vec![[0.0; 4]; states],
        }
    }

    pub fn value(&self, state: usize, action: Direction) -> f64 {
        self.values[state][action.index()]
    }

    pub fn max_value(&self, state: usize) -> f64 {
        self.values[state]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest-valued action for `state`; ties go to the first one.
    pub fn best_action(&self, state: usize) -> Direction {
        let row = &self.values[state];
        let best = (1..4).fold(0, |best, a| if row[a] > row[best] { a } else { best });
        Direction::from_index(best)
    }

    pub fn update(&mut self, t: &Transition, alpha: f64, gamma: f64, rule: UpdateRule) {
        let target = t.reward + gamma * self.max_value(t.next_state);
        let q = &mut self.values[t.state][t.action.index()];
        match rule {
            UpdateRule::Simplified => *q += alpha * target,
            UpdateRule::TemporalDifference => *q += alpha * (target - *q),
        }
    }
}

/// Trains a tabular Q-learning agent until it first reaches the goal, then returns the route
/// that episode took (the last direction it left each cell by, replayed from the start).
///
/// An episode ends early, and the agent is put back on the start, once its accumulated
/// reward falls below `crash * rows * cols`.
pub fn solve_q_learning(
    grid: &Grid,
    config: &QLearningConfig,
    hook: Option<&mut dyn StepHook>,
) -> Result<Path, MazeError> {
    config.validate()?;
    let (start, goal) = endpoints(grid)?;
    // Training never ends if the goal is cut off
    let distances = relax(grid, FrontierOrder::UniformCost, None)?;
    if distances.distance(start).is_none() {
        tracing::info!("[q-learning] goal is not reachable, not training");
        return Err(MazeError::Unreachable);
    }

    let mut observer = Observer::new(hook);
    let mut rng = get_rng(config.seed);
    let mut env = QMaze::new(grid, start, config.rewards);
    let mut table = QTable::new(grid.rows() * grid.cols());
    let reset_threshold = config.rewards.crash * (grid.rows() * grid.cols()) as f64;

    let mut epsilon = 1.0_f64;
    let mut total_reward = 0.0;
    let mut episode = 0usize;
    let mut steps = 0u64;
    loop {
        if config.max_steps.is_some_and(|max| steps >= max) {
            tracing::warn!("[q-learning] giving up after {} steps", steps);
            return Err(MazeError::TrainingBudgetExhausted { steps });
        }

        let action = if rng.random::<f64>() < epsilon {
            // Exploration
            Direction::from_index(rng.random_range(0..4))
        } else {
            // Exploitation
            table.best_action(env.state())
        };
        epsilon = (epsilon - config.epsilon_decay).max(config.epsilon_floor);

        let transition = env.step(action);
        table.update(
            &transition,
            config.learning_rate,
            config.discount_factor,
            config.update_rule,
        );
        total_reward += transition.reward;
        steps += 1;

        observer.notify(Frame::Train {
            grid,
            agent: env.position(),
            episode,
            step: steps,
        })?;

        if transition.terminated && total_reward < reset_threshold {
            tracing::debug!(
                "[q-learning] episode {} failed with reward {:.2}, resetting",
                episode,
                total_reward
            );
            total_reward = 0.0;
            env.reset();
            episode += 1;
        } else if transition.reached_goal {
            break;
        }
    }
    tracing::info!(
        "[q-learning] reached the goal after {} steps over {} episodes",
        steps,
        episode + 1
    );

    Path::trace(grid, start, goal, |c| env.exit(c), &mut observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{solve_dijkstra, test_support::looped};

    fn transition(reward: f64) -> Transition {
        Transition {
            state: 0,
            action: Direction::Right,
            reward,
            next_state: 1,
            terminated: false,
            reached_goal: false,
        }
    }

    #[test]
    fn test_best_action_breaks_ties_by_first() {
        let mut table = QTable::new(2);
        assert_eq!(table.best_action(0), Direction::Up);
        table.values[0] = [-1.0, 0.5, 0.5, -2.0];
        assert_eq!(table.best_action(0), Direction::Down);
        table.values[0] = [-1.0, -1.0, -0.5, -0.5];
        assert_eq!(table.best_action(0), Direction::Left);
    }

    #[test]
    fn test_simplified_update_does_not_subtract_current_value() {
        let mut table = QTable::new(2);
        table.values[0][Direction::Right.index()] = 10.0;
        table.values[1] = [2.0, 0.0, 0.0, 0.0];
        table.update(&transition(1.0), 0.5, 0.5, UpdateRule::Simplified);
        // 10 + 0.5 * (1 + 0.5 * 2)
        assert_eq!(table.value(0, Direction::Right), 11.0);
    }

    #[test]
    fn test_temporal_difference_update() {
        let mut table = QTable::new(2);
        table.values[0][Direction::Right.index()] = 10.0;
        table.values[1] = [2.0, 0.0, 0.0, 0.0];
        table.update(&transition(1.0), 0.5, 0.5, UpdateRule::TemporalDifference);
        // 10 + 0.5 * (1 + 0.5 * 2 - 10)
        assert_eq!(table.value(0, Direction::Right), 6.0);
    }

    #[test]
    fn test_validate_rejects_zero_floor() {
        let config = QLearningConfig {
            epsilon_floor: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MazeError::InvalidConfig(_))));
        assert_eq!(QLearningConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_learns_a_valid_route() {
        let grid = looped();
        for rule in [UpdateRule::Simplified, UpdateRule::TemporalDifference] {
            let config = QLearningConfig {
                seed: Some(11),
                update_rule: rule,
                max_steps: Some(5_000_000),
                ..Default::default()
            };
            let path = solve_q_learning(&grid, &config, None).unwrap();
            let cells = path.walk();
            assert_eq!(cells.first(), Some(&grid.start().unwrap()));
            assert_eq!(cells.last(), Some(&grid.goal().unwrap()));
            assert!(cells.iter().all(|&c| grid[c].is_open()));
            assert_eq!(cells.len(), path.len() + 1);
            // Never shorter than the optimum
            assert!(path.len() >= solve_dijkstra(&grid, None).unwrap().len());
        }
    }

    #[test]
    fn test_step_budget() {
        let grid = looped();
        let config = QLearningConfig {
            seed: Some(1),
            max_steps: Some(3),
            ..Default::default()
        };
        assert_eq!(
            solve_q_learning(&grid, &config, None),
            Err(MazeError::TrainingBudgetExhausted { steps: 3 })
        );
    }
}
