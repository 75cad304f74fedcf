//! Step hooks: the only way generators and solvers talk to the outside world while running.
//!
//! A hook receives a [`Frame`] after every structural step and answers with
//! [`ControlFlow::Continue`] to keep going or [`ControlFlow::Break`] to cancel. Cancellation
//! surfaces to the caller as [`MazeError::Cancelled`].

use std::ops::ControlFlow;

use crate::{
    error::MazeError,
    maze::{Coord, Grid, Path},
    solvers::DistanceField,
};

/// A read-only view of the algorithm state after one step.
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    /// A generator changed the grid. `carved` is the cell opened by this step, if any.
    Generate {
        grid: &'a Grid,
        carved: Option<Coord>,
    },
    /// A shortest-path solver settled `settled`.
    Relax {
        grid: &'a Grid,
        distances: &'a DistanceField,
        settled: Coord,
    },
    /// Path reconstruction appended one more step.
    Trace { grid: &'a Grid, path: &'a Path },
    /// The Q-learning agent took one action.
    Train {
        grid: &'a Grid,
        agent: Coord,
        episode: usize,
        step: u64,
    },
}

impl Frame<'_> {
    pub fn grid(&self) -> &Grid {
        match *self {
            Frame::Generate { grid, .. }
            | Frame::Relax { grid, .. }
            | Frame::Trace { grid, .. }
            | Frame::Train { grid, .. } => grid,
        }
    }
}

/// Receives frames while an algorithm runs. May block (to draw, to pace) but must return
/// before the algorithm can continue.
pub trait StepHook {
    fn on_step(&mut self, frame: Frame<'_>) -> ControlFlow<()>;
}

impl<F> StepHook for F
where
    F: FnMut(Frame<'_>) -> ControlFlow<()>,
{
    fn on_step(&mut self, frame: Frame<'_>) -> ControlFlow<()> {
        self(frame)
    }
}

/// Optional hook threaded through an algorithm run.
pub(crate) struct Observer<'h> {
    hook: Option<&'h mut dyn StepHook>,
}

impl<'h> Observer<'h> {
    pub(crate) fn new(hook: Option<&'h mut dyn StepHook>) -> Self {
        Observer { hook }
    }

    /// An observer that never cancels.
    pub(crate) fn silent() -> Observer<'static> {
        Observer { hook: None }
    }

    pub(crate) fn notify(&mut self, frame: Frame<'_>) -> Result<(), MazeError> {
        match self.hook.as_deref_mut().map(|hook| hook.on_step(frame)) {
            Some(ControlFlow::Break(())) => {
                tracing::info!("[observer] step hook requested cancellation");
                Err(MazeError::Cancelled)
            }
            _ => Ok(()),
        }
    }
}
