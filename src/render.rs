use std::{
    io::{Stdout, Write},
    ops::ControlFlow,
    time::Duration,
};

use crossterm::{cursor, queue, style, terminal};

use crate::{
    maze::{Cell, Coord, Direction, cell::AGENT_GLYPH},
    observer::{Frame, StepHook},
};

/// Draws every frame to the terminal and paces the animation.
pub struct TerminalRenderer {
    stdout: Stdout,
    /// Pause after each frame
    delay: Duration,
    /// Wait for Enter after each frame instead of sleeping
    step_through: bool,
    /// Draw only every n-th frame
    every: u64,
    frames: u64,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            stdout: std::io::stdout(),
            delay: Duration::from_millis(10),
            step_through: false,
            every: 1,
            frames: 0,
        }
    }
}

impl TerminalRenderer {
    /// Reads `DEBUG=1` (step through frames with Enter) and `MAZE_DELAY_MS` from the environment.
    pub fn from_env() -> Self {
        let mut renderer = TerminalRenderer::default();
        if let Ok(val) = std::env::var("DEBUG") {
            renderer.step_through = val == "1";
        }
        if let Some(ms) = std::env::var("MAZE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            renderer.delay = Duration::from_millis(ms);
        }
        renderer
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Only draw one frame out of `every`; useful for long Q-learning runs.
    pub fn every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    fn glyph_at(frame: &Frame<'_>, coord: Coord) -> Glyph {
        match *frame {
            Frame::Train { agent, .. } if agent == coord => Glyph::Agent,
            Frame::Trace { path, .. } => match path.direction_at(coord) {
                Some(direction) => Glyph::Arrow(direction),
                None => Glyph::Cell(frame.grid()[coord]),
            },
            Frame::Relax { grid, distances, .. } => match (grid[coord], distances.direction(coord)) {
                (Cell::Free, Some(direction)) => Glyph::Arrow(direction),
                (cell, _) => Glyph::Cell(cell),
            },
            _ => Glyph::Cell(frame.grid()[coord]),
        }
    }

    /// Draws one frame.
    pub fn draw(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        let grid = frame.grid();
        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                match Self::glyph_at(frame, (row, col)) {
                    Glyph::Agent => queue!(self.stdout, style::Print(AGENT_GLYPH))?,
                    Glyph::Arrow(direction) => queue!(self.stdout, style::Print(direction))?,
                    Glyph::Cell(cell) => queue!(self.stdout, style::Print(cell))?,
                }
            }
            queue!(self.stdout, style::Print("\r\n"))?;
        }
        if let Frame::Train { episode, step, .. } = *frame {
            queue!(
                self.stdout,
                style::Print(format!("episode {episode}, step {step}\r\n"))
            )?;
        }
        self.stdout.flush()?;

        if self.step_through {
            println!("Press Enter to continue...");
            std::io::stdin().read_line(&mut String::new())?;
        } else if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}

enum Glyph {
    Agent,
    Arrow(Direction),
    Cell(Cell),
}

impl StepHook for TerminalRenderer {
    fn on_step(&mut self, frame: Frame<'_>) -> ControlFlow<()> {
        self.frames += 1;
        if (self.frames - 1) % self.every != 0 {
            return ControlFlow::Continue(());
        }
        match self.draw(&frame) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                tracing::warn!("[render] stopping after terminal error: {}", e);
                ControlFlow::Break(())
            }
        }
    }
}
