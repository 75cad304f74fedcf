use crossterm::style::{Color, StyledContent, Stylize};

use std::fmt;

use crate::maze::Direction;

/// Represents the state of a single cell in the grid.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Free,
    /// Where the mouse starts.
    Start,
    /// Where the cheese sits.
    Goal,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: usize = 2;

    /// Anything but a wall can be walked on.
    pub fn is_open(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Glyph drawn over a cell while an agent stands on it.
pub const AGENT_GLYPH: &str = "🐭";

fn check_width(styled: StyledContent<&str>) -> StyledContent<&str> {
    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            styled.content().width(),
            Cell::CELL_WIDTH,
            "Each cell must occupy exactly two character widths."
        );
    }
    styled
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Free => "  ".with(Color::Reset),
            Cell::Start => AGENT_GLYPH.with(Color::Grey),
            Cell::Goal => "🧀".with(Color::Yellow),
        };
        write!(f, "{}", check_width(styled_symbol))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Direction::Up => "↑ ".with(Color::Green),
            Direction::Down => "↓ ".with(Color::Green),
            Direction::Left => "← ".with(Color::Green),
            Direction::Right => "→ ".with(Color::Green),
        };
        write!(f, "{}", check_width(styled_symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_are_closed() {
        assert!(!Cell::Wall.is_open());
        assert!(Cell::Free.is_open());
        assert!(Cell::Start.is_open());
        assert!(Cell::Goal.is_open());
    }

    #[test]
    fn glyphs_render_two_columns_wide() {
        // Display asserts the width in debug builds.
        for cell in [Cell::Wall, Cell::Free, Cell::Start, Cell::Goal] {
            assert!(!cell.to_string().is_empty());
        }
        for direction in Direction::ALL {
            assert!(!direction.to_string().is_empty());
        }
    }
}
