//! Crossterm terminal renderer for gridpath.
//!
//! Provides a [`CrosstermRenderer`] that implements [`gridpath_core::Renderer`]:
//! every grid cell is drawn as a two-column coloured block, and mouse clicks
//! are mapped back to the cell under the pointer.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{CellState, Grid, Input, Point, Renderer, Status};

/// Terminal columns per grid cell (cells are roughly square this way).
pub const CELL_WIDTH: i32 = 2;

/// Background colour for each cell state.
pub fn state_color(state: CellState) -> CtColor {
    let (r, g, b) = match state {
        CellState::Unvisited => (255, 255, 255),
        CellState::Blocked => (0, 0, 0),
        CellState::Start => (13, 155, 13),
        CellState::End => (0, 90, 255),
        CellState::Frontier => (64, 224, 208),
        CellState::Visited => (66, 66, 66),
        CellState::OnPath => (255, 0, 0),
    };
    CtColor::Rgb { r, g, b }
}

/// Grid position under terminal coordinates (`column`, `row`).
///
/// May lie outside the grid; bounds are checked by whoever edits it.
pub fn cell_at(column: u16, row: u16) -> Point {
    Point::new(row as i32, (column as i32).div_euclid(CELL_WIDTH))
}

/// Terminal coordinates (`column`, `row`) of the left half of the block for
/// `p`, or `None` when they do not fit the terminal's coordinate range.
pub fn screen_pos(p: Point) -> Option<(u16, u16)> {
    let column = p.col.checked_mul(CELL_WIDTH)?;
    Some((u16::try_from(column).ok()?, u16::try_from(p.row).ok()?))
}

/// Translate a crossterm event into an [`Input`].
pub fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind != KeyEventKind::Press {
                return None;
            }
            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Quit)
                }
                KeyCode::Char(' ') | KeyCode::Enter => Some(Input::Run),
                KeyCode::Char('c') => Some(Input::Clear),
                KeyCode::Char('r') => Some(Input::Scatter),
                KeyCode::Char('q') => Some(Input::Quit),
                KeyCode::Esc => Some(Input::Cancel),
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let pos = cell_at(column, row);
            match kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Input::Paint(pos))
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => Some(Input::Erase(pos)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermRenderer {
    mouse_enabled: bool,
}

impl CrosstermRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CrosstermRenderer {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_input(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Input>, Box<dyn std::error::Error>> {
        // Drain events until one maps to an input or the queue is empty.
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Some(input) = to_input(event::read()?) {
                return Ok(Some(input));
            }
            wait = Duration::ZERO;
        }
        Ok(None)
    }

    fn draw(&mut self, grid: &Grid, status: &Status) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();

        for cell in grid.iter() {
            let Some((column, row)) = screen_pos(cell.position()) else {
                continue;
            };
            queue!(
                stdout,
                cursor::MoveTo(column, row),
                SetBackgroundColor(state_color(cell.state())),
                Print("  ")
            )?;
        }

        let status_row = u16::try_from(grid.rows()).map_or(u16::MAX, |r| r.saturating_add(1));
        queue!(
            stdout,
            ResetColor,
            cursor::MoveTo(0, status_row),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(CtColor::Grey),
            Print(&status.text),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn columns_fold_into_cells() {
        assert_eq!(cell_at(0, 0), Point::new(0, 0));
        assert_eq!(cell_at(1, 0), Point::new(0, 0));
        assert_eq!(cell_at(2, 3), Point::new(3, 1));
        assert_eq!(cell_at(9, 4), Point::new(4, 4));
    }

    #[test]
    fn screen_positions_fit_u16() {
        assert_eq!(screen_pos(Point::new(0, 0)), Some((0, 0)));
        assert_eq!(screen_pos(Point::new(3, 4)), Some((8, 3)));
        assert_eq!(screen_pos(Point::new(0, 32767)), Some((65534, 0)));
        assert_eq!(screen_pos(Point::new(0, 32768)), None);
        assert_eq!(screen_pos(Point::new(70000, 0)), None);
        assert_eq!(screen_pos(Point::new(0, i32::MAX)), None);
        for p in [Point::new(2, 5), Point::new(0, 1)] {
            let (column, row) = screen_pos(p).unwrap();
            assert_eq!(cell_at(column, row), p);
            assert_eq!(cell_at(column + 1, row), p);
        }
    }

    #[test]
    fn mouse_buttons_map_to_edits() {
        assert_eq!(
            to_input(mouse(MouseEventKind::Down(MouseButton::Left), 4, 1)),
            Some(Input::Paint(Point::new(1, 2)))
        );
        assert_eq!(
            to_input(mouse(MouseEventKind::Drag(MouseButton::Right), 0, 0)),
            Some(Input::Erase(Point::new(0, 0)))
        );
        assert_eq!(to_input(mouse(MouseEventKind::Moved, 4, 1)), None);
        assert_eq!(
            to_input(mouse(MouseEventKind::Down(MouseButton::Middle), 4, 1)),
            None
        );
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(to_input(key(KeyCode::Char(' '))), Some(Input::Run));
        assert_eq!(to_input(key(KeyCode::Enter)), Some(Input::Run));
        assert_eq!(to_input(key(KeyCode::Char('c'))), Some(Input::Clear));
        assert_eq!(to_input(key(KeyCode::Char('r'))), Some(Input::Scatter));
        assert_eq!(to_input(key(KeyCode::Esc)), Some(Input::Cancel));
        assert_eq!(to_input(key(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(to_input(key(KeyCode::Char('x'))), None);
        assert_eq!(
            to_input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Input::Quit)
        );
    }

    #[test]
    fn every_state_has_a_distinct_colour() {
        let states = [
            CellState::Unvisited,
            CellState::Blocked,
            CellState::Start,
            CellState::End,
            CellState::Frontier,
            CellState::Visited,
            CellState::OnPath,
        ];
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(state_color(*a), state_color(*b));
            }
        }
    }
}
