//! The display capability: [`Renderer`], [`Input`], [`Status`].
//!
//! A renderer owns the display surface and the input device. It maps device
//! coordinates to grid positions and decides how each [`CellState`] looks;
//! the rest of the system only hands it a [`Grid`] to show.
//!
//! [`CellState`]: crate::cell::CellState

use std::time::Duration;

use crate::geom::Point;
use crate::grid::Grid;

/// An editing or control request produced by a [`Renderer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Primary action on a cell (designate start/end, then paint obstacles).
    Paint(Point),
    /// Secondary action on a cell (erase).
    Erase(Point),
    /// Start a search.
    Run,
    /// Wipe the board.
    Clear,
    /// Scatter random obstacles.
    Scatter,
    /// Abort a running search.
    Cancel,
    /// Leave the application.
    Quit,
}

/// A one-line message displayed alongside the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub text: String,
}

impl Status {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Display back-end (e.g. terminal, window).
///
/// The top-level driver calls [`init`](Renderer::init) once before anything
/// else and [`close`](Renderer::close) once on the way out.
pub trait Renderer {
    /// Acquire the display surface.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to `timeout` for the next input. `Duration::ZERO` polls
    /// without blocking.
    fn poll_input(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Input>, Box<dyn std::error::Error>>;

    /// Show the grid and a status line.
    fn draw(&mut self, grid: &Grid, status: &Status) -> Result<(), Box<dyn std::error::Error>>;

    /// Release the display surface.
    fn close(&mut self);
}
