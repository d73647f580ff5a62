//! The [`Grid`] type — a fixed-size 2D collection of [`Cell`]s.
//!
//! The grid owns every cell exclusively. Other code reaches a cell only
//! through a `(row, col)` lookup.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::Point;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised by grid lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside `[0, rows) × [0, cols)`.
    OutOfBounds { pos: Point, rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} is outside the {rows}x{cols} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` grid of cells stored row-major.
///
/// Cells are never added or removed after [`build`](Grid::build); only their
/// state and neighbour lists change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid of unvisited cells. Negative sizes are clamped to zero.
    pub fn build(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Point::new(row, col)));
            }
        }
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells (`rows × cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds {
                pos: p,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// The cell at `p`.
    pub fn lookup(&self, p: Point) -> Result<&Cell, GridError> {
        let i = self.index(p)?;
        Ok(&self.cells[i])
    }

    /// Mutable access to the cell at `p`.
    pub fn lookup_mut(&mut self, p: Point) -> Result<&mut Cell, GridError> {
        let i = self.index(p)?;
        Ok(&mut self.cells[i])
    }

    /// Shorthand for `lookup(p)?.state()`.
    pub fn state(&self, p: Point) -> Result<CellState, GridError> {
        self.lookup(p).map(Cell::state)
    }

    /// Shorthand for `lookup_mut(p)?.set_state(state)`.
    pub fn set_state(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        self.lookup_mut(p)?.set_state(state);
        Ok(())
    }

    /// Apply `f` to every cell, row-major.
    pub fn for_each<F: FnMut(&Cell)>(&self, f: F) {
        self.cells.iter().for_each(f);
    }

    /// Apply `f` to every cell mutably, row-major.
    pub fn for_each_mut<F: FnMut(&mut Cell)>(&mut self, f: F) {
        self.cells.iter_mut().for_each(f);
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    /// Set every cell back to `Unvisited`, including obstacles and the
    /// start/end designations.
    pub fn reset(&mut self) {
        self.for_each_mut(Cell::reset);
    }

    /// Reset only the marks left by a previous search (`Frontier`, `Visited`,
    /// `OnPath`), keeping obstacles and endpoints.
    pub fn clear_search_marks(&mut self) {
        self.for_each_mut(|c| {
            if c.state().is_search_mark() {
                c.reset();
            }
        });
    }

    /// Rebuild every cell's neighbour list against the current obstacles.
    pub fn recompute_neighbors(&mut self) {
        let blocked: Vec<bool> = self.cells.iter().map(Cell::is_blocked).collect();
        let (rows, cols) = (self.rows, self.cols);
        let open = |p: Point| {
            p.row >= 0
                && p.col >= 0
                && p.row < rows
                && p.col < cols
                && !blocked[p.row as usize * cols as usize + p.col as usize]
        };
        for cell in self.cells.iter_mut() {
            cell.recompute_neighbors(&open);
        }
    }
}

impl fmt::Display for Grid {
    /// One glyph per cell, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for (i, row) in self.cells.chunks(self.cols as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.state().glyph())?;
            }
        }
        Ok(())
    }
}
