//! Board editing: obstacles and the start/end designations.
//!
//! [`Editor`] keeps track of which cells hold `Start` and `End` so that at
//! most one of each exists on the grid at any time.

use rand::{Rng, RngExt};

use crate::cell::CellState;
use crate::geom::Point;
use crate::grid::{Grid, GridError};

/// What a [`Editor::paint`] call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Start,
    End,
    Blocked,
    /// The target already holds an endpoint; nothing changed.
    Unchanged,
}

/// Tracks the start/end designations of a [`Grid`] and applies edits.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    start: Option<Point>,
    end: Option<Point>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Both endpoints, once designated.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }

    /// Primary paint action: designates the start first, then the end, then
    /// paints obstacles.
    pub fn paint(&mut self, grid: &mut Grid, p: Point) -> Result<Paint, GridError> {
        if grid.state(p)?.is_endpoint() {
            return Ok(Paint::Unchanged);
        }
        if self.start.is_none() {
            self.designate_start(grid, p)?;
            Ok(Paint::Start)
        } else if self.end.is_none() {
            self.designate_end(grid, p)?;
            Ok(Paint::End)
        } else {
            grid.set_state(p, CellState::Blocked)?;
            Ok(Paint::Blocked)
        }
    }

    /// Return `p` to `Unvisited`, dropping its designation if it held one.
    pub fn erase(&mut self, grid: &mut Grid, p: Point) -> Result<(), GridError> {
        grid.set_state(p, CellState::Unvisited)?;
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        Ok(())
    }

    /// Make `p` the start, releasing the previous start cell.
    pub fn designate_start(&mut self, grid: &mut Grid, p: Point) -> Result<(), GridError> {
        grid.lookup(p)?;
        if let Some(old) = self.start.take() {
            grid.set_state(old, CellState::Unvisited)?;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        grid.set_state(p, CellState::Start)?;
        self.start = Some(p);
        log::debug!("start designated at {p}");
        Ok(())
    }

    /// Make `p` the end, releasing the previous end cell.
    pub fn designate_end(&mut self, grid: &mut Grid, p: Point) -> Result<(), GridError> {
        grid.lookup(p)?;
        if let Some(old) = self.end.take() {
            grid.set_state(old, CellState::Unvisited)?;
        }
        if self.start == Some(p) {
            self.start = None;
        }
        grid.set_state(p, CellState::End)?;
        self.end = Some(p);
        log::debug!("end designated at {p}");
        Ok(())
    }

    /// Paint an obstacle. Returns `false` if `p` holds an endpoint.
    pub fn block(&mut self, grid: &mut Grid, p: Point) -> Result<bool, GridError> {
        if grid.state(p)?.is_endpoint() {
            return Ok(false);
        }
        grid.set_state(p, CellState::Blocked)?;
        Ok(true)
    }

    /// Wipe the board and forget both designations.
    pub fn clear(&mut self, grid: &mut Grid) {
        grid.reset();
        self.start = None;
        self.end = None;
    }

    /// Block roughly `percent`% of the cells that are not endpoints.
    /// Returns how many cells were newly blocked.
    pub fn scatter(&mut self, grid: &mut Grid, rng: &mut impl Rng, percent: u32) -> usize {
        let mut blocked = 0;
        grid.for_each_mut(|c| {
            if c.state().is_endpoint() || c.is_blocked() {
                return;
            }
            if rng.random_range(0..100u32) < percent {
                c.set_state(CellState::Blocked);
                blocked += 1;
            }
        });
        log::debug!("scatter blocked {blocked} cells at {percent}%");
        blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn paint_sequence_follows_click_order() {
        let mut g = Grid::build(3, 3);
        let mut ed = Editor::new();
        assert_eq!(ed.paint(&mut g, Point::new(0, 0)).unwrap(), Paint::Start);
        assert_eq!(ed.paint(&mut g, Point::new(2, 2)).unwrap(), Paint::End);
        assert_eq!(ed.paint(&mut g, Point::new(1, 1)).unwrap(), Paint::Blocked);
        assert_eq!(ed.paint(&mut g, Point::new(0, 0)).unwrap(), Paint::Unchanged);
        assert_eq!(g.to_string(), "S..\n.#.\n..E");
        assert_eq!(ed.endpoints(), Some((Point::new(0, 0), Point::new(2, 2))));
    }

    #[test]
    fn paint_out_of_bounds_fails() {
        let mut g = Grid::build(2, 2);
        let mut ed = Editor::new();
        assert!(ed.paint(&mut g, Point::new(5, 0)).is_err());
        assert_eq!(ed.start(), None);
    }

    #[test]
    fn erase_drops_designation() {
        let mut g = Grid::build(1, 3);
        let mut ed = Editor::new();
        ed.paint(&mut g, Point::new(0, 0)).unwrap();
        ed.paint(&mut g, Point::new(0, 2)).unwrap();
        ed.erase(&mut g, Point::new(0, 0)).unwrap();
        assert_eq!(ed.start(), None);
        assert_eq!(ed.end(), Some(Point::new(0, 2)));
        // Next paint re-designates the start.
        assert_eq!(ed.paint(&mut g, Point::new(0, 1)).unwrap(), Paint::Start);
        assert_eq!(g.to_string(), ".SE");
    }

    #[test]
    fn designations_stay_unique() {
        let mut g = Grid::build(1, 4);
        let mut ed = Editor::new();
        ed.designate_start(&mut g, Point::new(0, 0)).unwrap();
        ed.designate_start(&mut g, Point::new(0, 1)).unwrap();
        ed.designate_end(&mut g, Point::new(0, 3)).unwrap();
        assert_eq!(g.count(CellState::Start), 1);
        assert_eq!(g.to_string(), ".S.E");

        // Moving the end onto the start takes the cell over.
        ed.designate_end(&mut g, Point::new(0, 1)).unwrap();
        assert_eq!(ed.start(), None);
        assert_eq!(g.to_string(), ".E..");
    }

    #[test]
    fn block_refuses_endpoints() {
        let mut g = Grid::build(1, 2);
        let mut ed = Editor::new();
        ed.designate_start(&mut g, Point::new(0, 0)).unwrap();
        assert!(!ed.block(&mut g, Point::new(0, 0)).unwrap());
        assert!(ed.block(&mut g, Point::new(0, 1)).unwrap());
        assert_eq!(g.to_string(), "S#");
    }

    #[test]
    fn clear_forgets_endpoints() {
        let mut g = Grid::build(2, 2);
        let mut ed = Editor::new();
        ed.paint(&mut g, Point::new(0, 0)).unwrap();
        ed.paint(&mut g, Point::new(1, 1)).unwrap();
        ed.paint(&mut g, Point::new(0, 1)).unwrap();
        ed.clear(&mut g);
        assert_eq!(ed.endpoints(), None);
        assert_eq!(g.count(CellState::Unvisited), 4);
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut g = Grid::build(10, 10);
        let mut ed = Editor::new();
        ed.designate_start(&mut g, Point::new(0, 0)).unwrap();
        ed.designate_end(&mut g, Point::new(9, 9)).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let n = ed.scatter(&mut g, &mut rng, 100);
        assert_eq!(n, 98);
        assert_eq!(g.state(Point::new(0, 0)).unwrap(), CellState::Start);
        assert_eq!(g.state(Point::new(9, 9)).unwrap(), CellState::End);

        let mut none = Grid::build(4, 4);
        assert_eq!(ed.scatter(&mut none, &mut rng, 0), 0);
    }
}
