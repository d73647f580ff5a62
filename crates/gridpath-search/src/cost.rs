use std::collections::HashMap;

use gridpath_core::Point;

/// Path cost. Every step between adjacent cells costs 1.
pub type Cost = u32;

/// Cost of a cell the search has not reached.
pub const INFINITY: Cost = Cost::MAX;

/// Sparse per-cell `g` and `f` costs.
///
/// Cells never relaxed report [`INFINITY`] for both.
#[derive(Clone, Debug, Default)]
pub struct CostTable {
    entries: HashMap<Point, (Cost, Cost)>,
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best known distance from the start.
    #[inline]
    pub fn g(&self, p: Point) -> Cost {
        self.entries.get(&p).map_or(INFINITY, |&(g, _)| g)
    }

    /// Estimated total cost through `p` (`g + h`).
    #[inline]
    pub fn f(&self, p: Point) -> Cost {
        self.entries.get(&p).map_or(INFINITY, |&(_, f)| f)
    }

    /// Record a new best distance `g` for `p` with heuristic `h`, keeping
    /// `f == g + h`. Returns the new `f`.
    pub fn relax(&mut self, p: Point, g: Cost, h: Cost) -> Cost {
        let f = g.saturating_add(h);
        self.entries.insert(p, (g, f));
        f
    }

    /// Number of cells with a finite cost.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
