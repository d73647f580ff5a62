use std::collections::HashSet;
use std::fmt;

use gridpath_core::{CellState, Grid, GridError, Point};

use crate::cost::{Cost, CostTable};
use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::reconstruct::{Predecessors, mark_path, reconstruct};

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Errors that abort a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end is outside the grid, blocked, or both are the same cell.
    /// Raised before any search work.
    InvalidEndpoints {
        start: Point,
        end: Point,
        reason: &'static str,
    },
    /// The predecessor chain looped or ended early while rebuilding the path.
    BrokenChain { at: Point },
    /// A cell the search reached could not be looked up in the grid.
    Grid(GridError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints { start, end, reason } => {
                write!(f, "invalid endpoints {start} -> {end}: {reason}")
            }
            Self::BrokenChain { at } => write!(f, "predecessor chain broken at {at}"),
            Self::Grid(e) => write!(f, "search left the grid: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidEndpoints { .. } | Self::BrokenChain { .. } => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// How a completed run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// The end was reached. Holds the path from start to end, both included.
    Succeeded(Vec<Point>),
    /// The frontier ran out: no path exists.
    Failed,
    /// The step callback asked to stop.
    Cancelled,
}

impl PathResult {
    /// The found path, or an empty slice.
    pub fn path(&self) -> &[Point] {
        match self {
            Self::Succeeded(path) => path,
            Self::Failed | Self::Cancelled => &[],
        }
    }

    /// Number of steps (edges) in the path; 0 when there is none.
    pub fn len(&self) -> usize {
        self.path().len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.path().is_empty()
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Lifecycle of an [`Engine`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

/// Counters collected during the last run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells expanded; one step callback per expansion.
    pub expanded: usize,
    /// Distinct cells ever put in the frontier, start included.
    pub discovered: usize,
    /// Duplicate frontier entries discarded on extraction.
    pub stale_pops: usize,
    /// Largest number of queued heap entries seen.
    pub peak_frontier: usize,
}

/// What the step callback sees after each expansion.
#[derive(Clone, Copy, Debug)]
pub struct Step<'a> {
    pub grid: &'a Grid,
    /// 1-based expansion count.
    pub iteration: usize,
    /// The cell just expanded.
    pub current: Point,
    /// Distinct cells waiting in the frontier.
    pub frontier_len: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Incremental A* search over a [`Grid`] with unit step costs.
///
/// The engine owns its bookkeeping (costs, predecessors, frontier) and reuses
/// it between runs; everything is cleared when a new run starts.
#[derive(Debug, Default)]
pub struct Engine {
    state: EngineState,
    costs: CostTable,
    preds: Predecessors,
    frontier: Frontier,
    closed: HashSet<Point>,
    order: Vec<Point>,
    stats: SearchStats,
    nbuf: Vec<Point>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after the last call to [`run`](Engine::run).
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Cells in the order they were expanded during the last run.
    #[inline]
    pub fn expansion_order(&self) -> &[Point] {
        &self.order
    }

    #[inline]
    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    #[inline]
    pub fn predecessors(&self) -> &Predecessors {
        &self.preds
    }

    fn clear(&mut self) {
        self.costs.clear();
        self.preds.clear();
        self.frontier.clear();
        self.closed.clear();
        self.order.clear();
        self.stats = SearchStats::default();
    }

    /// Search for a shortest path from `start` to `end`.
    ///
    /// Leftover search marks are cleared and neighbour lists rebuilt before
    /// the first expansion. After every expansion `on_step` is called; when
    /// it returns `false` the run stops with [`PathResult::Cancelled`].
    ///
    /// On success, the interior of the path is marked `OnPath`. Start and end
    /// cells are never re-marked.
    pub fn run<F>(
        &mut self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        mut on_step: F,
    ) -> Result<PathResult, SearchError>
    where
        F: FnMut(&Step<'_>) -> bool,
    {
        self.state = EngineState::Idle;
        check_endpoints(grid, start, end)?;

        self.clear();
        grid.clear_search_marks();
        grid.recompute_neighbors();
        self.state = EngineState::Running;
        log::debug!(
            "search {start} -> {end} on {}x{} grid",
            grid.rows(),
            grid.cols()
        );

        let h = manhattan(start, end);
        self.costs.relax(start, 0, h);
        self.frontier.push(start, h);
        self.stats.discovered = 1;
        self.stats.peak_frontier = 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(entry) = self.frontier.pop() else {
                break 'search Ok(PathResult::Failed);
            };
            let current = entry.pos;

            // Lazy deletion: a cell already expanded through a fresher entry.
            if !self.closed.insert(current) {
                self.stats.stale_pops += 1;
                continue;
            }

            if current == end {
                break 'search match reconstruct(&self.preds, start, end) {
                    Ok(path) => {
                        mark_path(grid, &path);
                        Ok(PathResult::Succeeded(path))
                    }
                    Err(e) => {
                        log::error!("{e}");
                        Err(e)
                    }
                };
            }

            self.order.push(current);
            log::trace!("expand {current} f={} order={}", entry.f, entry.order);

            let next_g: Cost = self.costs.g(current) + 1;
            nbuf.clear();
            match grid.lookup(current) {
                Ok(cell) => nbuf.extend_from_slice(cell.neighbors()),
                Err(e) => break 'search Err(e.into()),
            }

            for &n in nbuf.iter() {
                if next_g >= self.costs.g(n) {
                    continue;
                }
                self.preds.set(n, current);
                let f = self.costs.relax(n, next_g, manhattan(n, end));
                if self.frontier.push(n, f) {
                    self.stats.discovered += 1;
                }
                if n != end {
                    if let Err(e) = grid.set_state(n, CellState::Frontier) {
                        break 'search Err(e.into());
                    }
                }
            }

            if current != start {
                if let Err(e) = grid.set_state(current, CellState::Visited) {
                    break 'search Err(e.into());
                }
            }

            self.stats.expanded += 1;
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.queued());

            let step = Step {
                grid: &*grid,
                iteration: self.stats.expanded,
                current,
                frontier_len: self.frontier.len(),
            };
            if !on_step(&step) {
                break 'search Ok(PathResult::Cancelled);
            }
        };

        self.nbuf = nbuf;

        self.state = match &outcome {
            Ok(PathResult::Succeeded(_)) => EngineState::Succeeded,
            Ok(PathResult::Cancelled) => EngineState::Cancelled,
            Ok(PathResult::Failed) | Err(_) => EngineState::Failed,
        };
        log::debug!(
            "search {start} -> {end} finished {:?}: {:?}",
            self.state,
            self.stats
        );
        outcome
    }
}

fn check_endpoints(grid: &Grid, start: Point, end: Point) -> Result<(), SearchError> {
    let invalid = |reason: &'static str| SearchError::InvalidEndpoints { start, end, reason };
    if start == end {
        return Err(invalid("start and end are the same cell"));
    }
    let s = grid.lookup(start).map_err(|_| invalid("start is outside the grid"))?;
    let e = grid.lookup(end).map_err(|_| invalid("end is outside the grid"))?;
    if s.is_blocked() {
        return Err(invalid("start is blocked"));
    }
    if e.is_blocked() {
        return Err(invalid("end is blocked"));
    }
    Ok(())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_round_trip() {
        let result = PathResult::Succeeded(vec![Point::new(0, 0), Point::new(0, 1)]);
        let json = serde_json::to_string(&result).unwrap();
        let back: PathResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }

    #[test]
    fn stats_round_trip() {
        let stats = SearchStats {
            expanded: 12,
            discovered: 20,
            stale_pops: 1,
            peak_frontier: 9,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(serde_json::from_str::<SearchStats>(&json).unwrap(), stats);
    }
}
