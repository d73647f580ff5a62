//! The [`Cell`] type — one grid position with a traversal state.

use crate::geom::Point;

/// Traversal state of a [`Cell`].
///
/// The editor sets `Blocked`, `Start` and `End`; a search sets `Frontier`,
/// `Visited` and `OnPath`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    Blocked,
    Start,
    End,
    /// Discovered, waiting to be expanded.
    Frontier,
    /// Expanded by the search.
    Visited,
    /// Part of the reconstructed shortest path.
    OnPath,
}

impl CellState {
    /// Whether this state is one of the marks left behind by a search.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::OnPath)
    }

    /// Whether this state designates a search endpoint.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Single-character glyph used by the grid's `Display` impl.
    pub const fn glyph(self) -> char {
        match self {
            Self::Unvisited => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Frontier => 'o',
            Self::Visited => 'x',
            Self::OnPath => '*',
        }
    }
}

/// A node of the grid graph.
///
/// Position is fixed at creation. The neighbour list holds the positions of
/// the traversable orthogonal neighbours as of the last
/// [`recompute_neighbors`](Cell::recompute_neighbors) call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    state: CellState,
    neighbors: Vec<Point>,
}

impl Cell {
    /// Create an unvisited cell with no neighbours.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Unvisited,
            neighbors: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.state == CellState::Blocked
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_unvisited(&self) -> bool {
        self.state == CellState::Unvisited
    }

    /// Overwrite the state.
    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Return the cell to `Unvisited`.
    #[inline]
    pub fn reset(&mut self) {
        self.state = CellState::Unvisited;
    }

    /// Traversable orthogonal neighbours, in scan order.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    /// Rebuild the neighbour list from the four cardinal positions, keeping
    /// only those for which `keep` returns `true`.
    ///
    /// `keep` must reject positions outside the grid and blocked cells.
    pub fn recompute_neighbors(&mut self, keep: impl Fn(Point) -> bool) {
        self.neighbors.clear();
        for n in self.pos.neighbors_4() {
            if keep(n) {
                self.neighbors.push(n);
            }
        }
    }
}
