//! Incremental A* search over a [`gridpath_core::Grid`].
//!
//! The [`Engine`] expands one cell per iteration and hands control back to a
//! step callback in between, so a renderer can show the frontier growing.
//! Its pieces are usable on their own:
//!
//! - [`manhattan`]: the heuristic
//! - [`CostTable`]: sparse `g`/`f` costs, infinite by default
//! - [`Frontier`]: min-queue on `(f, discovery order)` with lazy deletion
//! - [`Predecessors`] / [`reconstruct`]: path rebuilding
//!
//! Among equally short paths the one returned is fixed by the neighbour scan
//! order (down, up, right, left) and the discovery-order tie-break.

mod cost;
mod distance;
mod engine;
mod frontier;
mod reconstruct;

pub use cost::{Cost, CostTable, INFINITY};
pub use distance::manhattan;
pub use engine::{Engine, EngineState, PathResult, SearchError, SearchStats, Step};
pub use frontier::{Frontier, FrontierEntry};
pub use reconstruct::{Predecessors, mark_path, reconstruct};
