//! **gridpath-core** — grid model for an interactive A* visualizer.
//!
//! This crate provides the board that a search runs on: geometry, cells with
//! their traversal state and neighbour lists, the owning [`Grid`], the
//! [`Editor`] that paints obstacles and endpoints, and the [`Renderer`]
//! capability that display back-ends implement.

pub mod cell;
pub mod editor;
pub mod geom;
pub mod grid;
pub mod render;

pub use cell::{Cell, CellState};
pub use editor::{Editor, Paint};
pub use geom::{CARDINALS, Point};
pub use grid::{Grid, GridError};
pub use render::{Input, Renderer, Status};
