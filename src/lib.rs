//! Core of rectangular grid mazes.
//!
//! A [`Maze`](gameboard::Maze) is a grid of [`Cell`](gameboard::Cell)s, each
//! holding the directions it's linked to. Generators build a spanning tree
//! with [`Maze::link`](gameboard::Maze::link), then
//! [`braid`](algorithms::braid) and [`cull`](algorithms::cull) can rewrite it.

pub mod algorithms;
pub mod dims;
pub mod gameboard;
pub mod grid;
pub mod registry;

pub use dims::{Direction, Pos};
pub use gameboard::{Cell, Maze, MazeError, Tag};
pub use grid::{Grid, GridError};
