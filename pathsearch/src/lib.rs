//! Uninformed maze search.
//!
//! A [`grid::Maze`] is searched by a [`find::PathFinder`] whose
//! [`frontier::Frontier`] decides between depth-first and breadth-first
//! order. Loading text mazes lives in [`util`], drawing in [`render`].

pub mod error;
pub mod find;
pub mod frontier;
pub mod grid;
pub mod render;
pub mod util;

pub use error::{MazeError, SearchError};
pub use find::{solve, ExploreStats, MapTrait, PathFinder, SearchState, Solution};
pub use frontier::Discipline;
pub use grid::{Cell, Direction, Maze, MazeSolution, Point};
