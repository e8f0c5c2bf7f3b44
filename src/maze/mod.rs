pub mod algorithms;
pub mod cell;
#[allow(clippy::module_inception)]
pub mod maze;

pub use cell::{Cell, CellWall, TileStatus};
pub use maze::{Maze, MazeError};
