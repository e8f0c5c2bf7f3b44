//! Steppable maze engine: a rectangular tile grid, a randomized-Kruskal
//! spanning-tree generator and three stepwise pathfinding solvers.
//!
//! Every algorithm advances one discrete tick per `step()` call, so callers
//! decide whether to animate the progress or run it to completion in a tight
//! loop; both end in the same maze and the same route.

pub mod dims;
pub mod maze;
pub mod ser;
pub mod solve;

pub use dims::Dims;
pub use maze::algorithms::{MazeType, RndKruskals};
pub use maze::{Cell, CellWall, Maze, MazeError, TileStatus};
pub use solve::{SolverAlgorithm, SolverKind};
