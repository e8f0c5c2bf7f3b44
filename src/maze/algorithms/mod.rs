mod disjoint_set;
mod rnd_kruskals;

use thiserror::Error;

pub use disjoint_set::{DisjointSet, DisjointSetError};
pub use rnd_kruskals::RndKruskals;

use crate::maze::maze::MazeError;

/// Random number generator used for anything where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Whether generation produces a spanning tree only, or also knocks out
/// extra walls to create cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeType {
    /// Exactly one route between any two tiles.
    Perfect,
    /// A spanning tree plus extra removed walls, so alternate routes exist.
    Imperfect,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}
