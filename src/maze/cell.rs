use crate::dims::Dims;

use self::CellWall::*;

/// Solve-time marking of a cell, written by the solvers and read by whatever
/// renders the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileStatus {
    #[default]
    Unvisited,
    Visited,
    Path,
}

/// One tile of the grid. Starts with all four walls standing.
#[derive(Debug, Clone)]
pub struct Cell {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    visited: bool,
    status: TileStatus,
    coord: Dims,
}

impl Cell {
    pub fn new(pos: Dims) -> Cell {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
            status: TileStatus::Unvisited,
            coord: pos,
        }
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        self.set_wall(wall, false);
    }

    pub fn add_wall(&mut self, wall: CellWall) {
        self.set_wall(wall, true);
    }

    pub fn set_wall(&mut self, wall: CellWall, present: bool) {
        match wall {
            Top => self.top = present,
            Right => self.right = present,
            Bottom => self.bottom = present,
            Left => self.left = present,
        }
    }

    pub fn get_wall(&self, wall: CellWall) -> bool {
        match wall {
            Top => self.top,
            Right => self.right,
            Bottom => self.bottom,
            Left => self.left,
        }
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn status(&self) -> TileStatus {
        self.status
    }

    pub fn set_status(&mut self, status: TileStatus) {
        self.status = status;
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }

    /// Walls packed into the low nibble, most significant bit first in the
    /// fixed order Top, Right, Bottom, Left. A tile with only the Right wall
    /// standing is `0b0100`.
    pub fn wall_bits(&self) -> u8 {
        CellWall::get_in_order()
            .iter()
            .fold(0, |bits, &wall| (bits << 1) | self.get_wall(wall) as u8)
    }

    pub fn from_wall_bits(pos: Dims, bits: u8) -> Cell {
        let mut cell = Cell::new(pos);
        for (i, wall) in CellWall::get_in_order().into_iter().enumerate() {
            cell.set_wall(wall, bits >> (3 - i) & 1 == 1);
        }
        cell
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    /// Offset to the neighbor on the other side of this wall, in (row, col).
    pub fn to_coord(self) -> Dims {
        match self {
            Top => Dims(-1, 0),
            Right => Dims(0, 1),
            Bottom => Dims(1, 0),
            Left => Dims(0, -1),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    /// Serialization order of the walls: Top, Right, Bottom, Left.
    pub fn get_in_order() -> [CellWall; 4] {
        [Top, Right, Bottom, Left]
    }
}
