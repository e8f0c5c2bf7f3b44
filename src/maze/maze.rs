use thiserror::Error;

use crate::dims::Dims;
use crate::maze::cell::{Cell, CellWall, TileStatus};

use self::CellWall::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("number of rows and columns must be positive, got {rows}x{cols}")]
    InvalidSize { rows: i32, cols: i32 },
    #[error("tile position {0:?} is outside the maze")]
    OutOfBounds(Dims),
    #[error("all rows must be non-empty and have the same number of columns")]
    Ragged,
    #[error("walls between {0:?} and {1:?} disagree")]
    WallMismatch(Dims, Dims),
    #[error("cell at {0:?} claims a different coordinate")]
    MisplacedCell(Dims),
}

/// Rectangular grid of cells. The shape is fixed for the maze's lifetime,
/// walls and tile markings are mutated through it so that the two sides of
/// every wall always agree.
#[derive(Debug)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
}

impl Maze {
    /// Creates a grid with every wall standing.
    pub fn new(rows: i32, cols: i32) -> Result<Maze, MazeError> {
        if rows <= 0 || cols <= 0 {
            return Err(MazeError::InvalidSize { rows, cols });
        }

        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| Cell::new(Dims(r, c))).collect())
            .collect();

        Ok(Maze {
            cells,
            rows: rows as usize,
            cols: cols as usize,
        })
    }

    /// Rebuilds a maze from existing cells, e.g. after deserialization.
    ///
    /// The rows must form a non-empty rectangle, each cell must sit at the
    /// position its coordinate claims, and adjacent cells must agree on the
    /// wall between them.
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Maze, MazeError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(MazeError::Ragged);
        }
        let cols = cells[0].len();
        if cells.iter().any(|row| row.len() != cols) {
            return Err(MazeError::Ragged);
        }

        let maze = Maze {
            rows: cells.len(),
            cols,
            cells,
        };

        for r in 0..maze.rows as i32 {
            for c in 0..maze.cols as i32 {
                let pos = Dims(r, c);
                if maze.cells[r as usize][c as usize].get_coord() != pos {
                    return Err(MazeError::MisplacedCell(pos));
                }
                for wall in [Right, Bottom] {
                    let neighbor = pos + wall.to_coord();
                    if !maze.is_inside(neighbor) {
                        continue;
                    }
                    let here = maze.cells[r as usize][c as usize].get_wall(wall);
                    let there = maze.cells[neighbor.0 as usize][neighbor.1 as usize]
                        .get_wall(wall.reverse_wall());
                    if here != there {
                        return Err(MazeError::WallMismatch(pos, neighbor));
                    }
                }
            }
        }

        Ok(maze)
    }

    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.cols as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// The single source of truth for bounds checks.
    pub fn is_inside(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.rows as i32 && 0 <= pos.1 && pos.1 < self.cols as i32
    }

    pub fn get_cell(&self, pos: Dims) -> Result<&Cell, MazeError> {
        if !self.is_inside(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }
        Ok(&self.cells[pos.0 as usize][pos.1 as usize])
    }

    pub fn get_cell_mut(&mut self, pos: Dims) -> Result<&mut Cell, MazeError> {
        if !self.is_inside(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }
        Ok(&mut self.cells[pos.0 as usize][pos.1 as usize])
    }

    /// Position one step behind the given wall, if it stays inside the maze.
    pub fn neighbor(&self, pos: Dims, wall: CellWall) -> Option<Dims> {
        let next = pos + wall.to_coord();
        self.is_inside(next).then_some(next)
    }

    /// The wall of the cell at `from` that faces `to`, if the two are
    /// grid-adjacent.
    pub fn wall_between(from: Dims, to: Dims) -> Option<CellWall> {
        match to - from {
            Dims(-1, 0) => Some(Top),
            Dims(0, 1) => Some(Right),
            Dims(1, 0) => Some(Bottom),
            Dims(0, -1) => Some(Left),
            _ => None,
        }
    }

    pub fn has_wall_between(&self, from: Dims, to: Dims) -> Result<bool, MazeError> {
        let cell = self.get_cell(from)?;
        self.get_cell(to)?;
        // non-adjacent tiles always count as walled off
        Ok(Maze::wall_between(from, to).map_or(true, |wall| cell.get_wall(wall)))
    }

    /// Neighbors reachable from `pos` through open walls, in the fixed order
    /// up, down, left, right. Solvers rely on this order staying put.
    pub fn accessible_neighbors(&self, pos: Dims) -> Vec<Dims> {
        if !self.is_inside(pos) {
            return Vec::new();
        }

        [Top, Bottom, Left, Right]
            .into_iter()
            .filter(|&wall| !self.cells[pos.0 as usize][pos.1 as usize].get_wall(wall))
            .filter_map(|wall| self.neighbor(pos, wall))
            .collect()
    }

    /// Removes the wall on both of its sides. Does nothing to the other side
    /// when the wall faces out of the maze.
    pub fn remove_wall(&mut self, pos: Dims, wall: CellWall) -> Result<(), MazeError> {
        self.set_wall(pos, wall, false)
    }

    /// Puts the wall back on both of its sides.
    pub fn add_wall(&mut self, pos: Dims, wall: CellWall) -> Result<(), MazeError> {
        self.set_wall(pos, wall, true)
    }

    fn set_wall(&mut self, pos: Dims, wall: CellWall, present: bool) -> Result<(), MazeError> {
        self.get_cell_mut(pos)?.set_wall(wall, present);
        if let Some(neighbor) = self.neighbor(pos, wall) {
            self.cells[neighbor.0 as usize][neighbor.1 as usize]
                .set_wall(wall.reverse_wall(), present);
        }
        Ok(())
    }

    /// Every unique undirected adjacency of the grid, each pair once. Input
    /// to a generation run, never retained afterward.
    pub fn edges(&self) -> Vec<(Dims, Dims)> {
        let mut edges = Vec::with_capacity(self.rows * (self.cols - 1) + self.cols * (self.rows - 1));
        for r in 0..self.rows as i32 {
            for c in 0..self.cols as i32 {
                if r > 0 {
                    edges.push((Dims(r, c), Dims(r - 1, c)));
                }
                if c > 0 {
                    edges.push((Dims(r, c), Dims(r, c - 1)));
                }
            }
        }
        edges
    }

    /// Clears solve-time markings. Walls and the generation-time `visited`
    /// flag stay as they are.
    pub fn reset_tile_status(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                cell.set_status(TileStatus::Unvisited);
            }
        }
    }

    pub fn start(&self) -> Dims {
        Dims(0, 0)
    }

    pub fn end(&self) -> Dims {
        Dims(self.rows as i32 - 1, self.cols as i32 - 1)
    }

    pub fn get_cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}
