//! Line-oriented text format for mazes.
//!
//! First line `rows,cols`, then one line `row,col,wallBits` per tile, where
//! `wallBits` is four characters of `0`/`1` in the order Top, Right, Bottom,
//! Left. A tile with only its Right wall standing reads `0100`.

use std::io;

use thiserror::Error;

use crate::dims::Dims;
use crate::maze::{Cell, Maze, MazeError};

#[derive(Debug, Error)]
pub enum ParseMazeError {
    #[error("maze text is empty")]
    Empty,
    #[error("first line must be two integers separated by a comma, got {0:?}")]
    BadHeader(String),
    #[error("line {line}: expected 3 comma-separated parts: row,col,wallBits")]
    BadLine { line: usize },
    #[error("line {line}: row and column must be integers")]
    BadCoord { line: usize },
    #[error("line {line}: tile {pos:?} is outside the declared {rows}x{cols} maze")]
    TileOutOfRange {
        line: usize,
        pos: Dims,
        rows: i32,
        cols: i32,
    },
    #[error("line {line}: wallBits must be exactly 4 characters of '0' or '1'")]
    BadWallBits { line: usize },
    #[error("line {line}: tile {pos:?} appears more than once")]
    DuplicateTile { line: usize, pos: Dims },
    #[error("no line describes tile {0:?}")]
    MissingTile(Dims),
    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub fn write(maze: &Maze, out: &mut impl io::Write) -> io::Result<()> {
    let Dims(rows, cols) = maze.size();
    writeln!(out, "{},{}", rows, cols)?;
    for row in maze.get_cells() {
        for cell in row {
            let Dims(r, c) = cell.get_coord();
            writeln!(out, "{},{},{:04b}", r, c, cell.wall_bits())?;
        }
    }
    Ok(())
}

pub fn to_string(maze: &Maze) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    write(maze, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn from_str(text: &str) -> Result<Maze, ParseMazeError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(ParseMazeError::Empty)?;
    let (rows, cols) = parse_header(header)?;
    if rows <= 0 || cols <= 0 {
        return Err(MazeError::InvalidSize { rows, cols }.into());
    }

    let mut cells: Vec<Vec<Option<Cell>>> = vec![vec![None; cols as usize]; rows as usize];

    for (line, text) in lines {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        let &[row, col, bits] = parts.as_slice() else {
            return Err(ParseMazeError::BadLine { line });
        };

        let pos = Dims(
            row.parse().map_err(|_| ParseMazeError::BadCoord { line })?,
            col.parse().map_err(|_| ParseMazeError::BadCoord { line })?,
        );
        if pos.0 < 0 || pos.0 >= rows || pos.1 < 0 || pos.1 >= cols {
            return Err(ParseMazeError::TileOutOfRange {
                line,
                pos,
                rows,
                cols,
            });
        }

        if bits.len() != 4 || !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ParseMazeError::BadWallBits { line });
        }
        let bits = u8::from_str_radix(bits, 2).expect("checked to be binary digits");

        let slot = &mut cells[pos.0 as usize][pos.1 as usize];
        if slot.is_some() {
            return Err(ParseMazeError::DuplicateTile { line, pos });
        }
        *slot = Some(Cell::from_wall_bits(pos, bits));
    }

    let cells = cells
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(|(c, cell)| cell.ok_or(ParseMazeError::MissingTile(Dims(r as i32, c as i32))))
                .collect()
        })
        .collect::<Result<Vec<Vec<Cell>>, _>>()?;

    Ok(Maze::from_cells(cells)?)
}

fn parse_header(header: &str) -> Result<(i32, i32), ParseMazeError> {
    let bad = || ParseMazeError::BadHeader(header.to_owned());
    let (rows, cols) = header.split_once(',').ok_or_else(bad)?;
    Ok((
        rows.trim().parse().map_err(|_| bad())?,
        cols.trim().parse().map_err(|_| bad())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::algorithms::{MazeType, RndKruskals};
    use crate::maze::CellWall;

    #[test]
    fn round_trip_preserves_every_wall() {
        let mut maze = Maze::new(6, 5).unwrap();
        RndKruskals::new(&maze, Some(13), MazeType::Imperfect)
            .run(&mut maze)
            .unwrap();

        let text = to_string(&maze);
        let restored = from_str(&text).unwrap();

        assert_eq!(restored.size(), maze.size());
        for r in 0..6 {
            for c in 0..5 {
                assert_eq!(
                    restored.get_cell(Dims(r, c)).unwrap().wall_bits(),
                    maze.get_cell(Dims(r, c)).unwrap().wall_bits()
                );
            }
        }
    }

    #[test]
    fn wall_bits_use_the_documented_order() {
        let mut maze = Maze::new(1, 2).unwrap();
        // (0,0) keeps Top, Bottom, Left; loses Right (and (0,1) its Left)
        maze.remove_wall(Dims(0, 0), CellWall::Right).unwrap();

        let text = to_string(&maze);
        assert_eq!(text, "1,2\n0,0,1011\n0,1,1110\n");
    }

    #[test]
    fn accepts_blank_lines_and_spacing() {
        let text = "1,1\n\n  0 , 0 , 1111  \n";
        let maze = from_str(text).unwrap();
        assert_eq!(maze.size(), Dims(1, 1));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(from_str(""), Err(ParseMazeError::Empty)));
        assert!(matches!(
            from_str("oops\n"),
            Err(ParseMazeError::BadHeader(_))
        ));
        assert!(matches!(
            from_str("2\n"),
            Err(ParseMazeError::BadHeader(_))
        ));
        assert!(matches!(
            from_str("0,3\n"),
            Err(ParseMazeError::Maze(MazeError::InvalidSize { .. }))
        ));
        assert!(matches!(
            from_str("1,1\n0,0\n"),
            Err(ParseMazeError::BadLine { line: 2 })
        ));
        assert!(matches!(
            from_str("1,1\nx,0,1111\n"),
            Err(ParseMazeError::BadCoord { line: 2 })
        ));
        assert!(matches!(
            from_str("1,1\n0,5,1111\n"),
            Err(ParseMazeError::TileOutOfRange { line: 2, .. })
        ));
        assert!(matches!(
            from_str("1,1\n0,0,111\n"),
            Err(ParseMazeError::BadWallBits { line: 2 })
        ));
        assert!(matches!(
            from_str("1,1\n0,0,11x1\n"),
            Err(ParseMazeError::BadWallBits { line: 2 })
        ));
        assert!(matches!(
            from_str("1,1\n0,0,1111\n0,0,1111\n"),
            Err(ParseMazeError::DuplicateTile { line: 3, .. })
        ));
        assert!(matches!(
            from_str("1,2\n0,0,1111\n"),
            Err(ParseMazeError::MissingTile(Dims(0, 1)))
        ));
    }

    #[test]
    fn rejects_mismatched_mirror_walls() {
        // (0,0) open to the right but (0,1) walled on its left
        let text = "1,2\n0,0,1011\n0,1,1111\n";
        assert!(matches!(
            from_str(text),
            Err(ParseMazeError::Maze(MazeError::WallMismatch(..)))
        ));
    }
}
