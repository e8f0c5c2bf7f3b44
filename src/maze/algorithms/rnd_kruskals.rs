use log::{debug, trace};
use rand::{seq::SliceRandom, thread_rng, Rng, SeedableRng};

use super::{DisjointSet, GenerationError, MazeType, Random};
use crate::dims::Dims;
use crate::maze::maze::Maze;

/// Chance that an edge whose tiles are already connected still loses its
/// wall in [`MazeType::Imperfect`] mode.
pub const EXTRA_PASSAGE_CHANCE: f64 = 0.5;

/// Stepwise randomized Kruskal's. Consumes a seeded shuffle of the grid's
/// edges one edge per [`step`](Self::step); driving it to completion leaves a
/// spanning tree (plus extra passages in imperfect mode).
///
/// The seeded shuffle is the only source of randomness in the engine, so the
/// same seed and grid size always reproduce the same maze, whether stepped
/// one tick at a time or run in a tight loop.
pub struct RndKruskals {
    edges: Vec<(Dims, Dims)>,
    cursor: usize,
    sets: DisjointSet,
    maze_type: MazeType,
    extra_passage_chance: f64,
    rng: Random,
}

impl RndKruskals {
    /// Collects and shuffles the grid's edges and registers every tile in a
    /// fresh disjoint set. Falls back to entropy from [`thread_rng`] when no
    /// seed is given.
    pub fn new(maze: &Maze, seed: Option<u64>, maze_type: MazeType) -> Self {
        let mut rng = Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()));

        let mut edges = maze.edges();
        edges.shuffle(&mut rng);

        let mut sets = DisjointSet::new();
        let Dims(rows, cols) = maze.size();
        for r in 0..rows {
            for c in 0..cols {
                sets.make_set(Dims(r, c));
            }
        }

        debug!(
            "kruskals: {}x{} grid, {} edges, {:?}",
            rows,
            cols,
            edges.len(),
            maze_type
        );

        RndKruskals {
            edges,
            cursor: 0,
            sets,
            maze_type,
            extra_passage_chance: EXTRA_PASSAGE_CHANCE,
            rng,
        }
    }

    /// Overrides [`EXTRA_PASSAGE_CHANCE`] for imperfect mazes.
    pub fn with_extra_passage_chance(mut self, chance: f64) -> Self {
        self.extra_passage_chance = chance;
        self
    }

    /// Consumes one edge from the shuffled list. When the edge's tiles are
    /// not yet connected, their sets are merged, the wall between them is
    /// removed and both tiles are marked visited. Already-connected edges
    /// are skipped in perfect mode; in imperfect mode their wall still
    /// falls with `extra_passage_chance`.
    ///
    /// Returns whether edges remain to process; calling after completion is
    /// a no-op returning `false`.
    pub fn step(&mut self, maze: &mut Maze) -> Result<bool, GenerationError> {
        let Some(&(a, b)) = self.edges.get(self.cursor) else {
            return Ok(false);
        };
        self.cursor += 1;

        if !self.sets.connected(a, b)? {
            self.sets.union(a, b)?;
            self.open_edge(maze, a, b)?;
            maze.get_cell_mut(a)?.set_visited(true);
            maze.get_cell_mut(b)?.set_visited(true);
            trace!("kruskals: joined {:?} and {:?}", a, b);
        } else if self.maze_type == MazeType::Imperfect
            && self.rng.gen_bool(self.extra_passage_chance)
        {
            self.open_edge(maze, a, b)?;
            trace!("kruskals: extra passage between {:?} and {:?}", a, b);
        }

        if self.is_complete() {
            debug!("kruskals: all {} edges consumed", self.edges.len());
        }

        Ok(self.cursor < self.edges.len())
    }

    /// Runs the generator to completion in one call.
    pub fn run(&mut self, maze: &mut Maze) -> Result<(), GenerationError> {
        while self.step(maze)? {}
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.edges.len()
    }

    /// Total number of edges in this run, for progress reporting.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges consumed so far.
    pub fn edges_done(&self) -> usize {
        self.cursor
    }

    fn open_edge(&self, maze: &mut Maze, a: Dims, b: Dims) -> Result<(), GenerationError> {
        // edges() only yields adjacent pairs, so the wall always exists
        if let Some(wall) = Maze::wall_between(a, b) {
            maze.remove_wall(a, wall)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::maze::cell::CellWall;

    fn generate(rows: i32, cols: i32, seed: u64, maze_type: MazeType) -> Maze {
        let mut maze = Maze::new(rows, cols).unwrap();
        RndKruskals::new(&maze, Some(seed), maze_type)
            .run(&mut maze)
            .unwrap();
        maze
    }

    fn open_wall_count(maze: &Maze) -> usize {
        let Dims(rows, cols) = maze.size();
        let mut count = 0;
        for r in 0..rows {
            for c in 0..cols {
                let cell = maze.get_cell(Dims(r, c)).unwrap();
                if c + 1 < cols && !cell.get_wall(CellWall::Right) {
                    count += 1;
                }
                if r + 1 < rows && !cell.get_wall(CellWall::Bottom) {
                    count += 1;
                }
            }
        }
        count
    }

    fn reachable_from_start(maze: &Maze) -> usize {
        let mut seen = HashSet::from([maze.start()]);
        let mut stack = vec![maze.start()];
        while let Some(pos) = stack.pop() {
            for next in maze.accessible_neighbors(pos) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn perfect_maze_is_a_spanning_tree() {
        for (rows, cols) in [(1, 1), (1, 8), (5, 5), (7, 3)] {
            let maze = generate(rows, cols, 42, MazeType::Perfect);
            let cells = (rows * cols) as usize;
            assert_eq!(open_wall_count(&maze), cells - 1, "{}x{}", rows, cols);
            assert_eq!(reachable_from_start(&maze), cells, "{}x{}", rows, cols);
        }
    }

    #[test]
    fn imperfect_maze_opens_a_superset() {
        let perfect = generate(6, 6, 7, MazeType::Perfect);
        let imperfect = generate(6, 6, 7, MazeType::Imperfect);

        assert!(open_wall_count(&imperfect) >= open_wall_count(&perfect));
        assert_eq!(reachable_from_start(&imperfect), 36);

        // every passage of the perfect maze is open in the imperfect one
        for (a, b) in perfect.edges() {
            if !perfect.has_wall_between(a, b).unwrap() {
                assert!(!imperfect.has_wall_between(a, b).unwrap());
            }
        }
    }

    #[test]
    fn zero_extra_passage_chance_stays_perfect() {
        let mut maze = Maze::new(5, 5).unwrap();
        RndKruskals::new(&maze, Some(3), MazeType::Imperfect)
            .with_extra_passage_chance(0.0)
            .run(&mut maze)
            .unwrap();
        assert_eq!(open_wall_count(&maze), 24);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(8, 8, 1234, MazeType::Perfect);
        let b = generate(8, 8, 1234, MazeType::Perfect);
        for r in 0..8 {
            for c in 0..8 {
                assert_eq!(
                    a.get_cell(Dims(r, c)).unwrap().wall_bits(),
                    b.get_cell(Dims(r, c)).unwrap().wall_bits()
                );
            }
        }
    }

    #[test]
    fn stepped_and_looped_runs_agree() {
        let mut looped = Maze::new(6, 6).unwrap();
        RndKruskals::new(&looped, Some(99), MazeType::Imperfect)
            .run(&mut looped)
            .unwrap();

        let mut stepped = Maze::new(6, 6).unwrap();
        let mut gen = RndKruskals::new(&stepped, Some(99), MazeType::Imperfect);
        while !gen.is_complete() {
            gen.step(&mut stepped).unwrap();
        }

        for r in 0..6 {
            for c in 0..6 {
                assert_eq!(
                    looped.get_cell(Dims(r, c)).unwrap().wall_bits(),
                    stepped.get_cell(Dims(r, c)).unwrap().wall_bits()
                );
            }
        }
    }

    #[test]
    fn step_after_completion_is_a_noop() {
        let mut maze = Maze::new(2, 2).unwrap();
        let mut gen = RndKruskals::new(&maze, Some(0), MazeType::Perfect);
        gen.run(&mut maze).unwrap();
        assert!(gen.is_complete());
        assert_eq!(gen.edges_done(), gen.edge_count());

        let before: Vec<u8> = (0..2)
            .flat_map(|r| (0..2).map(move |c| Dims(r, c)))
            .map(|pos| maze.get_cell(pos).unwrap().wall_bits())
            .collect();
        assert!(!gen.step(&mut maze).unwrap());
        let after: Vec<u8> = (0..2)
            .flat_map(|r| (0..2).map(move |c| Dims(r, c)))
            .map(|pos| maze.get_cell(pos).unwrap().wall_bits())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn joined_tiles_are_marked_visited() {
        let maze = generate(4, 4, 5, MazeType::Perfect);
        for r in 0..4 {
            for c in 0..4 {
                assert!(maze.get_cell(Dims(r, c)).unwrap().is_visited());
            }
        }
    }

    #[test]
    fn wall_mutuality_holds_after_every_step() {
        let mut maze = Maze::new(5, 5).unwrap();
        let mut gen = RndKruskals::new(&maze, Some(21), MazeType::Imperfect);
        loop {
            let more = gen.step(&mut maze).unwrap();
            for (a, b) in maze.edges() {
                let wall = Maze::wall_between(a, b).unwrap();
                assert_eq!(
                    maze.get_cell(a).unwrap().get_wall(wall),
                    maze.get_cell(b).unwrap().get_wall(wall.reverse_wall())
                );
            }
            if !more {
                break;
            }
        }
    }
}
