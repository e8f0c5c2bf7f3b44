use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use super::{SolverAlgorithm, SolverState};
use crate::dims::Dims;
use crate::maze::{Maze, TileStatus};

/// Priority-queue search over tentative distances. With every wall opening
/// costing one step this converges on the same route length as breadth-first
/// search, it just gets there by relaxation.
///
/// The heap is not decrease-key capable, so relaxing a tile re-inserts it
/// and stale entries are skipped when popped.
pub struct Dijkstra {
    state: SolverState,
    distance: HashMap<Dims, u32>,
    queue: BinaryHeap<Reverse<(u32, Dims)>>,
}

impl Dijkstra {
    pub fn new(maze: &mut Maze) -> Self {
        let state = SolverState::new(maze);
        let start = state.start;

        // every tile not in the map is at distance infinity
        let distance = HashMap::from([(start, 0)]);
        let queue = BinaryHeap::from([Reverse((0, start))]);

        Dijkstra {
            state,
            distance,
            queue,
        }
    }
}

impl SolverAlgorithm for Dijkstra {
    fn step(&mut self, maze: &mut Maze) -> bool {
        if self.state.finished {
            return self.state.trace_step(maze);
        }

        let Some(Reverse((dist, current))) = self.queue.pop() else {
            self.state.finish_search();
            return false;
        };

        // stale entry left over from a later relaxation
        if !self.state.visited.insert(current) {
            return false;
        }

        maze.get_cell_mut(current)
            .unwrap()
            .set_status(TileStatus::Visited);

        if current == self.state.end {
            self.state.finish_search();
            return false;
        }

        for neighbor in maze.accessible_neighbors(current) {
            if self.state.visited.contains(&neighbor) {
                continue;
            }

            let alt = dist + 1;
            if alt < *self.distance.get(&neighbor).unwrap_or(&u32::MAX) {
                self.distance.insert(neighbor, alt);
                self.state.parent.insert(neighbor, current);
                self.queue.push(Reverse((alt, neighbor)));
            }
        }

        false
    }

    fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    fn visited_count(&self) -> usize {
        self.state.visited.len()
    }

    fn path_count(&self) -> usize {
        self.state.path_count()
    }

    fn elapsed(&self) -> Duration {
        self.state.elapsed()
    }
}
