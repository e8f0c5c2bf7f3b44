use std::time::Duration;

use super::{SolverAlgorithm, SolverState};
use crate::dims::Dims;
use crate::maze::{Maze, TileStatus};

/// Stack-driven search. Finds some route, not necessarily the shortest one.
pub struct DepthFirstSearch {
    state: SolverState,
    stack: Vec<Dims>,
}

impl DepthFirstSearch {
    pub fn new(maze: &mut Maze) -> Self {
        let mut state = SolverState::new(maze);
        let start = state.start;
        state.visited.insert(start);

        DepthFirstSearch {
            state,
            stack: vec![start],
        }
    }
}

impl SolverAlgorithm for DepthFirstSearch {
    fn step(&mut self, maze: &mut Maze) -> bool {
        if self.state.finished {
            return self.state.trace_step(maze);
        }

        let Some(current) = self.stack.pop() else {
            // frontier exhausted without reaching the end tile
            self.state.finish_search();
            return false;
        };

        maze.get_cell_mut(current)
            .unwrap()
            .set_status(TileStatus::Visited);

        if current == self.state.end {
            self.state.finish_search();
            return false;
        }

        for neighbor in maze.accessible_neighbors(current) {
            if self.state.visited.insert(neighbor) {
                self.state.parent.insert(neighbor, current);
                self.stack.push(neighbor);
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
