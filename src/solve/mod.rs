mod breadth_first_search;
mod depth_first_search;
mod dijkstra;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::debug;
use pausable_clock::{PausableClock, PausableInstant};

pub use breadth_first_search::BreadthFirstSearch;
pub use depth_first_search::DepthFirstSearch;
pub use dijkstra::Dijkstra;

use crate::dims::Dims;
use crate::maze::{Maze, TileStatus};

/// Common stepping contract of the pathfinding strategies.
///
/// A solver is driven by calling [`step`](Self::step) until it reports
/// completion, either in a tight loop or one tick at a time from an outside
/// clock; both end in the same tile markings and counters. "No path" is a
/// normal outcome, visible as `path_count() == 0` once complete.
pub trait SolverAlgorithm {
    /// Advances by one unit of work: one frontier pop while searching, one
    /// parent-chain link while tracing the path. Returns `true` once there
    /// is nothing left to do; further calls are no-ops returning `true`.
    fn step(&mut self, maze: &mut Maze) -> bool;

    fn is_complete(&self) -> bool;

    /// Tiles discovered by the search so far.
    fn visited_count(&self) -> usize;

    /// Tiles marked as the final route so far.
    fn path_count(&self) -> usize;

    /// Wall-clock time spent, frozen once the solver completes.
    fn elapsed(&self) -> Duration;
}

/// Choice of solving strategy, mostly for front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    DepthFirst,
    BreadthFirst,
    Dijkstra,
}

impl SolverKind {
    pub fn build(self, maze: &mut Maze) -> Box<dyn SolverAlgorithm> {
        match self {
            SolverKind::DepthFirst => Box::new(DepthFirstSearch::new(maze)),
            SolverKind::BreadthFirst => Box::new(BreadthFirstSearch::new(maze)),
            SolverKind::Dijkstra => Box::new(Dijkstra::new(maze)),
        }
    }
}

/// State shared by every strategy: the parent links for path replay, the
/// visited set, the phase flags and the counters. The strategies differ only
/// in their frontier data structure.
///
/// The search phase and the replay phase are strictly ordered; no replay
/// link is walked before the search has concluded, and no search work
/// happens once replay has started.
pub(crate) struct SolverState {
    pub start: Dims,
    pub end: Dims,
    pub parent: HashMap<Dims, Dims>,
    pub visited: HashSet<Dims>,
    pub finished: bool,
    path_step: Option<Dims>,
    path_count: usize,
    done: bool,
    clock: PausableClock,
    started: PausableInstant,
}

impl SolverState {
    /// Clears any earlier solve's tile markings and starts the clock.
    pub fn new(maze: &mut Maze) -> Self {
        maze.reset_tile_status();
        let clock = PausableClock::default();
        let started = clock.now();

        SolverState {
            start: maze.start(),
            end: maze.end(),
            parent: HashMap::new(),
            visited: HashSet::new(),
            finished: false,
            path_step: None,
            path_count: 0,
            done: false,
            clock,
            started,
        }
    }

    /// Concludes the search phase. The replay cursor starts at the end tile
    /// when the search reached it, otherwise replay has nothing to mark.
    pub fn finish_search(&mut self) {
        self.finished = true;
        self.path_step = self.visited.contains(&self.end).then_some(self.end);
        debug!(
            "search finished, end {}, {} tiles visited",
            if self.path_step.is_some() {
                "reached"
            } else {
                "unreachable"
            },
            self.visited.len()
        );
    }

    /// One replay step: marks the cursor tile as part of the path and walks
    /// one parent link back toward the start. Returns `true` once replay is
    /// over.
    pub fn trace_step(&mut self, maze: &mut Maze) -> bool {
        if self.done {
            return true;
        }

        match self.path_step {
            Some(pos) => {
                maze.get_cell_mut(pos).unwrap().set_status(TileStatus::Path);
                self.path_count += 1;
                self.path_step = self.parent.get(&pos).copied();
                if self.path_step.is_none() {
                    self.complete();
                }
            }
            None => self.complete(),
        }

        self.done
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }

    pub fn path_count(&self) -> usize {
        self.path_count
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed(&self.clock)
    }

    fn complete(&mut self) {
        self.done = true;
        self.clock.pause();
        debug!("solve complete, path length {}", self.path_count);
    }
}
