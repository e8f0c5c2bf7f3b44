use std::path::PathBuf;
use std::time::Duration;
use std::{fs, thread};

use clap::{Parser, ValueEnum};
use log::{info, Log, Metadata, Record};
use thiserror::Error;

use stepmaze::maze::algorithms::GenerationError;
use stepmaze::ser::{self, ParseMazeError};
use stepmaze::{CellWall, Dims, Maze, MazeError, MazeType, RndKruskals, SolverKind, TileStatus};

#[derive(Debug, Error)]
enum Error {
    #[error("maze error; {0}")]
    Maze(#[from] MazeError),
    #[error("generation error; {0}")]
    Generation(#[from] GenerationError),
    #[error("maze file error; {0}")]
    Parse(#[from] ParseMazeError),
    #[error("io error; {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MazeTypeArg {
    Perfect,
    Imperfect,
}

impl From<MazeTypeArg> for MazeType {
    fn from(arg: MazeTypeArg) -> Self {
        match arg {
            MazeTypeArg::Perfect => MazeType::Perfect,
            MazeTypeArg::Imperfect => MazeType::Imperfect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    Dfs,
    Bfs,
    Dijkstra,
}

impl From<SolverArg> for SolverKind {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::Dfs => SolverKind::DepthFirst,
            SolverArg::Bfs => SolverKind::BreadthFirst,
            SolverArg::Dijkstra => SolverKind::Dijkstra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Run every algorithm to completion before rendering.
    Instant,
    /// Render after every tick of the algorithm.
    Step,
}

#[derive(Parser)]
#[command(name = "stepmaze", about = "Generate and solve mazes in the terminal")]
struct Args {
    /// Number of rows of the maze.
    #[arg(long, default_value_t = 10)]
    rows: i32,

    /// Number of columns of the maze.
    #[arg(long, default_value_t = 10)]
    cols: i32,

    /// Seed for the generator; the same seed and size reproduce the same
    /// maze. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long = "type", value_enum, default_value_t = MazeTypeArg::Perfect)]
    maze_type: MazeTypeArg,

    #[arg(long, value_enum, default_value_t = SolverArg::Bfs)]
    solver: SolverArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Instant)]
    mode: ModeArg,

    /// Delay between rendered ticks in step mode.
    #[arg(long, default_value_t = 25)]
    tick_ms: u64,

    /// Load the maze from a file instead of generating one.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the maze to a file after generation.
    #[arg(long)]
    save: Option<PathBuf>,

    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    log::set_logger(&LOGGER).expect("logger is only installed once");
    log::set_max_level(match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    });
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut maze = match &args.load {
        Some(path) => {
            let maze = ser::from_str(&fs::read_to_string(path)?)?;
            info!("loaded {:?} maze from {}", maze.size(), path.display());
            maze
        }
        None => generate(&args)?,
    };

    if let Some(path) = &args.save {
        fs::write(path, ser::to_string(&maze))?;
        info!("saved maze to {}", path.display());
    }

    solve(&args, &mut maze);
    Ok(())
}

fn generate(args: &Args) -> Result<Maze, Error> {
    let mut maze = Maze::new(args.rows, args.cols)?;
    let mut generator = RndKruskals::new(&maze, args.seed, args.maze_type.into());

    match args.mode {
        ModeArg::Instant => generator.run(&mut maze)?,
        ModeArg::Step => {
            while generator.step(&mut maze)? {
                print_frame(&maze);
                thread::sleep(Duration::from_millis(args.tick_ms));
            }
        }
    }

    info!(
        "generated {:?} {:?} maze from {} edges",
        maze.size(),
        MazeType::from(args.maze_type),
        generator.edge_count()
    );
    Ok(maze)
}

fn solve(args: &Args, maze: &mut Maze) {
    let kind = SolverKind::from(args.solver);
    let mut solver = kind.build(maze);

    match args.mode {
        ModeArg::Instant => while !solver.step(maze) {},
        ModeArg::Step => {
            while !solver.step(maze) {
                print_frame(maze);
                thread::sleep(Duration::from_millis(args.tick_ms));
            }
        }
    }

    println!("{}", render(maze));
    if solver.path_count() == 0 {
        println!("no route from start to end");
    }
    println!(
        "{:?}: visited {} tiles, path of {} tiles, took {} ms",
        kind,
        solver.visited_count(),
        solver.path_count(),
        solver.elapsed().as_millis()
    );
}

fn print_frame(maze: &Maze) {
    // clear the screen and move the cursor home
    println!("\x1b[2J\x1b[H{}", render(maze));
}

/// Draws the maze with `+---+` walls, `o` for visited tiles and `#` for the
/// final route.
fn render(maze: &Maze) -> String {
    let Dims(rows, cols) = maze.size();
    let mut out = String::new();

    for r in 0..rows {
        for c in 0..cols {
            let cell = maze.get_cell(Dims(r, c)).unwrap();
            out.push('+');
            out.push_str(if cell.get_wall(CellWall::Top) { "---" } else { "   " });
        }
        out.push_str("+\n");

        for c in 0..cols {
            let cell = maze.get_cell(Dims(r, c)).unwrap();
            out.push(if cell.get_wall(CellWall::Left) { '|' } else { ' ' });
            out.push_str(match cell.status() {
                TileStatus::Path => " # ",
                TileStatus::Visited => " o ",
                TileStatus::Unvisited => "   ",
            });
        }
        let last = maze.get_cell(Dims(r, cols - 1)).unwrap();
        out.push(if last.get_wall(CellWall::Right) { '|' } else { ' ' });
        out.push('\n');
    }

    for c in 0..cols {
        let cell = maze.get_cell(Dims(rows - 1, c)).unwrap();
        out.push('+');
        out.push_str(if cell.get_wall(CellWall::Bottom) { "---" } else { "   " });
    }
    out.push('+');
    out
}
