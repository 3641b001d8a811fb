use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;

use waypoint_search::algorithms::SearchMethod;
use waypoint_search::problem::Problem;
use waypoint_search::problems::maze_2d::Maze2DProblem;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Finds paths through text-grid mazes
#[derive(Parser, Debug)]
#[clap(long_version = waypoint_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "LOGS", default_value = "logs/main.org")]
    pub output: PathBuf,

    /// Search strategy
    #[arg(short, long, value_enum, default_value_t = SearchMethod::AstarMulti)]
    pub method: SearchMethod,

    /// Maze files. `%` walls, `P` start, `.` waypoints
    #[arg(required = true)]
    pub mazes: Vec<PathBuf>,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn solve<W: Write>(
    out: &mut BufWriter<W>,
    method: SearchMethod,
    maze: &std::path::Path,
) -> std::io::Result<bool> {
    let problem = match Maze2DProblem::try_from(maze) {
        Ok(problem) => problem,
        Err(e) => {
            println!("{} {maze:?}: {e}", "Skipping".yellow());
            writeln!(out, "** {maze:?}\nSkipped: {e}")?;
            return Ok(false);
        }
    };
    let (rows, cols) = problem.dimensions();
    writeln!(out, "** {maze:?} ({rows}x{cols})")?;
    writeln!(out, "- Start: {}", problem.start())?;
    writeln!(out, "- Waypoints: {}", problem.waypoints().len())?;

    let mut stopwatch = Stopwatch::new_started();
    let (result, stats) = method.run(&problem);
    stopwatch.stop();
    let elapsed = stopwatch.elapsed();

    writeln!(out, "*** Stats\n#+begin_example")?;
    stats.write(&mut *out)?;
    writeln!(out, "#+end_example")?;

    let path = match result {
        Ok(path) => path,
        Err(e) => {
            println!("{} {maze:?}: {e}", "Failed".red());
            writeln!(out, "*** Failed\n{e}")?;
            return Ok(false);
        }
    };

    let validation = if method.visits_all_waypoints() {
        problem.validate_path(&path)
    } else {
        problem.validate_leg(&path)
    };

    writeln!(out, "*** Solution\n{path}")?;
    writeln!(out, "#+begin_example\n{}#+end_example", problem.render(&path))?;

    match validation {
        Ok(()) => {
            println!(
                "{} {maze:?}: {} moves, {} expanded in {}",
                "Solved".green(),
                path.cost().bold(),
                stats.expanded,
                human_duration(&elapsed)
            );
            Ok(true)
        }
        Err(e) => {
            println!("{} {maze:?}: {e}", "Invalid path".red());
            writeln!(out, "*** Invalid path\n{e}")?;
            Ok(false)
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    args.color.write_global();
    println!("Logging to {:?}", args.output.yellow());

    if let Some(dir) = args.output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = File::create(&args.output)?;
    let mut out = BufWriter::new(file);

    writeln!(out, ":PROPERTIES:")?;
    writeln!(out, ":VERSION: {:?}", waypoint_search::build::PKG_VERSION)?;
    writeln!(out, ":METHOD: {}", args.method)?;
    writeln!(out, ":END:")?;
    writeln!(out, "* Runs")?;

    let mut solved = 0;
    for maze in &args.mazes {
        if solve(&mut out, args.method, maze)? {
            solved += 1;
        }
    }
    out.flush()?;

    println!(
        "{}/{} mazes solved with {}",
        solved,
        args.mazes.len(),
        args.method.cyan()
    );
    Ok(())
}
