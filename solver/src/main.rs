use std::fs;
use std::num::NonZero;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use crucible::{Grid, RouteSolver, RunConstraint};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find the least heat loss route across a city block map.", long_about = None)]
struct Args {
    /// Digit grid to route across, one row per line
    input: PathBuf,

    /// Which preset constraints to run
    #[arg(long, value_enum, default_value_t = Part::Both)]
    part: Part,

    /// Run a single search with this minimum run instead of the presets
    #[arg(long)]
    min_run: Option<usize>,

    /// Run a single search with this maximum run instead of the presets; unbounded if omitted
    #[arg(long)]
    max_run: Option<NonZero<usize>>,

    /// Print the grid with each route drawn over it
    #[arg(long)]
    show_route: bool,

    /// Raise the log level; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Part {
    One,
    Two,
    Both,
}

impl Args {
    /// Named constraints to run, in order.
    fn constraints(&self) -> Result<Vec<(&'static str, RunConstraint)>> {
        if self.min_run.is_some() || self.max_run.is_some() {
            let custom = RunConstraint::new(self.min_run.unwrap_or(0), self.max_run)?;
            return Ok(vec![("Custom", custom)]);
        }

        Ok(match self.part {
            Part::One => vec![("Part One", RunConstraint::crucible())],
            Part::Two => vec![("Part Two", RunConstraint::ultra_crucible())],
            Part::Both => vec![
                ("Part One", RunConstraint::crucible()),
                ("Part Two", RunConstraint::ultra_crucible()),
            ],
        })
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let constraints = args.constraints()?;
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read grid from {}", args.input.display()))?;
    let grid: Grid = text.parse()
        .with_context(|| format!("failed to parse grid in {}", args.input.display()))?;
    info!(width = grid.dims().0.get(), height = grid.dims().1.get(), "loaded grid");

    let (start, goal) = (grid.top_left(), grid.bottom_right());
    let mut total = 0.0;
    for (name, constraint) in constraints {
        println!(":: {name} ::");
        let timer = Instant::now();
        let route = RouteSolver::new(&grid, constraint)
            .solve(start, goal)
            .with_context(|| format!("{name} search failed"))?;
        let elapsed = timer.elapsed().as_secs_f64();
        total += elapsed;

        println!("Answer: {}", route.cost);
        println!("runtime: {elapsed:.4}s");
        if args.show_route {
            print!("{}", grid.render_route(&route));
        }
        info!(expansions = route.expansions, "{name} done");
    }
    println!(":: total runtime: {total:.4}s ::");

    Ok(())
}
