// main.rs - Terminal driver: plays a pattern on a timer and prints each generation

use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use conway::patterns;
use conway::{Session, Settings, Speed, StopReason};

/// Runs Conway's Game of Life in the terminal until it dies out, settles, or is interrupted.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid dimensions expressed as WIDTHxHEIGHT (for example 32x18).
    #[arg(short = 's', long = "size", value_name = "WIDTHxHEIGHT", default_value = "32x18")]
    size: GridSizeArg,
    /// Pattern name, `random`, or `auto` for the largest built-in seed that fits.
    #[arg(short, long, default_value = "auto")]
    pattern: String,
    /// Seed for `--pattern random`.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Generations per second (1-5).
    #[arg(long, default_value = "5")]
    speed: Speed,
    /// Stop after this many generations even if the pattern is still changing.
    #[arg(long, value_name = "N")]
    max_generations: Option<u64>,
    /// Earlier generations remembered by the auto-stop check. 1 stops on still lifes only.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    history: u16,
    /// Print only the final summary.
    #[arg(short, long)]
    quiet: bool,
}

/// Grid dimensions parsed from a WIDTHxHEIGHT argument.
#[derive(Debug, Clone, Copy)]
struct GridSizeArg {
    width: i64,
    height: i64,
}

impl FromStr for GridSizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;
        let width = width
            .trim()
            .parse::<i64>()
            .map_err(|error| format!("invalid width: {error}"))?;
        let height = height
            .trim()
            .parse::<i64>()
            .map_err(|error| format!("invalid height: {error}"))?;
        Ok(Self { width, height })
    }
}

#[derive(Debug)]
enum Outcome {
    Stopped(StopReason),
    GenerationLimit,
    Interrupted,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(Settings {
        speed: args.speed,
        history: usize::from(args.history),
        ..Settings::default()
    });

    session
        .resize(args.size.width, args.size.height)
        .with_context(|| format!("cannot create a {}x{} grid", args.size.width, args.size.height))?;
    load(&mut session, &args)?;

    let outcome = run(&mut session, &args).await;
    let engine = session.engine();
    if args.quiet {
        print!("{}", engine.grid());
    }
    match outcome {
        Outcome::Stopped(reason) => info!(generation = engine.generation(), %reason, "stopped"),
        Outcome::GenerationLimit => info!(generation = engine.generation(), "generation limit reached"),
        Outcome::Interrupted => info!(generation = engine.generation(), "interrupted"),
    }
    println!("generation {} with {} live cells", engine.generation(), engine.live_cells().len());
    Ok(())
}

/// Installs the requested starting pattern. `auto` keeps whatever the resize seeded.
fn load(session: &mut Session, args: &Args) -> Result<()> {
    match args.pattern.as_str() {
        "auto" => {
            if session.engine().live_cells().is_empty() {
                bail!(
                    "a {}x{} grid is too small for the built-in seeds; pick a --pattern",
                    args.size.width,
                    args.size.height
                );
            }
        }
        "random" => session.randomize(args.seed)?,
        name => {
            let pattern = patterns::find(name).with_context(|| {
                let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
                format!("unknown pattern {name:?}; known patterns: {}", known.join(", "))
            })?;
            session
                .load_pattern(pattern)
                .with_context(|| format!("{} does not fit on the grid", pattern.name))?;
        }
    }
    Ok(())
}

/// Advances once per interval tick until the session halts, the limit is hit, or Ctrl-C.
async fn run(session: &mut Session, args: &Args) -> Outcome {
    let mut ticker = time::interval(args.speed.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if !args.quiet {
        print_generation(session);
    }
    if let Some(reason) = session.play(Instant::now()) {
        return Outcome::Stopped(reason);
    }
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        if args.max_generations.is_some_and(|limit| session.engine().generation() >= limit) {
            session.pause();
            return Outcome::GenerationLimit;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                session.pause();
                return Outcome::Interrupted;
            }
        }

        let stopped = session.advance();
        debug!(generation = session.engine().generation(), "tick");
        if !args.quiet {
            print_generation(session);
        }
        if let Some(reason) = stopped {
            return Outcome::Stopped(reason);
        }
    }
}

fn print_generation(session: &Session) {
    let engine = session.engine();
    println!("generation {} ({} live)", engine.generation(), engine.live_cells().len());
    print!("{}", engine.grid());
    println!();
}
