// main.rs - Desktop front end for the bounded Game of Life
// The grid follows the window size; rendering and input live in ui.rs

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use egui::Color32;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway::{CellSize, Session, Settings, Speed};

mod ui;

/// Interactive Conway's Game of Life.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generations per second while playing (1-5).
    #[arg(long, default_value = "1")]
    speed: Speed,
    /// Rendered cell edge in pixels (25, 50, 75 or 100).
    #[arg(long, default_value = "25")]
    cell_size: CellSize,
    /// Earlier generations remembered by the auto-stop check. 1 stops on still lifes only.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    history: u16,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings {
        speed: args.speed,
        cell_size: args.cell_size,
        history: usize::from(args.history),
    };
    info!(speed = %settings.speed, cell_size = %settings.cell_size, history = settings.history, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(settings))),
    )
    .map_err(|err| anyhow::anyhow!("window closed with an error: {err}"))
}

/// Front-end state around one simulation session.
pub struct GameOfLife {
    pub session: Session,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub random_seed: u64,
    pub message: Option<String>,
}

impl GameOfLife {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(settings),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            random_seed: 0,
            message: None,
        }
    }
}
