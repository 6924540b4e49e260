mod app;
mod autopilot;
mod hud;

use clap::Parser;

/// Headless sheep survival run driven by a simple autopilot.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Difficulty from 1 (gentle) to 10 (brutal); out-of-range values are clamped.
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    difficulty: i32,

    /// Seed for a reproducible run.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many simulated seconds if the sheep is still alive.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// Pace the simulation against the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Pasture starting up");

    if let Err(e) = app::run(&args) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
