#![warn(clippy::all)]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use pixel_life::{LifeConfig, Resampling, Session};
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResamplingArg {
    Nearest,
    Smooth,
}

impl From<ResamplingArg> for Resampling {
    fn from(arg: ResamplingArg) -> Self {
        match arg {
            ResamplingArg::Nearest => Resampling::Nearest,
            ResamplingArg::Smooth => Resampling::Smooth,
        }
    }
}

/// Conway's Game of Life on a torus, optionally seeded from an image.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Image to turn into the initial pattern
    image: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long, default_value_t = LifeConfig::DEFAULT_GRID_SIZE)]
    size: usize,

    /// Generations per second while running
    #[arg(long, default_value_t = LifeConfig::DEFAULT_FPS)]
    fps: f64,

    /// Density of the random fill
    #[arg(long, default_value_t = LifeConfig::DEFAULT_ALIVE_PROBABILITY)]
    probability: f64,

    /// Pixels darker than this become live cells
    #[arg(long, default_value_t = LifeConfig::DEFAULT_BRIGHTNESS_THRESHOLD)]
    threshold: u8,

    /// How images are scaled down to the grid
    #[arg(long, value_enum, default_value_t = ResamplingArg::Smooth)]
    resampling: ResamplingArg,

    /// Seed for random fills
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> LifeConfig {
        LifeConfig {
            grid_size: self.size,
            fps: self.fps,
            alive_probability: self.probability,
            brightness_threshold: self.threshold,
            resampling: self.resampling.into(),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.config();
    let mut session = Session::new(config).context("invalid configuration")?;
    if let Some(path) = args.image {
        info!(path = %path.display(), "loading initial image");
        session.load_image_file(path);
    }

    run_gui(session)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn run_gui(session: Session) -> Result<()> {
    use eframe::egui::{vec2, ViewportBuilder};

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size(vec2(1280., 800.))
            .with_min_inner_size(vec2(640.0, 360.0))
            .with_drag_and_drop(true),
        follow_system_theme: false,
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Ok(Box::new(pixel_life::App::new(session)))),
    )
    .map_err(|err| anyhow!("{}", err))
}
