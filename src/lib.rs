#![warn(clippy::all)]

mod clock;
mod config;
mod engine;
mod error;
mod grid;
mod gui;
mod quantize;
mod session;

pub use clock::{ClockState, SimulationClock};
pub use config::LifeConfig;
pub use engine::{count_neighbors, step, LifeEngine};
pub use error::{ConfigError, LifeError, Result};
pub use grid::{Cell, Grid};
pub use gui::{App, FieldLayout};
pub use quantize::{Quantizer, Resampling};
pub use session::{LoadOutcome, LoadTicket, Session};
