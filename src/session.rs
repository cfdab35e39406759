use crate::{
    Grid, LifeConfig, LifeEngine, LifeError, Quantizer, Resampling, Result, SimulationClock,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::Instant,
};
use tracing::{debug, info, warn};

/// Token of an image load; only the newest one may replace the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// What happened to a finished image load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The quantized image became the current grid.
    Applied(LoadTicket),
    /// The grid was replaced after the load was issued; the result is dropped, even an error.
    Stale(LoadTicket),
    /// Decoding or quantization failed; the current grid is untouched.
    Failed(LoadTicket, LifeError),
}

struct PendingLoad {
    ticket: LoadTicket,
    rx: Receiver<Result<Grid>>,
}

/// Owner of the current grid.
///
/// Every replacement of the grid goes through the session, which stops the
/// clock first and refuses manual edits while the simulation runs.
pub struct Session {
    config: LifeConfig,
    current: Grid,
    engine: LifeEngine,
    clock: SimulationClock,
    quantizer: Quantizer,
    rng: ChaCha8Rng,
    generation: u64,
    latest_ticket: u64,
    pending: Vec<PendingLoad>,
}

impl Session {
    /// Starts stopped, with an empty grid.
    pub fn new(config: LifeConfig) -> Result<Self> {
        config.validate()?;
        let rng = if let Some(x) = config.seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        Ok(Self {
            current: Grid::empty(config.grid_size),
            engine: LifeEngine::new(),
            clock: SimulationClock::new(config.fps)?,
            quantizer: Quantizer::from_config(&config)?,
            rng,
            generation: 0,
            latest_ticket: 0,
            pending: vec![],
            config,
        })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn size(&self) -> usize {
        self.config.grid_size
    }

    /// Generations stepped since the grid was last replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn start(&mut self, now: Instant) {
        if !self.clock.is_running() {
            info!(generation = self.generation, "simulation started");
        }
        self.clock.start(now);
    }

    pub fn stop(&mut self) {
        if self.clock.is_running() {
            info!(generation = self.generation, "simulation stopped");
        }
        self.clock.stop();
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        self.clock.set_fps(fps)?;
        self.config.fps = fps;
        Ok(())
    }

    /// Applies to loads issued afterwards.
    pub fn set_threshold(&mut self, threshold: u8) -> Result<()> {
        self.quantizer.set_threshold(threshold)?;
        self.config.brightness_threshold = threshold;
        Ok(())
    }

    pub fn set_resampling(&mut self, resampling: Resampling) {
        self.quantizer.set_resampling(resampling);
        self.config.resampling = resampling;
    }

    /// Negate one cell; rejected while running.
    ///
    /// A hand edit counts as a replacement of the grid, so loads issued
    /// before it become stale.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        if self.clock.is_running() {
            debug!(row, col, "toggle rejected while running");
            return Err(LifeError::SimulationRunning);
        }
        self.current = self.current.toggled(row, col)?;
        self.latest_ticket += 1;
        Ok(())
    }

    /// Advance one generation by hand; rejected while running.
    ///
    /// Invalidates pending loads, like [`Session::toggle`].
    pub fn step_once(&mut self) -> Result<()> {
        if self.clock.is_running() {
            return Err(LifeError::SimulationRunning);
        }
        self.advance();
        self.latest_ticket += 1;
        Ok(())
    }

    /// Takes one step if the clock says it is due at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.clock.poll(now) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        self.engine.advance_in_place(&mut self.current);
        self.generation += 1;
    }

    /// Replace the grid, stopping the simulation and invalidating pending loads.
    pub fn set_grid(&mut self, grid: Grid) -> Result<()> {
        if grid.size() != self.size() {
            return Err(LifeError::DimensionMismatch {
                expected: self.size(),
                actual: grid.size(),
            });
        }
        self.latest_ticket += 1;
        self.replace_grid(grid);
        Ok(())
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.stop();
        self.current = grid;
        self.generation = 0;
    }

    pub fn clear(&mut self) {
        info!("grid cleared");
        let grid = Grid::empty(self.size());
        self.latest_ticket += 1;
        self.replace_grid(grid);
    }

    pub fn randomize(&mut self) -> Result<()> {
        let p = self.config.alive_probability;
        let grid = Grid::random(self.size(), p, &mut self.rng)?;
        info!(alive_probability = p, population = grid.population(), "grid randomized");
        self.latest_ticket += 1;
        self.replace_grid(grid);
        Ok(())
    }

    /// Issue a ticket for an image that is about to be quantized elsewhere.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        debug!(ticket = self.latest_ticket, "image load issued");
        LoadTicket(self.latest_ticket)
    }

    /// Apply the result of a load if nothing replaced the grid in the meantime.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Grid>) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            info!(ticket = ticket.0, latest = self.latest_ticket, "stale image load dropped");
            return LoadOutcome::Stale(ticket);
        }
        match result {
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "image load failed");
                LoadOutcome::Failed(ticket, err)
            }
            Ok(grid) if grid.size() != self.size() => {
                let err = LifeError::DimensionMismatch {
                    expected: self.size(),
                    actual: grid.size(),
                };
                warn!(ticket = ticket.0, error = %err, "image load failed");
                LoadOutcome::Failed(ticket, err)
            }
            Ok(grid) => {
                info!(ticket = ticket.0, population = grid.population(), "image loaded");
                self.replace_grid(grid);
                LoadOutcome::Applied(ticket)
            }
        }
    }

    /// Decode and quantize encoded image bytes on a worker thread.
    pub fn load_image_bytes(&mut self, data: Vec<u8>) -> LoadTicket {
        let quantizer = self.quantizer;
        self.spawn_load(move || quantizer.quantize_bytes(&data))
    }

    /// Read, decode and quantize an image file on a worker thread.
    pub fn load_image_file(&mut self, path: PathBuf) -> LoadTicket {
        let quantizer = self.quantizer;
        self.spawn_load(move || quantizer.quantize_file(&path))
    }

    fn spawn_load<F>(&mut self, job: F) -> LoadTicket
    where
        F: FnOnce() -> Result<Grid> + Send + 'static,
    {
        let ticket = self.begin_load();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // the session may be gone by now
            let _ = tx.send(job());
        });
        self.pending.push(PendingLoad { ticket, rx });
        ticket
    }

    pub fn has_pending_loads(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Collect finished worker loads without blocking.
    pub fn poll_loads(&mut self) -> Vec<LoadOutcome> {
        let mut finished = vec![];
        let mut still_pending = vec![];
        for load in std::mem::take(&mut self.pending) {
            match load.rx.try_recv() {
                Ok(result) => finished.push((load.ticket, result)),
                Err(TryRecvError::Empty) => still_pending.push(load),
                Err(TryRecvError::Disconnected) => finished.push((
                    load.ticket,
                    Err(LifeError::LoadWorker("worker exited without a result".into())),
                )),
            }
        }
        self.pending = still_pending;
        finished
            .into_iter()
            .map(|(ticket, result)| self.finish_load(ticket, result))
            .collect()
    }

    /// Block until every pending load has finished.
    pub fn wait_for_loads(&mut self) -> Vec<LoadOutcome> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .map(|load| {
                let result = load.rx.recv().unwrap_or_else(|_| {
                    Err(LifeError::LoadWorker("worker exited without a result".into()))
                });
                self.finish_load(load.ticket, result)
            })
            .collect()
    }
}
