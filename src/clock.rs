use crate::{config::tick_interval, Result};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Decides when the next generation is due.
///
/// The clock never steps anything itself; the owner polls it and advances
/// the grid once per `true`. Successive ticks are at least `1 / fps` apart and
/// a late poll yields a single tick, after which the schedule restarts from
/// the moment of that tick.
pub struct SimulationClock {
    state: ClockState,
    interval: Duration,
    last_tick: Instant,
}

impl SimulationClock {
    pub fn new(fps: f64) -> Result<Self> {
        Ok(Self {
            state: ClockState::Stopped,
            interval: tick_interval(fps)?,
            last_tick: Instant::now(),
        })
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fps(&self) -> f64 {
        1. / self.interval.as_secs_f64()
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        self.interval = tick_interval(fps)?;
        Ok(())
    }

    /// The first tick becomes due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        if self.state == ClockState::Stopped {
            self.state = ClockState::Running;
            self.last_tick = now;
        }
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Returns `true` if exactly one step should be taken at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick = now;
        true
    }

    /// Time left until the next tick, `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.state != ClockState::Running {
            return None;
        }
        Some(
            self.interval
                .saturating_sub(now.saturating_duration_since(self.last_tick)),
        )
    }
}
