use crate::{ConfigError, Resampling};
use std::time::Duration;

/// Parameters of a simulation session.
///
/// Passed explicitly into every component at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    /// Side length `N` of the square grid.
    pub grid_size: usize,
    /// Target simulation rate in generations per second.
    pub fps: f64,
    /// Density of a randomly filled grid.
    pub alive_probability: f64,
    /// Pixels darker than this become live cells.
    pub brightness_threshold: u8,
    /// How images are downsampled to the grid size.
    pub resampling: Resampling,
    /// Seed for random fills (if `None`, then random seed is generated)
    pub seed: Option<u64>,
}

impl LifeConfig {
    pub const DEFAULT_GRID_SIZE: usize = 100;
    pub const DEFAULT_FPS: f64 = 10.;
    pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;
    pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 128;

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid_size(self.grid_size)?;
        validate_fps(self.fps)?;
        validate_probability(self.alive_probability)?;
        validate_threshold(self.brightness_threshold)?;
        Ok(())
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            fps: Self::DEFAULT_FPS,
            alive_probability: Self::DEFAULT_ALIVE_PROBABILITY,
            brightness_threshold: Self::DEFAULT_BRIGHTNESS_THRESHOLD,
            resampling: Resampling::default(),
            seed: None,
        }
    }
}

/// `N * N` cells must be addressable and `N` must fit an image dimension.
pub(crate) fn validate_grid_size(n: usize) -> Result<(), ConfigError> {
    if n == 0 {
        return Err(ConfigError::ZeroGridSize);
    }
    if n > u32::MAX as usize || n.checked_mul(n).is_none() {
        return Err(ConfigError::GridTooLarge(n));
    }
    Ok(())
}

fn validate_fps(fps: f64) -> Result<(), ConfigError> {
    tick_interval(fps).map(|_| ())
}

/// Interval between generations; fails when it does not fit a `Duration`.
pub(crate) fn tick_interval(fps: f64) -> Result<Duration, ConfigError> {
    if !(fps.is_finite() && fps > 0.) {
        return Err(ConfigError::InvalidFps(fps));
    }
    Duration::try_from_secs_f64(1. / fps).map_err(|_| ConfigError::InvalidFps(fps))
}

pub(crate) fn validate_probability(p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability(p))
    }
}

pub(crate) fn validate_threshold(threshold: u8) -> Result<(), ConfigError> {
    if threshold == 0 {
        Err(ConfigError::InvalidThreshold(threshold))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(LifeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            LifeConfig {
                grid_size: 0,
                ..Default::default()
            },
            LifeConfig {
                fps: 0.,
                ..Default::default()
            },
            LifeConfig {
                fps: f64::NAN,
                ..Default::default()
            },
            LifeConfig {
                fps: 1e-30,
                ..Default::default()
            },
            LifeConfig {
                grid_size: usize::MAX,
                ..Default::default()
            },
            LifeConfig {
                grid_size: u32::MAX as usize + 1,
                ..Default::default()
            },
            LifeConfig {
                alive_probability: 1.5,
                ..Default::default()
            },
            LifeConfig {
                brightness_threshold: 0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn grid_size_bounds() {
        assert_eq!(validate_grid_size(0), Err(ConfigError::ZeroGridSize));
        assert_eq!(
            validate_grid_size(usize::MAX),
            Err(ConfigError::GridTooLarge(usize::MAX))
        );
        assert_eq!(validate_grid_size(1), Ok(()));
        assert_eq!(validate_grid_size(4096), Ok(()));
    }

    #[test]
    fn tiny_fps_is_rejected_not_a_panic() {
        assert_eq!(tick_interval(1e-30), Err(ConfigError::InvalidFps(1e-30)));
        assert_eq!(tick_interval(4.), Ok(Duration::from_millis(250)));
    }
}
