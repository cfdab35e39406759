use crate::{
    config::{validate_grid_size, validate_threshold},
    Grid, LifeConfig, LifeError, Result,
};
use image::{imageops::FilterType, RgbaImage};
use std::path::Path;

/// Strategy for downsampling a raster to the grid size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resampling {
    /// Every cell takes the pixel nearest to its centre.
    Nearest,
    /// Bilinear (triangle) filtering, close to how a browser canvas scales images.
    #[default]
    Smooth,
}

impl Resampling {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Smooth => FilterType::Triangle,
        }
    }
}

/// Turns raster images into grids: dark pixels become live cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantizer {
    target_size: usize,
    threshold: u8,
    resampling: Resampling,
}

impl Quantizer {
    pub fn new(target_size: usize, threshold: u8, resampling: Resampling) -> Result<Self> {
        validate_grid_size(target_size)?;
        validate_threshold(threshold)?;
        Ok(Self {
            target_size,
            threshold,
            resampling,
        })
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        Self::new(
            config.grid_size,
            config.brightness_threshold,
            config.resampling,
        )
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: u8) -> Result<()> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    pub fn resampling(&self) -> Resampling {
        self.resampling
    }

    pub fn set_resampling(&mut self, resampling: Resampling) {
        self.resampling = resampling;
    }

    /// Resample `raster` to `N x N` and threshold every sample.
    ///
    /// Alpha is ignored: a transparent pixel still counts with its RGB channels.
    pub fn quantize(&self, raster: &RgbaImage) -> Result<Grid> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(LifeError::RasterShape {
                width,
                height,
                len: raster.as_raw().len(),
            });
        }
        let n = self.target_size;
        let sampled = image::imageops::resize(raster, n as u32, n as u32, self.resampling.filter());
        // (r + g + b) / 3 < t  <=>  r + g + b < 3t
        let limit = 3 * self.threshold as u16;
        let cells = sampled
            .pixels()
            .map(|p| {
                let [r, g, b, _] = p.0;
                (r as u16 + g as u16 + b as u16) < limit
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), n * n);
        Ok(Grid::from_cells(n, cells))
    }

    /// Quantize a raw row-major RGBA buffer of `width x height` pixels.
    pub fn quantize_raw(&self, width: u32, height: u32, rgba: Vec<u8>) -> Result<Grid> {
        let len = rgba.len();
        let raster = RgbaImage::from_raw(width, height, rgba)
            .filter(|_| len == width as usize * height as usize * 4)
            .ok_or(LifeError::RasterShape { width, height, len })?;
        self.quantize(&raster)
    }

    /// Decode an encoded image (PNG, JPEG, ...) and quantize it.
    pub fn quantize_bytes(&self, data: &[u8]) -> Result<Grid> {
        let raster = image::load_from_memory(data)?.to_rgba8();
        self.quantize(&raster)
    }

    /// Read and decode an image file, then quantize it.
    pub fn quantize_file(&self, path: &Path) -> Result<Grid> {
        let raster = image::open(path)?.to_rgba8();
        self.quantize(&raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn threshold_is_strict() {
        let q = Quantizer::new(4, 128, Resampling::Nearest).unwrap();
        let below = q.quantize(&uniform(8, 8, [127, 127, 127, 255])).unwrap();
        assert_eq!(below.population(), 16);
        let at = q.quantize(&uniform(8, 8, [128, 128, 128, 255])).unwrap();
        assert_eq!(at.population(), 0);
        // (100 + 200 + 84) / 3 = 128
        let mixed = q.quantize(&uniform(8, 8, [100, 200, 84, 255])).unwrap();
        assert_eq!(mixed.population(), 0);
    }

    #[test]
    fn alpha_is_ignored() {
        let q = Quantizer::new(3, 128, Resampling::Nearest).unwrap();
        let grid = q.quantize(&uniform(5, 5, [0, 0, 0, 0])).unwrap();
        assert_eq!(grid.population(), 9);
    }

    #[test]
    fn nearest_keeps_quadrants() {
        // left half black, right half white
        let raster = RgbaImage::from_fn(40, 20, |x, _| {
            if x < 20 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let q = Quantizer::new(4, 128, Resampling::Nearest).unwrap();
        let grid = q.quantize(&raster).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(grid.get(row, col).unwrap(), col < 2, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn upsamples_small_rasters() {
        let q = Quantizer::new(10, 128, Resampling::Smooth).unwrap();
        let grid = q.quantize(&uniform(1, 1, [10, 10, 10, 255])).unwrap();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.population(), 100);
    }

    #[test]
    fn raw_buffer_shape_is_checked() {
        let q = Quantizer::new(2, 128, Resampling::Nearest).unwrap();
        assert!(matches!(
            q.quantize_raw(2, 2, vec![0; 15]),
            Err(LifeError::RasterShape { len: 15, .. })
        ));
        assert!(matches!(
            q.quantize_raw(0, 0, vec![]),
            Err(LifeError::RasterShape { .. })
        ));
        assert_eq!(q.quantize_raw(2, 2, vec![0; 16]).unwrap().population(), 4);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let q = Quantizer::new(2, 128, Resampling::Nearest).unwrap();
        assert!(matches!(
            q.quantize_bytes(b"definitely not an image"),
            Err(LifeError::ImageDecode(_))
        ));
    }

    #[test]
    fn rejects_zero_threshold() {
        assert!(Quantizer::new(2, 0, Resampling::Nearest).is_err());
        assert!(Quantizer::new(0, 128, Resampling::Nearest).is_err());
        assert!(matches!(
            Quantizer::new(u32::MAX as usize + 1, 128, Resampling::Nearest),
            Err(LifeError::Config(crate::ConfigError::GridTooLarge(_)))
        ));
    }
}
