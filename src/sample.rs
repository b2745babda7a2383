use crate::{Error, Result};
use image::GrayImage;
use ndarray::{Array2, ArrayD, ArrayView1, ArrayView2, Axis, Ix2};
use std::path::Path;

/// A grayscale intensity grid of `height` rows by `width` columns.
///
/// Every value is finite and non-negative. A `Sample` is never modified once built; reloading
/// an image produces a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    values: Array2<f64>,
}

impl Sample {
    /// Wraps a 2D grid, rejecting empty grids and negative or non-finite values.
    pub fn new(values: Array2<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidInput(format!(
                "grid of shape {:?} has no pixels",
                values.shape()
            )));
        }
        if let Some(((row, col), v)) = values
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "pixel ({}, {}) holds {}, expected a finite non-negative intensity",
                row, col, v
            )));
        }
        Ok(Sample { values })
    }

    /// Accepts an array of any dimensionality, failing unless it is 2D.
    pub fn from_dyn(values: ArrayD<f64>) -> Result<Self> {
        let ndim = values.ndim();
        let values = values.into_dimensionality::<Ix2>().map_err(|_| {
            Error::InvalidInput(format!("expected a 2D grid, got {} dimensions", ndim))
        })?;
        Sample::new(values)
    }

    /// Builds a sample from nested rows, which must all have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        if let Some(i) = rows.iter().position(|r| r.len() != width) {
            return Err(Error::InvalidInput(format!(
                "row {} has {} columns, expected {}",
                i,
                rows[i].len(),
                width
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let values = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        Sample::new(values)
    }

    pub fn from_gray_image(image: &GrayImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        let values = Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
            image.get_pixel(x as u32, y as u32)[0] as f64
        });
        Sample::new(values)
    }

    /// Decodes an image file (BMP, PNG, JPG...) and converts it to 8 bit luma.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::info!("Loading {}...", path.as_ref().display());
        let image = image::open(&path)?.to_luma8();
        let sample = Sample::from_gray_image(&image)?;
        log::info!(
            "... loaded {}x{} pixels",
            sample.height(),
            sample.width()
        );
        Ok(sample)
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> ArrayView2<f64> {
        self.values.view()
    }

    pub fn row(&self, pos: usize) -> Option<ArrayView1<f64>> {
        if pos < self.height() {
            Some(self.values.index_axis(Axis(0), pos))
        } else {
            None
        }
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }
}
