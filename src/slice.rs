use crate::{Error, Result, Sample};
use ndarray::{s, Array1, Array2, Axis};
use std::cmp::min;
use std::ops::Range;

/// Location and value of the brightest pixel of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub value: f64,
    pub row: usize,
    pub column: usize,
}

/// A row to extract and the half-width of the band averaged around it.
///
/// A `band` of 0 disables averaging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceSelection {
    pub row: usize,
    pub band: usize,
}

impl SliceSelection {
    pub fn new(row: usize, band: usize) -> Self {
        SliceSelection { row, band }
    }
}

/// Row and band queries over the currently loaded sample.
///
/// All queries are read only, so they can be repeated on every change of the selection.
#[derive(Clone, Debug, Default)]
pub struct SliceExtractor {
    sample: Option<Sample>,
}

impl SliceExtractor {
    pub fn new() -> Self {
        SliceExtractor { sample: None }
    }

    pub fn with_sample(sample: Sample) -> Self {
        SliceExtractor {
            sample: Some(sample),
        }
    }

    /// Validates `grid` and replaces the stored sample with it.
    ///
    /// On failure the previously stored sample, if any, is kept.
    pub fn set_sample(&mut self, grid: Array2<f64>) -> Result<()> {
        self.load(Sample::new(grid)?);
        Ok(())
    }

    /// Replaces the stored sample, returning the previous one.
    pub fn load(&mut self, sample: Sample) -> Option<Sample> {
        log::debug!(
            "new sample of {}x{} pixels",
            sample.height(),
            sample.width()
        );
        self.sample.replace(sample)
    }

    pub fn sample(&self) -> Result<&Sample> {
        self.sample.as_ref().ok_or(Error::NoSample)
    }

    /// Returns the maximum intensity and where it first occurs, scanning rows in order.
    pub fn find_peak(&self) -> Result<Peak> {
        let sample = self.sample()?;
        let width = sample.width();
        let (index, value) = sample
            .values()
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
                if v > best {
                    (i, v)
                } else {
                    (best_i, best)
                }
            });
        let peak = Peak {
            value,
            row: index / width,
            column: index % width,
        };
        log::debug!("peak {:?}", peak);
        Ok(peak)
    }

    /// Returns an owned copy of row `pos`.
    pub fn extract_row(&self, pos: usize) -> Result<Array1<f64>> {
        let sample = self.sample()?;
        sample.row(pos).map(|row| row.to_owned()).ok_or(Error::Index {
            row: pos,
            height: sample.height(),
        })
    }

    /// Column-wise mean of the rows `pos - band ..= pos + band`.
    ///
    /// A `band` of 0 gives an empty array. The window is clipped to the rows of the sample, and
    /// is empty when no row of it lies inside the sample.
    pub fn extract_band_mean(&self, pos: usize, band: usize) -> Result<Array1<f64>> {
        let sample = self.sample()?;
        if band == 0 {
            return Ok(Array1::zeros(0));
        }
        let rows = band_rows(pos, band, sample.height());
        Ok(sample
            .values()
            .slice(s![rows, ..])
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(0)))
    }

    /// Largest band, not above `limit`, whose window around `pos` lies entirely inside the sample.
    pub fn max_band(&self, pos: usize, limit: usize) -> Result<usize> {
        let sample = self.sample()?;
        let height = sample.height();
        if pos >= height {
            return Err(Error::Index { row: pos, height });
        }
        Ok(min(limit, min(pos, height - 1 - pos)))
    }

    /// Runs both the row and the band queries for `selection`.
    pub fn select(&self, selection: SliceSelection) -> Result<(Array1<f64>, Array1<f64>)> {
        let row = self.extract_row(selection.row)?;
        let mean = self.extract_band_mean(selection.row, selection.band)?;
        Ok((row, mean))
    }
}

// rows of the centred window, clipped to [0, height)
fn band_rows(pos: usize, band: usize, height: usize) -> Range<usize> {
    let start = min(pos.saturating_sub(band), height);
    let end = min(pos.saturating_add(band).saturating_add(1), height);
    start..end.max(start)
}
