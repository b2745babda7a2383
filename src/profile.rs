use crate::{AiryParameters, Result, SliceExtractor, SliceSelection};
use ndarray::{Array1, ArrayView1};
use std::io;
use std::path::Path;

/// Presentation options for the simulated curve.
///
/// * `offset` - shift of the simulated optical axis, in pixels
/// * `scale` - multiplier applied to the normalized Airy intensity (e.g. 255 for 8 bit images)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileOptions {
    pub offset: f64,
    pub scale: f64,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        ProfileOptions {
            offset: 0.0,
            scale: 1.0,
        }
    }
}

/// A measured row of the sample next to the Airy pattern expected on the same axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub row: usize,
    pub band: usize,
    pub positions: Array1<f64>,
    pub slice: Array1<f64>,
    /// Empty when `band` is 0.
    pub band_mean: Array1<f64>,
    pub simulated: Array1<f64>,
}

impl Profile {
    /// Extracts the selected row and band, and simulates the Airy pattern with its axis
    /// centred on the brightest pixel of the row.
    pub fn compute(
        extractor: &SliceExtractor,
        selection: SliceSelection,
        params: &AiryParameters,
        options: ProfileOptions,
    ) -> Result<Self> {
        let (slice, band_mean) = extractor.select(selection)?;
        let center = argmax(slice.view()) as f64;
        let axis = params
            .spatial_axis(slice.len(), center)
            .shifted(options.offset);
        let simulated = params.intensity(axis.positions()) * options.scale;
        log::debug!(
            "profile of row {} (band {}) centred on column {}",
            selection.row,
            selection.band,
            axis.center()
        );
        Ok(Profile {
            row: selection.row,
            band: selection.band,
            positions: axis.into_positions(),
            slice,
            band_mean,
            simulated,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&["position [m]", "slice", "band mean", "simulated"])?;
        for i in 0..self.len() {
            let mean = self
                .band_mean
                .get(i)
                .map(|v| format!("{}", v))
                .unwrap_or_default();
            wtr.write_record(&[
                format!("{}", self.positions[i]),
                format!("{}", self.slice[i]),
                mean,
                format!("{}", self.simulated[i]),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

// first maximum, 0 for an empty row
fn argmax(values: ArrayView1<f64>) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best {
                (i, v)
            } else {
                (best_i, best)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::{argmax, Profile, ProfileOptions};
    use crate::{AiryParameters, Sample, SliceExtractor, SliceSelection};
    use ndarray::{arr1, Array2};

    fn extractor() -> SliceExtractor {
        let grid = Array2::from_shape_fn((5, 7), |(y, x)| {
            if y == 2 {
                [10.0, 20.0, 50.0, 200.0, 50.0, 20.0, 10.0][x]
            } else {
                0.0
            }
        });
        SliceExtractor::with_sample(Sample::new(grid).unwrap())
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(arr1(&[1.0, 3.0, 3.0, 2.0]).view()), 1);
        assert_eq!(argmax(arr1(&[]).view()), 0);
    }

    #[test]
    fn test_compute_centres_on_row_peak() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 100.0).unwrap();
        let options = ProfileOptions {
            offset: 0.0,
            scale: 255.0,
        };
        let profile =
            Profile::compute(&extractor(), SliceSelection::new(2, 1), &params, options).unwrap();

        assert_eq!(profile.len(), 7);
        assert_eq!(profile.positions[3], 0.0);
        assert!((profile.positions[4] - 1e-4).abs() < 1e-15);
        assert_eq!(profile.simulated[3], 255.0);
        assert_eq!(profile.simulated[2], profile.simulated[4]);
        assert_eq!(profile.slice[3], 200.0);
        assert!((profile.band_mean[3] - 200.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_with_offset() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 100.0).unwrap();
        let options = ProfileOptions {
            offset: 2.0,
            scale: 1.0,
        };
        let profile =
            Profile::compute(&extractor(), SliceSelection::new(2, 0), &params, options).unwrap();
        assert_eq!(profile.positions[5], 0.0);
        assert_eq!(profile.simulated[5], 1.0);
        assert!(profile.band_mean.is_empty());
    }

    #[test]
    fn test_compute_propagates_errors() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 5.0).unwrap();
        let options = ProfileOptions::default();
        assert!(Profile::compute(&extractor(), SliceSelection::new(9, 0), &params, options).is_err());
        assert!(
            Profile::compute(&SliceExtractor::new(), SliceSelection::new(0, 0), &params, options)
                .is_err()
        );
    }

    #[test]
    fn test_write_csv() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 100.0).unwrap();
        let profile = Profile::compute(
            &extractor(),
            SliceSelection::new(2, 0),
            &params,
            ProfileOptions::default(),
        )
        .unwrap();

        let mut buf = Vec::new();
        profile.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "position [m],slice,band mean,simulated");
        assert_eq!(lines[4], "0,200,,1");
    }
}
