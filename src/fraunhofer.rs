//! Numerical far field of a circular hole.
//!
//! The aperture is sampled on a square grid and propagated with an FFT, which gives an Airy
//! pattern independent of the closed form Bessel evaluation in [`crate::airy`].

use crate::axis::SpatialAxis;
use crate::fft2::{fft2, fft2_shift_inplace};
use crate::{AiryParameters, Error, Result};
use ndarray::{Array1, Array2, Zip};
use num_complex::Complex;
use std::io;

/// A complex scalar field sampled at a given pitch (m).
///
/// The square of its norm is the irradiance.
#[derive(Clone, Debug)]
pub struct Field {
    pub values: Array2<Complex<f64>>,
    pub pitch: f64,
}

impl Field {
    pub fn intensity(&self) -> Array2<f64> {
        self.values.mapv(|e| e.norm_sqr())
    }

    /// Area weighted sum of the irradiance, the radiant flux.
    pub fn intensity_integral(&self) -> f64 {
        self.values.iter().fold(0.0, |sum, &v| sum + v.norm_sqr()) * self.pitch * self.pitch
    }
}

// 1.0 above nominal, with a linear transition one pitch wide straddling it
fn soft_greater_than(x: f64, x_nominal: f64, pitch: f64) -> f64 {
    if x < x_nominal - 0.5 * pitch {
        0.0
    } else if x > x_nominal + 0.5 * pitch {
        1.0
    } else {
        (x - (x_nominal - 0.5 * pitch)) / pitch
    }
}

/// Transmission of a hole of `diameter` (m) centred on a `shape` x `shape` grid.
pub fn circular_aperture(shape: usize, diameter: f64, pitch: f64) -> Field {
    let c = (shape / 2) as f64;
    let radius = 0.5 * diameter;

    let mut mask = Array2::zeros([shape, shape]);
    Zip::indexed(&mut mask).par_for_each(|(y, x), e| {
        let y0 = (y as f64 - c) * pitch;
        let x0 = (x as f64 - c) * pitch;
        let r = (x0 * x0 + y0 * y0).sqrt();
        *e = Complex::new(1.0 - soft_greater_than(r, radius, pitch), 0.0);
    });

    Field {
        values: mask,
        pitch,
    }
}

/// Fraunhofer diffraction of `aperture` at `distance` (m), the optical axis at the array centre.
///
/// The output pitch along the columns is `λ z / (W p)`.
pub fn far_field(aperture: Field, distance: f64, wavelength: f64) -> Field {
    let width = aperture.values.ncols().max(1);
    let pitch = wavelength * distance / (width as f64 * aperture.pitch);

    let mut values = fft2(aperture.values);
    fft2_shift_inplace(values.view_mut());

    Field { values, pitch }
}

/// Central row of the far field of the hole described by `params`, normalized to 1 on axis.
///
/// The hole spans `samples_across` grid samples on a `shape` x `shape` grid. Returns the
/// positions (m) and the intensities.
pub fn reference_profile(
    params: &AiryParameters,
    shape: usize,
    samples_across: f64,
) -> Result<(Array1<f64>, Array1<f64>)> {
    if !(samples_across.is_finite() && samples_across >= 1.0) {
        return Err(Error::InvalidParameter {
            name: "samples_across",
            value: samples_across,
        });
    }
    if (shape as f64) < samples_across + 2.0 {
        return Err(Error::InvalidInput(format!(
            "a {0}x{0} grid cannot hold an aperture {1} samples across",
            shape, samples_across
        )));
    }

    let pitch = params.diameter_m() / samples_across;
    let aperture = circular_aperture(shape, params.diameter_m(), pitch);
    let field = far_field(aperture, params.distance_m(), params.wavelength_m());

    let c = shape / 2;
    let row = field.values.row(c).mapv(|e| e.norm_sqr());
    let on_axis = row[c];
    let intensity = row / on_axis;

    let positions = SpatialAxis::centered(shape, field.pitch, c as f64).into_positions();
    log::debug!(
        "far field reference: {} samples at {:e} m pitch",
        shape,
        field.pitch
    );
    Ok((positions, intensity))
}

/// Writes the far field reference next to the closed form Airy intensity on the same positions.
///
/// Columns are `position [m]`, `fft` and `closed form`.
pub fn write_reference_csv<W: io::Write>(
    params: &AiryParameters,
    shape: usize,
    samples_across: f64,
    writer: W,
) -> Result<()> {
    let (positions, reference) = reference_profile(params, shape, samples_across)?;
    let closed_form = params.intensity(positions.view());

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&["position [m]", "fft", "closed form"])?;
    for ((x, r), a) in positions.iter().zip(reference.iter()).zip(closed_form.iter()) {
        wtr.write_record(&[format!("{}", x), format!("{}", r), format!("{}", a)])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        circular_aperture, far_field, reference_profile, soft_greater_than, write_reference_csv,
    };
    use crate::{AiryParameters, Error};

    #[test]
    fn test_soft_greater_than() {
        assert_eq!(soft_greater_than(0.0, 1.0, 1.0), 0.0);
        assert_eq!(soft_greater_than(1.0, 1.0, 1.0), 0.5);
        assert_eq!(soft_greater_than(2.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_aperture_area() {
        let d = 1e-3;
        let aperture = circular_aperture(128, d, d / 64.0);
        let area = aperture.intensity_integral();
        let expected = std::f64::consts::PI * 0.25 * d * d;
        assert!((area - expected).abs() / expected < 0.01, "{} {}", area, expected);
    }

    #[test]
    fn test_far_field_conserves_flux() {
        let aperture = circular_aperture(64, 1e-3, 1e-3 / 16.0);
        let sum_in: f64 = aperture.intensity().sum();
        let field = far_field(aperture, 1.0, 500e-9);
        let sum_out: f64 = field.intensity().sum();
        assert!((sum_in - sum_out).abs() / sum_in < 1e-9);
        assert!((field.pitch - 500e-9 / (64.0 * 1e-3 / 16.0)).abs() < 1e-12);
    }

    #[test]
    fn test_reference_matches_closed_form() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 5.0).unwrap();
        let (positions, reference) = reference_profile(&params, 512, 32.0).unwrap();
        let airy = params.intensity(positions.view());
        let c = 256;

        assert_eq!(positions[c], 0.0);
        assert_eq!(reference[c], 1.0);
        for i in c - 12..=c + 12 {
            assert!(
                (reference[i] - airy[i]).abs() < 0.05,
                "{}: {} != {}",
                i,
                reference[i],
                airy[i]
            );
        }
        // first dark ring near 1.22 * 512 / 32 samples from the axis
        let dark = (c + 17..=c + 23)
            .map(|i| reference[i])
            .fold(f64::INFINITY, f64::min);
        assert!(dark < 0.01, "{}", dark);
    }

    #[test]
    fn test_reference_rejects_bad_sampling() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 5.0).unwrap();
        assert!(matches!(
            reference_profile(&params, 64, 0.0),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            reference_profile(&params, 16, 32.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_write_reference_csv() {
        let params = AiryParameters::new(1.0, 100.0, 500.0, 5.0).unwrap();
        let mut buf = Vec::new();
        write_reference_csv(&params, 128, 16.0, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 129);
        assert_eq!(lines[0], "position [m],fft,closed form");
        assert_eq!(lines[65], "0,1,1");
    }
}
