use crate::axis::SpatialAxis;
use crate::{Error, Result};
use ndarray::{Array1, ArrayView1, Zip};
use scilib::math::bessel;
use std::f64::consts::PI;

/// First zero of J1, which sets the radius of the first dark ring.
pub const J1_FIRST_ZERO: f64 = 3.831_705_970_207_512;

/// Physical setup of the diffraction experiment, in the units used on the optical bench.
///
/// * `diameter` - diameter of the diffracting hole (mm)
/// * `distance` - distance between the hole and the sensor (cm)
/// * `wavelength` - wavelength of the source (nm)
/// * `pixel_pitch` - size of a sensor pixel (µm)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiryParameters {
    diameter: f64,
    distance: f64,
    wavelength: f64,
    pixel_pitch: f64,
}

impl AiryParameters {
    pub fn new(diameter: f64, distance: f64, wavelength: f64, pixel_pitch: f64) -> Result<Self> {
        Ok(AiryParameters {
            diameter: positive("diameter", diameter)?,
            distance: positive("distance", distance)?,
            wavelength: positive("wavelength", wavelength)?,
            pixel_pitch: positive("pixel_pitch", pixel_pitch)?,
        })
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter * 1e-3
    }

    pub fn distance_m(&self) -> f64 {
        self.distance * 1e-2
    }

    pub fn wavelength_m(&self) -> f64 {
        self.wavelength * 1e-9
    }

    pub fn pixel_pitch_m(&self) -> f64 {
        self.pixel_pitch * 1e-6
    }

    /// Spatial frequency scale `D / (z λ)`, in 1/m.
    pub fn frequency_scale(&self) -> f64 {
        frequency_scale(self.diameter, self.distance, self.wavelength)
    }

    /// Radius on the sensor of the first dark ring (m).
    pub fn first_dark_ring(&self) -> f64 {
        J1_FIRST_ZERO / (PI * self.frequency_scale())
    }

    /// Axis of `width` pixels at this pixel pitch, centred on column `center`.
    pub fn spatial_axis(&self, width: usize, center: f64) -> SpatialAxis {
        SpatialAxis::centered(width, self.pixel_pitch_m(), center)
    }

    /// Normalized Airy intensity at each of `positions` (m).
    pub fn intensity(&self, positions: ArrayView1<f64>) -> Array1<f64> {
        evaluate(positions, self.frequency_scale())
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

fn frequency_scale(diameter: f64, distance: f64, wavelength: f64) -> f64 {
    diameter * 1e-3 / (distance * 1e-2 * wavelength * 1e-9)
}

/// Normalized Airy intensity `(2 J1(πkx) / πkx)^2` at each position `x` (m).
///
/// * `diameter` - hole diameter (mm)
/// * `distance` - hole to sensor distance (cm)
/// * `wavelength` - wavelength (nm)
///
/// Output values lie in [0, 1] and equal 1.0 exactly on the optical axis.
/// Beyond `|πkx| = 20` J1 comes from its large argument expansion.
pub fn intensity(
    positions: ArrayView1<f64>,
    diameter: f64,
    distance: f64,
    wavelength: f64,
) -> Array1<f64> {
    evaluate(positions, frequency_scale(diameter, distance, wavelength))
}

fn evaluate(positions: ArrayView1<f64>, k: f64) -> Array1<f64> {
    let mut out = Array1::zeros(positions.len());
    Zip::from(&mut out)
        .and(positions)
        .par_for_each(|o, &x| *o = airy(PI * k * x));
    out
}

/// Above this argument J1 is evaluated with its Hankel expansion.
const ASYMPTOTIC_ARGUMENT: f64 = 20.0;

/// `(2 J1(z) / z)^2`, with the removable singularity at 0 filled in.
pub fn airy(z: f64) -> f64 {
    let z = z.abs();
    if z < f64::EPSILON {
        return 1.0;
    }
    if !z.is_finite() {
        return 0.0;
    }
    let term = 2.0 * j1(z) / z;
    term * term
}

/// Bessel function of the first kind of order 1, for `z > 0`.
pub fn j1(z: f64) -> f64 {
    if z < ASYMPTOTIC_ARGUMENT {
        bessel::j_n(1, z)
    } else {
        j1_asymptotic(z)
    }
}

// J1(z) = sqrt(2/πz) (P cos χ - Q sin χ), χ = z - 3π/4, with a_k = Π(4 - (2j-1)^2) / (k! 8^k)
fn j1_asymptotic(z: f64) -> f64 {
    let mut p = 0.0;
    let mut q = 0.0;
    let mut a = 1.0;
    let mut z_k = 1.0;
    for k in 0..24 {
        let sign = if (k / 2) % 2 == 0 { 1.0 } else { -1.0 };
        if k % 2 == 0 {
            p += sign * a / z_k;
        } else {
            q += sign * a / z_k;
        }
        let odd = (2 * k + 1) as f64;
        a *= (4.0 - odd * odd) / ((k + 1) as f64 * 8.0);
        z_k *= z;
    }
    let chi = z - 0.75 * PI;
    (2.0 / (PI * z)).sqrt() * (p * chi.cos() - q * chi.sin())
}
