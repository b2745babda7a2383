//! Intensity profiles of Airy disc images, and the Airy pattern expected for a given setup.
//!
//! A [`SliceExtractor`] holds the grayscale [`Sample`] and answers row, band and peak queries.
//! [`AiryParameters`] describe the hole, distance, wavelength and sensor pixel size, and evaluate
//! the normalized Airy intensity on a [`SpatialAxis`]. [`Profile`] puts both side by side.

pub mod airy;
pub mod axis;
mod error;
pub mod fft2;
pub mod fraunhofer;
pub mod profile;
pub mod sample;
pub mod slice;

pub use airy::{intensity, AiryParameters};
pub use axis::SpatialAxis;
pub use error::{Error, Result};
pub use profile::{Profile, ProfileOptions};
pub use sample::Sample;
pub use slice::{Peak, SliceExtractor, SliceSelection};
