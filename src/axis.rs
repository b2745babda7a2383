use ndarray::{Array1, ArrayView1};

/// Physical positions (m) of the columns of an image row.
///
/// Column `i` sits at `(i - center) * pitch`, so positions increase with the column index.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialAxis {
    positions: Array1<f64>,
    pitch: f64,
    center: f64,
}

impl SpatialAxis {
    pub fn centered(width: usize, pitch: f64, center: f64) -> Self {
        let positions = Array1::from_shape_fn(width, |i| (i as f64 - center) * pitch);
        SpatialAxis {
            positions,
            pitch,
            center,
        }
    }

    /// Moves the optical axis by `pixels` columns.
    pub fn shifted(&self, pixels: f64) -> Self {
        SpatialAxis::centered(self.len(), self.pitch, self.center + pixels)
    }

    pub fn positions(&self) -> ArrayView1<f64> {
        self.positions.view()
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> Array1<f64> {
        self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::SpatialAxis;

    #[test]
    fn test_centered() {
        let axis = SpatialAxis::centered(5, 2e-6, 2.0);
        assert_eq!(axis.positions().to_vec(), vec![-4e-6, -2e-6, 0.0, 2e-6, 4e-6]);
        assert!(axis.positions().windows(2).into_iter().all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_shifted() {
        let axis = SpatialAxis::centered(4, 1.0, 1.0).shifted(2.0);
        assert_eq!(axis.center(), 3.0);
        assert_eq!(axis.positions().to_vec(), vec![-3.0, -2.0, -1.0, 0.0]);

        let back = axis.shifted(-2.0);
        assert_eq!(back, SpatialAxis::centered(4, 1.0, 1.0));
    }

    #[test]
    fn test_empty() {
        let axis = SpatialAxis::centered(0, 1.0, 0.0);
        assert!(axis.is_empty());
        assert_eq!(axis.len(), 0);
    }
}
