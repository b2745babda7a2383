use ndarray::parallel::prelude::{IntoParallelIterator, ParallelIterator};
use ndarray::{Array2, ArrayViewMut1, ArrayViewMut2, Axis, Zip};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{FftDirection, FftPlanner};

/// Forward 2D FFT, scaled by `1/sqrt(H*W)` so that it conserves energy.
///
/// The zero frequency is left at (0, 0), use `fft2_shift_inplace` to centre it.
pub fn fft2(mut input: Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let normalisation = 1.0 / (input.len() as f64).sqrt();
    fft_lanes(input.view_mut(), Axis(1), FftDirection::Forward, 1.0);
    fft_lanes(input.view_mut(), Axis(0), FftDirection::Forward, normalisation);
    input
}

// 1D transform of every lane along `axis`
fn fft_lanes(
    mut input: ArrayViewMut2<Complex<f64>>,
    axis: Axis,
    direction: FftDirection,
    scale: f64,
) {
    let len = input.len_of(axis);
    if len == 0 {
        return;
    }
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft(len, direction);

    Zip::from(input.lanes_mut(axis))
        .into_par_iter()
        .for_each_init(
            || {
                (
                    vec![Zero::zero(); len],
                    vec![Zero::zero(); fft.get_inplace_scratch_len()],
                )
            },
            |(buffer, scratch), (mut lane,)| {
                for (b, &e) in buffer.iter_mut().zip(lane.iter()) {
                    *b = e;
                }
                fft.process_with_scratch(buffer, scratch);
                for (e, &b) in lane.iter_mut().zip(buffer.iter()) {
                    *e = b * scale;
                }
            },
        );
}

/// Moves the origin (0, 0) to the "center" of the array (H/2, W/2)
pub fn fft2_shift_inplace<T: Copy + Send + Sync>(mut input: ArrayViewMut2<T>) {
    Zip::from(input.lanes_mut(Axis(1))).par_for_each(|row| fft_shift_inplace(row));
    Zip::from(input.lanes_mut(Axis(0))).par_for_each(|col| fft_shift_inplace(col));
}

/// Moves the origin (0) to the "center" of the array (N/2)
///
/// For even lengths, which have no center value, the origin lands just after the middle.
pub fn fft_shift_inplace<T: Copy>(input: ArrayViewMut1<T>) {
    let half = input.len() / 2;
    rotate(input, half);
}

/// Moves the "center" of the array (N/2) back to the origin (0), inverting `fft_shift_inplace`
#[cfg(test)]
pub fn ifft_shift_inplace<T: Copy>(input: ArrayViewMut1<T>) {
    let len = input.len();
    rotate(input, len - len / 2);
}

// moves element i to (i + by) % len
fn rotate<T: Copy>(mut input: ArrayViewMut1<T>, by: usize) {
    let len = input.len();
    if len == 0 {
        return;
    }
    let values = input.to_vec();
    for (i, v) in values.into_iter().enumerate() {
        input[(i + by) % len] = v;
    }
}
