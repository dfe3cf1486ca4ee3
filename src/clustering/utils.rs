use crate::core::float::CohortFloat;
use ndarray::{Array1, ArrayView2, Axis};

/// Mean of the selected rows; all-zero vector when `indices` is empty.
pub fn compute_mean<F: CohortFloat>(data: &ArrayView2<F>, indices: &[usize]) -> Array1<F> {
    if indices.is_empty() {
        return Array1::<F>::zeros(data.ncols());
    }
    let selected = data.select(Axis(0), indices);
    selected.mean_axis(Axis(0)).unwrap()
}
