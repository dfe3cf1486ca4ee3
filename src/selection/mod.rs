use crate::clustering::KMeans;
use crate::core::float::CohortFloat;
use crate::error::{CohortError, Result};
use log::debug;
use ndarray::ArrayView2;

/// Elbow-method selector for the number of clusters.
///
/// Runs the clustering engine once per candidate k and picks the point of
/// maximum curvature on the inertia-vs-k curve, measured as the perpendicular
/// distance to the chord joining the curve's endpoints.
pub struct ElbowMethod;

impl ElbowMethod {
    /// Suggests a k in `k_min..=k_max` (inclusive). Requires
    /// `1 <= k_min < k_max`; every candidate fit uses the same `seed` and the
    /// engine's configured iteration budget. Ties resolve to the smallest k.
    pub fn suggest_k<F: CohortFloat>(
        data: ArrayView2<F>,
        k_min: usize,
        k_max: usize,
        algorithm: &KMeans<F>,
        seed: u64,
    ) -> Result<usize> {
        if k_min < 1 || k_min >= k_max {
            return Err(CohortError::InvalidArgument(format!(
                "k range must satisfy 1 <= k_min < k_max, got [{}, {}]",
                k_min, k_max
            )));
        }

        let mut inertias = Vec::with_capacity(k_max - k_min + 1);
        for k in k_min..=k_max {
            let model = algorithm.fit(data, k, seed)?;
            debug!("elbow candidate k={} inertia={:?}", k, model.inertia());
            inertias.push(model.inertia().to_f64().unwrap());
        }
        Ok(Self::max_curvature_k(k_min, k_max, &inertias))
    }

    // Perpendicular distance from each (k, inertia) point to the chord
    // between the first and last points of the curve.
    fn max_curvature_k(k_min: usize, k_max: usize, inertias: &[f64]) -> usize {
        let x1 = k_min as f64;
        let y1 = inertias[0];
        let x2 = k_max as f64;
        let y2 = inertias[inertias.len() - 1];

        let mut best_distance = -1.0;
        let mut best_k = k_min;
        for (offset, &y0) in inertias.iter().enumerate() {
            let x0 = (k_min + offset) as f64;
            let distance = ((y2 - y1) * x0 - (x2 - x1) * y0 + x2 * y1 - y2 * x1).abs()
                / (y2 - y1).hypot(x2 - x1);
            if distance > best_distance {
                best_distance = distance;
                best_k = k_min + offset;
            }
        }
        best_k
    }
}
