use crate::core::float::CohortFloat;
use ndarray::ArrayView1;
use ndarray_stats::DeviationExt;

/// Trait defining the interface for distance metrics
pub trait DistanceMetric<F: CohortFloat>: Send + Sync {
    /// Computes the distance between two points. Panics if the points have different dimensions.
    fn compute(&self, point1: &ArrayView1<F>, point2: &ArrayView1<F>) -> F;
}

/// [Euclidean Distance](https://en.wikipedia.org/wiki/Euclidean_distance)
#[derive(Debug, Clone, Copy)]
pub struct EuclideanDistance;

impl<F: CohortFloat> DistanceMetric<F> for EuclideanDistance {
    #[inline]
    fn compute(&self, point1: &ArrayView1<F>, point2: &ArrayView1<F>) -> F {
        F::from_f64(point1.l2_dist(point2).unwrap()).unwrap()
    }
}

/// [Cosine Distance](https://en.wikipedia.org/wiki/Cosine_similarity), `1 - cosine similarity`.
///
/// Suited to bag-of-words slices where the orientation of a profile matters
/// more than its magnitude. Returns `1.0` when either vector is all-zero,
/// since a zero vector carries no orientation to compare.
#[derive(Debug, Clone, Copy)]
pub struct CosineDistance;

impl<F: CohortFloat> DistanceMetric<F> for CosineDistance {
    fn compute(&self, point1: &ArrayView1<F>, point2: &ArrayView1<F>) -> F {
        assert_eq!(point1.len(), point2.len(), "points must have the same dimension");
        let mut dot = F::zero();
        let mut norm1 = F::zero();
        let mut norm2 = F::zero();
        for (a, b) in point1.iter().zip(point2.iter()) {
            dot = dot + *a * *b;
            norm1 = norm1 + *a * *a;
            norm2 = norm2 + *b * *b;
        }
        if norm1 == F::zero() || norm2 == F::zero() {
            return F::one();
        }
        let similarity = dot / (norm1.sqrt() * norm2.sqrt());
        // Clamp against floating-point drift before inverting.
        F::one() - similarity.max(-F::one()).min(F::one())
    }
}
