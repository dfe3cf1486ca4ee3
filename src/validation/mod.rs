use crate::clustering::ClusterModel;
use crate::core::float::CohortFloat;
use crate::distances::DistanceMetric;
use crate::error::{CohortError, Result};
use ndarray::ArrayView2;

/// Silhouette-coefficient validator for a fitted cluster model.
///
/// Each point gets a score in `[-1, 1]` contrasting its cohesion (mean
/// distance to its own cluster) against its separation (smallest mean
/// distance to any other populated cluster). Cost is O(N²) pairwise distance
/// evaluations, which bounds the practical batch size; this is meant for
/// per-cohort batch analysis, not streaming use.
pub struct Silhouette;

impl Silhouette {
    /// Per-point silhouette scores, in input row order.
    ///
    /// Singleton clusters score their points with `a(i) = 0`; when no other
    /// populated cluster exists the score is defined as 0.
    pub fn score_per_point<F: CohortFloat>(
        data: ArrayView2<F>,
        model: &ClusterModel<F>,
        distance_metric: &dyn DistanceMetric<F>,
    ) -> Result<Vec<F>> {
        let n = data.nrows();
        let labels = model.labels();
        if labels.len() != n {
            return Err(CohortError::InvalidArgument(format!(
                "model carries {} labels but data has {} rows",
                labels.len(),
                n
            )));
        }

        let k = model.k();
        let mut counts = vec![0usize; k];
        for &label in labels {
            counts[label] += 1;
        }

        let mut scores = Vec::with_capacity(n);
        for i in 0..n {
            let own = labels[i];
            let point = data.row(i);

            // a(i): mean distance to the rest of the own cluster.
            let mut a = F::zero();
            if counts[own] > 1 {
                for j in 0..n {
                    if labels[j] == own && j != i {
                        a = a + distance_metric.compute(&point, &data.row(j));
                    }
                }
                a = a / F::from_usize(counts[own] - 1).unwrap();
            }

            // b(i): smallest mean distance to any other populated cluster.
            let mut b = F::infinity();
            for c in 0..k {
                if c == own || counts[c] == 0 {
                    continue;
                }
                let mut sum = F::zero();
                for j in 0..n {
                    if labels[j] == c {
                        sum = sum + distance_metric.compute(&point, &data.row(j));
                    }
                }
                let mean = sum / F::from_usize(counts[c]).unwrap();
                if mean < b {
                    b = mean;
                }
            }

            let score = if !b.is_finite() {
                // No other populated cluster to compare against.
                F::zero()
            } else if a == F::zero() && b == F::zero() {
                F::zero()
            } else {
                (b - a) / a.max(b)
            };
            scores.push(score);
        }
        Ok(scores)
    }

    /// Arithmetic mean of the per-point scores; 0 for an empty set.
    pub fn average<F: CohortFloat>(scores: &[F]) -> F {
        if scores.is_empty() {
            return F::zero();
        }
        let sum = scores.iter().fold(F::zero(), |acc, &s| acc + s);
        sum / F::from_usize(scores.len()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::Silhouette;
    use crate::clustering::ClusterModel;
    use crate::distances::EuclideanDistance;
    use crate::error::CohortError;
    use ndarray::array;

    #[test]
    fn test_two_separated_pairs() {
        let data: ndarray::Array2<f64> = array![[0.0], [1.0], [10.0], [12.0]];
        let centroids = array![[0.5], [11.0]];
        let model = ClusterModel::new(centroids, vec![0, 0, 1, 1], 2.5, 2);

        let scores =
            Silhouette::score_per_point(data.view(), &model, &EuclideanDistance).unwrap();
        // a(0) = 1, b(0) = mean(10, 12) = 11.
        assert!((scores[0] - (11.0 - 1.0) / 11.0).abs() < 1e-9);
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_single_cluster_scores_zero() {
        let data = array![[0.0], [1.0], [2.0]];
        let centroids = array![[1.0]];
        let model = ClusterModel::new(centroids, vec![0, 0, 0], 2.0, 1);

        let scores =
            Silhouette::score_per_point(data.view(), &model, &EuclideanDistance).unwrap();
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_identical_points_score_zero() {
        // a(i) and b(i) are both 0: defined as 0, not NaN.
        let data = array![[1.0], [1.0], [1.0], [1.0]];
        let centroids = array![[1.0], [1.0]];
        let model = ClusterModel::new(centroids, vec![0, 0, 1, 1], 0.0, 2);

        let scores =
            Silhouette::score_per_point(data.view(), &model, &EuclideanDistance).unwrap();
        assert_eq!(scores, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_singleton_cluster_perfect_score() {
        let data = array![[0.0], [10.0]];
        let centroids = array![[0.0], [10.0]];
        let model = ClusterModel::new(centroids, vec![0, 1], 0.0, 1);

        let scores =
            Silhouette::score_per_point(data.view(), &model, &EuclideanDistance).unwrap();
        // a = 0 (singleton), b = 10: s = (10 - 0) / 10 = 1.
        assert_eq!(scores, vec![1.0, 1.0]);
    }

    #[test]
    fn test_label_count_mismatch_is_rejected() {
        let data = array![[0.0], [1.0], [2.0]];
        let centroids = array![[1.0]];
        let model = ClusterModel::new(centroids, vec![0, 0], 1.0, 1);

        let result = Silhouette::score_per_point(data.view(), &model, &EuclideanDistance);
        assert!(matches!(result, Err(CohortError::InvalidArgument(_))));
    }

    #[test]
    fn test_average() {
        assert_eq!(Silhouette::average(&[0.5, 1.0, 0.0]), 0.5);
        assert_eq!(Silhouette::average::<f64>(&[]), 0.0);
    }
}
