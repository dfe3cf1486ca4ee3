use crate::clustering::utils::compute_mean;
use crate::core::float::CohortFloat;
use crate::distances::DistanceMetric;
use crate::error::{CohortError, Result};
use log::debug;
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How initial centroids are chosen before the Lloyd iterations start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationMethod {
    Random,
    KMeansPlusPlus,
}

/// Result of one clustering run. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "F: CohortFloat", deserialize = "F: CohortFloat"))]
pub struct ClusterModel<F: CohortFloat> {
    centroids: Array2<F>,
    labels: Vec<usize>,
    inertia: F,
    iterations: usize,
}

impl<F: CohortFloat> ClusterModel<F> {
    pub fn new(centroids: Array2<F>, labels: Vec<usize>, inertia: F, iterations: usize) -> Self {
        Self {
            centroids,
            labels,
            inertia,
            iterations,
        }
    }

    /// `k x D` centroid matrix.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Cluster index per input row, each in `0..k`.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Within-cluster sum of squared distances.
    pub fn inertia(&self) -> F {
        self.inertia
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }
}

/// Lloyd's algorithm with a pluggable distance metric and two initialization
/// strategies.
///
/// The engine holds only configuration: no per-call mutable state, so one
/// instance may serve concurrent `fit` calls with independent data and seeds.
/// Identical `(data, k, seed)` inputs yield bit-identical models; the seeded
/// RNG is consulted during initialization only, never during the
/// assign/update iterations.
pub struct KMeans<F: CohortFloat> {
    distance_metric: Arc<dyn DistanceMetric<F>>,
    initialization_method: InitializationMethod,
    max_iterations: usize,
    tolerance: f64,
}

impl<F: CohortFloat> KMeans<F> {
    pub fn new(
        distance_metric: Arc<dyn DistanceMetric<F>>,
        initialization_method: InitializationMethod,
    ) -> Self {
        Self {
            distance_metric,
            initialization_method,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn distance_metric(&self) -> &Arc<dyn DistanceMetric<F>> {
        &self.distance_metric
    }

    /// Groups the rows of `data` into `k` clusters.
    ///
    /// Initialization followed by Lloyd iterations until the inertia change
    /// falls within the tolerance or `max_iterations` is reached; running out
    /// of iterations is not an error, the best model found is returned.
    pub fn fit(&self, data: ArrayView2<F>, k: usize, seed: u64) -> Result<ClusterModel<F>> {
        let n = data.nrows();
        if n == 0 {
            return Err(CohortError::EmptyInput("clustering data has no rows"));
        }
        if k == 0 || k > n {
            return Err(CohortError::InvalidArgument(format!(
                "k must be in 1..={} (number of samples), got {}",
                n, k
            )));
        }
        if self.max_iterations == 0 {
            return Err(CohortError::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let initial = match self.initialization_method {
            InitializationMethod::Random => self.init_random(&data, k, &mut rng),
            InitializationMethod::KMeansPlusPlus => {
                self.init_kmeans_plus_plus(&data, k, &mut rng)
            }
        };
        Ok(self.lloyd(&data, initial))
    }

    /// Samples `k` distinct rows uniformly as initial centroids.
    fn init_random(&self, data: &ArrayView2<F>, k: usize, rng: &mut SmallRng) -> Array2<F> {
        let chosen: Vec<usize> = (0..data.nrows()).choose_multiple(rng, k);
        let mut centroids = Array2::zeros((k, data.ncols()));
        for (c, &row) in chosen.iter().enumerate() {
            centroids.row_mut(c).assign(&data.row(row));
        }
        centroids
    }

    /// k-means++ seeding: the first centroid is uniform, each further one is
    /// drawn by cumulative-sum roulette weighted by the squared distance to
    /// the nearest centroid chosen so far.
    fn init_kmeans_plus_plus(
        &self,
        data: &ArrayView2<F>,
        k: usize,
        rng: &mut SmallRng,
    ) -> Array2<F> {
        let n = data.nrows();
        let mut centroids = Array2::zeros((k, data.ncols()));
        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        for c in 1..k {
            let mut weights = Vec::with_capacity(n);
            for i in 0..n {
                let point = data.row(i);
                let mut nearest = F::infinity();
                for j in 0..c {
                    let d = self.distance_metric.compute(&point, &centroids.row(j));
                    if d < nearest {
                        nearest = d;
                    }
                }
                let d = nearest.to_f64().unwrap();
                weights.push(d * d);
            }

            let sum: f64 = weights.iter().sum();
            let target = rng.random::<f64>() * sum;
            let mut acc = 0.0;
            let mut chosen = 0;
            for (i, weight) in weights.iter().enumerate() {
                acc += weight;
                if acc >= target {
                    chosen = i;
                    break;
                }
            }
            centroids.row_mut(c).assign(&data.row(chosen));
        }
        centroids
    }

    /// Shared Lloyd loop: assignment, convergence test, centroid update with
    /// empty-cluster recovery. Both initializers funnel into this routine.
    fn lloyd(&self, data: &ArrayView2<F>, mut centroids: Array2<F>) -> ClusterModel<F> {
        let n = data.nrows();
        let k = centroids.nrows();
        let tolerance = F::from_f64(self.tolerance).unwrap();
        let mut labels = vec![0usize; n];
        let mut previous_inertia = F::infinity();

        for iteration in 0..self.max_iterations {
            let mut inertia = F::zero();
            for i in 0..n {
                let point = data.row(i);
                let (best, best_distance) = self.nearest(&point, &centroids);
                labels[i] = best;
                inertia = inertia + best_distance * best_distance;
            }

            // The check needs a finite previous value, so the first pass only
            // records the baseline.
            if previous_inertia.is_finite()
                && (previous_inertia - inertia).abs() <= tolerance * previous_inertia.max(F::one())
            {
                debug!(
                    "k-means converged after {} iterations, inertia {:?}",
                    iteration + 1,
                    inertia
                );
                return ClusterModel::new(centroids, labels, inertia, iteration + 1);
            }
            previous_inertia = inertia;

            let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
            for (i, &label) in labels.iter().enumerate() {
                members[label].push(i);
            }

            let mut updated = centroids.clone();
            for (c, points) in members.iter().enumerate() {
                if !points.is_empty() {
                    updated.row_mut(c).assign(&compute_mean(data, points));
                }
            }
            // Empty clusters are reseeded in ascending index order; each
            // reseed joins the centroid set before the next farthest-point
            // search, so no point is taken twice in one recovery pass.
            for c in 0..k {
                if members[c].is_empty() {
                    let far = self.farthest_from_nearest_centroid(data, &updated);
                    debug!("reseeding empty cluster {} to point {}", c, far);
                    updated.row_mut(c).assign(&data.row(far));
                }
            }
            centroids = updated;
        }

        ClusterModel::new(centroids, labels, previous_inertia, self.max_iterations)
    }

    fn nearest(&self, point: &ArrayView1<F>, centroids: &Array2<F>) -> (usize, F) {
        let mut best = 0;
        let mut best_distance = F::infinity();
        for (j, centroid) in centroids.rows().into_iter().enumerate() {
            let d = self.distance_metric.compute(point, &centroid);
            if d < best_distance {
                best_distance = d;
                best = j;
            }
        }
        (best, best_distance)
    }

    fn farthest_from_nearest_centroid(&self, data: &ArrayView2<F>, centroids: &Array2<F>) -> usize {
        let mut farthest = 0;
        let mut farthest_distance = F::neg_infinity();
        for i in 0..data.nrows() {
            let point = data.row(i);
            let (_, d) = self.nearest(&point, centroids);
            if d > farthest_distance {
                farthest_distance = d;
                farthest = i;
            }
        }
        farthest
    }
}
