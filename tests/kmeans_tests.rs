#[cfg(test)]
mod tests {
    use cohort::clustering::{InitializationMethod, KMeans};
    use cohort::distances::EuclideanDistance;
    use cohort::selection::ElbowMethod;
    use cohort::validation::Silhouette;
    use ndarray::Array2;
    use std::sync::Arc;

    fn three_blob_data() -> Array2<f64> {
        Array2::from_shape_vec(
            (9, 2),
            vec![
                0.0, 0.0, 0.2, 0.1, 0.1, 0.2, // blob A
                8.0, 8.0, 8.2, 8.1, 8.1, 8.2, // blob B
                0.0, 8.0, 0.2, 8.1, 0.1, 8.2, // blob C
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fit_is_bit_identical_across_runs() {
        let data = three_blob_data();
        for init in [
            InitializationMethod::Random,
            InitializationMethod::KMeansPlusPlus,
        ] {
            let algorithm = KMeans::new(Arc::new(EuclideanDistance), init);
            let first = algorithm.fit(data.view(), 3, 99).unwrap();
            let second = algorithm.fit(data.view(), 3, 99).unwrap();
            assert_eq!(first.labels(), second.labels());
            assert_eq!(first.inertia().to_bits(), second.inertia().to_bits());
            assert_eq!(first.centroids(), second.centroids());
        }
    }

    #[test]
    fn test_different_seeds_still_produce_valid_models() {
        let data = three_blob_data();
        let algorithm = KMeans::new(
            Arc::new(EuclideanDistance),
            InitializationMethod::KMeansPlusPlus,
        );
        for seed in [0, 1, 17, 4242] {
            let model = algorithm.fit(data.view(), 3, seed).unwrap();
            assert_eq!(model.k(), 3);
            assert_eq!(model.labels().len(), data.nrows());
            assert!(model.labels().iter().all(|&l| l < 3));
            assert!(model.inertia() >= 0.0);
        }
    }

    #[test]
    fn test_well_separated_blobs_get_high_silhouette() {
        // Two tight blobs and k=2: Lloyd separates them from any seeding.
        let data = Array2::from_shape_vec(
            (6, 2),
            vec![0.0, 0.0, 0.2, 0.1, 0.1, 0.2, 8.0, 8.0, 8.2, 8.1, 8.1, 8.2],
        )
        .unwrap();
        let algorithm = KMeans::new(
            Arc::new(EuclideanDistance),
            InitializationMethod::KMeansPlusPlus,
        );
        let model = algorithm.fit(data.view(), 2, 5).unwrap();
        let scores =
            Silhouette::score_per_point(data.view(), &model, &EuclideanDistance).unwrap();
        let average = Silhouette::average(&scores);
        assert!(
            average > 0.8,
            "expected tight, well-separated clusters, average silhouette {}",
            average
        );
    }

    #[test]
    fn test_elbow_suggestion_within_requested_range() {
        let data = three_blob_data();
        let algorithm = KMeans::new(
            Arc::new(EuclideanDistance),
            InitializationMethod::KMeansPlusPlus,
        );
        let suggested = ElbowMethod::suggest_k(data.view(), 2, 6, &algorithm, 42).unwrap();
        assert!((2..=6).contains(&suggested));
    }
}
