pub mod config;
pub mod summary;

pub use config::AnalyticsConfig;

use crate::clustering::KMeans;
use crate::core::float::CohortFloat;
use crate::encoding::FeatureEncoder;
use crate::error::{CohortError, Result};
use crate::selection::ElbowMethod;
use crate::survey::{Survey, SurveyResponse};
use crate::validation::Silhouette;
use log::info;
use ndarray::ArrayView2;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one survey analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport<F: CohortFloat> {
    pub k: usize,
    pub inertia: F,
    pub iterations: usize,
    pub average_silhouette: F,
    /// Silhouette score per response, in input order.
    pub silhouette_per_point: Vec<F>,
    /// Respondents per cluster label.
    pub cluster_counts: BTreeMap<usize, usize>,
    /// Cluster label per response, in input order.
    pub labels: Vec<usize>,
    /// Ordered names of the encoded feature columns.
    pub feature_names: Vec<String>,
}

/// Composes encoder, clustering engine and silhouette validator into one
/// report. Thin by design: all algorithmic work lives in the components.
pub struct SurveyAnalyzer {
    config: AnalyticsConfig,
}

impl SurveyAnalyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Runs the full pipeline for one survey cohort.
    ///
    /// Requires a survey with at least one question and at least two
    /// responses. Either the whole report is produced or an error is
    /// returned; no partial results.
    pub fn analyze<F: CohortFloat>(
        &self,
        survey: &Survey,
        responses: &[SurveyResponse],
    ) -> Result<AnalyticsReport<F>> {
        if survey.questions().is_empty() {
            return Err(CohortError::EmptyInput("survey has no questions"));
        }
        if responses.len() < 2 {
            return Err(CohortError::InvalidArgument(format!(
                "at least two responses are required for analysis, got {}",
                responses.len()
            )));
        }

        let mut encoder = FeatureEncoder::<F>::new();
        let matrix = encoder.fit_transform(survey, responses)?;
        let algorithm: KMeans<F> = self.config.resolve()?;
        let seed = self.config.clustering.seed;

        let k = self.choose_k(matrix.view(), &algorithm, responses.len(), seed)?;
        info!(
            "analyzing survey '{}': {} responses, {} features, k={}",
            survey.id(),
            responses.len(),
            encoder.num_features(),
            k
        );

        let model = algorithm.fit(matrix.view(), k, seed)?;
        let scores = Silhouette::score_per_point(
            matrix.view(),
            &model,
            algorithm.distance_metric().as_ref(),
        )?;
        let average_silhouette = Silhouette::average(&scores);

        let mut cluster_counts = BTreeMap::new();
        for &label in model.labels() {
            *cluster_counts.entry(label).or_insert(0usize) += 1;
        }

        Ok(AnalyticsReport {
            k,
            inertia: model.inertia(),
            iterations: model.iterations(),
            average_silhouette,
            silhouette_per_point: scores,
            cluster_counts,
            labels: model.labels().to_vec(),
            feature_names: encoder.feature_names().to_vec(),
        })
    }

    // An explicit k is clamped to [1, n]; otherwise the elbow heuristic picks
    // one over the configured range, clamped to the sample count.
    fn choose_k<F: CohortFloat>(
        &self,
        data: ArrayView2<F>,
        algorithm: &KMeans<F>,
        samples: usize,
        seed: u64,
    ) -> Result<usize> {
        if let Some(k) = self.config.clustering.k {
            return Ok(k.clamp(1, samples));
        }
        let k_min = self.config.clustering.k_min;
        let k_max = self.config.clustering.k_max.min(samples);
        if k_min >= k_max {
            // Too few responses for the configured range.
            return Ok(samples.min(2));
        }
        ElbowMethod::suggest_k(data, k_min, k_max, algorithm, seed)
    }
}
