use crate::clustering::{InitializationMethod, KMeans};
use crate::core::float::CohortFloat;
use crate::distances::{CosineDistance, DistanceMetric, EuclideanDistance};
use crate::error::{CohortError, Result};
use log::{error, LevelFilter};
use serde::Deserialize;
use std::{fmt, sync::Arc};

/// Clustering section of the analytics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusteringSection {
    /// E.g., "euclidean" or "cosine".
    #[serde(default = "default_distance")]
    pub distance_metric: String,
    /// E.g., "random" or "kmeans++".
    #[serde(default = "default_init")]
    pub initialization_method: String,
    /// Fixed cluster count; when absent the elbow selector picks one.
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default = "default_k_min")]
    pub k_min: usize,
    #[serde(default = "default_k_max")]
    pub k_max: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level, e.g., "info", "debug", "warn", "error".
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub clustering: ClusteringSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

fn default_distance() -> String {
    "cosine".to_string()
}

fn default_init() -> String {
    "kmeans++".to_string()
}

fn default_k_min() -> usize {
    2
}

fn default_k_max() -> usize {
    8
}

fn default_max_iterations() -> usize {
    300
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_seed() -> u64 {
    42
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for ClusteringSection {
    fn default() -> Self {
        Self {
            distance_metric: default_distance(),
            initialization_method: default_init(),
            k: None,
            k_min: default_k_min(),
            k_max: default_k_max(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            seed: default_seed(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            clustering: ClusteringSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl fmt::Display for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Clustering:")?;
        writeln!(f, "    Distance Metric: {}", self.clustering.distance_metric)?;
        writeln!(
            f,
            "    Initialization Method: {}",
            self.clustering.initialization_method
        )?;
        match self.clustering.k {
            Some(k) => writeln!(f, "    K: {}", k)?,
            None => writeln!(
                f,
                "    K: elbow over [{}, {}]",
                self.clustering.k_min, self.clustering.k_max
            )?,
        }
        writeln!(f, "    Max Iterations: {}", self.clustering.max_iterations)?;
        writeln!(f, "    Tolerance: {}", self.clustering.tolerance)?;
        writeln!(f, "    Seed: {}", self.clustering.seed)?;
        writeln!(f, "  Logging:")?;
        writeln!(f, "    Level: {}", self.logging.level)
    }
}

impl AnalyticsConfig {
    /// Reads the YAML configuration file and returns a validated
    /// `AnalyticsConfig` instance.
    pub fn from_file(file_path: &str) -> Result<Self> {
        let file_content = std::fs::read_to_string(file_path)?;
        let config: Self = serde_yaml::from_str(&file_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        parse_distance_name(&self.clustering.distance_metric)?;
        parse_init_method(&self.clustering.initialization_method)?;

        if self.clustering.k == Some(0) {
            return Err(CohortError::Config("k must be greater than 0".to_string()));
        }
        if self.clustering.k_min < 1 || self.clustering.k_min >= self.clustering.k_max {
            return Err(CohortError::Config(format!(
                "k range must satisfy 1 <= k_min < k_max, got [{}, {}]",
                self.clustering.k_min, self.clustering.k_max
            )));
        }
        if self.clustering.max_iterations == 0 {
            return Err(CohortError::Config(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if self.clustering.tolerance <= 0.0 {
            return Err(CohortError::Config(
                "tolerance must be greater than 0".to_string(),
            ));
        }
        parse_level(&self.logging.level)?;
        Ok(())
    }

    /// Resolves the configured strategy names once into a concrete engine.
    pub fn resolve<F: CohortFloat>(&self) -> Result<KMeans<F>> {
        let distance_metric = build_distance::<F>(&self.clustering.distance_metric)?;
        let initialization_method = parse_init_method(&self.clustering.initialization_method)?;
        Ok(
            KMeans::new(distance_metric, initialization_method)
                .with_max_iterations(self.clustering.max_iterations)
                .with_tolerance(self.clustering.tolerance),
        )
    }

    /// Sets up logging based on the logging level in the configuration.
    pub fn setup_logging(&self) {
        let level_filter = parse_level(&self.logging.level).unwrap_or(LevelFilter::Info);
        if let Err(e) = env_logger::Builder::new()
            .filter_level(level_filter)
            .try_init()
        {
            error!("Failed to initialize logger: {}", e);
        }
    }
}

/// Builds the distance metric named in the configuration.
pub fn build_distance<F: CohortFloat>(name: &str) -> Result<Arc<dyn DistanceMetric<F>>> {
    match name.to_lowercase().as_str() {
        "euclidean" | "l2" => Ok(Arc::new(EuclideanDistance)),
        "cosine" | "cos" => Ok(Arc::new(CosineDistance)),
        other => Err(CohortError::Config(format!(
            "unsupported distance metric: {}",
            other
        ))),
    }
}

/// Parses the initialization-method name used in the configuration.
pub fn parse_init_method(name: &str) -> Result<InitializationMethod> {
    match name.to_lowercase().as_str() {
        "random" | "kmeans" | "k-means" => Ok(InitializationMethod::Random),
        "kmeans++" | "k-means++" | "kmeansplusplus" | "kpp" => {
            Ok(InitializationMethod::KMeansPlusPlus)
        }
        other => Err(CohortError::Config(format!(
            "unsupported initialization method: {}",
            other
        ))),
    }
}

fn parse_distance_name(name: &str) -> Result<()> {
    build_distance::<f64>(name).map(|_| ())
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(CohortError::Config(format!(
            "unsupported log level: {}",
            other
        ))),
    }
}
