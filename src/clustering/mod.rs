pub mod kmeans;
pub mod utils;

pub use kmeans::{ClusterModel, InitializationMethod, KMeans};
