pub mod distance;

pub use distance::{CosineDistance, DistanceMetric, EuclideanDistance};
