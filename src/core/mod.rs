pub mod float;

pub use float::CohortFloat;
