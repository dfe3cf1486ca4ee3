use num_traits::{FromPrimitive, Signed};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::AddAssign;

// A float trait that captures the requirements we need for the various places
// we need floats. These requirements are imposed by ndarray and ndarray-stats.
pub trait CohortFloat:
    num_traits::Float
    + Debug
    + Default
    + AddAssign
    + Serialize
    + for<'de> Deserialize<'de>
    + Signed
    + Copy
    + Sync
    + Send
    + FromPrimitive
{
}

impl CohortFloat for f32 {}
impl CohortFloat for f64 {}
