//! Distance model for sparse city graphs.
//!
//! Provides a dense symmetric distance store where non-positive entries mean
//! "no direct edge", plus the aggregate statistics used to price such edges.

mod model;

pub use model::{DistanceModel, DEFAULT_PENALTY_FACTOR};
