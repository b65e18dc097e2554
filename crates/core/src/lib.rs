#![forbid(unsafe_code)]

pub mod covariance;
pub mod error;
pub mod vec3;

pub use covariance::{centroid, covariance, Mat3};
pub use error::EstimateError;
pub use vec3::Point3;
