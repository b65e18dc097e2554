#![forbid(unsafe_code)]

pub use pcanormals_core::{centroid, covariance, vec3, EstimateError, Mat3, Point3};
pub use pcanormals_eigen::{sym_eigen_3x3, SymEigen3};
pub use pcanormals_estimate::{
    estimate_normal, estimate_normals, estimate_normals_oriented, orient_toward_viewpoint,
    NormalEstimate, MIN_NEIGHBORHOOD,
};
