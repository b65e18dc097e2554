#![forbid(unsafe_code)]

pub mod batch;
pub mod estimate;
pub mod orient;

pub use batch::{estimate_normals, estimate_normals_oriented};
pub use estimate::{estimate_normal, NormalEstimate, MIN_NEIGHBORHOOD};
pub use orient::orient_toward_viewpoint;
