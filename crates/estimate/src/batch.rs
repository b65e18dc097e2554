use log::debug;
use pcanormals_core::{EstimateError, Point3};
use rayon::prelude::*;

use crate::estimate::{estimate_normal, NormalEstimate};
use crate::orient::orient_toward_viewpoint;

/// Estimate one normal per neighborhood, in parallel.
///
/// `neighborhoods[i]` holds indices into `points`, as produced by an
/// external spatial index (k-nearest-neighbor or radius search). Each
/// estimate is independent of the others, so the work is spread across
/// threads with rayon; results keep the input order.
///
/// # Panics
///
/// Panics if a neighbor index is out of bounds for `points`.
pub fn estimate_normals(
    points: &[Point3],
    neighborhoods: &[Vec<usize>],
) -> Vec<Result<NormalEstimate, EstimateError>> {
    let results: Vec<_> = neighborhoods
        .par_iter()
        .map(|indices| {
            let gathered: Vec<Point3> = indices.iter().map(|&i| points[i]).collect();
            estimate_normal(&gathered)
        })
        .collect();

    debug!("estimated normals for {} neighborhoods", results.len());

    results
}

/// Same as [`estimate_normals`], with each successful normal flipped to
/// face `viewpoint` (the sensor position) from its neighborhood centroid.
pub fn estimate_normals_oriented(
    points: &[Point3],
    neighborhoods: &[Vec<usize>],
    viewpoint: &Point3,
) -> Vec<Result<NormalEstimate, EstimateError>> {
    let mut results = estimate_normals(points, neighborhoods);
    for result in &mut results {
        if let Ok(est) = result {
            est.normal = orient_toward_viewpoint(&est.normal, &est.centroid, viewpoint);
        }
    }
    results
}
