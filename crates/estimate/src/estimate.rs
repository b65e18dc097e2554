use pcanormals_core::{centroid, covariance, vec3, EstimateError, Point3};
use pcanormals_eigen::sym_eigen_3x3;

/// Smallest neighborhood size for which the covariance matrix can reach full
/// rank. Below this the best-fit plane is undefined.
pub const MIN_NEIGHBORHOOD: usize = 3;

/// PCA surface-normal estimate for a single neighborhood.
///
/// The normal is the unit eigenvector of the smallest covariance eigenvalue,
/// i.e. the direction of least variance, perpendicular to the best-fit local
/// plane through the points. Its sign is ambiguous; use
/// [`orient_toward_viewpoint`](crate::orient_toward_viewpoint) to fix it
/// against a sensor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalEstimate {
    /// Unit surface normal, sign ambiguous.
    pub normal: Point3,
    /// Arithmetic mean of the neighborhood; the normal is anchored here.
    pub centroid: Point3,
    /// Covariance eigenvalues in ascending order.
    pub eigenvalues: [f64; 3],
}

impl NormalEstimate {
    /// Variance along the normal: the flatness score. Near zero means the
    /// neighborhood is close to a perfect plane.
    pub fn min_eigenvalue(&self) -> f64 {
        self.eigenvalues[0]
    }

    /// True when the two smallest eigenvalues are both at or below `eps`:
    /// the points are (near) coincident or collinear, the covariance has
    /// rank < 2, and the best-fit plane is undefined.
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.eigenvalues[1] <= eps
    }
}

/// Estimate the surface normal at the centroid of `neighborhood`.
///
/// centroid → biased covariance (divisor n, not n − 1) → closed-form
/// symmetric eigendecomposition → eigenvector of the minimum eigenvalue.
/// Ties between numerically equal minimal eigenvalues resolve to an
/// unspecified one of the tied eigenvectors.
///
/// Neighborhood *search* is the caller's job: pass whatever points an
/// external spatial index selected around the query location. Coordinates
/// are not sanitized; non-finite values propagate NaN into the result
/// rather than being rejected.
///
/// # Errors
///
/// [`EstimateError::InsufficientData`] when fewer than [`MIN_NEIGHBORHOOD`]
/// points are supplied.
pub fn estimate_normal(neighborhood: &[Point3]) -> Result<NormalEstimate, EstimateError> {
    if neighborhood.len() < MIN_NEIGHBORHOOD {
        return Err(EstimateError::InsufficientData {
            got: neighborhood.len(),
            min: MIN_NEIGHBORHOOD,
        });
    }

    let centroid = centroid(neighborhood);
    let cov = covariance(neighborhood, &centroid);
    let eig = sym_eigen_3x3(&cov);

    // The solver returns unit vectors; re-normalize to absorb roundoff.
    let normal = vec3::normalize_or(&eig.eigenvectors[0], [0.0, 0.0, 1.0]);

    Ok(NormalEstimate {
        normal,
        centroid,
        eigenvalues: eig.eigenvalues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    /// Points on the plane through `origin` spanned by `e1` and `e2`.
    fn plane_patch(origin: Point3, e1: Point3, e2: Point3, grid: usize) -> Vec<Point3> {
        let mut pts = Vec::with_capacity(grid * grid);
        for i in 0..grid {
            for j in 0..grid {
                let u = i as f64 * 0.1;
                let v = j as f64 * 0.1;
                pts.push([
                    origin[0] + u * e1[0] + v * e2[0],
                    origin[1] + u * e1[1] + v * e2[1],
                    origin[2] + u * e1[2] + v * e2[2],
                ]);
            }
        }
        pts
    }

    #[test]
    fn xy_plane_normal_is_z_axis() {
        let pts = plane_patch([0.0, 0.0, 5.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 5);
        let est = estimate_normal(&pts).unwrap();
        assert_abs_diff_eq!(est.normal[2].abs(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(est.min_eigenvalue(), 0.0, epsilon = 1e-12);
        assert!(!est.is_degenerate(1e-12));
        assert_abs_diff_eq!(est.centroid[2], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn tilted_plane_normal_matches_plane_equation() {
        // Plane x + 2y + 2z = 6, unit normal (1, 2, 2) / 3. Basis vectors
        // (2, -1, 0) and (2, 4, -5) both satisfy n·e = 0.
        let n_expected = [1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0];
        let pts = plane_patch([0.0, 1.0, 2.0], [2.0, -1.0, 0.0], [2.0, 4.0, -5.0], 6);
        let est = estimate_normal(&pts).unwrap();

        let dot = vec3::dot(&est.normal, &n_expected);
        assert_abs_diff_eq!(dot.abs(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(est.min_eigenvalue(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn normal_is_unit_length() {
        let pts = [
            [0.1, 0.9, 0.3],
            [1.2, -0.4, 0.6],
            [-0.5, 0.2, 1.1],
            [0.8, 0.8, -0.2],
            [0.0, 0.0, 0.0],
        ];
        let est = estimate_normal(&pts).unwrap();
        assert_abs_diff_eq!(vec3::norm(&est.normal), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn centroid_is_mean_of_neighborhood() {
        let pts = [[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]];
        let est = estimate_normal(&pts).unwrap();
        for axis in 0..3 {
            assert_abs_diff_eq!(est.centroid[axis], 0.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_empty_neighborhood() {
        let err = estimate_normal(&[]).unwrap_err();
        assert_eq!(err, EstimateError::InsufficientData { got: 0, min: 3 });
    }

    #[test]
    fn rejects_too_small_neighborhood() {
        let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let err = estimate_normal(&pts).unwrap_err();
        assert_eq!(err, EstimateError::InsufficientData { got: 2, min: 3 });
    }

    #[test]
    fn minimum_size_neighborhood_is_accepted() {
        let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let est = estimate_normal(&pts).unwrap();
        // Three non-collinear points define an exact plane (z = 0 here).
        assert_abs_diff_eq!(est.normal[2].abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn coincident_points_are_degenerate_not_a_crash() {
        let pts = [[2.0, -1.0, 0.5]; 6];
        let est = estimate_normal(&pts).unwrap();
        for lambda in est.eigenvalues {
            assert_abs_diff_eq!(lambda, 0.0, epsilon = 1e-12);
        }
        assert!(est.is_degenerate(1e-12));
        assert_abs_diff_eq!(vec3::norm(&est.normal), 1.0, epsilon = 1e-9);
        assert!(est.normal.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts: Vec<Point3> = (0..10).map(|i| [i as f64, 0.0, 0.0]).collect();
        let est = estimate_normal(&pts).unwrap();
        // Rank 1: two near-zero eigenvalues, one large.
        assert_abs_diff_eq!(est.eigenvalues[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(est.eigenvalues[1], 0.0, epsilon = 1e-9);
        assert!(est.eigenvalues[2] > 1.0);
        assert!(est.is_degenerate(1e-9));
        // The normal is some unit vector perpendicular to the line.
        assert_abs_diff_eq!(vec3::norm(&est.normal), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(est.normal[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn non_finite_input_propagates_into_eigenvalues() {
        let pts = [
            [f64::NAN, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        // Not rejected: documented pass-through of unsanitized input.
        let est = estimate_normal(&pts).unwrap();
        assert!(est.centroid[0].is_nan());
        assert!(est.eigenvalues.iter().any(|v| v.is_nan()));
    }

    #[test]
    fn far_from_origin_patch_keeps_accuracy() {
        // Mean-centering before the outer products keeps the covariance
        // stable under a large common offset.
        let pts = plane_patch(
            [1.0e6, -2.0e6, 3.0e6],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            5,
        );
        let est = estimate_normal(&pts).unwrap();
        assert!(est.normal[2].abs() > 0.999_999);
    }

    proptest! {
        #[test]
        fn random_neighborhoods_yield_unit_normals_and_sorted_eigenvalues(
            pts in prop::collection::vec(
                (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
                3..50
            )
        ) {
            let points: Vec<Point3> = pts.iter().map(|p| [p.0, p.1, p.2]).collect();
            let est = estimate_normal(&points).unwrap();

            prop_assert!((vec3::norm(&est.normal) - 1.0).abs() < 1e-9);
            prop_assert!(est.eigenvalues[0] <= est.eigenvalues[1]);
            prop_assert!(est.eigenvalues[1] <= est.eigenvalues[2]);
            // Covariance of real points is PSD.
            let scale = est.eigenvalues[2].abs().max(1.0);
            prop_assert!(est.eigenvalues[0] >= -1e-9 * scale);
        }

        #[test]
        fn undersized_neighborhoods_always_error(
            pts in prop::collection::vec(
                (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
                0..3
            )
        ) {
            let points: Vec<Point3> = pts.iter().map(|p| [p.0, p.1, p.2]).collect();
            prop_assert!(
                matches!(
                    estimate_normal(&points),
                    Err(EstimateError::InsufficientData { .. })
                ),
                "expected InsufficientData error for undersized neighborhood"
            );
        }
    }
}
