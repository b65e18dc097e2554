use crate::vec3::Point3;

/// A 3×3 matrix in row-major layout.
pub type Mat3 = [[f64; 3]; 3];

/// Componentwise arithmetic mean of `points`.
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn centroid(points: &[Point3]) -> Point3 {
    assert!(!points.is_empty(), "centroid of empty point set");

    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut cz = 0.0;
    for p in points {
        cx += p[0];
        cy += p[1];
        cz += p[2];
    }

    let n = points.len() as f64;
    [cx / n, cy / n, cz / n]
}

/// Biased (population) covariance of `points` around `centroid`.
///
/// The divisor is the number of points, not n − 1. Eigenvalue magnitudes
/// downstream depend on this; regression data was captured against the
/// n-divisor and must keep matching it.
///
/// The returned matrix is symmetric positive semi-definite (up to rounding).
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn covariance(points: &[Point3], centroid: &Point3) -> Mat3 {
    assert!(!points.is_empty(), "covariance of empty point set");

    // Accumulate the six unique entries of the symmetric matrix.
    let mut c00 = 0.0;
    let mut c01 = 0.0;
    let mut c02 = 0.0;
    let mut c11 = 0.0;
    let mut c12 = 0.0;
    let mut c22 = 0.0;
    for p in points {
        let dx = p[0] - centroid[0];
        let dy = p[1] - centroid[1];
        let dz = p[2] - centroid[2];
        c00 += dx * dx;
        c01 += dx * dy;
        c02 += dx * dz;
        c11 += dy * dy;
        c12 += dy * dz;
        c22 += dz * dz;
    }

    let n = points.len() as f64;
    [
        [c00 / n, c01 / n, c02 / n],
        [c01 / n, c11 / n, c12 / n],
        [c02 / n, c12 / n, c22 / n],
    ]
}
