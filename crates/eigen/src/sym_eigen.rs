use pcanormals_core::{vec3, Mat3, Point3};

/// Eigendecomposition of a real symmetric 3×3 matrix.
///
/// `eigenvalues` are sorted ascending and `eigenvectors[i]` is the unit
/// eigenvector paired with `eigenvalues[i]`. The three vectors are mutually
/// orthogonal, also under repeated eigenvalues. Eigenvector sign is
/// arbitrary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymEigen3 {
    pub eigenvalues: [f64; 3],
    pub eigenvectors: [Point3; 3],
}

/// Below this, the shifted matrix is treated as a scalar multiple of the
/// identity and every direction is an eigenvector. Also keeps `p^(3/2)` far
/// from the denormal range before the division in Cardano's formula.
const ISOTROPIC_EPS: f64 = 1e-30;

/// Row cross products below this fraction of the matrix scale (to the
/// fourth power, matching the units of a squared cross product) are rounding
/// noise from an inexact eigenvalue, not a usable null-space direction.
const NULL_SPACE_REL_EPS: f64 = 1e-20;

/// Eigenvalues and eigenvectors of a symmetric 3×3 matrix using Cardano's
/// analytical formula for the characteristic polynomial and a cross-product
/// trick on the rows of `A − λI` for the eigenvectors.
///
/// Closed-form, no iteration: for a symmetric real matrix the decomposition
/// always exists and no convergence failure can occur. Non-finite input is
/// not sanitized; NaN coordinates flow into the eigenvalues.
pub fn sym_eigen_3x3(m: &Mat3) -> SymEigen3 {
    let a00 = m[0][0];
    let a01 = m[0][1];
    let a02 = m[0][2];
    let a11 = m[1][1];
    let a12 = m[1][2];
    let a22 = m[2][2];

    // Shift by the mean of the diagonal: B = A - mean*I has zero trace,
    // which puts Cardano's formula in its stable depressed-cubic form.
    let mean = (a00 + a11 + a22) / 3.0;
    let b00 = a00 - mean;
    let b11 = a11 - mean;
    let b22 = a22 - mean;

    // q = det(B) / 2
    let q = (b00 * (b11 * b22 - a12 * a12) - a01 * (a01 * b22 - a12 * a02)
        + a02 * (a01 * a12 - b11 * a02))
        / 2.0;

    // p = sum of squared entries of B / 6
    let p = (b00 * b00 + b11 * b11 + b22 * b22 + 2.0 * (a01 * a01 + a02 * a02 + a12 * a12)) / 6.0;
    let p = p.max(0.0); // guard against tiny negatives from rounding

    if p < ISOTROPIC_EPS {
        return SymEigen3 {
            eigenvalues: [mean; 3],
            eigenvectors: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        };
    }

    let sqrt_p = p.sqrt();
    let det_ratio = (q / (p * sqrt_p)).clamp(-1.0, 1.0);
    let phi = det_ratio.acos() / 3.0;

    // phi ∈ [0, π/3]: cos(phi) gives the largest root, cos(phi + 2π/3) the
    // smallest; the middle one falls out of the trace identity.
    let eig0 = mean + 2.0 * sqrt_p * (phi + 2.0 * std::f64::consts::FRAC_PI_3).cos();
    let eig2 = mean + 2.0 * sqrt_p * phi.cos();
    let eig1 = 3.0 * mean - eig0 - eig2;

    let mut eigenvalues = [eig0, eig1, eig2];
    eigenvalues.sort_by(f64::total_cmp);

    // Null-space directions of A − λI for the two extreme eigenvalues; the
    // cross product of two independent rows spans the rank-deficient kernel.
    // A repeated eigenvalue leaves no independent row pair and the other
    // extreme vector fixes the eigenplane instead.
    let n0 = null_space_direction(m, eigenvalues[0]);
    let n2 = null_space_direction(m, eigenvalues[2]);

    let (v0, v2) = match (n0, n2) {
        (Some(v0), Some(v2)) => (v0, v2),
        (Some(v0), None) => {
            let v2 = any_orthogonal(&v0);
            (v0, v2)
        }
        (None, Some(v2)) => {
            let v0 = any_orthogonal(&v2);
            (v0, v2)
        }
        (None, None) => ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    };

    // Re-orthogonalize v0 against v2 so the returned triple is orthonormal
    // even when the two null spaces were resolved from noisy row pairs.
    let v0 = vec3::sub(&v0, &vec3::scale(&v2, vec3::dot(&v0, &v2)));
    let v0 = vec3::normalize_or(&v0, any_orthogonal(&v2));
    let v1 = vec3::cross(&v2, &v0);

    SymEigen3 {
        eigenvalues,
        eigenvectors: [v0, v1, v2],
    }
}

/// Unit vector spanning the null space of `A − λI`, from the cross product
/// of two independent rows. `None` when no row pair is independent, i.e. the
/// eigenvalue is repeated and the null space is more than one-dimensional.
fn null_space_direction(m: &Mat3, lambda: f64) -> Option<Point3> {
    let rows: [Point3; 3] = [
        [m[0][0] - lambda, m[0][1], m[0][2]],
        [m[1][0], m[1][1] - lambda, m[1][2]],
        [m[2][0], m[2][1], m[2][2] - lambda],
    ];

    // Scale reference: the largest squared row norm. A computed λ is off by
    // a few ulps, so a truly null row resurfaces with magnitude ~ε·scale and
    // would otherwise pair into a cross product of confident direction but
    // meaningless content.
    let scale2 = rows.iter().map(|r| vec3::dot(r, r)).fold(0.0f64, f64::max);
    let tol = NULL_SPACE_REL_EPS * scale2 * scale2;

    for (a, b) in [(0, 1), (0, 2), (1, 2)] {
        let c = vec3::cross(&rows[a], &rows[b]);
        let len2 = vec3::dot(&c, &c);
        if len2 > tol {
            let inv = 1.0 / len2.sqrt();
            return Some(vec3::scale(&c, inv));
        }
    }

    None
}

/// Some unit vector orthogonal to `v`, built from the coordinate axis least
/// aligned with it.
fn any_orthogonal(v: &Point3) -> Point3 {
    let axis: Point3 = if v[0].abs() <= v[1].abs() && v[0].abs() <= v[2].abs() {
        [1.0, 0.0, 0.0]
    } else if v[1].abs() <= v[2].abs() {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };
    vec3::normalize_or(&vec3::cross(v, &axis), [1.0, 0.0, 0.0])
}
