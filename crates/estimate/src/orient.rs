use pcanormals_core::{vec3, Point3};

/// Flip `normal` so it points from `point` toward `viewpoint`.
///
/// A depth sensor only sees surfaces facing it, so per-patch estimates are
/// conventionally oriented toward the sensor position. This fixes the sign
/// of one normal in isolation; it establishes no consistency between
/// neighboring patches. A normal exactly tangent to the view direction
/// (zero dot product) is returned unchanged.
pub fn orient_toward_viewpoint(normal: &Point3, point: &Point3, viewpoint: &Point3) -> Point3 {
    let to_view = vec3::sub(viewpoint, point);
    if vec3::dot(normal, &to_view) < 0.0 {
        vec3::neg(normal)
    } else {
        *normal
    }
}
