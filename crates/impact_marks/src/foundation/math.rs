//! Math utilities and types
//!
//! Vector aliases over nalgebra plus the handful of plane/basis helpers the
//! decal projection needs.

pub use nalgebra::{Rotation3, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Project `point` onto the plane through the origin with normal `normal`.
///
/// `normal` does not need to be unit length, but must not be zero.
pub fn project_point_on_plane(point: &Vec3, normal: &Vec3) -> Vec3 {
    let d = normal.dot(point) / normal.norm_squared();
    point - normal * d
}

/// Find a unit vector perpendicular to the unit vector `src`.
///
/// Uses the world axis least aligned with `src` and projects it onto the
/// plane `src` defines, which keeps the result stable for axis-aligned input.
pub fn perpendicular_vector(src: &Vec3) -> Vec3 {
    let mut min_axis = 0;
    let mut min_elem = 1.0_f32;
    for axis in 0..3 {
        if src[axis].abs() < min_elem {
            min_axis = axis;
            min_elem = src[axis].abs();
        }
    }

    let mut temp = Vec3::zeros();
    temp[min_axis] = 1.0;

    project_point_on_plane(&temp, src).normalize()
}

/// Rotate `point` around the unit axis `dir` by `radians`.
pub fn rotate_point_around_vector(dir: &Vec3, point: &Vec3, radians: f32) -> Vec3 {
    let axis = Unit::new_unchecked(*dir);
    Rotation3::from_axis_angle(&axis, radians) * point
}

/// Orthonormal frame for a surface impact.
///
/// `normal` faces out of the surface; `tangent` and `bitangent` span the
/// impact plane and are the texture S and T directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactBasis {
    /// Surface normal (axis 0)
    pub normal: Vec3,
    /// Texture S direction (axis 1)
    pub tangent: Vec3,
    /// Texture T direction (axis 2)
    pub bitangent: Vec3,
}

impl ImpactBasis {
    /// Build the frame for `dir`, rolled around the normal by `orientation`
    /// radians. Returns `None` when `dir` has no usable length.
    pub fn new(dir: &Vec3, orientation: f32) -> Option<Self> {
        let normal = dir.try_normalize(f32::EPSILON)?;
        let perpendicular = perpendicular_vector(&normal);
        let bitangent = rotate_point_around_vector(&normal, &perpendicular, orientation);
        let tangent = bitangent.cross(&normal);

        Some(Self {
            normal,
            tangent,
            bitangent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_perpendicular_vector_is_orthogonal_unit() {
        for src in [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.3, -0.8, 0.52).normalize(),
        ] {
            let perp = perpendicular_vector(&src);
            assert_relative_eq!(perp.dot(&src), 0.0, epsilon = EPSILON);
            assert_relative_eq!(perp.norm(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate_point_around_vector(
            &Vec3::z(),
            &Vec3::x(),
            constants::PI * 0.5,
        );
        assert_relative_eq!(rotated, Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_impact_basis_is_right_handed() {
        let basis = ImpactBasis::new(&Vec3::new(0.0, 0.0, 4.0), 0.7).expect("usable normal");

        assert_relative_eq!(basis.normal, Vec3::z(), epsilon = EPSILON);
        assert_relative_eq!(basis.tangent.dot(&basis.normal), 0.0, epsilon = EPSILON);
        assert_relative_eq!(basis.bitangent.dot(&basis.normal), 0.0, epsilon = EPSILON);
        assert_relative_eq!(basis.tangent.dot(&basis.bitangent), 0.0, epsilon = EPSILON);
        assert_relative_eq!(
            basis.normal.cross(&basis.tangent),
            basis.bitangent,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_impact_basis_orientation_rolls_axes() {
        let flat = ImpactBasis::new(&Vec3::z(), 0.0).expect("usable normal");
        let rolled = ImpactBasis::new(&Vec3::z(), constants::PI * 0.5).expect("usable normal");

        let perpendicular = perpendicular_vector(&Vec3::z());
        assert_relative_eq!(flat.bitangent, perpendicular, epsilon = EPSILON);
        assert_relative_eq!(
            rolled.bitangent,
            rotate_point_around_vector(&Vec3::z(), &perpendicular, constants::PI * 0.5),
            epsilon = EPSILON
        );
        assert_relative_eq!(rolled.bitangent, Vec3::y(), epsilon = EPSILON);
        assert_relative_eq!(rolled.tangent, Vec3::x(), epsilon = EPSILON);
        assert_relative_eq!(flat.tangent, -Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_impact_basis_rejects_zero_direction() {
        assert!(ImpactBasis::new(&Vec3::zeros(), 0.0).is_none());
    }
}
