//! Follower transform composition
//!
//! The parts are applied to a point in a fixed order:
//!
//! ```text
//! translate(-pivot) -> scale -> rotate Y, X, Z -> basis -> translate(offset) -> user matrix
//! ```

use glam::{DMat4, DVec3};

/// Inputs of one follower transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParts {
    /// Point moved to the origin before scaling and rotating
    pub pivot: DVec3,
    /// Per-axis scale
    pub scale: DVec3,
    /// Rotation about x, y, z in degrees (pitch, yaw, roll)
    pub orientation: DVec3,
    /// Axis-aligned basis rotation, if a reference axis was available
    pub basis: Option<DMat4>,
    /// Final translation
    pub translation: DVec3,
    /// Externally supplied matrix applied last
    pub user_matrix: Option<DMat4>,
}

impl Default for TransformParts {
    fn default() -> Self {
        Self {
            pivot: DVec3::ZERO,
            scale: DVec3::ONE,
            orientation: DVec3::ZERO,
            basis: None,
            translation: DVec3::ZERO,
            user_matrix: None,
        }
    }
}

/// Rotation by `orientation` degrees: Y first, then X, then Z.
pub fn orientation_matrix(orientation: DVec3) -> DMat4 {
    DMat4::from_rotation_z(orientation.z.to_radians())
        * DMat4::from_rotation_x(orientation.x.to_radians())
        * DMat4::from_rotation_y(orientation.y.to_radians())
}

/// Compose the parts into a single matrix.
pub fn compose_transform(parts: &TransformParts) -> DMat4 {
    let mut matrix = DMat4::from_translation(-parts.pivot);
    matrix = DMat4::from_scale(parts.scale) * matrix;
    matrix = orientation_matrix(parts.orientation) * matrix;
    if let Some(basis) = parts.basis {
        matrix = basis * matrix;
    }
    matrix = DMat4::from_translation(parts.translation) * matrix;
    if let Some(user) = parts.user_matrix {
        matrix = user * matrix;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::basis_matrix;

    #[test]
    fn test_identity_parts() {
        assert_eq!(compose_transform(&TransformParts::default()), DMat4::IDENTITY);
    }

    #[test]
    fn test_pivot_is_fixed_under_scale() {
        let parts = TransformParts {
            pivot: DVec3::new(1.0, 1.0, 0.0),
            scale: DVec3::splat(3.0),
            translation: DVec3::new(1.0, 1.0, 0.0),
            ..Default::default()
        };
        let m = compose_transform(&parts);
        assert!(m.transform_point3(DVec3::new(1.0, 1.0, 0.0)).abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), 1e-12));
        assert!(m.transform_point3(DVec3::new(2.0, 1.0, 0.0)).abs_diff_eq(DVec3::new(4.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_rotation_order_is_y_x_z() {
        let orientation = DVec3::new(90.0, 90.0, 0.0);
        let m = orientation_matrix(orientation);
        // Y first takes +x to -z, then X takes -z to +y
        assert!(m.transform_point3(DVec3::X).abs_diff_eq(DVec3::Y, 1e-12));

        // The opposite order gives a different result
        let xy = DMat4::from_rotation_y(90_f64.to_radians()) * DMat4::from_rotation_x(90_f64.to_radians());
        assert!(!xy.transform_point3(DVec3::X).abs_diff_eq(DVec3::Y, 1e-6));
    }

    #[test]
    fn test_basis_then_translation_then_user() {
        let basis = basis_matrix(DVec3::Y, DVec3::NEG_X, DVec3::Z);
        let parts = TransformParts {
            basis: Some(basis),
            translation: DVec3::new(0.0, 0.0, 2.0),
            user_matrix: Some(DMat4::from_scale(DVec3::splat(2.0))),
            ..Default::default()
        };
        let m = compose_transform(&parts);
        // x -> y (basis) -> (0,1,2) (translation) -> (0,2,4) (user)
        assert!(m.transform_point3(DVec3::X).abs_diff_eq(DVec3::new(0.0, 2.0, 4.0), 1e-12));
    }
}
