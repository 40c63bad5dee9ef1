//! Geometry-aligned vertical directions per cube edge
//!
//! For each axis type and cube edge the table stores the two axis-aligned
//! directions perpendicular to the axis that point into the cube. A label's
//! up vector is matched against them to decide which way "away from the
//! cube" is.

use ak_core::{AxisPosition, AxisType};
use glam::DVec3;

type Dir = [f64; 3];

/// `[axis type][edge][candidate]` unit directions pointing into the cube.
pub static AXIS_ALIGNED_UP: [[[Dir; 2]; 4]; 3] = [
    // X axis: candidates along y and z
    [
        [[0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        [[0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
        [[0.0, -1.0, 0.0], [0.0, 0.0, -1.0]],
        [[0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
    ],
    // Y axis: candidates along x and z
    [
        [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
        [[-1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
        [[-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    ],
    // Z axis: candidates along x and y
    [
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
        [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
        [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    ],
];

/// The two inward directions for an edge.
pub fn reference_directions(axis_type: AxisType, position: AxisPosition) -> [DVec3; 2] {
    AXIS_ALIGNED_UP[axis_type.index()][position.index()].map(DVec3::from_array)
}

/// `-1.0` or `1.0`: the factor that turns `up` into an outward direction.
///
/// The reference with the larger |dot| against `up` wins (ties go to the
/// second); a positive winning dot means `up` points into the cube.
pub fn vertical_offset_sign(axis_type: AxisType, position: AxisPosition, up: DVec3) -> f64 {
    let [first, second] = reference_directions(axis_type, position);
    let dot1 = first.dot(up);
    let dot2 = second.dot(up);
    let winner = if dot1.abs() > dot2.abs() { dot1 } else { dot2 };
    if winner > 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries_are_unit_and_perpendicular_to_axis() {
        for axis_type in AxisType::ALL {
            let axis_dir = match axis_type {
                AxisType::X => DVec3::X,
                AxisType::Y => DVec3::Y,
                AxisType::Z => DVec3::Z,
            };
            for position in AxisPosition::ALL {
                for dir in reference_directions(axis_type, position) {
                    assert_eq!(dir.length(), 1.0);
                    assert_eq!(dir.dot(axis_dir), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_sign_points_away_from_cube() {
        // X axis on the (ymin, zmin) edge: the cube lies towards +y
        assert_eq!(vertical_offset_sign(AxisType::X, AxisPosition::MinMin, DVec3::Y), -1.0);
        assert_eq!(vertical_offset_sign(AxisType::X, AxisPosition::MinMin, DVec3::NEG_Y), 1.0);
        // (ymax, zmax) edge: the cube lies towards -y
        assert_eq!(vertical_offset_sign(AxisType::X, AxisPosition::MaxMax, DVec3::Y), 1.0);
    }

    #[test]
    fn test_outward_translation_for_every_edge() {
        // sign * up must never point into the cube
        let ups = [
            DVec3::new(0.0, 0.8, 0.6),
            DVec3::new(0.0, -0.6, 0.8),
            DVec3::new(0.3, 0.0, -0.95),
            DVec3::new(-0.95, 0.3, 0.0),
        ];
        for axis_type in AxisType::ALL {
            for position in AxisPosition::ALL {
                let [first, second] = reference_directions(axis_type, position);
                for up in ups {
                    let offset = up * vertical_offset_sign(axis_type, position, up);
                    let best = if first.dot(up).abs() > second.dot(up).abs() {
                        first
                    } else {
                        second
                    };
                    assert!(offset.dot(best) <= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_tie_goes_to_second_reference() {
        // Equal magnitudes: z reference decides for an X axis on MinMax
        let up = DVec3::new(0.0, 1.0, 1.0).normalize();
        assert_eq!(vertical_offset_sign(AxisType::X, AxisPosition::MinMax, up), 1.0);
    }
}
