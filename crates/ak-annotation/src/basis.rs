//! Orthogonal basis for axis-aligned billboards
//!
//! A label that follows an axis reads along the axis (`right`), stands on a
//! vertical that is perpendicular to both the axis and the viewing direction
//! (`up`), and faces the camera (`normal`).

use ak_core::constants::follower::PARALLEL_EPSILON;
use glam::{DMat4, DVec3};

/// Threshold for choosing the perpendicular helper vector.
const HELPER_PARALLEL_THRESHOLD: f64 = 0.9;

/// Three mutually orthogonal unit vectors orienting a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBasis {
    /// Reading direction, along the axis
    pub right: DVec3,
    /// Label vertical
    pub up: DVec3,
    /// Label normal
    pub normal: DVec3,
    /// Whether `right` and `normal` were negated to keep the text readable
    pub upside_down: bool,
}

impl OrthoBasis {
    /// Rotation matrix with `right`, `up`, `normal` as its first three columns.
    pub fn to_matrix(&self) -> DMat4 {
        basis_matrix(self.right, self.up, self.normal)
    }
}

/// Embed three column vectors as the rotation part of a 4x4 matrix.
pub fn basis_matrix(right: DVec3, up: DVec3, normal: DVec3) -> DMat4 {
    DMat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        normal.extend(0.0),
        DVec3::ZERO.extend(1.0),
    )
}

/// Whether text running from `a` to `b` (view space) reads upside down once
/// the label's own roll of `roll_degrees` is applied.
pub fn is_text_upside_down(roll_degrees: f64, a: DVec3, b: DVec3) -> bool {
    let angle = roll_degrees.to_radians();
    (b.x - a.x) * angle.cos() - (b.y - a.y) * angle.sin() < 0.0
}

/// Two unit vectors orthogonal to `axis` and to each other, with
/// `axis × first == second`.
pub fn perpendicular_pair(axis: DVec3) -> (DVec3, DVec3) {
    let Some(axis) = axis.try_normalize() else {
        return (DVec3::Y, DVec3::Z);
    };

    // Pick a helper vector that is not parallel to axis.
    let helper = if axis.dot(DVec3::Y).abs() < HELPER_PARALLEL_THRESHOLD {
        DVec3::Y
    } else {
        DVec3::X
    };

    let first = axis.cross(helper).normalize();
    let second = axis.cross(first).normalize();
    (first, second)
}

/// Build the label basis for the axis `p1 → p2` seen along `dop`.
///
/// `view_matrix` maps world to view space and is used for the upside-down
/// test together with the label roll. Returns `None` for a zero-length axis.
pub fn compute_basis(
    p1: DVec3,
    p2: DVec3,
    dop: DVec3,
    view_matrix: &DMat4,
    roll_degrees: f64,
) -> Option<OrthoBasis> {
    let mut right = (p2 - p1).try_normalize()?;

    let across = right.cross(dop);
    let (up, mut normal) = if across.length_squared() > PARALLEL_EPSILON {
        let up = across.normalize();
        (up, right.cross(up).normalize())
    } else {
        // Looking straight down the axis
        perpendicular_pair(right)
    };

    let a = view_matrix.transform_point3(p1);
    let b = view_matrix.transform_point3(p2);
    let upside_down = is_text_upside_down(roll_degrees, a, b);
    if upside_down {
        right = -right;
        normal = -normal;
    }

    Some(OrthoBasis {
        right,
        up,
        normal,
        upside_down,
    })
}
