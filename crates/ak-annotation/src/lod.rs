//! Level-of-detail visibility gates
//!
//! Two independent tests decide whether a follower is drawn this frame. Both
//! are evaluated again on every rebuild, so a label hidden by LOD comes back
//! as soon as the gates pass.

use ak_core::{Camera, FollowerConfig};
use glam::DVec3;

/// LOD switches and thresholds of one follower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodSettings {
    /// Hide labels beyond a fraction of the far clip distance
    pub enable_distance: bool,
    /// Fraction of the far clip distance (0..1)
    pub distance_threshold: f64,
    /// Hide labels seen nearly edge-on
    pub enable_view_angle: bool,
    /// Minimum |cos| between view ray and label normal (0..1)
    pub view_angle_threshold: f64,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self::from(&FollowerConfig::text_label())
    }
}

impl From<&FollowerConfig> for LodSettings {
    fn from(config: &FollowerConfig) -> Self {
        let config = config.sanitized();
        Self {
            enable_distance: config.enable_distance_lod,
            distance_threshold: config.distance_lod_threshold,
            enable_view_angle: config.enable_view_angle_lod,
            view_angle_threshold: config.view_angle_lod_threshold,
        }
    }
}

impl LodSettings {
    /// Evaluate both enabled gates.
    ///
    /// `normal` is the label normal from the last basis; without one the
    /// view-angle gate passes. `axis_diagonal` is the bounding diagonal of
    /// the followed axis, if there is one.
    pub fn evaluate(
        &self,
        camera: &dyn Camera,
        position: DVec3,
        normal: Option<DVec3>,
        axis_diagonal: Option<f64>,
    ) -> bool {
        let distance_ok = !self.enable_distance
            || camera_distance_visible(camera, position, self.distance_threshold, axis_diagonal);
        let angle_ok = !self.enable_view_angle
            || normal.is_none_or(|n| {
                camera_view_angle_visible(camera, position, n, self.view_angle_threshold)
            });
        distance_ok && angle_ok
    }
}

/// Distance gate on plain numbers.
///
/// Visible when `distance <= threshold * far`, or when the axis diagonal is
/// longer than the clip span (a huge axis keeps its labels).
pub fn distance_gate(
    distance: f64,
    clipping_range: (f64, f64),
    threshold: f64,
    axis_diagonal: Option<f64>,
) -> bool {
    let (near, far) = clipping_range;
    let max_visible = threshold * far;
    if distance <= max_visible {
        return true;
    }
    axis_diagonal.is_some_and(|diagonal| diagonal > far - near)
}

/// View-angle gate on the cosine between view ray and label normal.
pub fn view_angle_gate(cosine: f64, threshold: f64) -> bool {
    cosine.abs() >= threshold
}

/// Distance gate against a camera. Always passes in parallel projection.
pub fn camera_distance_visible(
    camera: &dyn Camera,
    position: DVec3,
    threshold: f64,
    axis_diagonal: Option<f64>,
) -> bool {
    if camera.is_parallel_projection() {
        return true;
    }
    let distance = camera.position().distance(position);
    distance_gate(distance, camera.clipping_range(), threshold, axis_diagonal)
}

/// View-angle gate against a camera.
///
/// The view ray runs from the eye to `position`; in parallel projection it
/// is the direction of projection.
pub fn camera_view_angle_visible(
    camera: &dyn Camera,
    position: DVec3,
    normal: DVec3,
    threshold: f64,
) -> bool {
    let ray = if camera.is_parallel_projection() {
        camera.direction_of_projection()
    } else {
        (position - camera.position()).normalize_or_zero()
    };
    view_angle_gate(ray.dot(normal), threshold)
}
