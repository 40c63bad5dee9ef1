//! Camera interface and an orbit camera implementation

use glam::{DMat4, DQuat, DVec3};

use crate::constants::camera as defaults;
use crate::modified::Generation;

/// What the annotation code reads from a camera.
///
/// Followers never mutate the camera; they only compare its
/// [`modified`](Camera::modified) generation against their cached matrix.
pub trait Camera {
    /// Eye position in world coordinates.
    fn position(&self) -> DVec3;
    /// Normalized viewing direction (from the eye towards the focal point).
    fn direction_of_projection(&self) -> DVec3;
    /// World to view (eye) space transform.
    fn view_transform_matrix(&self) -> DMat4;
    /// View to clip space transform for the given aspect ratio.
    fn projection_matrix(&self, aspect: f64) -> DMat4;
    /// Near and far clipping distances.
    fn clipping_range(&self) -> (f64, f64);
    /// Vertical field of view in degrees.
    fn view_angle_degrees(&self) -> f64;
    /// True for orthographic projection.
    fn is_parallel_projection(&self) -> bool;
    /// Generation of the last change to any camera parameter.
    fn modified(&self) -> Generation;
}

/// Orbit camera
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    position: DVec3,
    target: DVec3,
    up: DVec3,
    fov: f64,
    near: f64,
    far: f64,
    parallel_projection: bool,
    parallel_scale: f64,
    modified: Generation,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Create a new camera with default parameters
    pub fn new() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, defaults::DISTANCE),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov: defaults::VIEW_ANGLE_DEGREES.to_radians(),
            near: defaults::NEAR_PLANE,
            far: defaults::FAR_PLANE,
            parallel_projection: false,
            parallel_scale: 1.0,
            modified: Generation::next(),
        }
    }

    /// Place the camera at `position` looking at `target`.
    ///
    /// `up` is orthogonalized against the viewing direction. Degenerate input
    /// (eye on the target, or up parallel to the view) is ignored.
    pub fn look_at(&mut self, position: DVec3, target: DVec3, up: DVec3) {
        let Some(forward) = (target - position).try_normalize() else {
            tracing::warn!("OrbitCamera::look_at ignored: eye and target coincide");
            return;
        };
        let Some(right) = forward.cross(up).try_normalize() else {
            tracing::warn!("OrbitCamera::look_at ignored: up is parallel to the view direction");
            return;
        };
        self.position = position;
        self.target = target;
        self.up = right.cross(forward);
        self.touch();
    }

    /// Eye position.
    pub fn eye(&self) -> DVec3 {
        self.position
    }

    /// Focal point.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// View-up vector.
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Distance from the eye to the focal point.
    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    /// Orbit the camera around the target.
    ///
    /// Yaw turns about the view-up vector, pitch about the camera's right
    /// vector. Pitch stops one degree short of the poles.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        let offset = self.position - self.target;
        let yawed = DQuat::from_axis_angle(self.up, delta_yaw) * offset;

        let forward = (-yawed).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let current = yawed.angle_between(self.up);
        let limit = 1.0_f64.to_radians();
        let target_angle = (current - delta_pitch).clamp(limit, std::f64::consts::PI - limit);
        let pitched = if right == DVec3::ZERO {
            yawed
        } else {
            DQuat::from_axis_angle(right, target_angle - current) * yawed
        };

        self.position = self.target + pitched;
        let forward = (self.target - self.position).normalize_or_zero();
        if let Some(right) = forward.cross(self.up).try_normalize() {
            self.up = right.cross(forward);
        }
        self.touch();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        let scale = self.distance() * defaults::PAN_SENSITIVITY;
        let delta = right * (-delta_x * scale) + up * (delta_y * scale);
        self.target += delta;
        self.position += delta;
        self.touch();
    }

    /// Zoom the camera along the view direction
    pub fn zoom(&mut self, delta: f64) {
        let distance = (self.distance() * (1.0 - delta * defaults::ZOOM_SENSITIVITY))
            .clamp(defaults::MIN_DISTANCE, defaults::MAX_DISTANCE);
        let back = (self.position - self.target).normalize_or_zero();
        self.position = self.target + back * distance;
        self.touch();
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f64) {
        self.fov = fov_degrees.clamp(1.0, 179.0).to_radians();
        self.touch();
    }

    /// Get field of view in degrees
    pub fn fov_degrees(&self) -> f64 {
        self.fov.to_degrees()
    }

    /// Set both clipping planes. The far plane is kept beyond the near plane.
    pub fn set_clipping_range(&mut self, near: f64, far: f64) {
        self.near = near.max(1e-3);
        self.far = far.max(self.near + 1.0);
        self.touch();
    }

    /// Switch between perspective and orthographic projection.
    pub fn set_parallel_projection(&mut self, parallel: bool) {
        self.parallel_projection = parallel;
        self.touch();
    }

    /// Half-height of the orthographic view volume.
    pub fn set_parallel_scale(&mut self, scale: f64) {
        self.parallel_scale = scale.max(1e-6);
        self.touch();
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: DVec3, radius: f64) {
        let back = (self.position - self.target)
            .try_normalize()
            .unwrap_or(DVec3::Z);
        self.target = center;
        self.position = center + back * (radius * 2.5).max(1.0);
        self.parallel_scale = radius.max(1e-6);
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = Generation::next();
    }
}

impl Camera for OrbitCamera {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn direction_of_projection(&self) -> DVec3 {
        (self.target - self.position).normalize_or_zero()
    }

    fn view_transform_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    fn projection_matrix(&self, aspect: f64) -> DMat4 {
        if self.parallel_projection {
            let half_h = self.parallel_scale;
            let half_w = half_h * aspect;
            DMat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
        } else {
            DMat4::perspective_rh(self.fov, aspect, self.near, self.far)
        }
    }

    fn clipping_range(&self) -> (f64, f64) {
        (self.near, self.far)
    }

    fn view_angle_degrees(&self) -> f64 {
        self.fov.to_degrees()
    }

    fn is_parallel_projection(&self) -> bool {
        self.parallel_projection
    }

    fn modified(&self) -> Generation {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_at_sets_direction() {
        let mut camera = OrbitCamera::new();
        camera.look_at(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y);
        let dop = camera.direction_of_projection();
        assert_relative_eq!(dop.z, -1.0);
        assert_relative_eq!(camera.distance(), 5.0);
    }

    #[test]
    fn test_mutation_bumps_generation() {
        let mut camera = OrbitCamera::new();
        let before = camera.modified();
        camera.orbit(0.1, 0.0);
        assert!(camera.modified().is_newer_than(before));
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = OrbitCamera::new();
        camera.look_at(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y);
        camera.orbit(0.7, 0.3);
        assert_relative_eq!(camera.distance(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(camera.up().dot(camera.direction_of_projection()), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_look_at_is_ignored() {
        let mut camera = OrbitCamera::new();
        let eye = camera.eye();
        camera.look_at(DVec3::ONE, DVec3::ONE, DVec3::Y);
        assert_eq!(camera.eye(), eye);
    }

    #[test]
    fn test_clipping_range_keeps_far_beyond_near() {
        let mut camera = OrbitCamera::new();
        camera.set_clipping_range(10.0, 5.0);
        let (near, far) = camera.clipping_range();
        assert_relative_eq!(near, 10.0);
        assert_relative_eq!(far, 11.0);
    }
}
