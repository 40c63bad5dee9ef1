//! Constant screen-size scaling
//!
//! A world-space length that covers the same number of pixels no matter how
//! far the camera is. Recomputed on every rebuild, never cached on its own.

use ak_core::{Camera, Viewport};
use glam::DVec3;

/// World units per pixel at unit distance.
///
/// Falls back to `1.0` when the viewport has no height.
pub fn auto_scale_factor(viewport_height: f64, view_angle_degrees: f64, screen_size: f64) -> f64 {
    if viewport_height > 0.0 {
        2.0 * screen_size * (view_angle_degrees.to_radians() / 2.0).tan() / viewport_height
    } else {
        1.0
    }
}

/// World length covering `screen_size` pixels at `distance` from the eye.
pub fn auto_scale(
    viewport_height: f64,
    view_angle_degrees: f64,
    screen_size: f64,
    distance: f64,
) -> f64 {
    auto_scale_factor(viewport_height, view_angle_degrees, screen_size) * distance
}

/// [`auto_scale`] for an object at `position`, reading the viewport height
/// and camera parameters. Returns `0.0` when either collaborator is missing.
pub fn auto_scale_for(
    viewport: Option<&dyn Viewport>,
    camera: Option<&dyn Camera>,
    screen_size: f64,
    position: DVec3,
) -> f64 {
    let Some(viewport) = viewport else {
        tracing::warn!("auto_scale: no viewport");
        return 0.0;
    };
    let Some(camera) = camera else {
        tracing::warn!("auto_scale: no camera");
        return 0.0;
    };
    let (_, height) = viewport.size();
    auto_scale(
        height as f64,
        camera.view_angle_degrees(),
        screen_size,
        position.distance(camera.position()),
    )
}
