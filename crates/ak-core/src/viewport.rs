//! Viewport interface and a concrete scene viewport
//!
//! Display coordinates are pixels with the origin at the bottom-left corner of
//! the window; the depth component is the normalized device depth.

use glam::{DVec2, DVec3, DVec4};

use crate::camera::{Camera, OrbitCamera};

/// Rendering surface the annotation code measures against.
pub trait Viewport {
    /// Size in pixels (width, height).
    fn size(&self) -> (u32, u32);

    /// Camera used to render this viewport, if one is attached.
    fn active_camera(&self) -> Option<&dyn Camera>;

    /// Convert a world point to display coordinates.
    fn world_to_display(&self, world: DVec3) -> Option<DVec3>;

    /// Convert a display point (x, y, depth) back to world coordinates.
    fn display_to_world(&self, display: DVec3) -> Option<DVec3>;

    /// Whether a display position falls inside this viewport.
    fn is_in_viewport(&self, display: DVec2) -> bool;

    /// Width over height, 1.0 for an empty viewport.
    fn aspect(&self) -> f64 {
        let (w, h) = self.size();
        if h == 0 { 1.0 } else { w as f64 / h as f64 }
    }
}

/// Viewport covering a rectangle of a window, rendered with an [`OrbitCamera`].
#[derive(Debug, Clone)]
pub struct SceneViewport {
    /// Attached camera
    pub camera: Option<OrbitCamera>,
    /// Bottom-left corner of the viewport in window pixels
    pub origin: DVec2,
    width: u32,
    height: u32,
}

impl SceneViewport {
    /// Create a viewport of the given pixel size with a default camera.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Some(OrbitCamera::new()),
            origin: DVec2::ZERO,
            width,
            height,
        }
    }

    /// Create a viewport without a camera.
    pub fn without_camera(width: u32, height: u32) -> Self {
        Self {
            camera: None,
            ..Self::new(width, height)
        }
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Mutable access to the attached camera.
    pub fn camera_mut(&mut self) -> Option<&mut OrbitCamera> {
        self.camera.as_mut()
    }
}

impl Viewport for SceneViewport {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn active_camera(&self) -> Option<&dyn Camera> {
        self.camera.as_ref().map(|c| c as &dyn Camera)
    }

    fn world_to_display(&self, world: DVec3) -> Option<DVec3> {
        let camera = self.camera.as_ref()?;
        let view_proj = camera.projection_matrix(self.aspect()) * camera.view_transform_matrix();
        let clip = view_proj * world.extend(1.0);
        if clip.w.abs() < f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(DVec3::new(
            self.origin.x + (ndc.x + 1.0) * 0.5 * self.width as f64,
            self.origin.y + (ndc.y + 1.0) * 0.5 * self.height as f64,
            ndc.z,
        ))
    }

    fn display_to_world(&self, display: DVec3) -> Option<DVec3> {
        let camera = self.camera.as_ref()?;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let ndc = DVec4::new(
            2.0 * (display.x - self.origin.x) / self.width as f64 - 1.0,
            2.0 * (display.y - self.origin.y) / self.height as f64 - 1.0,
            display.z,
            1.0,
        );
        let view_proj = camera.projection_matrix(self.aspect()) * camera.view_transform_matrix();
        let world = view_proj.inverse() * ndc;
        if world.w.abs() < f64::EPSILON {
            return None;
        }
        Some(world.truncate() / world.w)
    }

    fn is_in_viewport(&self, display: DVec2) -> bool {
        let local = display - self.origin;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.width as f64
            && local.y <= self.height as f64
    }
}
