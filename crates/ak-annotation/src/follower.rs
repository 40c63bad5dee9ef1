//! Billboard that follows an axis
//!
//! An [`AxisFollower`] orients its label along a reference axis, keeps the
//! text readable from any camera position, pushes it a constant number of
//! pixels away from the axis and culls it by distance and viewing angle.
//! The matrix is rebuilt lazily: only when the follower, its axis or the
//! camera carries a generation newer than the cached one, or when the
//! viewport was resized.

use ak_core::{AxisHandle, Camera, FollowerConfig, Generation, SharedAxis, Viewport};
use glam::{DMat4, DVec2, DVec3};

use crate::autoscale::auto_scale_for;
use crate::basis::{OrthoBasis, basis_matrix, compute_basis};
use crate::geometry::LabelGeometry;
use crate::instance::LabelInstance;
use crate::lod::LodSettings;
use crate::reference::vertical_offset_sign;
use crate::transform::{TransformParts, compose_transform};

/// What the last rebuild was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BuildInputs {
    viewport_size: (u32, u32),
    axis_alive: bool,
    pivot: DVec3,
}

/// A label that follows an axis.
pub struct AxisFollower {
    axis: AxisHandle,
    position: DVec3,
    orientation: DVec3,
    scale: DVec3,
    origin: DVec3,
    auto_center: bool,
    screen_offset_vector: DVec2,
    lod: LodSettings,
    visibility: bool,
    user_matrix: Option<DMat4>,
    geometry: Option<Box<dyn LabelGeometry>>,
    modified: Generation,

    matrix: DMat4,
    matrix_time: Generation,
    built: Option<BuildInputs>,
    basis: Option<OrthoBasis>,
    translation: DVec3,
    lod_visible: bool,
}

impl Default for AxisFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AxisFollower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisFollower")
            .field("axis", &self.axis)
            .field("position", &self.position)
            .field("orientation", &self.orientation)
            .field("scale", &self.scale)
            .field("origin", &self.origin)
            .field("auto_center", &self.auto_center)
            .field("screen_offset_vector", &self.screen_offset_vector)
            .field("lod", &self.lod)
            .field("visibility", &self.visibility)
            .field("has_geometry", &self.geometry.is_some())
            .field("matrix_time", &self.matrix_time)
            .finish()
    }
}

impl AxisFollower {
    /// Text-label follower with default settings and no axis.
    pub fn new() -> Self {
        Self::with_config(&FollowerConfig::text_label())
    }

    /// Follower configured from `config`.
    pub fn with_config(config: &FollowerConfig) -> Self {
        let mut follower = Self {
            axis: AxisHandle::unset(),
            position: DVec3::ZERO,
            orientation: DVec3::ZERO,
            scale: DVec3::ONE,
            origin: DVec3::ZERO,
            auto_center: true,
            screen_offset_vector: DVec2::ZERO,
            lod: LodSettings::default(),
            visibility: true,
            user_matrix: None,
            geometry: None,
            modified: Generation::next(),
            matrix: DMat4::IDENTITY,
            matrix_time: Generation::NEVER,
            built: None,
            basis: None,
            translation: DVec3::ZERO,
            lod_visible: true,
        };
        follower.apply_config(config);
        follower
    }

    /// Take over centering, offsets and LOD settings from `config`.
    pub fn apply_config(&mut self, config: &FollowerConfig) {
        let config = config.sanitized();
        self.auto_center = config.auto_center;
        self.screen_offset_vector = DVec2::from_array(config.screen_offset_vector);
        self.lod = LodSettings::from(&config);
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = Generation::next();
    }

    /// Generation of the last setting change.
    pub fn modified(&self) -> Generation {
        self.modified
    }

    // ========== Setters ==========

    /// Follow `axis`. The follower does not keep it alive.
    pub fn set_axis(&mut self, axis: &SharedAxis) {
        self.axis = AxisHandle::new(axis);
        self.touch();
    }

    /// Replace the axis handle, or detach with [`AxisHandle::unset`].
    pub fn set_axis_handle(&mut self, axis: AxisHandle) {
        self.axis = axis;
        self.touch();
    }

    /// The followed axis.
    pub fn axis(&self) -> &AxisHandle {
        &self.axis
    }

    /// Anchor of the label before the offset away from the axis.
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
        self.touch();
    }

    /// Anchor of the label.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Pitch, yaw, roll in degrees, applied before the axis basis.
    pub fn set_orientation(&mut self, orientation: DVec3) {
        self.orientation = orientation;
        self.touch();
    }

    /// Pitch, yaw, roll in degrees.
    pub fn orientation(&self) -> DVec3 {
        self.orientation
    }

    /// Per-axis scale.
    pub fn set_scale(&mut self, scale: DVec3) {
        self.scale = scale;
        self.touch();
    }

    /// Per-axis scale.
    pub fn scale(&self) -> DVec3 {
        self.scale
    }

    /// Pivot used when auto-centering is off.
    pub fn set_origin(&mut self, origin: DVec3) {
        self.origin = origin;
        self.touch();
    }

    /// Explicit pivot.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Pivot around the geometry center instead of the origin.
    pub fn set_auto_center(&mut self, auto_center: bool) {
        self.auto_center = auto_center;
        self.touch();
    }

    /// Whether the pivot is the geometry center.
    pub fn auto_center(&self) -> bool {
        self.auto_center
    }

    /// Vertical offset from the axis in pixels.
    pub fn set_screen_offset(&mut self, pixels: f64) {
        self.screen_offset_vector.y = pixels;
        self.touch();
    }

    /// Vertical offset from the axis in pixels.
    pub fn screen_offset(&self) -> f64 {
        self.screen_offset_vector.y
    }

    /// Horizontal (along the axis) and vertical offsets in pixels.
    pub fn set_screen_offset_vector(&mut self, offset: DVec2) {
        self.screen_offset_vector = offset;
        self.touch();
    }

    /// Horizontal and vertical offsets in pixels.
    pub fn screen_offset_vector(&self) -> DVec2 {
        self.screen_offset_vector
    }

    /// Toggle the distance gate.
    pub fn set_enable_distance_lod(&mut self, enable: bool) {
        self.lod.enable_distance = enable;
        self.touch();
    }

    /// Fraction of the far clip distance, clamped to [0, 1].
    pub fn set_distance_lod_threshold(&mut self, threshold: f64) {
        self.lod.distance_threshold = threshold.clamp(0.0, 1.0);
        self.touch();
    }

    /// Toggle the view-angle gate.
    pub fn set_enable_view_angle_lod(&mut self, enable: bool) {
        self.lod.enable_view_angle = enable;
        self.touch();
    }

    /// Minimum |cos| of the viewing angle, clamped to [0, 1].
    pub fn set_view_angle_lod_threshold(&mut self, threshold: f64) {
        self.lod.view_angle_threshold = threshold.clamp(0.0, 1.0);
        self.touch();
    }

    /// Current LOD settings.
    pub fn lod(&self) -> &LodSettings {
        &self.lod
    }

    /// User visibility, combined with the LOD result in [`is_visible`](Self::is_visible).
    pub fn set_visibility(&mut self, visible: bool) {
        self.visibility = visible;
    }

    /// User visibility alone.
    pub fn visibility(&self) -> bool {
        self.visibility
    }

    /// Matrix concatenated after everything else.
    pub fn set_user_matrix(&mut self, matrix: Option<DMat4>) {
        self.user_matrix = matrix;
        self.touch();
    }

    /// Matrix concatenated after everything else.
    pub fn user_matrix(&self) -> Option<DMat4> {
        self.user_matrix
    }

    /// Geometry drawn with the follower's matrix.
    pub fn set_geometry(&mut self, geometry: Box<dyn LabelGeometry>) {
        self.geometry = Some(geometry);
        self.touch();
    }

    /// Geometry drawn with the follower's matrix.
    pub fn geometry(&self) -> Option<&dyn LabelGeometry> {
        self.geometry.as_deref()
    }

    // ========== Results ==========

    /// Matrix from the last rebuild.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Generation at which [`matrix`](Self::matrix) was built.
    pub fn matrix_time(&self) -> Generation {
        self.matrix_time
    }

    /// Basis from the last rebuild, `None` without a usable axis.
    pub fn basis(&self) -> Option<&OrthoBasis> {
        self.basis.as_ref()
    }

    /// Offset away from the axis from the last rebuild.
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// User visibility and the LOD result of the last rebuild.
    pub fn is_visible(&self) -> bool {
        self.visibility && self.lod_visible
    }

    /// GPU instance data for the current matrix.
    pub fn label_instance(&self) -> LabelInstance {
        LabelInstance::new(&self.matrix, self.is_visible())
    }

    // ========== Rebuild ==========

    /// Rebuild the matrix if any input changed. Returns true if it was rebuilt.
    pub fn compute_transform_matrix(&mut self, viewport: &dyn Viewport) -> bool {
        self.compute_with_center(viewport, None)
    }

    /// Rebuild and draw the geometry. Returns true if anything was drawn.
    pub fn render_opaque_geometry(&mut self, viewport: &dyn Viewport) -> bool {
        self.compute_transform_matrix(viewport);
        if !self.is_visible() {
            return false;
        }
        let matrix = self.matrix;
        match self.geometry.as_mut() {
            Some(geometry) => geometry.render(&matrix),
            None => false,
        }
    }

    /// Rebuild with an externally computed auto-center pivot.
    pub(crate) fn compute_with_center(
        &mut self,
        viewport: &dyn Viewport,
        center: Option<DVec3>,
    ) -> bool {
        let Some(camera) = viewport.active_camera() else {
            tracing::warn!("AxisFollower: viewport has no active camera");
            return false;
        };

        let axis = self.axis.upgrade();
        let pivot = self.pivot(center);
        let inputs = BuildInputs {
            viewport_size: viewport.size(),
            axis_alive: axis.is_some(),
            pivot,
        };

        let axis_time = axis.as_ref().map(|a| a.borrow().modified());
        if !self.is_dirty(camera.modified(), axis_time, &inputs) {
            return false;
        }

        if self.axis.is_set() && axis.is_none() {
            tracing::warn!("AxisFollower: followed axis was dropped");
        }

        self.basis = None;
        self.translation = DVec3::ZERO;
        let mut parts = TransformParts {
            pivot,
            scale: self.scale,
            orientation: self.orientation,
            basis: None,
            translation: pivot + self.position,
            user_matrix: self.user_matrix,
        };

        let mut axis_diagonal = None;
        if let Some(axis) = &axis {
            let axis = axis.borrow();
            axis_diagonal = Some(axis.bounds().diagonal_length());
            match (axis.point1(viewport), axis.point2(viewport)) {
                (Some(p1), Some(p2)) => {
                    let sign = |up| vertical_offset_sign(axis.axis_type(), axis.axis_position(), up);
                    if let Some((basis, translation)) =
                        self.orient_along(viewport, camera, p1, p2, sign)
                    {
                        parts.basis = Some(basis);
                        parts.translation += translation;
                    }
                }
                _ => tracing::warn!("AxisFollower: axis endpoints could not be resolved"),
            }
        }

        self.lod_visible = self.lod.evaluate(
            camera,
            self.position,
            self.basis.map(|b| b.normal),
            axis_diagonal,
        );
        self.matrix = compose_transform(&parts);
        self.matrix_time = Generation::next();
        self.built = Some(inputs);

        tracing::debug!(
            "AxisFollower rebuilt: translation {:?}, visible {}",
            self.translation,
            self.lod_visible
        );
        true
    }

    fn pivot(&self, center: Option<DVec3>) -> DVec3 {
        if !self.auto_center {
            return self.origin;
        }
        center
            .or_else(|| self.geometry.as_ref().map(|g| g.local_center()))
            .unwrap_or(self.origin)
    }

    fn is_dirty(
        &self,
        camera_time: Generation,
        axis_time: Option<Generation>,
        inputs: &BuildInputs,
    ) -> bool {
        if self.built.as_ref() != Some(inputs) {
            return true;
        }
        self.modified.is_newer_than(self.matrix_time)
            || camera_time.is_newer_than(self.matrix_time)
            || axis_time.is_some_and(|t| t.is_newer_than(self.matrix_time))
    }

    /// Compute basis and offset for the axis `p1 → p2`. Stores the basis and
    /// translation and returns the basis matrix to compose with.
    fn orient_along(
        &mut self,
        viewport: &dyn Viewport,
        camera: &dyn Camera,
        p1: DVec3,
        p2: DVec3,
        offset_sign: impl Fn(DVec3) -> f64,
    ) -> Option<(DMat4, DVec3)> {
        let dop = camera.direction_of_projection();
        let Some(basis) = compute_basis(
            p1,
            p2,
            dop,
            &camera.view_transform_matrix(),
            self.orientation.z,
        ) else {
            tracing::warn!("AxisFollower: zero-length axis, skipping orientation");
            return None;
        };

        let vertical = auto_scale_for(
            Some(viewport),
            Some(camera),
            self.screen_offset_vector.y,
            self.position,
        ) * offset_sign(basis.up);
        let horizontal = auto_scale_for(
            Some(viewport),
            Some(camera),
            self.screen_offset_vector.x,
            self.position,
        );
        let translation = basis.up * vertical + basis.right * horizontal;

        // Keep the text from being mirrored when the normal faces away.
        let up = if basis.normal.dot(dop) > 0.0 {
            -basis.up
        } else {
            basis.up
        };

        self.basis = Some(basis);
        self.translation = translation;
        Some((basis_matrix(basis.right, up, basis.normal), translation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoscale::auto_scale;
    use crate::geometry::QuadLabel;
    use ak_core::{AxisActor, AxisPosition, AxisType, SceneViewport, Shared};
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn viewport_at(eye: DVec3) -> SceneViewport {
        let mut viewport = SceneViewport::new(500, 500);
        if let Some(camera) = viewport.camera_mut() {
            camera.look_at(eye, DVec3::ZERO, DVec3::Y);
        }
        viewport
    }

    fn shared_axis(p1: DVec3, p2: DVec3) -> Shared<AxisActor> {
        Rc::new(RefCell::new(AxisActor::new(
            p1,
            p2,
            AxisType::X,
            AxisPosition::MinMin,
        )))
    }

    fn follower_on(axis: &Shared<AxisActor>) -> AxisFollower {
        let source: SharedAxis = axis.clone();
        let mut follower = AxisFollower::new();
        follower.set_axis(&source);
        follower.set_screen_offset(10.0);
        follower
    }

    #[test]
    fn test_offset_pushes_label_out_of_cube() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);

        assert!(follower.compute_transform_matrix(&viewport));

        let expected = auto_scale(500.0, 30.0, 10.0, 5.0);
        let translation = follower.translation();
        assert_relative_eq!(translation.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(translation.y, -expected, epsilon = 1e-12);
        assert_relative_eq!(translation.z, 0.0, epsilon = 1e-12);

        let m = follower.matrix();
        assert!(m.x_axis.truncate().abs_diff_eq(DVec3::X, 1e-12));
        assert!(m.y_axis.truncate().abs_diff_eq(DVec3::Y, 1e-12));
        assert!(m.z_axis.truncate().abs_diff_eq(DVec3::Z, 1e-12));
        assert_relative_eq!(m.w_axis.y, -expected, epsilon = 1e-12);
        assert!(follower.is_visible());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);

        assert!(follower.compute_transform_matrix(&viewport));
        let time = follower.matrix_time();
        let matrix = follower.matrix();

        assert!(!follower.compute_transform_matrix(&viewport));
        assert_eq!(follower.matrix_time(), time);
        assert_eq!(follower.matrix(), matrix);
    }

    #[test]
    fn test_rebuilds_after_camera_axis_or_resize() {
        let mut viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.compute_transform_matrix(&viewport);

        if let Some(camera) = viewport.camera_mut() {
            camera.orbit(0.3, 0.2);
        }
        assert!(follower.compute_transform_matrix(&viewport));

        axis.borrow_mut().set_axis_position(AxisPosition::MaxMax);
        assert!(follower.compute_transform_matrix(&viewport));

        viewport.resize(800, 600);
        assert!(follower.compute_transform_matrix(&viewport));
        assert!(!follower.compute_transform_matrix(&viewport));
    }

    #[test]
    fn test_setter_marks_dirty() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.compute_transform_matrix(&viewport);

        follower.set_position(DVec3::new(0.0, 0.0, 1.0));
        assert!(follower.compute_transform_matrix(&viewport));
        assert_relative_eq!(follower.matrix().w_axis.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_upside_down_axis_reads_left_to_right() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::X, DVec3::ZERO);
        let mut follower = follower_on(&axis);
        follower.compute_transform_matrix(&viewport);

        let basis = follower.basis().copied().unwrap();
        assert!(basis.upside_down);
        assert!(basis.right.abs_diff_eq(DVec3::X, 1e-12));

        let m = follower.matrix();
        assert!(m.x_axis.truncate().abs_diff_eq(DVec3::X, 1e-12));
        assert!(m.y_axis.truncate().abs_diff_eq(DVec3::Y, 1e-12));

        // Still pushed below the axis
        assert!(follower.translation().y < 0.0);
    }

    #[test]
    fn test_looking_down_the_axis_stays_finite() {
        let viewport = viewport_at(DVec3::new(5.0, 0.0, 0.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        assert!(follower.compute_transform_matrix(&viewport));

        assert!(follower.matrix().is_finite());
        assert!(follower.translation().is_finite());
        let basis = follower.basis().copied().unwrap();
        for v in [basis.right, basis.up, basis.normal] {
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-9);
        }
        assert_relative_eq!(basis.right.dot(basis.up), 0.0, epsilon = 1e-9);
        assert_relative_eq!(basis.right.dot(basis.normal), 0.0, epsilon = 1e-9);
        assert_relative_eq!(basis.up.dot(basis.normal), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dropped_axis_is_tolerated() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.set_position(DVec3::new(1.0, 2.0, 3.0));
        follower.compute_transform_matrix(&viewport);

        drop(axis);
        assert!(follower.compute_transform_matrix(&viewport));
        assert!(follower.basis().is_none());
        assert_eq!(follower.translation(), DVec3::ZERO);
        assert_eq!(
            follower.matrix(),
            DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_missing_camera_keeps_cache() {
        let viewport = SceneViewport::without_camera(500, 500);
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        assert!(!follower.compute_transform_matrix(&viewport));
        assert_eq!(follower.matrix_time(), Generation::NEVER);
    }

    #[test]
    fn test_distance_lod_is_not_sticky() {
        let mut viewport = viewport_at(DVec3::new(0.0, 0.0, 90.0));
        if let Some(camera) = viewport.camera_mut() {
            camera.set_clipping_range(1.0, 100.0);
        }
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.set_enable_distance_lod(true);
        follower.set_distance_lod_threshold(0.8);

        follower.compute_transform_matrix(&viewport);
        assert!(!follower.is_visible());
        assert_eq!(follower.label_instance().visible, 0.0);

        if let Some(camera) = viewport.camera_mut() {
            camera.look_at(DVec3::new(0.0, 0.0, 50.0), DVec3::ZERO, DVec3::Y);
        }
        follower.compute_transform_matrix(&viewport);
        assert!(follower.is_visible());
    }

    #[test]
    fn test_edge_on_label_is_culled() {
        // Camera looks along -x at a label whose normal is +z
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.set_position(DVec3::new(-20.0, 0.0, 5.2));
        follower.compute_transform_matrix(&viewport);
        assert!(!follower.is_visible());

        follower.set_enable_view_angle_lod(false);
        follower.compute_transform_matrix(&viewport);
        assert!(follower.is_visible());
    }

    #[test]
    fn test_user_visibility_overrides_lod() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        follower.set_visibility(false);
        follower.compute_transform_matrix(&viewport);
        assert!(!follower.is_visible());
    }

    #[test]
    fn test_auto_center_pivots_on_geometry() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let mut follower = AxisFollower::new();
        follower.set_geometry(Box::new(QuadLabel::new(2.0, 2.0)));
        follower.set_scale(DVec3::splat(2.0));
        follower.compute_transform_matrix(&viewport);

        // Pivot (1, 1, 0) stays in place under scaling
        let pivot = follower.matrix().transform_point3(DVec3::new(1.0, 1.0, 0.0));
        assert!(pivot.abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), 1e-12));

        follower.set_auto_center(false);
        follower.compute_transform_matrix(&viewport);
        let corner = follower.matrix().transform_point3(DVec3::new(1.0, 1.0, 0.0));
        assert!(corner.abs_diff_eq(DVec3::new(2.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_render_draws_visible_geometry() {
        let viewport = viewport_at(DVec3::new(0.0, 0.0, 5.0));
        let axis = shared_axis(DVec3::ZERO, DVec3::X);
        let mut follower = follower_on(&axis);
        assert!(!follower.render_opaque_geometry(&viewport));

        follower.set_geometry(Box::new(QuadLabel::new(1.0, 0.5)));
        assert!(follower.render_opaque_geometry(&viewport));

        follower.set_visibility(false);
        assert!(!follower.render_opaque_geometry(&viewport));
    }

    #[test]
    fn test_threshold_setters_clamp() {
        let mut follower = AxisFollower::new();
        follower.set_distance_lod_threshold(1.5);
        follower.set_view_angle_lod_threshold(-0.2);
        assert_eq!(follower.lod().distance_threshold, 1.0);
        assert_eq!(follower.lod().view_angle_threshold, 0.0);
    }
}
