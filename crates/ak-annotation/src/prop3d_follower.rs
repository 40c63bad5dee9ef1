//! Follower that drives another 3D prop
//!
//! A [`Prop3DAxisFollower`] owns no geometry. It computes an axis-following
//! matrix for a separate prop (a title, a tick-label mesh) and hands the
//! result to that prop as its user matrix.

use ak_core::{FollowerConfig, Shared, Viewport, WeakHandle};
use glam::{DMat4, DVec3};

use crate::follower::AxisFollower;

/// A 3D prop positioned by a [`Prop3DAxisFollower`].
pub trait FollowedProp {
    /// World center of the prop's geometry with its current user matrix.
    fn center(&self) -> DVec3;
    /// Matrix applied after the prop's own transform.
    fn user_matrix(&self) -> Option<DMat4>;
    /// Replace the user matrix.
    fn set_user_matrix(&mut self, matrix: Option<DMat4>);
    /// Show or hide the prop.
    fn set_visibility(&mut self, visible: bool);
}

/// Axis follower bound to a viewport and a followed prop.
#[derive(Debug)]
pub struct Prop3DAxisFollower {
    follower: AxisFollower,
    viewport: WeakHandle<dyn Viewport>,
    prop: WeakHandle<dyn FollowedProp>,
}

impl Default for Prop3DAxisFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl Prop3DAxisFollower {
    /// Follower with the prop defaults and nothing attached.
    pub fn new() -> Self {
        Self::with_config(&FollowerConfig::prop3d())
    }

    /// Follower configured from `config`.
    pub fn with_config(config: &FollowerConfig) -> Self {
        Self {
            follower: AxisFollower::with_config(config),
            viewport: WeakHandle::unset(),
            prop: WeakHandle::unset(),
        }
    }

    /// Viewport whose camera and size drive the rebuild.
    pub fn set_viewport<V: Viewport + 'static>(&mut self, viewport: &Shared<V>) {
        let viewport: Shared<dyn Viewport> = viewport.clone();
        self.viewport = WeakHandle::new(&viewport);
    }

    /// Prop that receives the matrix.
    pub fn set_prop<P: FollowedProp + 'static>(&mut self, prop: &Shared<P>) {
        let prop: Shared<dyn FollowedProp> = prop.clone();
        self.prop = WeakHandle::new(&prop);
    }

    /// The inner follower holding axis, offsets and LOD settings.
    pub fn follower(&self) -> &AxisFollower {
        &self.follower
    }

    /// Mutable access to the inner follower.
    pub fn follower_mut(&mut self) -> &mut AxisFollower {
        &mut self.follower
    }

    /// Rebuild if needed and push the matrix and visibility into the prop.
    ///
    /// Returns true if the matrix was rebuilt. Does nothing when the viewport
    /// or the prop is gone, or when the viewport has no active camera.
    pub fn compute_matrix(&mut self) -> bool {
        let Some(viewport) = self.viewport.upgrade() else {
            tracing::warn!("Prop3DAxisFollower: no viewport");
            return false;
        };
        let Some(prop) = self.prop.upgrade() else {
            tracing::warn!("Prop3DAxisFollower: followed prop was dropped");
            return false;
        };
        let viewport = viewport.borrow();
        if viewport.active_camera().is_none() {
            tracing::warn!("Prop3DAxisFollower: viewport has no active camera");
            return false;
        }

        // The center must not include the matrix we are about to compute.
        let center = {
            let mut prop = prop.borrow_mut();
            let saved = prop.user_matrix();
            prop.set_user_matrix(None);
            let center = prop.center();
            prop.set_user_matrix(saved);
            center
        };

        let rebuilt = self
            .follower
            .compute_with_center(&*viewport, Some(center));

        let mut prop = prop.borrow_mut();
        prop.set_user_matrix(Some(self.follower.matrix()));
        prop.set_visibility(self.follower.is_visible());
        rebuilt
    }
}
