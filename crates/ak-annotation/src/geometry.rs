//! Geometry drawn by a follower

use glam::{DMat4, DVec3};

/// Geometry a follower positions with its matrix.
pub trait LabelGeometry {
    /// Center of the untransformed geometry, used as pivot when auto-centering.
    fn local_center(&self) -> DVec3;

    /// Draw with the follower's matrix. Returns true if anything was drawn.
    fn render(&mut self, transform: &DMat4) -> bool;
}

/// Flat rectangle in the local xy plane with its corner at the origin,
/// the footprint of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadLabel {
    /// Width along local x
    pub width: f64,
    /// Height along local y
    pub height: f64,
    world_corners: Option<[DVec3; 4]>,
}

impl QuadLabel {
    /// Create a label footprint of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            world_corners: None,
        }
    }

    /// Corners in local coordinates, counter-clockwise from the origin
    pub fn local_corners(&self) -> [DVec3; 4] {
        [
            DVec3::ZERO,
            DVec3::new(self.width, 0.0, 0.0),
            DVec3::new(self.width, self.height, 0.0),
            DVec3::new(0.0, self.height, 0.0),
        ]
    }

    /// World corners from the last render
    pub fn world_corners(&self) -> Option<[DVec3; 4]> {
        self.world_corners
    }
}

impl LabelGeometry for QuadLabel {
    fn local_center(&self) -> DVec3 {
        DVec3::new(self.width * 0.5, self.height * 0.5, 0.0)
    }

    fn render(&mut self, transform: &DMat4) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        self.world_corners = Some(self.local_corners().map(|c| transform.transform_point3(c)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_center_and_render() {
        let mut quad = QuadLabel::new(2.0, 1.0);
        assert_eq!(quad.local_center(), DVec3::new(1.0, 0.5, 0.0));
        assert!(quad.render(&DMat4::from_translation(DVec3::Z)));
        let corners = quad.world_corners().unwrap();
        assert_eq!(corners[2], DVec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_quad_draws_nothing() {
        let mut quad = QuadLabel::new(0.0, 1.0);
        assert!(!quad.render(&DMat4::IDENTITY));
        assert!(quad.world_corners().is_none());
    }
}
