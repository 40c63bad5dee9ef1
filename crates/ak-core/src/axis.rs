//! Reference axis interface
//!
//! An axis is one edge of an axis-aligned bounding cube. Followers read its
//! endpoints, its logical type and which of the four parallel cube edges it
//! sits on.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::handle::{Shared, WeakHandle};
use crate::modified::Generation;
use crate::viewport::Viewport;

/// Logical direction of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisType {
    #[default]
    X,
    Y,
    Z,
}

impl AxisType {
    /// All axis types in table order.
    pub const ALL: [AxisType; 3] = [AxisType::X, AxisType::Y, AxisType::Z];

    /// Row index in per-type lookup tables.
    pub fn index(self) -> usize {
        match self {
            AxisType::X => 0,
            AxisType::Y => 1,
            AxisType::Z => 2,
        }
    }
}

/// Which of the four parallel cube edges an axis represents.
///
/// The two words name the min/max side of the cube along the two other
/// coordinates, in x, y, z order (for an X axis: y then z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisPosition {
    #[default]
    MinMin,
    MinMax,
    MaxMax,
    MaxMin,
}

impl AxisPosition {
    /// All slots in table order.
    pub const ALL: [AxisPosition; 4] = [
        AxisPosition::MinMin,
        AxisPosition::MinMax,
        AxisPosition::MaxMax,
        AxisPosition::MaxMin,
    ];

    /// Column index in per-slot lookup tables.
    pub fn index(self) -> usize {
        match self {
            AxisPosition::MinMin => 0,
            AxisPosition::MinMax => 1,
            AxisPosition::MaxMax => 2,
            AxisPosition::MaxMin => 3,
        }
    }
}

/// An axis endpoint, either fixed in the world or pinned to the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisCoordinate {
    /// World coordinates
    World(DVec3),
    /// Display pixels plus normalized depth
    Display(DVec3),
}

impl AxisCoordinate {
    /// Resolve to world coordinates against `viewport`.
    pub fn resolve(&self, viewport: &dyn Viewport) -> Option<DVec3> {
        match *self {
            AxisCoordinate::World(p) => Some(p),
            AxisCoordinate::Display(p) => viewport.display_to_world(p),
        }
    }

    /// The world point, when known without a viewport.
    pub fn world(&self) -> Option<DVec3> {
        match *self {
            AxisCoordinate::World(p) => Some(p),
            AxisCoordinate::Display(_) => None,
        }
    }
}

/// What a follower needs from its reference axis.
pub trait AxisSource {
    /// First endpoint in world coordinates.
    fn point1(&self, viewport: &dyn Viewport) -> Option<DVec3>;
    /// Second endpoint in world coordinates.
    fn point2(&self, viewport: &dyn Viewport) -> Option<DVec3>;
    /// Logical type of the axis.
    fn axis_type(&self) -> AxisType;
    /// Cube edge the axis represents.
    fn axis_position(&self) -> AxisPosition;
    /// World bounds of the axis geometry.
    fn bounds(&self) -> BoundingBox;
    /// Generation of the last change.
    fn modified(&self) -> Generation;
}

/// Shared axis owned by the scene.
pub type SharedAxis = Shared<dyn AxisSource>;

/// Non-owning axis reference held by followers.
pub type AxisHandle = WeakHandle<dyn AxisSource>;

/// A plain axis segment.
#[derive(Debug, Clone)]
pub struct AxisActor {
    point1: AxisCoordinate,
    point2: AxisCoordinate,
    axis_type: AxisType,
    axis_position: AxisPosition,
    bounds: Option<BoundingBox>,
    modified: Generation,
}

impl AxisActor {
    /// Create an axis between two world points.
    pub fn new(point1: DVec3, point2: DVec3, axis_type: AxisType, axis_position: AxisPosition) -> Self {
        Self {
            point1: AxisCoordinate::World(point1),
            point2: AxisCoordinate::World(point2),
            axis_type,
            axis_position,
            bounds: None,
            modified: Generation::next(),
        }
    }

    /// Set both endpoints.
    pub fn set_points(&mut self, point1: AxisCoordinate, point2: AxisCoordinate) {
        self.point1 = point1;
        self.point2 = point2;
        self.modified = Generation::next();
    }

    /// Override the bounds reported to followers; `None` derives them from
    /// the world endpoints.
    pub fn set_bounds(&mut self, bounds: Option<BoundingBox>) {
        self.bounds = bounds;
        self.modified = Generation::next();
    }

    /// Change the logical type.
    pub fn set_axis_type(&mut self, axis_type: AxisType) {
        self.axis_type = axis_type;
        self.modified = Generation::next();
    }

    /// Change the cube edge.
    pub fn set_axis_position(&mut self, axis_position: AxisPosition) {
        self.axis_position = axis_position;
        self.modified = Generation::next();
    }
}

impl AxisSource for AxisActor {
    fn point1(&self, viewport: &dyn Viewport) -> Option<DVec3> {
        self.point1.resolve(viewport)
    }

    fn point2(&self, viewport: &dyn Viewport) -> Option<DVec3> {
        self.point2.resolve(viewport)
    }

    fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    fn axis_position(&self) -> AxisPosition {
        self.axis_position
    }

    fn bounds(&self) -> BoundingBox {
        self.bounds.unwrap_or_else(|| {
            BoundingBox::from_points([self.point1.world(), self.point2.world()].into_iter().flatten())
        })
    }

    fn modified(&self) -> Generation {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::SceneViewport;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_bounds_from_world_points() {
        let axis = AxisActor::new(
            DVec3::ZERO,
            DVec3::new(3.0, 4.0, 0.0),
            AxisType::X,
            AxisPosition::MinMin,
        );
        assert_eq!(axis.bounds().diagonal_length(), 5.0);
    }

    #[test]
    fn test_explicit_bounds_override() {
        let mut axis = AxisActor::new(DVec3::ZERO, DVec3::X, AxisType::X, AxisPosition::MinMin);
        let bbox = BoundingBox::from_bounds([0.0, 10.0, 0.0, 0.0, 0.0, 0.0]);
        axis.set_bounds(Some(bbox));
        assert_eq!(axis.bounds(), bbox);
    }

    #[test]
    fn test_display_coordinate_resolves_through_viewport() {
        let viewport = SceneViewport::new(200, 200);
        let center = viewport.world_to_display(DVec3::ZERO).unwrap();
        let coord = AxisCoordinate::Display(center);
        let world = coord.resolve(&viewport).unwrap();
        assert!(world.abs_diff_eq(DVec3::ZERO, 1e-9));
        assert!(coord.world().is_none());
    }

    #[test]
    fn test_shared_axis_through_handle() {
        let axis: SharedAxis = Rc::new(RefCell::new(AxisActor::new(
            DVec3::ZERO,
            DVec3::Y,
            AxisType::Y,
            AxisPosition::MaxMin,
        )));
        let handle = AxisHandle::new(&axis);
        let ty = handle.upgrade().map(|a| a.borrow().axis_type());
        assert_eq!(ty, Some(AxisType::Y));
        drop(axis);
        assert!(handle.upgrade().is_none());
    }
}
