//! Bounding boxes of axes and props

use glam::{DMat4, DVec3};

/// Box aligned with the world axes, stored as two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point expands into a valid one.
    pub fn empty() -> Self {
        Self::new(DVec3::INFINITY, DVec3::NEG_INFINITY)
    }

    /// From the flat `[xmin, xmax, ymin, ymax, zmin, zmax]` layout.
    pub fn from_bounds(bounds: [f64; 6]) -> Self {
        let [x0, x1, y0, y1, z0, z1] = bounds;
        Self::new(DVec3::new(x0, y0, z0), DVec3::new(x1, y1, z1))
    }

    /// Flat `[xmin, xmax, ymin, ymax, zmin, zmax]` layout.
    pub fn to_bounds(&self) -> [f64; 6] {
        let (lo, hi) = (self.min, self.max);
        [lo.x, hi.x, lo.y, hi.y, lo.z, hi.z]
    }

    /// Smallest box around `points`; empty if there are none.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |acc, p| acc.expand_to_include(p))
    }

    pub fn center(&self) -> DVec3 {
        self.min.lerp(self.max, 0.5)
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the min-to-max diagonal. Zero for an invalid box.
    pub fn diagonal_length(&self) -> f64 {
        if self.is_valid() {
            self.size().length()
        } else {
            0.0
        }
    }

    /// Inclusive of the faces.
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn expand_to_include(&self, point: DVec3) -> BoundingBox {
        Self::new(self.min.min(point), self.max.max(point))
    }

    /// Box around the eight transformed corners.
    pub fn transform(&self, matrix: &DMat4) -> BoundingBox {
        let (lo, hi) = (self.min, self.max);
        Self::from_points((0..8).map(|i| {
            let corner = DVec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            matrix.transform_point3(corner)
        }))
    }

    /// False for the empty box and for boxes with swapped corners.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
