//! Display-space shape hit tests
//!
//! Widget parts are drawn as rectangles aligned with the widget's own axis,
//! so picking reduces to projecting the pointer onto that axis.

use glam::DVec2;

/// Below this squared length a segment counts as a point.
const DEGENERATE_LENGTH_SQ: f64 = 1e-12;

/// Projection of a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Parameter along the segment, 0 at `start` and 1 at `end`. Not clamped.
    pub t: f64,
    /// Distance from the point to the infinite line through the segment.
    pub distance: f64,
}

/// Project `point` onto the line through `start` and `end`.
///
/// Returns `None` if the segment has no length.
pub fn project_onto_segment(point: DVec2, start: DVec2, end: DVec2) -> Option<SegmentProjection> {
    let line = end - start;
    let length_sq = line.length_squared();
    if length_sq < DEGENERATE_LENGTH_SQ {
        return None;
    }

    let t = (point - start).dot(line) / length_sq;
    let foot = start + line * t;
    Some(SegmentProjection {
        t,
        distance: (point - foot).length(),
    })
}

/// Rectangle whose long side runs along `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    /// Center in display coordinates
    pub center: DVec2,
    /// Unit direction of the long side
    pub axis: DVec2,
    /// Half extent along `axis`
    pub half_length: f64,
    /// Half extent across `axis`
    pub half_width: f64,
}

impl OrientedRect {
    /// Rectangle covering the segment `start → end` with the given full width.
    ///
    /// A zero-length segment yields an empty rectangle at `start`.
    pub fn along(start: DVec2, end: DVec2, width: f64) -> Self {
        let line = end - start;
        let length = line.length();
        Self {
            center: (start + end) * 0.5,
            axis: line.try_normalize().unwrap_or(DVec2::X),
            half_length: length * 0.5,
            half_width: width * 0.5,
        }
    }

    /// Rectangle centered at `center`.
    pub fn centered(center: DVec2, axis: DVec2, length: f64, width: f64) -> Self {
        Self {
            center,
            axis: axis.try_normalize().unwrap_or(DVec2::X),
            half_length: length * 0.5,
            half_width: width * 0.5,
        }
    }

    /// Whether `point` lies inside or on the border.
    pub fn contains(&self, point: DVec2) -> bool {
        if self.half_length <= 0.0 || self.half_width <= 0.0 {
            return false;
        }
        let local = point - self.center;
        local.dot(self.axis).abs() <= self.half_length
            && local.dot(self.axis.perp()).abs() <= self.half_width
    }

    /// Corners counter-clockwise, starting behind and to the right of the center.
    pub fn corners(&self) -> [DVec2; 4] {
        let along = self.axis * self.half_length;
        let across = self.axis.perp() * self.half_width;
        [
            self.center - along - across,
            self.center + along - across,
            self.center + along + across,
            self.center - along + across,
        ]
    }
}
