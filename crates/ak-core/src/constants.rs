//! Global constants for the annotation kit

/// Camera defaults
pub mod camera {
    /// Initial eye distance from the focal point
    pub const DISTANCE: f64 = 10.0;
    /// Vertical field of view in degrees
    pub const VIEW_ANGLE_DEGREES: f64 = 30.0;
    /// Near clipping plane distance
    pub const NEAR_PLANE: f64 = 0.1;
    /// Far clipping plane distance
    pub const FAR_PLANE: f64 = 1000.0;
    /// Pan speed relative to the eye distance
    pub const PAN_SENSITIVITY: f64 = 0.002;
    /// Fraction of the distance covered per zoom step
    pub const ZOOM_SENSITIVITY: f64 = 0.1;
    /// Closest zoom distance
    pub const MIN_DISTANCE: f64 = 0.1;
    /// Farthest zoom distance
    pub const MAX_DISTANCE: f64 = 10000.0;
}

/// Axis follower defaults
pub mod follower {
    /// Vertical screen offset of a label from its axis, in pixels
    pub const SCREEN_OFFSET: f64 = 10.0;
    /// Distance LOD threshold (fraction of the far clip distance) for text labels
    pub const DISTANCE_LOD_THRESHOLD: f64 = 0.80;
    /// View angle LOD threshold for text labels
    pub const VIEW_ANGLE_LOD_THRESHOLD: f64 = 0.34;
    /// Distance LOD threshold for followed 3D props
    pub const PROP3D_DISTANCE_LOD_THRESHOLD: f64 = 0.70;
    /// View angle LOD threshold for followed 3D props
    pub const PROP3D_VIEW_ANGLE_LOD_THRESHOLD: f64 = 0.30;
    /// Below this squared length two directions count as parallel
    pub const PARALLEL_EPSILON: f64 = 1e-12;
}

/// Slider defaults, lengths are fractions of the tube length
pub mod slider {
    /// Length of the slider bead
    pub const SLIDER_LENGTH: f64 = 0.05;
    /// Width of the slider bead
    pub const SLIDER_WIDTH: f64 = 0.05;
    /// Width of the tube
    pub const TUBE_WIDTH: f64 = 0.025;
    /// Length of each end cap
    pub const END_CAP_LENGTH: f64 = 0.025;
    /// Width of each end cap
    pub const END_CAP_WIDTH: f64 = 0.05;
    /// Steps used by the animated transition
    pub const ANIMATION_STEPS: u32 = 24;
    /// Default value range
    pub const MINIMUM_VALUE: f64 = 0.0;
    /// Default value range
    pub const MAXIMUM_VALUE: f64 = 1.0;
    /// Significant digits in the value label
    pub const LABEL_PRECISION: usize = 3;
}
