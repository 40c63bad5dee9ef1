//! Annotation configuration structures
//!
//! This module provides configurable settings for followers, sliders and the
//! demo camera that can be serialized and loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::OrbitCamera;
use crate::constants;
use crate::error::ConfigError;

/// Axis follower configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowerConfig {
    /// Rotate and scale about the label geometry's center instead of the origin
    pub auto_center: bool,
    /// Hide labels far from the camera
    pub enable_distance_lod: bool,
    /// Fraction of the far clip distance beyond which labels hide (0..1)
    pub distance_lod_threshold: f64,
    /// Hide labels seen nearly edge-on
    pub enable_view_angle_lod: bool,
    /// Minimum |cos| between the view ray and the label normal (0..1)
    pub view_angle_lod_threshold: f64,
    /// Horizontal and vertical label offset from the axis, in pixels
    pub screen_offset_vector: [f64; 2],
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self::text_label()
    }
}

impl FollowerConfig {
    /// Defaults for text labels following an axis
    pub fn text_label() -> Self {
        Self {
            auto_center: true,
            enable_distance_lod: false,
            distance_lod_threshold: constants::follower::DISTANCE_LOD_THRESHOLD,
            enable_view_angle_lod: true,
            view_angle_lod_threshold: constants::follower::VIEW_ANGLE_LOD_THRESHOLD,
            screen_offset_vector: [0.0, constants::follower::SCREEN_OFFSET],
        }
    }

    /// Defaults for 3D props following an axis
    pub fn prop3d() -> Self {
        Self {
            distance_lod_threshold: constants::follower::PROP3D_DISTANCE_LOD_THRESHOLD,
            view_angle_lod_threshold: constants::follower::PROP3D_VIEW_ANGLE_LOD_THRESHOLD,
            ..Self::text_label()
        }
    }

    /// Copy with thresholds clamped to [0, 1] and finite offsets
    pub fn sanitized(&self) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            distance_lod_threshold: clamp_unit(self.distance_lod_threshold),
            view_angle_lod_threshold: clamp_unit(self.view_angle_lod_threshold),
            screen_offset_vector: self.screen_offset_vector.map(finite_or_zero),
            ..self.clone()
        }
    }
}

/// How the slider reacts when the tube or an end cap is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationMode {
    /// Clicking the tube or caps does nothing
    Off,
    /// The value jumps to the clicked position
    Jump,
    /// The value moves to the clicked position in a fixed number of steps
    #[default]
    Animate,
}

/// Slider widget configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderConfig {
    /// Lower end of the value range
    pub minimum_value: f64,
    /// Upper end of the value range
    pub maximum_value: f64,
    /// Initial value
    pub value: f64,
    /// Bead length as a fraction of the tube length
    pub slider_length: f64,
    /// Bead width as a fraction of the tube length
    pub slider_width: f64,
    /// Tube width as a fraction of the tube length
    pub tube_width: f64,
    /// End cap length as a fraction of the tube length
    pub end_cap_length: f64,
    /// End cap width as a fraction of the tube length
    pub end_cap_width: f64,
    /// Reaction to tube and cap clicks
    pub animation_mode: AnimationMode,
    /// Steps used by [`AnimationMode::Animate`]
    pub number_of_animation_steps: u32,
    /// Significant digits in the value label
    pub label_precision: usize,
}

impl Default for SliderConfig {
    fn default() -> Self {
        use constants::slider as s;
        Self {
            minimum_value: s::MINIMUM_VALUE,
            maximum_value: s::MAXIMUM_VALUE,
            value: s::MINIMUM_VALUE,
            slider_length: s::SLIDER_LENGTH,
            slider_width: s::SLIDER_WIDTH,
            tube_width: s::TUBE_WIDTH,
            end_cap_length: s::END_CAP_LENGTH,
            end_cap_width: s::END_CAP_WIDTH,
            animation_mode: AnimationMode::default(),
            number_of_animation_steps: s::ANIMATION_STEPS,
            label_precision: s::LABEL_PRECISION,
        }
    }
}

impl SliderConfig {
    /// Copy with non-negative shape fractions and at least one animation step
    pub fn sanitized(&self) -> Self {
        let fraction = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            slider_length: fraction(self.slider_length).min(1.0),
            slider_width: fraction(self.slider_width),
            tube_width: fraction(self.tube_width),
            end_cap_length: fraction(self.end_cap_length),
            end_cap_width: fraction(self.end_cap_width),
            number_of_animation_steps: self.number_of_animation_steps.max(1),
            ..self.clone()
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub view_angle_degrees: f64,
    /// Near clipping plane distance
    pub near_plane: f64,
    /// Far clipping plane distance
    pub far_plane: f64,
    /// Orthographic instead of perspective projection
    pub parallel_projection: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_angle_degrees: constants::camera::VIEW_ANGLE_DEGREES,
            near_plane: constants::camera::NEAR_PLANE,
            far_plane: constants::camera::FAR_PLANE,
            parallel_projection: false,
        }
    }
}

impl CameraConfig {
    /// Apply these settings to a camera
    pub fn apply(&self, camera: &mut OrbitCamera) {
        camera.set_fov_degrees(self.view_angle_degrees);
        camera.set_clipping_range(self.near_plane, self.far_plane);
        camera.set_parallel_projection(self.parallel_projection);
    }
}

/// Complete annotation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotationConfig {
    /// Text label follower settings
    #[serde(default)]
    pub follower: FollowerConfig,
    /// 3D prop follower settings
    #[serde(default = "FollowerConfig::prop3d")]
    pub prop_follower: FollowerConfig,
    /// Slider settings
    #[serde(default)]
    pub slider: SliderConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            follower: FollowerConfig::text_label(),
            prop_follower: FollowerConfig::prop3d(),
            slider: SliderConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl AnnotationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize the configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded annotation config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
