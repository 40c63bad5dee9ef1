//! Annotation Kit Core
//!
//! Shared building blocks for axis-following labels and interactive widgets:
//!
//! - [`camera::Camera`] / [`viewport::Viewport`] - what annotations read from the renderer
//! - [`axis::AxisSource`] - the reference axis a label follows
//! - [`handle::WeakHandle`] - non-owning back-references to scene objects
//! - [`modified::Generation`] - global modification clock for lazy rebuilds
//! - [`observer::Observers`] - typed callback registry
//! - [`config`] - RON-serializable settings

pub mod axis;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod handle;
pub mod modified;
pub mod observer;
pub mod viewport;

// Re-exports for convenience
pub use axis::{AxisActor, AxisCoordinate, AxisHandle, AxisPosition, AxisSource, AxisType, SharedAxis};
pub use bounds::BoundingBox;
pub use camera::{Camera, OrbitCamera};
pub use config::{AnimationMode, AnnotationConfig, CameraConfig, FollowerConfig, SliderConfig};
pub use error::ConfigError;
pub use handle::{Shared, WeakHandle};
pub use modified::Generation;
pub use observer::{ObserverId, Observers};
pub use viewport::{SceneViewport, Viewport};
