//! Axis-following billboard labels
//!
//! Labels of a cube or polar axes read along their axis, stay upright for
//! any camera, keep a fixed pixel distance from the axis and fade out by
//! distance or grazing angle.
//!
//! - [`AxisFollower`] - a label with its own geometry
//! - [`Prop3DAxisFollower`] - drives the user matrix of another prop
//! - [`basis`], [`autoscale`], [`lod`], [`reference`], [`transform`] - the
//!   building blocks, usable on their own

pub mod autoscale;
pub mod basis;
pub mod follower;
pub mod geometry;
pub mod instance;
pub mod lod;
pub mod prop3d_follower;
pub mod reference;
pub mod transform;

pub use basis::OrthoBasis;
pub use follower::AxisFollower;
pub use geometry::{LabelGeometry, QuadLabel};
pub use instance::LabelInstance;
pub use lod::LodSettings;
pub use prop3d_follower::{FollowedProp, Prop3DAxisFollower};
pub use transform::TransformParts;
