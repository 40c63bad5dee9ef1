//! Slider widget and representation

mod representation;
mod widget;

pub use representation::{InteractionState, RepresentationEvent, SliderRepresentation, SliderShapes};
pub use widget::{SliderEvent, SliderWidget, WidgetState};
