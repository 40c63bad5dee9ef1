//! Interactive widgets
//!
//! A widget pairs a state machine that consumes pointer input with a
//! representation that owns the geometry, the hit testing and the value.

pub mod event;
pub mod shapes;
pub mod slider;

pub use ak_core::AnimationMode;
pub use event::{EventTranslator, PointerButton, PointerEvent, PointerEventKind, WidgetAction, WidgetHost};
pub use slider::{
    InteractionState, RepresentationEvent, SliderEvent, SliderRepresentation, SliderShapes,
    SliderWidget, WidgetState,
};
