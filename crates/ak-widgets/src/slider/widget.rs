//! Slider widget
//!
//! Drives a [`SliderRepresentation`] from pointer input. Pressing the bead
//! starts a drag; pressing the tube or an end cap moves the value there on
//! release, either at once or in a short animation.
//!
//! ```text
//! Start --press on bead--------> Sliding ---release--> Start
//! Start --press on tube or cap--> Animating --release--> (jump/animate) --> Start
//! ```

use ak_core::{AnimationMode, ObserverId, Observers, SliderConfig};
use glam::DVec2;

use super::representation::{InteractionState, SliderRepresentation};
use crate::event::{EventTranslator, PointerEvent, WidgetAction, WidgetHost};

/// Widget interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Idle, waiting for a press
    #[default]
    Start,
    /// Dragging the bead
    Sliding,
    /// Pressed on the tube or a cap, waiting for the release
    Animating,
}

/// Events published by the widget, always in the order
/// `StartInteraction`, any number of `Interaction`, `EndInteraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Press accepted
    StartInteraction,
    /// Value moved during the interaction
    Interaction {
        /// Value after the step
        value: f64,
    },
    /// Pointer released
    EndInteraction,
}

/// Interactive slider
#[derive(Debug)]
pub struct SliderWidget {
    representation: SliderRepresentation,
    state: WidgetState,
    enabled: bool,
    has_focus: bool,
    animation_mode: AnimationMode,
    number_of_animation_steps: u32,
    translator: EventTranslator,
    observers: Observers<SliderEvent>,
}

impl Default for SliderWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderWidget {
    /// Slider with the default config.
    pub fn new() -> Self {
        Self::with_config(&SliderConfig::default())
    }

    /// Slider with representation and animation settings from `config`.
    pub fn with_config(config: &SliderConfig) -> Self {
        let config = config.sanitized();
        Self {
            representation: SliderRepresentation::with_config(&config),
            state: WidgetState::Start,
            enabled: true,
            has_focus: false,
            animation_mode: config.animation_mode,
            number_of_animation_steps: config.number_of_animation_steps,
            translator: EventTranslator::default(),
            observers: Observers::new(),
        }
    }

    /// Geometry and value model.
    pub fn representation(&self) -> &SliderRepresentation {
        &self.representation
    }

    /// Mutable geometry and value model.
    pub fn representation_mut(&mut self) -> &mut SliderRepresentation {
        &mut self.representation
    }

    /// Current interaction state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Ignore presses while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether presses are handled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the widget holds the pointer focus
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// How tube and cap clicks move the value.
    pub fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.animation_mode = mode;
    }

    /// Current animation mode.
    pub fn animation_mode(&self) -> AnimationMode {
        self.animation_mode
    }

    /// Steps of the animated transition, at least one.
    pub fn set_number_of_animation_steps(&mut self, steps: u32) {
        self.number_of_animation_steps = steps.max(1);
    }

    /// Steps of the animated transition.
    pub fn number_of_animation_steps(&self) -> u32 {
        self.number_of_animation_steps
    }

    /// Rebind the pointer button that operates the slider.
    pub fn set_translator(&mut self, translator: EventTranslator) {
        self.translator = translator;
    }

    /// Subscribe to interaction events.
    pub fn add_observer(&mut self, callback: impl FnMut(&SliderEvent) + 'static) -> ObserverId {
        self.observers.add(callback)
    }

    /// Unsubscribe. Returns false for an unknown id.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // ========== Actions ==========

    /// Pointer press. Returns true if the press hit the slider.
    pub fn select_action(&mut self, host: &mut dyn WidgetHost, position: DVec2) -> bool {
        if !self.enabled || self.state != WidgetState::Start {
            return false;
        }
        if !host.is_in_viewport(position) {
            return false;
        }

        let region = self.representation.start_widget_interaction(position);
        if region == InteractionState::Outside {
            return false;
        }

        self.has_focus = true;
        self.representation.highlight(true);
        self.state = if region == InteractionState::Slider {
            WidgetState::Sliding
        } else {
            WidgetState::Animating
        };
        tracing::debug!("SliderWidget: {region:?} selected, state {:?}", self.state);

        self.observers.notify(&SliderEvent::StartInteraction);
        host.render();
        true
    }

    /// Pointer move. Only drags while sliding.
    pub fn move_action(&mut self, host: &mut dyn WidgetHost, position: DVec2) -> bool {
        if self.state != WidgetState::Sliding {
            return false;
        }

        self.representation.widget_interaction(position);
        self.observers.notify(&SliderEvent::Interaction {
            value: self.representation.value(),
        });
        host.render();
        true
    }

    /// Pointer release. Finishes a tube or cap click, then returns to `Start`.
    pub fn end_select_action(&mut self, host: &mut dyn WidgetHost) -> bool {
        if self.state == WidgetState::Start {
            return false;
        }
        if self.state == WidgetState::Animating {
            self.animate_slider(host);
        }

        self.representation.highlight(false);
        self.representation.set_interaction_state(InteractionState::Outside);
        self.state = WidgetState::Start;
        self.has_focus = false;
        tracing::debug!(
            "SliderWidget: released at value {}",
            self.representation.value()
        );

        self.observers.notify(&SliderEvent::EndInteraction);
        host.render();
        true
    }

    /// Move the value to the clicked tube position or cap.
    ///
    /// In [`AnimationMode::Animate`] this blocks for all steps, rendering after
    /// each one so the bead is seen moving.
    pub fn animate_slider(&mut self, host: &mut dyn WidgetHost) {
        let rep = &self.representation;
        let target = match rep.interaction_state() {
            InteractionState::Tube => rep.value_at(rep.picked_t()),
            InteractionState::LeftCap => rep.minimum_value(),
            InteractionState::RightCap => rep.maximum_value(),
            InteractionState::Outside | InteractionState::Slider => return,
        };

        match self.animation_mode {
            AnimationMode::Off => {}
            AnimationMode::Jump => {
                self.representation.set_value(target);
                self.observers.notify(&SliderEvent::Interaction {
                    value: self.representation.value(),
                });
            }
            AnimationMode::Animate => {
                let start = self.representation.value();
                let steps = self.number_of_animation_steps.max(1);
                for step in 1..=steps {
                    let fraction = step as f64 / steps as f64;
                    self.representation
                        .set_value(start + fraction * (target - start));
                    self.representation.build_representation();
                    let value = self.representation.value();
                    tracing::trace!("SliderWidget: animation step {step}/{steps} value {value}");
                    self.observers.notify(&SliderEvent::Interaction { value });
                    host.render();
                }
            }
        }
    }

    /// Feed a raw pointer event. Returns true if the widget consumed it.
    pub fn process_event(&mut self, host: &mut dyn WidgetHost, event: &PointerEvent) -> bool {
        match self.translator.translate(event) {
            Some(WidgetAction::Select) => self.select_action(host, event.position),
            Some(WidgetAction::Move) => self.move_action(host, event.position),
            Some(WidgetAction::EndSelect) => self.end_select_action(host),
            None => false,
        }
    }
}
