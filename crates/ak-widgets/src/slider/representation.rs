//! Slider representation
//!
//! Geometry and value model of a 2D slider: a tube between two display
//! points, a bead that marks the current value and an end cap at each side.
//! Every length is a fraction of the tube length, so the slider scales with
//! its placement.

use ak_core::{Generation, ObserverId, Observers, SliderConfig, Viewport};
use glam::{DVec2, DVec3};

use crate::shapes::{OrientedRect, project_onto_segment};

/// Below this the bead fills the whole tube and picking falls back to the current value.
const MIN_TRAVEL: f64 = 1e-9;

/// Part of the slider under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Nothing hit
    #[default]
    Outside,
    /// The tube between the caps
    Tube,
    /// Cap at the minimum end
    LeftCap,
    /// Cap at the maximum end
    RightCap,
    /// The bead
    Slider,
}

/// Events published by the representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepresentationEvent {
    /// Value or range changed. Carries the value after clamping.
    ValueChanged {
        /// New value
        value: f64,
    },
}

/// Display-space shapes of the slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderShapes {
    /// Track between the two endpoints
    pub tube: OrientedRect,
    /// Draggable bead at the current value
    pub bead: OrientedRect,
    /// Cap behind the first endpoint
    pub left_cap: OrientedRect,
    /// Cap beyond the second endpoint
    pub right_cap: OrientedRect,
}

/// Slider geometry, hit testing and value model
#[derive(Debug)]
pub struct SliderRepresentation {
    point1: DVec2,
    point2: DVec2,

    minimum_value: f64,
    maximum_value: f64,
    value: f64,
    current_t: f64,
    picked_t: f64,

    slider_length: f64,
    slider_width: f64,
    tube_width: f64,
    end_cap_length: f64,
    end_cap_width: f64,
    label_precision: usize,

    highlighted: bool,
    interaction_state: InteractionState,
    shapes: SliderShapes,
    observers: Observers<RepresentationEvent>,
    modified: Generation,
    build_time: Generation,
}

impl Default for SliderRepresentation {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderRepresentation {
    /// Representation with the default slider config.
    pub fn new() -> Self {
        Self::with_config(&SliderConfig::default())
    }

    /// Representation with range, value and shape fractions from `config`.
    ///
    /// The tube runs from (0, 0) to (1, 0) until [`place_widget`](Self::place_widget)
    /// or [`set_points`](Self::set_points) is called.
    pub fn with_config(config: &SliderConfig) -> Self {
        let config = config.sanitized();
        let empty = OrientedRect::centered(DVec2::ZERO, DVec2::X, 0.0, 0.0);
        let mut rep = Self {
            point1: DVec2::ZERO,
            point2: DVec2::X,
            minimum_value: 0.0,
            maximum_value: 1.0,
            value: 0.0,
            current_t: 0.0,
            picked_t: 0.0,
            slider_length: config.slider_length,
            slider_width: config.slider_width,
            tube_width: config.tube_width,
            end_cap_length: config.end_cap_length,
            end_cap_width: config.end_cap_width,
            label_precision: config.label_precision,
            highlighted: false,
            interaction_state: InteractionState::Outside,
            shapes: SliderShapes {
                tube: empty,
                bead: empty,
                left_cap: empty,
                right_cap: empty,
            },
            observers: Observers::new(),
            modified: Generation::next(),
            build_time: Generation::NEVER,
        };
        rep.set_maximum_value(config.maximum_value);
        rep.set_minimum_value(config.minimum_value);
        rep.set_value(config.value);
        rep.build_representation();
        rep
    }

    fn touch(&mut self) {
        self.modified = Generation::next();
    }

    /// Generation of the last change.
    pub fn modified(&self) -> Generation {
        self.modified
    }

    /// Generation at which the shapes were last rebuilt.
    pub fn build_time(&self) -> Generation {
        self.build_time
    }

    // ========== Placement ==========

    /// Tube endpoints in display coordinates.
    pub fn set_points(&mut self, point1: DVec2, point2: DVec2) {
        self.point1 = point1;
        self.point2 = point2;
        self.touch();
        self.build_representation();
    }

    /// First tube endpoint, the minimum end.
    pub fn point1(&self) -> DVec2 {
        self.point1
    }

    /// Second tube endpoint, the maximum end.
    pub fn point2(&self) -> DVec2 {
        self.point2
    }

    /// Tube length in pixels.
    pub fn tube_length(&self) -> f64 {
        self.point1.distance(self.point2)
    }

    /// Place the tube between two world points as seen through `viewport`.
    ///
    /// Returns false and leaves the slider in place if either point cannot
    /// be projected.
    pub fn place_widget(&mut self, viewport: &dyn Viewport, world1: DVec3, world2: DVec3) -> bool {
        let (Some(d1), Some(d2)) = (
            viewport.world_to_display(world1),
            viewport.world_to_display(world2),
        ) else {
            tracing::warn!("SliderRepresentation: cannot place widget without a camera");
            return false;
        };
        self.set_points(d1.truncate(), d2.truncate());
        true
    }

    // ========== Value model ==========

    /// Current value, always inside the range.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower end of the range.
    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    /// Upper end of the range.
    pub fn maximum_value(&self) -> f64 {
        self.maximum_value
    }

    /// Normalized position of the value in the range.
    pub fn current_t(&self) -> f64 {
        self.current_t
    }

    /// Parameter of the last tube or cap pick.
    pub fn picked_t(&self) -> f64 {
        self.picked_t
    }

    /// Set the value, clamped to the range.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::warn!("SliderRepresentation: rejected value {value}");
            return;
        }
        let value = value.clamp(self.minimum_value, self.maximum_value);
        if value == self.value {
            return;
        }
        self.value = value;
        self.value_changed();
    }

    /// Set the lower bound. A bound at or above the maximum pushes the
    /// maximum to `minimum + 1`, or to the next float where 1 is below
    /// the precision of `minimum`.
    pub fn set_minimum_value(&mut self, minimum: f64) {
        if !minimum.is_finite() {
            tracing::warn!("SliderRepresentation: rejected minimum {minimum}");
            return;
        }
        if minimum == self.minimum_value {
            return;
        }
        if minimum >= self.maximum_value {
            let Some(maximum) = step_above(minimum) else {
                tracing::warn!("SliderRepresentation: no room above minimum {minimum}");
                return;
            };
            self.maximum_value = maximum;
        }
        self.minimum_value = minimum;
        self.value = self.value.clamp(self.minimum_value, self.maximum_value);
        self.value_changed();
    }

    /// Set the upper bound. A bound at or below the minimum pulls the
    /// minimum to `maximum - 1`, or to the previous float.
    pub fn set_maximum_value(&mut self, maximum: f64) {
        if !maximum.is_finite() {
            tracing::warn!("SliderRepresentation: rejected maximum {maximum}");
            return;
        }
        if maximum == self.maximum_value {
            return;
        }
        if maximum <= self.minimum_value {
            let Some(minimum) = step_below(maximum) else {
                tracing::warn!("SliderRepresentation: no room below maximum {maximum}");
                return;
            };
            self.minimum_value = minimum;
        }
        self.maximum_value = maximum;
        self.value = self.value.clamp(self.minimum_value, self.maximum_value);
        self.value_changed();
    }

    fn value_changed(&mut self) {
        let span = self.maximum_value - self.minimum_value;
        let t = (self.value - self.minimum_value) / span;
        self.current_t = if span > 0.0 && t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.touch();
        self.build_representation();
        self.observers.notify(&RepresentationEvent::ValueChanged { value: self.value });
    }

    /// Value at normalized position `t` in the range.
    pub fn value_at(&self, t: f64) -> f64 {
        self.minimum_value + t * (self.maximum_value - self.minimum_value)
    }

    /// Subscribe to value changes.
    pub fn add_observer(&mut self, callback: impl FnMut(&RepresentationEvent) + 'static) -> ObserverId {
        self.observers.add(callback)
    }

    /// Unsubscribe. Returns false for an unknown id.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // ========== Appearance ==========

    /// Bead length as a fraction of the tube length.
    pub fn set_slider_length(&mut self, fraction: f64) {
        self.slider_length = fraction.clamp(0.0, 1.0);
        self.touch();
        self.build_representation();
    }

    /// Bead length fraction.
    pub fn slider_length(&self) -> f64 {
        self.slider_length
    }

    /// Bead width as a fraction of the tube length.
    pub fn set_slider_width(&mut self, fraction: f64) {
        self.slider_width = fraction.max(0.0);
        self.touch();
        self.build_representation();
    }

    /// Bead width fraction.
    pub fn slider_width(&self) -> f64 {
        self.slider_width
    }

    /// Tube width as a fraction of the tube length.
    pub fn set_tube_width(&mut self, fraction: f64) {
        self.tube_width = fraction.max(0.0);
        self.touch();
        self.build_representation();
    }

    /// Tube width fraction.
    pub fn tube_width(&self) -> f64 {
        self.tube_width
    }

    /// Cap length as a fraction of the tube length.
    pub fn set_end_cap_length(&mut self, fraction: f64) {
        self.end_cap_length = fraction.max(0.0);
        self.touch();
        self.build_representation();
    }

    /// Cap length fraction.
    pub fn end_cap_length(&self) -> f64 {
        self.end_cap_length
    }

    /// Cap width as a fraction of the tube length.
    pub fn set_end_cap_width(&mut self, fraction: f64) {
        self.end_cap_width = fraction.max(0.0);
        self.touch();
        self.build_representation();
    }

    /// Cap width fraction.
    pub fn end_cap_width(&self) -> f64 {
        self.end_cap_width
    }

    /// Significant digits in [`label_text`](Self::label_text).
    pub fn set_label_precision(&mut self, precision: usize) {
        self.label_precision = precision.max(1);
        self.touch();
    }

    /// Highlight the bead while it is being dragged.
    pub fn highlight(&mut self, on: bool) {
        if self.highlighted != on {
            self.highlighted = on;
            self.touch();
        }
    }

    /// Whether the bead is highlighted.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Value formatted with the label precision, trailing zeros removed.
    pub fn label_text(&self) -> String {
        format_significant(self.value, self.label_precision)
    }

    // ========== Interaction ==========

    /// Part hit by the last press.
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction_state
    }

    /// Override the hit part, e.g. to reset after a release.
    pub fn set_interaction_state(&mut self, state: InteractionState) {
        self.interaction_state = state;
    }

    /// Classify a press at `position` and remember the picked parameter.
    pub fn start_widget_interaction(&mut self, position: DVec2) -> InteractionState {
        let shapes = &self.shapes;
        let state = if shapes.bead.contains(position) {
            InteractionState::Slider
        } else if shapes.tube.contains(position) {
            self.picked_t = self.compute_pick_position(position);
            InteractionState::Tube
        } else if shapes.left_cap.contains(position) {
            self.picked_t = 0.0;
            InteractionState::LeftCap
        } else if shapes.right_cap.contains(position) {
            self.picked_t = 1.0;
            InteractionState::RightCap
        } else {
            InteractionState::Outside
        };

        tracing::debug!("SliderRepresentation: pick at {position:?} -> {state:?}");
        self.interaction_state = state;
        state
    }

    /// Normalized parameter of `position` along the tube, in [0, 1].
    ///
    /// The bead cannot travel the last half bead length at either end, so the
    /// projection is stretched around the center to match.
    pub fn compute_pick_position(&self, position: DVec2) -> f64 {
        let Some(projection) = project_onto_segment(position, self.point1, self.point2) else {
            return self.current_t;
        };
        let half = self.tube_length() * 0.5;
        let travel = half - self.slider_length * half;
        if travel <= MIN_TRAVEL {
            return self.current_t;
        }
        (0.5 + (projection.t - 0.5) * half / travel).clamp(0.0, 1.0)
    }

    /// Drag the bead to `position`.
    pub fn widget_interaction(&mut self, position: DVec2) {
        let t = self.compute_pick_position(position);
        self.set_value(self.value_at(t));
    }

    // ========== Geometry ==========

    /// Shapes from the last rebuild.
    pub fn shapes(&self) -> &SliderShapes {
        &self.shapes
    }

    /// Recompute bead, tube and cap shapes from the endpoints and value.
    pub fn build_representation(&mut self) {
        let length = self.tube_length();
        let axis = (self.point2 - self.point1).try_normalize().unwrap_or(DVec2::X);
        let center = (self.point1 + self.point2) * 0.5;

        let bead_length = self.slider_length * length;
        let travel = length * 0.5 - bead_length * 0.5;
        let bead_center = center + axis * (2.0 * self.current_t - 1.0) * travel;
        let cap_length = self.end_cap_length * length;

        self.shapes = SliderShapes {
            tube: OrientedRect::along(self.point1, self.point2, self.tube_width * length),
            bead: OrientedRect::centered(
                bead_center,
                axis,
                bead_length,
                self.slider_width * length,
            ),
            left_cap: OrientedRect::along(
                self.point1 - axis * cap_length,
                self.point1,
                self.end_cap_width * length,
            ),
            right_cap: OrientedRect::along(
                self.point2,
                self.point2 + axis * cap_length,
                self.end_cap_width * length,
            ),
        };
        self.build_time = Generation::next();
    }
}

/// Format like C's `%g`: `precision` significant digits, no trailing zeros.
fn format_significant(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (precision as i64 - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// `x + 1`, or the next float up when adding 1 is lost to rounding.
fn step_above(x: f64) -> Option<f64> {
    let y = if x + 1.0 > x { x + 1.0 } else { x.next_up() };
    y.is_finite().then_some(y)
}

fn step_below(x: f64) -> Option<f64> {
    let y = if x - 1.0 < x { x - 1.0 } else { x.next_down() };
    y.is_finite().then_some(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ak_core::SceneViewport;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ten_slider() -> SliderRepresentation {
        let mut rep = SliderRepresentation::new();
        rep.set_maximum_value(10.0);
        rep.set_points(DVec2::new(100.0, 100.0), DVec2::new(500.0, 100.0));
        rep
    }

    fn assert_invariant(rep: &SliderRepresentation) {
        assert!(rep.minimum_value() < rep.maximum_value());
        assert!(rep.minimum_value() <= rep.value() && rep.value() <= rep.maximum_value());
        assert!((0.0..=1.0).contains(&rep.current_t()));
        let expected =
            (rep.value() - rep.minimum_value()) / (rep.maximum_value() - rep.minimum_value());
        assert_relative_eq!(rep.current_t(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pick_center_and_ends() {
        let rep = ten_slider();
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(300.0, 100.0)), 0.5);
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(100.0, 100.0)), 0.0);
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(500.0, 100.0)), 1.0);
        // Off-axis points project onto the tube
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(300.0, 140.0)), 0.5);
    }

    #[test]
    fn test_pick_is_monotonic() {
        let rep = ten_slider();
        let mut last = -1.0;
        for x in (50..=550).step_by(7) {
            let t = rep.compute_pick_position(DVec2::new(x as f64, 103.0));
            assert!(t >= last, "t({x}) = {t} < {last}");
            last = t;
        }
    }

    #[test]
    fn test_pick_accounts_for_bead_length() {
        let rep = ten_slider();
        // Bead is 20px long, so the usable travel is 380px
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(224.0, 100.0)), 0.3, epsilon = 1e-12);
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(262.0, 100.0)), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_tube_keeps_current_t() {
        let mut rep = ten_slider();
        rep.set_value(7.0);
        rep.set_points(DVec2::splat(50.0), DVec2::splat(50.0));
        assert_relative_eq!(rep.compute_pick_position(DVec2::new(10.0, 10.0)), 0.7);
    }

    #[test]
    fn test_value_clamps_to_range() {
        let mut rep = ten_slider();
        rep.set_value(12.0);
        assert_eq!(rep.value(), 10.0);
        assert_eq!(rep.current_t(), 1.0);
        rep.set_value(-3.0);
        assert_eq!(rep.value(), 0.0);
        rep.set_value(f64::NAN);
        assert_eq!(rep.value(), 0.0);
        assert_invariant(&rep);
    }

    #[test]
    fn test_range_corrections_keep_invariant() {
        let mut rep = ten_slider();
        rep.set_value(5.0);

        rep.set_minimum_value(20.0);
        assert_eq!(rep.maximum_value(), 21.0);
        assert_eq!(rep.value(), 20.0);
        assert_invariant(&rep);

        rep.set_maximum_value(-4.0);
        assert_eq!(rep.minimum_value(), -5.0);
        assert_eq!(rep.value(), -4.0);
        assert_invariant(&rep);

        for (i, v) in [3.0, -10.0, 8.0, 0.5, 100.0].into_iter().enumerate() {
            match i % 3 {
                0 => rep.set_value(v),
                1 => rep.set_minimum_value(v),
                _ => rep.set_maximum_value(v),
            }
            assert_invariant(&rep);
        }
    }

    #[test]
    fn test_huge_bounds_keep_range_open() {
        let mut rep = ten_slider();
        rep.set_minimum_value(1e16);
        assert!(rep.maximum_value() > rep.minimum_value());
        assert_eq!(rep.maximum_value(), 1e16_f64.next_up());
        assert_invariant(&rep);

        rep.set_maximum_value(-1e17);
        assert!(rep.minimum_value() < rep.maximum_value());
        assert_invariant(&rep);

        // No float above the largest finite value
        rep.set_minimum_value(f64::MAX);
        assert_eq!(rep.maximum_value(), -1e17);
        assert_invariant(&rep);
    }

    #[test]
    fn test_value_changed_events() {
        let mut rep = ten_slider();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        rep.add_observer(move |e| sink.borrow_mut().push(*e));

        rep.set_value(4.0);
        rep.set_value(4.0);
        rep.set_value(10.0);
        rep.set_value(11.0);
        assert_eq!(
            *events.borrow(),
            vec![
                RepresentationEvent::ValueChanged { value: 4.0 },
                RepresentationEvent::ValueChanged { value: 10.0 },
            ]
        );
    }

    #[test]
    fn test_hit_regions() {
        let mut rep = ten_slider();
        // Bead sits at the left end for value 0
        assert_eq!(
            rep.start_widget_interaction(DVec2::new(110.0, 100.0)),
            InteractionState::Slider
        );
        assert_eq!(
            rep.start_widget_interaction(DVec2::new(224.0, 102.0)),
            InteractionState::Tube
        );
        assert_relative_eq!(rep.picked_t(), 0.3, epsilon = 1e-12);
        assert_eq!(
            rep.start_widget_interaction(DVec2::new(95.0, 105.0)),
            InteractionState::LeftCap
        );
        assert_eq!(rep.picked_t(), 0.0);
        assert_eq!(
            rep.start_widget_interaction(DVec2::new(505.0, 100.0)),
            InteractionState::RightCap
        );
        assert_eq!(rep.picked_t(), 1.0);
        assert_eq!(
            rep.start_widget_interaction(DVec2::new(300.0, 150.0)),
            InteractionState::Outside
        );
        assert_eq!(rep.interaction_state(), InteractionState::Outside);
    }

    #[test]
    fn test_bead_follows_value() {
        let mut rep = ten_slider();
        rep.set_value(5.0);
        assert!(rep.shapes().bead.center.abs_diff_eq(DVec2::new(300.0, 100.0), 1e-9));
        rep.set_value(10.0);
        assert!(rep.shapes().bead.center.abs_diff_eq(DVec2::new(490.0, 100.0), 1e-9));
    }

    #[test]
    fn test_widget_interaction_sets_value() {
        let mut rep = ten_slider();
        rep.widget_interaction(DVec2::new(262.0, 100.0));
        assert_relative_eq!(rep.value(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_place_widget_through_viewport() {
        let viewport = SceneViewport::new(400, 400);
        let mut rep = SliderRepresentation::new();
        assert!(rep.place_widget(&viewport, DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)));
        assert_relative_eq!(rep.point1().y, 200.0, epsilon = 1e-9);
        assert!(rep.point1().x < 200.0 && rep.point2().x > 200.0);

        let no_camera = SceneViewport::without_camera(400, 400);
        let before = rep.point1();
        assert!(!rep.place_widget(&no_camera, DVec3::ZERO, DVec3::X));
        assert_eq!(rep.point1(), before);
    }

    #[test]
    fn test_label_text() {
        let mut rep = ten_slider();
        rep.set_value(3.0);
        assert_eq!(rep.label_text(), "3");
        rep.set_value(3.14159);
        assert_eq!(rep.label_text(), "3.14");
        rep.set_label_precision(5);
        assert_eq!(rep.label_text(), "3.1416");
        assert_eq!(format_significant(0.0, 3), "0");
        assert_eq!(format_significant(0.012345, 2), "0.012");
    }

    #[test]
    fn test_highlight_toggles() {
        let mut rep = SliderRepresentation::new();
        rep.highlight(true);
        assert!(rep.is_highlighted());
        rep.highlight(false);
        assert!(!rep.is_highlighted());
    }
}
