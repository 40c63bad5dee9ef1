//! Pointer input and the widget host

use glam::DVec2;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary button
    #[default]
    Left,
    /// Wheel button
    Middle,
    /// Secondary button
    Right,
}

/// What happened to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button went down
    Press,
    /// Pointer moved
    Move,
    /// Button went up
    Release,
}

/// Pointer event in display coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Press, move or release
    pub kind: PointerEventKind,
    /// Button pressed or released, `None` for moves
    pub button: Option<PointerButton>,
    /// Pointer position in pixels
    pub position: DVec2,
}

impl PointerEvent {
    /// Button press at `position`.
    pub fn press(button: PointerButton, position: DVec2) -> Self {
        Self {
            kind: PointerEventKind::Press,
            button: Some(button),
            position,
        }
    }

    /// Pointer motion to `position`.
    pub fn moved(position: DVec2) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: None,
            position,
        }
    }

    /// Button release at `position`.
    pub fn release(button: PointerButton, position: DVec2) -> Self {
        Self {
            kind: PointerEventKind::Release,
            button: Some(button),
            position,
        }
    }
}

/// Widget-level action a pointer event maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Start an interaction
    Select,
    /// Continue an interaction
    Move,
    /// Finish an interaction
    EndSelect,
}

/// Maps pointer events to widget actions for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTranslator {
    /// Button that selects
    pub button: PointerButton,
}

impl EventTranslator {
    /// Translator bound to `button`.
    pub fn new(button: PointerButton) -> Self {
        Self { button }
    }

    /// Action for `event`, or `None` if it concerns another button.
    pub fn translate(&self, event: &PointerEvent) -> Option<WidgetAction> {
        match event.kind {
            PointerEventKind::Move => Some(WidgetAction::Move),
            PointerEventKind::Press if event.button == Some(self.button) => {
                Some(WidgetAction::Select)
            }
            PointerEventKind::Release if event.button == Some(self.button) => {
                Some(WidgetAction::EndSelect)
            }
            _ => None,
        }
    }
}

/// Where a widget lives: the render window and its interactor.
pub trait WidgetHost {
    /// Whether a display position falls inside the widget's viewport.
    fn is_in_viewport(&self, position: DVec2) -> bool;

    /// Redraw now.
    fn render(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_configured_button() {
        let translator = EventTranslator::default();
        let pos = DVec2::new(1.0, 2.0);
        assert_eq!(
            translator.translate(&PointerEvent::press(PointerButton::Left, pos)),
            Some(WidgetAction::Select)
        );
        assert_eq!(
            translator.translate(&PointerEvent::moved(pos)),
            Some(WidgetAction::Move)
        );
        assert_eq!(
            translator.translate(&PointerEvent::release(PointerButton::Left, pos)),
            Some(WidgetAction::EndSelect)
        );
    }

    #[test]
    fn test_other_buttons_ignored() {
        let translator = EventTranslator::new(PointerButton::Middle);
        let pos = DVec2::ZERO;
        assert_eq!(
            translator.translate(&PointerEvent::press(PointerButton::Left, pos)),
            None
        );
        assert_eq!(
            translator.translate(&PointerEvent::release(PointerButton::Right, pos)),
            None
        );
    }
}
