use egui::{Modifiers, PointerButton, Pos2, Vec2};

/// Drag-to-move state. Holds at most one template, so two drags can never overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        template_id: String,
        /// Pointer position minus the template's on-screen anchor at press time.
        offset: Vec2,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PanState {
    #[default]
    Idle,
    Panning {
        last: Pos2,
    },
}

/// Which gesture a pointer press should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressAction {
    Pan,
    Drag(String),
    Ignore,
}

pub fn is_pan_modifier(modifiers: Modifiers) -> bool {
    modifiers.ctrl || modifiers.alt
}

/// Decides between panning and dragging for one press.
///
/// Pan eligibility is checked first, so a Ctrl or Alt press over a marker
/// pans the view instead of grabbing the marker. A primary press with any
/// other modifier held starts nothing.
pub fn classify_press(
    button: PointerButton,
    modifiers: Modifiers,
    hit_template: Option<&str>,
) -> PressAction {
    match button {
        PointerButton::Middle => PressAction::Pan,
        PointerButton::Primary if is_pan_modifier(modifiers) => PressAction::Pan,
        PointerButton::Primary if modifiers.is_none() => match hit_template {
            Some(id) => PressAction::Drag(id.to_owned()),
            None => PressAction::Ignore,
        },
        _ => PressAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_button_always_pans() {
        assert_eq!(classify_press(PointerButton::Middle, Modifiers::NONE, None), PressAction::Pan);
        assert_eq!(
            classify_press(PointerButton::Middle, Modifiers::NONE, Some("a")),
            PressAction::Pan
        );
    }

    #[test]
    fn modified_primary_pans_even_over_a_marker() {
        assert_eq!(
            classify_press(PointerButton::Primary, Modifiers::CTRL, Some("a")),
            PressAction::Pan
        );
        assert_eq!(classify_press(PointerButton::Primary, Modifiers::ALT, None), PressAction::Pan);
    }

    #[test]
    fn other_modifiers_neither_pan_nor_drag() {
        assert_eq!(
            classify_press(PointerButton::Primary, Modifiers::SHIFT, Some("a")),
            PressAction::Ignore
        );
        assert!(!is_pan_modifier(Modifiers::SHIFT));
    }

    #[test]
    fn plain_primary_drags_only_on_a_marker() {
        assert_eq!(
            classify_press(PointerButton::Primary, Modifiers::NONE, Some("a")),
            PressAction::Drag("a".into())
        );
        assert_eq!(
            classify_press(PointerButton::Primary, Modifiers::NONE, None),
            PressAction::Ignore
        );
    }

    #[test]
    fn secondary_is_ignored() {
        assert_eq!(
            classify_press(PointerButton::Secondary, Modifiers::NONE, Some("a")),
            PressAction::Ignore
        );
    }
}
