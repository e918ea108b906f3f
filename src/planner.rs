use chrono::{DateTime, Utc};
use egui::{Modifiers, PointerButton, Pos2, Rect};

use crate::canvas::Canvas;
use crate::catalog::{self, UNKNOWN_IMPLANT};
use crate::coordinate::{clamp_percent, from_percent, to_percent};
use crate::export::{iso_timestamp, Measurements, ProjectExport};
use crate::gesture::{classify_press, DragState, PanState, PressAction};
use crate::marker;
use crate::patient::{PatientRef, XrayView};
use crate::shortcuts::ShortcutKey;
use crate::template::{ImplantTemplate, TemplateUpdate};

/// All interactive state of the planning screen.
///
/// Every method here is a synchronous update on the current state; the egui
/// layer only translates input into these calls and draws the result.
#[derive(Debug, Default)]
pub struct PlanningState {
    templates: Vec<ImplantTemplate>,
    selected: Option<String>,
    catalog_open: bool,
    selected_view: XrayView,
    canvas: Canvas,
    drag: DragState,
    pan: PanState,
    measurements: Measurements,
}

impl PlanningState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> &[ImplantTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&ImplantTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_template(&self) -> Option<&ImplantTemplate> {
        self.selected.as_deref().and_then(|id| self.template(id))
    }

    pub fn is_catalog_open(&self) -> bool {
        self.catalog_open
    }

    pub fn selected_view(&self) -> XrayView {
        self.selected_view
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn pan_state(&self) -> PanState {
        self.pan
    }

    // Template management

    pub fn add_template(&mut self, catalog_id: &str) -> String {
        self.add_template_at(catalog_id, Utc::now())
    }

    /// Places a new template from the catalog and closes the picker.
    pub fn add_template_at(&mut self, catalog_id: &str, now: DateTime<Utc>) -> String {
        let name = match catalog::lookup(catalog_id) {
            Some(entry) => entry.name.to_string(),
            None => {
                log::warn!("Unknown catalog id {:?}, placing placeholder template", catalog_id);
                UNKNOWN_IMPLANT.to_string()
            }
        };

        let mut stamp = now.timestamp_millis();
        let mut id = format!("{}-{}", catalog_id, stamp);
        while self.template(&id).is_some() {
            stamp += 1;
            id = format!("{}-{}", catalog_id, stamp);
        }

        log::info!("Placed template {} ({})", id, name);
        self.templates.push(ImplantTemplate::new(id.clone(), name));
        self.catalog_open = false;
        id
    }

    /// Merges `update` into the template with `id`. Unknown ids are ignored.
    pub fn update_template(&mut self, id: &str, update: &TemplateUpdate) {
        if let Some(template) = self.templates.iter_mut().find(|t| t.id == id) {
            template.apply(update);
        }
    }

    pub fn set_rotation(&mut self, id: &str, rotation: f32) {
        self.update_template(id, &TemplateUpdate::rotation(rotation));
    }

    pub fn set_scale(&mut self, id: &str, scale: f32) {
        self.update_template(id, &TemplateUpdate::scale(scale));
    }

    pub fn set_opacity(&mut self, id: &str, opacity: f32) {
        self.update_template(id, &TemplateUpdate::opacity(opacity));
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) {
        self.update_template(id, &TemplateUpdate::visible(visible));
    }

    pub fn toggle_visible(&mut self, id: &str) {
        if let Some(visible) = self.template(id).map(|t| t.visible) {
            self.set_visible(id, !visible);
        }
    }

    pub fn delete_template(&mut self, id: &str) {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        if self.templates.len() != before {
            log::info!("Deleted template {}", id);
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if matches!(&self.drag, DragState::Dragging { template_id, .. } if template_id == id) {
            self.drag = DragState::Idle;
        }
    }

    pub fn select(&mut self, id: &str) {
        if self.template(id).is_some() {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_catalog(&mut self) {
        self.catalog_open = !self.catalog_open;
    }

    pub fn close_catalog(&mut self) {
        self.catalog_open = false;
    }

    pub fn select_view(&mut self, view: XrayView) {
        self.selected_view = view;
    }

    // View transform

    pub fn zoom_in(&mut self) {
        self.canvas.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.canvas.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.canvas.reset_view();
    }

    // Surface rectangle on screen for the given viewport
    pub fn surface_rect(&self, view_rect: Rect) -> Rect {
        self.canvas.get_screen_rect(view_rect)
    }

    // Pointer gestures

    /// Dispatches one press to either the pan or the drag machine.
    ///
    /// Both machines are reset first, so at most one is ever active.
    pub fn pointer_pressed(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
        view_rect: Rect,
    ) {
        let surface = self.surface_rect(view_rect);
        let hit = marker::pick(
            &self.templates,
            self.selected.as_deref(),
            pos,
            surface,
            self.canvas.get_zoom(),
        )
        .map(str::to_owned);

        self.drag = DragState::Idle;
        self.pan = PanState::Idle;

        match classify_press(button, modifiers, hit.as_deref()) {
            PressAction::Pan => {
                log::debug!("Pan started at {:?}", pos);
                self.pan = PanState::Panning { last: pos };
            }
            PressAction::Drag(template_id) => {
                let Some(template) = self.template(&template_id) else {
                    return;
                };
                let anchor = from_percent(Pos2::new(template.x, template.y), surface);
                log::debug!("Drag started on {}", template_id);
                self.selected = Some(template_id.clone());
                self.drag = DragState::Dragging {
                    template_id,
                    offset: pos - anchor,
                };
            }
            PressAction::Ignore => {}
        }
    }

    pub fn pointer_moved(&mut self, pos: Pos2, view_rect: Rect) {
        if let DragState::Dragging { template_id, offset } = &self.drag {
            let surface = self.surface_rect(view_rect);
            // A collapsed viewport has no percent space to map into.
            if surface.area() <= 0.0 {
                return;
            }
            let percent = clamp_percent(to_percent(pos - *offset, surface));
            let id = template_id.clone();
            self.update_template(&id, &TemplateUpdate::position(percent.x, percent.y));
        }

        if let PanState::Panning { last } = self.pan {
            self.canvas.pan(pos - last);
            self.pan = PanState::Panning { last: pos };
        }
    }

    pub fn pointer_released(&mut self) {
        self.end_gestures();
    }

    pub fn pointer_left(&mut self) {
        self.end_gestures();
    }

    fn end_gestures(&mut self) {
        if self.drag != DragState::Idle || self.pan != PanState::Idle {
            log::debug!("Gesture ended");
        }
        self.drag = DragState::Idle;
        self.pan = PanState::Idle;
    }

    // Keyboard

    // Apply one shortcut against the live state
    pub fn handle_key(&mut self, key: ShortcutKey) {
        if let Some(id) = self.selected.clone() {
            match key {
                ShortcutKey::Delete | ShortcutKey::Backspace => self.delete_template(&id),
                _ => {
                    let target = key.nudge().and_then(|(dx, dy)| {
                        self.template(&id)
                            .map(|t| clamp_percent(Pos2::new(t.x + dx, t.y + dy)))
                    });
                    if let Some(target) = target {
                        self.update_template(&id, &TemplateUpdate::position(target.x, target.y));
                    }
                }
            }
        }

        if key == ShortcutKey::Escape {
            self.clear_selection();
            self.close_catalog();
        }
    }

    // Export

    pub fn project(&self, patient: &PatientRef, now: DateTime<Utc>) -> ProjectExport {
        ProjectExport {
            patient_data: patient.clone(),
            implant_templates: self.templates.clone(),
            measurements: self.measurements.clone(),
            selected_view: self.selected_view,
            timestamp: iso_timestamp(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use egui::{pos2, vec2};
    use proptest::prelude::*;

    fn view() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1000.0, 500.0))
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn press(state: &mut PlanningState, pos: Pos2, button: PointerButton, modifiers: Modifiers) {
        state.pointer_pressed(pos, button, modifiers, view());
    }

    #[test]
    fn repeated_add_gives_distinct_ids_and_same_defaults() {
        let mut state = PlanningState::new();
        let a = state.add_template_at("plate-1", at(1_000));
        let b = state.add_template_at("plate-1", at(1_000));
        assert_ne!(a, b);
        assert_eq!(a, "plate-1-1000");
        assert_eq!(b, "plate-1-1001");

        for t in state.templates() {
            assert_eq!(t.name, "Locking Plate 4.5mm");
            assert_eq!(
                (t.x, t.y, t.rotation, t.scale, t.opacity, t.visible),
                (50.0, 50.0, 0.0, 1.0, 0.8, true)
            );
        }
    }

    #[test]
    fn add_with_unknown_id_uses_placeholder_name() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("bogus", at(7));
        assert_eq!(state.template(&id).unwrap().name, "Unknown");
    }

    #[test]
    fn add_closes_catalog() {
        let mut state = PlanningState::new();
        state.toggle_catalog();
        assert!(state.is_catalog_open());
        state.add_template_at("screw-1", at(1));
        assert!(!state.is_catalog_open());
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut state = PlanningState::new();
        state.add_template_at("wire-1", at(1));
        let before = state.templates().to_vec();
        state.update_template("missing", &TemplateUpdate::rotation(90.0));
        assert_eq!(state.templates(), &before[..]);
    }

    #[test]
    fn field_setters_write_one_field() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("nail-1", at(1));
        state.set_rotation(&id, 30.0);
        state.set_scale(&id, 1.5);
        state.set_opacity(&id, 0.4);
        state.toggle_visible(&id);
        let t = state.template(&id).unwrap();
        assert_eq!((t.rotation, t.scale, t.opacity, t.visible), (30.0, 1.5, 0.4, false));
        state.set_visible(&id, true);
        assert!(state.template(&id).unwrap().visible);
    }

    #[test]
    fn deleting_selected_clears_selection() {
        let mut state = PlanningState::new();
        let a = state.add_template_at("plate-1", at(1));
        state.select(&a);
        state.delete_template(&a);
        assert_eq!(state.selected_id(), None);
        assert!(state.templates().is_empty());
    }

    #[test]
    fn deleting_other_keeps_selection() {
        let mut state = PlanningState::new();
        let a = state.add_template_at("plate-1", at(1));
        let b = state.add_template_at("plate-2", at(2));
        state.select(&a);
        state.delete_template(&b);
        assert_eq!(state.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut state = PlanningState::new();
        state.select("ghost");
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn drag_tracks_pointer_without_snapping() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        // Template center sits at (500, 250); grab it 20px to the right.
        press(&mut state, pos2(520.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        assert_eq!(state.selected_id(), Some(id.as_str()));

        state.pointer_moved(pos2(520.0, 250.0), view());
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (50.0, 50.0));

        state.pointer_moved(pos2(620.0, 300.0), view());
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (60.0, 60.0));
    }

    #[test]
    fn drag_is_clamped_to_surface() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        state.pointer_moved(pos2(-400.0, 2000.0), view());
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (0.0, 100.0));
    }

    #[test]
    fn release_and_leave_end_the_drag() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        state.pointer_released();
        state.pointer_moved(pos2(900.0, 400.0), view());
        assert_eq!(state.template(&id).unwrap().x, 50.0);

        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        state.pointer_left();
        assert_eq!(state.drag_state(), &DragState::Idle);
    }

    #[test]
    fn modified_press_on_marker_pans_instead_of_dragging() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::CTRL);
        assert_eq!(state.drag_state(), &DragState::Idle);
        assert!(matches!(state.pan_state(), PanState::Panning { .. }));

        state.pointer_moved(pos2(530.0, 260.0), view());
        state.pointer_moved(pos2(540.0, 280.0), view());
        assert_eq!(state.canvas().get_offset(), vec2(40.0, 30.0));
        assert_eq!(state.template(&id).unwrap().x, 50.0);
    }

    #[test]
    fn shift_press_on_marker_neither_selects_nor_drags() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::SHIFT);
        assert_eq!(state.selected_id(), None);
        assert_eq!(state.drag_state(), &DragState::Idle);
        assert_eq!(state.pan_state(), PanState::Idle);

        state.pointer_moved(pos2(600.0, 250.0), view());
        assert_eq!(state.template(&id).unwrap().x, 50.0);
    }

    #[test]
    fn drag_over_collapsed_viewport_leaves_template_in_place() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        state.update_template(&id, &TemplateUpdate::position(30.0, 70.0));
        press(&mut state, pos2(300.0, 350.0), PointerButton::Primary, Modifiers::NONE);
        assert!(matches!(state.drag_state(), DragState::Dragging { .. }));

        let collapsed = Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0));
        state.pointer_moved(pos2(10.0, 10.0), collapsed);
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (30.0, 70.0));
    }

    #[test]
    fn middle_press_pans() {
        let mut state = PlanningState::new();
        press(&mut state, pos2(10.0, 10.0), PointerButton::Middle, Modifiers::NONE);
        state.pointer_moved(pos2(5.0, 30.0), view());
        assert_eq!(state.canvas().get_offset(), vec2(-5.0, 20.0));
        state.pointer_released();
        assert_eq!(state.pan_state(), PanState::Idle);
    }

    #[test]
    fn plain_press_on_empty_area_does_nothing() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        state.select(&id);
        press(&mut state, pos2(10.0, 10.0), PointerButton::Primary, Modifiers::NONE);
        assert_eq!(state.drag_state(), &DragState::Idle);
        assert_eq!(state.pan_state(), PanState::Idle);
        assert_eq!(state.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn new_drag_replaces_previous_one() {
        let mut state = PlanningState::new();
        let a = state.add_template_at("plate-1", at(1));
        let b = state.add_template_at("wire-1", at(2));
        state.update_template(&b, &TemplateUpdate::position(10.0, 10.0));

        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        press(&mut state, pos2(100.0, 50.0), PointerButton::Primary, Modifiers::NONE);
        assert!(matches!(
            state.drag_state(),
            DragState::Dragging { template_id, .. } if *template_id == b
        ));

        state.pointer_moved(pos2(200.0, 100.0), view());
        assert_eq!(state.template(&a).unwrap().x, 50.0);
        assert_eq!(state.template(&b).unwrap().x, 20.0);
    }

    #[test]
    fn drag_uses_zoomed_and_panned_surface() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        for _ in 0..10 {
            state.zoom_in();
        }
        // Surface is now 2000x1000 centered on (500, 250); template center unchanged on screen.
        press(&mut state, pos2(500.0, 250.0), PointerButton::Primary, Modifiers::NONE);
        state.pointer_moved(pos2(700.0, 250.0), view());
        assert_eq!(state.template(&id).unwrap().x, 60.0);
    }

    #[test]
    fn zoom_and_pan_never_touch_templates() {
        let mut state = PlanningState::new();
        state.add_template_at("plate-1", at(1));
        let before = state.templates().to_vec();

        for _ in 0..10 {
            state.zoom_in();
        }
        assert_eq!(state.canvas().get_zoom(), 2.0);
        press(&mut state, pos2(0.0, 0.0), PointerButton::Middle, Modifiers::NONE);
        state.pointer_moved(pos2(50.0, 50.0), view());
        state.pointer_released();
        assert_eq!(state.canvas().get_offset(), vec2(50.0, 50.0));

        assert_eq!(state.templates(), &before[..]);
    }

    #[test]
    fn reset_view_restores_exact_identity() {
        let mut state = PlanningState::new();
        state.zoom_out();
        state.zoom_out();
        press(&mut state, pos2(0.0, 0.0), PointerButton::Middle, Modifiers::NONE);
        state.pointer_moved(pos2(-13.5, 77.25), view());
        state.reset_view();
        assert_eq!(state.canvas().get_zoom(), 1.0);
        assert_eq!(state.canvas().get_offset(), egui::Vec2::ZERO);
    }

    #[test]
    fn keys_delete_and_nudge_selected() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        state.select(&id);
        state.handle_key(ShortcutKey::ArrowRight);
        state.handle_key(ShortcutKey::ArrowUp);
        state.handle_key(ShortcutKey::ArrowUp);
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (51.0, 48.0));

        state.handle_key(ShortcutKey::Backspace);
        assert!(state.templates().is_empty());
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn nudge_is_clamped_and_uses_fresh_state() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        state.select(&id);
        state.update_template(&id, &TemplateUpdate::position(0.5, 99.5));
        state.handle_key(ShortcutKey::ArrowLeft);
        state.handle_key(ShortcutKey::ArrowDown);
        let t = state.template(&id).unwrap();
        assert_eq!((t.x, t.y), (0.0, 100.0));
    }

    #[test]
    fn keys_without_selection_do_nothing() {
        let mut state = PlanningState::new();
        state.add_template_at("plate-1", at(1));
        let before = state.templates().to_vec();
        state.handle_key(ShortcutKey::Delete);
        state.handle_key(ShortcutKey::ArrowDown);
        assert_eq!(state.templates(), &before[..]);
    }

    #[test]
    fn escape_clears_selection_and_closes_catalog() {
        let mut state = PlanningState::new();
        let id = state.add_template_at("plate-1", at(1));
        state.select(&id);
        state.toggle_catalog();
        state.handle_key(ShortcutKey::Escape);
        assert_eq!(state.selected_id(), None);
        assert!(!state.is_catalog_open());

        state.handle_key(ShortcutKey::Escape);
        assert_eq!(state.selected_id(), None);
        assert!(!state.is_catalog_open());
        assert_eq!(state.templates().len(), 1);
    }

    #[test]
    fn project_snapshot_matches_state() {
        let mut state = PlanningState::new();
        let a = state.add_template_at("plate-1", at(1));
        state.add_template_at("screw-2", at(2));
        state.set_rotation(&a, -90.0);
        state.select_view(XrayView::Lateral);

        let patient = PatientRef {
            patient_id: "P-7".into(),
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            ap_image: None,
            lat_image: None,
        };
        let project = state.project(&patient, at(0));
        assert_eq!(project.implant_templates, state.templates());
        assert_eq!(project.selected_view, XrayView::Lateral);
        assert_eq!(project.patient_data, patient);
        assert_eq!(project.timestamp, "1970-01-01T00:00:00.000Z");
        assert_eq!(project.file_name(), "treatment-plan-P-7.json");

        let json: serde_json::Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();
        assert_eq!(json["implantTemplates"], serde_json::to_value(state.templates()).unwrap());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Update(usize, TemplateUpdate),
        Drag(usize, f32, f32),
        Nudge(usize, ShortcutKey),
    }

    fn any_f32() -> impl Strategy<Value = f32> {
        prop_oneof![
            -1000.0f32..1000.0,
            Just(f32::NAN),
            Just(f32::INFINITY),
            Just(f32::NEG_INFINITY)
        ]
    }

    fn any_update() -> impl Strategy<Value = TemplateUpdate> {
        (
            proptest::option::of(any_f32()),
            proptest::option::of(any_f32()),
            proptest::option::of(any_f32()),
            proptest::option::of(any_f32()),
            proptest::option::of(any_f32()),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(x, y, rotation, scale, opacity, visible)| TemplateUpdate {
                x,
                y,
                rotation,
                scale,
                opacity,
                visible,
            })
    }

    fn any_op() -> impl Strategy<Value = Op> {
        let arrow = prop_oneof![
            Just(ShortcutKey::ArrowUp),
            Just(ShortcutKey::ArrowDown),
            Just(ShortcutKey::ArrowLeft),
            Just(ShortcutKey::ArrowRight),
        ];
        prop_oneof![
            (0usize..3, any_update()).prop_map(|(i, u)| Op::Update(i, u)),
            (0usize..3, -3000.0f32..3000.0, -3000.0f32..3000.0)
                .prop_map(|(i, x, y)| Op::Drag(i, x, y)),
            (0usize..3, arrow).prop_map(|(i, k)| Op::Nudge(i, k)),
        ]
    }

    proptest! {
        #[test]
        fn fields_stay_in_bounds(ops in proptest::collection::vec(any_op(), 0..40)) {
            let mut state = PlanningState::new();
            let ids: Vec<String> = ["plate-1", "screw-1", "wire-1"]
                .iter()
                .enumerate()
                .map(|(i, c)| state.add_template_at(c, at(i as i64)))
                .collect();

            for op in ops {
                match op {
                    Op::Update(i, update) => state.update_template(&ids[i], &update),
                    Op::Drag(i, x, y) => {
                        let t = state.template(&ids[i]).unwrap();
                        let start = from_percent(Pos2::new(t.x, t.y), state.surface_rect(view()));
                        state.select(&ids[i]);
                        state.drag = DragState::Dragging {
                            template_id: ids[i].clone(),
                            offset: egui::Vec2::ZERO,
                        };
                        state.pointer_moved(start + vec2(x, y), view());
                        state.pointer_released();
                    }
                    Op::Nudge(i, key) => {
                        state.select(&ids[i]);
                        state.handle_key(key);
                    }
                }
                for t in state.templates() {
                    prop_assert!(t.in_bounds(), "out of bounds: {:?}", t);
                }
            }
        }

        #[test]
        fn dragging_one_template_leaves_others_untouched(
            target in 0usize..3,
            moves in proptest::collection::vec((-500.0f32..1500.0, -500.0f32..1000.0), 1..20),
        ) {
            let mut state = PlanningState::new();
            let ids: Vec<String> = ["plate-1", "nail-1", "screw-2"]
                .iter()
                .enumerate()
                .map(|(i, c)| state.add_template_at(c, at(i as i64)))
                .collect();
            for (i, id) in ids.iter().enumerate() {
                let p = 20.0 + 30.0 * i as f32;
                state.update_template(id, &TemplateUpdate::position(p, p));
            }
            let others: Vec<ImplantTemplate> = state
                .templates()
                .iter()
                .filter(|t| t.id != ids[target])
                .cloned()
                .collect();

            let t = state.template(&ids[target]).unwrap();
            let start = from_percent(Pos2::new(t.x, t.y), state.surface_rect(view()));
            state.pointer_pressed(start, PointerButton::Primary, Modifiers::NONE, view());
            prop_assert_eq!(state.selected_id(), Some(ids[target].as_str()));
            for (x, y) in moves {
                state.pointer_moved(pos2(x, y), view());
            }
            state.pointer_released();

            let after: Vec<ImplantTemplate> = state
                .templates()
                .iter()
                .filter(|t| t.id != ids[target])
                .cloned()
                .collect();
            prop_assert_eq!(after, others);
        }
    }
}
