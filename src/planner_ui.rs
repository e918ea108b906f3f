use egui::{Align2, Color32, Context, FontId, Painter, Pos2, Rect, Shape, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::catalog::{ImplantKind, CATALOG};
use crate::coordinate::from_percent;
use crate::gesture::{DragState, PanState};
use crate::grid::Grid;
use crate::marker::MarkerShape;
use crate::patient::{PatientRef, XrayView};
use crate::planner::PlanningState;
use crate::shortcuts::KeyListener;
use crate::template::{ImplantTemplate, OPACITY_RANGE, ROTATION_RANGE, SCALE_RANGE};
use crate::ui::UiState;
use crate::xray::XrayTextures;

const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);

const INSTRUCTIONS: &[&str] = &[
    "Left click: Select template",
    "Drag: Move template",
    "Ctrl+Click: Pan view",
    "Delete: Remove selected",
];

/// Requests the planning screen hands back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningAction {
    Back,
    SaveProject,
    PrintReport,
    CopyPlan,
    CopyText(String),
}

/// The mounted planning screen: its state plus its key subscription.
///
/// Dropping the screen detaches the listener and discards the plan.
pub struct PlanningScreen {
    state: PlanningState,
    keys: KeyListener,
    grid: Grid,
}

impl PlanningScreen {
    pub fn new(grid_size: f32) -> Self {
        Self {
            state: PlanningState::new(),
            keys: KeyListener::attach(),
            grid: Grid::new(grid_size, true),
        }
    }

    pub fn state(&self) -> &PlanningState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut PlanningState {
        &mut self.state
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.keys.is_attached()
    }

    pub fn show(
        &mut self,
        ctx: &Context,
        ui_state: &mut UiState,
        patient: &PatientRef,
        textures: &XrayTextures,
    ) -> Option<PlanningAction> {
        let mut action = None;

        self.handle_keyboard(ctx);

        egui::SidePanel::left("planning_controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_controls(ui, ui_state, patient, &mut action);
                });
            });

        if !self.state.templates().is_empty() {
            egui::TopBottomPanel::bottom("placed_templates")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    self.draw_template_list(ui, &mut action);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui, &mut action);
            ui.separator();
            self.grid.set_visible(ui_state.show_grid);
            self.draw_canvas(ui, ui_state, textures);
        });

        action
    }

    // Keys go to text fields first
    fn handle_keyboard(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in self.keys.collect(pressed) {
            self.state.handle_key(key);
        }
    }

    fn draw_header(&mut self, ui: &mut Ui, action: &mut Option<PlanningAction>) {
        ui.horizontal(|ui| {
            ui.heading(format!("{} View - Treatment Planning", self.state.selected_view().title()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Print Report").clicked() {
                    *action = Some(PlanningAction::PrintReport);
                }
                if ui.button("Save Project").clicked() {
                    *action = Some(PlanningAction::SaveProject);
                }
                if ui.button("Copy Plan").on_hover_text("Copy the plan JSON").clicked() {
                    *action = Some(PlanningAction::CopyPlan);
                }
                if ui.button("Back").clicked() {
                    *action = Some(PlanningAction::Back);
                }
                ui.separator();
                if ui.button("Reset View").clicked() {
                    self.state.reset_view();
                }
                if ui.button("+").on_hover_text("Zoom In").clicked() {
                    self.state.zoom_in();
                }
                let zoom_percentage = (self.state.canvas().get_zoom() * 100.0).round() as i32;
                ui.label(format!("{}%", zoom_percentage));
                if ui.button("−").on_hover_text("Zoom Out").clicked() {
                    self.state.zoom_out();
                }
            });
        });
    }

    fn draw_controls(
        &mut self,
        ui: &mut Ui,
        ui_state: &mut UiState,
        patient: &PatientRef,
        action: &mut Option<PlanningAction>,
    ) {
        ui.heading("Patient Information");
        egui::Grid::new("planning_patient").num_columns(2).show(ui, |ui| {
            ui.label("Patient ID:");
            ui.strong(&patient.patient_id);
            ui.end_row();
            ui.label("Name:");
            ui.strong(patient.full_name());
            ui.end_row();
            ui.label("Date:");
            ui.strong(chrono::Local::now().format("%x").to_string());
            ui.end_row();
            ui.label("Status:");
            ui.colored_label(Color32::from_rgb(34, 160, 80), "Planning Complete");
            ui.end_row();
        });
        ui.separator();

        ui.heading("View Selection");
        ui.horizontal(|ui| {
            for view in [XrayView::Ap, XrayView::Lateral] {
                if ui
                    .selectable_label(self.state.selected_view() == view, view.button_label())
                    .clicked()
                {
                    self.state.select_view(view);
                }
            }
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.heading("Implant Library");
            let toggle = if self.state.is_catalog_open() { "×" } else { "+" };
            if ui.button(toggle).clicked() {
                self.state.toggle_catalog();
            }
        });
        if self.state.is_catalog_open() {
            for entry in CATALOG {
                if ui.button(entry.name).on_hover_text(entry.kind.label()).clicked() {
                    self.state.add_template(entry.id);
                }
            }
        }
        ui.separator();

        if let Some(template) = self.state.selected_template().cloned() {
            self.draw_template_controls(ui, &template, action);
            ui.separator();
        }

        ui.heading("Measurements");
        let measurements = self.state.measurements();
        egui::Grid::new("planning_measurements").num_columns(2).show(ui, |ui| {
            for (label, value) in [
                ("Length:", &measurements.length),
                ("Angle:", &measurements.angle),
                ("Diameter:", &measurements.diameter),
            ] {
                ui.label(label);
                ui.strong(value);
                ui.end_row();
            }
        });
        ui.separator();

        ui.collapsing("Appearance", |ui| {
            ui.checkbox(&mut ui_state.dark_mode, "Dark Mode");
            ui.checkbox(&mut ui_state.show_grid, "Show Grid");
            ui.checkbox(&mut ui_state.show_measurements, "Show Measurements");
        });
    }

    fn draw_template_controls(
        &mut self,
        ui: &mut Ui,
        template: &ImplantTemplate,
        action: &mut Option<PlanningAction>,
    ) {
        let id = template.id.as_str();

        ui.horizontal(|ui| {
            ui.heading("Template Controls");
            if ui.button("×").on_hover_text("Delete template").clicked() {
                self.state.delete_template(id);
            }
        });
        ui.label(&template.name);

        let mut rotation = template.rotation;
        ui.label(format!("Rotation: {}°", rotation.round()));
        if ui
            .add(egui::Slider::new(&mut rotation, ROTATION_RANGE).step_by(1.0).show_value(false))
            .changed()
        {
            self.state.set_rotation(id, rotation);
        }

        let mut scale = template.scale;
        ui.label(format!("Scale: {:.1}x", scale));
        if ui
            .add(egui::Slider::new(&mut scale, SCALE_RANGE).step_by(0.1).show_value(false))
            .changed()
        {
            self.state.set_scale(id, scale);
        }

        let mut opacity = template.opacity;
        ui.label(format!("Opacity: {}%", (opacity * 100.0).round()));
        if ui
            .add(egui::Slider::new(&mut opacity, OPACITY_RANGE).step_by(0.1).show_value(false))
            .changed()
        {
            self.state.set_opacity(id, opacity);
        }

        let mut visible = template.visible;
        if ui.checkbox(&mut visible, "Visible").changed() {
            self.state.set_visible(id, visible);
        }

        if ui.button("Copy Position").clicked() {
            *action = Some(PlanningAction::CopyText(format!(
                "({}, {})",
                template.x.round(),
                template.y.round()
            )));
        }
    }

    // Bottom table of placed templates
    fn draw_template_list(&mut self, ui: &mut Ui, action: &mut Option<PlanningAction>) {
        ui.heading("Placed Templates");

        let rows: Vec<ImplantTemplate> = self.state.templates().to_vec();
        let selected = self.state.selected_id().map(str::to_owned);
        let mut select = None;
        let mut toggle = None;
        let mut delete = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(200.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(190.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Template");
                });
                header.col(|ui| {
                    ui.strong("Position");
                });
                header.col(|ui| {
                    ui.strong("Rotation | Scale");
                });
                header.col(|ui| {
                    ui.strong("");
                });
            })
            .body(|mut body| {
                for template in &rows {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            let is_selected = selected.as_deref() == Some(template.id.as_str());
                            if ui.selectable_label(is_selected, &template.name).clicked() {
                                select = Some(template.id.clone());
                            }
                        });
                        row.col(|ui| {
                            ui.label(format!("({}, {})", template.x.round(), template.y.round()));
                        });
                        row.col(|ui| {
                            ui.label(format!(
                                "{}° | {:.1}x",
                                template.rotation.round(),
                                template.scale
                            ));
                        });
                        row.col(|ui| {
                            let (hint, color) = if template.visible {
                                ("Hide", Color32::from_rgb(22, 163, 74))
                            } else {
                                ("Show", Color32::GRAY)
                            };
                            if ui
                                .add(egui::Button::new(egui::RichText::new("👁").color(color)))
                                .on_hover_text(hint)
                                .clicked()
                            {
                                toggle = Some(template.id.clone());
                            }
                            if ui.button("×").on_hover_text("Delete").clicked() {
                                delete = Some(template.id.clone());
                            }
                            if ui.button("Copy").clicked() {
                                *action = Some(PlanningAction::CopyText(format!(
                                    "{}: ({}, {})",
                                    template.name,
                                    template.x.round(),
                                    template.y.round()
                                )));
                            }
                        });
                    });
                }
            });

        if let Some(id) = select {
            self.state.select(&id);
        }
        if let Some(id) = toggle {
            self.state.toggle_visible(&id);
        }
        if let Some(id) = delete {
            self.state.delete_template(&id);
        }
    }

    // Draw the X-ray surface and everything layered on it
    fn draw_canvas(&mut self, ui: &mut Ui, ui_state: &UiState, textures: &XrayTextures) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let view_rect = response.rect;

        self.handle_pointer(ui, &response);
        if matches!(self.state.drag_state(), DragState::Dragging { .. }) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if matches!(self.state.pan_state(), PanState::Panning { .. }) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
        }

        let bg_color = if ui_state.dark_mode {
            Color32::from_rgb(20, 20, 20)
        } else {
            Color32::from_rgb(17, 24, 39)
        };
        painter.rect_filled(view_rect, 0.0, bg_color);

        let surface = self.state.surface_rect(view_rect);
        let zoom = self.state.canvas().get_zoom();
        let surface_painter = painter.with_clip_rect(view_rect);

        textures.paint(&surface_painter, surface, self.state.selected_view());
        self.draw_templates(&surface_painter, surface, zoom);
        self.grid.draw(&surface_painter, surface, zoom);
        if ui_state.show_measurements {
            draw_measurements(&surface_painter, surface);
        }

        draw_instructions(&painter, view_rect);
    }

    // Handle mouse interactions with the canvas
    fn handle_pointer(&mut self, ui: &Ui, response: &egui::Response) {
        let view_rect = response.rect;
        let hovered = response.hovered();
        let events = ui.input(|i| i.events.clone());

        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    modifiers,
                } => {
                    if hovered && view_rect.contains(pos) {
                        self.state.pointer_pressed(pos, button, modifiers, view_rect);
                    }
                }
                egui::Event::PointerButton { pressed: false, .. } => self.state.pointer_released(),
                egui::Event::PointerMoved(pos) => {
                    if view_rect.contains(pos) {
                        self.state.pointer_moved(pos, view_rect);
                    } else {
                        self.state.pointer_left();
                    }
                }
                egui::Event::PointerGone => self.state.pointer_left(),
                _ => {}
            }
        }
    }

    // Selected template is drawn last so it sits on top
    fn draw_templates(&self, painter: &Painter, surface: Rect, zoom: f32) {
        let selected = self.state.selected_id();
        let (on_top, rest): (Vec<&ImplantTemplate>, Vec<&ImplantTemplate>) = self
            .state
            .templates()
            .iter()
            .filter(|t| t.visible)
            .partition(|t| Some(t.id.as_str()) == selected);

        for template in rest.into_iter().chain(on_top) {
            let Some(shape) = MarkerShape::for_template(template, surface, zoom) else {
                continue;
            };
            let Some(kind) = template.kind() else {
                continue;
            };
            let (fill, border) = marker_colors(kind);
            painter.add(Shape::convex_polygon(
                shape.corners().to_vec(),
                fill.linear_multiply(template.opacity),
                Stroke::new(1.0, border.linear_multiply(template.opacity)),
            ));

            if Some(template.id.as_str()) == selected {
                let ring = MarkerShape {
                    half_size: shape.half_size + egui::vec2(3.0, 3.0),
                    ..shape
                };
                painter.add(Shape::closed_line(
                    ring.corners().to_vec(),
                    Stroke::new(2.0, SELECTION_COLOR.linear_multiply(0.75)),
                ));
            }
        }
    }
}

fn marker_colors(kind: ImplantKind) -> (Color32, Color32) {
    match kind {
        ImplantKind::Plate => (Color32::from_rgb(250, 204, 21), Color32::from_rgb(234, 179, 8)),
        ImplantKind::Screw => (Color32::from_rgb(209, 213, 219), Color32::from_rgb(156, 163, 175)),
        ImplantKind::Nail => (Color32::from_rgb(156, 163, 175), Color32::from_rgb(107, 114, 128)),
        ImplantKind::Wire => (Color32::from_rgb(96, 165, 250), Color32::from_rgb(96, 165, 250)),
    }
}

/// Fixed demo measurement lines, in surface percent.
const LENGTH_LINE: [Pos2; 2] = [Pos2::new(10.0, 20.0), Pos2::new(90.0, 20.0)];
const HEIGHT_LINE: [Pos2; 2] = [Pos2::new(20.0, 30.0), Pos2::new(20.0, 80.0)];

fn draw_measurements(painter: &Painter, surface: Rect) {
    let green = Color32::from_rgb(0, 255, 0);
    let red = Color32::from_rgb(255, 0, 0);

    for (line, color, label, label_at, align) in [
        (LENGTH_LINE, green, "120mm", Pos2::new(50.0, 18.0), Align2::CENTER_BOTTOM),
        (HEIGHT_LINE, red, "85mm", Pos2::new(18.0, 55.0), Align2::RIGHT_CENTER),
    ] {
        let points = line.map(|p| from_percent(p, surface));
        painter.extend(Shape::dashed_line(&points, Stroke::new(2.0, color), 5.0, 5.0));
        painter.text(
            from_percent(label_at, surface),
            align,
            label,
            FontId::proportional(12.0),
            color,
        );
    }
}

fn draw_instructions(painter: &Painter, view_rect: Rect) {
    let line_height = 16.0;
    let size = egui::vec2(180.0, line_height * INSTRUCTIONS.len() as f32 + 12.0);
    let rect = Rect::from_min_size(
        egui::pos2(view_rect.min.x + 16.0, view_rect.max.y - 16.0 - size.y),
        size,
    );
    painter.rect_filled(rect, 6.0, Color32::from_black_alpha(178));
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        painter.text(
            rect.min + egui::vec2(10.0, 6.0 + i as f32 * line_height),
            Align2::LEFT_TOP,
            *line,
            FontId::proportional(13.0),
            Color32::WHITE,
        );
    }
}
