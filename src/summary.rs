use egui::{Color32, Rect, Rounding, Stroke, Ui};

use crate::patient::{PatientRef, XrayView};
use crate::xray::XrayTextures;

/// What the report screen asks its parent to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    Back,
    Print,
}

/// Fixed report values. Nothing here is derived from the images.
pub struct TreatmentSummary {
    pub age: &'static str,
    pub gender: &'static str,
    pub bone_segments: &'static str,
    pub implant_type: &'static str,
    pub calibration: &'static str,
    pub status: &'static str,
}

pub const PLACEHOLDER_SUMMARY: TreatmentSummary = TreatmentSummary {
    age: "45 years",
    gender: "Male",
    bone_segments: "2 Annotated",
    implant_type: "Plate A",
    calibration: "Completed",
    status: "Ready for Surgery",
};

pub const SURGICAL_NOTES: &[&str] = &[
    "Bone segments have been properly annotated and calibrated for accurate measurements.",
    "Implant template positioned optimally for fracture reduction and stability.",
    "Pre-operative planning complete. Patient ready for surgical intervention.",
    "Recommended approach: Standard lateral approach with careful soft tissue handling.",
];

const PANEL_ASPECT: f32 = 4.0 / 3.0;
const OVERLAY_SIZE: egui::Vec2 = egui::vec2(128.0, 192.0);

/// The decorative implant box drawn in the middle of each report panel.
pub fn overlay_rect(panel: Rect) -> Rect {
    let size = OVERLAY_SIZE.min(panel.size());
    Rect::from_center_size(panel.center(), size)
}

/// Rows of the patient details block, in display order.
pub fn patient_rows(patient: &PatientRef, date: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Patient ID", patient.patient_id.clone()),
        ("Name", patient.full_name()),
        ("Age", PLACEHOLDER_SUMMARY.age.to_string()),
        ("Gender", PLACEHOLDER_SUMMARY.gender.to_string()),
        ("Date", date.to_string()),
    ]
}

pub fn summary_rows() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Bone Segments", PLACEHOLDER_SUMMARY.bone_segments),
        ("Implant Type", PLACEHOLDER_SUMMARY.implant_type),
        ("Calibration", PLACEHOLDER_SUMMARY.calibration),
        ("Status", PLACEHOLDER_SUMMARY.status),
    ]
}

/// Draws the report. Pure function of its inputs; returns the clicked action.
pub fn show(ui: &mut Ui, patient: &PatientRef, textures: &XrayTextures) -> Option<SummaryAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("Treatment Plan");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Print Report").clicked() {
                action = Some(SummaryAction::Print);
            }
            if ui.button("Back").clicked() {
                action = Some(SummaryAction::Back);
            }
        });
    });
    ui.separator();

    let today = chrono::Local::now().format("%x").to_string();

    ui.columns(3, |columns| {
        let left = &mut columns[0];
        left.group(|ui| {
            ui.strong("Patient Details");
            egui::Grid::new("patient_details").num_columns(2).show(ui, |ui| {
                for (label, value) in patient_rows(patient, &today) {
                    ui.label(format!("{}:", label));
                    ui.label(egui::RichText::new(value).strong());
                    ui.end_row();
                }
            });
        });
        left.add_space(8.0);
        left.group(|ui| {
            ui.strong("Treatment Summary");
            egui::Grid::new("treatment_summary").num_columns(2).show(ui, |ui| {
                for (label, value) in summary_rows() {
                    ui.label(format!("{}:", label));
                    let text = egui::RichText::new(value).strong();
                    if label == "Status" {
                        ui.label(text.color(Color32::from_rgb(34, 160, 80)));
                    } else {
                        ui.label(text);
                    }
                    ui.end_row();
                }
            });
        });

        for (column, view) in columns[1..].iter_mut().zip([XrayView::Ap, XrayView::Lateral]) {
            xray_panel(column, textures, view);
        }
    });

    ui.add_space(8.0);
    ui.group(|ui| {
        ui.strong("Surgical Notes & Recommendations");
        for note in SURGICAL_NOTES {
            ui.label(format!("• {}", note));
        }
    });

    action
}

fn xray_panel(ui: &mut Ui, textures: &XrayTextures, view: XrayView) {
    let title = match view {
        XrayView::Ap => "AP View - With Implant Template",
        XrayView::Lateral => "Lateral View - With Implant Template",
    };
    ui.strong(title);

    let width = ui.available_width();
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(width, width * PANEL_ASPECT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    textures.paint(&painter, rect, view);

    let overlay = overlay_rect(rect);
    let yellow = Color32::from_rgb(250, 204, 21);
    painter.rect(
        overlay,
        Rounding::same(8.0),
        Color32::from_rgba_unmultiplied(250, 204, 21, 51),
        Stroke::new(2.0, yellow),
    );
}
