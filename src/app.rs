use clipboard::ClipboardContext;
use clipboard::ClipboardProvider;
use egui::Context;

use crate::config::{self, AppConfig};
use crate::export::{report_file_name, save_project};
use crate::patient::PatientRef;
use crate::planner_ui::{PlanningAction, PlanningScreen};
use crate::platform::{encode_png, DesktopPlatform, HostPlatform};
use crate::summary::{self, SummaryAction};
use crate::ui::UiState;
use crate::xray::XrayTextures;

/// Which alternate screen is mounted.
enum Screen {
    Planning(Box<PlanningScreen>),
    Summary,
}

/// A request raised by whichever screen is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScreenEvent {
    Planning(PlanningAction),
    Summary(SummaryAction),
}

// Applies navigation and print requests. Anything that needs the patient or
// the clipboard is handed back to the caller.
fn route(
    screen: &mut Screen,
    event: ScreenEvent,
    platform: &mut dyn HostPlatform,
    grid_size: f32,
) -> Option<PlanningAction> {
    match event {
        ScreenEvent::Planning(PlanningAction::Back) => {
            log::info!("Switching to report screen; unsaved plan discarded");
            *screen = Screen::Summary;
            None
        }
        ScreenEvent::Planning(PlanningAction::PrintReport)
        | ScreenEvent::Summary(SummaryAction::Print) => {
            platform.print();
            None
        }
        ScreenEvent::Summary(SummaryAction::Back) => {
            log::info!("Switching to planning screen");
            *screen = Screen::Planning(Box::new(PlanningScreen::new(grid_size)));
            None
        }
        ScreenEvent::Planning(action) => Some(action),
    }
}

pub struct ImplantPlannerApp {
    config: AppConfig,
    patient: PatientRef,
    textures: XrayTextures,
    screen: Screen,
    ui_state: UiState,
    platform: DesktopPlatform,
    clipboard: Option<ClipboardContext>,
}

impl ImplantPlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        cc.egui_ctx.set_style(style);

        let clipboard = match ClipboardProvider::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("Clipboard unavailable: {}", e);
                None
            }
        };

        let patient = config.patient.to_patient();
        let textures = XrayTextures::load(&cc.egui_ctx, &patient);
        log::info!("Opened planning session for patient {}", patient.patient_id);

        Self {
            screen: Screen::Planning(Box::new(PlanningScreen::new(config.canvas.grid_size))),
            ui_state: UiState::from_config(&config.appearance),
            platform: DesktopPlatform::new(config.export.default_dir.clone()),
            config,
            patient,
            textures,
            clipboard,
        }
    }

    pub fn copy_to_clipboard(&mut self, text: String) -> bool {
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_contents(text).is_ok()
        } else {
            false
        }
    }

    fn handle_event(&mut self, event: ScreenEvent) {
        let Some(action) =
            route(&mut self.screen, event, &mut self.platform, self.config.canvas.grid_size)
        else {
            return;
        };
        match action {
            PlanningAction::SaveProject => self.save_project(),
            PlanningAction::CopyPlan => {
                let Screen::Planning(screen) = &self.screen else {
                    return;
                };
                let project = screen.state().project(&self.patient, chrono::Utc::now());
                match project.to_json() {
                    Ok(json) => {
                        let status = if self.copy_to_clipboard(json) {
                            "Plan copied to clipboard"
                        } else {
                            "Clipboard unavailable"
                        };
                        self.ui_state.set_status(status);
                    }
                    Err(e) => {
                        log::error!("Failed to serialize plan: {}", e);
                        self.ui_state.set_status(format!("Copy failed: {}", e));
                    }
                }
            }
            PlanningAction::CopyText(text) => {
                if !self.copy_to_clipboard(text) {
                    self.ui_state.set_status("Clipboard unavailable");
                }
            }
            PlanningAction::Back | PlanningAction::PrintReport => {}
        }
    }

    fn save_project(&mut self) {
        let Screen::Planning(screen) = &self.screen else {
            return;
        };
        let project = screen.state().project(&self.patient, chrono::Utc::now());
        match save_project(&project, &mut self.platform) {
            Ok(Some(path)) => self.ui_state.set_status(format!("Saved {}", path.display())),
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to save project: {}", e);
                self.ui_state.set_status(format!("Save failed: {}", e));
            }
        }
    }

    fn save_report(&mut self, screenshot: &egui::ColorImage) {
        let file_name = report_file_name(&self.patient.patient_id);
        let result =
            encode_png(screenshot).and_then(|png| self.platform.download(&file_name, &png));
        match result {
            Ok(Some(path)) => {
                self.ui_state.set_status(format!("Report saved to {}", path.display()))
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to save report: {}", e);
                self.ui_state.set_status(format!("Report failed: {}", e));
            }
        }
    }

    fn persist_appearance(&mut self) {
        let appearance = self.ui_state.appearance();
        if appearance != self.config.appearance {
            self.config.appearance = appearance;
            if let Err(e) = config::save_config(&self.config) {
                log::warn!("Failed to save appearance settings: {}", e);
            }
        }
    }
}

impl eframe::App for ImplantPlannerApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        let mut style = (*ctx.style()).clone();
        if self.ui_state.dark_mode {
            style.visuals = egui::Visuals::dark();
        } else {
            style.visuals = egui::Visuals::light();
        }
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Implant Planner");
                ui.separator();
                let title = match self.screen {
                    Screen::Planning(_) => "Pre-operative Treatment Planning",
                    Screen::Summary => "Treatment Plan",
                };
                ui.label(title);
                if let Some(status) = self.ui_state.status() {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        let mut event = None;
        match &mut self.screen {
            Screen::Planning(screen) => {
                event = screen
                    .show(ctx, &mut self.ui_state, &self.patient, &self.textures)
                    .map(ScreenEvent::Planning);
            }
            Screen::Summary => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        event = summary::show(ui, &self.patient, &self.textures)
                            .map(ScreenEvent::Summary);
                    });
                });
            }
        }

        if let Some(event) = event {
            self.handle_event(event);
        }

        if self.platform.take_print_request() {
            frame.request_screenshot();
        }

        self.persist_appearance();
    }

    fn post_rendering(&mut self, _window_size_px: [u32; 2], frame: &eframe::Frame) {
        if let Some(screenshot) = frame.screenshot() {
            self.save_report(&screenshot);
        }
    }
}
