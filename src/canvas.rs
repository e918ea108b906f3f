use egui::{Rect, Vec2};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;

/// The display-only view transform of the planning surface.
///
/// The surface is scaled about the viewport center and then shifted by the
/// pan offset (in screen pixels). Template data is never touched here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    offset: Vec2,
    zoom: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn zoom_by(&mut self, delta: f32) {
        let zoom = self.zoom + delta;
        // Round away float drift so ten zoom-ins from 1.0 land on exactly 2.0.
        let zoom = (zoom * 100.0).round() / 100.0;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    pub fn reset_view(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub fn get_offset(&self) -> Vec2 {
        self.offset
    }

    pub fn get_zoom(&self) -> f32 {
        self.zoom
    }

    /// Where the surface lands on screen when the unzoomed surface fills `view_rect`.
    pub fn get_screen_rect(&self, view_rect: Rect) -> Rect {
        let center = view_rect.center() + self.offset;
        Rect::from_center_size(center, view_rect.size() * self.zoom)
    }
}
