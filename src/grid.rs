use egui::{Color32, Painter, Rect, Stroke};

/// Reference grid drawn over the X-ray, in surface points.
pub struct Grid {
    size: f32,
    visible: bool,
}

impl Grid {
    pub fn new(size: f32, visible: bool) -> Self {
        Self {
            size: size.max(1.0),
            visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Offsets of grid lines along an axis of length `extent`, at `zoom`.
    ///
    /// Lines are anchored to the surface origin so they move with pan and zoom.
    pub fn line_offsets(&self, extent: f32, zoom: f32) -> Vec<f32> {
        let step = self.size * zoom;
        if step < 4.0 {
            return Vec::new();
        }
        let count = (extent / step).floor() as usize;
        (0..=count).map(|i| i as f32 * step).collect()
    }

    pub fn draw(&self, painter: &Painter, surface: Rect, zoom: f32) {
        if !self.is_visible() {
            return;
        }

        let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(255, 255, 255, 50));

        // Draw vertical grid lines
        for dx in self.line_offsets(surface.width(), zoom) {
            let x = surface.min.x + dx;
            painter.line_segment(
                [egui::pos2(x, surface.min.y), egui::pos2(x, surface.max.y)],
                stroke,
            );
        }

        // Draw horizontal grid lines
        for dy in self.line_offsets(surface.height(), zoom) {
            let y = surface.min.y + dy;
            painter.line_segment(
                [egui::pos2(surface.min.x, y), egui::pos2(surface.max.x, y)],
                stroke,
            );
        }
    }
}
