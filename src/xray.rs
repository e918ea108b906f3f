use egui::{Color32, ColorImage, Context, Painter, Rect, TextureHandle, TextureOptions};
use std::path::Path;

use crate::coordinate::contain_rect;
use crate::error::Result;
use crate::patient::{ImageRef, PatientRef, XrayView};

pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let image = image::open(path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_flat_samples().as_slice()))
}

/// Decoded textures for the patient's two X-ray views.
///
/// A missing or unreadable image leaves its slot empty and the panel is
/// drawn black.
#[derive(Default)]
pub struct XrayTextures {
    ap: Option<TextureHandle>,
    lateral: Option<TextureHandle>,
}

impl XrayTextures {
    pub fn load(ctx: &Context, patient: &PatientRef) -> Self {
        Self {
            ap: load_texture(ctx, "xray-ap", patient.image(XrayView::Ap)),
            lateral: load_texture(ctx, "xray-lateral", patient.image(XrayView::Lateral)),
        }
    }

    pub fn get(&self, view: XrayView) -> Option<&TextureHandle> {
        match view {
            XrayView::Ap => self.ap.as_ref(),
            XrayView::Lateral => self.lateral.as_ref(),
        }
    }

    /// Fills `rect` black and draws the view's image over it, letterboxed.
    pub fn paint(&self, painter: &Painter, rect: Rect, view: XrayView) {
        painter.rect_filled(rect, 0.0, Color32::BLACK);
        if let Some(texture) = self.get(view) {
            let image_rect = contain_rect(texture.size_vec2(), rect);
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), image_rect, uv, Color32::WHITE);
        }
    }
}

fn load_texture(ctx: &Context, name: &str, image: Option<&ImageRef>) -> Option<TextureHandle> {
    let image = image?;
    match load_color_image(image.as_path()) {
        Ok(color_image) => {
            log::info!(
                "Loaded {} from {:?} ({}x{})",
                name,
                image.as_path(),
                color_image.size[0],
                color_image.size[1]
            );
            Some(ctx.load_texture(name, color_image, TextureOptions::LINEAR))
        }
        Err(e) => {
            log::warn!("Failed to load {} from {:?}: {}", name, image.as_path(), e);
            None
        }
    }
}
