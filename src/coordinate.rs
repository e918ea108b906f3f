use egui::{Pos2, Rect, Vec2};

use crate::template::POSITION_RANGE;

/// Converts a screen position to percent of `surface`, unclamped.
pub fn to_percent(screen_pos: Pos2, surface: Rect) -> Pos2 {
    let local = screen_pos - surface.min;
    Pos2::new(
        local.x * 100.0 / surface.width(),
        local.y * 100.0 / surface.height(),
    )
}

/// Converts a percent position back to a screen position on `surface`.
pub fn from_percent(percent: Pos2, surface: Rect) -> Pos2 {
    surface.min
        + Vec2::new(
            percent.x * surface.width() / 100.0,
            percent.y * surface.height() / 100.0,
        )
}

/// Clamps each axis to the stored position range independently.
pub fn clamp_percent(percent: Pos2) -> Pos2 {
    let (min, max) = (*POSITION_RANGE.start(), *POSITION_RANGE.end());
    Pos2::new(percent.x.clamp(min, max), percent.y.clamp(min, max))
}

/// Largest rect with the image's aspect ratio that fits in `bounds`, centered.
pub fn contain_rect(image_size: Vec2, bounds: Rect) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / image_size.x).min(bounds.height() / image_size.y);
    Rect::from_center_size(bounds.center(), image_size * scale)
}
