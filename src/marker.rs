use egui::emath::Rot2;
use egui::{Pos2, Rect, Vec2};

use crate::catalog::ImplantKind;
use crate::coordinate::from_percent;
use crate::template::ImplantTemplate;

// Thin markers (wires, screws) would be nearly impossible to grab without this.
const HIT_PADDING: f32 = 4.0;

/// Unscaled on-screen size of each implant kind, in points.
pub fn base_size(kind: ImplantKind) -> Vec2 {
    match kind {
        ImplantKind::Plate => Vec2::new(96.0, 8.0),
        ImplantKind::Screw => Vec2::new(4.0, 32.0),
        ImplantKind::Nail => Vec2::new(8.0, 64.0),
        ImplantKind::Wire => Vec2::new(2.0, 48.0),
    }
}

/// A template's rotated rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShape {
    pub center: Pos2,
    pub half_size: Vec2,
    pub rotation: Rot2,
}

impl MarkerShape {
    /// Returns `None` for templates whose name maps to no implant kind.
    pub fn for_template(template: &ImplantTemplate, surface: Rect, zoom: f32) -> Option<Self> {
        let kind = template.kind()?;
        Some(Self {
            center: from_percent(Pos2::new(template.x, template.y), surface),
            half_size: base_size(kind) * template.scale * zoom * 0.5,
            rotation: Rot2::from_angle(template.rotation.to_radians()),
        })
    }

    pub fn corners(&self) -> [Pos2; 4] {
        let h = self.half_size;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|corner| self.center + self.rotation * corner)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        let local = self.rotation.inverse() * (pos - self.center);
        local.x.abs() <= self.half_size.x + HIT_PADDING
            && local.y.abs() <= self.half_size.y + HIT_PADDING
    }
}

/// Finds the topmost visible template under `pos`.
///
/// The selected template is drawn above the rest, then later templates
/// above earlier ones; picking follows the same order.
pub fn pick<'a>(
    templates: &'a [ImplantTemplate],
    selected: Option<&str>,
    pos: Pos2,
    surface: Rect,
    zoom: f32,
) -> Option<&'a str> {
    let hit = |template: &ImplantTemplate| {
        template.visible
            && MarkerShape::for_template(template, surface, zoom)
                .map_or(false, |shape| shape.contains(pos))
    };

    if let Some(selected) = selected {
        if let Some(template) = templates.iter().find(|t| t.id == selected) {
            if hit(template) {
                return Some(template.id.as_str());
            }
        }
    }

    templates
        .iter()
        .rev()
        .find(|template| hit(template))
        .map(|template| template.id.as_str())
}
