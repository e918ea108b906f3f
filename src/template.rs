use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::catalog::ImplantKind;

pub const POSITION_RANGE: RangeInclusive<f32> = 0.0..=100.0;
pub const ROTATION_RANGE: RangeInclusive<f32> = -180.0..=180.0;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const OPACITY_RANGE: RangeInclusive<f32> = 0.1..=1.0;

pub const DEFAULT_POSITION: f32 = 50.0;
pub const DEFAULT_OPACITY: f32 = 0.8;

/// An implant marker placed on the canvas.
///
/// Position is stored in surface percent space and never sees the view
/// transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplantTemplate {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl ImplantTemplate {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            x: DEFAULT_POSITION,
            y: DEFAULT_POSITION,
            rotation: 0.0,
            scale: 1.0,
            opacity: DEFAULT_OPACITY,
            visible: true,
        }
    }

    pub fn kind(&self) -> Option<ImplantKind> {
        ImplantKind::from_name(&self.name)
    }

    /// Merges the set fields of `update`, clamping each to its bound.
    pub fn apply(&mut self, update: &TemplateUpdate) {
        if let Some(x) = update.x {
            self.x = clamp_to(x, &POSITION_RANGE);
        }
        if let Some(y) = update.y {
            self.y = clamp_to(y, &POSITION_RANGE);
        }
        if let Some(rotation) = update.rotation {
            self.rotation = clamp_to(rotation, &ROTATION_RANGE);
        }
        if let Some(scale) = update.scale {
            self.scale = clamp_to(scale, &SCALE_RANGE);
        }
        if let Some(opacity) = update.opacity {
            self.opacity = clamp_to(opacity, &OPACITY_RANGE);
        }
        if let Some(visible) = update.visible {
            self.visible = visible;
        }
        debug_assert!(self.in_bounds());
    }

    pub fn in_bounds(&self) -> bool {
        POSITION_RANGE.contains(&self.x)
            && POSITION_RANGE.contains(&self.y)
            && ROTATION_RANGE.contains(&self.rotation)
            && SCALE_RANGE.contains(&self.scale)
            && OPACITY_RANGE.contains(&self.opacity)
    }
}

// NaN collapses to the lower bound so a bad input can never escape the range.
fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

/// A partial set of template fields; `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemplateUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
}

impl TemplateUpdate {
    pub fn position(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    pub fn rotation(rotation: f32) -> Self {
        Self { rotation: Some(rotation), ..Self::default() }
    }

    pub fn scale(scale: f32) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self { opacity: Some(opacity), ..Self::default() }
    }

    pub fn visible(visible: bool) -> Self {
        Self { visible: Some(visible), ..Self::default() }
    }
}
