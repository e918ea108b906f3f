use std::time::{Duration, Instant};

use crate::config::AppearanceConfig;

const STATUS_LIFETIME: Duration = Duration::from_secs(6);

pub struct UiState {
    // Appearance settings
    pub dark_mode: bool,
    pub show_grid: bool,
    pub show_measurements: bool,

    // Transient status line
    status: Option<(String, Instant)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&AppearanceConfig::default())
    }
}

impl UiState {
    pub fn from_config(appearance: &AppearanceConfig) -> Self {
        Self {
            dark_mode: appearance.dark_mode,
            show_grid: appearance.show_grid,
            show_measurements: appearance.show_measurements,
            status: None,
        }
    }

    pub fn appearance(&self) -> AppearanceConfig {
        AppearanceConfig {
            dark_mode: self.dark_mode,
            show_grid: self.show_grid,
            show_measurements: self.show_measurements,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_LIFETIME)
            .map(|(message, _)| message.as_str())
    }
}
