use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PlannerError, Result};
use crate::patient::{ImageRef, PatientRef};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub patient: PatientConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// The patient handed to both screens. Image paths are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientConfig {
    #[serde(default = "default_patient_id")]
    pub patient_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub ap_image: Option<String>,
    pub lat_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_false")]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_measurements: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub default_dir: Option<PathBuf>,
}

// Default value functions
fn default_patient_id() -> String {
    "UNASSIGNED".to_string()
}

fn default_grid_size() -> f32 {
    20.0
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for PatientConfig {
    fn default() -> Self {
        Self {
            patient_id: default_patient_id(),
            first_name: String::new(),
            last_name: String::new(),
            ap_image: None,
            lat_image: None,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_grid: true,
            show_measurements: true,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
        }
    }
}

impl PatientConfig {
    pub fn to_patient(&self) -> PatientRef {
        PatientRef {
            patient_id: self.patient_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            ap_image: non_empty(&self.ap_image).map(ImageRef),
            lat_image: non_empty(&self.lat_image).map(ImageRef),
        }
    }
}

fn non_empty(path: &Option<String>) -> Option<String> {
    path.as_ref().filter(|p| !p.trim().is_empty()).cloned()
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "implant_planner")
        .ok_or(PlannerError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

pub fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration from file, or return default if it is missing or broken
pub fn load_config() -> AppConfig {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            return AppConfig::default();
        }
    };

    if !path.exists() {
        log::info!("No config file at {:?}, using defaults", path);
        return AppConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            log::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("Failed to load config file {:?}: {}. Using defaults.", path, e);
            AppConfig::default()
        }
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml)?;
    log::debug!("Saved config to {:?}", path);

    Ok(())
}
