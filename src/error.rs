use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Screenshot has invalid dimensions {0}x{1}")]
    Screenshot(usize, usize),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
