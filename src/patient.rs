use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque handle to an X-ray image. On desktop this is a file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Patient identity plus the two X-ray views, supplied by the shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub ap_image: Option<ImageRef>,
    pub lat_image: Option<ImageRef>,
}

impl PatientRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn image(&self, view: XrayView) -> Option<&ImageRef> {
        match view {
            XrayView::Ap => self.ap_image.as_ref(),
            XrayView::Lateral => self.lat_image.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XrayView {
    #[default]
    Ap,
    Lateral,
}

impl XrayView {
    pub fn title(self) -> &'static str {
        match self {
            XrayView::Ap => "Anteroposterior (AP)",
            XrayView::Lateral => "Lateral",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            XrayView::Ap => "AP View",
            XrayView::Lateral => "Lateral View",
        }
    }
}
