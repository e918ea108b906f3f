use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::patient::{PatientRef, XrayView};
use crate::platform::HostPlatform;
use crate::template::ImplantTemplate;

/// Placeholder measurements shown beside the canvas and written to exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    pub length: String,
    pub angle: String,
    pub diameter: String,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            length: "120mm".to_string(),
            angle: "15°".to_string(),
            diameter: "8mm".to_string(),
        }
    }
}

/// The saved treatment plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub patient_data: PatientRef,
    pub implant_templates: Vec<ImplantTemplate>,
    pub measurements: Measurements,
    pub selected_view: XrayView,
    pub timestamp: String,
}

impl ProjectExport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn file_name(&self) -> String {
        project_file_name(&self.patient_data.patient_id)
    }
}

/// Serializes the plan and hands it to the host's download facility.
pub fn save_project(
    project: &ProjectExport,
    platform: &mut dyn HostPlatform,
) -> Result<Option<PathBuf>> {
    let json = project.to_json()?;
    platform.download(&project.file_name(), json.as_bytes())
}

pub fn project_file_name(patient_id: &str) -> String {
    format!("treatment-plan-{}.json", patient_id)
}

pub fn report_file_name(patient_id: &str) -> String {
    format!("treatment-report-{}.png", patient_id)
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
