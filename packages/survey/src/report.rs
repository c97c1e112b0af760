//! # Report snapshot
//!
//! [`build_snapshot`] freezes a ready [`Checklist`] into a [`ReportSnapshot`], the
//! record a report would be generated from. It refuses with [`NotReady`] instead of
//! producing a partial record. The snapshot serialises with camelCase keys:
//!
//! ```json
//! {
//!   "projectId": "PROJ-2024-456",
//!   "projectAddress": "456 Oak Avenue, Anotherville",
//!   "scopeOfWork": "Install new transformer",
//!   "scheduledDates": "2024-08-22",
//!   "measurement": "15.2 meters",
//!   "primaryAttachment": "Crossarm",
//!   "photoCaptured": "Yes",
//!   "deviceInfo": { "serialNumber": "TRU-12345", "type": "TruPulse 200x", "location": "Truck 1" },
//!   "timestamp": "2024-08-22T14:03:11.512Z"
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checklist::{Checklist, Step};
use crate::models::Device;

const NOT_AVAILABLE: &str = "N/A";

/// Immutable summary of a completed survey.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub project_id: String,
    pub project_address: Option<String>,
    pub scope_of_work: Option<String>,
    pub scheduled_dates: Option<String>,
    pub measurement: String,
    pub primary_attachment: String,
    pub photo_captured: String,
    pub device_info: DeviceSummary,
    /// Generation time, ISO-8601 UTC with milliseconds.
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub serial_number: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub location: String,
}

impl From<Option<&Device>> for DeviceSummary {
    fn from(device: Option<&Device>) -> Self {
        match device {
            Some(d) => Self {
                serial_number: d.serial_number.clone(),
                device_type: d.device_type.clone(),
                location: d.location.clone(),
            },
            None => Self {
                serial_number: NOT_AVAILABLE.to_string(),
                device_type: NOT_AVAILABLE.to_string(),
                location: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// Report requested before every step was completed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Please complete all steps before generating the report.")]
pub struct NotReady {
    pub missing: Vec<Step>,
}

/// Snapshot `fields` at `generated_at`, writing the measurement in `unit`.
pub fn build_snapshot(
    fields: &Checklist,
    unit: &str,
    generated_at: DateTime<Utc>,
) -> Result<ReportSnapshot, NotReady> {
    let (Some(measurement), Some(attachment), true, Some(project)) = (
        fields.measurement(),
        fields.attachment(),
        fields.photo_captured(),
        fields.project(),
    ) else {
        return Err(NotReady {
            missing: fields.missing(),
        });
    };

    Ok(ReportSnapshot {
        project_id: project.project_id.clone(),
        project_address: project.address().map(str::to_string),
        scope_of_work: project.scope_of_work().map(str::to_string),
        scheduled_dates: project.scheduled_dates().map(str::to_string),
        measurement: format!("{measurement} {unit}"),
        primary_attachment: attachment.label().to_string(),
        photo_captured: "Yes".to_string(),
        device_info: DeviceSummary::from(project.device.as_ref()),
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Attachment, Measurement};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 22, 14, 3, 11).unwrap()
    }

    #[test]
    fn test_refuses_partial_checklist() {
        let mut fields = Checklist::default();
        fields.record_measurement(Measurement::new(9.5).unwrap());
        fields.select_attachment(Attachment::Insulator);

        let err = build_snapshot(&fields, "meters", at()).unwrap_err();
        assert_eq!(err.missing, vec![Step::Project, Step::Photo]);
        assert_eq!(
            err.to_string(),
            "Please complete all steps before generating the report."
        );
    }

    #[test]
    fn test_snapshot_fields_and_json_shape() {
        let catalog = Catalog::builtin();
        let mut fields = Checklist::default();
        fields.bind_project(catalog.bind("PROJ-2024-123"));
        fields.record_measurement(Measurement::new(12.0).unwrap());
        fields.select_attachment(Attachment::GuyWire);
        fields.mark_photo_captured();

        let snapshot = build_snapshot(&fields, "meters", at()).unwrap();
        assert_eq!(snapshot.measurement, "12 meters");
        assert_eq!(snapshot.primary_attachment, "Guy Wire");
        assert_eq!(snapshot.photo_captured, "Yes");
        assert_eq!(snapshot.scope_of_work.as_deref(), Some("Replace damaged pole"));
        assert_eq!(snapshot.timestamp, "2024-08-22T14:03:11.000Z");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["projectAddress"], "123 Main Street, Anytown");
        assert_eq!(json["scheduledDates"], "2024-08-15");
        assert_eq!(json["deviceInfo"]["serialNumber"], "TRU-12345");
        assert_eq!(json["deviceInfo"]["type"], "TruPulse 200x");
    }

    #[test]
    fn test_unlisted_project_reports_missing_details() {
        let mut fields = Checklist::default();
        fields.bind_project(Catalog::default().bind("PROJ-2024-789"));
        fields.record_measurement(Measurement::new(3.3).unwrap());
        fields.select_attachment(Attachment::Other);
        fields.mark_photo_captured();

        let snapshot = build_snapshot(&fields, "ft", at()).unwrap();
        assert_eq!(snapshot.project_id, "PROJ-2024-789");
        assert!(snapshot.project_address.is_none());
        assert_eq!(snapshot.measurement, "3.3 ft");
        assert_eq!(snapshot.device_info.serial_number, "TRU-12345");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["projectAddress"].is_null());
    }

    #[test]
    fn test_missing_device_is_not_available() {
        let summary = DeviceSummary::from(None);
        assert_eq!(summary.serial_number, "N/A");
        assert_eq!(summary.device_type, "N/A");
        assert_eq!(summary.location, "N/A");
    }
}
