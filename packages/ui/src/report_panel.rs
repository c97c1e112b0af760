//! Live summary of the survey and the report action.
//!
//! Generating a report snapshots the checklist, writes the JSON to the log and
//! posts a notice. Nothing is sent anywhere.

use dioxus::prelude::*;
use survey::{Checklist, DeviceSummary};

use crate::config::use_settings;
use crate::icons::{FaCircleExclamation, FaFileLines};
use crate::notices::{post_notice, use_notices, LogLevel};
use crate::Icon;

const NOT_AVAILABLE: &str = "N/A";

#[component]
pub fn ReportPanel(checklist: Signal<Checklist>) -> Element {
    let settings = use_settings();
    let mut notices = use_notices();

    let fields = checklist();
    let ready = fields.is_ready();
    let project = fields.project();
    let device = DeviceSummary::from(project.and_then(|p| p.device.as_ref()));
    let or_na = |value: Option<&str>| value.unwrap_or(NOT_AVAILABLE).to_string();

    let project_id = or_na(project.map(|p| p.project_id.as_str()));
    let address = or_na(project.and_then(|p| p.address()));
    let scope = or_na(project.and_then(|p| p.scope_of_work()));
    let scheduled = or_na(project.and_then(|p| p.scheduled_dates()));
    let measurement = fields
        .measurement()
        .map(|m| format!("{m} m"))
        .unwrap_or_else(|| "Not entered".to_string());
    let attachment = fields
        .attachment()
        .map(|a| a.label().to_string())
        .unwrap_or_else(|| "Not selected".to_string());
    let photo = if fields.photo_captured() { "Yes" } else { "No" };

    let generate = move |_| match checklist.read().snapshot(&settings.unit) {
        Ok(snapshot) => {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => tracing::info!("Generating Report: {json}"),
                Err(e) => tracing::error!("Failed to serialise report: {e}"),
            }
            post_notice(
                &mut notices,
                LogLevel::Success,
                "Report generated successfully (simulated). Check console for details.",
            );
        }
        Err(not_ready) => {
            tracing::debug!(missing = ?not_ready.missing, "report requested early");
            post_notice(&mut notices, LogLevel::Warning, &not_ready.to_string());
        }
    };

    rsx! {
        section {
            class: "report-panel",
            h2 { "Generated Report" }
            if !ready {
                div {
                    class: "report-not-ready",
                    Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                    span { class: "report-not-ready-title", " Report Not Ready:" }
                    " Please connect to a project, enter measurement, select attachment, and capture a photo."
                }
            }
            dl {
                class: "report-fields",
                dt { "Project ID:" } dd { "{project_id}" }
                dt { "Address:" } dd { "{address}" }
                dt { "Scope:" } dd { "{scope}" }
                dt { "Scheduled:" } dd { "{scheduled}" }
                dt { "Measurement:" } dd { "{measurement}" }
                dt { "Attachment:" } dd { "{attachment}" }
                dt { "Photo Captured:" } dd { "{photo}" }
                dt { "Device S/N:" } dd { "{device.serial_number}" }
                dt { "Device Type:" } dd { "{device.device_type}" }
                dt { "Device Location:" } dd { "{device.location}" }
            }
            button {
                class: if ready { "btn-generate" } else { "btn-generate disabled" },
                disabled: !ready,
                onclick: generate,
                Icon { icon: FaFileLines, width: 16, height: 16 }
                " Generate Report"
            }
        }
    }
}
