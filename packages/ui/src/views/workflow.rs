use dioxus::prelude::*;
use survey::{Attachment, Checklist, Measurement, ProjectBinding};

use crate::attachment_selector::AttachmentSelector;
use crate::auth::LogoutButton;
use crate::bluetooth_status::BluetoothPanel;
use crate::measurement_input::MeasurementInput;
use crate::notices::{post_notice, use_notices, LogLevel};
use crate::photo_capture::PhotoCapture;
use crate::project_connect::ProjectConnect;
use crate::report_panel::ReportPanel;

/// The survey for a signed-in technician.
#[component]
pub fn WorkflowView(email: String, mut checklist: Signal<Checklist>, bluetooth: Signal<bool>) -> Element {
    let mut notices = use_notices();
    let fields = checklist();
    let project_address = fields
        .project()
        .and_then(|p| p.address())
        .map(str::to_string);

    let on_connect = move |binding: ProjectBinding| checklist.write().bind_project(binding);
    let on_measurement = move |measurement: Measurement| {
        checklist.write().record_measurement(measurement);
        post_notice(
            &mut notices,
            LogLevel::Info,
            &format!("Measurement submitted: {measurement} m"),
        );
    };
    let on_select = move |attachment: Attachment| checklist.write().select_attachment(attachment);
    let on_capture = move |_: ()| {
        checklist.write().mark_photo_captured();
    };

    rsx! {
        div {
            class: "workflow-view",
            div {
                class: "welcome-banner",
                p {
                    "Welcome, "
                    span { class: "welcome-email", "{email}" }
                }
                LogoutButton { class: "btn-secondary" }
            }

            ProjectConnect { on_connect }

            div {
                class: "field-steps",
                BluetoothPanel { connected: bluetooth }
                MeasurementInput { on_measurement }
                AttachmentSelector { on_select }
                PhotoCapture {
                    on_capture,
                    project_address,
                    already_captured: fields.photo_captured(),
                }
            }

            ReportPanel { checklist }
        }
    }
}
