//! Project selector. Binding happens synchronously against the catalog, so
//! the derived assignment and device fields arrive together with the id.

use dioxus::prelude::*;
use survey::fields::{parse_project_id, submit};
use survey::{ProjectBinding, ValidationError};

use crate::config::use_settings;
use crate::icons::FaMapLocationDot;
use crate::notices::{post_notice, use_notices, LogLevel};
use crate::Icon;

#[component]
pub fn ProjectConnect(on_connect: EventHandler<ProjectBinding>) -> Element {
    let settings = use_settings();
    let mut notices = use_notices();
    let mut choice = use_signal(String::new);
    let mut error = use_signal(|| Option::<ValidationError>::None);

    let options = settings.catalog.options().to_vec();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let catalog = &settings.catalog;
        let parsed = parse_project_id(&choice(), catalog.options());
        error.set(submit(parsed, |project_id| {
            let binding = catalog.bind(&project_id);
            if binding.assignment.is_none() {
                tracing::warn!(%project_id, "no assignment record for project");
            }
            on_connect.call(binding);
            post_notice(
                &mut notices,
                LogLevel::Success,
                &format!("Connected to Project: {project_id}"),
            );
        }));
    };

    rsx! {
        form {
            class: "field-form project-connect",
            onsubmit: handle_submit,
            h3 {
                Icon { icon: FaMapLocationDot, width: 18, height: 18 }
                " Connect to Workforce Project"
            }
            label {
                r#for: "project-id",
                "Select Project Assignment"
            }
            select {
                id: "project-id",
                class: if error().is_some() { "invalid" } else { "" },
                value: choice(),
                onchange: move |evt: FormEvent| choice.set(evt.value()),
                option { value: "", disabled: true, selected: choice().is_empty(), "-- Select Project --" }
                for opt in options {
                    option {
                        key: "{opt.project_id}",
                        value: "{opt.project_id}",
                        "{opt.project_id} - {opt.description}"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "field-error", "{err}" }
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                "Connect Project"
            }
        }
    }
}
