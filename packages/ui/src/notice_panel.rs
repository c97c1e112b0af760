//! Panel and toggle for the notice log.

use dioxus::prelude::*;

use crate::icons::{FaBell, FaCircleCheck, FaCircleInfo, FaCircleXmark, FaTriangleExclamation};
use crate::notices::{use_notices, LogLevel, Notice};
use crate::Icon;

#[component]
pub fn NoticePanel() -> Element {
    let mut log = use_notices();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().entries.clone();

    rsx! {
        aside {
            class: "notice-panel",
            header {
                class: "notice-header",
                span { "Notices" }
                div {
                    class: "notice-header-actions",
                    button {
                        disabled: entries.is_empty(),
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            if entries.is_empty() {
                p { class: "notice-empty", "Nothing yet." }
            }
            ul {
                class: "notice-entries",
                for entry in entries.iter().rev().cloned() {
                    NoticeRow { notice: entry }
                }
            }
        }
    }
}

#[component]
fn NoticeRow(notice: Notice) -> Element {
    let (class, icon) = match notice.level {
        LogLevel::Error => ("notice-entry error", rsx! { Icon { icon: FaCircleXmark, width: 12, height: 12 } }),
        LogLevel::Warning => (
            "notice-entry warning",
            rsx! { Icon { icon: FaTriangleExclamation, width: 12, height: 12 } },
        ),
        LogLevel::Success => ("notice-entry success", rsx! { Icon { icon: FaCircleCheck, width: 12, height: 12 } }),
        LogLevel::Info => ("notice-entry info", rsx! { Icon { icon: FaCircleInfo, width: 12, height: 12 } }),
    };

    rsx! {
        li {
            class,
            {icon}
            span { class: "notice-time", "{notice.timestamp}" }
            span { class: "notice-message", "{notice.message}" }
        }
    }
}

/// Bell button showing how many notices have been posted.
#[component]
pub fn NoticeToggle() -> Element {
    let mut log = use_notices();
    let count = log().entries.len();
    let has_errors = log().entries.iter().any(|e| e.level == LogLevel::Error);

    rsx! {
        button {
            class: if has_errors { "notice-toggle has-errors" } else { "notice-toggle" },
            title: "Notices",
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            Icon { icon: FaBell, width: 14, height: 14 }
            if count > 0 {
                span { class: "notice-count", "{count}" }
            }
        }
    }
}
