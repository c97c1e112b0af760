use dioxus::prelude::*;
use survey::Checklist;

use crate::auth::use_auth;
use crate::config::load_settings;
use crate::icons::FaBolt;
use crate::notice_panel::{NoticePanel, NoticeToggle};
use crate::notices::NoticeLog;
use crate::views::{SignInView, WorkflowView};
use crate::Icon;

/// Page frame: header, notices, and the view for the current session.
///
/// Survey progress lives here rather than in the workflow view, so it is kept
/// when the user signs out and back in.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let notices = use_signal(NoticeLog::default);
    use_context_provider(|| notices);
    use_context_provider(load_settings);

    let checklist = use_signal(Checklist::new);
    let bluetooth = use_signal(|| false);

    let state = auth();

    rsx! {
        div {
            class: "shell",
            div {
                class: "shell-card",
                header {
                    class: "shell-header",
                    h1 {
                        Icon { icon: FaBolt, width: 28, height: 28 }
                        span { "Utility Pole Measurement" }
                    }
                    NoticeToggle {}
                }
                match state.user {
                    Some(user) if state.session.is_some() => rsx! {
                        WorkflowView { email: user.email, checklist, bluetooth }
                    },
                    _ => rsx! { SignInView {} },
                }
            }
            NoticePanel {}
        }
    }
}
