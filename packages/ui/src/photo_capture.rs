use dioxus::prelude::*;
use survey::CaptureLatch;

use crate::icons::{FaCamera, FaCircleCheck};
use crate::notices::{post_notice, use_notices, LogLevel};
use crate::Icon;

/// Simulated site photo. Fires `on_capture` once; the button then stays disabled.
///
/// `already_captured` restores the latch when the view is mounted again.
#[component]
pub fn PhotoCapture(
    on_capture: EventHandler<()>,
    #[props(!optional)] project_address: Option<String>,
    #[props(default)] already_captured: bool,
) -> Element {
    let mut latch = use_signal(|| {
        let mut latch = CaptureLatch::new();
        if already_captured {
            latch.trigger(|| ());
        }
        latch
    });
    let mut notices = use_notices();
    let captured = latch().is_captured();

    let handle_capture = move |_| {
        let target = project_address
            .clone()
            .unwrap_or_else(|| "the current project".to_string());
        let fired = latch.write().trigger(|| on_capture.call(()));
        if fired {
            post_notice(
                &mut notices,
                LogLevel::Success,
                &format!("Simulated photo capture for {target}."),
            );
        }
    };

    rsx! {
        div {
            class: "photo-capture",
            label { "Capture Site Photo" }
            button {
                class: if captured { "btn-captured" } else { "btn-primary" },
                disabled: captured,
                onclick: handle_capture,
                if captured {
                    Icon { icon: FaCircleCheck, width: 16, height: 16 }
                    " Photo Captured"
                } else {
                    Icon { icon: FaCamera, width: 16, height: 16 }
                    " Capture Photo"
                }
            }
            if captured {
                p { class: "field-success", "Photo successfully captured (simulated)." }
            }
        }
    }
}
