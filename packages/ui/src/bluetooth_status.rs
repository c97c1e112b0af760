//! Rangefinder link indicator.
//!
//! There is no radio behind this: connecting only flips local state.

use dioxus::prelude::*;

use crate::notices::{post_notice, use_notices, LogLevel};
use crate::Icon;
use dioxus_free_icons::icons::fa_brands_icons::FaBluetoothB;

#[component]
pub fn BluetoothStatus(connected: bool) -> Element {
    rsx! {
        div {
            class: if connected { "bluetooth-status connected" } else { "bluetooth-status disconnected" },
            Icon { icon: FaBluetoothB, width: 16, height: 16 }
            if connected {
                span { "Bluetooth Connected" }
            } else {
                span { "Bluetooth Disconnected" }
            }
        }
    }
}

/// Status plus a connect button, hidden once connected.
#[component]
pub fn BluetoothPanel(mut connected: Signal<bool>) -> Element {
    let mut notices = use_notices();

    rsx! {
        div {
            class: "bluetooth-panel",
            BluetoothStatus { connected: connected() }
            if !connected() {
                button {
                    class: "btn-primary",
                    onclick: move |_| {
                        connected.set(true);
                        post_notice(
                            &mut notices,
                            LogLevel::Info,
                            "Simulating Bluetooth connection to TruPulse 200x",
                        );
                    },
                    "Connect Bluetooth"
                }
            }
        }
    }
}
