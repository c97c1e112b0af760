//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const POLECHECK_CSS: Asset = asset!("/assets/polecheck.css");

mod auth;
pub use auth::{use_auth, use_sessions, AuthProvider, AuthState, LogoutButton, SignInForm, SignUpForm};

mod config;
pub use config::{load_settings, use_settings, SurveySettings};

pub mod notices;
pub use notices::{post_notice, use_notices, LogLevel, Notice, NoticeLog};

mod notice_panel;
pub use notice_panel::{NoticePanel, NoticeToggle};

mod project_connect;
pub use project_connect::ProjectConnect;

mod measurement_input;
pub use measurement_input::MeasurementInput;

mod attachment_selector;
pub use attachment_selector::AttachmentSelector;

mod photo_capture;
pub use photo_capture::PhotoCapture;

mod bluetooth_status;
pub use bluetooth_status::{BluetoothPanel, BluetoothStatus};

mod report_panel;
pub use report_panel::ReportPanel;
