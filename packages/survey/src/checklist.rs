//! Committed survey state and the readiness predicate derived from it.
//!
//! A [`Checklist`] only ever gains values: fields can be overwritten by a later
//! commit but never cleared, and the photo flag only goes from false to true.
//! "Ready" is computed on demand by [`is_ready`] and never stored.

use std::fmt;

use chrono::Utc;

use crate::models::{Attachment, Measurement, ProjectBinding};
use crate::report::{build_snapshot, NotReady, ReportSnapshot};

/// True iff every required step has been committed.
pub fn is_ready(
    measurement: Option<Measurement>,
    attachment: Option<Attachment>,
    photo_captured: bool,
    project_id: Option<&str>,
) -> bool {
    measurement.is_some() && attachment.is_some() && photo_captured && project_id.is_some()
}

/// A required step of the survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Project,
    Measurement,
    Attachment,
    Photo,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Project => "connect to a project",
            Step::Measurement => "enter measurement",
            Step::Attachment => "select attachment",
            Step::Photo => "capture a photo",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Checklist {
    measurement: Option<Measurement>,
    attachment: Option<Attachment>,
    photo_captured: bool,
    project: Option<ProjectBinding>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measurement(&self) -> Option<Measurement> {
        self.measurement
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    pub fn photo_captured(&self) -> bool {
        self.photo_captured
    }

    pub fn project(&self) -> Option<&ProjectBinding> {
        self.project.as_ref()
    }

    pub fn record_measurement(&mut self, measurement: Measurement) {
        self.measurement = Some(measurement);
    }

    pub fn select_attachment(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    /// Returns `false` if a photo had already been captured.
    pub fn mark_photo_captured(&mut self) -> bool {
        !std::mem::replace(&mut self.photo_captured, true)
    }

    /// Connecting again replaces the previous binding.
    pub fn bind_project(&mut self, binding: ProjectBinding) {
        self.project = Some(binding);
    }

    pub fn is_ready(&self) -> bool {
        is_ready(
            self.measurement,
            self.attachment,
            self.photo_captured,
            self.project.as_ref().map(|p| p.project_id.as_str()),
        )
    }

    /// Steps still outstanding, in workflow order.
    pub fn missing(&self) -> Vec<Step> {
        let mut missing = Vec::new();
        if self.project.is_none() {
            missing.push(Step::Project);
        }
        if self.measurement.is_none() {
            missing.push(Step::Measurement);
        }
        if self.attachment.is_none() {
            missing.push(Step::Attachment);
        }
        if !self.photo_captured {
            missing.push(Step::Photo);
        }
        missing
    }

    /// Snapshot the checklist now.
    pub fn snapshot(&self, unit: &str) -> Result<ReportSnapshot, NotReady> {
        build_snapshot(self, unit, Utc::now())
    }
}
