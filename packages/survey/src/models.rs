//! # Domain models for a pole survey
//!
//! The values a technician commits while working through a survey, plus the
//! candidate records they are looked up against.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Measurement`] | Pole height in meters. Only constructible through validation, so a held value is always `> 0.01`. |
//! | [`Attachment`] | The primary attachment on the pole, one of a fixed set of seven. |
//! | [`ProjectOption`] | An entry in the project selector (id + human description). |
//! | [`ProjectAssignment`] | A work-order record: address, scope of work and scheduled dates for a project id. |
//! | [`Device`] | A measuring device known to the dispatch side (serial, type, location). |
//! | [`ProjectBinding`] | The result of connecting to a project: the id plus whatever the candidate tables knew about it. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fields::{Field, ValidationError};

/// A validated pole height, in meters.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Measurement(f64);

impl Measurement {
    /// Smallest value that is still rejected. Valid measurements are strictly greater.
    pub const MIN_METERS: f64 = 0.01;

    pub fn new(meters: f64) -> Result<Self, ValidationError> {
        if !meters.is_finite() {
            return Err(ValidationError::NotANumber);
        }
        if meters <= Self::MIN_METERS {
            return Err(ValidationError::TooSmall);
        }
        Ok(Self(meters))
    }

    pub fn meters(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary attachment found on the pole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attachment {
    Transformer,
    Crossarm,
    Insulator,
    Streetlight,
    #[serde(rename = "Communication Cable")]
    CommunicationCable,
    #[serde(rename = "Guy Wire")]
    GuyWire,
    Other,
}

impl Attachment {
    /// Every selectable attachment, in selector order.
    pub const ALL: [Attachment; 7] = [
        Attachment::Transformer,
        Attachment::Crossarm,
        Attachment::Insulator,
        Attachment::Streetlight,
        Attachment::CommunicationCable,
        Attachment::GuyWire,
        Attachment::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attachment::Transformer => "Transformer",
            Attachment::Crossarm => "Crossarm",
            Attachment::Insulator => "Insulator",
            Attachment::Streetlight => "Streetlight",
            Attachment::CommunicationCable => "Communication Cable",
            Attachment::GuyWire => "Guy Wire",
            Attachment::Other => "Other",
        }
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Attachment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::Required(Field::Attachment));
        }
        Attachment::ALL
            .into_iter()
            .find(|a| a.label() == s)
            .ok_or_else(|| ValidationError::Unknown {
                field: Field::Attachment,
                value: s.to_string(),
            })
    }
}

/// One entry of the project selector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectOption {
    pub project_id: String,
    pub description: String,
}

/// Work-order details for a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    pub project_id: String,
    pub address: String,
    pub scope_of_work: String,
    pub scheduled_dates: String,
}

/// A measuring device registered with dispatch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub serial_number: String,
    pub device_type: String,
    pub location: String,
}

/// A connected project and the details derived from it.
///
/// `assignment` is `None` when the id was selectable but the assignment table has
/// no record for it; the binding still counts for readiness.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectBinding {
    pub project_id: String,
    pub assignment: Option<ProjectAssignment>,
    pub device: Option<Device>,
}

impl ProjectBinding {
    pub fn address(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.address.as_str())
    }

    pub fn scope_of_work(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.scope_of_work.as_str())
    }

    pub fn scheduled_dates(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.scheduled_dates.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_bounds() {
        assert!(Measurement::new(0.01).is_err());
        assert!(Measurement::new(0.0).is_err());
        assert!(Measurement::new(-3.0).is_err());
        assert_eq!(Measurement::new(0.011).unwrap().meters(), 0.011);
        assert_eq!(Measurement::new(f64::NAN), Err(ValidationError::NotANumber));
        assert_eq!(Measurement::new(f64::INFINITY), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_measurement_display_matches_plain_number() {
        assert_eq!(Measurement::new(15.2).unwrap().to_string(), "15.2");
        assert_eq!(Measurement::new(12.0).unwrap().to_string(), "12");
    }

    #[test]
    fn test_attachment_labels_parse_back() {
        for attachment in Attachment::ALL {
            assert_eq!(attachment.label().parse::<Attachment>(), Ok(attachment));
        }
        assert_eq!(
            "Guy Wire".parse::<Attachment>(),
            Ok(Attachment::GuyWire)
        );
    }

    #[test]
    fn test_attachment_rejects_unknown_and_empty() {
        assert_eq!(
            "".parse::<Attachment>(),
            Err(ValidationError::Required(Field::Attachment))
        );
        assert!(matches!(
            "crossarm".parse::<Attachment>(),
            Err(ValidationError::Unknown { .. })
        ));
    }
}
