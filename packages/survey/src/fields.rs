//! Validate-then-emit helpers shared by the form fields.
//!
//! Each parser turns raw form input into a committed value or a
//! [`ValidationError`]. [`submit`] runs the commit callback only for valid input,
//! and hands the error back for the field to display; it never escapes further.

use thiserror::Error;

use crate::models::{Attachment, Measurement, ProjectOption};

/// The form field an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Measurement,
    Attachment,
    Project,
}

impl Field {
    fn required_message(&self) -> &'static str {
        match self {
            Field::Measurement => "Measurement is required",
            Field::Attachment => "Please select an attachment",
            Field::Project => "Please select a project",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Field::Measurement => "measurement",
            Field::Attachment => "attachment",
            Field::Project => "project",
        }
    }
}

/// Field-local validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", .0.required_message())]
    Required(Field),
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Measurement must be greater than 0.01 m")]
    TooSmall,
    #[error("\"{value}\" is not a known {}", .field.noun())]
    Unknown { field: Field, value: String },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) | ValidationError::Unknown { field, .. } => *field,
            ValidationError::NotANumber | ValidationError::TooSmall => Field::Measurement,
        }
    }
}

/// Parse a measurement as typed into the height field.
pub fn parse_measurement(input: &str) -> Result<Measurement, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required(Field::Measurement));
    }
    let meters: f64 = input.parse().map_err(|_| ValidationError::NotANumber)?;
    Measurement::new(meters)
}

/// Parse the selected attachment label.
pub fn parse_attachment(input: &str) -> Result<Attachment, ValidationError> {
    input.trim().parse()
}

/// Accept a project id only if it is one of the selector options.
pub fn parse_project_id(input: &str, options: &[ProjectOption]) -> Result<String, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required(Field::Project));
    }
    options
        .iter()
        .find(|o| o.project_id == input)
        .map(|o| o.project_id.clone())
        .ok_or_else(|| ValidationError::Unknown {
            field: Field::Project,
            value: input.to_string(),
        })
}

/// Commit a parsed value through `on_valid`, or return the error to display.
///
/// `on_valid` runs exactly once on success and never on failure.
pub fn submit<T>(
    parsed: Result<T, ValidationError>,
    on_valid: impl FnOnce(T),
) -> Option<ValidationError> {
    match parsed {
        Ok(value) => {
            on_valid(value);
            None
        }
        Err(e) => Some(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_measurement_commits_only_above_threshold() {
        let cases = [
            ("15.2", true),
            ("0.02", true),
            ("  7 ", true),
            ("1e2", true),
            ("0.01", false),
            ("0", false),
            ("-4.5", false),
            ("", false),
            ("   ", false),
            ("abc", false),
            ("12m", false),
            ("NaN", false),
            ("inf", false),
        ];
        for (input, accepted) in cases {
            let mut fired = 0;
            let error = submit(parse_measurement(input), |_| fired += 1);
            assert_eq!(fired == 1, accepted, "input {input:?}");
            assert_eq!(error.is_none(), accepted, "input {input:?}");
        }
    }

    #[test]
    fn test_measurement_error_messages() {
        assert_eq!(
            parse_measurement("").unwrap_err().to_string(),
            "Measurement is required"
        );
        assert_eq!(
            parse_measurement("twelve").unwrap_err().to_string(),
            "Please enter a valid number"
        );
        assert_eq!(
            parse_measurement("0.005").unwrap_err().to_string(),
            "Measurement must be greater than 0.01 m"
        );
    }

    #[test]
    fn test_attachment_commits_members_only() {
        let mut committed = Vec::new();
        for label in ["Crossarm", "Communication Cable", "Other"] {
            assert!(submit(parse_attachment(label), |a| committed.push(a)).is_none());
        }
        assert_eq!(
            committed,
            vec![Attachment::Crossarm, Attachment::CommunicationCable, Attachment::Other]
        );

        for label in ["", "Pole", "transformer"] {
            let error = submit(parse_attachment(label), |_| panic!("committed {label:?}"));
            assert!(error.is_some());
        }
        assert_eq!(
            parse_attachment("").unwrap_err().to_string(),
            "Please select an attachment"
        );
    }

    #[test]
    fn test_project_id_must_be_an_option() {
        let catalog = Catalog::builtin();
        assert_eq!(
            parse_project_id("PROJ-2024-789", catalog.options()),
            Ok("PROJ-2024-789".to_string())
        );
        assert_eq!(
            parse_project_id("", catalog.options()),
            Err(ValidationError::Required(Field::Project))
        );
        let err = parse_project_id("PROJ-1999-000", catalog.options()).unwrap_err();
        assert_eq!(err.field(), Field::Project);
        assert_eq!(err.to_string(), "\"PROJ-1999-000\" is not a known project");
    }
}
