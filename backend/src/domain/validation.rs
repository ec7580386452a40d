//! Field constraint checks for Person, Post, and Reaction documents.
//!
//! These are the constraints the store enforces on create and update
//! (required, trimming, length bounds, address shape). Violations carry the
//! offending field so adapters can report per-field detail.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::json;

use crate::domain::Error;

/// Minimum length in characters of a post or reaction body.
pub const BODY_MIN: usize = 1;
/// Maximum length in characters of a post or reaction body.
pub const BODY_MAX: usize = 280;

static ADDRESS_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("address pattern compiles")
});

/// A single field constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },
    /// A text field falls outside its length bounds.
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
    /// The contact address does not look like an email address.
    #[error("{field} must match a valid email address")]
    Shape { field: &'static str },
}

impl FieldViolation {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::Length { field, .. } | Self::Shape { field } => field,
        }
    }

    /// Stable violation code for structured error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::Length { .. } => "length",
            Self::Shape { .. } => "shape",
        }
    }
}

/// Trim and check a handle: required, non-blank.
pub fn validate_handle(handle: &str) -> Result<String, FieldViolation> {
    let trimmed = handle.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Required { field: "handle" });
    }
    Ok(trimmed.to_owned())
}

/// Trim and check a contact address: required, email-shaped.
pub fn validate_address(address: &str) -> Result<String, FieldViolation> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Required { field: "address" });
    }
    if !ADDRESS_SHAPE.is_match(trimmed) {
        return Err(FieldViolation::Shape { field: "address" });
    }
    Ok(trimmed.to_owned())
}

/// Check a post or reaction body: required, 1-280 characters.
pub fn validate_body(field: &'static str, body: &str) -> Result<String, FieldViolation> {
    let length = body.chars().count();
    if length < BODY_MIN || length > BODY_MAX {
        return Err(FieldViolation::Length {
            field,
            min: BODY_MIN,
            max: BODY_MAX,
        });
    }
    Ok(body.to_owned())
}

/// Check an author handle snapshot: required, non-blank.
pub fn validate_author_handle(field: &'static str, handle: &str) -> Result<String, FieldViolation> {
    let trimmed = handle.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Required { field });
    }
    Ok(trimmed.to_owned())
}

/// Build the `ValidationFailed` classification from collected violations,
/// carrying per-field detail.
pub fn validation_error(violations: &[FieldViolation]) -> Error {
    let fields: Vec<serde_json::Value> = violations
        .iter()
        .map(|violation| {
            json!({
                "field": violation.field(),
                "code": violation.code(),
                "message": violation.to_string(),
            })
        })
        .collect();
    Error::invalid_request("validation failed").with_details(json!({ "violations": fields }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("ada", "ada")]
    #[case("  ada  ", "ada")]
    fn handles_are_trimmed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_handle(input), Ok(expected.to_owned()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_handles_are_required(#[case] input: &str) {
        assert_eq!(
            validate_handle(input),
            Err(FieldViolation::Required { field: "handle" })
        );
    }

    #[rstest]
    #[case("ada@x.com")]
    #[case("ada.lovelace@analytical-engines.org")]
    fn email_shaped_addresses_pass(#[case] input: &str) {
        assert_eq!(validate_address(input), Ok(input.to_owned()));
    }

    #[rstest]
    #[case("ada")]
    #[case("ada@")]
    #[case("@x.com")]
    #[case("ada@x")]
    #[case("ada@x.commerce")]
    fn non_email_addresses_fail_the_shape_check(#[case] input: &str) {
        assert_eq!(
            validate_address(input),
            Err(FieldViolation::Shape { field: "address" })
        );
    }

    #[test]
    fn bodies_must_fit_the_length_bounds() {
        assert!(validate_body("body", "a").is_ok());
        assert!(validate_body("body", &"a".repeat(BODY_MAX)).is_ok());
        assert_eq!(
            validate_body("body", ""),
            Err(FieldViolation::Length {
                field: "body",
                min: BODY_MIN,
                max: BODY_MAX
            })
        );
        assert!(validate_body("body", &"a".repeat(BODY_MAX + 1)).is_err());
    }

    #[test]
    fn body_length_counts_characters_not_bytes() {
        let body = "\u{1F389}".repeat(BODY_MAX);
        assert!(validate_body("body", &body).is_ok());
    }

    #[test]
    fn validation_error_names_every_offending_field() {
        let violations = [
            FieldViolation::Required { field: "handle" },
            FieldViolation::Shape { field: "address" },
        ];
        let error = validation_error(&violations);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        let listed = details["violations"]
            .as_array()
            .expect("violations array");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["field"], "handle");
        assert_eq!(listed[1]["code"], "shape");
    }
}
