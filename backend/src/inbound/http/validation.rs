//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EntityId, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    MalformedIdentifier,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::MalformedIdentifier => "malformed_identifier",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn malformed_identifier_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a 32-character hexadecimal token"))
        .with_details(json!({
            "field": field,
            "value": value,
            "code": ErrorCode::MalformedIdentifier.as_str(),
        }))
}

/// Parse a path or payload identifier, rejecting malformed tokens before any
/// store lookup happens.
pub(crate) fn parse_entity_id(value: &str, field: FieldName) -> Result<EntityId, Error> {
    value
        .parse()
        .map_err(|_| malformed_identifier_error(field, value))
}
