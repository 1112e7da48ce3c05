//! Input validation helpers shared by the DB and API layers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length for short free-text fields (names, aliases, phones).
pub const MAX_SHORT_TEXT_LENGTH: usize = 200;

/// Maximum length for long free-text fields (descriptions, comments).
pub const MAX_LONG_TEXT_LENGTH: usize = 5_000;

/// Require a non-blank value no longer than `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' is required")));
    }
    if trimmed.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "'{field}' must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Require a syntactically valid email address.
pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{field}' must be a valid email address"
        )))
    }
}

/// Validate an optional email: absent or blank is fine, otherwise it must parse.
pub fn validate_optional_email(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(email) => validate_email(field, email),
        None => Ok(()),
    }
}

/// Fields of a public hero application.
pub fn validate_application(
    name: &str,
    email: &str,
    phone: &str,
    category: &str,
) -> Result<(), CoreError> {
    validate_required("name", name, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("email", email, MAX_SHORT_TEXT_LENGTH)?;
    validate_email("email", email)?;
    validate_required("phone", phone, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("category", category, MAX_SHORT_TEXT_LENGTH)?;
    Ok(())
}

/// Blank strings count as "not supplied". Non-blank values are returned as-is.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
