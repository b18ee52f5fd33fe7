use serde::{Deserialize, Serialize};

/// A single field that failed its contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Required text: must not be blank and must fit in `max_len` characters.
pub fn check_required_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) {
    match value {
        None => errors.push(FieldError::new(field, "field required")),
        Some(v) if v.trim().is_empty() => {
            errors.push(FieldError::new(field, "must not be empty"))
        }
        Some(v) => check_max_len(errors, field, v, max_len),
    }
}

/// Length limits count characters, not bytes.
pub fn check_max_len(errors: &mut Vec<FieldError>, field: &str, value: &str, max_len: usize) {
    if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }
}
