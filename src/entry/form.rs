//! Submission form validation.

use super::types::{EntryFields, DEFAULT_ROLE_CLASS};
use thiserror::Error;

/// Raw user input for a submission or an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub english_name: String,
    pub chinese_name: String,
    pub role_class: String,
    pub thankful_for: String,
}

/// A required field was left blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: &'static str,
}

impl EntryForm {
    /// Trim the input and check that every required field is present.
    ///
    /// A blank role/class becomes [`DEFAULT_ROLE_CLASS`].
    pub fn validate(&self) -> Result<EntryFields, ValidationError> {
        let english_name = required("english_name", &self.english_name)?;
        let chinese_name = required("chinese_name", &self.chinese_name)?;
        let thankful_for = required("thankful_for", &self.thankful_for)?;

        let role_class = match self.role_class.trim() {
            "" => DEFAULT_ROLE_CLASS.to_string(),
            role => role.to_string(),
        };

        Ok(EntryFields {
            english_name,
            chinese_name,
            role_class,
            thankful_for,
        })
    }
}

impl From<EntryFields> for EntryForm {
    fn from(fields: EntryFields) -> Self {
        Self {
            english_name: fields.english_name,
            chinese_name: fields.chinese_name,
            role_class: fields.role_class,
            thankful_for: fields.thankful_for,
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError { field });
    }
    Ok(trimmed.to_string())
}
