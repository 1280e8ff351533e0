use serde::Deserialize;
use serde_json::Value;

use crate::models::NewContact;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("\"{0}\" is required.")]
    MissingField(&'static str),
    #[error("\"{field}\" must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("Request body must be a JSON object of strings.")]
    MalformedBody,
}

/// The raw form as posted by the website. Every key is optional and `null`
/// counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// Parse a request body. Anything other than a JSON object whose known
    /// keys hold strings (or null) is malformed.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;
        if !value.is_object() {
            return Err(ValidationError::MalformedBody);
        }
        serde_json::from_value(value).map_err(|_| ValidationError::MalformedBody)
    }

    /// Check required fields in order (name, email, message) and stop at the
    /// first one that is blank after trimming, then check every bounded
    /// field against its column width.
    pub fn validate(self) -> Result<NewContact, ValidationError> {
        let name = required("name", self.name)?;
        let email = required("email", self.email)?;
        let message = required("message", self.message)?;

        let contact = NewContact {
            name,
            email,
            phone: optional(self.phone),
            company: optional(self.company),
            service: optional(self.service),
            message,
        };

        within("name", Some(&contact.name), MAX_NAME)?;
        within("email", Some(&contact.email), MAX_EMAIL)?;
        within("phone", contact.phone.as_ref(), MAX_PHONE)?;
        within("company", contact.company.as_ref(), MAX_COMPANY)?;
        within("service", contact.service.as_ref(), MAX_SERVICE)?;

        Ok(contact)
    }
}

// Column widths of the `contacts` table, in characters.
pub const MAX_NAME: usize = 120;
pub const MAX_EMAIL: usize = 120;
pub const MAX_PHONE: usize = 30;
pub const MAX_COMPANY: usize = 120;
pub const MAX_SERVICE: usize = 80;

fn within(field: &'static str, value: Option<&String>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
