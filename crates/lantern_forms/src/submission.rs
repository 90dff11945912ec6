//! Contact submission and its validation rules

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_SHORT_FIELD: usize = 200;
const MAX_MESSAGE: usize = 5000;

/// Form fields, by their `name` attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn all() -> &'static [Field] {
        const FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];
        &FIELDS
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("email is not a valid address")]
    InvalidEmail,

    #[error("{field} is longer than {max} characters")]
    TooLong { field: Field, max: usize },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::Required(field) | Self::TooLong { field, .. } => *field,
            Self::InvalidEmail => Field::Email,
        }
    }
}

/// Payload of the `submit contact form` remote call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Check every field; all problems are reported, in field order
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for field in Field::all() {
            let value = self.get(*field);
            if value.trim().is_empty() {
                errors.push(FieldError::Required(*field));
                continue;
            }
            let max = match field {
                Field::Message => MAX_MESSAGE,
                _ => MAX_SHORT_FIELD,
            };
            if value.chars().count() > max {
                errors.push(FieldError::TooLong { field: *field, max });
            } else if *field == Field::Email && !is_plausible_email(value) {
                errors.push(FieldError::InvalidEmail);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// `local@domain.tld` with exactly one `@` and no whitespace
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
