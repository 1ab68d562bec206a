use nutype::nutype;
use serde::Deserialize;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A validated contact form submission. It only lives for the duration of
/// the request that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactSubject(String);

// Kept verbatim, leading whitespace may be part of the message.
#[nutype(
    validate(predicate = |s| !s.trim().is_empty(), len_char_max = 8192),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessage(String);

/// Contact form fields as they arrive, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Missing fields: name, email, subject, message")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Field too long: {0}")]
    FieldTooLong(ContactField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Subject,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl TryFrom<RawContactSubmission> for ContactSubmission {
    type Error = ContactValidationError;

    fn try_from(raw: RawContactSubmission) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| field.filter(|value| !value.trim().is_empty());

        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(raw.name),
            present(raw.email),
            present(raw.subject),
            present(raw.message),
        ) else {
            return Err(ContactValidationError::MissingFields);
        };

        let email = email
            .trim()
            .parse::<EmailAddress>()
            .map_err(|_| ContactValidationError::InvalidEmail)?;

        Ok(Self {
            name: ContactName::try_new(name).map_err(too_long(ContactField::Name))?,
            email,
            subject: ContactSubject::try_new(subject).map_err(too_long(ContactField::Subject))?,
            message: ContactMessage::try_new(message).map_err(too_long(ContactField::Message))?,
        })
    }
}

fn too_long<E>(field: ContactField) -> impl FnOnce(E) -> ContactValidationError {
    move |_| ContactValidationError::FieldTooLong(field)
}

/// Reasons why the contact relay cannot be used with the current
/// deployment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactConfigError {
    #[error("Missing RESEND_API_KEY env var")]
    MissingApiKey,
    #[error("Missing CONTACT_TO_EMAIL env var")]
    MissingRecipient,
}
