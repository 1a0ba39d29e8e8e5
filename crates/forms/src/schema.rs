use serde::Serialize;
use shared::domain::{ContactSubmission, EInviteSubmission, FormKind, SubmissionMeta};
use shared::error::FieldError;
use validator::{Validate, ValidationErrors};

/// Field rules and record construction for one form type.
pub trait FormSchema: Validate + Clone + Default + Send + Sync {
    type Record: Serialize + Clone + Send + Sync;

    fn kind() -> FormKind;
    fn into_record(self, meta: SubmissionMeta) -> Self::Record;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ContactDraft {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl FormSchema for ContactDraft {
    type Record = ContactSubmission;

    fn kind() -> FormKind {
        FormKind::Contact
    }

    fn into_record(self, meta: SubmissionMeta) -> ContactSubmission {
        ContactSubmission {
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            id: meta.id,
            submitted_at: meta.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct EInviteDraft {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Event date is required"))]
    pub event_date: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl FormSchema for EInviteDraft {
    type Record = EInviteSubmission;

    fn kind() -> FormKind {
        FormKind::EInvite
    }

    fn into_record(self, meta: SubmissionMeta) -> EInviteSubmission {
        EInviteSubmission {
            name: self.name,
            email: self.email,
            phone: self.phone,
            event_date: self.event_date,
            message: self.message,
            id: meta.id,
            submitted_at: meta.submitted_at,
        }
    }
}

/// Flattens validator output to one message per failing field, ordered by
/// field name.
pub(crate) fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut list: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            let error = errors.first()?;
            let message = error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| error.code.to_string());
            Some(FieldError::new(field.to_string(), message))
        })
        .collect();
    list.sort_by(|a, b| a.field.cmp(&b.field));
    list
}
