use anyhow::Result;
use shared::domain::{FormKind, SubmissionMeta};
use shared::error::FieldError;
use storage::SubmissionLog;
use tracing::{debug, info};

pub mod schema;

pub use schema::{ContactDraft, EInviteDraft, FormSchema};

pub type ContactForm = FormController<ContactDraft>;
pub type EInviteForm = FormController<EInviteDraft>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    Accepted { record: R },
    Rejected { field_errors: Vec<FieldError> },
    AlreadySubmitted,
}

/// Validation-and-submission state machine for one form type.
///
/// Starts editing an empty draft. A submit that passes every field predicate
/// appends one record to the log and moves to [`FormPhase::Submitted`]; the
/// only way back is [`reset`](Self::reset), which returns to an empty draft.
pub struct FormController<D: FormSchema> {
    log: SubmissionLog,
    draft: D,
    phase: FormPhase,
    field_errors: Vec<FieldError>,
}

impl<D: FormSchema> FormController<D> {
    pub fn new(log: SubmissionLog) -> Self {
        Self {
            log,
            draft: D::default(),
            phase: FormPhase::Editing,
            field_errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        D::kind()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Validates the draft and, if every predicate holds, appends the built
    /// record to the log and transitions to the submitted phase.
    ///
    /// A rejected draft records one message per failing field and touches
    /// nothing else. A store fault comes back as `Err`; the controller is
    /// still editing and the draft is intact when it does.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<D::Record>> {
        if self.phase == FormPhase::Submitted {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        if let Err(errors) = self.draft.validate() {
            let field_errors = schema::field_errors(&errors);
            debug!(kind = ?D::kind(), fields = field_errors.len(), "draft failed validation");
            self.field_errors = field_errors.clone();
            return Ok(SubmitOutcome::Rejected { field_errors });
        }
        self.field_errors.clear();

        let meta = SubmissionMeta::now();
        let record = self.draft.clone().into_record(meta);
        self.log.append(D::kind().storage_key(), &record).await?;
        self.phase = FormPhase::Submitted;
        info!(kind = ?D::kind(), id = meta.id.as_millis(), "submission recorded");
        Ok(SubmitOutcome::Accepted { record })
    }

    /// Returns to the editing phase with every field back to its empty
    /// default; nothing from the previous draft is re-populated.
    pub fn reset(&mut self) {
        self.draft = D::default();
        self.field_errors.clear();
        self.phase = FormPhase::Editing;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
