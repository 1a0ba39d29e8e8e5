use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Millisecond-epoch timestamp taken at submission time. Uniqueness is only
/// probabilistic: two submissions landing in the same millisecond share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub i64);

impl SubmissionId {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    EInvite,
}

impl FormKind {
    /// Store key this form's log lives under. Existing stored data uses these
    /// exact camelCase keys, so they are fixed.
    pub fn storage_key(self) -> &'static str {
        match self {
            FormKind::Contact => "contactSubmissions",
            FormKind::EInvite => "einviteSubmissions",
        }
    }
}

/// Creation metadata stamped onto a record at the moment it is accepted.
/// Both values come from a single clock read, truncated to milliseconds so
/// the id and the timestamp agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMeta {
    pub id: SubmissionId,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionMeta {
    pub fn now() -> Self {
        let now = Utc::now();
        let millis = now.timestamp_millis();
        Self {
            id: SubmissionId(millis),
            submitted_at: DateTime::from_timestamp_millis(millis).unwrap_or(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub id: SubmissionId,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EInviteSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_date: String,
    pub message: String,
    pub id: SubmissionId,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

/// Timestamps serialize with exactly three fractional digits, whole seconds
/// included. Chrono's default drops the fraction when it is zero.
fn serialize_iso_millis<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
