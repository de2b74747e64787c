use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Minimum lengths enforced by the model layer before anything is persisted.
pub const POST_TITLE_MIN: usize = 2;
pub const POST_BODY_MIN: usize = 10;
pub const PASSWORD_MIN: usize = 6;

/// ValidationError
///
/// A field-level constraint violation. These are recoverable outcomes, not
/// faults: handlers surface the message in a flash and perform no write.
/// The message always names the offending field (e.g. "Topic.description
/// cannot be null") so it can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be null")]
    Missing(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    #[error("User.password_confirmation does not match password")]
    ConfirmationMismatch,
    #[error("User.email has already been taken")]
    EmailTaken,
}

// --- Persisted Entities ---

/// User
///
/// Canonical identity record from the `users` table. The password is stored
/// only as an argon2id salted hash; plaintext never touches this struct.
/// `role` is persisted as text ('admin' | 'member', constrained by the
/// schema) and interpreted by the policy layer, never compared in handlers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Topic
///
/// A discussion thread owning zero or more posts (one-to-many).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Post
///
/// A reply belonging to exactly one topic and authored by exactly one user
/// for its entire lifetime; no reassignment operation exists. Both foreign
/// keys must reference existing rows at creation time (schema-enforced).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub topic_id: Uuid,
    /// The author.
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Form Payloads (Input Schemas) ---

/// NewTopic
///
/// Input payload for topic creation. Both fields are required and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
}

impl NewTopic {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Missing("Topic.title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Missing("Topic.description"));
        }
        Ok(())
    }
}

/// PostFields
///
/// Input payload shared by the post create and update forms. Validation is
/// identical on both paths: a failing payload must never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostFields {
    pub title: String,
    pub body: String,
}

impl PostFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Missing("Post.title"));
        }
        if self.title.chars().count() < POST_TITLE_MIN {
            return Err(ValidationError::TooShort {
                field: "Post.title",
                min: POST_TITLE_MIN,
            });
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::Missing("Post.body"));
        }
        if self.body.chars().count() < POST_BODY_MIN {
            return Err(ValidationError::TooShort {
                field: "Post.body",
                min: POST_BODY_MIN,
            });
        }
        Ok(())
    }
}

/// SignUpForm
///
/// Registration payload. The plaintext password and its confirmation only
/// live for the duration of the request; the repository is handed a hash.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("User.email"));
        }
        if !looks_like_email(&self.email) {
            return Err(ValidationError::InvalidEmail("User.email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Missing("User.password"));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(ValidationError::TooShort {
                field: "User.password",
                min: PASSWORD_MIN,
            });
        }
        if self.password != self.password_confirmation {
            return Err(ValidationError::ConfirmationMismatch);
        }
        Ok(())
    }
}

/// SignInForm
///
/// Credentials payload for the session endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Structural email check: one '@' with a non-empty local part and a domain
/// containing a dot. Deliverability is not our problem.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
