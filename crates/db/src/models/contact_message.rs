//! Contact message entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use techhub_core::types::{DbId, Timestamp};
use techhub_core::validation::{validate_contact, FieldErrors};

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Moves from `false` to `true` once, the first time an admin opens it.
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for a public contact-form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl CreateContactMessage {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_contact(&self.name, &self.email, &self.subject, &self.message).into_result()
    }
}
