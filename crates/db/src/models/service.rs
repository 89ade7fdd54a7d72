//! Service entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use techhub_core::filter::Listing;
use techhub_core::icons::ServiceIcon;
use techhub_core::types::{DbId, Timestamp};
use techhub_core::validation::{require_text, FieldErrors};

/// A row from the `services` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Stored key; resolve with [`Service::icon`] before rendering.
    pub icon_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Service {
    pub fn icon(&self) -> ServiceIcon {
        ServiceIcon::from_key(Some(&self.icon_name))
    }
}

impl Listing for Service {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// DTO for creating a new service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

impl CreateService {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        require_text(&mut errors, "icon_name", Some(&self.icon_name));
        errors.into_result()
    }
}

/// DTO for updating an existing service. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_name: Option<String>,
}

impl UpdateService {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("icon_name", &self.icon_name),
        ] {
            if value.is_some() {
                require_text(&mut errors, field, value.as_deref());
            }
        }
        errors.into_result()
    }
}

impl From<CreateService> for UpdateService {
    fn from(full: CreateService) -> Self {
        Self {
            title: Some(full.title),
            description: Some(full.description),
            icon_name: Some(full.icon_name),
        }
    }
}
