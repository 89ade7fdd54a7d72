//! Software product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use techhub_core::filter::Listing;
use techhub_core::types::{DbId, Timestamp};
use techhub_core::validation::{require_text, FieldErrors};

use super::blank_to_none;

/// A row from the `software_products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SoftwareProduct {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    /// Only returned to admins; `None` for everyone else.
    #[serde(default)]
    pub download_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SoftwareProduct {
    /// Strip the privileged download link for a non-admin viewer.
    pub fn redacted(mut self) -> Self {
        self.download_link = None;
        self
    }
}

impl Listing for SoftwareProduct {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// DTO for creating a new software product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSoftwareProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub download_link: Option<String>,
}

impl CreateSoftwareProduct {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        require_text(&mut errors, "category", Some(&self.category));
        errors.into_result()
    }

    pub(crate) fn image_url(&self) -> Option<String> {
        blank_to_none(&self.image_url)
    }

    pub(crate) fn download_link(&self) -> Option<String> {
        blank_to_none(&self.download_link)
    }
}

/// DTO for updating an existing software product. All fields are optional.
///
/// For `image_url` and `download_link`, `Some("")` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSoftwareProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub download_link: Option<String>,
}

impl UpdateSoftwareProduct {
    /// Fields that are present must not be blank.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
        ] {
            if value.is_some() {
                require_text(&mut errors, field, value.as_deref());
            }
        }
        errors.into_result()
    }
}

impl From<CreateSoftwareProduct> for UpdateSoftwareProduct {
    fn from(full: CreateSoftwareProduct) -> Self {
        Self {
            title: Some(full.title),
            description: Some(full.description),
            category: Some(full.category),
            image_url: Some(full.image_url.unwrap_or_default()),
            download_link: Some(full.download_link.unwrap_or_default()),
        }
    }
}
