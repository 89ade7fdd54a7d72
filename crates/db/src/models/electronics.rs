//! Electronics product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use techhub_core::filter::Listing;
use techhub_core::types::{DbId, Timestamp};
use techhub_core::validation::{require_non_negative, require_text, FieldErrors};

use super::blank_to_none;

/// A row from the `electronics_products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ElectronicsProduct {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub price: f64,
    /// Free text, e.g. `"55 inch"` or `"5 meter"`.
    pub size: String,
    #[serde(default)]
    pub download_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ElectronicsProduct {
    /// Strip the privileged download link for a non-admin viewer.
    pub fn redacted(mut self) -> Self {
        self.download_link = None;
        self
    }
}

impl Listing for ElectronicsProduct {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
}

/// DTO for creating a new electronics product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateElectronicsProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub size: String,
    pub download_link: Option<String>,
}

impl CreateElectronicsProduct {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        require_text(&mut errors, "category", Some(&self.category));
        require_non_negative(&mut errors, "price", Some(self.price));
        require_text(&mut errors, "size", Some(&self.size));
        errors.into_result()
    }

    pub(crate) fn image_url(&self) -> Option<String> {
        blank_to_none(&self.image_url)
    }

    pub(crate) fn download_link(&self) -> Option<String> {
        blank_to_none(&self.download_link)
    }
}

/// DTO for updating an existing electronics product. All fields are optional.
///
/// For `image_url` and `download_link`, `Some("")` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateElectronicsProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub download_link: Option<String>,
}

impl UpdateElectronicsProduct {
    /// Fields that are present must not be blank; a present price must be >= 0.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("size", &self.size),
        ] {
            if value.is_some() {
                require_text(&mut errors, field, value.as_deref());
            }
        }
        if self.price.is_some() {
            require_non_negative(&mut errors, "price", self.price);
        }
        errors.into_result()
    }
}

impl From<CreateElectronicsProduct> for UpdateElectronicsProduct {
    fn from(full: CreateElectronicsProduct) -> Self {
        Self {
            title: Some(full.title),
            description: Some(full.description),
            category: Some(full.category),
            image_url: Some(full.image_url.unwrap_or_default()),
            price: Some(full.price),
            size: Some(full.size),
            download_link: Some(full.download_link.unwrap_or_default()),
        }
    }
}
