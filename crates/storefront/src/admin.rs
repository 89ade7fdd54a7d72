//! Admin create/update forms over a collection.
//!
//! An [`AdminCollection`] owns the rows of one table as the admin sees
//! them (no sample fallback) and at most one open editing surface holding
//! a [`Draft`]. Submitting runs validate, optional image upload, then a
//! single insert or update chosen by whether the draft carries an id. On
//! success the form is reset and closed and the rows are re-fetched; on
//! failure the draft stays open for a retry.
//!
//! An image that was uploaded before the record write failed is not
//! removed from storage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use techhub_core::icons::ServiceIcon;
use techhub_core::storage::{validate_image_name, FOLDER_ELECTRONICS, FOLDER_SOFTWARE};
use techhub_core::types::DbId;
use techhub_core::validation::{require_non_negative, require_text, FieldErrors};
use techhub_db::models::electronics::ElectronicsProduct;
use techhub_db::models::service::Service;
use techhub_db::models::software::SoftwareProduct;

use crate::backend::ListQuery;
use crate::context::AppContext;
use crate::deletion::{confirm_and_delete, Confirm, DeleteOutcome};
use crate::error::{BackendError, FormError};
use crate::fetcher::fetch_admin;
use crate::guard::InFlight;
use crate::notify::{capitalize, Notice};
use crate::records::{decode, Record};

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// The editable state of one record.
pub trait Draft: Clone + Default + Send + Sync + 'static {
    type Record: Record;

    /// Storage folder for a selected image; `None` if the entity has no
    /// image.
    const ASSET_FOLDER: Option<&'static str>;

    /// Id of the record being edited; `None` for a new one.
    fn id(&self) -> Option<DbId>;

    /// Every required field of the create contract is present.
    fn validate(&self) -> Result<(), FieldErrors>;

    fn set_image_url(&mut self, _url: String) {}

    /// The full field set sent on both insert and update.
    fn to_payload(&self) -> Value;

    fn from_record(record: &Self::Record) -> Self;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftwareDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub download_link: String,
}

impl Draft for SoftwareDraft {
    type Record = SoftwareProduct;
    const ASSET_FOLDER: Option<&'static str> = Some(FOLDER_SOFTWARE);

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        require_text(&mut errors, "category", Some(&self.category));
        errors.into_result()
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn to_payload(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "category": self.category,
            "image_url": self.image_url,
            "download_link": self.download_link,
        })
    }

    fn from_record(record: &SoftwareProduct) -> Self {
        Self {
            id: Some(record.id),
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            image_url: record.image_url.clone().unwrap_or_default(),
            download_link: record.download_link.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElectronicsDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    /// `None` until the price field holds a number.
    pub price: Option<f64>,
    pub size: String,
}

impl Draft for ElectronicsDraft {
    type Record = ElectronicsProduct;
    const ASSET_FOLDER: Option<&'static str> = Some(FOLDER_ELECTRONICS);

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        require_text(&mut errors, "category", Some(&self.category));
        require_non_negative(&mut errors, "price", self.price);
        require_text(&mut errors, "size", Some(&self.size));
        errors.into_result()
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn to_payload(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "category": self.category,
            "image_url": self.image_url,
            "price": self.price,
            "size": self.size,
        })
    }

    fn from_record(record: &ElectronicsProduct) -> Self {
        Self {
            id: Some(record.id),
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            image_url: record.image_url.clone().unwrap_or_default(),
            price: Some(record.price),
            size: record.size.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
}

impl Draft for ServiceDraft {
    type Record = Service;
    const ASSET_FOLDER: Option<&'static str> = None;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", Some(&self.title));
        require_text(&mut errors, "description", Some(&self.description));
        errors.into_result()
    }

    fn to_payload(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "icon_name": self.icon.key(),
        })
    }

    fn from_record(record: &Service) -> Self {
        Self {
            id: Some(record.id),
            title: record.title.clone(),
            description: record.description.clone(),
            icon: record.icon(),
        }
    }
}

// ---------------------------------------------------------------------------
// Collection + form state
// ---------------------------------------------------------------------------

/// An image picked in the form but not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsset {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PendingAsset {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
struct FormState<D> {
    draft: D,
    asset: Option<PendingAsset>,
    errors: FieldErrors,
}

struct AdminState<D: Draft> {
    rows: Vec<D::Record>,
    loading: bool,
    form: Option<FormState<D>>,
}

pub type SoftwareAdmin = AdminCollection<SoftwareDraft>;
pub type ElectronicsAdmin = AdminCollection<ElectronicsDraft>;
pub type ServicesAdmin = AdminCollection<ServiceDraft>;

pub struct AdminCollection<D: Draft> {
    ctx: AppContext,
    state: Mutex<AdminState<D>>,
    submitting: AtomicBool,
}

impl<D: Draft> AdminCollection<D> {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(AdminState {
                rows: Vec::new(),
                loading: true,
                form: None,
            }),
            submitting: AtomicBool::new(false),
        }
    }

    /// Mount the view and run the first fetch.
    pub async fn load(ctx: AppContext) -> Self {
        let view = Self::new(ctx);
        // A failed first fetch is already reported; the view stays empty.
        let _ = view.refresh().await;
        view
    }

    fn lock(&self) -> MutexGuard<'_, AdminState<D>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-fetch every row. On failure the current rows are kept.
    pub async fn refresh(&self) -> Result<(), BackendError> {
        self.lock().loading = true;
        let result = fetch_admin::<D::Record>(&self.ctx, ListQuery::newest_first()).await;
        let mut state = self.lock();
        state.loading = false;
        state.rows = result?;
        Ok(())
    }

    pub fn rows(&self) -> Vec<D::Record> {
        self.lock().rows.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    // ---- editing surface ----

    pub fn open_create(&self) {
        self.lock().form = Some(FormState {
            draft: D::default(),
            asset: None,
            errors: FieldErrors::new(),
        });
    }

    pub fn open_edit(&self, record: &D::Record) {
        self.lock().form = Some(FormState {
            draft: D::from_record(record),
            asset: None,
            errors: FieldErrors::new(),
        });
    }

    /// Close the surface and discard the draft.
    pub fn close(&self) {
        self.lock().form = None;
    }

    pub fn is_open(&self) -> bool {
        self.lock().form.is_some()
    }

    pub fn draft(&self) -> Option<D> {
        self.lock().form.as_ref().map(|f| f.draft.clone())
    }

    /// Apply an edit to the open draft. No-op when nothing is open.
    pub fn edit(&self, change: impl FnOnce(&mut D)) {
        if let Some(form) = self.lock().form.as_mut() {
            change(&mut form.draft);
        }
    }

    /// Pick an image to upload on the next submit.
    pub fn select_asset(&self, asset: PendingAsset) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if D::ASSET_FOLDER.is_none() {
            errors.push("image", "This entity has no image");
        } else if let Err(e) = validate_image_name(&asset.file_name) {
            errors.push("image", e.to_string());
        }
        errors.into_result()?;

        if let Some(form) = self.lock().form.as_mut() {
            form.asset = Some(asset);
        }
        Ok(())
    }

    pub fn pending_asset(&self) -> Option<PendingAsset> {
        self.lock().form.as_ref().and_then(|f| f.asset.clone())
    }

    /// Field errors from the last submit attempt.
    pub fn field_errors(&self) -> FieldErrors {
        self.lock()
            .form
            .as_ref()
            .map(|f| f.errors.clone())
            .unwrap_or_default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    // ---- submit ----

    /// Save the open draft and return the stored record.
    pub async fn submit(&self) -> Result<D::Record, FormError> {
        let Some(_in_flight) = InFlight::begin(&self.submitting) else {
            return Err(FormError::Busy);
        };

        let (draft, asset) = {
            let mut state = self.lock();
            let form = state.form.as_mut().ok_or(FormError::NotOpen)?;
            if let Err(errors) = form.draft.validate() {
                form.errors = errors.clone();
                tracing::debug!(table = D::Record::TABLE.name(), %errors, "Draft rejected");
                return Err(FormError::Invalid(errors));
            }
            form.errors = FieldErrors::new();
            (form.draft.clone(), form.asset.clone())
        };

        let editing = draft.id().is_some();
        match self.persist(draft, asset).await {
            Ok(record) => {
                self.close();
                tracing::info!(
                    table = D::Record::TABLE.name(),
                    id = record.id(),
                    editing,
                    "Record saved"
                );
                let verb = if editing { "updated" } else { "added" };
                self.ctx.notify(Notice::success(format!(
                    "{} {verb} successfully",
                    capitalize(D::Record::NOUN)
                )));
                let _ = self.refresh().await;
                Ok(record)
            }
            Err(e) => {
                let action = if editing { "update" } else { "add" };
                self.ctx.notify(
                    Notice::error(format!("Failed to {action} {}", D::Record::NOUN))
                        .with_description(e.to_string()),
                );
                Err(FormError::Backend(e))
            }
        }
    }

    async fn persist(
        &self,
        mut draft: D,
        asset: Option<PendingAsset>,
    ) -> Result<D::Record, BackendError> {
        let backend = self.ctx.backend();

        if let (Some(asset), Some(folder)) = (asset, D::ASSET_FOLDER) {
            let uploaded = backend
                .upload_asset(folder, &asset.file_name, asset.bytes)
                .await?;
            tracing::info!(path = %uploaded.path, "Image uploaded");
            draft.set_image_url(uploaded.public_url.clone());
            // Keep the form in step so a retry does not upload again.
            if let Some(form) = self.lock().form.as_mut() {
                form.draft.set_image_url(uploaded.public_url);
                form.asset = None;
            }
        }

        let payload = draft.to_payload();
        let stored = match draft.id() {
            Some(id) => backend.update(D::Record::TABLE, id, payload).await?,
            None => backend.insert(D::Record::TABLE, payload).await?,
        };
        decode(stored)
    }

    // ---- delete ----

    /// Confirm, delete `id`, then re-fetch. Closes the form if it was
    /// editing that row. On failure nothing local changes.
    pub async fn delete(
        &self,
        id: DbId,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, BackendError> {
        let outcome = confirm_and_delete::<D::Record>(&self.ctx, id, confirm).await?;
        if outcome == DeleteOutcome::Deleted {
            {
                let mut state = self.lock();
                if state.form.as_ref().and_then(|f| f.draft.id()) == Some(id) {
                    state.form = None;
                }
            }
            let _ = self.refresh().await;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_drafts_list_every_required_field() {
        let errors = ElectronicsDraft::default().validate().unwrap_err();
        for field in ["title", "description", "category", "price", "size"] {
            assert!(errors.has(field), "{field} should be required");
        }
        assert!(!errors.has("image_url"));
    }

    #[test]
    fn zero_price_is_valid() {
        let draft = ElectronicsDraft {
            title: "Strip".into(),
            description: "RGB".into(),
            category: "LEDs".into(),
            price: Some(0.0),
            size: "5 meter".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn service_payload_uses_icon_key() {
        let draft = ServiceDraft {
            title: "Cloud".into(),
            description: "Hosting".into(),
            icon: ServiceIcon::BookOpen,
            ..Default::default()
        };
        assert_eq!(draft.to_payload()["icon_name"], "book-open");
        assert_eq!(ServiceDraft::default().icon, ServiceIcon::Server);
    }

    #[test]
    fn software_payload_sends_blank_urls_to_clear_them() {
        let payload = SoftwareDraft::default().to_payload();
        assert_eq!(payload["image_url"], "");
        assert_eq!(payload["download_link"], "");
    }
}
