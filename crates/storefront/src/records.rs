//! Typed rows on top of the untyped [`Backend`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use techhub_core::search::hit_list_ceiling;
use techhub_core::types::DbId;
use techhub_db::models::contact_message::ContactMessage;
use techhub_db::models::electronics::ElectronicsProduct;
use techhub_db::models::service::Service;
use techhub_db::models::software::SoftwareProduct;

use crate::backend::{Backend, ListQuery, Table};
use crate::error::BackendError;
use crate::samples;

/// A row type stored in one [`Table`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: Table;

    /// Singular noun used in notices ("product", "message").
    const NOUN: &'static str;

    /// Plural noun used in notices.
    const PLURAL: &'static str;

    /// Whether a public page shows [`Record::samples`] when the store
    /// answers with no rows at all.
    const SAMPLES_WHEN_EMPTY: bool = false;

    fn id(&self) -> DbId;

    /// Rows shown on a public page when the live ones are unavailable.
    fn samples() -> Vec<Self> {
        Vec::new()
    }
}

impl Record for SoftwareProduct {
    const TABLE: Table = Table::Software;
    const NOUN: &'static str = "product";
    const PLURAL: &'static str = "products";
    const SAMPLES_WHEN_EMPTY: bool = true;

    fn id(&self) -> DbId {
        self.id
    }

    fn samples() -> Vec<Self> {
        samples::software()
    }
}

impl Record for ElectronicsProduct {
    const TABLE: Table = Table::Electronics;
    const NOUN: &'static str = "product";
    const PLURAL: &'static str = "products";
    const SAMPLES_WHEN_EMPTY: bool = true;

    fn id(&self) -> DbId {
        self.id
    }

    fn samples() -> Vec<Self> {
        samples::electronics()
    }
}

impl Record for Service {
    const TABLE: Table = Table::Services;
    const NOUN: &'static str = "service";
    const PLURAL: &'static str = "services";

    fn id(&self) -> DbId {
        self.id
    }

    fn samples() -> Vec<Self> {
        samples::services()
    }
}

impl Record for ContactMessage {
    const TABLE: Table = Table::ContactMessages;
    const NOUN: &'static str = "message";
    const PLURAL: &'static str = "messages";

    fn id(&self) -> DbId {
        self.id
    }
}

/// Decode one row returned by the store.
pub fn decode<R: Record>(value: Value) -> Result<R, BackendError> {
    serde_json::from_value(value).map_err(|e| {
        BackendError::Decode(format!("{} row: {e}", R::TABLE.name()))
    })
}

/// List and decode every row of `R`'s table.
pub async fn list_records<R: Record>(
    backend: &dyn Backend,
    query: ListQuery,
) -> Result<Vec<R>, BackendError> {
    let rows = backend.list(R::TABLE, query).await?;
    if hit_list_ceiling(query.limit, rows.len()) {
        tracing::warn!(
            table = R::TABLE.name(),
            returned = rows.len(),
            "List reached the server's row ceiling; older rows are missing"
        );
    }
    rows.into_iter().map(decode).collect()
}
