//! Home page "Featured Products": the newest few of each catalog.

use techhub_core::search::FEATURED_LIMIT;
use techhub_db::models::electronics::ElectronicsProduct;
use techhub_db::models::software::SoftwareProduct;

use crate::backend::ListQuery;
use crate::context::AppContext;
use crate::records::{list_records, Record};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedProducts {
    pub software: Vec<SoftwareProduct>,
    pub electronics: Vec<ElectronicsProduct>,
}

/// Both lists are fetched concurrently. A failed list is logged and left
/// empty; the home page shows no notice and no samples here.
pub async fn load_featured(ctx: &AppContext) -> FeaturedProducts {
    let (software, electronics) = tokio::join!(
        newest::<SoftwareProduct>(ctx),
        newest::<ElectronicsProduct>(ctx),
    );
    FeaturedProducts {
        software,
        electronics,
    }
}

async fn newest<R: Record>(ctx: &AppContext) -> Vec<R> {
    let query = ListQuery::newest_first().with_limit(FEATURED_LIMIT);
    list_records::<R>(ctx.backend(), query)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(
                table = R::TABLE.name(),
                error = %e,
                "Error fetching featured products"
            );
            Vec::new()
        })
}
