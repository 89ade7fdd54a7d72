//! Integration tests for the catalog repositories.
//!
//! Exercises software, electronics and services against a real database:
//! - Create / find / list ordering in both directions
//! - Partial updates, including clearing optional URLs
//! - Check constraints on blank text and negative prices
//! - Delete of present and missing rows

use sqlx::PgPool;
use techhub_core::search::Direction;
use techhub_db::models::electronics::{CreateElectronicsProduct, UpdateElectronicsProduct};
use techhub_db::models::service::{CreateService, UpdateService};
use techhub_db::models::software::{CreateSoftwareProduct, UpdateSoftwareProduct};
use techhub_db::repositories::{ElectronicsRepo, ServiceRepo, SoftwareRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_software(title: &str) -> CreateSoftwareProduct {
    CreateSoftwareProduct {
        title: title.to_string(),
        description: format!("{title} description"),
        category: "Operating Systems".to_string(),
        image_url: None,
        download_link: Some("https://downloads.example.com/iso".to_string()),
    }
}

fn new_electronics(title: &str, price: f64) -> CreateElectronicsProduct {
    CreateElectronicsProduct {
        title: title.to_string(),
        description: format!("{title} description"),
        category: "TVs".to_string(),
        image_url: Some("   ".to_string()),
        price,
        size: "55 inch".to_string(),
        download_link: None,
    }
}

fn is_check_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23514"))
}

// ---------------------------------------------------------------------------
// Software
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_create_and_find(pool: PgPool) {
    let created = SoftwareRepo::create(&pool, &new_software("Windows 11 Pro"))
        .await
        .unwrap();
    assert_eq!(created.title, "Windows 11 Pro");
    assert!(created.image_url.is_none());
    assert_eq!(
        created.download_link.as_deref(),
        Some("https://downloads.example.com/iso")
    );

    let found = SoftwareRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(found, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_list_orders_by_created_at(pool: PgPool) {
    let first = SoftwareRepo::create(&pool, &new_software("First")).await.unwrap();
    let second = SoftwareRepo::create(&pool, &new_software("Second")).await.unwrap();

    let newest_first = SoftwareRepo::list(&pool, Direction::Desc, 500).await.unwrap();
    let ids: Vec<_> = newest_first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let oldest_first = SoftwareRepo::list(&pool, Direction::Asc, 500).await.unwrap();
    let ids: Vec<_> = oldest_first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let limited = SoftwareRepo::list(&pool, Direction::Desc, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_partial_update_and_clear(pool: PgPool) {
    let created = SoftwareRepo::create(&pool, &new_software("Office")).await.unwrap();

    let patch = UpdateSoftwareProduct {
        category: Some("Productivity".to_string()),
        download_link: Some(String::new()),
        ..Default::default()
    };
    let updated = SoftwareRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .expect("row should exist");

    assert_eq!(updated.title, "Office");
    assert_eq!(updated.category, "Productivity");
    assert!(updated.download_link.is_none());
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_update_missing_returns_none(pool: PgPool) {
    let patch = UpdateSoftwareProduct {
        title: Some("Ghost".to_string()),
        ..Default::default()
    };
    let result = SoftwareRepo::update(&pool, 999_999, &patch).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_blank_title_violates_check(pool: PgPool) {
    let mut input = new_software("x");
    input.title = "  ".to_string();
    let err = SoftwareRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_check_violation(&err), "expected 23514, got {err:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_software_delete(pool: PgPool) {
    let created = SoftwareRepo::create(&pool, &new_software("Temp")).await.unwrap();
    assert!(SoftwareRepo::delete(&pool, created.id).await.unwrap());
    assert!(!SoftwareRepo::delete(&pool, created.id).await.unwrap());
    assert!(SoftwareRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Electronics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_electronics_blank_image_url_stored_as_null(pool: PgPool) {
    let created = ElectronicsRepo::create(&pool, &new_electronics("Smart LED TV", 599.99))
        .await
        .unwrap();
    assert!(created.image_url.is_none());
    assert_eq!(created.price, 599.99);
    assert_eq!(created.size, "55 inch");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_electronics_negative_price_violates_check(pool: PgPool) {
    let err = ElectronicsRepo::create(&pool, &new_electronics("Broken", -1.0))
        .await
        .unwrap_err();
    assert!(is_check_violation(&err), "expected 23514, got {err:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_electronics_update_price_only(pool: PgPool) {
    let created = ElectronicsRepo::create(&pool, &new_electronics("Monitor", 349.99))
        .await
        .unwrap();
    let patch = UpdateElectronicsProduct {
        price: Some(0.0),
        ..Default::default()
    };
    let updated = ElectronicsRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price, 0.0);
    assert_eq!(updated.title, "Monitor");
    assert_eq!(updated.size, "55 inch");
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_crud(pool: PgPool) {
    let created = ServiceRepo::create(
        &pool,
        &CreateService {
            title: "Hosting".to_string(),
            description: "Managed VPS".to_string(),
            icon_name: "cloud".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.icon_name, "cloud");
    assert_eq!(created.icon().key(), "server");

    let updated = ServiceRepo::update(
        &pool,
        created.id,
        &UpdateService {
            icon_name: Some("globe".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.icon().key(), "globe");
    assert_eq!(updated.description, "Managed VPS");

    let all = ServiceRepo::list(&pool, Direction::Asc, 500).await.unwrap();
    assert_eq!(all.len(), 1);

    assert!(ServiceRepo::delete(&pool, created.id).await.unwrap());
    assert!(ServiceRepo::list(&pool, Direction::Asc, 500)
        .await
        .unwrap()
        .is_empty());
}
