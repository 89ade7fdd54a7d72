//! Integration tests for the contact-message inbox.

use sqlx::PgPool;
use techhub_core::search::Direction;
use techhub_db::models::contact_message::CreateContactMessage;
use techhub_db::repositories::ContactMessageRepo;

fn new_message(subject: &str) -> CreateContactMessage {
    CreateContactMessage {
        name: "Amina".to_string(),
        email: "amina@example.com".to_string(),
        subject: subject.to_string(),
        message: "Please call me back about pricing.".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_messages_are_unread(pool: PgPool) {
    let msg = ContactMessageRepo::create(&pool, &new_message("Quote request"))
        .await
        .unwrap();
    assert!(!msg.is_read);
    assert_eq!(ContactMessageRepo::count_unread(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_is_idempotent(pool: PgPool) {
    let msg = ContactMessageRepo::create(&pool, &new_message("Quote request"))
        .await
        .unwrap();

    let read = ContactMessageRepo::mark_read(&pool, msg.id).await.unwrap().unwrap();
    assert!(read.is_read);
    let again = ContactMessageRepo::mark_read(&pool, msg.id).await.unwrap().unwrap();
    assert!(again.is_read);

    assert_eq!(ContactMessageRepo::count_unread(&pool).await.unwrap(), 0);
    assert!(ContactMessageRepo::mark_read(&pool, 424_242)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_message_cannot_become_unread(pool: PgPool) {
    let msg = ContactMessageRepo::create(&pool, &new_message("Support"))
        .await
        .unwrap();
    ContactMessageRepo::mark_read(&pool, msg.id).await.unwrap();

    let err = sqlx::query("UPDATE contact_messages SET is_read = false WHERE id = $1")
        .bind(msg.id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert!(
        matches!(&err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23514")),
        "expected check violation, got {err:?}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first_and_delete(pool: PgPool) {
    let older = ContactMessageRepo::create(&pool, &new_message("Older"))
        .await
        .unwrap();
    let newer = ContactMessageRepo::create(&pool, &new_message("Newer"))
        .await
        .unwrap();

    let listed = ContactMessageRepo::list(&pool, Direction::Desc, 500)
        .await
        .unwrap();
    let subjects: Vec<_> = listed.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Newer", "Older"]);

    assert!(ContactMessageRepo::delete(&pool, newer.id).await.unwrap());
    let remaining = ContactMessageRepo::list(&pool, Direction::Desc, 500)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, older.id);
}
