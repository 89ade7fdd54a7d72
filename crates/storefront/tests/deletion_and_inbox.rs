mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use techhub_core::types::DbId;
use techhub_storefront::admin::ElectronicsAdmin;
use techhub_storefront::backend::Table;
use techhub_storefront::deletion::DeleteOutcome;
use techhub_storefront::inbox::MessageInbox;
use techhub_storefront::notify::{Notice, NoticeLevel};
use tokio::sync::broadcast;

use common::{admin_context, drain, no, yes, Call, MemoryBackend, Op};

// ---------------------------------------------------------------------------
// Row deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let backend = MemoryBackend::new();
    let id = backend.seed_electronics("OLED TV", "TVs", 1299.99);
    let admin = ElectronicsAdmin::load(admin_context(&backend)).await;
    backend.clear_calls();

    let outcome = admin.delete(id, &no).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(backend.calls().is_empty());
    assert_eq!(admin.rows().len(), 1);
}

#[tokio::test]
async fn prompt_names_the_entity() {
    let backend = MemoryBackend::new();
    let id = backend.seed_electronics("OLED TV", "TVs", 1299.99);
    let admin = ElectronicsAdmin::load(admin_context(&backend)).await;

    let asked = std::sync::Mutex::new(String::new());
    let confirm = |prompt: &str| {
        *asked.lock().unwrap() = prompt.to_string();
        false
    };
    admin.delete(id, &confirm).await.unwrap();

    assert_eq!(
        *asked.lock().unwrap(),
        "Are you sure you want to delete this product?"
    );
}

#[tokio::test]
async fn deleted_row_is_gone_from_the_next_fetch_and_its_form_closes() {
    let backend = MemoryBackend::new();
    let keep = backend.seed_electronics("Smart LED TV", "TVs", 599.99);
    let doomed = backend.seed_electronics("OLED TV", "TVs", 1299.99);
    let admin = ElectronicsAdmin::load(admin_context(&backend)).await;
    let open = admin.rows().into_iter().find(|r| r.id == doomed).unwrap();
    admin.open_edit(&open);
    backend.clear_calls();

    let outcome = admin.delete(doomed, &yes).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(!admin.is_open());
    assert_eq!(
        backend.calls(),
        vec![Call::Delete(Table::Electronics, doomed), Call::List(Table::Electronics)]
    );
    let ids: Vec<_> = admin.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn deleting_another_row_leaves_the_form_open() {
    let backend = MemoryBackend::new();
    let editing = backend.seed_electronics("Smart LED TV", "TVs", 599.99);
    let other = backend.seed_electronics("OLED TV", "TVs", 1299.99);
    let admin = ElectronicsAdmin::load(admin_context(&backend)).await;
    let open = admin.rows().into_iter().find(|r| r.id == editing).unwrap();
    admin.open_edit(&open);

    admin.delete(other, &yes).await.unwrap();

    assert!(admin.is_open());
    assert_eq!(admin.draft().unwrap().id, Some(editing));
}

#[tokio::test]
async fn failed_delete_changes_nothing_locally() {
    let backend = MemoryBackend::new();
    let id = backend.seed_electronics("OLED TV", "TVs", 1299.99);
    let ctx = admin_context(&backend);
    let mut rx = ctx.notifier().subscribe();
    let admin = ElectronicsAdmin::load(ctx).await;
    let open = admin.rows()[0].clone();
    admin.open_edit(&open);
    backend.fail(Op::Delete);
    backend.clear_calls();

    let err = admin.delete(id, &yes).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(admin.rows(), vec![open]);
    assert!(admin.is_open());
    assert_eq!(backend.calls(), vec![Call::Delete(Table::Electronics, id)]);

    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Failed to delete product");
}

// ---------------------------------------------------------------------------
// Contact inbox
// ---------------------------------------------------------------------------

struct Fixture {
    inbox: MessageInbox,
    ids: Vec<DbId>,
    notices: broadcast::Receiver<Notice>,
}

async fn inbox_with(backend: &Arc<MemoryBackend>, subjects: &[&str]) -> Fixture {
    let ids = subjects.iter().map(|s| backend.seed_message(s)).collect();
    let ctx = admin_context(backend);
    let notices = ctx.notifier().subscribe();
    let inbox = MessageInbox::new(ctx);
    inbox.load().await.unwrap();
    backend.clear_calls();
    Fixture { inbox, ids, notices }
}

#[tokio::test]
async fn viewing_an_unread_message_flips_only_that_row() {
    let backend = MemoryBackend::new();
    let subjects = ["Quote request", "Repair", "Hello"];
    let Fixture { inbox, ids, .. } = inbox_with(&backend, &subjects).await;
    assert_eq!(inbox.unread_count(), 3);

    let flip = inbox.view(ids[1]).expect("unread message should be marked");

    // The view opens before the flip completes.
    let shown = inbox.open_message().unwrap();
    assert_eq!(shown.id, ids[1]);
    assert!(!shown.is_read);

    flip.await.unwrap();

    let read: Vec<_> = inbox
        .messages()
        .iter()
        .map(|m| (m.id, m.is_read))
        .collect();
    assert!(read.contains(&(ids[0], false)));
    assert!(read.contains(&(ids[1], true)));
    assert!(read.contains(&(ids[2], false)));
    assert_eq!(inbox.unread_count(), 2);
    assert_eq!(backend.row(Table::ContactMessages, ids[1]).unwrap()["is_read"], true);
    assert_eq!(
        backend.calls(),
        vec![Call::Update(Table::ContactMessages, ids[1])],
        "no re-fetch after the flip"
    );
}

#[tokio::test]
async fn viewing_a_read_message_sends_nothing() {
    let backend = MemoryBackend::new();
    let Fixture { inbox, ids, .. } = inbox_with(&backend, &["Quote request"]).await;

    inbox.view(ids[0]).unwrap().await.unwrap();
    backend.clear_calls();

    assert!(inbox.view(ids[0]).is_none());
    assert!(inbox.view(9_999).is_none());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn failed_flip_is_reported_but_the_message_stays_open() {
    let backend = MemoryBackend::new();
    let Fixture {
        inbox,
        ids,
        notices: mut rx,
    } = inbox_with(&backend, &["Quote request"]).await;
    backend.fail(Op::Update);

    inbox.view(ids[0]).unwrap().await.unwrap();

    assert_eq!(inbox.open_message().unwrap().id, ids[0]);
    assert_eq!(inbox.unread_count(), 1);
    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].title, "Failed to mark message as read");

    // A later view retries.
    backend.recover(Op::Update);
    inbox.view(ids[0]).unwrap().await.unwrap();
    assert_eq!(inbox.unread_count(), 0);
}

#[tokio::test]
async fn late_response_after_unmount_is_discarded() {
    let backend = MemoryBackend::new();
    let Fixture { inbox, ids, .. } = inbox_with(&backend, &["Quote request"]).await;
    let gate = backend.hold_mutations();

    let flip = inbox.view(ids[0]).unwrap();
    while backend.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    drop(inbox);
    gate.notify_one();

    flip.await.expect("flip task must not panic");
    assert_eq!(backend.row(Table::ContactMessages, ids[0]).unwrap()["is_read"], true);
}

#[tokio::test]
async fn repeated_views_do_not_stack_flips() {
    let backend = MemoryBackend::new();
    let Fixture { inbox, ids, .. } = inbox_with(&backend, &["Quote request"]).await;
    let gate = backend.hold_mutations();

    let flip = inbox.view(ids[0]).unwrap();
    assert!(inbox.view(ids[0]).is_none());

    gate.notify_one();
    flip.await.unwrap();
    assert_eq!(backend.calls(), vec![Call::Update(Table::ContactMessages, ids[0])]);
}

#[tokio::test]
async fn deleting_the_open_message_closes_it() {
    let backend = MemoryBackend::new();
    let Fixture { inbox, ids, .. } = inbox_with(&backend, &["Quote request", "Repair"]).await;
    inbox.view(ids[0]).unwrap().await.unwrap();
    backend.clear_calls();

    let outcome = inbox.delete(ids[0], &yes).await.unwrap();

    assert_matches!(outcome, DeleteOutcome::Deleted);
    assert!(inbox.open_message().is_none());
    let remaining: Vec<_> = inbox.messages().iter().map(|m| m.id).collect();
    assert_eq!(remaining, vec![ids[1]]);
    assert_eq!(
        backend.calls(),
        vec![
            Call::Delete(Table::ContactMessages, ids[0]),
            Call::List(Table::ContactMessages)
        ]
    );
}
