//! In-memory [`Backend`] for storefront tests.
//!
//! Records every call, can be told to fail specific operations, and can
//! hold mutating calls until the test releases them.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::{broadcast, Notify};

use techhub_core::search::Direction;
use techhub_core::storage::{asset_object_path, PRODUCT_IMAGES_BUCKET};
use techhub_core::types::DbId;
use techhub_db::models::user::Profile;
use techhub_storefront::backend::{Backend, ListQuery, Session, Table, UploadedAsset};
use techhub_storefront::context::AppContext;
use techhub_storefront::error::BackendError;
use techhub_storefront::notify::{Notice, NoticeLevel};

pub const PASSWORD: &str = "correct-horse";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(Table),
    Insert(Table),
    Update(Table, DbId),
    Delete(Table, DbId),
    Upload(String, String),
    SignIn(String),
    Refresh(String),
    SignUp(String),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Insert,
    Update,
    Delete,
    Upload,
    SignIn,
    Refresh,
    SignUp,
    SignOut,
}

#[derive(Default)]
pub struct MemoryBackend {
    rows: Mutex<HashMap<Table, Vec<Value>>>,
    users: Mutex<Vec<(Profile, String)>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Op>>,
    held: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicI64,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Make subsequent insert/update calls wait for a permit on the
    /// returned handle.
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.held.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn row(&self, table: Table, id: DbId) -> Option<Value> {
        self.rows
            .lock()
            .unwrap()
            .get(&table)
            .and_then(|rows| rows.iter().find(|r| r["id"] == id).cloned())
    }

    pub fn count(&self, table: Table) -> usize {
        self.rows
            .lock()
            .unwrap()
            .get(&table)
            .map_or(0, Vec::len)
    }

    /// Store a row directly, bypassing call recording. Rows seeded later
    /// are newer.
    pub fn seed(&self, table: Table, fields: Value) -> DbId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id);
        let mut row = json!({
            "id": id,
            "created_at": created,
            "updated_at": created,
        });
        if table == Table::ContactMessages {
            row["is_read"] = json!(false);
        }
        merge(&mut row, fields);
        self.rows.lock().unwrap().entry(table).or_default().push(row);
        id
    }

    pub fn seed_software(&self, title: &str, category: &str) -> DbId {
        self.seed(
            Table::Software,
            json!({
                "title": title,
                "description": format!("{title} description"),
                "category": category,
                "image_url": null,
                "download_link": null,
            }),
        )
    }

    pub fn seed_electronics(&self, title: &str, category: &str, price: f64) -> DbId {
        self.seed(
            Table::Electronics,
            json!({
                "title": title,
                "description": format!("{title} description"),
                "category": category,
                "image_url": null,
                "price": price,
                "size": "55 inch",
            }),
        )
    }

    pub fn seed_message(&self, subject: &str) -> DbId {
        self.seed(
            Table::ContactMessages,
            json!({
                "name": "Visitor",
                "email": "visitor@example.com",
                "subject": subject,
                "message": "Hello there, please call me back.",
            }),
        )
    }

    pub fn register(&self, email: &str, is_admin: bool) -> Profile {
        let profile = Profile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: email.to_string(),
            full_name: Some("Test User".to_string()),
            is_admin,
        };
        self.users
            .lock()
            .unwrap()
            .push((profile.clone(), PASSWORD.to_string()));
        profile
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op) -> Result<(), BackendError> {
        if self.failing.lock().unwrap().contains(&op) {
            Err(BackendError::server(503, "UNAVAILABLE", "backend unavailable"))
        } else {
            Ok(())
        }
    }

    async fn wait_if_held(&self) {
        let gate = self.held.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}

/// Blank optional URLs are stored as null, like the real store.
fn normalise(row: &mut Value) {
    for key in ["image_url", "download_link"] {
        if row.get(key) == Some(&json!("")) {
            row[key] = Value::Null;
        }
    }
}

/// Tokens are derived from the user id so tests can predict them.
pub fn session_for(profile: &Profile) -> Session {
    Session {
        access_token: format!("access-{}", profile.id),
        refresh_token: format!("refresh-{}", profile.id),
        expires_in: 3600,
        user: profile.clone(),
    }
}

fn not_found(table: Table, id: DbId) -> BackendError {
    BackendError::server(404, "NOT_FOUND", format!("{} with id {id} not found", table.name()))
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self, table: Table, query: ListQuery) -> Result<Vec<Value>, BackendError> {
        self.record(Call::List(table));
        self.check(Op::List)?;
        let mut rows = self
            .rows
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default();
        if query.direction == Direction::Desc {
            rows.reverse();
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, record: Value) -> Result<Value, BackendError> {
        self.record(Call::Insert(table));
        self.wait_if_held().await;
        self.check(Op::Insert)?;
        let id = self.seed(table, record);
        let mut row = self.row(table, id).unwrap();
        normalise(&mut row);
        self.replace(table, id, row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: DbId, patch: Value) -> Result<Value, BackendError> {
        self.record(Call::Update(table, id));
        self.wait_if_held().await;
        self.check(Op::Update)?;
        let mut row = self.row(table, id).ok_or_else(|| not_found(table, id))?;
        merge(&mut row, patch);
        normalise(&mut row);
        self.replace(table, id, row.clone());
        Ok(row)
    }

    async fn delete(&self, table: Table, id: DbId) -> Result<(), BackendError> {
        self.record(Call::Delete(table, id));
        self.check(Op::Delete)?;
        let mut rows = self.rows.lock().unwrap();
        let rows = rows.entry(table).or_default();
        let before = rows.len();
        rows.retain(|r| r["id"] != id);
        if rows.len() == before {
            return Err(not_found(table, id));
        }
        Ok(())
    }

    async fn upload_asset(
        &self,
        folder: &str,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadedAsset, BackendError> {
        self.record(Call::Upload(folder.to_string(), file_name.to_string()));
        self.check(Op::Upload)?;
        let path = asset_object_path(folder, file_name, 1_700_000_000_000)
            .map_err(|e| BackendError::server(400, "VALIDATION_ERROR", e.to_string()))?;
        Ok(UploadedAsset {
            bucket: PRODUCT_IMAGES_BUCKET.to_string(),
            public_url: format!("http://assets.test/assets/{PRODUCT_IMAGES_BUCKET}/{path}"),
            path,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.record(Call::SignIn(email.to_string()));
        self.check(Op::SignIn)?;
        let users = self.users.lock().unwrap();
        let (profile, _) = users
            .iter()
            .find(|(p, pw)| p.email.eq_ignore_ascii_case(email) && pw == password)
            .ok_or_else(|| {
                BackendError::server(401, "UNAUTHORIZED", "Invalid email or password")
            })?;
        Ok(session_for(profile))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.record(Call::Refresh(refresh_token.to_string()));
        self.check(Op::Refresh)?;
        let users = self.users.lock().unwrap();
        let (profile, _) = users
            .iter()
            .find(|(p, _)| refresh_token == format!("refresh-{}", p.id))
            .ok_or_else(|| {
                BackendError::server(401, "UNAUTHORIZED", "Invalid or expired refresh token")
            })?;
        Ok(session_for(profile))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        full_name: &str,
    ) -> Result<Profile, BackendError> {
        self.record(Call::SignUp(email.to_string()));
        self.check(Op::SignUp)?;
        if self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|(p, _)| p.email.eq_ignore_ascii_case(email))
        {
            return Err(BackendError::server(409, "CONFLICT", "Email already registered"));
        }
        let mut profile = self.register(email, false);
        profile.full_name = Some(full_name.to_string());
        Ok(profile)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.record(Call::SignOut);
        self.check(Op::SignOut)
    }
}

impl MemoryBackend {
    fn replace(&self, table: Table, id: DbId, row: Value) {
        if let Some(rows) = self.rows.lock().unwrap().get_mut(&table) {
            if let Some(slot) = rows.iter_mut().find(|r| r["id"] == id) {
                *slot = row;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Context helpers
// ---------------------------------------------------------------------------

pub fn context(backend: &Arc<MemoryBackend>) -> AppContext {
    AppContext::init(backend.clone())
}

/// A context already signed in as `email`.
pub fn signed_in_context(backend: &Arc<MemoryBackend>, email: &str, is_admin: bool) -> AppContext {
    let ctx = context(backend);
    let profile = backend.register(email, is_admin);
    ctx.session().set(session_for(&profile));
    ctx
}

/// A context signed in with an admin account, as every admin view needs.
pub fn admin_context(backend: &Arc<MemoryBackend>) -> AppContext {
    signed_in_context(backend, "owner@techhub.test", true)
}

/// Every notice published so far on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}

pub fn count_level(notices: &[Notice], level: NoticeLevel) -> usize {
    notices.iter().filter(|n| n.level == level).count()
}

/// Accept every confirmation prompt.
pub fn yes(_prompt: &str) -> bool {
    true
}

/// Decline every confirmation prompt.
pub fn no(_prompt: &str) -> bool {
    false
}
