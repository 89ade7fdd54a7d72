//! [`Backend`] over the Tech Hub HTTP API using [`reqwest`].
//!
//! Successful bodies arrive wrapped as `{ "data": ... }` (auth token
//! responses excepted); failures carry `{ "error", "code", "fields"? }`.
//! The bearer token of the signed-in session is attached to every request.
//!
//! Access tokens are short-lived. One that is past its `expires_in` is
//! renewed before the request goes out, and a request rejected with 401
//! is retried once after a renewal. Renewal uses `POST /auth/refresh`,
//! which rotates the refresh token. If the server refuses it the tokens
//! are dropped and the bound [`SessionState`] is cleared.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use techhub_core::search::Direction;
use techhub_core::types::DbId;
use techhub_core::validation::FieldErrors;
use techhub_db::models::user::Profile;
use tokio::sync::RwLock;

use crate::backend::{Backend, ListQuery, Session, Table, UploadedAsset};
use crate::context::SessionState;
use crate::error::BackendError;

const API_PREFIX: &str = "/api/v1";

/// Renew this long before the server would start rejecting the token.
const RENEW_MARGIN: Duration = Duration::from_secs(30);

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    tokens: RwLock<Option<Tokens>>,
    session: OnceLock<SessionState>,
}

#[derive(Debug, Clone)]
struct Tokens {
    access: String,
    refresh: String,
    expires_at: Instant,
}

impl Tokens {
    fn from_session(session: &Session) -> Self {
        let ttl = Duration::from_secs(u64::try_from(session.expires_in).unwrap_or(0));
        Self {
            access: session.access_token.clone(),
            refresh: session.refresh_token.clone(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_stale(&self) -> bool {
        Instant::now() + RENEW_MARGIN >= self.expires_at
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
    #[serde(default)]
    fields: FieldErrors,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    email: &'a str,
    password: &'a str,
    full_name: &'a str,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Collection path used for listing.
fn list_path(table: Table) -> &'static str {
    match table {
        Table::Software => "/software",
        Table::Electronics => "/electronics",
        Table::Services => "/services",
        Table::ContactMessages => "/admin/messages",
    }
}

/// Collection path used for inserts. Contact messages are created by
/// the public form, everything else by admins.
fn insert_path(table: Table) -> &'static str {
    match table {
        Table::Software => "/admin/software",
        Table::Electronics => "/admin/electronics",
        Table::Services => "/admin/services",
        Table::ContactMessages => "/contact",
    }
}

fn item_path(table: Table, id: DbId) -> String {
    match table {
        Table::ContactMessages => format!("/admin/messages/{id}"),
        other => format!("{}/{id}", insert_path(other)),
    }
}

/// `?direction=..&limit=..` pairs for a list request.
fn list_params(query: ListQuery) -> Vec<(&'static str, String)> {
    let direction = match query.direction {
        Direction::Asc => "asc",
        Direction::Desc => "desc",
    };
    let mut params = vec![("direction", direction.to_string())];
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

/// Messages only support the one-way `is_read` flip.
fn is_read_flip(patch: &Value) -> bool {
    patch.as_object().is_some_and(|fields| {
        fields.len() == 1 && fields.get("is_read") == Some(&Value::Bool(true))
    })
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

impl HttpBackend {
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: RwLock::new(None),
            session: OnceLock::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Adopt a session obtained elsewhere, e.g. one persisted across
    /// restarts. Its tokens are used and renewed like a fresh sign-in.
    pub async fn restore(&self, session: &Session) {
        *self.tokens.write().await = Some(Tokens::from_session(session));
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// Build, authorise and send a request. `build` may run twice: once
    /// more after a 401 that a token renewal could fix.
    async fn execute(
        &self,
        build: impl Fn() -> RequestBuilder + Send + Sync,
    ) -> Result<Response, BackendError> {
        let held = self.tokens.read().await.clone();
        let access = match held {
            Some(tokens) if tokens.is_stale() => Some(self.renew(&tokens.access).await?),
            Some(tokens) => Some(tokens.access),
            None => None,
        };

        let response = Self::dispatch(build(), access.as_deref()).await?;
        let Some(stale) = access.filter(|_| response.status() == StatusCode::UNAUTHORIZED) else {
            return Self::ensure_success(response).await;
        };

        tracing::debug!(url = %response.url(), "Access token rejected; renewing once");
        let access = self.renew(&stale).await?;
        let retried = Self::dispatch(build(), Some(&access)).await?;
        Self::ensure_success(retried).await
    }

    async fn dispatch(
        builder: RequestBuilder,
        access: Option<&str>,
    ) -> Result<Response, BackendError> {
        let builder = match access {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Replace the access token `stale` and return its successor.
    ///
    /// Renewals are serialised by the token lock; a caller that lost the
    /// race picks up the token the winner stored.
    async fn renew(&self, stale: &str) -> Result<String, BackendError> {
        let mut tokens = self.tokens.write().await;
        let held = tokens
            .clone()
            .ok_or_else(|| BackendError::server(401, "UNAUTHORIZED", "Not signed in"))?;
        if held.access != stale {
            return Ok(held.access);
        }

        match self.exchange(&held.refresh).await {
            Ok(session) => {
                let renewed = Tokens::from_session(&session);
                let access = renewed.access.clone();
                *tokens = Some(renewed);
                tracing::info!(user_id = session.user.id, "Access token renewed");
                if let Some(bound) = self.session.get() {
                    bound.set(session);
                }
                Ok(access)
            }
            Err(e) if e.is_auth_rejection() => {
                *tokens = None;
                tracing::warn!(error = %e, "Session renewal refused; signing out");
                if let Some(bound) = self.session.get() {
                    bound.clear();
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// `POST /auth/refresh` without touching the stored tokens.
    async fn exchange(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        Self::parse(Self::ensure_success(response).await?).await
    }

    // ---- private helpers ----

    /// Map a non-2xx response to [`BackendError::Server`], keeping the
    /// API's message and field errors when the body has them.
    async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or_else(|_| ErrorBody {
            error: if text.is_empty() {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                text
            },
            ..Default::default()
        });
        Err(BackendError::Server {
            status: status.as_u16(),
            code: body.code,
            message: body.error,
            fields: body.fields,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(format!("response body: {e}")))
    }

    async fn parse_data<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        Ok(Self::parse::<Envelope<T>>(response).await?.data)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self, table: Table, query: ListQuery) -> Result<Vec<Value>, BackendError> {
        let url = self.url(list_path(table));
        let params = list_params(query);
        let response = self
            .execute(|| self.client.get(&url).query(&params))
            .await?;
        Self::parse_data(response).await
    }

    async fn insert(&self, table: Table, record: Value) -> Result<Value, BackendError> {
        let url = self.url(insert_path(table));
        let response = self.execute(|| self.client.post(&url).json(&record)).await?;
        Self::parse_data(response).await
    }

    async fn update(&self, table: Table, id: DbId, patch: Value) -> Result<Value, BackendError> {
        let response = match table {
            Table::ContactMessages if is_read_flip(&patch) => {
                let url = self.url(&format!("{}/read", item_path(table, id)));
                self.execute(|| self.client.put(&url)).await?
            }
            Table::ContactMessages => {
                return Err(BackendError::Unsupported(
                    "contact messages only support marking as read".into(),
                ))
            }
            _ => {
                let url = self.url(&item_path(table, id));
                self.execute(|| self.client.put(&url).json(&patch)).await?
            }
        };
        Self::parse_data(response).await
    }

    async fn delete(&self, table: Table, id: DbId) -> Result<(), BackendError> {
        let url = self.url(&item_path(table, id));
        self.execute(|| self.client.delete(&url)).await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedAsset, BackendError> {
        let url = self.url(&format!("/admin/assets/{folder}"));
        // A multipart body is consumed on send, so each attempt builds its own.
        let response = self
            .execute(|| {
                let part = Part::bytes(bytes.clone()).file_name(file_name.to_string());
                self.client.post(&url).multipart(Form::new().part("file", part))
            })
            .await?;
        Self::parse_data(response).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/sign-in"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        let session: Session = Self::parse(Self::ensure_success(response).await?).await?;
        *self.tokens.write().await = Some(Tokens::from_session(&session));
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let mut tokens = self.tokens.write().await;
        let session = self.exchange(refresh_token).await?;
        *tokens = Some(Tokens::from_session(&session));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/sign-up"))
            .json(&Registration {
                email,
                password,
                full_name,
            })
            .send()
            .await?;
        Self::parse_data(Self::ensure_success(response).await?).await
    }

    /// Revokes every session server-side. The local tokens are dropped
    /// whatever the outcome.
    async fn sign_out(&self) -> Result<(), BackendError> {
        if self.tokens.read().await.is_none() {
            return Ok(());
        }
        let url = self.url("/auth/sign-out");
        let result = self.execute(|| self.client.post(&url)).await.map(|_| ());
        *self.tokens.write().await = None;
        result
    }

    fn bind_session(&self, session: SessionState) {
        if self.session.set(session).is_err() {
            tracing::warn!("HttpBackend already bound to a session; ignoring rebind");
        }
    }
}
