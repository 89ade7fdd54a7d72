//! Process-wide state, passed explicitly.
//!
//! An [`AppContext`] is created once at start-up with [`AppContext::init`]
//! and cloned into every page that needs the backend, notifications or
//! the current session. [`AppContext::teardown`] ends the session.
//!
//! The backend is bound to the same [`SessionState`], so a token renewal
//! it performs (or a failed one, which signs the user out) is visible to
//! every page.

use std::sync::{Arc, PoisonError, RwLock};

use techhub_db::models::user::Profile;

use crate::backend::{Backend, Session};
use crate::error::{BackendError, Denial};
use crate::notify::{Notice, Notifier};

/// The signed-in session, if any. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionState {
    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.current().map(|s| s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Whether to show admin affordances. Not a security boundary: the
    /// backend re-checks every mutation.
    pub fn is_admin(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| s.user.is_admin)
    }

    /// Gate for admin views: a signed-in session whose profile is admin.
    /// The backend still re-checks every request.
    pub fn admin_access(&self) -> Result<(), Denial> {
        match self.inner.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            None => Err(Denial::SignedOut),
            Some(session) if !session.user.is_admin => Err(Denial::NotAdmin),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    backend: Arc<dyn Backend>,
    notifier: Arc<Notifier>,
    session: SessionState,
}

impl AppContext {
    pub fn init(backend: Arc<dyn Backend>) -> Self {
        let session = SessionState::default();
        backend.bind_session(session.clone());
        tracing::debug!("Storefront context initialised");
        Self {
            backend,
            notifier: Arc::new(Notifier::default()),
            session,
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.publish(notice);
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Sign out of the backend and forget the local session.
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn teardown(&self) -> Result<(), BackendError> {
        let Some(session) = self.session.current() else {
            return Ok(());
        };
        let result = self.backend.sign_out().await;
        self.session.clear();
        match &result {
            Ok(()) => tracing::info!(user_id = session.user.id, "Session ended"),
            Err(e) => tracing::warn!(
                user_id = session.user.id,
                error = %e,
                "Sign-out failed; local session cleared anyway"
            ),
        }
        result
    }
}
