//! Sign-in, sign-up and sign-out flows.
//!
//! A successful sign-in is the only thing that starts a session in the
//! [`AppContext`]; sign-up just registers the account. [`refresh_session`]
//! keeps a session alive past its access token.

use techhub_core::validation::{validate_sign_in, validate_sign_up};
use techhub_db::models::user::Profile;

use crate::context::AppContext;
use crate::error::{BackendError, Denial, FormError};
use crate::notify::Notice;

pub async fn sign_in(ctx: &AppContext, email: &str, password: &str) -> Result<Profile, FormError> {
    validate_sign_in(email, password).into_result()?;

    match ctx.backend().sign_in(email.trim(), password).await {
        Ok(session) => {
            let profile = session.user.clone();
            ctx.session().set(session);
            tracing::info!(user_id = profile.id, is_admin = profile.is_admin, "Signed in");
            ctx.notify(
                Notice::success("Success").with_description("You have been logged in successfully"),
            );
            Ok(profile)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            ctx.notify(Notice::error("Login failed").with_description(e.to_string()));
            Err(FormError::Backend(e))
        }
    }
}

pub async fn sign_up(
    ctx: &AppContext,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<Profile, FormError> {
    validate_sign_up(full_name, email, password).into_result()?;

    match ctx
        .backend()
        .sign_up(email.trim(), password, full_name.trim())
        .await
    {
        Ok(profile) => {
            tracing::info!(user_id = profile.id, "Account created");
            ctx.notify(
                Notice::success("Account created!")
                    .with_description("You can now sign in with your new account"),
            );
            Ok(profile)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-up failed");
            ctx.notify(Notice::error("Signup failed").with_description(e.to_string()));
            Err(FormError::Backend(e))
        }
    }
}

/// Rotate the current session's tokens.
///
/// If the server refuses the refresh token the session is over: it is
/// cleared and the user is asked to sign in again. Other failures leave
/// the session in place for a later attempt.
pub async fn refresh_session(ctx: &AppContext) -> Result<Profile, BackendError> {
    let current = ctx.session().current().ok_or(Denial::SignedOut)?;

    match ctx.backend().refresh(&current.refresh_token).await {
        Ok(session) => {
            let profile = session.user.clone();
            ctx.session().set(session);
            tracing::debug!(user_id = profile.id, "Session refreshed");
            Ok(profile)
        }
        Err(e) if e.is_auth_rejection() => {
            ctx.session().clear();
            tracing::warn!(user_id = current.user.id, error = %e, "Session expired");
            ctx.notify(Notice::error("Session expired").with_description("Please sign in again"));
            Err(e)
        }
        Err(e) => {
            tracing::warn!(user_id = current.user.id, error = %e, "Session refresh failed");
            Err(e)
        }
    }
}

/// End the session. See [`AppContext::teardown`].
pub async fn sign_out(ctx: &AppContext) -> Result<(), BackendError> {
    ctx.teardown().await
}
