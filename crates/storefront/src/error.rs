use techhub_core::validation::FieldErrors;

/// Why the current session may not open an admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("Please sign in with an admin account")]
    SignedOut,

    #[error("Admin privileges required")]
    NotAdmin,
}

/// Errors from talking to the backing store.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("{message}")]
    Server {
        status: u16,
        code: String,
        message: String,
        fields: FieldErrors,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The operation has no equivalent on this backend.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Refused locally; no request was sent.
    #[error(transparent)]
    Denied(#[from] Denial),
}

impl BackendError {
    /// A server-side rejection without field details.
    pub fn server(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Server {
            status,
            code: code.into(),
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    /// The server refused the credentials themselves (401 or 403), as
    /// opposed to being unreachable or failing.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, BackendError::Server { status: 401 | 403, .. })
    }

    /// HTTP status of a server rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Server { status, .. } => Some(*status),
            BackendError::Request(e) => e.status().map(|s| s.as_u16()),
            BackendError::Denied(Denial::SignedOut) => Some(401),
            BackendError::Denied(Denial::NotAdmin) => Some(403),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Decode(e.to_string())
    }
}

/// Errors from submitting a form (admin drafts, contact, auth).
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Local validation failed; nothing was sent.
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),

    /// A submission from the same form is still in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// Submit was called with no editing surface open.
    #[error("No form is open")]
    NotOpen,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<FieldErrors> for FormError {
    fn from(errors: FieldErrors) -> Self {
        FormError::Invalid(errors)
    }
}
