//! Authentication failure taxonomy.
//!
//! Internally every rejection keeps its precise cause so it can be logged.
//! Outwardly they collapse to [`AuthFailure`]: one "unauthenticated" signal
//! for anything wrong with the credential, and "forbidden" only when the
//! credential was valid but the account is disabled.

/// Why a presented token could not be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not a structurally valid token (bad segments, encoding, claims, algorithm).
    #[error("token is malformed")]
    Malformed,
    /// Signature does not verify under the server secret.
    #[error("token signature is invalid")]
    SignatureInvalid,
    /// Signature is fine but the `exp` claim is not in the future.
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no bearer token presented")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token subject does not match any user")]
    UserNotFound,

    #[error("user account is disabled")]
    UserInactive,

    /// Login-time only. Deliberately silent on which half was wrong.
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("user lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),

    /// The blocking password-check task panicked or was cancelled.
    #[error("password check did not complete: {0}")]
    PasswordTask(#[from] tokio::task::JoinError),
}

/// The caller-visible outcome of a rejected credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Unauthenticated,
    Forbidden,
}

impl AuthError {
    /// Collapse to the outward outcome. `None` means the failure was not the
    /// caller's fault (the user store could not be read, or the password
    /// check never finished).
    pub fn failure(&self) -> Option<AuthFailure> {
        match self {
            AuthError::MissingToken
            | AuthError::Token(_)
            | AuthError::UserNotFound
            | AuthError::InvalidCredentials => Some(AuthFailure::Unauthenticated),
            AuthError::UserInactive => Some(AuthFailure::Forbidden),
            AuthError::Lookup(_) | AuthError::PasswordTask(_) => None,
        }
    }
}
