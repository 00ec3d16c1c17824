use time::OffsetDateTime;

/// A freshly issued session, returned to the login handler for cookie construction.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub owner: String,
    pub expires_at: OffsetDateTime,
}

/// Caller identity resolved by the authentication gate.
///
/// Inserted into request extensions for protected routes only; handlers take it
/// with `Extension<Identity>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}
