//! Shapes of the Wistia JSON responses that the client needs to look into.
//! Everything else is returned to the caller as a raw [`serde_json::Value`].
use serde::Deserialize;

/// Response of `POST /v2/expiring_token`
#[derive(Debug, Deserialize)]
pub(crate) struct ExpiringTokenResponse {
    pub(crate) data: ExpiringTokenData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpiringTokenData {
    /// The token itself, opaque to us
    pub(crate) id: String,
}
