use thiserror::Error;

pub type Result<T> = std::result::Result<T, AclError>;

/// Errors surfaced while decoding whitelist state.
///
/// Malformed addresses handed to a `permitted` check are never errors; they
/// resolve locally as "not permitted" (fail-closed).
#[derive(Error, Debug)]
pub enum AclError {
    #[error("Invalid whitelist encoding: expected a JSON string or array of strings")]
    InvalidEncoding,

    #[error("Invalid IP network: {0}")]
    InvalidNetwork(String),

    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
