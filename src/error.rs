use thiserror::Error;

use crate::model::entity::OrgId;

/// Malformed allocation input. The caller has to fix the request; nothing
/// is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown org as locked slot: {0}")]
    UnknownLockedOrg(OrgId),
}

/// Failures decoding or encoding the JSON documents around an allocation.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid allocation sheet: {0}")]
    Sheet(#[source] serde_json::Error),
    #[error("invalid program settings: {0}")]
    Settings(#[source] serde_json::Error),
}
