use thiserror::Error;

/// Rejection of form input. The message is what the user sees in the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Fill in the required fields: login is empty")]
    MissingUser,
    #[error("Fill in the required fields: password is empty")]
    MissingSecret,
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("stored data under \"{key}\" could not be parsed: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to read \"{key}\" from storage: {source}")]
    Read {
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to write \"{key}\" to storage: {source}")]
    Write {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}
