use thiserror::Error;

use crate::api::ApiError;
use crate::transfer::TransferError;

/// Per-file failure inside a batch. Recorded and reported; never aborts
/// sibling transfers.
#[derive(Debug, Error)]
pub enum FerryError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Timed out waiting for {file_name} after {timeout_secs}s")]
    Timeout {
        file_name: String,
        timeout_secs: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display() {
        let err = FerryError::Timeout {
            file_name: "a.json".into(),
            timeout_secs: 600,
        };
        assert_eq!(err.to_string(), "Timed out waiting for a.json after 600s");
    }

    #[test]
    fn wraps_api_error() {
        let err: FerryError = ApiError::Gateway {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(err.to_string().starts_with("API error:"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FerryError>();
    }
}
