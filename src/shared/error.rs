use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors for the audit pipeline.
///
/// Every variant maps to one class of failure: malformed input, transport,
/// cache store, polling budget, serialization or local I/O. Callers that need
/// to react to a specific class can `downcast_ref::<AuditError>()` on the
/// `anyhow::Error` returned from the use cases.
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Invalid dependency tree node: {details}\n\n💡 Hint: The package-manager listing may be incomplete; re-run the install and try again")]
    InvalidNode { details: String },

    #[error("Request failed while {operation}\nDetails: {details}\n\n💡 Hint: Please check your network connection and the configured server URL")]
    Transport { operation: String, details: String },

    #[error("Server returned status {status} while {operation}\n\n💡 Hint: Verify your credentials and that the server is reachable")]
    UnexpectedStatus { operation: String, status: u16 },

    #[error("Cache store failure for key {key}\nDetails: {details}\n\n💡 Hint: Check that the cache directory is writable, or clear it and retry")]
    CacheStore { key: String, details: String },

    #[error("Polling attempts exceeded: no result after {attempts} attempt(s) (budget: {budget})\n\n💡 Hint: The scan may still be running on the server; raise the attempt budget and retry")]
    PollingAttemptsExceeded { attempts: u32, budget: u32 },

    #[error("Polling was cancelled before a result was available")]
    PollingCancelled,

    #[error("No application found for public id '{public_id}'\n\n💡 Hint: Check the application id and that your user can access it")]
    ApplicationNotFound { public_id: String },

    #[error("Failed to produce {format} output\nDetails: {details}")]
    Serialization { format: String, details: String },

    #[error("Failed to load config file: {path}\nDetails: {details}\n\n💡 Hint: Ensure the file contains valid YAML syntax")]
    ConfigError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl AuditError {
    pub fn transport(operation: &str, err: impl std::fmt::Display) -> Self {
        AuditError::Transport {
            operation: operation.to_string(),
            details: err.to_string(),
        }
    }

    /// True for failures raised by a remote call (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AuditError::Transport { .. } | AuditError::UnexpectedStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let error = AuditError::transport("posting component report", "connection refused");
        let display = format!("{}", error);
        assert!(display.contains("posting component report"));
        assert!(display.contains("connection refused"));
        assert!(display.contains("💡 Hint:"));
        assert!(error.is_transport());
    }

    #[test]
    fn test_unexpected_status_is_transport() {
        let error = AuditError::UnexpectedStatus {
            operation: "checking scan status".to_string(),
            status: 503,
        };
        assert!(error.is_transport());
        assert!(format!("{}", error).contains("503"));
    }

    #[test]
    fn test_polling_attempts_exceeded_display() {
        let error = AuditError::PollingAttemptsExceeded {
            attempts: 4,
            budget: 3,
        };
        let display = format!("{}", error);
        assert!(display.starts_with("Polling attempts exceeded"));
        assert!(display.contains("budget: 3"));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_cache_store_display() {
        let error = AuditError::CacheStore {
            key: "pkg:npm/lodash@4.17.20".to_string(),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("pkg:npm/lodash@4.17.20"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_config_error_display() {
        let error = AuditError::ConfigError {
            path: PathBuf::from("/tmp/sbom-audit.config.yml"),
            details: "unexpected end of stream".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/tmp/sbom-audit.config.yml"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = AuditError::PollingCancelled.into();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::PollingCancelled)
        ));
    }
}
