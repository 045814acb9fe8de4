use crate::sbom_generation::domain::AuditOutcome;
use crate::shared::Result;
use async_trait::async_trait;

/// ComponentReportRepository port for the remote vulnerability database
///
/// One call is one remote request. Callers are responsible for keeping
/// `purls` within the server's batch limit.
#[async_trait]
pub trait ComponentReportRepository: Send + Sync {
    /// Fetches one AuditOutcome per submitted purl
    ///
    /// # Errors
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be parsed
    async fn fetch_component_reports(&self, purls: &[String]) -> Result<Vec<AuditOutcome>>;
}
