use crate::sbom_generation::domain::ScanReport;
use crate::shared::Result;
use async_trait::async_trait;

/// Answer to a single status request
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStatus {
    /// The server answered with a non-success status; the scan is not done
    Pending { status: u16 },
    /// The report body parsed successfully
    Ready(ScanReport),
}

/// ScanClient port for a third-party policy scan server
#[async_trait]
pub trait ScanClient: Send + Sync {
    /// Resolves the server's internal id for an application public id
    ///
    /// # Errors
    /// Transport failures, or a response without an application id
    async fn resolve_internal_id(&self, public_id: &str) -> Result<String>;

    /// Submits an SBOM document and returns the status URL to poll
    async fn submit_sbom(&self, internal_id: &str, sbom: &str) -> Result<String>;

    /// Issues one status request
    ///
    /// # Errors
    /// Transport failures, or a success response whose body does not parse
    async fn check_status(&self, status_url: &str) -> Result<ScanStatus>;
}
