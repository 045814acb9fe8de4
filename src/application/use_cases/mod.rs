/// Use cases module containing application business logic orchestration
mod audit_components;
mod generate_sbom;
mod poll_scan_results;

pub use audit_components::{AuditComponentsUseCase, MAX_BATCH};
pub use generate_sbom::GenerateSbomUseCase;
pub use poll_scan_results::{PollScanResultsUseCase, PollingOptions};
