//! sbom-audit - dependency tree auditing
//!
//! This library turns a package manager's resolved dependency tree into a
//! CycloneDX XML SBOM, looks up known vulnerabilities for every component in
//! cache-aware batches, explains which direct dependency pulled each
//! vulnerable package in, and can submit the SBOM to a policy scan server.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_audit::prelude::*;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let tree = FileSystemTreeReader::new().read_tree(Path::new("tree.json"))?;
//!
//! let sbom = GenerateSbomUseCase::new(
//!     FileSystemLicenseReader::new(),
//!     CycloneDxXmlFormatter::new(),
//!     StderrProgressReporter::new(),
//! )
//! .execute(&tree, &SbomRequest::default())?;
//! println!("{}", sbom.document);
//!
//! let audit = AuditComponentsUseCase::new(
//!     OssIndexClient::new(OssIndexClient::DEFAULT_BASE_URL, None)?,
//!     InMemoryCacheStore::new(Duration::from_secs(12 * 3600)),
//!     StderrProgressReporter::new(),
//! );
//! let response = audit.execute(&sbom.graph, "npm").await?;
//! println!("{}", AuditReportFormatter::new().format(&response.outcomes)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::{FileCacheStore, InMemoryCacheStore};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemLicenseReader, FileSystemTreeReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        AuditReportFormatter, CycloneDxXmlFormatter, ResponsibilityFormatter,
    };
    pub use crate::adapters::outbound::network::{Credentials, IqClient, OssIndexClient};
    pub use crate::application::dto::{AuditResponse, SbomRequest, SbomResponse};
    pub use crate::application::use_cases::{
        AuditComponentsUseCase, GenerateSbomUseCase, PollScanResultsUseCase, PollingOptions,
    };
    pub use crate::ports::outbound::{
        CacheStore, ComponentReportRepository, LicenseTextReader, OutputPresenter,
        ProgressReporter, SbomFormatter, ScanClient, ScanStatus,
    };
    pub use crate::sbom_generation::domain::{
        AuditOutcome, ComponentGraph, Coordinate, DependencyGraph, RawPackageNode,
        ResponsibilityNode, SbomMetadata,
    };
    pub use crate::sbom_generation::services::{ResponsibilityAnalyzer, SbomGenerator};
    pub use crate::shared::Result;
}
