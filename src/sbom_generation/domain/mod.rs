pub mod audit_outcome;
pub mod cache_entry;
pub mod component;
pub mod component_graph;
pub mod coordinate;
pub mod dependency_graph;
pub mod raw_node;
pub mod responsibility;
pub mod sbom_metadata;
pub mod scan_report;

pub use audit_outcome::{AuditOutcome, Severity, Vulnerability};
pub use cache_entry::CacheEntry;
pub use component::{
    Component, ComponentHash, ComponentType, ExternalReference, ExternalReferenceType,
    HashAlgorithm, License, LicenseChoice, LicenseText,
};
pub use component_graph::{ComponentGraph, RootComponent};
pub use coordinate::Coordinate;
pub use dependency_graph::DependencyGraph;
pub use raw_node::{RawDependency, RawLicense, RawLicenses, RawPackageNode, MAX_TREE_DEPTH};
pub use responsibility::{Responsibility, ResponsibilityNode};
pub use sbom_metadata::SbomMetadata;
pub use scan_report::ScanReport;
