use crate::sbom_generation::services::GraphBuildOptions;

/// SbomRequest - options for building the graph and its SBOM document
#[derive(Debug, Clone)]
pub struct SbomRequest {
    /// Package-url type used for every purl, e.g. `npm`
    pub ecosystem: String,
    /// Only identity fields per component
    pub spartan: bool,
    /// Attach a `urn:uuid:` serial number to the document
    pub include_serial_number: bool,
}

impl SbomRequest {
    pub fn new(ecosystem: String, spartan: bool, include_serial_number: bool) -> Self {
        Self {
            ecosystem,
            spartan,
            include_serial_number,
        }
    }

    pub fn graph_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            ecosystem: self.ecosystem.clone(),
            spartan: self.spartan,
        }
    }
}

impl Default for SbomRequest {
    fn default() -> Self {
        Self::new("npm".to_string(), false, true)
    }
}
