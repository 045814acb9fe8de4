use crate::application::dto::{SbomRequest, SbomResponse};
use crate::ports::outbound::{LicenseTextReader, ProgressReporter, SbomFormatter};
use crate::sbom_generation::domain::RawPackageNode;
use crate::sbom_generation::services::{ComponentGraphBuilder, SbomGenerator};
use crate::shared::Result;

/// GenerateSbomUseCase - builds the component graph and serializes it
///
/// # Type Parameters
/// * `LT` - LicenseTextReader implementation
/// * `F` - SbomFormatter implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<LT, F, PR> {
    license_reader: LT,
    formatter: F,
    progress_reporter: PR,
}

impl<LT, F, PR> GenerateSbomUseCase<LT, F, PR>
where
    LT: LicenseTextReader,
    F: SbomFormatter,
    PR: ProgressReporter,
{
    pub fn new(license_reader: LT, formatter: F, progress_reporter: PR) -> Self {
        Self {
            license_reader,
            formatter,
            progress_reporter,
        }
    }

    /// Builds the graph from a raw tree and renders the SBOM document
    ///
    /// # Errors
    /// Returns an error if the root node has no name or the document
    /// cannot be serialized
    pub fn execute(&self, tree: &RawPackageNode, request: &SbomRequest) -> Result<SbomResponse> {
        self.progress_reporter
            .report("📊 Building dependency graph...");

        let builder = ComponentGraphBuilder::new(&self.license_reader, request.graph_options());
        let graph = builder.build(tree)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} component(s), {} edge(s)",
            graph.component_count(),
            graph.graph().edge_count()
        ));

        let metadata = SbomGenerator::generate_default_metadata(request.include_serial_number);
        let document = self.formatter.format(&graph, &metadata)?;

        Ok(SbomResponse::new(graph, metadata, document))
    }
}
