mod component_graph_builder;
mod responsibility_analyzer;
mod sbom_generator;

pub use component_graph_builder::{ComponentGraphBuilder, GraphBuildOptions};
pub use responsibility_analyzer::ResponsibilityAnalyzer;
pub use sbom_generator::SbomGenerator;
