use crate::ports::outbound::LicenseTextReader;
use crate::sbom_generation::domain::raw_node::{RawDependency, RawPackageNode};
use crate::sbom_generation::domain::{
    Component, ComponentGraph, ComponentType, Coordinate, RootComponent,
};
use crate::sbom_generation::policies::{HashPolicy, LicensePolicy, ReferencePolicy};
use crate::shared::error::AuditError;
use crate::shared::Result;

/// Version recorded for a root project that declares none
const UNVERSIONED_ROOT: &str = "0.0.0";

#[derive(Debug, Clone)]
pub struct GraphBuildOptions {
    /// Package-url type, e.g. `npm`
    pub ecosystem: String,
    /// Populate only purl, type, group, name and version
    pub spartan: bool,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            ecosystem: "npm".to_string(),
            spartan: false,
        }
    }
}

/// ComponentGraphBuilder service: normalizes a raw installed-package tree
/// into a deduplicated ComponentGraph
///
/// Traversal is depth-first pre-order over an explicit stack, so deep trees
/// cannot exhaust the call stack. For every non-root node:
/// 1. extraneous nodes are dropped together with their whole subtree
/// 2. the edge from the parent is recorded
/// 3. a purl already in the graph is not visited again (dedup and cycle break)
/// 4. otherwise the component is built and its object-valued children are
///    queued; string placeholders close cycles and are skipped
///
/// A node without a resolvable name or version is skipped, and its children
/// are attached to the nearest valid ancestor. A dependency that resolves to
/// the root project adds no edge.
pub struct ComponentGraphBuilder<'a, R: LicenseTextReader> {
    license_reader: &'a R,
    options: GraphBuildOptions,
}

struct PendingNode<'t> {
    parent_purl: String,
    key: Option<&'t str>,
    node: &'t RawPackageNode,
}

impl<'a, R: LicenseTextReader> ComponentGraphBuilder<'a, R> {
    pub fn new(license_reader: &'a R, options: GraphBuildOptions) -> Self {
        Self {
            license_reader,
            options,
        }
    }

    pub fn build(&self, tree: &RawPackageNode) -> Result<ComponentGraph> {
        let root = self.root_component(tree)?;
        let root_purl = root.purl.clone();
        let mut graph = ComponentGraph::new(root);

        let mut stack: Vec<PendingNode<'_>> = Vec::new();
        Self::push_children(&mut stack, &root_purl, tree);

        while let Some(PendingNode {
            parent_purl,
            key,
            node,
        }) = stack.pop()
        {
            if node.extraneous {
                tracing::debug!(
                    "Skipping extraneous package '{}' and its dependencies",
                    node.resolve_name(key).unwrap_or("<unnamed>")
                );
                continue;
            }

            let (name, version) = match (node.resolve_name(key), node.resolve_version()) {
                (Some(name), Some(version)) => (name, version),
                _ => {
                    let details = AuditError::InvalidNode {
                        details: format!(
                            "package '{}' has no resolvable name or version",
                            key.unwrap_or("<unnamed>")
                        ),
                    };
                    tracing::warn!("{}", details);
                    Self::push_children(&mut stack, &parent_purl, node);
                    continue;
                }
            };

            let coordinate = Coordinate::from_package_name(name, version);
            let purl = coordinate.to_purl(&self.options.ecosystem);

            if purl == root_purl {
                tracing::debug!("Skipping dependency on the root project from {}", parent_purl);
                continue;
            }

            graph.add_dependency(&parent_purl, &purl);

            if graph.contains(&purl) {
                continue;
            }

            graph.insert(self.build_component(node, &coordinate, purl.clone()));
            Self::push_children(&mut stack, &purl, node);
        }

        Ok(graph)
    }

    fn root_component(&self, tree: &RawPackageNode) -> Result<RootComponent> {
        let name = tree.resolve_name(None).ok_or_else(|| AuditError::InvalidNode {
            details: "the root project has no name".to_string(),
        })?;
        let version = tree.resolve_version().unwrap_or(UNVERSIONED_ROOT);
        let coordinate = Coordinate::from_package_name(name, version);

        Ok(RootComponent {
            purl: coordinate.to_purl(&self.options.ecosystem),
            name: coordinate.name().to_string(),
            group: coordinate.group().map(str::to_string),
            version: coordinate.version().to_string(),
        })
    }

    fn build_component(
        &self,
        node: &RawPackageNode,
        coordinate: &Coordinate,
        purl: String,
    ) -> Component {
        let mut component = Component::new(
            purl,
            coordinate.name().to_string(),
            coordinate.group().map(str::to_string),
            coordinate.version().to_string(),
            ComponentType::from_keywords(&node.keywords.to_vec()),
        );

        if self.options.spartan {
            return component;
        }

        let license_text = node
            .path
            .as_deref()
            .and_then(|dir| self.license_reader.read_license_text(dir));

        component.description = node
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        component.hashes = HashPolicy::select_hashes(node.shasum.as_deref(), node.integrity());
        component.licenses = LicensePolicy::licenses_for(node, license_text);
        component.external_references = ReferencePolicy::references_for(node);
        component
    }

    /// Queues children so that they pop in declaration order
    fn push_children<'t>(stack: &mut Vec<PendingNode<'t>>, parent_purl: &str, node: &'t RawPackageNode) {
        for (key, dependency) in node.dependencies.iter().rev() {
            match dependency {
                RawDependency::Node(child) => stack.push(PendingNode {
                    parent_purl: parent_purl.to_string(),
                    key: Some(key.as_str()),
                    node: child.as_ref(),
                }),
                RawDependency::Placeholder(_) => {
                    tracing::trace!("Skipping placeholder dependency '{}'", key);
                }
                RawDependency::Malformed(kind) => {
                    tracing::warn!(
                        "Skipping dependency entry '{}' of {}: expected a package object, found {}",
                        key,
                        parent_purl,
                        kind
                    );
                }
            }
        }
    }
}
