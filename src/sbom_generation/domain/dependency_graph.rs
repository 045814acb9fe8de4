use std::collections::HashMap;

/// DependencyGraph: directed adjacency over purls
///
/// An edge `A -> B` means "A depends on B". Both directions are indexed so
/// callers can ask for the direct dependencies of a node as well as for the
/// nodes that depend on it. Node and edge insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    forward: HashMap<String, Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; returns false if it was already present
    pub fn add_node(&mut self, purl: &str) -> bool {
        if self.forward.contains_key(purl) {
            return false;
        }
        self.nodes.push(purl.to_string());
        self.forward.insert(purl.to_string(), Vec::new());
        self.reverse.entry(purl.to_string()).or_default();
        true
    }

    /// Records `from -> to`, adding missing nodes. Repeated edges are ignored.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);

        let targets = self.forward.entry(from.to_string()).or_default();
        if targets.iter().any(|t| t == to) {
            return;
        }
        targets.push(to.to_string());
        self.reverse
            .entry(to.to_string())
            .or_default()
            .push(from.to_string());
    }

    pub fn contains(&self, purl: &str) -> bool {
        self.forward.contains_key(purl)
    }

    /// Direct dependencies of `purl`, in the order they were recorded
    pub fn dependencies_of(&self, purl: &str) -> &[String] {
        self.forward.get(purl).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes that directly depend on `purl`
    pub fn dependents_of(&self, purl: &str) -> &[String] {
        self.reverse.get(purl).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// All edges as `(from, to)` pairs, grouped by source in node order
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.nodes
            .iter()
            .flat_map(|from| {
                self.dependencies_of(from)
                    .iter()
                    .map(move |to| (from.as_str(), to.as_str()))
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(|v| v.len()).sum()
    }
}
