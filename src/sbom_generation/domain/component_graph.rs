use super::{Component, Coordinate, DependencyGraph};
use std::collections::HashMap;

/// Identity of the project the dependency tree was listed for
///
/// The root is part of the graph (its edges point at the direct
/// dependencies) but is never a `Component`.
#[derive(Debug, Clone, PartialEq)]
pub struct RootComponent {
    pub purl: String,
    pub name: String,
    pub group: Option<String>,
    pub version: String,
}

/// ComponentGraph aggregate: arena of components keyed by purl plus the
/// dependency graph over those purls
///
/// Components keep traversal (insertion) order. A purl enters the arena at
/// most once.
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    root: RootComponent,
    components: Vec<Component>,
    index: HashMap<String, usize>,
    graph: DependencyGraph,
}

impl ComponentGraph {
    pub fn new(root: RootComponent) -> Self {
        let mut graph = DependencyGraph::new();
        graph.add_node(&root.purl);
        Self {
            root,
            components: Vec::new(),
            index: HashMap::new(),
            graph,
        }
    }

    /// Inserts a component unless its purl is already known
    ///
    /// Returns false, leaving the existing entry untouched, on a duplicate.
    pub fn insert(&mut self, component: Component) -> bool {
        if self.index.contains_key(&component.purl) {
            return false;
        }
        self.graph.add_node(&component.purl);
        self.index
            .insert(component.purl.clone(), self.components.len());
        self.components.push(component);
        true
    }

    pub fn add_dependency(&mut self, from: &str, to: &str) {
        self.graph.add_edge(from, to);
    }

    pub fn contains(&self, purl: &str) -> bool {
        self.index.contains_key(purl)
    }

    pub fn get(&self, purl: &str) -> Option<&Component> {
        self.index.get(purl).map(|&i| &self.components[i])
    }

    pub fn root(&self) -> &RootComponent {
        &self.root
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Flat coordinate list for the vulnerability lookup, in component order
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.components
            .iter()
            .map(|c| Coordinate::new(c.name.clone(), c.version.clone(), c.group.clone()))
            .collect()
    }

    /// Human readable name for a purl in the graph, falling back to the purl
    pub fn display_name(&self, purl: &str) -> String {
        if purl == self.root.purl {
            return format!("{}@{}", self.root.name, self.root.version);
        }
        self.get(purl)
            .map(|c| c.to_string())
            .unwrap_or_else(|| purl.to_string())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::ComponentType;

    fn root() -> RootComponent {
        RootComponent {
            purl: "pkg:npm/app@1.0.0".to_string(),
            name: "app".to_string(),
            group: None,
            version: "1.0.0".to_string(),
        }
    }

    fn component(coordinate: &Coordinate) -> Component {
        Component::new(
            coordinate.to_purl("npm"),
            coordinate.name().to_string(),
            coordinate.group().map(str::to_string),
            coordinate.version().to_string(),
            ComponentType::Library,
        )
    }

    #[test]
    fn test_insert_is_keyed_by_purl() {
        let mut graph = ComponentGraph::new(root());
        let coordinate = Coordinate::new(
            "foo".to_string(),
            "1.0.0".to_string(),
            Some("@scope".to_string()),
        );

        assert!(graph.insert(component(&coordinate)));
        assert!(graph.contains("pkg:npm/%40scope/foo@1.0.0"));
        assert_eq!(graph.get("pkg:npm/%40scope/foo@1.0.0").unwrap().name, "foo");
    }

    #[test]
    fn test_insert_duplicate_keeps_first() {
        let mut graph = ComponentGraph::new(root());
        let coordinate = Coordinate::from_package_name("lodash", "4.17.21");
        let mut first = component(&coordinate);
        first.description = Some("first".to_string());
        let mut second = component(&coordinate);
        second.description = Some("second".to_string());

        assert!(graph.insert(first));
        assert!(!graph.insert(second));
        assert_eq!(graph.component_count(), 1);
        assert_eq!(
            graph.get("pkg:npm/lodash@4.17.21").unwrap().description.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_root_is_a_graph_node_but_not_a_component() {
        let graph = ComponentGraph::new(root());
        assert!(graph.graph().contains("pkg:npm/app@1.0.0"));
        assert!(!graph.contains("pkg:npm/app@1.0.0"));
        assert_eq!(graph.display_name("pkg:npm/app@1.0.0"), "app@1.0.0");
    }

    #[test]
    fn test_coordinates_follow_component_order() {
        let mut graph = ComponentGraph::new(root());
        graph.insert(component(&Coordinate::from_package_name("b", "1.0.0")));
        graph.insert(component(&Coordinate::from_package_name("@x/a", "2.0.0")));

        let coordinates = graph.coordinates();
        assert_eq!(coordinates.len(), 2);
        assert_eq!(coordinates[0].name(), "b");
        assert_eq!(coordinates[1].group(), Some("@x"));
        assert_eq!(coordinates[1].to_purl("npm"), "pkg:npm/%40x/a@2.0.0");
    }
}
