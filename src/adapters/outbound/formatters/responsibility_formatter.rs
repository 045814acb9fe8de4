use crate::sbom_generation::domain::{ComponentGraph, ResponsibilityNode};

/// ResponsibilityFormatter renders a responsibility tree as indented text
///
/// One line per node, two spaces per depth level, with the classification
/// label in parentheses. Unclassified nodes show the name only.
pub struct ResponsibilityFormatter<'a> {
    graph: &'a ComponentGraph,
}

impl<'a> ResponsibilityFormatter<'a> {
    pub fn new(graph: &'a ComponentGraph) -> Self {
        Self { graph }
    }

    pub fn format(&self, tree: &ResponsibilityNode) -> String {
        let mut output = String::new();
        self.write_node(&mut output, tree);
        output
    }

    fn write_node(&self, output: &mut String, node: &ResponsibilityNode) {
        output.push_str(&"  ".repeat(node.depth));
        output.push_str("- ");
        output.push_str(&self.graph.display_name(&node.name));
        if let Some(label) = node.classify().label() {
            output.push_str(" (");
            output.push_str(label);
            output.push(')');
        }
        output.push('\n');

        for child in &node.children {
            self.write_node(output, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{Component, ComponentType, RootComponent};
    use crate::sbom_generation::services::ResponsibilityAnalyzer;

    fn component(name: &str) -> Component {
        Component::new(
            format!("pkg:npm/{}@1.0.0", name),
            name.to_string(),
            None,
            "1.0.0".to_string(),
            ComponentType::Library,
        )
    }

    #[test]
    fn test_format_chain() {
        let mut graph = ComponentGraph::new(RootComponent {
            purl: "pkg:npm/app@1.0.0".to_string(),
            name: "app".to_string(),
            group: None,
            version: "1.0.0".to_string(),
        });
        for name in ["a", "x", "y"] {
            graph.insert(component(name));
        }
        graph.add_dependency("pkg:npm/app@1.0.0", "pkg:npm/a@1.0.0");
        graph.add_dependency("pkg:npm/a@1.0.0", "pkg:npm/x@1.0.0");
        graph.add_dependency("pkg:npm/x@1.0.0", "pkg:npm/y@1.0.0");

        let tree =
            ResponsibilityAnalyzer::attribute(graph.graph(), "pkg:npm/y@1.0.0", "pkg:npm/app@1.0.0");
        let text = ResponsibilityFormatter::new(&graph).format(&tree);

        assert_eq!(
            text,
            "- app@1.0.0\n\
             \x20 - a@1.0.0 (directly responsible)\n\
             \x20   - x@1.0.0 (indirectly responsible)\n\
             \x20     - y@1.0.0 (root package)\n"
        );
    }
}
