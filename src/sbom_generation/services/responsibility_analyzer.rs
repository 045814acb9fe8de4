use crate::sbom_generation::domain::{DependencyGraph, ResponsibilityNode};
use std::collections::{HashSet, VecDeque};

/// ResponsibilityAnalyzer service explaining why a package is in the graph
///
/// Pure logic over a read-only DependencyGraph. The tree starts at the root
/// purl and only follows dependencies from which the target can be reached,
/// so every branch ends at the target package.
pub struct ResponsibilityAnalyzer;

impl ResponsibilityAnalyzer {
    /// Maximum tree depth, guarding against pathological graphs
    const MAX_RECURSION_DEPTH: usize = 100;

    /// Maximum number of nodes in one tree; diamond-heavy graphs otherwise
    /// expand into exponentially many paths
    const MAX_TREE_NODES: usize = 10_000;

    /// Builds the responsibility tree for `target_purl`
    ///
    /// Construction rules, starting at `root_purl` with depth 0:
    /// - a node without relevant dependencies gets one synthetic leaf child
    ///   standing for itself
    /// - a dependency that leads further is expanded recursively
    /// - a dependency that leads nowhere else (the target included) is
    ///   attached as a leaf
    pub fn attribute<'a>(
        graph: &'a DependencyGraph,
        target_purl: &'a str,
        root_purl: &'a str,
    ) -> ResponsibilityNode {
        let mut walk = Walk {
            graph,
            target: target_purl,
            reaching: Self::nodes_reaching(graph, target_purl),
            on_path: HashSet::new(),
            remaining: Self::MAX_TREE_NODES - 1,
        };
        walk.build_node(root_purl, 0)
    }

    /// Direct dependencies of `purl` that lead to the target without
    /// revisiting a node on the current path
    fn relevant_dependencies<'g>(
        graph: &'g DependencyGraph,
        target: &str,
        reaching: &HashSet<&'g str>,
        purl: &str,
        on_path: &HashSet<&'g str>,
    ) -> Vec<&'g str> {
        if purl == target {
            return Vec::new();
        }
        graph
            .dependencies_of(purl)
            .iter()
            .map(String::as_str)
            .filter(|dep| reaching.contains(dep) && !on_path.contains(dep) && *dep != purl)
            .collect()
    }

    /// The target plus every node with a path to it
    fn nodes_reaching<'g>(graph: &'g DependencyGraph, target: &str) -> HashSet<&'g str> {
        let mut reaching = HashSet::new();
        let Some(start) = graph.nodes().iter().find(|n| n.as_str() == target) else {
            return reaching;
        };

        let mut queue = VecDeque::from([start.as_str()]);
        reaching.insert(start.as_str());
        while let Some(purl) = queue.pop_front() {
            for dependent in graph.dependents_of(purl) {
                if reaching.insert(dependent.as_str()) {
                    queue.push_back(dependent.as_str());
                }
            }
        }
        reaching
    }
}

/// State of one tree construction
struct Walk<'g> {
    graph: &'g DependencyGraph,
    target: &'g str,
    reaching: HashSet<&'g str>,
    on_path: HashSet<&'g str>,
    /// Nodes that may still be added
    remaining: usize,
}

impl<'g> Walk<'g> {
    fn build_node(&mut self, current: &'g str, depth: usize) -> ResponsibilityNode {
        let mut node = ResponsibilityNode::leaf(current, depth);

        if depth >= ResponsibilityAnalyzer::MAX_RECURSION_DEPTH {
            tracing::warn!(
                "Maximum recursion depth ({}) reached at '{}'. Responsibility tree may be truncated.",
                ResponsibilityAnalyzer::MAX_RECURSION_DEPTH,
                current
            );
            return node;
        }

        self.on_path.insert(current);
        let members = self.relevant_dependencies(current);

        if members.is_empty() {
            if self.take_node() {
                node.children.push(ResponsibilityNode::leaf(current, depth + 1));
            }
        } else {
            for member in members {
                if !self.take_node() {
                    break;
                }
                let leads_further =
                    member != self.target && !self.relevant_dependencies(member).is_empty();
                let child = if leads_further {
                    self.build_node(member, depth + 1)
                } else {
                    ResponsibilityNode::leaf(member, depth + 1)
                };
                node.children.push(child);
            }
        }

        self.on_path.remove(current);
        node
    }

    fn relevant_dependencies(&self, purl: &str) -> Vec<&'g str> {
        ResponsibilityAnalyzer::relevant_dependencies(
            self.graph,
            self.target,
            &self.reaching,
            purl,
            &self.on_path,
        )
    }

    /// Reserves room for one more node, false once the size budget is spent
    fn take_node(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            tracing::warn!(
                "Maximum tree size ({} nodes) reached for '{}'. Responsibility tree may be truncated.",
                ResponsibilityAnalyzer::MAX_TREE_NODES,
                self.target
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Responsibility;

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    #[test]
    fn test_root_with_single_leaf_dependency() {
        let g = graph(&[("root", "y")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        assert_eq!(tree.depth, 0);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "y");
        assert_eq!(tree.classify(), Responsibility::DirectDependency);
        assert_eq!(tree.children[0].classify(), Responsibility::RootPackage);
    }

    #[test]
    fn test_chain_classification() {
        let g = graph(&[("root", "a"), ("a", "x"), ("x", "y")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        let a = tree.find("a").unwrap();
        let x = tree.find("x").unwrap();
        let y = tree.find("y").unwrap();
        assert_eq!(a.depth, 1);
        assert_eq!(a.classify(), Responsibility::DirectlyResponsible);
        assert_eq!(x.depth, 2);
        assert_eq!(x.classify(), Responsibility::IndirectlyResponsible);
        assert_eq!(y.depth, 3);
        assert_eq!(y.classify(), Responsibility::RootPackage);
    }

    #[test]
    fn test_branches_not_leading_to_target_are_pruned() {
        let g = graph(&[
            ("root", "a"),
            ("root", "b"),
            ("a", "y"),
            ("b", "unrelated"),
            ("a", "other"),
        ]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        assert!(tree.find("b").is_none());
        assert!(tree.find("other").is_none());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_target_is_terminal_even_with_dependencies() {
        let g = graph(&[("root", "x"), ("x", "y"), ("y", "z")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        let y = tree.find("y").unwrap();
        assert!(y.is_leaf());
        assert!(tree.find("z").is_none());
    }

    #[test]
    fn test_mixed_leaf_and_internal_children() {
        let g = graph(&[("root", "a"), ("a", "y"), ("a", "b"), ("b", "y")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        let a = tree.find("a").unwrap();
        assert_eq!(a.children.len(), 2);
        assert!(a.children[0].is_leaf());
        assert_eq!(a.children[1].name, "b");
        assert_eq!(a.children[1].children[0].name, "y");
    }

    #[test]
    fn test_cycle_terminates() {
        let g = graph(&[("root", "a"), ("a", "b"), ("b", "a"), ("b", "y")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        let b = tree.find("b").unwrap();
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].name, "y");
    }

    #[test]
    fn test_unknown_target_gives_synthetic_leaf() {
        let g = graph(&[("root", "a")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "missing", "root");

        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "root");
        assert_eq!(tree.children[0].depth, 1);
    }

    #[test]
    fn test_deterministic_for_fixed_graph() {
        let g = graph(&[("root", "a"), ("root", "b"), ("a", "y"), ("b", "y")]);
        let first = ResponsibilityAnalyzer::attribute(&g, "y", "root");
        let second = ResponsibilityAnalyzer::attribute(&g, "y", "root");
        assert_eq!(first, second);
    }

    #[test]
    fn test_depth_one_node_is_directly_responsible_before_indirect_rule() {
        // root -> x -> y: x has one leaf child but sits at depth 1, and the
        // depth-1 rule takes precedence
        let g = graph(&[("root", "x"), ("x", "y")]);
        let tree = ResponsibilityAnalyzer::attribute(&g, "y", "root");

        let x = tree.find("x").unwrap();
        assert_eq!(x.depth, 1);
        assert_eq!(x.children.len(), 1);
        assert!(x.children[0].is_leaf());
        assert_eq!(x.classify(), Responsibility::DirectlyResponsible);
    }

    #[test]
    fn test_diamond_lattice_is_bounded_by_node_budget() {
        // 30 layers of two nodes, each fully connected to the next: 2^30 paths
        let mut edges = vec![
            ("root".to_string(), "l0-a".to_string()),
            ("root".to_string(), "l0-b".to_string()),
        ];
        for layer in 0..30 {
            for from in ["a", "b"] {
                for to in ["a", "b"] {
                    edges.push((format!("l{}-{}", layer, from), format!("l{}-{}", layer + 1, to)));
                }
            }
        }
        edges.push(("l30-a".to_string(), "target".to_string()));
        edges.push(("l30-b".to_string(), "target".to_string()));

        let mut g = DependencyGraph::new();
        for (from, to) in &edges {
            g.add_edge(from, to);
        }
        let tree = ResponsibilityAnalyzer::attribute(&g, "target", "root");

        assert!(tree.node_count() <= ResponsibilityAnalyzer::MAX_TREE_NODES);
        assert!(tree.find("target").is_some());
    }
}
