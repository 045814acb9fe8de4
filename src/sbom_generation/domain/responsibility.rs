use std::fmt;

/// How a node of a responsibility tree relates to the vulnerable package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responsibility {
    DirectlyResponsible,
    RootPackage,
    IndirectlyResponsible,
    DirectDependency,
    Unclassified,
}

impl Responsibility {
    /// Label printed next to the node name; `None` for unclassified nodes
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Responsibility::DirectlyResponsible => Some("directly responsible"),
            Responsibility::RootPackage => Some("root package"),
            Responsibility::IndirectlyResponsible => Some("indirectly responsible"),
            Responsibility::DirectDependency => Some("direct dependency"),
            Responsibility::Unclassified => None,
        }
    }
}

impl fmt::Display for Responsibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("unclassified"))
    }
}

/// ResponsibilityNode: transient tree explaining why a package is present
///
/// Built fresh for every query and never persisted. `name` holds the purl of
/// the graph node the tree node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsibilityNode {
    pub name: String,
    pub depth: usize,
    pub children: Vec<ResponsibilityNode>,
}

impl ResponsibilityNode {
    pub fn leaf(name: &str, depth: usize) -> Self {
        Self {
            name: name.to_string(),
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Classifies the node by its depth and child count
    ///
    /// Rules are checked in this order:
    /// 1. depth 1 with children: directly responsible
    /// 2. no children: root package (the terminal vulnerable package)
    /// 3. a single leaf child below depth 0: indirectly responsible
    /// 4. a single leaf child at depth 0: direct dependency
    /// 5. depth 1: directly responsible
    /// 6. anything else is unclassified
    pub fn classify(&self) -> Responsibility {
        let depth = self.depth;
        let child_count = self.children.len();
        let sole_leaf_child = child_count == 1 && self.children[0].is_leaf();

        if depth == 1 && child_count > 0 {
            Responsibility::DirectlyResponsible
        } else if child_count == 0 {
            Responsibility::RootPackage
        } else if sole_leaf_child && depth != 0 {
            Responsibility::IndirectlyResponsible
        } else if sole_leaf_child {
            Responsibility::DirectDependency
        } else if depth == 1 {
            Responsibility::DirectlyResponsible
        } else {
            Responsibility::Unclassified
        }
    }

    /// Finds the first node (pre-order) with the given name
    pub fn find(&self, name: &str) -> Option<&ResponsibilityNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in the tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ResponsibilityNode::node_count)
            .sum::<usize>()
    }
}
