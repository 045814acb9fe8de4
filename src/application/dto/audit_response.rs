use crate::sbom_generation::domain::{AuditOutcome, ResponsibilityNode};

/// Responsibility tree for one vulnerable component
#[derive(Debug, Clone)]
pub struct ComponentResponsibility {
    pub purl: String,
    pub tree: ResponsibilityNode,
}

/// AuditResponse - lookup results plus an explanation per vulnerable component
///
/// `outcomes` keeps the lookup order: fresh results first, then cached ones.
#[derive(Debug, Clone)]
pub struct AuditResponse {
    pub outcomes: Vec<AuditOutcome>,
    pub responsibilities: Vec<ComponentResponsibility>,
}

impl AuditResponse {
    pub fn vulnerable_outcomes(&self) -> impl Iterator<Item = &AuditOutcome> {
        self.outcomes.iter().filter(|o| o.is_vulnerable())
    }
}
