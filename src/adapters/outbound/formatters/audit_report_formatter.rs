use crate::sbom_generation::domain::audit_outcome::summarize;
use crate::sbom_generation::domain::{AuditOutcome, Severity};
use crate::shared::error::AuditError;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditReport<'a> {
    summary: Summary,
    outcomes: &'a [AuditOutcome],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    audited_components: usize,
    vulnerable_components: usize,
    total_vulnerabilities: usize,
    highest_severity: &'static str,
}

/// AuditReportFormatter renders lookup results as pretty-printed JSON or as
/// a plain-text summary
///
/// Outcomes are written in the order they were returned by the lookup.
pub struct AuditReportFormatter;

impl AuditReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, outcomes: &[AuditOutcome]) -> Result<String> {
        let (total_vulnerabilities, vulnerable_components) = summarize(outcomes);
        let highest_severity = highest_severity(outcomes);

        let report = AuditReport {
            summary: Summary {
                audited_components: outcomes.len(),
                vulnerable_components,
                total_vulnerabilities,
                highest_severity: highest_severity.as_str(),
            },
            outcomes,
        };

        serde_json::to_string_pretty(&report).map_err(|e| {
            AuditError::Serialization {
                format: "JSON".to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Plain-text report; `explanations` are rendered responsibility trees
    /// and are appended in the given order
    pub fn format_text(&self, outcomes: &[AuditOutcome], explanations: &[String]) -> String {
        let (total_vulnerabilities, vulnerable_components) = summarize(outcomes);
        let mut output = format!(
            "Audited {} component(s): {} vulnerable, {} vulnerabilit{} (highest severity: {})\n",
            outcomes.len(),
            vulnerable_components,
            total_vulnerabilities,
            if total_vulnerabilities == 1 { "y" } else { "ies" },
            highest_severity(outcomes)
        );

        for outcome in outcomes.iter().filter(|o| o.is_vulnerable()) {
            output.push_str(&format!("\n{}\n", outcome.coordinates));
            for vulnerability in &outcome.vulnerabilities {
                let id = vulnerability.cve.as_deref().unwrap_or(&vulnerability.id);
                output.push_str(&format!(
                    "  [{}] {} {}\n",
                    vulnerability.severity(),
                    id,
                    vulnerability.title
                ));
            }
        }

        if !explanations.is_empty() {
            output.push_str("\nDependency paths:\n");
            for explanation in explanations {
                output.push('\n');
                output.push_str(explanation);
            }
        }
        output
    }
}

fn highest_severity(outcomes: &[AuditOutcome]) -> Severity {
    outcomes
        .iter()
        .map(AuditOutcome::max_severity)
        .max()
        .unwrap_or(Severity::None)
}

impl Default for AuditReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
