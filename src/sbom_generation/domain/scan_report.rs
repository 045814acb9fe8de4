use serde::{Deserialize, Serialize};

/// Result of a third-party policy scan, returned once the server finishes
/// evaluating a submitted SBOM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddable_report_html_url: Option<String>,
    #[serde(default)]
    pub is_error: bool,
}

impl ScanReport {
    /// True when the server's policy evaluation asks to fail the build
    pub fn is_failure(&self) -> bool {
        self.is_error
            || self
                .policy_action
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case("failure"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scan_report() {
        let json = r#"{
            "policyAction": "Warning",
            "reportHtmlUrl": "ui/links/application/app/report/abc",
            "isError": false
        }"#;
        let report: ScanReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.policy_action.as_deref(), Some("Warning"));
        assert!(!report.is_failure());
    }

    #[test]
    fn test_failure_policy_action() {
        let report: ScanReport =
            serde_json::from_str(r#"{ "policyAction": "Failure" }"#).unwrap();
        assert!(report.is_failure());
    }
}
