use async_trait::async_trait;
use sbom_audit::prelude::*;
use sbom_audit::sbom_generation::domain::Vulnerability;
use sbom_audit::shared::error::AuditError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock ComponentReportRepository recording every batch it receives
///
/// Batches are numbered from 1 in the order the requests start. A batch
/// listed in `fail_batches` answers with a 500 status. Clones share state.
#[derive(Default, Clone)]
pub struct MockComponentReportRepository {
    requests: Arc<Mutex<Vec<Vec<String>>>>,
    vulnerabilities: HashMap<String, Vec<Vulnerability>>,
    fail_batches: Vec<usize>,
    delays: HashMap<usize, Duration>,
}

impl MockComponentReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports one vulnerability with the given CVSS score for `purl`
    pub fn with_vulnerability(mut self, purl: &str, id: &str, cvss_score: f32) -> Self {
        self.vulnerabilities
            .entry(purl.to_string())
            .or_default()
            .push(Vulnerability {
                id: id.to_string(),
                display_name: Some(id.to_string()),
                title: format!("{} in {}", id, purl),
                description: None,
                cvss_score: Some(cvss_score),
                cvss_vector: None,
                cve: None,
                cwe: None,
                reference: None,
                external_references: Vec::new(),
            });
        self
    }

    pub fn failing_batch(mut self, batch: usize) -> Self {
        self.fail_batches.push(batch);
        self
    }

    /// Delays the answer for `batch` so that it completes after the others
    pub fn delayed_batch(mut self, batch: usize, delay: Duration) -> Self {
        self.delays.insert(batch, delay);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.requests.lock().unwrap().iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl ComponentReportRepository for MockComponentReportRepository {
    async fn fetch_component_reports(&self, purls: &[String]) -> Result<Vec<AuditOutcome>> {
        let batch = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(purls.to_vec());
            requests.len()
        };

        if let Some(delay) = self.delays.get(&batch) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_batches.contains(&batch) {
            return Err(AuditError::UnexpectedStatus {
                operation: "posting component report".to_string(),
                status: 500,
            }
            .into());
        }

        Ok(purls
            .iter()
            .map(|purl| AuditOutcome {
                coordinates: purl.clone(),
                description: None,
                reference: format!("https://ossindex.example/component/{}", purl),
                vulnerabilities: self.vulnerabilities.get(purl).cloned().unwrap_or_default(),
                license: None,
            })
            .collect())
    }
}
