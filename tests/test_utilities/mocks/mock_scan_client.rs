use async_trait::async_trait;
use sbom_audit::prelude::*;
use sbom_audit::sbom_generation::domain::ScanReport;
use sbom_audit::shared::error::AuditError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted answer to one status request
#[derive(Debug, Clone)]
pub enum ScriptedStatus {
    Pending(u16),
    Ready(ScanReport),
    TransportError,
}

/// Mock ScanClient replaying a script of status answers
///
/// Once the script is exhausted every further status request answers
/// `Pending(404)`. Clones share state.
#[derive(Clone)]
pub struct MockScanClient {
    known_application: String,
    script: Arc<Mutex<VecDeque<ScriptedStatus>>>,
    status_requests: Arc<Mutex<usize>>,
    submissions: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockScanClient {
    pub fn new(known_application: &str) -> Self {
        Self {
            known_application: known_application.to_string(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            status_requests: Arc::new(Mutex::new(0)),
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn then(self, status: ScriptedStatus) -> Self {
        self.script.lock().unwrap().push_back(status);
        self
    }

    pub fn status_requests(&self) -> usize {
        *self.status_requests.lock().unwrap()
    }

    /// `(internal_id, sbom)` pairs in submission order
    pub fn submissions(&self) -> Vec<(String, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScanClient for MockScanClient {
    async fn resolve_internal_id(&self, public_id: &str) -> Result<String> {
        if public_id == self.known_application {
            Ok(format!("internal-{}", public_id))
        } else {
            Err(AuditError::ApplicationNotFound {
                public_id: public_id.to_string(),
            }
            .into())
        }
    }

    async fn submit_sbom(&self, internal_id: &str, sbom: &str) -> Result<String> {
        self.submissions
            .lock()
            .unwrap()
            .push((internal_id.to_string(), sbom.to_string()));
        Ok(format!("api/v2/scan/applications/{}/status/1", internal_id))
    }

    async fn check_status(&self, _status_url: &str) -> Result<ScanStatus> {
        *self.status_requests.lock().unwrap() += 1;
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(ScriptedStatus::Ready(report)) => Ok(ScanStatus::Ready(report)),
            Some(ScriptedStatus::Pending(status)) => Ok(ScanStatus::Pending { status }),
            Some(ScriptedStatus::TransportError) => {
                Err(AuditError::transport("checking scan status", "connection reset").into())
            }
            None => Ok(ScanStatus::Pending { status: 404 }),
        }
    }
}
