use crate::ports::outbound::ComponentReportRepository;
use crate::sbom_generation::domain::AuditOutcome;
use crate::shared::error::AuditError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Basic-auth credentials shared by the remote clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    /// Both halves or nothing
    pub fn from_parts(username: Option<String>, token: Option<String>) -> Option<Self> {
        match (username, token) {
            (Some(username), Some(token)) => Some(Self { username, token }),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ComponentReportRequest<'a> {
    coordinates: &'a [String],
}

/// OssIndexClient adapter for the OSS Index component-report API
///
/// Each call is a single `POST <base>/component-report`. Transport failures
/// and non-success statuses are returned as errors without retrying, so a
/// failed chunk fails the whole lookup.
pub struct OssIndexClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl OssIndexClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://ossindex.sonatype.org/api/v3";
    const TIMEOUT_SECONDS: u64 = 60;

    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/component-report", self.base_url)
    }
}

#[async_trait]
impl ComponentReportRepository for OssIndexClient {
    async fn fetch_component_reports(&self, purls: &[String]) -> Result<Vec<AuditOutcome>> {
        const OPERATION: &str = "requesting component reports";

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&ComponentReportRequest { coordinates: purls });
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::UnexpectedStatus {
                operation: OPERATION.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let outcomes: Vec<AuditOutcome> = response
            .json()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;
        tracing::debug!(
            "Received {} component report(s) for {} coordinate(s)",
            outcomes.len(),
            purls.len()
        );
        Ok(outcomes)
    }
}
