use super::oss_index_client::Credentials;
use crate::ports::outbound::{ScanClient, ScanStatus};
use crate::sbom_generation::domain::ScanReport;
use crate::shared::error::AuditError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ApplicationsResponse {
    #[serde(default)]
    applications: Vec<Application>,
}

#[derive(Debug, Deserialize)]
struct Application {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    #[serde(default)]
    status_url: Option<String>,
}

/// IqClient adapter for a Nexus IQ style policy server
///
/// Endpoints:
/// - `GET  <base>/api/v2/applications?publicId=<id>`
/// - `POST <base>/api/v2/scan/applications/<id>/sources/<client>?stageId=<stage>`
/// - `GET  <base>/<statusUrl>`
pub struct IqClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    stage: String,
}

impl IqClient {
    const CLIENT_ID: &'static str = "sbom-audit";
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new(base_url: &str, credentials: Option<Credentials>, stage: &str) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            stage: stage.to_string(),
        })
    }

    fn applications_url(&self, public_id: &str) -> String {
        format!(
            "{}/api/v2/applications?publicId={}",
            self.base_url,
            urlencoding::encode(public_id)
        )
    }

    fn submit_url(&self, internal_id: &str) -> String {
        format!(
            "{}/api/v2/scan/applications/{}/sources/{}?stageId={}",
            self.base_url,
            urlencoding::encode(internal_id),
            Self::CLIENT_ID,
            urlencoding::encode(&self.stage)
        )
    }

    fn status_url(&self, status_url: &str) -> String {
        format!("{}/{}", self.base_url, status_url.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.basic_auth(&credentials.username, Some(&credentials.token)),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<reqwest::Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AuditError::transport(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::UnexpectedStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response)
    }
}

#[async_trait]
impl ScanClient for IqClient {
    async fn resolve_internal_id(&self, public_id: &str) -> Result<String> {
        const OPERATION: &str = "resolving the application id";

        let response = self
            .send(self.client.get(self.applications_url(public_id)), OPERATION)
            .await?;
        let body: ApplicationsResponse = response
            .json()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;

        body.applications
            .into_iter()
            .find_map(|application| application.id)
            .ok_or_else(|| {
                AuditError::ApplicationNotFound {
                    public_id: public_id.to_string(),
                }
                .into()
            })
    }

    async fn submit_sbom(&self, internal_id: &str, sbom: &str) -> Result<String> {
        const OPERATION: &str = "submitting the SBOM for evaluation";

        let request = self
            .client
            .post(self.submit_url(internal_id))
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(sbom.to_string());
        let response = self.send(request, OPERATION).await?;
        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;

        body.status_url.ok_or_else(|| {
            AuditError::transport(OPERATION, "response did not include a statusUrl").into()
        })
    }

    async fn check_status(&self, status_url: &str) -> Result<ScanStatus> {
        const OPERATION: &str = "polling for scan results";

        let response = self
            .authorize(self.client.get(self.status_url(status_url)))
            .send()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ScanStatus::Pending {
                status: status.as_u16(),
            });
        }

        let report: ScanReport = response
            .json()
            .await
            .map_err(|e| AuditError::transport(OPERATION, e))?;
        Ok(ScanStatus::Ready(report))
    }
}
