use crate::ports::outbound::{ProgressReporter, ScanClient, ScanStatus};
use crate::sbom_generation::domain::ScanReport;
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Attempt budget and tick period of the status poll
#[derive(Debug, Clone, Copy)]
pub struct PollingOptions {
    /// Non-success answers tolerated before giving up
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            max_attempts: 300,
            interval: Duration::from_secs(1),
        }
    }
}

enum PollState {
    Initializing,
    Polling { status_url: String, attempts: u32 },
    Succeeded(ScanReport),
    Failed(anyhow::Error),
}

/// PollScanResultsUseCase - submits an SBOM to a scan server and waits for the report
///
/// Runs an explicit state machine:
/// `Initializing -> Polling -> Succeeded | Failed`.
///
/// Initialization resolves the application id and submits the document;
/// any failure there is final. While polling, one status request is issued
/// per tick. A non-success answer counts as one attempt and the machine
/// fails once the count exceeds the budget. A transport error fails
/// immediately. The first parsed report ends the poll.
pub struct PollScanResultsUseCase<S, PR> {
    client: S,
    progress_reporter: PR,
    options: PollingOptions,
}

impl<S, PR> PollScanResultsUseCase<S, PR>
where
    S: ScanClient,
    PR: ProgressReporter,
{
    pub fn new(client: S, progress_reporter: PR, options: PollingOptions) -> Self {
        Self {
            client,
            progress_reporter,
            options,
        }
    }

    /// Drives the poll to completion and hands the report to `on_complete`
    ///
    /// # Errors
    /// - `AuditError::ApplicationNotFound` or a transport error from initialization
    /// - `AuditError::PollingAttemptsExceeded` when the budget runs out
    /// - `AuditError::PollingCancelled` when `cancel` fires between ticks
    pub async fn execute<F>(
        &self,
        public_id: &str,
        sbom: &str,
        cancel: &CancellationToken,
        on_complete: F,
    ) -> Result<ScanReport>
    where
        F: FnOnce(&ScanReport),
    {
        let period = self.options.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut state = PollState::Initializing;
        loop {
            state = match state {
                PollState::Initializing => match self.initialize(public_id, sbom).await {
                    Ok(status_url) => PollState::Polling {
                        status_url,
                        attempts: 0,
                    },
                    Err(e) => PollState::Failed(e),
                },
                PollState::Polling {
                    status_url,
                    attempts,
                } => {
                    let cancelled = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => true,
                        _ = ticker.tick() => false,
                    };
                    if cancelled {
                        PollState::Failed(AuditError::PollingCancelled.into())
                    } else {
                        self.poll_once(status_url, attempts).await
                    }
                }
                PollState::Succeeded(report) => {
                    self.progress_reporter
                        .report_completion("✅ Scan report is available");
                    on_complete(&report);
                    return Ok(report);
                }
                PollState::Failed(e) => {
                    self.progress_reporter.report_error("❌ Scan polling failed");
                    return Err(e);
                }
            };
        }
    }

    async fn initialize(&self, public_id: &str, sbom: &str) -> Result<String> {
        self.progress_reporter.report(&format!(
            "🔎 Resolving application '{}'...",
            public_id
        ));
        let internal_id = self.client.resolve_internal_id(public_id).await?;

        self.progress_reporter.report("📤 Submitting SBOM for evaluation...");
        self.client.submit_sbom(&internal_id, sbom).await
    }

    async fn poll_once(&self, status_url: String, attempts: u32) -> PollState {
        match self.client.check_status(&status_url).await {
            Ok(ScanStatus::Ready(report)) => PollState::Succeeded(report),
            Ok(ScanStatus::Pending { status }) => {
                let attempts = attempts + 1;
                tracing::debug!(
                    "Scan not ready (status {}), attempt {}/{}",
                    status,
                    attempts,
                    self.options.max_attempts
                );
                if attempts > self.options.max_attempts {
                    PollState::Failed(
                        AuditError::PollingAttemptsExceeded {
                            attempts,
                            budget: self.options.max_attempts,
                        }
                        .into(),
                    )
                } else {
                    self.progress_reporter
                        .report_progress(attempts as usize, self.options.max_attempts as usize, Some("waiting for scan"));
                    PollState::Polling {
                        status_url,
                        attempts,
                    }
                }
            }
            Err(e) => PollState::Failed(e),
        }
    }
}
