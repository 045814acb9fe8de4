use crate::application::dto::{AuditResponse, ComponentResponsibility};
use crate::ports::outbound::{CacheStore, ComponentReportRepository, ProgressReporter};
use crate::sbom_generation::domain::{AuditOutcome, ComponentGraph, Coordinate};
use crate::sbom_generation::services::ResponsibilityAnalyzer;
use crate::shared::Result;
use futures::stream::{FuturesUnordered, StreamExt};

/// Largest number of coordinates submitted in one remote request
pub const MAX_BATCH: usize = 128;

/// AuditComponentsUseCase - cache-aware batched vulnerability lookup
///
/// The cache handle is injected at construction; there is no process-wide
/// cache. Uncached coordinates are split into chunks of at most
/// [`MAX_BATCH`] and all chunks are requested concurrently.
///
/// # Type Parameters
/// * `R` - ComponentReportRepository implementation
/// * `C` - CacheStore implementation
/// * `PR` - ProgressReporter implementation
pub struct AuditComponentsUseCase<R, C, PR> {
    repository: R,
    cache: C,
    progress_reporter: PR,
}

impl<R, C, PR> AuditComponentsUseCase<R, C, PR>
where
    R: ComponentReportRepository,
    C: CacheStore,
    PR: ProgressReporter,
{
    pub fn new(repository: R, cache: C, progress_reporter: PR) -> Self {
        Self {
            repository,
            cache,
            progress_reporter,
        }
    }

    /// Looks up every coordinate, serving live cache entries locally
    ///
    /// Returns the freshly fetched outcomes in completion order followed by
    /// the cached outcomes in input order. Input order is not preserved.
    ///
    /// # Errors
    /// Fails as a whole if any chunk request fails; nothing from the other
    /// chunks is returned or cached in that case. A failing cache write is
    /// also an error.
    pub async fn lookup(
        &self,
        coordinates: &[Coordinate],
        ecosystem: &str,
    ) -> Result<Vec<AuditOutcome>> {
        let mut cached = Vec::new();
        let mut uncached = Vec::new();

        for coordinate in coordinates {
            let purl = coordinate.to_purl(ecosystem);
            match self.cache.get(&purl).await {
                Ok(Some(outcome)) => cached.push(outcome),
                Ok(None) => uncached.push(purl),
                Err(e) => {
                    tracing::warn!("Cache read failed for {}, treating as miss: {:#}", purl, e);
                    uncached.push(purl);
                }
            }
        }

        tracing::debug!(
            "Lookup of {} coordinate(s): {} cached, {} to fetch",
            coordinates.len(),
            cached.len(),
            uncached.len()
        );

        if uncached.is_empty() {
            return Ok(cached);
        }

        let total_chunks = uncached.len().div_ceil(MAX_BATCH);
        self.progress_reporter.report(&format!(
            "🔍 Requesting {} component report(s) in {} batch(es)...",
            uncached.len(),
            total_chunks
        ));

        let mut requests: FuturesUnordered<_> = uncached
            .chunks(MAX_BATCH)
            .map(|chunk| self.repository.fetch_component_reports(chunk))
            .collect();

        let mut fresh = Vec::with_capacity(uncached.len());
        let mut completed = 0;
        while let Some(result) = requests.next().await {
            fresh.extend(result?);
            completed += 1;
            self.progress_reporter
                .report_progress(completed, total_chunks, None);
        }
        drop(requests);

        for outcome in &fresh {
            self.cache.set(&outcome.coordinates, outcome).await?;
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Received {} component report(s)",
            fresh.len()
        ));

        fresh.extend(cached);
        Ok(fresh)
    }

    /// Audits every component of the graph and explains each vulnerable one
    pub async fn execute(&self, graph: &ComponentGraph, ecosystem: &str) -> Result<AuditResponse> {
        let outcomes = self.lookup(&graph.coordinates(), ecosystem).await?;

        let root = graph.root().purl.as_str();
        let responsibilities = outcomes
            .iter()
            .filter(|outcome| outcome.is_vulnerable())
            .filter(|outcome| {
                let known = graph.contains(&outcome.coordinates);
                if !known {
                    tracing::debug!("{} is not part of the graph", outcome.coordinates);
                }
                known
            })
            .map(|outcome| ComponentResponsibility {
                purl: outcome.coordinates.clone(),
                tree: ResponsibilityAnalyzer::attribute(graph.graph(), &outcome.coordinates, root),
            })
            .collect();

        Ok(AuditResponse {
            outcomes,
            responsibilities,
        })
    }
}
