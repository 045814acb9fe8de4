use sbom_audit::adapters::outbound::cache::{FileCacheStore, InMemoryCacheStore};
use sbom_audit::adapters::outbound::console::StderrProgressReporter;
use sbom_audit::adapters::outbound::filesystem::{
    FileSystemLicenseReader, FileSystemTreeReader, FileSystemWriter, StdoutPresenter,
};
use sbom_audit::adapters::outbound::formatters::{
    AuditReportFormatter, CycloneDxXmlFormatter, ResponsibilityFormatter,
};
use sbom_audit::adapters::outbound::network::{Credentials, IqClient, OssIndexClient};
use sbom_audit::application::dto::{AuditResponse, OutputFormat, SbomRequest, SbomResponse};
use sbom_audit::application::use_cases::{
    AuditComponentsUseCase, GenerateSbomUseCase, PollScanResultsUseCase,
};
use sbom_audit::cli::{Args, AuditArgs, Command, SbomArgs, TreeArgs};
use sbom_audit::config::{self, AuditConfig};
use sbom_audit::ports::outbound::{CacheStore, OutputPresenter, ProgressReporter};
use sbom_audit::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();

    match args.command {
        Command::Sbom(sbom_args) => {
            let config = load_config(args.config.as_deref(), &sbom_args.tree.tree)?;
            run_sbom(&sbom_args, &config)
        }
        Command::Audit(audit_args) => {
            let config = load_config(args.config.as_deref(), &audit_args.tree.tree)?;
            run_audit(&audit_args, &config).await
        }
    }
}

/// Explicit `--config` wins; otherwise look next to the tree file
fn load_config(explicit: Option<&Path>, tree_path: &Path) -> Result<AuditConfig> {
    if let Some(path) = explicit {
        return config::load_config_from_path(path);
    }
    let dir = match tree_path.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(config::discover_config(&dir)?.unwrap_or_default())
}

fn sbom_request(tree: &TreeArgs, config: &AuditConfig, include_serial_number: bool) -> SbomRequest {
    SbomRequest::new(
        tree.ecosystem
            .clone()
            .unwrap_or_else(|| config.ecosystem().to_string()),
        tree.spartan || config.spartan(),
        include_serial_number,
    )
}

fn build_sbom(tree: &TreeArgs, request: &SbomRequest) -> Result<SbomResponse> {
    let raw_tree = FileSystemTreeReader::new().read_tree(&tree.tree)?;
    let use_case = GenerateSbomUseCase::new(
        FileSystemLicenseReader::new(),
        CycloneDxXmlFormatter::new(),
        StderrProgressReporter::new(),
    );
    use_case.execute(&raw_tree, request)
}

fn present(output: Option<&Path>, content: &str) -> Result<()> {
    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path.to_path_buf())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(content)
}

fn run_sbom(args: &SbomArgs, config: &AuditConfig) -> Result<()> {
    let request = sbom_request(&args.tree, config, !args.no_serial_number);
    let response = build_sbom(&args.tree, &request)?;
    present(args.tree.output.as_deref(), &response.document)
}

async fn run_audit(args: &AuditArgs, config: &AuditConfig) -> Result<()> {
    let request = sbom_request(&args.tree, config, true);
    let sbom = build_sbom(&args.tree, &request)?;

    let base_url = args
        .oss_index_url
        .as_deref()
        .unwrap_or_else(|| config.oss_index.base_url());
    let credentials = Credentials::from_parts(args.oss_index_user.clone(), args.oss_index_token.clone())
        .or_else(|| config.oss_index.credentials());
    let repository = OssIndexClient::new(base_url, credentials)?;

    let ttl = args
        .cache_ttl_hours
        .map(|hours| Duration::from_secs(hours.saturating_mul(3600)))
        .unwrap_or_else(|| config.oss_index.cache_ttl());
    let cache_dir = args
        .cache_dir
        .clone()
        .or_else(|| config.oss_index.cache_dir.clone());

    let response = match cache_dir {
        Some(dir) => audit(repository, FileCacheStore::new(dir, ttl), &sbom, &request).await?,
        None => audit(repository, InMemoryCacheStore::new(ttl), &sbom, &request).await?,
    };

    let report = match args.format {
        OutputFormat::Json => AuditReportFormatter::new().format(&response.outcomes)?,
        OutputFormat::Text => {
            let trees = ResponsibilityFormatter::new(&sbom.graph);
            let explanations: Vec<String> = response
                .responsibilities
                .iter()
                .map(|r| trees.format(&r.tree))
                .collect();
            AuditReportFormatter::new().format_text(&response.outcomes, &explanations)
        }
    };
    present(args.tree.output.as_deref(), &report)?;

    scan(args, config, &sbom.document).await
}

async fn audit<C: CacheStore>(
    repository: OssIndexClient,
    cache: C,
    sbom: &SbomResponse,
    request: &SbomRequest,
) -> Result<AuditResponse> {
    let use_case = AuditComponentsUseCase::new(repository, cache, StderrProgressReporter::new());
    use_case.execute(&sbom.graph, &request.ecosystem).await
}

/// Submits the SBOM to the policy scan server when one is configured
async fn scan(args: &AuditArgs, config: &AuditConfig, document: &str) -> Result<()> {
    let base_url = args.iq_url.as_deref().or(config.iq.base_url.as_deref());
    let application = args
        .iq_application
        .as_deref()
        .or(config.iq.application.as_deref());
    let (Some(base_url), Some(application)) = (base_url, application) else {
        return Ok(());
    };

    let credentials = Credentials::from_parts(args.iq_user.clone(), args.iq_token.clone())
        .or_else(|| config.iq.credentials());
    let stage = args.iq_stage.as_deref().unwrap_or_else(|| config.iq.stage());
    let mut options = config.iq.polling_options();
    if let Some(max_attempts) = args.max_polling_attempts {
        options.max_attempts = max_attempts;
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let reporter = StderrProgressReporter::new();
    let use_case = PollScanResultsUseCase::new(
        IqClient::new(base_url, credentials, stage)?,
        StderrProgressReporter::new(),
        options,
    );
    use_case
        .execute(application, document, &cancel, |report| {
            let action = report.policy_action.as_deref().unwrap_or("None");
            let url = report.report_html_url.as_deref().unwrap_or("-");
            if report.is_failure() {
                reporter.report_error(&format!("❌ Policy action: {} ({})", action, url));
            } else {
                reporter.report(&format!("📋 Policy action: {} ({})", action, url));
            }
        })
        .await?;
    Ok(())
}
