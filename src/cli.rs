use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;

/// Audit a resolved dependency tree: CycloneDX SBOMs, cached vulnerability
/// lookups and responsibility trees
#[derive(Parser, Debug)]
#[command(name = "sbom-audit")]
#[command(version)]
#[command(about = "Generate CycloneDX SBOMs from a dependency tree and audit it for known vulnerabilities", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to sbom-audit.config.yml next to the tree file)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the CycloneDX XML SBOM for a dependency tree
    Sbom(SbomArgs),
    /// Look up known vulnerabilities and explain where they come from
    Audit(AuditArgs),
}

/// Options shared by every subcommand that reads a dependency tree
#[derive(ClapArgs, Debug)]
pub struct TreeArgs {
    /// Dependency tree JSON, as listed by the package manager
    pub tree: PathBuf,

    /// Package-url type used for every component (defaults to npm)
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Only write identity fields for each component
    #[arg(long)]
    pub spartan: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct SbomArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Omit the urn:uuid serial number from the document
    #[arg(long)]
    pub no_serial_number: bool,
}

#[derive(ClapArgs, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Report format: json or text
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Vulnerability database API base URL
    #[arg(long)]
    pub oss_index_url: Option<String>,

    /// Vulnerability database user name (requires --oss-index-token)
    #[arg(long, requires = "oss_index_token")]
    pub oss_index_user: Option<String>,

    /// Vulnerability database API token (requires --oss-index-user)
    #[arg(long, requires = "oss_index_user")]
    pub oss_index_token: Option<String>,

    /// Directory for the persistent lookup cache (in-memory cache if unset)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Hours before a cached lookup result expires
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub cache_ttl_hours: Option<u64>,

    /// Policy scan server base URL; enables the scan when set with --iq-application
    #[arg(long)]
    pub iq_url: Option<String>,

    /// Public id of the application to evaluate on the scan server
    #[arg(long)]
    pub iq_application: Option<String>,

    /// Scan server stage (defaults to develop)
    #[arg(long)]
    pub iq_stage: Option<String>,

    /// Scan server user name (requires --iq-token)
    #[arg(long, requires = "iq_token")]
    pub iq_user: Option<String>,

    /// Scan server password or token (requires --iq-user)
    #[arg(long, requires = "iq_user")]
    pub iq_token: Option<String>,

    /// Non-success status answers tolerated before giving up on the scan
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polling_attempts: Option<u32>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sbom_command() {
        let args = Args::try_parse_from([
            "sbom-audit",
            "sbom",
            "tree.json",
            "--spartan",
            "--no-serial-number",
            "-o",
            "bom.xml",
        ])
        .unwrap();

        match args.command {
            Command::Sbom(sbom) => {
                assert_eq!(sbom.tree.tree, PathBuf::from("tree.json"));
                assert!(sbom.tree.spartan);
                assert!(sbom.no_serial_number);
                assert_eq!(sbom.tree.output, Some(PathBuf::from("bom.xml")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_audit_command_defaults() {
        let args = Args::try_parse_from(["sbom-audit", "audit", "tree.json"]).unwrap();

        match args.command {
            Command::Audit(audit) => {
                assert_eq!(audit.format, OutputFormat::Json);
                assert!(audit.tree.ecosystem.is_none());
                assert!(audit.cache_dir.is_none());
                assert!(audit.iq_url.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_audit_text_format_with_global_config() {
        let args = Args::try_parse_from([
            "sbom-audit",
            "audit",
            "tree.json",
            "--format",
            "text",
            "--config",
            "custom.yml",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
        match args.command {
            Command::Audit(audit) => assert_eq!(audit.format, OutputFormat::Text),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_user_without_token_rejected() {
        let result = Args::try_parse_from([
            "sbom-audit",
            "audit",
            "tree.json",
            "--oss-index-user",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_polling_attempts_rejected() {
        let result = Args::try_parse_from([
            "sbom-audit",
            "audit",
            "tree.json",
            "--max-polling-attempts",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Args::try_parse_from(["sbom-audit", "audit", "tree.json", "-f", "markdown"]);
        assert!(result.is_err());
    }
}
