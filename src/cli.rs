use crate::validator::types::TargetSelector;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "celcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate Kubernetes manifests against CEL rules")]
#[command(
    long_about = "A CLI tool that evaluates user-supplied CEL expressions against Kubernetes YAML manifests and reports which resources pass or fail each rule. Rules come from rule-definition files or a single inline expression, and can be restricted to matching resources with target selectors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v also reports passing checks, -vv for debug logs, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate manifests against CEL rules
    Validate {
        /// Manifest files, directories, or glob patterns to validate
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// Rule-definition files
        #[arg(short, long, value_name = "FILE")]
        rules: Vec<PathBuf>,

        /// Inline CEL expression evaluated as a single rule named "inline"
        #[arg(short, long, value_name = "EXPR")]
        expression: Option<String>,

        /// Failure message for the inline expression
        #[arg(short, long, value_name = "TEXT", requires = "expression")]
        message: Option<String>,

        #[command(flatten)]
        target: TargetArgs,

        /// Maximum number of files validated concurrently
        #[arg(long, value_name = "N")]
        max_workers: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: ReportFormat,

        /// Report failures but always exit zero
        #[arg(long)]
        no_fail: bool,
    },

    /// List the rules parsed from rule-definition files without evaluating
    Rules {
        /// Rule-definition files
        #[arg(value_name = "FILE", required = true)]
        rules: Vec<PathBuf>,
    },
}

/// Target selector flags for the inline rule.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Restrict the inline rule to kinds matching this regex
    #[arg(long, value_name = "REGEX", requires = "expression")]
    pub target_kind: Option<String>,

    /// Restrict the inline rule to resource names matching this regex
    #[arg(long, value_name = "REGEX", requires = "expression")]
    pub target_name: Option<String>,

    /// Restrict the inline rule to this namespace
    #[arg(long, value_name = "NAMESPACE", requires = "expression")]
    pub target_namespace: Option<String>,

    /// Restrict the inline rule to this API group
    #[arg(long, value_name = "GROUP", requires = "expression")]
    pub target_group: Option<String>,

    /// Restrict the inline rule to this API version
    #[arg(long, value_name = "VERSION", requires = "expression")]
    pub target_version: Option<String>,

    /// Restrict the inline rule by labels (key=value[,key2=value2])
    #[arg(long, value_name = "SELECTOR", requires = "expression")]
    pub target_labels: Option<String>,

    /// Restrict the inline rule by annotations (key=value[,key2=value2])
    #[arg(long, value_name = "SELECTOR", requires = "expression")]
    pub target_annotations: Option<String>,
}

impl TargetArgs {
    /// Build a selector from the flags, or `None` when no flag was given.
    pub fn to_selector(&self) -> Option<TargetSelector> {
        let selector = TargetSelector {
            group: self.target_group.clone().unwrap_or_default(),
            version: self.target_version.clone().unwrap_or_default(),
            kind: self.target_kind.clone().unwrap_or_default(),
            name: self.target_name.clone().unwrap_or_default(),
            namespace: self.target_namespace.clone().unwrap_or_default(),
            label_selector: self.target_labels.clone().unwrap_or_default(),
            annotation_selector: self.target_annotations.clone().unwrap_or_default(),
        };
        if selector.is_empty() {
            None
        } else {
            Some(selector)
        }
    }
}

/// Output format for validation reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Plain,
    Json,
}

impl From<ReportFormat> for crate::validator::formatter::OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Plain => Self::Plain,
            ReportFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
