use crate::commands;
use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use vtest_core::config::RunOptions;
use vtest_core::errors::VtestError;
use vtest_core::manifest::DEFAULT_MANIFEST;
use vtest_core::resolve::{FeatureOrder, MembershipPolicy, ResolveOptions};
use vtest_core::runner::{OutputMode, DEFAULT_TOOL};

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log level options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Order in which declared versions accumulate
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OrderOption {
    /// Declaration order in the manifest
    Manifest,
    /// Structural version order (major, minor, suffix)
    Version,
}

impl From<OrderOption> for FeatureOrder {
    fn from(order: OrderOption) -> Self {
        match order {
            OrderOption::Manifest => FeatureOrder::Manifest,
            OrderOption::Version => FeatureOrder::Version,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "Run the test suite for a feature version",
    long_about = "Run the test suite for a feature version\n\n\
        Versions are Cargo features named like v0-1 or v1-2beta, declared in order in the \
        [features] section of the manifest. Testing a version enables it together with every \
        version declared before it.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Target feature version (format: v<major>-<minor>[suffix])
    #[arg(value_name = "VERSION")]
    pub target: Option<String>,

    /// Manifest declaring the feature versions
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MANIFEST)]
    pub manifest_path: PathBuf,

    /// Build tool invoked as `<TOOL> test --features ...`
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Accept a version missing from the manifest (enables all declared versions plus it)
    #[arg(long)]
    pub allow_unlisted: bool,

    /// Order in which declared versions accumulate
    #[arg(long, value_enum, default_value = "manifest")]
    pub order: OrderOption,

    /// Collect test output and print it only if the tests fail
    #[arg(long)]
    pub capture: bool,

    /// Print the test command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// List the declared versions and exit
    #[arg(long, conflicts_with_all = ["dry_run", "capture", "allow_unlisted"])]
    pub list: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Log format (text or json, defaults to text, can be set via VTEST_LOG_FORMAT env var)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Settings handed to the core library
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            manifest_path: self.manifest_path.clone(),
            tool: self.tool.clone(),
            resolve: ResolveOptions {
                policy: if self.allow_unlisted {
                    MembershipPolicy::Permissive
                } else {
                    MembershipPolicy::Strict
                },
                order: self.order.into(),
            },
            output_mode: if self.capture {
                OutputMode::Capture
            } else {
                OutputMode::Inherit
            },
        }
    }

    pub fn dispatch(self) -> Result<()> {
        let log_format = self.log_format.map(|format| match format {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        });
        let level = self.log_level.as_str();
        let directive = format!("vtest={},vtest_core={}", level, level);
        vtest_core::logging::init(log_format, &directive)?;
        tracing::debug!("CLI initialized with log level: {}", level);

        let options = self.run_options();

        if self.list {
            return commands::list::execute(&options, self.output);
        }

        let Some(target) = self.target.as_deref() else {
            let usage = Cli::command().render_usage();
            return Err(
                VtestError::Usage(format!("`VERSION` must be specified\n\n{}", usage)).into(),
            );
        };

        commands::run::execute(
            target,
            &options,
            commands::run::RunArgs {
                dry_run: self.dry_run,
                output: self.output,
            },
        )
    }
}
