//! Resolve the cumulative features for a version and run its tests

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use vtest_core::config::RunOptions;
use vtest_core::errors::InvocationError;
use vtest_core::plan::plan_tests;
use vtest_core::runner::{CommandExecutor, InvocationResult, ShellExecutor};
use vtest_core::version::FeatureVersion;

/// Flags that shape how the run is reported
#[derive(Debug, Clone, Copy)]
pub struct RunArgs {
    pub dry_run: bool,
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary<'a> {
    target: &'a FeatureVersion,
    features: &'a [FeatureVersion],
    command: String,
    dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a InvocationResult>,
}

pub fn execute(target: &str, options: &RunOptions, args: RunArgs) -> Result<()> {
    execute_with(&ShellExecutor, target, options, args)
}

pub fn execute_with<E: CommandExecutor + ?Sized>(
    executor: &E,
    target: &str,
    options: &RunOptions,
    args: RunArgs,
) -> Result<()> {
    let plan = plan_tests(target, options)?;
    let command_line = plan.command.render();

    if args.dry_run {
        debug!("Dry run, not executing: {}", command_line);
        match args.output {
            OutputFormat::Text => println!("{}", command_line),
            OutputFormat::Json => {
                let summary = RunSummary {
                    target: &plan.target,
                    features: &plan.features,
                    command: command_line,
                    dry_run: true,
                    result: None,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        return Ok(());
    }

    let result = plan.execute(executor, options)?;

    match args.output {
        OutputFormat::Text => {
            if !result.success {
                if let Some(output) = &result.output {
                    print!("{}", output);
                }
            }
        }
        OutputFormat::Json => {
            let summary = RunSummary {
                target: &plan.target,
                features: &plan.features,
                command: command_line,
                dry_run: false,
                result: Some(&result),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    if result.success {
        Ok(())
    } else {
        Err(InvocationError::Failed { code: result.code }.into())
    }
}
