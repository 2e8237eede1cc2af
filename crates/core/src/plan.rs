//! Test planning
//!
//! Ties the resolver together: validate the target, read the manifest,
//! compute the cumulative feature list and render the command. Executing the
//! plan is a separate step so callers can print it first (`--dry-run`).

use crate::config::RunOptions;
use crate::errors::Result;
use crate::manifest::{list_available_features, FeatureSet};
use crate::resolve::resolve_features;
use crate::runner::{run_tests, CommandExecutor, InvocationResult, TestCommand};
use crate::version::FeatureVersion;
use tracing::{info, instrument};

/// Everything needed to run the tests for one target
#[derive(Debug, Clone)]
pub struct TestPlan {
    pub target: FeatureVersion,
    pub available: FeatureSet,
    pub features: Vec<FeatureVersion>,
    pub command: TestCommand,
}

/// Validate `target` and resolve its features against the manifest
///
/// The version format is checked before the manifest is touched.
#[instrument(skip(options), fields(manifest = %options.manifest_path.display()))]
pub fn plan_tests(target: &str, options: &RunOptions) -> Result<TestPlan> {
    let target = FeatureVersion::parse(target)?;
    let available = list_available_features(&options.manifest_path)?;
    info!("Available versions: {:?}", available.names());

    let features = resolve_features(&available, &target, options.resolve)?;

    let mut command = TestCommand::for_versions(options.tool.clone(), &features);
    if let Some(dir) = options.working_dir() {
        command = command.with_working_dir(dir);
    }

    Ok(TestPlan {
        target,
        available,
        features,
        command,
    })
}

impl TestPlan {
    /// Run the planned command
    pub fn execute<E: CommandExecutor + ?Sized>(
        &self,
        executor: &E,
        options: &RunOptions,
    ) -> Result<InvocationResult> {
        run_tests(executor, &self.command, options.output_mode)
    }
}
