//! List the versions declared in the manifest

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use vtest_core::config::RunOptions;
use vtest_core::manifest::list_available_features;
use vtest_core::resolve::FeatureOrder;
use vtest_core::version::FeatureVersion;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    manifest_path: String,
    versions: &'a [FeatureVersion],
}

pub fn execute(options: &RunOptions, output: OutputFormat) -> Result<()> {
    let available = list_available_features(&options.manifest_path)?;
    let available = match options.resolve.order {
        FeatureOrder::Manifest => available,
        FeatureOrder::Version => available.sorted(),
    };

    match output {
        OutputFormat::Text => {
            for version in &available {
                println!("{}", version);
            }
        }
        OutputFormat::Json => {
            let listing = ListOutput {
                manifest_path: options.manifest_path.display().to_string(),
                versions: available.as_slice(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
