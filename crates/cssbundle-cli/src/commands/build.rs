//! Build command implementation.
//!
//! Assembles the fixed configuration, issues one build request, and prints
//! the result line. Failures are returned to the caller untouched; choosing
//! the exit status is left to `main`.

use crate::config;
use crate::error::Result;
use crate::ui;
use cssbundle::{BuildOutput, Bundler, LightningBundler, LogLevel};

/// Run the build with the lightningcss bundler.
pub async fn run() -> Result<BuildOutput> {
    run_with(&LightningBundler::new()).await
}

/// Run the build against any [`Bundler`].
///
/// The bundler always receives [`config::build_options`].
pub async fn run_with(bundler: &dyn Bundler) -> Result<BuildOutput> {
    let options = config::build_options();

    match serde_json::to_string(&options) {
        Ok(json) => tracing::debug!(options = %json, "build configuration"),
        Err(e) => tracing::debug!("could not serialize build configuration: {e}"),
    }

    let output = bundler.build(&options).await?;

    if options.log_level >= LogLevel::Info {
        ui::success(&format!(
            "{}  {}  ({})",
            output.outfile.display(),
            ui::format_size(output.size_bytes),
            ui::format_duration(output.duration)
        ));
    }
    tracing::info!(
        outfile = %output.outfile.display(),
        size = output.size_bytes,
        duration = ?output.duration,
        "build finished"
    );

    Ok(output)
}
