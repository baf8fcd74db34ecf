//! The build capability and its lightningcss implementation.
//!
//! # Architecture
//!
//! ```text
//! entry .css → resolve @imports → lightningcss bundle → minify → print → outfile
//! ```

use crate::error::{BuildError, Phase, Result};
use crate::options::BuildOptions;
use crate::resolve::PackageProvider;
use async_trait::async_trait;
use lightningcss::bundler::BundleErrorKind;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    /// File the stylesheet was written to
    pub outfile: PathBuf,
    /// Size of the written stylesheet
    pub size_bytes: u64,
    /// Wall time spent compiling and writing
    pub duration: Duration,
}

/// Something that can turn [`BuildOptions`] into an output file.
///
/// The call either resolves with a [`BuildOutput`] once the file is written,
/// or fails with a [`BuildError`] before anything is written.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run one build
    async fn build(&self, options: &BuildOptions) -> Result<BuildOutput>;
}

/// [`Bundler`] backed by lightningcss.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightningBundler;

impl LightningBundler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Bundler for LightningBundler {
    async fn build(&self, options: &BuildOptions) -> Result<BuildOutput> {
        let start = Instant::now();
        tracing::debug!(entry = %options.entry_point.display(), "starting build");

        // lightningcss is synchronous and CPU-bound
        let task_options = options.clone();
        let code = tokio::task::spawn_blocking(move || compile(&task_options))
            .await
            .map_err(|e| BuildError::new(Phase::Internal, format!("Build task failed: {e}")))??;

        write_output(&options.outfile, code.as_bytes()).await?;

        let output = BuildOutput {
            outfile: options.outfile.clone(),
            size_bytes: code.len() as u64,
            duration: start.elapsed(),
        };
        tracing::debug!(
            outfile = %output.outfile.display(),
            size = output.size_bytes,
            "wrote stylesheet"
        );

        Ok(output)
    }
}

/// Compile the entry point to CSS text without touching the output file.
pub fn compile(options: &BuildOptions) -> Result<String> {
    // Declared first so it outlives `parser_options`, which borrows its lifetime.
    let source: String;
    let parser_options = ParserOptions {
        filename: options.entry_point.to_string_lossy().into_owned(),
        ..Default::default()
    };

    if options.bundle {
        let provider = PackageProvider::new(options.main_fields.clone());
        let mut bundler = lightningcss::bundler::Bundler::new(&provider, None, parser_options);
        let stylesheet = bundler.bundle(&options.entry_point).map_err(|e| {
            let phase = match e.kind {
                BundleErrorKind::ResolverError(_) => Phase::Resolve,
                _ => Phase::Parse,
            };
            BuildError::from_css(phase, e)
        })?;
        finish(stylesheet, options)
    } else {
        source = std::fs::read_to_string(&options.entry_point).map_err(|e| {
            BuildError::new(
                Phase::Resolve,
                format!("Could not read {}: {e}", options.entry_point.display()),
            )
        })?;
        let stylesheet = StyleSheet::parse(&source, parser_options)
            .map_err(|e| BuildError::from_css(Phase::Parse, e))?;
        finish(stylesheet, options)
    }
}

fn finish(mut stylesheet: StyleSheet<'_>, options: &BuildOptions) -> Result<String> {
    if options.minify {
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| BuildError::from_css(Phase::Minify, e))?;
    }

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            ..Default::default()
        })
        .map_err(|e| BuildError::from_css(Phase::Print, e))?;

    Ok(result.code)
}

/// Write via a sibling temporary file so a failed write never leaves a
/// truncated stylesheet behind.
async fn write_output(outfile: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| {
        BuildError::new(
            Phase::Write,
            format!("Failed to write {}: {e}", outfile.display()),
        )
    };

    if let Some(parent) = outfile.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let mut tmp = outfile.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, contents).await.map_err(write_error)?;
    if let Err(e) = tokio::fs::rename(&tmp, outfile).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_error(e));
    }

    Ok(())
}
