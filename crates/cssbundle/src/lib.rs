//! # cssbundle
//!
//! Compile a CSS entry point into a single stylesheet with lightningcss.
//!
//! ## Features
//!
//! - **Bundling**: `@import` rules are inlined recursively
//! - **Package imports**: bare specifiers are looked up in `node_modules`,
//!   picking the file named by the first matching `package.json` field
//! - **Minification**: rules and shorthands are merged, whitespace dropped
//! - **Diagnostics**: failures carry an optional source location and render
//!   through `miette`
//!
//! ## Example
//!
//! ```rust,no_run
//! use cssbundle::{BuildOptions, Bundler, LightningBundler};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), cssbundle::BuildError> {
//! let options = BuildOptions::new("src/app.css", "build/bundle.css")
//!     .with_main_fields(["browser", "module", "main"])
//!     .with_minify(true);
//!
//! let output = LightningBundler::new().build(&options).await?;
//! println!("wrote {} bytes", output.size_bytes);
//! # Ok(()) }
//! ```

pub mod bundler;
pub mod error;
pub mod options;
pub mod resolve;

pub use bundler::{BuildOutput, Bundler, LightningBundler, compile};
pub use error::{BuildError, Location, Phase, Result};
pub use options::{BuildOptions, LogLevel};
pub use resolve::{PackageProvider, ResolveError};
