//! cssbundle CLI - compile `src/app.css` into a minified `build/bundle.css`.
//!
//! # Architecture
//!
//! - [`config`] - The fixed build configuration
//! - [`commands`] - `run()`, which hands that configuration to the bundler
//! - [`error`] - CLI error type and the labeled failure report
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines and size/duration formatting
//!
//! # Example
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! match cssbundle_cli::run().await {
//!     Ok(output) => println!("wrote {}", output.outfile.display()),
//!     Err(err) => cssbundle_cli::error::report(&err),
//! }
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use commands::{run, run_with};
pub use error::{CliError, Result};
