//! Command-line interface definition.
//!
//! The build takes no arguments; clap supplies `--help` and `--version` and
//! rejects anything else.

use clap::Parser;

/// Compile src/app.css into a minified build/bundle.css
#[derive(Parser, Debug)]
#[command(
    name = "cssbundle",
    version,
    about = "Compile src/app.css into a minified build/bundle.css",
    long_about = "Bundles src/app.css and everything it @imports into build/bundle.css.\n\
                  Package imports are resolved through the browser, module and main\n\
                  fields of package.json, in that order. Set RUST_LOG for more output."
)]
pub struct Cli {}
