use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Manage contacts stored on a contacts server.
#[derive(Debug, Clone, Parser)]
#[command(name = "contacts", version)]
pub struct Args {
    /// RON configuration file. Defaults to ./contacts.ron when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server root, e.g. http://127.0.0.1:5001
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Where log output goes.
    #[arg(long = "log", value_enum, value_name = "DEST")]
    pub log_destination: Option<LogDestination>,
}
