use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "hirescout", about = "Job portal aggregator and résumé field extractor")]
pub struct Config {
    /// Database connection URL; records are kept in memory when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Run database migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    /// Deadline for a single portal request, in seconds (0 disables it)
    #[arg(long, env = "ADAPTER_TIMEOUT_SECS", default_value = "20")]
    pub adapter_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,

        /// Maximum accepted upload size in bytes
        #[arg(long, env = "UPLOAD_LIMIT_BYTES", default_value = "10485760")]
        upload_limit_bytes: usize,
    },
    /// Search external portals once and print the merged outcome as JSON
    Search {
        /// Free-text search term
        query: String,

        /// Portal to query; repeat for several (default: all)
        #[arg(long = "site")]
        sites: Vec<String>,
    },
    /// Extract a draft candidate profile from a PDF résumé and print it as JSON
    Parse {
        /// Path to the PDF document
        file: PathBuf,
    },
}

pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            upload_limit_bytes: std::env::var("UPLOAD_LIMIT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_LIMIT_BYTES),
        })
    }

    pub fn adapter_timeout(&self) -> Option<Duration> {
        (self.adapter_timeout_secs > 0).then(|| Duration::from_secs(self.adapter_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_disables_deadline() {
        let config = Config::parse_from(["hirescout", "--adapter-timeout-secs", "0"]);
        assert_eq!(config.adapter_timeout(), None);

        let config = Config::parse_from(["hirescout", "--adapter-timeout-secs", "7"]);
        assert_eq!(config.adapter_timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn parses_search_subcommand_with_repeated_sites() {
        let config = Config::parse_from([
            "hirescout",
            "search",
            "contador",
            "--site",
            "empleos",
            "--site",
            "mifuturo",
        ]);
        match config.resolved_command() {
            Command::Search { query, sites } => {
                assert_eq!(query, "contador");
                assert_eq!(sites, vec!["empleos", "mifuturo"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
