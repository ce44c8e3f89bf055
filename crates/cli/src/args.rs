//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Collect connection overrides that take precedence over file and environment.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `ES_OUTPUT_*` variables other than the config path; the
//!   config loader owns those.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "es-output")]
#[command(about = "Ship JSON documents to an Elasticsearch cluster with node failover", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  es-output --hosts http://es1:9200,http://es2:9200 index events.ndjson --index logs\n  tail -f app.log.json | es-output index --doc-type event\n  es-output search 'status:404' --index logs --size 5\n  es-output refresh --index logs\n"
)]
pub struct Cli {
    /// Cluster endpoint URLs, comma separated (e.g. http://es1:9200,http://es2:9200)
    #[arg(long, global = true, value_delimiter = ',')]
    pub hosts: Option<Vec<String>>,

    /// Username for HTTP Basic authentication
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// TCP connect timeout in seconds (must not exceed --timeout)
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Attempts per request before giving up
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Pause between attempts in milliseconds
    #[arg(long, global = true)]
    pub retry_backoff_ms: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Path to a JSON configuration file (overrides default location)
    #[arg(long, global = true, env = "ES_OUTPUT_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index newline-delimited JSON documents from a file or stdin
    Index {
        /// NDJSON input file; `-` reads stdin
        #[arg(default_value = "-")]
        input: String,

        /// Target index (defaults to the configured index)
        #[arg(short, long)]
        index: Option<String>,

        /// Document type segment of the path
        #[arg(short = 't', long, default_value = "_doc")]
        doc_type: String,

        /// Use this top-level field of each document as its id
        #[arg(long)]
        id_field: Option<String>,

        /// Refresh the index once all documents are shipped
        #[arg(long)]
        refresh: bool,
    },

    /// Delete one document by id
    Delete {
        /// Document id
        id: String,

        #[arg(short, long)]
        index: Option<String>,

        #[arg(short = 't', long, default_value = "_doc")]
        doc_type: String,
    },

    /// Create an index with default settings
    CreateIndex {
        #[arg(short, long)]
        index: Option<String>,
    },

    /// Make recent writes to an index visible to search
    Refresh {
        #[arg(short, long)]
        index: Option<String>,
    },

    /// Run a URI search (`q=` query string syntax)
    Search {
        /// Query string, e.g. 'status:404 AND method:GET'
        query: String,

        #[arg(short, long)]
        index: Option<String>,

        /// Restrict the search to one document type
        #[arg(short = 't', long, default_value = "")]
        doc_type: String,

        /// Maximum number of hits to return
        #[arg(short, long)]
        size: Option<usize>,

        /// Sort expression, e.g. '@timestamp:desc'
        #[arg(long)]
        sort: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SearchOutput::Json)]
        output: SearchOutput,
    },
}

/// How search results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchOutput {
    /// The full response as pretty JSON
    Json,
    /// One `_source` document per line
    Ndjson,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_hosts_are_comma_separated() {
        let cli = Cli::parse_from([
            "es-output",
            "--hosts",
            "http://es1:9200,http://es2:9200",
            "refresh",
        ]);
        assert_eq!(
            cli.hosts.unwrap(),
            vec!["http://es1:9200".to_string(), "http://es2:9200".to_string()]
        );
    }

    #[test]
    fn test_index_defaults() {
        let cli = Cli::parse_from(["es-output", "index"]);
        match cli.command {
            Commands::Index {
                input,
                index,
                doc_type,
                id_field,
                refresh,
            } => {
                assert_eq!(input, "-");
                assert!(index.is_none());
                assert_eq!(doc_type, "_doc");
                assert!(id_field.is_none());
                assert!(!refresh);
            }
            _ => panic!("expected index command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["es-output", "search", "a:b", "--max-retries", "5", "-o", "ndjson"]);
        assert_eq!(cli.max_retries, Some(5));
        match cli.command {
            Commands::Search { query, output, .. } => {
                assert_eq!(query, "a:b");
                assert_eq!(output, SearchOutput::Ndjson);
            }
            _ => panic!("expected search command"),
        }
    }
}
