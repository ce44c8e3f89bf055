//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Resolve the target index (explicit flag, else the configured default).
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - Every command runs against a client carrying the process cancellation token.

use anyhow::Result;
use es_output_client::CancellationToken;
use es_output_config::OutputConfig;

use crate::args::Commands;
use crate::commands::{self, index::IndexOptions, search::SearchOptions};

pub(crate) async fn run_command(
    command: Commands,
    config: &OutputConfig,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = commands::build_client(config, cancel)?;
    let target = |index: Option<String>| index.unwrap_or_else(|| config.index.clone());

    match command {
        Commands::Index {
            input,
            index,
            doc_type,
            id_field,
            refresh,
        } => {
            let index = target(index);
            commands::index::run(
                &client,
                &input,
                IndexOptions {
                    index: &index,
                    doc_type: &doc_type,
                    id_field: id_field.as_deref(),
                    refresh,
                },
            )
            .await?;
        }
        Commands::Delete {
            id,
            index,
            doc_type,
        } => {
            commands::delete::run(&client, &target(index), &doc_type, &id).await?;
        }
        Commands::CreateIndex { index } => {
            commands::indices::create(&client, &target(index)).await?;
        }
        Commands::Refresh { index } => {
            commands::indices::refresh(&client, &target(index)).await?;
        }
        Commands::Search {
            query,
            index,
            doc_type,
            size,
            sort,
            output,
        } => {
            let index = target(index);
            commands::search::run(
                &client,
                &query,
                SearchOptions {
                    index: &index,
                    doc_type: &doc_type,
                    size,
                    sort: sort.as_deref(),
                    output,
                },
            )
            .await?;
        }
    }

    Ok(())
}
