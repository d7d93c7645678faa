//! The filter-adapter command-line tool: translate filter requests offline against a
//! configuration directory, and print the configuration's JSON schema.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use tokio::fs;

use query_engine_sql::sql;
use query_engine_sql::sql::descriptor::Mode;
use query_engine_translation::translation;

/// The commands supported by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Translate a filter request for an entity and print the result.
    Translate {
        /// The directory holding `configuration.json`.
        #[arg(long, value_name = "DIRECTORY", env = "FILTER_ADAPTER_CONFIGURATION")]
        configuration: PathBuf,
        /// The root entity the request is made against.
        #[arg(long)]
        entity: String,
        /// Count the matching entities instead of fetching them.
        #[arg(long)]
        count: bool,
        #[arg(long, value_enum, default_value_t = Output::Sql)]
        output: Output,
        /// A JSON file holding the filter request.
        request: PathBuf,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

/// What `translate` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// The query descriptor.
    Descriptor,
    /// Formatted SQL followed by its parameters.
    Sql,
}

/// Run a command, writing its output to `out`.
pub async fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Translate {
            configuration,
            entity,
            count,
            output,
            request,
        } => translate(&configuration, &entity, count, output, &request, out).await,
        Command::PrintSchema => {
            let schema = filter_adapter_configuration::configuration_schema();
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
            Ok(())
        }
    }
}

async fn translate(
    configuration_dir: &Path,
    entity: &str,
    count: bool,
    output: Output,
    request_file: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let parsed = filter_adapter_configuration::parse_configuration(configuration_dir).await?;
    let configuration = filter_adapter_configuration::make_runtime_configuration(parsed)?;

    let request: Option<translation::query::FilterRequest> =
        serde_json::from_str(&fs::read_to_string(request_file).await?)?;

    let mode = if count { Mode::Count } else { Mode::Fetch };
    let descriptor = translation::query::translate_for_entity(
        &configuration.metadata,
        entity,
        request,
        mode,
        &configuration.settings,
    )?;

    match output {
        Output::Descriptor => writeln!(out, "{descriptor:#?}")?,
        Output::Sql => {
            let query = descriptor.query_sql(&sql::ast::TableName(entity.to_string()));
            let pretty = sqlformat::format(
                &query.sql,
                &sqlformat::QueryParams::None,
                sqlformat::FormatOptions::default(),
            );
            writeln!(out, "{pretty}")?;
            if !query.params.is_empty() {
                writeln!(out)?;
                for (index, param) in query.params.iter().enumerate() {
                    writeln!(out, "${} = {:?}", index + 1, param)?;
                }
            }
        }
    }
    Ok(())
}
