// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod analytics_commands;
mod commands;
mod data_commands;
mod helpers;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use salescope_core::{ExitCode, MachineError};
use salescope_ingest::IngestError;
use salescope_policies::PolicyValidationError;
use salescope_query::{QueryError, QueryErrorCode};
use salescope_report::ReportError;
use salescope_store::StoreError;

use crate::commands::Commands;

pub const CRATE_NAME: &str = "salescope-cli";

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "salescope", version)]
#[command(about = "Sales analytics catalog over a local SQLite store")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  SALESCOPE_DB         Store path (default database/ecommerce.db)\n  SALESCOPE_POLICY     Analytics policy JSON\n  SALESCOPE_LOG_LEVEL  Log filter override\n  SALESCOPE_LOG_JSON   Emit JSON logs"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[arg(long, global = true)]
    policy: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
    trace: bool,
}

#[derive(Clone, Copy, Debug)]
struct OutputMode {
    json: bool,
}

#[derive(Debug, Clone, Default)]
struct GlobalOptions {
    db: Option<PathBuf>,
    policy: Option<PathBuf>,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    logging::init_tracing(
        LogFlags {
            quiet: cli.quiet,
            verbose: cli.verbose,
            trace: cli.trace,
        },
        cli.json,
    );
    let globals = GlobalOptions {
        db: cli.db,
        policy: cli.policy,
    };

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;

    match command {
        Commands::Catalog { tier } => {
            analytics_commands::catalog(tier.map(Into::into), output_mode)
        }
        Commands::Query {
            name,
            limit,
            moving_average,
        } => analytics_commands::query(&globals, &name, limit, moving_average, output_mode),
        Commands::Plot { name, limit, width } => {
            analytics_commands::plot(&globals, &name, limit, width, output_mode)
        }
        Commands::Report { out, tier } => {
            analytics_commands::report(&globals, out, tier.map(Into::into), output_mode)
        }
        Commands::Ingest {
            csv,
            folder,
            strictness,
        } => data_commands::ingest(&globals, csv, folder, strictness.into(), output_mode),
        Commands::InspectCsv { path } => data_commands::inspect_csv_file(&path, output_mode),
        Commands::InspectDb => data_commands::inspect_db(&globals, output_mode),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message.into()),
        }
    }

    fn usage(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", &message.into()),
        }
    }
}

impl From<QueryError> for CliError {
    fn from(value: QueryError) -> Self {
        let exit_code = match value.code {
            QueryErrorCode::InvalidParameter => ExitCode::Validation,
            QueryErrorCode::StoreUnavailable => ExitCode::DependencyFailure,
            _ => ExitCode::Internal,
        };
        Self {
            exit_code,
            machine: MachineError::new(value.code.as_str(), &value.message),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        QueryError::from(value).into()
    }
}

impl From<ReportError> for CliError {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::Query(e) => e.into(),
            other => Self {
                exit_code: ExitCode::Internal,
                machine: MachineError::new("report_failed", &other.to_string()),
            },
        }
    }
}

impl From<IngestError> for CliError {
    fn from(value: IngestError) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("ingest_failed", &value.0),
        }
    }
}

impl From<PolicyValidationError> for CliError {
    fn from(value: PolicyValidationError) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new("invalid_policy", &value.0),
        }
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\
                 \"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("error: {}", error.machine.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_codes_map_to_exit_codes() {
        let invalid: CliError = QueryError::invalid_parameter("limit must be >= 1").into();
        assert_eq!(invalid.exit_code, ExitCode::Validation);
        assert_eq!(invalid.machine.code, "invalid_parameter");

        let missing: CliError = StoreError::NotInitialized("no store".into()).into();
        assert_eq!(missing.exit_code, ExitCode::DependencyFailure);
        assert_eq!(missing.machine.code, "store_unavailable");

        let failed: CliError =
            QueryError::new(QueryErrorCode::QueryExecution, "query timed out").into();
        assert_eq!(failed.exit_code, ExitCode::Internal);
    }

    #[test]
    fn report_write_failures_are_internal() {
        let err: CliError = ReportError::Write("disk full".into()).into();
        assert_eq!(err.exit_code, ExitCode::Internal);
        assert_eq!(err.machine.code, "report_failed");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
