// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use clap_complete::Shell;
use salescope_ingest::StrictnessMode;
use salescope_model::Tier;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog operations.
    Catalog {
        #[arg(long, value_enum)]
        tier: Option<TierCli>,
    },
    /// Run one catalog operation.
    Query {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Append a trailing moving average of the value column.
        #[arg(long)]
        moving_average: Option<usize>,
    },
    /// Chart one catalog operation as horizontal bars.
    Plot {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
    /// Export per-tier report directories.
    Report {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum)]
        tier: Option<TierCli>,
    },
    /// Create the schema and load sales CSV data.
    Ingest {
        #[arg(long, conflicts_with = "folder", required_unless_present = "folder")]
        csv: Option<PathBuf>,
        #[arg(long)]
        folder: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = StrictnessCli::Strict)]
        strictness: StrictnessCli,
    },
    InspectCsv {
        path: PathBuf,
    },
    InspectDb,
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum TierCli {
    Descriptive,
    Predictive,
    Prescriptive,
}

impl From<TierCli> for Tier {
    fn from(value: TierCli) -> Self {
        match value {
            TierCli::Descriptive => Tier::Descriptive,
            TierCli::Predictive => Tier::Predictive,
            TierCli::Prescriptive => Tier::Prescriptive,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum StrictnessCli {
    Strict,
    Lenient,
}

impl From<StrictnessCli> for StrictnessMode {
    fn from(value: StrictnessCli) -> Self {
        match value {
            StrictnessCli::Strict => StrictnessMode::Strict,
            StrictnessCli::Lenient => StrictnessMode::Lenient,
        }
    }
}
