use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use structopt::StructOpt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    JSON,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" | "h" => Ok(OutputFormat::Human),
            "json" | "j" => Ok(OutputFormat::JSON),
            _ => Err(Error::new(&format!(
                "unknown output format '{}', expected one of: human, json",
                s
            ))),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "promdump",
    about = "Validate and diff Prometheus text exposition dumps"
)]
pub struct CliOpt {
    #[structopt(long = "format", short = "f", default_value = "human")]
    pub format: OutputFormat,

    /// Drop every family whose name fully matches the regex. Repeatable.
    #[structopt(long = "exclude", short = "x", number_of_values = 1)]
    pub exclude: Vec<String>,

    #[structopt(long = "verbose", short = "v", parse(from_occurrences))]
    pub verbose: u8,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Report duplicate families and duplicate samples in one dump.
    Validate {
        /// Dump file, or '-' for stdin.
        #[structopt(parse(from_os_str))]
        dump: PathBuf,
    },

    /// Report what changed between two dumps.
    Diff {
        #[structopt(parse(from_os_str))]
        from: PathBuf,

        #[structopt(parse(from_os_str))]
        to: PathBuf,
    },
}

impl CliOpt {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
