use std::io::{self, Read};
use std::path::Path;

use log::{debug, info};

use crate::check::{diff, validate};
use crate::cliopt::{CliOpt, Command, OutputFormat};
use crate::dump::{Dump, Origin};
use crate::error::Result;
use crate::filter::FamilyFilter;
use crate::format::{Formatter, HumanReadableFormatter, JSONFormatter, Report};
use crate::output::Writer;

// path(s) -> Dump -> FamilyFilter -> validate | diff -> Formatter -> Writer

/// Outcome of a successful run, mapped to the process exit code by `main`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Clean,
    Findings,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Clean => 0,
            Status::Findings => 1,
        }
    }
}

pub struct Runner<W> {
    formatter: Box<dyn Formatter>,
    filter: FamilyFilter,
    stdin: Box<dyn Read>,
    writer: W,
}

impl<W: Writer> Runner<W> {
    pub fn new(opt: &CliOpt, writer: W) -> Result<Self> {
        let formatter: Box<dyn Formatter> = match opt.format {
            OutputFormat::Human => Box::new(HumanReadableFormatter::new(opt.verbose > 0)),
            OutputFormat::JSON => Box::new(JSONFormatter::new(true)),
        };

        Ok(Self {
            formatter,
            filter: FamilyFilter::new(opt.exclude.as_slice())?,
            stdin: Box::new(io::stdin()),
            writer,
        })
    }

    /// Replaces the process stdin as the source of `-` dumps.
    pub fn with_stdin<R: Read + 'static>(mut self, stdin: R) -> Self {
        self.stdin = Box::new(stdin);
        self
    }

    pub fn run(&mut self, command: &Command) -> Result<Status> {
        match command {
            Command::Validate { dump } => {
                let dump = self.load(dump)?;
                let result = validate(&dump);
                info!(
                    "{}: {} duplicate families, {} families with duplicate samples",
                    dump.origin(),
                    result.duplicate_families.len(),
                    result.duplicate_samples.len()
                );

                self.emit(&Report::Validation(&result))?;
                Ok(status(result.is_clean()))
            }
            Command::Diff { from, to } => {
                let from = self.load(from)?;
                let to = self.load(to)?;
                let result = diff(&from, &to);
                info!(
                    "{} -> {}: {} new families, {} removed families, {} changed families",
                    from.origin(),
                    to.origin(),
                    result.added_families.len(),
                    result.removed_families.len(),
                    result.metadata_changes.len()
                );

                self.emit(&Report::Diff(&result))?;
                Ok(status(result.is_empty()))
            }
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn load(&mut self, path: &Path) -> Result<Dump> {
        let dump = if path == Path::new("-") {
            Dump::from_reader(&mut self.stdin, Origin::Stdin)?
        } else {
            Dump::from_file(path)?
        };

        debug!(
            "loaded {}: {} family blocks, {} distinct names",
            dump.origin(),
            dump.len(),
            dump.family_names().len()
        );

        let dump = self.filter.apply(dump);
        if !self.filter.is_empty() {
            debug!("{} family blocks left after excludes", dump.len());
        }
        Ok(dump)
    }

    fn emit(&mut self, report: &Report) -> Result<()> {
        let buf = self.formatter.format(report)?;

        self.writer
            .write(&buf)
            .map_err(|e| ("writer failed", e))?;
        self.writer.flush()?;

        Ok(())
    }
}

fn status(clean: bool) -> Status {
    if clean {
        Status::Clean
    } else {
        Status::Findings
    }
}
