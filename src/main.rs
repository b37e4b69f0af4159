use std::io;
use std::process;

use structopt::StructOpt;

use promdump::cliopt::CliOpt;
use promdump::output::LineWriter;
use promdump::runner::Runner;

const EXIT_ERROR: i32 = 2;

fn main() {
    let opt = CliOpt::from_args();

    env_logger::Builder::new()
        .filter_level(opt.log_level())
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let result = Runner::new(&opt, LineWriter::new(stdout.lock()))
        .and_then(|mut runner| runner.run(&opt.command));

    match result {
        Ok(status) => process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(EXIT_ERROR);
        }
    }
}
