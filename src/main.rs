use clap::Parser;
use declutter::cli::{self, Cli};
use declutter::logging;
use declutter::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = cli::run(cli) {
        OutputFormatter::error(&format!("Error: {}", e));
        process::exit(1);
    }
}
