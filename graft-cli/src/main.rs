//! Rewrite graphs on the command line.

use clap::Parser as _;

use graft_cli::CliArgs;

fn main() {
    let args = CliArgs::parse();
    let report_errors = args.verbosity().tracing_level().is_some();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.verbosity().tracing_level_filter())
        .init();

    if let Err(e) = args.run() {
        if report_errors {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}
