use clap::Parser;

use tinybear::app;
use tinybear::cli::CliArgs;

fn main() {
    let args = CliArgs::parse();
    if let Err(err) = app::run(args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
