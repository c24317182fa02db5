use clap::Parser;
use netmask::cli::{run, Cli};
use netmask::diagnostics::init_logging;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug)?;
    log::debug!("#Start main()");

    run(&cli)
}
