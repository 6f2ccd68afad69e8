mod app;
mod cli;
mod config;
mod consts;
mod error;
mod fritz;
mod ledger;
mod output;
mod report;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let config = Config::load(!cli.debug);
    let cli = cli.with_config(&config);
    utils::set_debug(cli.debug);

    if let Err(err) = app::run(&cli) {
        eprintln!("dslmon: {err}");
        std::process::exit(1);
    }
}
