// src/main.rs

use clap::Parser;
use log::error;

use identity_swap::config::{Cli, Config};
use identity_swap::runner;

fn main() {
    // .env is optional; real environment variables win.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_cli(Cli::parse());

    // Validation failures and empty-stage halts print a message and fall
    // through to normal termination; there is no distinct failure exit code.
    if let Err(e) = runner::run(&config) {
        error!("{e}");
    }
}
