use std::error::Error;

use clap::Parser;

mod config;
mod keymap;
mod run;

fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::parse();
    run::run(&config)
}
