#![warn(clippy::all, clippy::pedantic, clippy::nursery, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation
)]
#![forbid(unsafe_code)]

use clap::Parser;
use config::{Args, PingoConfig};

mod app;
mod config;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = PingoConfig::from(args);
    app::run_pingo(&cfg)
}
