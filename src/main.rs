use clap::Parser;
use env_logger::{Builder, Env};
use log::{info, warn, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod returns;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        Builder::new().filter_level(LevelFilter::Debug).init();
    } else {
        Builder::from_env(Env::default().default_filter_or("info")).init();
    }
    info!("args: {:?}", args);

    if let Err(e) = returns::run_report(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
