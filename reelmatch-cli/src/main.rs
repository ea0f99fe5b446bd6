//! Entry point for the `reelmatch` binary.
#![forbid(unsafe_code)]

use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(err) = reelmatch_cli::run() {
        eprintln!("reelmatch: {err}");
        std::process::exit(1);
    }
}
