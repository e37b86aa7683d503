//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use healthmap_cli::{CliError, run};

const LOG_ENV: &str = "HEALTHMAP_LOG";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();
    match run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => report_and_exit(&err),
    }
}

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on the terminal before exiting"
)]
fn report_and_exit(err: &CliError) -> ! {
    eprintln!("healthmap: {err}");
    std::process::exit(1);
}
