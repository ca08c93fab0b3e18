//! Lamina compiler main entry point.
mod args;
mod crash_handler;

use std::{panic, process::exit};

use args::CompilerOptions;
use clap::Parser as _;
use crash_handler::panic_handler;
use lamina_driver::CompilerBuilder;
use lamina_pipeline::{interface::CompilerInterface, settings::CompilerSettings};
use lamina_utils::{logging::CompilerLogger, stream::CompilerOutputStream};
use log::LevelFilter;

/// The logger that is used by the compiler for `log!` statements.
pub static COMPILER_LOGGER: CompilerLogger = CompilerLogger::new();

fn main() {
    // Initial grunt work, panic handler and logger setup...
    panic::set_hook(Box::new(panic_handler));

    COMPILER_LOGGER.set_streams(CompilerOutputStream::stdout(), CompilerOutputStream::stderr());
    log::set_logger(&COMPILER_LOGGER).unwrap_or_else(|_| panic!("couldn't initiate logger"));

    let settings = CompilerSettings::from(CompilerOptions::parse());

    // if debug is specified, we want to log everything that is debug level...
    if settings.debug {
        log::set_max_level(LevelFilter::Debug);
    } else {
        log::set_max_level(LevelFilter::Info);
    }

    let mut compiler = CompilerBuilder::build_with_settings(
        settings,
        CompilerOutputStream::stderr,
        CompilerOutputStream::stdout,
    );
    compiler.run_on_entry_point();

    if compiler.has_errors() {
        exit(1);
    }
}
