//! Lamina Compiler arguments management.
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use lamina_pipeline::settings::{CompilerSettings, CompilerStageKind, DumpMode};

/// CompilerOptions is a structural representation of what arguments the
/// compiler can take when running.
#[derive(ClapParser)]
#[command(
    name = "laminac",
    version,
    author = "Lamina Language Authors",
    about = "Check and lower Lamina `l3` programs"
)]
#[command(disable_colored_help = true)]
pub(crate) struct CompilerOptions {
    /// Run the compiler in debug mode
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Whether to output the result of each compiler stage.
    #[arg(long, global = true)]
    pub(crate) output_stage_results: bool,

    /// Whether to print the stage metrics for each stage of the compiler.
    #[arg(long, global = true)]
    pub(crate) output_metrics: bool,

    /// How to print the result of a stage.
    #[arg(long, value_enum, default_value_t = DumpMode::Pretty, global = true)]
    pub(crate) dump_mode: DumpMode,

    /// Compiler mode
    #[command(subcommand)]
    pub(crate) mode: SubCmd,
}

impl From<CompilerOptions> for CompilerSettings {
    fn from(options: CompilerOptions) -> Self {
        let (stage, filename) = match options.mode {
            SubCmd::Parse { filename } => (CompilerStageKind::Parse, filename),
            SubCmd::Check { filename } => (CompilerStageKind::ScopeCheck, filename),
            SubCmd::Lower { filename } => (CompilerStageKind::Full, filename),
        };

        Self {
            entry_point: Some(filename),
            debug: options.debug,
            output_stage_results: options.output_stage_results,
            output_metrics: options.output_metrics,
            emit_errors: true,
            dump_mode: options.dump_mode,
            stage,
        }
    }
}

#[derive(Subcommand, Clone)]
pub(crate) enum SubCmd {
    /// Parse the given program
    Parse {
        /// Input filename of the program
        filename: PathBuf,
    },

    /// Parse and scope check the given program
    Check {
        /// Input filename of the program
        filename: PathBuf,
    },

    /// Check the given program and lower it into `l2`
    Lower {
        /// Input filename of the program
        filename: PathBuf,
    },
}
