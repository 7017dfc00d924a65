use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use yake::commands::policy_run_command;
use yake::{init_logging, install_interrupt_handler};

/// Yet another toolkit for Go projects.
///
/// This CLI is a thin wrapper around `yake-core` (exposed in code as `yake_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(name = "yake", version, about = "Yet Another ToolKit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the yake version.
    Version,

    /// Policy-related commands.
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Run policy checks for the project.
    ///
    /// This will:
    /// - Check that every test file pairs with a source file and imports `testing`.
    /// - Check that every significant source file has a `_test.go` twin.
    /// - Run `go test` with coverage and enforce the per-package minimum.
    /// - Report large functions that no test ever executes.
    Run {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit the report as JSON on stdout instead of text on stderr.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging();
    install_interrupt_handler()?;

    match cli.command {
        Command::Version => {
            println!("yake v{}", yake_core::version());
        }
        Command::Policy { command: PolicyCommand::Run { root, json } } => {
            let outcome = policy_run_command(&root, json)?;
            if !outcome.passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
