//! Bar inventory CLI.

use barstock_cli::logging::init_logging;
use clap::Parser;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{ServerArgs, run_columns, run_delete, run_edit, run_export, run_list};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let server = ServerArgs {
        config: cli.config.as_deref(),
        url: cli.url.as_deref(),
    };
    let result = match &cli.command {
        Command::Columns => run_columns(),
        Command::List(args) => run_list(&server, args),
        Command::Edit(args) => run_edit(&server, args),
        Command::Delete(args) => run_delete(&server, args),
        Command::Export(args) => run_export(&server, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
