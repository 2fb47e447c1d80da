//! Voice Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_recorder::cli::{
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    init_logging, run_convert, run_rates, run_record, Presenter, EXIT_ERROR,
};
use voice_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Record(args) => run_record(args).await,
        Commands::Convert(args) => run_convert(args).await,
        Commands::Rates => run_rates().await,
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}
