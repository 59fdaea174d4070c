mod cli;
mod command;
mod command_result;
mod commands;
mod logging;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.cmd.take() {
        Some(command) => command.run(cli).await.report(),
        None => match cli.print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )).report(),
        },
    }
}
