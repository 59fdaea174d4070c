use crate::Cli;
use crate::CommandResult;

/// A parsed subcommand. Commands never print directly: everything they have
/// to say comes back in the [`CommandResult`].
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
