mod fmt;

use crate::Cli;
use crate::CommandResult;
use fmt::FmtCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "grafik")]
pub(crate) enum CommandEnum {
    /// Re-serialize query documents in canonical form.
    Fmt(Box<FmtCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Fmt(cmd) => cmd.run(cli).await
        }
    }
}
