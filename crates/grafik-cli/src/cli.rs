use clap::CommandFactory;
use crate::commands;

#[derive(clap::Parser, Debug)]
#[command(name = "grafik", version, about = "Format and check GraphQL query documents.")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    /// What a bare `grafik` invocation does.
    pub(crate) fn print_help(&self) -> std::io::Result<()> {
        Self::command().print_help()
    }
}
