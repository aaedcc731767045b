use buzon_config::Config;
use clap::Subcommand;
use contact::AdminContactCommand;

mod contact;

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Manage stored contact submissions
    #[command(aliases(["c"]))]
    Contact {
        #[command(subcommand)]
        command: AdminContactCommand,
    },
}

impl AdminCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            AdminCommand::Contact { command } => command.invoke(config).await,
        }
    }
}
