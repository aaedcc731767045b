use anyhow::ensure;
use buzon_config::Config;
use buzon_core_contact_contracts::ContactFeatureService;
use buzon_models::contact::Contact;
use clap::Subcommand;

use crate::{database, email, environment};

#[derive(Debug, Subcommand)]
pub enum AdminContactCommand {
    /// List the most recent contact submissions
    #[command(aliases(["ls", "l"]))]
    List {
        /// Maximum number of submissions to show
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
    /// Show a single contact submission
    #[command(aliases(["g"]))]
    Get { id: i64 },
    /// Delete a contact submission
    #[command(aliases(["rm", "d"]))]
    Delete { id: i64 },
}

impl AdminContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let database = database::connect(&config.database).await?;
        let email = email::connect(&config.email)?;
        let contact = environment::contact_feature(&config, database, email);

        match self {
            Self::List { limit } => {
                for contact in contact.list(limit).await? {
                    print_contact(&contact);
                }
            }
            Self::Get { id } => match contact.get(id.into()).await? {
                Some(contact) => print_contact(&contact),
                None => anyhow::bail!("Contact {id} not found"),
            },
            Self::Delete { id } => {
                ensure!(contact.delete(id.into()).await?, "Contact {id} not found");
                println!("Contact {id} deleted");
            }
        }

        Ok(())
    }
}

fn print_contact(contact: &Contact) {
    println!(
        "#{id} {created_at} {name} <{email}>{phone}",
        id = contact.id,
        created_at = contact.created_at.format("%Y-%m-%d %H:%M:%S"),
        name = *contact.name,
        email = *contact.email,
        phone = contact
            .phone
            .as_ref()
            .map(|phone| format!(" ({})", **phone))
            .unwrap_or_default(),
    );
    println!("{}", *contact.message);
    println!();
}
