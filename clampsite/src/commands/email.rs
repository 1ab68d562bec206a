use clampsite_config::Config;
use clampsite_di::Provides;
use clampsite_email_contracts::{Email, EmailService};
use clampsite_models::{contact::ContactConfigError, email_address::EmailAddress};
use clap::Subcommand;
use tracing::info;

use crate::environment::{types, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    if config.email.api_key.is_none() {
        return Err(ContactConfigError::MissingApiKey.into());
    }

    let mut provider = Provider::new(&config)?;
    let email_service: types::Email = provider.provide();

    let receipt = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await?;

    info!(id = ?receipt.id, "Email accepted by provider");

    Ok(())
}
