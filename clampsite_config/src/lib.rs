use std::{net::IpAddr, path::Path};

use anyhow::Context;
use clampsite_models::{
    contact::ContactConfigError,
    email_address::{EmailAddress, EmailAddressWithName},
    search::{Catalog, CatalogEntry, CatalogError},
};
use config::{File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

/// Colon separated list of additional config files.
pub const CONFIG_PATH_ENV: &str = "CLAMPSITE_CONFIG_PATH";

/// Environment variables of the deployment and the config keys they set.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("RESEND_API_KEY", "email.api_key"),
    ("CONTACT_TO_EMAIL", "contact.recipient"),
    ("CONTACT_FROM_EMAIL", "email.from"),
    ("CLAMPSITE_HTTP_HOST", "http.host"),
    ("CLAMPSITE_HTTP_PORT", "http.port"),
];

pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
    let paths = paths
        .split(':')
        .filter(|path| !path.is_empty())
        .collect::<Vec<_>>();

    load_with(&paths, |key| std::env::var(key).ok())
}

/// Load the embedded default config, then every file in `paths`, then the
/// overrides found by `env`. Blank environment values are ignored.
pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder().add_source(File::from_str(
        clampsite_assets::CONFIG_TOML,
        FileFormat::Toml,
    ));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty());
            builder
                .set_override_option(key, value)
                .with_context(|| format!("Failed to apply {var}"))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct EmailConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub from: EmailAddressWithName,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactConfig {
    pub recipient: Option<EmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub empty_query_limit: usize,
    pub result_limit: usize,
    pub catalog: Vec<CatalogEntry>,
}

/// Everything the contact relay needs beyond the defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub api_key: String,
    pub recipient: EmailAddress,
}

impl Config {
    pub fn relay_settings(&self) -> Result<RelaySettings, ContactConfigError> {
        let api_key = self
            .email
            .api_key
            .clone()
            .ok_or(ContactConfigError::MissingApiKey)?;
        let recipient = self
            .contact
            .recipient
            .clone()
            .ok_or(ContactConfigError::MissingRecipient)?;

        Ok(RelaySettings { api_key, recipient })
    }

    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.search.catalog.clone())
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl std::fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaySettings")
            .field("api_key", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}
