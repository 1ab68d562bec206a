use std::sync::Arc;

use anyhow::Context;
use clampsite_config::Config;
use clampsite_core_contact_impl::ContactFeatureConfig;
use clampsite_core_search_impl::SearchFeatureConfig;
use clampsite_di::provider;
use clampsite_email_impl::EmailServiceConfig;
use clampsite_models::contact::ContactConfigError;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email_service_config: EmailServiceConfig,
        contact_feature_config: ContactFeatureConfig,
        search_feature_config: SearchFeatureConfig,
    }
}

impl Provider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let relay_settings = config.relay_settings();

        // A missing key only disables the contact relay, which checks the
        // relay settings before using the email service.
        let email_service_config = EmailServiceConfig {
            api_url: config.email.api_url.clone().into(),
            api_key: config.email.api_key.as_deref().unwrap_or_default().into(),
            from: config.email.from.clone().into(),
            timeout: config.email.timeout.map(Into::into),
        };

        let contact_feature_config = ContactFeatureConfig {
            recipient: relay_settings.map(|settings| settings.recipient.into()),
        };

        let search_feature_config = SearchFeatureConfig {
            catalog: config
                .catalog()
                .context("Invalid search catalog")?
                .into(),
            empty_query_limit: config.search.empty_query_limit,
            result_limit: config.search.result_limit,
        };

        Ok(Self {
            _cache: Default::default(),
            email_service_config,
            contact_feature_config,
            search_feature_config,
        })
    }

    /// Why the contact relay is disabled, if it is.
    pub fn contact_config_error(&self) -> Option<ContactConfigError> {
        self.contact_feature_config.recipient.as_ref().err().copied()
    }
}
