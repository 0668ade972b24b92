use anyhow::Context;
use mag_client::{ClientSettings, MetadataClient};
use mag_config::MagConfig;
use mag_core::Credential;
use mag_store::{EditionStore, StoreOptions};

use crate::cli::GlobalFlags;

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: MagConfig,
    pub client: MetadataClient,
    pub store: EditionStore<MetadataClient>,
    /// `--api-key`, which takes precedence over `api.key`.
    pub credential: Option<Credential>,
}

impl AppContext {
    pub fn init(config: MagConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let settings =
            ClientSettings::from_config(&config.api).context("invalid [api] configuration")?;
        let client = MetadataClient::new(settings).context("failed to build HTTP client")?;
        let store = EditionStore::new(client.clone(), StoreOptions::from_config(&config.storage));

        let credential = flags
            .api_key
            .as_deref()
            .map(Credential::parse)
            .transpose()
            .context("invalid --api-key")?;

        if credential.is_none() && !config.api.is_configured() {
            tracing::debug!("no API key configured; set MAG_API__KEY or pass --api-key");
        }

        Ok(Self {
            config,
            client,
            store,
            credential,
        })
    }
}
