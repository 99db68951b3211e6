//! Builds the long-lived pieces every subcommand needs.

use std::path::PathBuf;
use std::sync::Arc;

use spotifriend_api::{SpotifyClient, SpotifyConfig};
use spotifriend_common::SpotifriendError;
use spotifriend_config::schema::ApiConfig;
use spotifriend_config::SpotifriendConfig;
use spotifriend_engine::{Engine, EngineDeps, EngineHandle, EngineOptions};
use spotifriend_platform::{is_first_launch, store_file, CookieSource, FileStore, SessionStore};
use tracing::{info, warn};

pub struct AppContext {
    pub config: SpotifriendConfig,
    pub store: Arc<FileStore>,
    pub session: SessionStore,
    pub client: Arc<SpotifyClient>,
}

impl AppContext {
    pub fn build(config: SpotifriendConfig) -> Result<Self, SpotifriendError> {
        let path = if config.store.path.is_empty() {
            store_file()?
        } else {
            PathBuf::from(&config.store.path)
        };
        let store = Arc::new(FileStore::open(path)?);
        info!("Using store at {}", store.path().display());

        let session = SessionStore::new(store.clone()).with_keys(
            config.store.cookie_key.clone(),
            Some(config.store.legacy_cookie_key.clone()),
        );
        let client = Arc::new(SpotifyClient::new(spotify_config(&config.api)));

        Ok(Self {
            config,
            store,
            session,
            client,
        })
    }

    /// Start an engine over the shared store and client.
    pub fn spawn_engine(&self, cookies: Option<Arc<dyn CookieSource>>) -> EngineHandle {
        let first_launch = is_first_launch(self.store.as_ref()).unwrap_or_else(|e| {
            warn!("First-launch check failed: {e}");
            false
        });
        Engine::spawn(
            EngineDeps {
                source: self.client.clone(),
                session: self.session.clone(),
                cookies,
            },
            EngineOptions::from_config(&self.config, first_launch),
        )
    }
}

fn spotify_config(api: &ApiConfig) -> SpotifyConfig {
    SpotifyConfig::default()
        .with_token_url(api.token_url.clone())
        .with_buddylist_url(api.buddylist_url.clone())
        .with_web_base_url(api.web_base_url.clone())
        .with_user_agent(api.user_agent.clone())
}
