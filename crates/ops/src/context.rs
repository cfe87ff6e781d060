//! Operations context for dependency injection

use spout_config::Config;
use spout_errors::Error;
use spout_events::{EventEmitter, EventSender};
use spout_net::{DownloadOptions, Downloader, NetClient, NetConfig, RegistryClient};

/// Operations context providing access to all components
pub struct OpsCtx {
    /// Registry JSON API client
    pub registry: RegistryClient,
    /// Verified downloader
    pub downloader: Downloader,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Effective configuration
    pub config: Config,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for [`OpsCtx`]
#[derive(Default)]
pub struct OpsContextBuilder {
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender or config is missing, or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let tx = self
            .tx
            .ok_or_else(|| Error::internal("missing component: event_sender"))?;

        let config = self
            .config
            .ok_or_else(|| Error::internal("missing component: config"))?;

        let net = NetClient::new(NetConfig::from(&config.network))?;

        let registry = RegistryClient::new(net.clone(), config.registry.base_url.clone());
        let downloader = Downloader::new(
            net,
            DownloadOptions::new(&config.download, &config.network),
        );

        Ok(OpsCtx {
            registry,
            downloader,
            tx,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_event_sender() {
        let result = OpsContextBuilder::new()
            .with_config(Config::default())
            .build();
        assert!(matches!(result, Err(Error::Internal(msg)) if msg.contains("event_sender")));
    }

    #[test]
    fn test_build_uses_configured_registry() {
        let (tx, _rx) = spout_events::channel();
        let mut config = Config::default();
        config.registry.base_url = "https://mirror.example/pypi/".to_string();

        let ctx = OpsContextBuilder::new()
            .with_event_sender(tx)
            .with_config(config)
            .build()
            .unwrap();

        assert_eq!(ctx.registry.base_url(), "https://mirror.example/pypi");
    }
}
