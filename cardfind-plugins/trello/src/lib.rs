use std::sync::Arc;

use cardfind_config::Config;
use cardfind_plugin::PluginQueryOutput;
use cardfind_utils::IteratorExt;

pub mod card;
pub mod client;
pub mod config;
pub mod terminal;

use crate::card::ActionBinder;
use crate::client::TrelloClient;
use crate::config::{Credentials, TrelloConfig};
use crate::terminal::{GSettings, TerminalResolver};

#[derive(Debug)]
pub struct Plugin {
    config: TrelloConfig,
    client: TrelloClient,
    terminal: Arc<TerminalResolver>,
}

impl Plugin {
    const NAME: &str = "Trello";
    /// Results handed to the host, independent of [`TrelloClient::CARDS_LIMIT`].
    const MAX_RESULTS: usize = 5;

    fn load_config(config: &Config) -> anyhow::Result<(TrelloConfig, TrelloClient)> {
        let config = config.try_plugin_config::<TrelloConfig>(Self::NAME)?;
        let client = TrelloClient::new(config.base_url(), config.request_timeout())?;
        Ok((config, client))
    }

    fn terminal_resolver(config: &TrelloConfig) -> TerminalResolver {
        match config.terminal_override() {
            Some(terminal) => TerminalResolver::new(terminal),
            None => TerminalResolver::new(GSettings),
        }
    }
}

#[async_trait::async_trait]
impl cardfind_plugin::Plugin for Plugin {
    fn new(config: &Config) -> anyhow::Result<Self> {
        let (config, client) = Self::load_config(config)?;
        let terminal = Arc::new(Self::terminal_resolver(&config));
        Ok(Self {
            config,
            client,
            terminal,
        })
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_plugin_config(&self) -> cardfind_config::PluginConfig {
        cardfind_config::PluginConfig {
            enabled: Some(true),
            include_in_global_results: Some(false),
            direct_activation_command: Some("tr".into()),
            inner: None,
        }
    }

    async fn reload(&mut self, config: &Config) -> anyhow::Result<()> {
        let (config, client) = Self::load_config(config)?;

        // keep the cached desktop lookup unless the config now pins a terminal
        let overridden = config.terminal_override();
        if overridden.is_some() || self.config.terminal_override() != overridden {
            self.terminal = Arc::new(Self::terminal_resolver(&config));
        }

        self.config = config;
        self.client = client;
        Ok(())
    }

    async fn query(&mut self, query: &str) -> anyhow::Result<PluginQueryOutput> {
        let Some(token) = self.config.api_token().cloned() else {
            tracing::warn!("API token must be set");
            return Ok(PluginQueryOutput::None);
        };

        let Some(key) = self.config.api_key().cloned() else {
            tracing::warn!("API key must be set");
            return Ok(PluginQueryOutput::None);
        };

        let argument = query.trim();
        if argument.is_empty() {
            return Ok(PluginQueryOutput::None);
        }

        let credentials = Credentials { key, token };
        let argument = argument.to_owned();
        let client = self.client.clone();
        let terminal = self.terminal.clone();
        let default_sort = self.config.default_sort;
        let item_action = self.config.item_action;
        let companion_command = self.config.companion_command().to_owned();

        let items = smol::unblock(move || {
            let binder = ActionBinder::new(item_action, &terminal, &companion_command);
            client.search(&argument, &credentials, default_sort, &binder)
        })
        .await;

        Ok(items
            .into_iter()
            .take(Self::MAX_RESULTS)
            .collect_non_empty::<Vec<_>>()
            .into())
    }
}
