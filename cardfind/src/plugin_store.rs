use std::ops::{Deref, DerefMut};

use cardfind_config::Config;
use cardfind_plugin::{Plugin, ResultItem};

pub struct PluginEntry {
    pub enabled: bool,
    pub include_in_global_results: bool,
    pub direct_activation_command: Option<String>,
    plugin: Box<dyn Plugin>,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("name", &self.name())
            .field("enabled", &self.enabled)
            .field("include_in_global_results", &self.include_in_global_results)
            .field("direct_activation_command", &self.direct_activation_command)
            .finish()
    }
}

impl Deref for PluginEntry {
    type Target = dyn Plugin;

    fn deref(&self) -> &Self::Target {
        self.plugin.as_ref()
    }
}

impl DerefMut for PluginEntry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.plugin.as_mut()
    }
}

impl<P: Plugin + 'static> From<P> for PluginEntry {
    fn from(value: P) -> Self {
        Self::new(value)
    }
}

impl PluginEntry {
    fn new<P: Plugin + 'static>(plugin: P) -> Self {
        let config = plugin.default_plugin_config();
        Self {
            enabled: config.enabled.unwrap_or(true),
            include_in_global_results: config.include_in_global_results.unwrap_or(true),
            direct_activation_command: config.direct_activation_command,
            plugin: Box::new(plugin),
        }
    }

    /// Whether `query` starts with this plugin's direct activation command,
    /// either alone or followed by whitespace.
    pub fn is_direct_invoke(&self, query: &str) -> bool {
        let Some(command) = self.direct_activation_command.as_deref() else {
            return false;
        };

        self.enabled
            && query
                .strip_prefix(command)
                .map(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
                .unwrap_or(false)
    }

    pub fn invoke_cmd_len(&self) -> usize {
        self.direct_activation_command
            .as_ref()
            .map(|c| c.len())
            .unwrap_or_default()
    }

    /// Convenient method to construct an error [`ResultItem`] for this plugin.
    pub fn error_item(&self, error: impl std::fmt::Display) -> ResultItem {
        ResultItem::plugin_error(self.name(), error)
    }
}

/// Plugins registered with the host, queried in registration order.
#[derive(Debug)]
pub struct PluginStore {
    pub plugins: Vec<PluginEntry>,
}

impl PluginStore {
    pub fn new(plugins: Vec<PluginEntry>) -> Self {
        Self { plugins }
    }

    /// Constructs every built-in plugin, failing on the first invalid plugin config.
    pub fn all(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(vec![
            <cardfind_plugin_trello::Plugin as Plugin>::new(config)?.into(),
        ]))
    }

    pub async fn reload(&mut self, config: &Config) {
        for plugin in self.plugins.iter_mut() {
            // update plugin generic config
            let default_config = plugin.default_plugin_config();
            match config.generic_config(plugin.name()) {
                Some(c) => {
                    plugin.enabled = c.enabled_or(default_config.enabled);
                    plugin.include_in_global_results =
                        c.include_in_global_results_or(default_config.include_in_global_results);
                    plugin.direct_activation_command = c.direct_activation_command_or(
                        default_config.direct_activation_command.as_ref(),
                    );
                }
                None => {
                    plugin.enabled = default_config.enabled.unwrap_or(true);
                    plugin.include_in_global_results =
                        default_config.include_in_global_results.unwrap_or(true);
                    plugin.direct_activation_command = default_config.direct_activation_command;
                }
            }

            // run plugin reload if enabled
            if plugin.enabled {
                if let Err(e) = plugin.reload(config).await {
                    tracing::error!("Failed to reload `{}`: {e:#}", plugin.name());
                }
            }
        }
    }

    pub fn queriable_plugins(&mut self) -> impl Iterator<Item = &mut PluginEntry> {
        self.plugins
            .iter_mut()
            .filter(|p| p.enabled && p.include_in_global_results)
    }

    pub async fn query(&mut self, query: &str, results: &mut Vec<ResultItem>) {
        // check if a plugin is being invoked directly
        if let Some(plugin) = self.plugins.iter_mut().find(|p| p.is_direct_invoke(query)) {
            let invoke_cmd_len = plugin.invoke_cmd_len();
            let new_query = query[invoke_cmd_len..].trim();

            match plugin.query_direct(new_query).await {
                Ok(res) => res.extend_into(results),
                Err(err) => results.push(plugin.error_item(format!("{err:#}"))),
            }
        } else {
            let trimmed_query = query.trim();

            // otherwise get result from all queriable plugins
            for plugin in self.queriable_plugins() {
                match plugin.query(trimmed_query).await {
                    Ok(res) => res.extend_into(results),
                    Err(err) => results.push(plugin.error_item(format!("{err:#}"))),
                }
            }
        }
    }
}
