use cardfind_config::{Config, PluginConfig};

use crate::PluginQueryOutput;

/// The capability a plugin registers with the host.
///
/// The host owns one instance per plugin for the whole process
/// and delivers one query at a time.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Constructor for plugin.
    ///
    /// An invalid plugin config is an error, the host refuses to start.
    fn new(config: &Config) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Gets the name of the plugin.
    ///
    /// usually used to identify the origin of a [`ResultItem`](crate::ResultItem)
    /// and the table it reads from the config file.
    fn name(&self) -> &'static str;

    /// Default plugin config
    fn default_plugin_config(&self) -> PluginConfig {
        PluginConfig {
            enabled: Some(true),
            include_in_global_results: Some(true),
            direct_activation_command: None,
            inner: None,
        }
    }

    /// Reloads the configuration of the plugin
    #[allow(unused_variables)]
    async fn reload(&mut self, config: &Config) -> anyhow::Result<()> {
        Ok(())
    }

    /// Query the plugin for [`ResultItem`](crate::ResultItem)s.
    #[allow(unused_variables)]
    async fn query(&mut self, query: &str) -> anyhow::Result<PluginQueryOutput> {
        Ok(PluginQueryOutput::None)
    }

    /// Query the plugin for [`ResultItem`](crate::ResultItem)s when directly invoked.
    async fn query_direct(&mut self, query: &str) -> anyhow::Result<PluginQueryOutput> {
        self.query(query).await
    }
}
