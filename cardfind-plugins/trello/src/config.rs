use std::time::Duration;

use serde::Deserialize;

use crate::terminal::Terminal;

/// Sort order appended as a `sort:` clause when the query has none.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultSort {
    NewestCreated,
    OldestCreated,
    #[default]
    NewestEdited,
    OldestEdited,
}

impl DefaultSort {
    /// The operand Trello expects after `sort:`.
    pub fn token(self) -> &'static str {
        match self {
            Self::NewestCreated => "created",
            Self::OldestCreated => "-created",
            Self::NewestEdited => "edited",
            Self::OldestEdited => "-edited",
        }
    }
}

/// What selecting a card does.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ItemAction {
    #[default]
    OpenBrowser,
    OpenTerminal,
}

/// A credential that never shows up in logs.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: Secret,
    pub token: Secret,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TrelloConfig {
    api_token: Option<Secret>,
    api_key: Option<Secret>,
    #[serde(default)]
    pub default_sort: DefaultSort,
    #[serde(default)]
    pub item_action: ItemAction,
    companion_command: Option<String>,
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    terminal_exec: Option<String>,
    terminal_exec_arg: Option<String>,
}

impl TrelloConfig {
    const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
    const DEFAULT_COMPANION_COMMAND: &str = "trello";
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// API token, `None` if unset or empty.
    pub fn api_token(&self) -> Option<&Secret> {
        self.api_token.as_ref().filter(|s| !s.0.is_empty())
    }

    /// API key, `None` if unset or empty.
    pub fn api_key(&self) -> Option<&Secret> {
        self.api_key.as_ref().filter(|s| !s.0.is_empty())
    }

    pub fn companion_command(&self) -> &str {
        self.companion_command
            .as_deref()
            .unwrap_or(Self::DEFAULT_COMPANION_COMMAND)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(Self::DEFAULT_TIMEOUT)
    }

    /// Terminal set explicitly in the config, bypassing the desktop setting.
    pub fn terminal_override(&self) -> Option<Terminal> {
        let exec = self.terminal_exec.as_ref().filter(|e| !e.is_empty())?;
        Some(Terminal::new(
            exec.clone(),
            self.terminal_exec_arg.clone().unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_sort_tokens() {
        assert_eq!(DefaultSort::NewestCreated.token(), "created");
        assert_eq!(DefaultSort::OldestCreated.token(), "-created");
        assert_eq!(DefaultSort::NewestEdited.token(), "edited");
        assert_eq!(DefaultSort::OldestEdited.token(), "-edited");
    }

    #[test]
    fn it_reads_literals() {
        let config: TrelloConfig = toml::from_str(
            r#"
api_key = "k"
api_token = ""
default_sort = "oldest-created"
item_action = "open-terminal"
"#,
        )
        .unwrap();

        assert_eq!(config.default_sort, DefaultSort::OldestCreated);
        assert_eq!(config.item_action, ItemAction::OpenTerminal);
        assert_eq!(config.api_key().map(Secret::expose), Some("k"));
        assert!(config.api_token().is_none());
        assert_eq!(config.base_url(), "https://api.trello.com/1");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.terminal_override().is_none());
    }

    #[test]
    fn it_rejects_unknown_item_action() {
        let err = toml::from_str::<TrelloConfig>(r#"item_action = "open-editor""#).unwrap_err();
        assert!(err.to_string().contains("open-editor"));
    }

    #[test]
    fn secrets_are_redacted() {
        let credentials = Credentials {
            key: Secret::new("my-key"),
            token: Secret::new("my-token"),
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-token"));

        assert_eq!(credentials.key.to_string(), "***");
        assert_eq!(format!("{}", credentials.token), "***");
        assert_eq!(credentials.token.expose(), "my-token");
    }
}
