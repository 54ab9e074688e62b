use serde::Serialize;
use url::Url;

/// Represents what happens when a [`ResultItem`](crate::ResultItem) is selected.
///
/// Actions are plain data; running them is up to the host, see [`Action::run`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum Action {
    /// Open the url in the default browser.
    OpenUrl(Url),
    /// Run a shell command line.
    RunCommand(String),
}

impl Action {
    /// A short description of what the action does.
    pub fn description(&self) -> &'static str {
        match self {
            Self::OpenUrl(_) => "Open in browser",
            Self::RunCommand(_) => "Run in terminal",
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::OpenUrl(url) => cardfind_utils::open_url(url),
            Self::RunCommand(command) => cardfind_utils::execute_in_shell(command),
        }
    }
}
