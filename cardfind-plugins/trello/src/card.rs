use cardfind_plugin::{Action, BuiltinIcon, ResultItem};
use cardfind_utils::StringExt;
use serde::Deserialize;
use url::Url;

use crate::config::ItemAction;
use crate::terminal::{Terminal, TerminalResolver};

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

/// A card as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub name: String,
    pub url: Url,
    #[serde(default)]
    pub board: Option<Named>,
    #[serde(default)]
    pub list: Option<Named>,
}

impl Card {
    pub fn board_name(&self) -> &str {
        self.board.as_ref().map(|b| b.name.as_str()).unwrap_or_default()
    }

    pub fn list_name(&self) -> &str {
        self.list.as_ref().map(|l| l.name.as_str()).unwrap_or_default()
    }

    /// `[<board>] <card>`, or just the card name when the board is unknown.
    pub fn display_name(&self) -> String {
        match &self.board {
            Some(board) => format!("[{}] {}", board.name, self.name),
            None => self.name.clone(),
        }
    }

    pub fn item(&self, binder: &ActionBinder) -> ResultItem {
        ResultItem {
            id: self.url.to_string(),
            icon: BuiltinIcon::Card.into(),
            primary_text: self.display_name(),
            secondary_text: String::new(),
            tooltip: Some(self.url.to_string()),
            action: Some(binder.bind(self)),
            score: 0,
        }
    }
}

/// The action every card of one search gets, decided once per search.
#[derive(Debug, Clone)]
pub enum ActionBinder {
    OpenBrowser,
    OpenTerminal {
        terminal: Terminal,
        companion_command: String,
    },
}

impl ActionBinder {
    /// Only resolves the terminal when the action needs it.
    pub fn new(item_action: ItemAction, resolver: &TerminalResolver, companion_command: &str) -> Self {
        match item_action {
            ItemAction::OpenBrowser => Self::OpenBrowser,
            ItemAction::OpenTerminal => Self::OpenTerminal {
                terminal: resolver.get_default_terminal().clone(),
                companion_command: companion_command.to_owned(),
            },
        }
    }

    pub fn bind(&self, card: &Card) -> Action {
        match self {
            Self::OpenBrowser => Action::OpenUrl(card.url.clone()),
            Self::OpenTerminal {
                terminal,
                companion_command,
            } => {
                let command = format!(
                    "{companion_command} show {} {} {}",
                    card.board_name().single_quoted(),
                    card.list_name().single_quoted(),
                    card.name.single_quoted(),
                );
                Action::RunCommand(terminal.wrap(&command))
            }
        }
    }
}
