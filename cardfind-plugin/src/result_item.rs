use std::fmt::Display;

use serde::Serialize;

use crate::{Action, BuiltinIcon, Icon};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub id: String,
    pub icon: Icon,
    pub primary_text: String,
    pub secondary_text: String,
    pub tooltip: Option<String>,
    /// The action bound to this item, `None` for informational items.
    pub action: Option<Action>,
    pub score: u16,
}

impl ResultItem {
    /// Convenient method to construct an error [`ResultItem`] for a plugin.
    pub fn plugin_error<S: Display>(plugin_name: &str, error: S) -> Self {
        Self {
            id: String::new(),
            icon: BuiltinIcon::Error.into(),
            primary_text: plugin_name.to_owned(),
            secondary_text: error.to_string(),
            tooltip: Some(error.to_string()),
            action: None,
            score: 0,
        }
    }
}
