use crate::ResultItem;

/// Possible output from querying a plugin.
#[derive(Debug)]
pub enum PluginQueryOutput {
    None,
    One(ResultItem),
    Multiple(Vec<ResultItem>),
}

impl PluginQueryOutput {
    pub fn extend_into(self, results: &mut Vec<ResultItem>) {
        match self {
            PluginQueryOutput::None => {}
            PluginQueryOutput::One(one) => results.push(one),
            PluginQueryOutput::Multiple(multiple) => results.extend(multiple),
        }
    }

    pub fn into_vec(self) -> Vec<ResultItem> {
        let mut results = Vec::new();
        self.extend_into(&mut results);
        results
    }
}

impl From<ResultItem> for PluginQueryOutput {
    fn from(value: ResultItem) -> Self {
        PluginQueryOutput::One(value)
    }
}

impl From<Vec<ResultItem>> for PluginQueryOutput {
    fn from(value: Vec<ResultItem>) -> Self {
        PluginQueryOutput::Multiple(value)
    }
}

impl From<Option<Vec<ResultItem>>> for PluginQueryOutput {
    fn from(value: Option<Vec<ResultItem>>) -> Self {
        match value {
            Some(value) => PluginQueryOutput::Multiple(value),
            None => PluginQueryOutput::None,
        }
    }
}
