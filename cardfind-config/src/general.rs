use serde::{Deserialize, Serialize};

/// General configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Max number of results to show per query.
    ///
    /// Default: `24`
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    24
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}
