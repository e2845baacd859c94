use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the cluster scheduler's REST API and event stream live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL serving both the REST endpoints and `/events`.
    #[serde(default = "default_base")]
    pub default_base: String,
}

fn default_base() -> String {
    "http://127.0.0.1:9999".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            default_base: default_base(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
        }
    }
}

impl Config {
    /// Base URL with any trailing slash removed, so path templates can be
    /// appended without producing `//`.
    pub fn base_url(&self) -> String {
        self.backend.default_base.trim_end_matches('/').to_string()
    }
}
