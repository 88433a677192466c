use serde::Deserialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => Color::parse(&s, "<theme>")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub defaults: Defaults,
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Scheme, host and port of the screen-time service.
    pub base_url: String,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            timeout_secs: 10,
            endpoints: Endpoints::default(),
        }
    }
}

/// Paths of the backend endpoints, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// JSON snapshot of the settings page data. The stock dashboard only
    /// serves `/settings` as HTML, so the backend must expose this route
    /// (or `--stub` must be used).
    pub snapshot: String,
    pub update_classification: String,
    pub update_global_limit: String,
    pub update_time_limit: String,
    pub refresh_time_limits: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            snapshot: "/api/settings".to_owned(),
            update_classification: "/api/update_exe_classification".to_owned(),
            update_global_limit: "/api/update_global_timing".to_owned(),
            update_time_limit: "/api/update_time_limit".to_owned(),
            refresh_time_limits: "/api/refresh_time_limit_list".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Section shown when none is requested on the command line.
    pub section: Option<String>,
    /// Path of the settings page, used to build the location shown in the footer.
    pub settings_path: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            section: None,
            settings_path: "/settings".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub primary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub secondary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub success: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub warning: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub error: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub accent: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub border: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub selected_bg: Option<Color>,
}
