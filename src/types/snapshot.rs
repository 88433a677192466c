use serde::{Deserialize, Serialize};

use crate::filter::Searchable;

// ---------------------------------------------------------------------------
// Settings snapshot: the data the settings surface is rendered from
// ---------------------------------------------------------------------------

/// An executable known to the tracker and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub name: String,
    pub is_game: bool,
    /// Set when the classification came from the user rather than the classifier.
    #[serde(default)]
    pub user_marked: bool,
}

impl Searchable for AppEntry {
    fn search_key(&self) -> &str {
        &self.name
    }
}

/// A per-application daily time limit, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLimitEntry {
    pub exe_name: String,
    pub max_time: u32,
    #[serde(default)]
    pub notify_limit: Option<u32>,
}

impl Searchable for TimeLimitEntry {
    fn search_key(&self) -> &str {
        &self.exe_name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
    #[serde(default)]
    pub time_limit_settings: Vec<TimeLimitEntry>,
    #[serde(default)]
    pub global_timing_limit: u32,
}

impl SettingsSnapshot {
    /// Games first, then case-insensitive name order.
    pub fn sort_apps(&mut self) {
        self.apps
            .sort_by_cached_key(|app| (!app.is_game, app.name.to_lowercase()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(name: &str, is_game: bool) -> AppEntry {
        AppEntry {
            name: name.to_owned(),
            is_game,
            user_marked: false,
        }
    }

    #[test]
    fn games_sort_before_other_apps() {
        let mut snapshot = SettingsSnapshot {
            apps: vec![
                app("zoom.exe", false),
                app("Witcher3.exe", true),
                app("Code.exe", false),
                app("celeste.exe", true),
            ],
            ..SettingsSnapshot::default()
        };
        snapshot.sort_apps();
        let names: Vec<&str> = snapshot.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["celeste.exe", "Witcher3.exe", "Code.exe", "zoom.exe"]
        );
    }

    #[test]
    fn snapshot_parses_backend_shape() {
        let json = r#"{
            "apps": [{"name": "steam.exe", "is_game": true, "user_marked": false}],
            "time_limit_settings": [{"exe_name": "steam.exe", "max_time": 60, "notify_limit": null}],
            "global_timing_limit": 120
        }"#;
        let snapshot: SettingsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.apps.len(), 1);
        assert_eq!(snapshot.time_limit_settings[0].max_time, 60);
        assert_eq!(snapshot.global_timing_limit, 120);
    }

    #[test]
    fn missing_fields_default() {
        let snapshot: SettingsSnapshot =
            serde_json::from_str(r#"{"apps": [{"name": "a.exe", "is_game": false}]}"#).unwrap();
        assert!(!snapshot.apps[0].user_marked);
        assert!(snapshot.time_limit_settings.is_empty());
        assert_eq!(snapshot.global_timing_limit, 0);
    }
}
