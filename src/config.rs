//! Runtime configuration passed from the host page as a JSON object.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where the word catalog is fetched from.
    pub catalog_url: String,
    /// Id of the container the game renders into; created under `<body>` if missing.
    pub root_id: String,
    /// Pause after a correct pick before the next word.
    pub advance_delay_ms: i32,
    /// Length of the frog's fall before the end screen.
    pub fall_delay_ms: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_url: "words.json".into(),
            root_id: "frog-crossing".into(),
            advance_delay_ms: 600,
            fall_delay_ms: 1500,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) config. Missing keys keep their defaults;
    /// an unparsable object falls back to the defaults entirely.
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("ignoring bad game config: {e}");
            Self::default()
        })
    }
}
