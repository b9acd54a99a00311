use serde::Deserialize;
use serde::Serialize;

/// Query string shared by every player-facing route.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlayerQuery {
    #[serde(default, alias = "user")]
    pub player: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PlayerQuery {
    /// Trimmed player name, if one was given.
    pub fn player(&self) -> Option<&str> {
        self.player
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
