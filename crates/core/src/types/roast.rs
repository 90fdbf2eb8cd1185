//! Coffee roast levels.

use serde::{Deserialize, Serialize};

/// Error returned when a roast level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid roast level: {0}")]
pub struct RoastLevelError(pub String);

/// How dark a coffee is roasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
}

impl RoastLevel {
    /// All roast levels, lightest first.
    pub const ALL: [Self; 3] = [Self::Light, Self::Medium, Self::Dark];

    /// Display name, e.g. `"Medium"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Dark => "Dark",
        }
    }

    /// Lowercase form used in URLs and forms, e.g. `"medium"`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RoastLevel {
    type Err = RoastLevelError;

    /// Parses case-insensitively: `"Light"`, `"light"` and `"LIGHT"` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoastLevelError(s.to_string()))
    }
}
