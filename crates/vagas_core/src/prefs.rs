use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

const THEME_KEY: &str = "theme";
const VIEW_MODE_KEY: &str = "view_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Compact,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Compact => "compact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cards" => Some(ViewMode::Cards),
            "compact" => Some(ViewMode::Compact),
            _ => None,
        }
    }
}

/// Display preferences persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub view_mode: ViewMode,
}

impl Preferences {
    /// Unknown or missing stored values fall back to the defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            theme: store
                .get(THEME_KEY)
                .and_then(|value| Theme::parse(&value))
                .unwrap_or_default(),
            view_mode: store
                .get(VIEW_MODE_KEY)
                .and_then(|value| ViewMode::parse(&value))
                .unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set(THEME_KEY, self.theme.as_str());
        store.set(VIEW_MODE_KEY, self.view_mode.as_str());
    }
}
