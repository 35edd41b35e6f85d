//! Display preferences.

use crate::repo::kv_repo::{KeyValueStore, StoreResult, THEME_KEY};
use log::warn;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`; expected light|dark")),
        }
    }
}

pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored theme. Only an explicit `"light"` selects the light theme.
    pub fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) if value == Theme::Light.as_str() => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(err) => {
                warn!("event=theme_read module=repo status=error error={}", err);
                Theme::Dark
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> StoreResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> StoreResult<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
