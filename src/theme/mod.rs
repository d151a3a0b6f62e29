//! Light/dark theme preference
//!
//! The chosen theme is stored under a single key. Until the reader picks
//! one, the environment's color scheme decides.

mod preferences;

pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key the theme preference is stored under
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon of the toggle button: it shows the theme you would switch to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    /// The terminal's color scheme, from `COLORFGBG`; light when unknown
    pub fn detect_system() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
            .unwrap_or(Theme::Light)
    }

    /// Parse a `COLORFGBG` value such as `15;0` or `0;default;15`
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match background {
            0..=6 | 8 => Some(Theme::Dark),
            _ => Some(Theme::Light),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("Unknown theme: {}. Available: light, dark", other),
        }
    }
}

/// Tracks the active theme and persists the reader's choice
pub struct ThemeManager<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Start from the stored preference, or `system` when there is none
    pub fn new(store: S, system: Theme) -> Self {
        let stored = Self::stored_theme(&store);
        let current = stored.unwrap_or(system);
        tracing::debug!(
            "Theme manager initialized: {} (stored: {:?}, system: {})",
            current,
            stored,
            system
        );
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch between light and dark and remember the choice
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.current = next;
        tracing::info!("Theme toggled: {}", next);
        Ok(next)
    }

    /// Follow a change of the environment's scheme unless the reader chose one
    pub fn on_system_change(&mut self, system: Theme) -> Theme {
        if Self::stored_theme(&self.store).is_none() {
            self.current = system;
            tracing::info!("Following system theme: {}", system);
        }
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn stored_theme(store: &S) -> Option<Theme> {
        let value = store.get(THEME_KEY)?;
        match value.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_from_system_light() {
        let mut manager = ThemeManager::new(MemoryPreferences::new(), Theme::Light);
        assert_eq!(manager.current(), Theme::Light);

        assert_eq!(manager.toggle().unwrap(), Theme::Dark);
        assert_eq!(manager.store().get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(manager.toggle().unwrap(), Theme::Light);
        assert_eq!(manager.store().get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_stored_preference_wins_over_system() {
        let mut store = MemoryPreferences::new();
        store.set(THEME_KEY, "dark").unwrap();
        let manager = ThemeManager::new(store, Theme::Light);
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn test_invalid_stored_value_falls_back_to_system() {
        let mut store = MemoryPreferences::new();
        store.set(THEME_KEY, "sepia").unwrap();
        let manager = ThemeManager::new(store, Theme::Dark);
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn test_system_change_only_without_preference() {
        let mut manager = ThemeManager::new(MemoryPreferences::new(), Theme::Light);
        assert_eq!(manager.on_system_change(Theme::Dark), Theme::Dark);

        manager.toggle().unwrap();
        assert_eq!(manager.current(), Theme::Light);
        assert_eq!(manager.on_system_change(Theme::Dark), Theme::Light);
    }

    #[test]
    fn test_icons() {
        assert_eq!(Theme::Dark.icon(), "☀️");
        assert_eq!(Theme::Light.icon(), "🌙");
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(Theme::from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg("0;default;15"), Some(Theme::Light));
        assert_eq!(Theme::from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
    }
}
