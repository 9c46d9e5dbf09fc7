//! Theme preference and the side channel that applies it.

use serde::{Deserialize, Serialize};

/// Dark/light display preference. Light is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreference {
    pub is_dark_mode: bool,
}

impl ThemePreference {
    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.is_dark_mode)
    }
}

/// Visual mode pushed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}', expected 'light' or 'dark'")),
        }
    }
}

/// Consumer of theme notifications ("enter dark mode" / "exit dark mode").
///
/// The store calls this after every theme change and once from
/// `initialize_theme`. Implementations must not call back into the store.
pub trait ThemeApplier: Send + Sync {
    fn apply(&self, mode: ThemeMode);
}

/// Applier for headless use; drops every notification.
#[derive(Debug, Clone, Default)]
pub struct NoopThemeApplier;

impl ThemeApplier for NoopThemeApplier {
    fn apply(&self, _mode: ThemeMode) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        assert_eq!(ThemePreference::default().mode(), ThemeMode::Light);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_from_dark() {
        assert!(ThemeMode::from_dark(true).is_dark());
        assert_eq!(ThemeMode::from_dark(false).as_str(), "light");
    }
}
