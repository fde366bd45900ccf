//! Идентификаторы тем оформления.
//!
//! Цвета и градиенты живут в слое отрисовки; движку нужен только id,
//! который переживает перезапуск (см. `infra::persistence`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ключ, под которым выбранная тема хранится в key-value хранилище.
pub const THEME_STORAGE_KEY: &str = "kissCamTheme";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Romantic,
    Midnight,
    Cyberpunk,
    Aurora,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Romantic,
        ThemeId::Midnight,
        ThemeId::Cyberpunk,
        ThemeId::Aurora,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Romantic => "romantic",
            ThemeId::Midnight => "midnight",
            ThemeId::Cyberpunk => "cyberpunk",
            ThemeId::Aurora => "aurora",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Неизвестный id темы (например, из старой версии хранилища).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
