//! Хранение выбранной темы: единственное, что переживает перезапуск.
//!
//! Состояние пула и сессии не сохраняется никогда.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;
use serde_json::{Map, Value};

use crate::domain::{ThemeId, THEME_STORAGE_KEY};
use crate::engine::EngineError;

/// Абстракция key-value хранилища темы.
pub trait ThemeStore {
    /// Загрузить сохранённую тему. `None`, если ничего нет или id неизвестен.
    fn load_theme(&self) -> Option<ThemeId>;

    /// Сохранить тему.
    fn save_theme(&mut self, theme: ThemeId) -> Result<(), EngineError>;
}

/// In-memory реализация для тестов и браузероподобных оболочек.
#[derive(Debug, Default)]
pub struct InMemoryThemeStore {
    entries: HashMap<String, String>,
}

impl InMemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сырое значение по ключу (как в localStorage).
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl ThemeStore for InMemoryThemeStore {
    fn load_theme(&self) -> Option<ThemeId> {
        self.raw(THEME_STORAGE_KEY)?.parse().ok()
    }

    fn save_theme(&mut self, theme: ThemeId) -> Result<(), EngineError> {
        self.set_raw(THEME_STORAGE_KEY, theme.as_str());
        Ok(())
    }
}

/// Хранилище в JSON-файле: объект `{ "kissCamTheme": "midnight", ... }`.
///
/// Другие ключи (любого JSON-типа) сохраняются как есть. Файл, который не
/// разобрался как JSON-объект, не перезаписывается: `save_theme` вернёт ошибку.
#[derive(Debug, Clone)]
pub struct JsonFileThemeStore {
    path: PathBuf,
}

impl JsonFileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Прочитать файл целиком. Отсутствующий файл = пустой объект.
    fn read_entries(&self) -> Result<Map<String, Value>, EngineError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        let entries = serde_json::from_str(&text).map_err(io::Error::from)?;
        Ok(entries)
    }
}

impl ThemeStore for JsonFileThemeStore {
    fn load_theme(&self) -> Option<ThemeId> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("theme store {:?} is unreadable: {}", self.path, e);
                return None;
            }
        };
        let raw = entries.get(THEME_STORAGE_KEY)?.as_str()?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!("unknown theme id `{}` in {:?}", raw, self.path);
                None
            }
        }
    }

    fn save_theme(&mut self, theme: ThemeId) -> Result<(), EngineError> {
        let mut entries = self.read_entries()?;
        entries.insert(
            THEME_STORAGE_KEY.to_string(),
            Value::String(theme.as_str().to_string()),
        );
        let text = serde_json::to_string_pretty(&entries).map_err(io::Error::from)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
