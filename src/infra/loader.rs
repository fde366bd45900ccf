//! Поиск и чтение `config.txt`.
//!
//! Ядро само I/O не делает: текст конфига ему приносит `ConfigSource`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::config::{parse_config, ImagePathResolver};
use crate::domain::GameConfig;
use crate::engine::EngineError;

/// Имя файла конфига по умолчанию.
pub const CONFIG_FILE_NAME: &str = "config.txt";

/// Откуда берётся текст конфига.
pub trait ConfigSource {
    /// `Ok(None)` — конфига нет (это не ошибка I/O, а повод показать «повторить»).
    fn read_config(&self) -> Result<Option<String>, EngineError>;
}

/// Конфиг уже в памяти (тесты, встроенный конфиг).
#[derive(Clone, Debug, Default)]
pub struct StaticConfigSource {
    pub text: Option<String>,
}

impl StaticConfigSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn missing() -> Self {
        Self { text: None }
    }
}

impl ConfigSource for StaticConfigSource {
    fn read_config(&self) -> Result<Option<String>, EngineError> {
        Ok(self.text.clone())
    }
}

/// Конфиг из файла: ищем по списку корней, берём первый найденный.
#[derive(Clone, Debug)]
pub struct FileConfigSource {
    pub file_name: String,
    pub search_roots: Vec<PathBuf>,
}

impl FileConfigSource {
    pub fn new(file_name: impl Into<String>, search_roots: Vec<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            search_roots,
        }
    }

    /// Стандартные места: рядом с бинарником, `resources/`, `public/`, текущий каталог.
    pub fn with_default_roots() -> Self {
        Self::new(CONFIG_FILE_NAME, default_search_roots())
    }
}

impl ConfigSource for FileConfigSource {
    fn read_config(&self) -> Result<Option<String>, EngineError> {
        match locate_asset(&self.file_name, &self.search_roots) {
            Some(path) => Ok(Some(fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

/// Список корней для поиска ассетов по умолчанию.
pub fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir.join("resources"));
        roots.push(exe_dir);
    }
    if let Ok(cwd) = env::current_dir() {
        roots.push(cwd.join("public"));
        roots.push(cwd);
    }
    roots
}

/// Найти `sub_path` в первом корне, где он существует.
pub fn locate_asset(sub_path: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    debug!("[asset check] searching for {}", sub_path);
    for root in roots {
        let candidate = root.join(sub_path);
        if candidate.is_file() {
            info!("[asset found] {}", candidate.display());
            return Some(candidate);
        }
    }
    error!("[asset not found] {}", sub_path);
    None
}

/// Прочитать и разобрать конфиг.
/// Отсутствующий или пустой конфиг тоже даёт `InvalidConfig`.
pub fn load_game_config(
    source: &dyn ConfigSource,
    resolver: &dyn ImagePathResolver,
) -> Result<GameConfig, EngineError> {
    match source.read_config()? {
        Some(text) if !text.trim().is_empty() => parse_config(&text, resolver),
        _ => Err(EngineError::InvalidConfig),
    }
}
