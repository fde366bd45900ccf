//! Проверка картинок в момент отрисовки.
//!
//! Недоступная картинка не блокирует машину состояний: слой отрисовки
//! получает заглушку.

use std::path::PathBuf;

use crate::config::LOCAL_PROTOCOL_PREFIX;
use crate::engine::EngineError;

pub trait AssetProbe {
    fn probe(&self, image: &str) -> Result<(), EngineError>;
}

/// Считает доступным всё (браузер сам разберётся, тесты).
#[derive(Clone, Debug, Default)]
pub struct AssumeAvailable;

impl AssetProbe for AssumeAvailable {
    fn probe(&self, _image: &str) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Проверяет локальные картинки на диске относительно `base_dir`.
/// Удалённые URL без сети проверить нельзя, считаем доступными.
#[derive(Clone, Debug)]
pub struct FsAssetProbe {
    pub base_dir: PathBuf,
}

impl FsAssetProbe {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl AssetProbe for FsAssetProbe {
    fn probe(&self, image: &str) -> Result<(), EngineError> {
        if image.starts_with("http") {
            return Ok(());
        }
        let local = image.strip_prefix(LOCAL_PROTOCOL_PREFIX).unwrap_or(image);
        if self.base_dir.join(local).is_file() {
            Ok(())
        } else {
            Err(EngineError::AssetUnavailable(image.to_string()))
        }
    }
}
