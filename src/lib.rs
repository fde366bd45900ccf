//! Движок «фото-слот-машины» для вечеринок.
//!
//! Список действий (имя + картинка) загружается из текстового конфига,
//! игроки крутят три барабана, барабаны останавливаются на ещё не выпавшем
//! действии, оно показывается во весь экран и помечается использованным.
//!
//! Слои:
//! - `domain`: действия, конфиг игры, темы;
//! - `config`: парсер конфига и стратегии разрешения путей к картинкам;
//! - `engine`: пул действий, барабаны, машина состояний спина;
//! - `time_ctrl`: виртуальный планировщик и тайминги фаз;
//! - `infra`: RNG, загрузка файлов, звук, хранение темы;
//! - `api`: команды / запросы / DTO для любого слоя отрисовки;
//! - `state`: состояние приложения целиком (экраны, тема, звук).

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;
pub mod time_ctrl;

pub use crate::state::AppState;
