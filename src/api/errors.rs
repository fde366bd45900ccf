use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём слою отрисовки).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Конфиг не загрузился — показать экран «повторить».
    InvalidConfig,

    /// Команда не может быть выполнена на текущем экране.
    InvalidCommand(String),

    /// Ошибка движка.
    EngineError(String),

    /// Внутренняя ошибка.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfig => ApiError::InvalidConfig,
            other => ApiError::EngineError(other.to_string()),
        }
    }
}
