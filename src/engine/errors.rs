use crate::domain::ActionIndex;

use thiserror::Error;

/// Ошибки движка слот-машины.
///
/// Все они восстановимы действием пользователя, ни одна не фатальна для процесса.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("В конфиге не найдено ни одного корректного действия")]
    InvalidConfig,

    #[error("Все действия уже выпали, нужен сброс")]
    Exhausted,

    #[error("Картинка недоступна: {0}")]
    AssetUnavailable(String),

    #[error("Действия с индексом {0} нет в пуле")]
    ActionOutOfRange(ActionIndex),

    #[error("Действие {0} уже использовано")]
    AlreadyUsed(ActionIndex),

    #[error("Некорректные тайминги: {0}")]
    InvalidTimings(&'static str),

    #[error("Некорректная геометрия барабана: {0}")]
    InvalidGeometry(&'static str),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}
