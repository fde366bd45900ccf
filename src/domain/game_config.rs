use serde::{Deserialize, Serialize};

use super::{Action, ActionIndex};

/// Заголовок, если в конфиге нет строки `title=`.
pub const DEFAULT_TITLE: &str = "🎰 Kiss Cam 拉霸機 💕";

/// Конфиг одной игры.
///
/// Собирается один раз при загрузке и при перезагрузке заменяется целиком,
/// на месте не мутируется. Если парсинг прошёл успешно — `actions` не пустой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub title: String,
    pub actions: Vec<Action>,
}

impl GameConfig {
    pub fn new(title: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            title: title.into(),
            actions,
        }
    }

    /// Сколько всего действий.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn action(&self, index: ActionIndex) -> Option<&Action> {
        self.actions.get(index)
    }
}
