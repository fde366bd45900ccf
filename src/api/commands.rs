use serde::{Deserialize, Serialize};

use crate::domain::{Millis, ThemeId};

/// Команда верхнего уровня (клик, таймер кадра, смена настроек).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Перечитать конфиг (кнопка «повторить» на экране ошибки).
    Reload,

    /// С экрана превью перейти к игре.
    StartGame,

    /// Крутить.
    Spin,

    /// Закрыть полноэкранный показ.
    Dismiss,

    /// Сбросить партию.
    Reset,

    /// Прошло `elapsed_ms` миллисекунд (кадровый колбэк).
    Tick { elapsed_ms: Millis },

    /// Поменять размер ячейки барабанов (ресайз окна).
    Resize { item_extent: f64 },

    /// Выбрать тему оформления.
    SetTheme(ThemeId),

    /// Включить / выключить звук.
    SetMuted(bool),
}
