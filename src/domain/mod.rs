//! Доменная модель слот-машины: действия, конфиг игры, темы оформления.

pub mod action;
pub mod game_config;
pub mod theme;

/// Индекс действия в упорядоченном списке конфига.
/// Это и есть «идентичность» действия: имена могут повторяться.
pub type ActionIndex = usize;

/// Время виртуальных часов в миллисекундах.
pub type Millis = u64;

pub use action::*;
pub use game_config::*;
pub use theme::*;
