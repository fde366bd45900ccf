use serde::{Deserialize, Serialize};

use crate::domain::{ActionIndex, Millis, ThemeId};
use crate::engine::{ReelMode, SpinPhase};
use crate::state::Screen;

/// Картинка для отрисовки: либо ссылка, либо заглушка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum ImageRefDto {
    Resolved(String),
    Placeholder,
}

/// DTO одного действия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionDto {
    pub index: ActionIndex,
    pub name: String,
    pub image: ImageRefDto,
    /// Уже выпадало в этой партии (для затемнения ячейки).
    pub used: bool,
}

/// DTO барабана.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReelViewDto {
    pub offset: f64,
    pub item_extent: f64,
    pub mode: ReelMode,
    pub visible_index: ActionIndex,
    pub landed_index: Option<ActionIndex>,
}

/// Снимок игровой сессии. Любой слой отрисовки перерисовывается только из него.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshotDto {
    pub phase: SpinPhase,
    pub selected_index: Option<ActionIndex>,
    pub remaining: usize,
    pub used_count: usize,
    pub total_count: usize,
    pub spins_completed: u32,
    pub can_spin: bool,
    pub caption_visible: bool,
    pub fullscreen_visible: bool,
    /// Выпавшее действие (когда есть выбор).
    pub selected_action: Option<ActionDto>,
    pub reels: Vec<ReelViewDto>,
    pub now_ms: Millis,
}

/// DTO экрана превью конфига.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigPreviewDto {
    pub title: String,
    pub action_count: usize,
    pub actions: Vec<ActionDto>,
}

/// Всё приложение целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppViewDto {
    pub screen: Screen,
    pub title: Option<String>,
    pub theme: ThemeId,
    pub muted: bool,
    pub session: Option<SessionSnapshotDto>,
}
