use serde::{Deserialize, Serialize};

use crate::domain::{ActionIndex, GameConfig, ThemeId};
use crate::engine::{ActionPool, ReelAnimator, SpinSession};
use crate::infra::AssetProbe;

use super::dto::{ActionDto, AppViewDto, ConfigPreviewDto, ImageRefDto, ReelViewDto, SessionSnapshotDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Снимок игровой сессии.
    Snapshot,

    /// Превью загруженного конфига.
    ConfigPreview,

    /// Текущая тема.
    Theme,

    /// Всё приложение.
    AppView,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Snapshot(SessionSnapshotDto),
    ConfigPreview(ConfigPreviewDto),
    Theme(ThemeId),
    AppView(AppViewDto),
}

/// Ссылка на картинку или заглушка, если картинка недоступна.
pub fn image_ref(image: &str, probe: &dyn AssetProbe) -> ImageRefDto {
    match probe.probe(image) {
        Ok(()) => ImageRefDto::Resolved(image.to_string()),
        Err(e) => {
            log::warn!("{}", e);
            ImageRefDto::Placeholder
        }
    }
}

fn build_action_dto(
    config: &GameConfig,
    index: ActionIndex,
    pool: Option<&ActionPool>,
    probe: &dyn AssetProbe,
) -> Option<ActionDto> {
    let action = config.action(index)?;
    Some(ActionDto {
        index,
        name: action.name.clone(),
        image: image_ref(&action.image, probe),
        used: pool.map(|p| p.is_used(index)).unwrap_or(false),
    })
}

fn build_reel_view(reel: &ReelAnimator) -> ReelViewDto {
    ReelViewDto {
        offset: reel.offset(),
        item_extent: reel.geometry().item_extent,
        mode: reel.mode(),
        visible_index: reel.visible_index(),
        landed_index: reel.landed_index(),
    }
}

/// Сформировать снимок сессии.
pub fn build_session_snapshot(session: &SpinSession, probe: &dyn AssetProbe) -> SessionSnapshotDto {
    let pool = session.pool();
    let selected_index = session.selected_index();

    SessionSnapshotDto {
        phase: session.phase(),
        selected_index,
        remaining: pool.remaining(),
        used_count: pool.used_count(),
        total_count: pool.total_count(),
        spins_completed: session.spins_completed(),
        can_spin: session.can_spin(),
        caption_visible: session.caption_visible(),
        fullscreen_visible: session.fullscreen_visible(),
        selected_action: selected_index
            .and_then(|i| build_action_dto(session.config(), i, Some(pool), probe)),
        reels: session.reels().iter().map(build_reel_view).collect(),
        now_ms: session.now(),
    }
}

/// Сформировать превью конфига. `pool` — если игра уже идёт.
pub fn build_config_preview(
    config: &GameConfig,
    pool: Option<&ActionPool>,
    probe: &dyn AssetProbe,
) -> ConfigPreviewDto {
    ConfigPreviewDto {
        title: config.title.clone(),
        action_count: config.len(),
        actions: (0..config.len())
            .filter_map(|i| build_action_dto(config, i, pool, probe))
            .collect(),
    }
}

/// Сформировать вид приложения целиком.
pub fn build_app_view(
    screen: crate::state::Screen,
    config: Option<&GameConfig>,
    session: Option<&SpinSession>,
    theme: ThemeId,
    muted: bool,
    probe: &dyn AssetProbe,
) -> AppViewDto {
    AppViewDto {
        screen,
        title: config.map(|c| c.title.clone()),
        theme,
        muted,
        session: session.map(|s| build_session_snapshot(s, probe)),
    }
}
