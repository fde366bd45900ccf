//! Состояние приложения целиком: экраны, конфиг, игровая сессия, тема, звук.
//!
//! Никаких глобальных переменных: всё, что раньше жило «на уровне модуля»,
//! принадлежит `AppState`, а он владеет `SpinSession`.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::{
    build_app_view, build_config_preview, build_session_snapshot, ApiError, Command, Query,
    QueryResponse,
};
use crate::config::{ImagePathResolver, ImagesDirResolver};
use crate::domain::{GameConfig, ThemeId};
use crate::engine::{RandomSource, ReelGeometry, SoundEffects, SpinRequest, SpinSession};
use crate::infra::{
    load_game_config, AssetProbe, AssumeAvailable, ConfigSource, InMemoryThemeStore, SystemRng,
    ThemeStore,
};
use crate::time_ctrl::SpinTimings;

/// Экран приложения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    /// Конфиг читается.
    Loading,
    /// Конфиг не загрузился; доступна только команда `Reload`.
    LoadFailed,
    /// Конфиг загружен, показываем превью действий.
    Preview,
    /// Идёт игра.
    Playing,
}

/// Фабрика звука: новая сессия создаётся на каждый старт игры.
pub type SoundFactory = Box<dyn Fn() -> Box<dyn SoundEffects>>;

pub struct AppState<R: RandomSource = SystemRng> {
    screen: Screen,
    config: Option<GameConfig>,
    session: Option<SpinSession>,

    timings: SpinTimings,
    geometry: ReelGeometry,

    source: Box<dyn ConfigSource>,
    resolver: Box<dyn ImagePathResolver>,
    probe: Box<dyn AssetProbe>,
    theme_store: Box<dyn ThemeStore>,
    sound_factory: Option<SoundFactory>,

    theme: ThemeId,
    muted: bool,
    rng: R,
}

impl<R: RandomSource> AppState<R> {
    /// Новое приложение. Конфиг ещё не прочитан: вызовите `load()`.
    pub fn new(source: Box<dyn ConfigSource>, rng: R) -> Self {
        Self {
            screen: Screen::Loading,
            config: None,
            session: None,
            timings: SpinTimings::standard(),
            geometry: ReelGeometry::desktop(),
            source,
            resolver: Box::new(ImagesDirResolver::default()),
            probe: Box::new(AssumeAvailable),
            theme_store: Box::new(InMemoryThemeStore::new()),
            sound_factory: None,
            theme: ThemeId::default(),
            muted: false,
            rng,
        }
    }

    pub fn with_timings(mut self, timings: SpinTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_geometry(mut self, geometry: ReelGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_resolver(mut self, resolver: Box<dyn ImagePathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_probe(mut self, probe: Box<dyn AssetProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Подключить хранилище темы и сразу применить сохранённую тему.
    pub fn with_theme_store(mut self, store: Box<dyn ThemeStore>) -> Self {
        if let Some(theme) = store.load_theme() {
            self.theme = theme;
        }
        self.theme_store = store;
        self
    }

    pub fn with_sound(mut self, factory: SoundFactory) -> Self {
        self.sound_factory = Some(factory);
        self
    }

    // ---------- чтение ----------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // ---------- загрузка ----------

    /// Прочитать конфиг. При ошибке — экран `LoadFailed`, процесс живёт дальше.
    ///
    /// Перезагрузка заменяет конфиг целиком и завершает текущую партию.
    pub fn load(&mut self) -> Result<(), ApiError> {
        self.screen = Screen::Loading;
        self.session = None;

        match load_game_config(self.source.as_ref(), self.resolver.as_ref()) {
            Ok(config) => {
                info!(
                    "config loaded: `{}`, {} action(s)",
                    config.title,
                    config.len()
                );
                self.config = Some(config);
                self.screen = Screen::Preview;
                Ok(())
            }
            Err(e) => {
                warn!("config load failed: {}", e);
                self.config = None;
                self.screen = Screen::LoadFailed;
                Err(e.into())
            }
        }
    }

    // ---------- команды ----------

    pub fn apply(&mut self, command: Command) -> Result<(), ApiError> {
        match command {
            Command::Reload => self.load(),
            Command::StartGame => self.start_game(),
            Command::Spin => self.spin().map(|_| ()),
            Command::Dismiss => {
                self.session_mut()?.dismiss();
                Ok(())
            }
            Command::Reset => {
                self.session_mut()?.reset();
                Ok(())
            }
            Command::Tick { elapsed_ms } => {
                if let Some(session) = self.session.as_mut() {
                    session.advance(elapsed_ms);
                }
                Ok(())
            }
            Command::Resize { item_extent } => {
                if !(item_extent > 0.0) {
                    return Err(ApiError::InvalidCommand(format!(
                        "item extent must be positive, got {}",
                        item_extent
                    )));
                }
                self.geometry.item_extent = item_extent;
                if let Some(session) = self.session.as_mut() {
                    session.set_item_extent(item_extent);
                }
                Ok(())
            }
            Command::SetTheme(theme) => {
                self.theme = theme;
                self.theme_store.save_theme(theme)?;
                Ok(())
            }
            Command::SetMuted(muted) => {
                self.muted = muted;
                if let Some(session) = self.session.as_mut() {
                    session.set_muted(muted);
                }
                Ok(())
            }
        }
    }

    /// Крутить. Возвращает, чем закончился запрос.
    pub fn spin(&mut self) -> Result<SpinRequest, ApiError> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| ApiError::InvalidCommand("game is not started".into()))?;
        Ok(session.request_spin(&mut self.rng))
    }

    fn start_game(&mut self) -> Result<(), ApiError> {
        if self.screen != Screen::Preview {
            return Err(ApiError::InvalidCommand(format!(
                "cannot start game from {:?}",
                self.screen
            )));
        }
        let config = self.config.clone().ok_or(ApiError::InvalidConfig)?;

        let mut session = SpinSession::new(config, self.timings.clone(), self.geometry.clone())?;
        if let Some(factory) = self.sound_factory.as_ref() {
            session.set_sound(factory());
        }
        session.set_muted(self.muted);

        self.session = Some(session);
        self.screen = Screen::Playing;
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut SpinSession, ApiError> {
        self.session
            .as_mut()
            .ok_or_else(|| ApiError::InvalidCommand("game is not started".into()))
    }

    // ---------- запросы ----------

    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::Snapshot => {
                let session = self
                    .session
                    .as_ref()
                    .ok_or_else(|| ApiError::InvalidCommand("game is not started".into()))?;
                Ok(QueryResponse::Snapshot(build_session_snapshot(
                    session,
                    self.probe.as_ref(),
                )))
            }
            Query::ConfigPreview => {
                let config = self.config.as_ref().ok_or(ApiError::InvalidConfig)?;
                Ok(QueryResponse::ConfigPreview(build_config_preview(
                    config,
                    self.session.as_ref().map(|s| s.pool()),
                    self.probe.as_ref(),
                )))
            }
            Query::Theme => Ok(QueryResponse::Theme(self.theme)),
            Query::AppView => Ok(QueryResponse::AppView(build_app_view(
                self.screen,
                self.config.as_ref(),
                self.session.as_ref(),
                self.theme,
                self.muted,
                self.probe.as_ref(),
            ))),
        }
    }
}
