//! Тесты внешнего API: `AppState` + команды + запросы + DTO.
//!
//! Сценарии:
//! - загрузка конфига → превью → игра → спин → показ → закрытие;
//! - ошибка загрузки и «повторить»;
//! - тема и звук;
//! - заглушки для недоступных картинок.

use std::cell::RefCell;
use std::rc::Rc;

use photo_slot_engine::api::{ApiError, Command, ImageRefDto, Query, QueryResponse, SessionSnapshotDto};
use photo_slot_engine::domain::{ThemeId, THEME_STORAGE_KEY};
use photo_slot_engine::engine::{EngineError, SoundEffects, SpinPhase, SpinRequest};
use photo_slot_engine::infra::{
    AssetProbe, ConfigSource, DeterministicRng, InMemoryThemeStore, StaticConfigSource,
};
use photo_slot_engine::state::Screen;
use photo_slot_engine::time_ctrl::SpinTimings;
use photo_slot_engine::AppState;

const DEMO: &str = "title=Demo\naction1=Hug,hug.png\naction2=Wink,wink.png";

fn app(text: &str) -> AppState<DeterministicRng> {
    AppState::new(
        Box::new(StaticConfigSource::new(text)),
        DeterministicRng::from_seed(42),
    )
}

fn snapshot(app: &AppState<DeterministicRng>) -> SessionSnapshotDto {
    match app.query(Query::Snapshot) {
        Ok(QueryResponse::Snapshot(s)) => s,
        other => panic!("unexpected snapshot response: {:?}", other),
    }
}

/// Источник конфига, содержимое которого можно поменять снаружи.
#[derive(Clone, Default)]
struct SharedSource {
    text: Rc<RefCell<Option<String>>>,
}

impl ConfigSource for SharedSource {
    fn read_config(&self) -> Result<Option<String>, EngineError> {
        Ok(self.text.borrow().clone())
    }
}

/// Считает недоступной одну конкретную картинку.
struct MissingImage(&'static str);

impl AssetProbe for MissingImage {
    fn probe(&self, image: &str) -> Result<(), EngineError> {
        if image == self.0 {
            Err(EngineError::AssetUnavailable(image.to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Default)]
struct CountingSound {
    cues: Rc<RefCell<u32>>,
}

impl SoundEffects for CountingSound {
    fn on_spin_start(&mut self) {
        *self.cues.borrow_mut() += 1;
    }
    fn on_spin_stop(&mut self) {
        *self.cues.borrow_mut() += 1;
    }
    fn on_reveal(&mut self) {
        *self.cues.borrow_mut() += 1;
    }
    fn on_exhausted(&mut self) {
        *self.cues.borrow_mut() += 1;
    }
}

//
// TEST 1 — загрузка → превью
//
#[test]
fn load_shows_preview() {
    let mut app = app(DEMO);
    assert_eq!(app.screen(), Screen::Loading);

    app.load().expect("demo config loads");
    assert_eq!(app.screen(), Screen::Preview);

    match app.query(Query::ConfigPreview).unwrap() {
        QueryResponse::ConfigPreview(p) => {
            assert_eq!(p.title, "Demo");
            assert_eq!(p.action_count, 2);
            assert_eq!(p.actions[0].name, "Hug");
            assert_eq!(p.actions[0].image, ImageRefDto::Resolved("images/hug.png".into()));
            assert!(p.actions.iter().all(|a| !a.used));
        }
        other => panic!("unexpected response: {:?}", other),
    }

    assert!(matches!(
        app.query(Query::Snapshot),
        Err(ApiError::InvalidCommand(_))
    ));
}

//
// TEST 2 — полный цикл через команды
//
#[test]
fn full_round_via_commands() {
    let mut app = app(DEMO);
    app.load().unwrap();

    assert!(app.spin().is_err(), "cannot spin before game starts");
    app.apply(Command::StartGame).unwrap();
    assert_eq!(app.screen(), Screen::Playing);

    assert_eq!(app.spin().unwrap(), SpinRequest::Started);
    assert_eq!(app.spin().unwrap(), SpinRequest::Busy);

    let total = SpinTimings::standard().spin_to_fullscreen_ms();
    app.apply(Command::Tick { elapsed_ms: total }).unwrap();

    let snap = snapshot(&app);
    assert_eq!(snap.phase, SpinPhase::Fullscreen);
    assert!(snap.fullscreen_visible);
    assert_eq!(snap.used_count, 1);
    assert_eq!(snap.remaining, 1);
    assert_eq!(snap.now_ms, total);
    let selected = snap.selected_action.as_ref().expect("selected action in fullscreen");
    assert_eq!(Some(selected.index), snap.selected_index);
    assert!(selected.used);
    assert!(snap.reels.iter().all(|r| r.landed_index == snap.selected_index));

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Fullscreen\""));
    assert!(json.contains("\"kind\":\"resolved\""));

    app.apply(Command::Dismiss).unwrap();
    assert_eq!(snapshot(&app).phase, SpinPhase::Idle);

    app.apply(Command::Reset).unwrap();
    let snap = snapshot(&app);
    assert_eq!(snap.remaining, 2);
    assert_eq!(snap.spins_completed, 0);
    assert!(snap.can_spin);
}

//
// TEST 3 — ошибка загрузки и «повторить»
//
#[test]
fn load_failure_then_retry() {
    let source = SharedSource::default();
    let mut app = AppState::new(Box::new(source.clone()), DeterministicRng::from_seed(1));

    assert_eq!(app.load(), Err(ApiError::InvalidConfig));
    assert_eq!(app.screen(), Screen::LoadFailed);
    assert!(app.config().is_none());
    assert!(matches!(
        app.apply(Command::StartGame),
        Err(ApiError::InvalidCommand(_))
    ));
    assert_eq!(app.query(Query::ConfigPreview), Err(ApiError::InvalidConfig));

    *source.text.borrow_mut() = Some("title=Only title".into());
    assert_eq!(app.apply(Command::Reload), Err(ApiError::InvalidConfig));
    assert_eq!(app.screen(), Screen::LoadFailed);

    *source.text.borrow_mut() = Some(DEMO.into());
    app.apply(Command::Reload).unwrap();
    assert_eq!(app.screen(), Screen::Preview);
    assert_eq!(app.config().map(|c| c.len()), Some(2));
}

//
// TEST 4 — перезагрузка во время игры завершает партию
//
#[test]
fn reload_discards_running_session() {
    let mut app = app(DEMO);
    app.load().unwrap();
    app.apply(Command::StartGame).unwrap();
    app.spin().unwrap();
    app.apply(Command::Tick { elapsed_ms: 1_000 }).unwrap();

    app.apply(Command::Reload).unwrap();
    assert_eq!(app.screen(), Screen::Preview);
    assert!(app.session().is_none());

    // Tick без сессии — просто no-op.
    app.apply(Command::Tick { elapsed_ms: 10_000 }).unwrap();
}

//
// TEST 5 — тема сохраняется и восстанавливается
//
#[test]
fn theme_is_loaded_and_saved() {
    let mut store = InMemoryThemeStore::new();
    store.set_raw(THEME_STORAGE_KEY, "cyberpunk");

    let mut app = app(DEMO).with_theme_store(Box::new(store));
    assert_eq!(app.theme(), ThemeId::Cyberpunk);

    app.apply(Command::SetTheme(ThemeId::Aurora)).unwrap();
    assert_eq!(app.theme(), ThemeId::Aurora);
    assert_eq!(app.query(Query::Theme), Ok(QueryResponse::Theme(ThemeId::Aurora)));
}

//
// TEST 6 — неизвестный id темы → тема по умолчанию
//
#[test]
fn unknown_stored_theme_falls_back_to_default() {
    let mut store = InMemoryThemeStore::new();
    store.set_raw(THEME_STORAGE_KEY, "sepia");
    let app = app(DEMO).with_theme_store(Box::new(store));
    assert_eq!(app.theme(), ThemeId::Romantic);
}

//
// TEST 7 — mute применяется и к уже идущей, и к новой сессии
//
#[test]
fn mute_applies_to_sessions() {
    let sound = CountingSound::default();
    let cues = sound.cues.clone();

    let mut app = app(DEMO).with_sound(Box::new(move || {
        Box::new(sound.clone()) as Box<dyn SoundEffects>
    }));
    app.load().unwrap();
    app.apply(Command::StartGame).unwrap();

    app.spin().unwrap();
    assert_eq!(*cues.borrow(), 1);

    app.apply(Command::SetMuted(true)).unwrap();
    assert!(app.is_muted());
    app.apply(Command::Tick { elapsed_ms: 20_000 }).unwrap();
    assert_eq!(*cues.borrow(), 1, "muted session must stay silent");

    app.apply(Command::Reload).unwrap();
    app.apply(Command::StartGame).unwrap();
    app.spin().unwrap();
    assert_eq!(*cues.borrow(), 1, "new session inherits mute");
}

//
// TEST 8 — недоступная картинка → заглушка, игра продолжается
//
#[test]
fn missing_image_renders_placeholder() {
    let mut app = app(DEMO).with_probe(Box::new(MissingImage("images/wink.png")));
    app.load().unwrap();

    let QueryResponse::ConfigPreview(preview) = app.query(Query::ConfigPreview).unwrap() else {
        panic!("expected config preview");
    };
    assert_eq!(preview.actions[0].image, ImageRefDto::Resolved("images/hug.png".into()));
    assert_eq!(preview.actions[1].image, ImageRefDto::Placeholder);

    app.apply(Command::StartGame).unwrap();
    for _ in 0..2 {
        assert_eq!(app.spin().unwrap(), SpinRequest::Started);
        app.apply(Command::Tick { elapsed_ms: 9_400 }).unwrap();
        assert_eq!(snapshot(&app).phase, SpinPhase::Fullscreen);
        app.apply(Command::Dismiss).unwrap();
    }
    assert_eq!(app.spin().unwrap(), SpinRequest::Exhausted);
}

//
// TEST 9 — ресайз
//
#[test]
fn resize_validates_and_propagates() {
    let mut app = app(DEMO);
    app.load().unwrap();
    app.apply(Command::StartGame).unwrap();

    assert!(matches!(
        app.apply(Command::Resize { item_extent: 0.0 }),
        Err(ApiError::InvalidCommand(_))
    ));
    app.apply(Command::Resize { item_extent: 208.0 }).unwrap();
    assert!(snapshot(&app).reels.iter().all(|r| r.item_extent == 208.0));
}

//
// TEST 10 — вид приложения целиком
//
#[test]
fn app_view_reflects_screen() {
    let mut app = app(DEMO);
    let QueryResponse::AppView(view) = app.query(Query::AppView).unwrap() else {
        panic!("expected app view");
    };
    assert_eq!(view.screen, Screen::Loading);
    assert!(view.title.is_none());
    assert!(view.session.is_none());

    app.load().unwrap();
    app.apply(Command::StartGame).unwrap();
    let QueryResponse::AppView(view) = app.query(Query::AppView).unwrap() else {
        panic!("expected app view");
    };
    assert_eq!(view.screen, Screen::Playing);
    assert_eq!(view.title.as_deref(), Some("Demo"));
    assert_eq!(view.theme, ThemeId::Romantic);
    assert!(!view.muted);
    assert_eq!(view.session.map(|s| s.phase), Some(SpinPhase::Idle));
}

//
// TEST 11 — ошибки движка конвертируются в ApiError
//
#[test]
fn engine_errors_map_to_api_errors() {
    assert_eq!(ApiError::from(EngineError::InvalidConfig), ApiError::InvalidConfig);
    assert!(matches!(
        ApiError::from(EngineError::Exhausted),
        ApiError::EngineError(_)
    ));
}
