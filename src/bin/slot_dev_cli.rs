// src/bin/slot_dev_cli.rs
//
// Dev-CLI: читает config.txt, крутит слот-машину до исчерпания пула
// и печатает фазы / барабаны в терминал.
//
// Использование:
//   slot_dev_cli [КАТАЛОГ_С_CONFIG] [--classic] [--seed N] [--fast]

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;

use photo_slot_engine::api::{Command, Query, QueryResponse, SessionSnapshotDto};
use photo_slot_engine::engine::{SoundEffects, SpinPhase, SpinRequest};
use photo_slot_engine::infra::{
    default_search_roots, DeterministicRng, FileConfigSource, LogSound, CONFIG_FILE_NAME,
};
use photo_slot_engine::time_ctrl::{SpinTimings, TimeProfile};
use photo_slot_engine::AppState;

/// Шаг виртуального времени на один «кадр».
const FRAME_MS: u64 = 100;

/// Лимит кадров на один спин (страховка от зависания).
const MAX_FRAMES_PER_SPIN: u32 = 1_000;

/// Dev-CLI фото-слот-машины.
#[derive(Parser, Debug)]
#[command(name = "slot_dev_cli", about = "Крутит слот-машину по config.txt до исчерпания пула")]
struct CliArgs {
    /// Каталог с config.txt (по умолчанию ищем в стандартных местах).
    config_dir: Option<PathBuf>,

    /// Короткие тайминги статической страницы.
    #[arg(long)]
    classic: bool,

    /// Seed детерминированного RNG.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Не ждать реального времени между кадрами.
    #[arg(long)]
    fast: bool,
}

impl CliArgs {
    fn profile(&self) -> TimeProfile {
        if self.classic {
            TimeProfile::Classic
        } else {
            TimeProfile::Standard
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    println!("slot_dev_cli: стартуем dev-CLI слот-машины…");

    let roots = match &args.config_dir {
        Some(dir) => vec![dir.clone()],
        None => default_search_roots(),
    };
    let source = FileConfigSource::new(CONFIG_FILE_NAME, roots);

    let mut app = AppState::new(Box::new(source), DeterministicRng::from_seed(args.seed))
        .with_timings(SpinTimings::from_profile(args.profile()))
        .with_sound(Box::new(|| Box::new(LogSound) as Box<dyn SoundEffects>));

    if let Err(e) = app.load() {
        println!("[CLI] Конфиг не загрузился: {:?}. Положите {} рядом и повторите.", e, CONFIG_FILE_NAME);
        return;
    }

    if let Some(config) = app.config() {
        println!("================ {} =================", config.title);
        for (i, action) in config.actions.iter().enumerate() {
            println!("  [{}] {} -> {}", i, action.name, action.image);
        }
    }

    if let Err(e) = app.apply(Command::StartGame) {
        println!("[CLI] ОШИБКА StartGame: {:?}", e);
        return;
    }

    let mut round = 0u32;
    loop {
        round += 1;
        match app.spin() {
            Ok(SpinRequest::Started) => println!("\n------ SPIN #{} ------", round),
            Ok(SpinRequest::Exhausted) => {
                println!("\n[CLI] Все действия выпали — партия окончена.");
                break;
            }
            Ok(SpinRequest::Busy) => {
                println!("[CLI] BUG: сессия занята в начале раунда.");
                break;
            }
            Err(e) => {
                println!("[CLI] ОШИБКА spin: {:?}", e);
                break;
            }
        }

        if !play_until_fullscreen(&mut app, args.fast) {
            break;
        }

        if let Err(e) = app.apply(Command::Dismiss) {
            println!("[CLI] ОШИБКА dismiss: {:?}", e);
            break;
        }
    }

    if let Some(snapshot) = snapshot(&app) {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("\nФинальный снимок:\n{}", json),
            Err(e) => println!("[CLI] Не удалось сериализовать снимок: {}", e),
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
}

/// Двигаем время кадрами, пока не покажется полноэкранная картинка.
fn play_until_fullscreen(app: &mut AppState<DeterministicRng>, fast: bool) -> bool {
    let mut last_phase = SpinPhase::Spinning;

    for _ in 0..MAX_FRAMES_PER_SPIN {
        if let Err(e) = app.apply(Command::Tick { elapsed_ms: FRAME_MS }) {
            println!("[CLI] ОШИБКА tick: {:?}", e);
            return false;
        }
        if !fast {
            thread::sleep(Duration::from_millis(FRAME_MS));
        }

        let Some(snap) = snapshot(app) else {
            return false;
        };
        print_reels(&snap);

        if snap.phase != last_phase {
            println!();
            println!("[CLI] t={} ms: {:?} -> {:?}", snap.now_ms, last_phase, snap.phase);
            last_phase = snap.phase;

            if snap.phase == SpinPhase::Revealing {
                if let Some(action) = &snap.selected_action {
                    println!("[CLI] Выпало: {} ({} осталось)", action.name, snap.remaining);
                }
            }
        }

        if snap.phase == SpinPhase::Fullscreen {
            println!("[CLI] Полноэкранный показ, закрываем.");
            return true;
        }
    }

    println!("[CLI] Превышен лимит кадров ({MAX_FRAMES_PER_SPIN}), выходим.");
    false
}

fn snapshot(app: &AppState<DeterministicRng>) -> Option<SessionSnapshotDto> {
    match app.query(Query::Snapshot) {
        Ok(QueryResponse::Snapshot(s)) => Some(s),
        _ => None,
    }
}

fn print_reels(snap: &SessionSnapshotDto) {
    let cells: Vec<String> = snap
        .reels
        .iter()
        .map(|r| format!("{:>3}", r.visible_index))
        .collect();
    print!("\r│{}│ {:?}      ", cells.join(" │"), snap.phase);
}
