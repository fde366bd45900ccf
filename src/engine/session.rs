//! Машина состояний одного игрового сеанса.
//!
//! Фазы: Idle → Spinning → Settling → Revealing → Fullscreen → Idle.
//! Все ожидания — записи в `Scheduler`, сброс отменяет их разом,
//! так что «протухший» таймер не может сработать в уже сброшенной сессии.
//! Пул и выбранный индекс меняет только `SpinSession`.

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::domain::{Action, ActionIndex, GameConfig, Millis};
use crate::engine::errors::EngineError;
use crate::engine::events::{dispatch_cue, SessionEventKind, SessionHistory, SoundEffects};
use crate::engine::pool::ActionPool;
use crate::engine::reel::{ReelAnimator, ReelGeometry};
use crate::engine::RandomSource;
use crate::time_ctrl::{Scheduler, SpinTimings};

/// Фаза сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settling,
    Revealing,
    Fullscreen,
}

/// Внутренние отложенные переходы.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseTimer {
    FreeSpinElapsed,
    AllReelsSettled,
    CaptionDwellElapsed,
}

/// Результат запроса спина.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpinRequest {
    /// Спин запущен.
    Started,
    /// Уже идёт спин / показ — запрос проигнорирован.
    Busy,
    /// Действия закончились; сыгран отдельный звук, фаза не изменилась.
    Exhausted,
}

pub struct SpinSession {
    config: GameConfig,
    pool: ActionPool,
    timings: SpinTimings,
    reels: Vec<ReelAnimator>,
    scheduler: Scheduler<PhaseTimer>,

    phase: SpinPhase,
    /// Индекс, вытянутый в начале текущего спина.
    drawn: Option<ActionIndex>,
    caption_visible: bool,
    fullscreen_visible: bool,
    spins_completed: u32,

    history: SessionHistory,
    sound: Option<Box<dyn SoundEffects>>,
    muted: bool,
}

impl SpinSession {
    /// Создать сессию для принятого конфига.
    pub fn new(
        config: GameConfig,
        timings: SpinTimings,
        geometry: ReelGeometry,
    ) -> Result<Self, EngineError> {
        if config.is_empty() {
            return Err(EngineError::InvalidConfig);
        }
        timings.validate()?;
        geometry.validate()?;

        let reels = (0..timings.reel_count())
            .map(|_| {
                ReelAnimator::new(
                    config.len(),
                    geometry.clone(),
                    timings.easing,
                    timings.settle_duration_ms,
                )
            })
            .collect();

        Ok(Self {
            pool: ActionPool::new(config.len()),
            config,
            timings,
            reels,
            scheduler: Scheduler::new(),
            phase: SpinPhase::Idle,
            drawn: None,
            caption_visible: false,
            fullscreen_visible: false,
            spins_completed: 0,
            history: SessionHistory::new(),
            sound: None,
            muted: false,
        })
    }

    /// Подключить звуковые эффекты.
    pub fn with_sound(mut self, sound: Box<dyn SoundEffects>) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn set_sound(&mut self, sound: Box<dyn SoundEffects>) {
        self.sound = Some(sound);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // ---------- чтение состояния ----------

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Выбранный индекс. Виден только в Settling / Revealing / Fullscreen.
    pub fn selected_index(&self) -> Option<ActionIndex> {
        match self.phase {
            SpinPhase::Settling | SpinPhase::Revealing | SpinPhase::Fullscreen => self.drawn,
            SpinPhase::Idle | SpinPhase::Spinning => None,
        }
    }

    pub fn selected_action(&self) -> Option<&Action> {
        self.selected_index().and_then(|i| self.config.action(i))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pool(&self) -> &ActionPool {
        &self.pool
    }

    pub fn timings(&self) -> &SpinTimings {
        &self.timings
    }

    pub fn reels(&self) -> &[ReelAnimator] {
        &self.reels
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn caption_visible(&self) -> bool {
        self.caption_visible
    }

    pub fn fullscreen_visible(&self) -> bool {
        self.fullscreen_visible
    }

    pub fn spins_completed(&self) -> u32 {
        self.spins_completed
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Сколько отложенных переходов ждёт срабатывания.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn can_spin(&self) -> bool {
        self.phase == SpinPhase::Idle && self.pool.remaining() > 0
    }

    // ---------- ввод пользователя ----------

    /// Нажали «крутить».
    pub fn request_spin<R: RandomSource>(&mut self, rng: &mut R) -> SpinRequest {
        if self.phase != SpinPhase::Idle {
            debug!("spin ignored: session is {:?}", self.phase);
            return SpinRequest::Busy;
        }

        let index = match self.pool.draw(rng) {
            Ok(i) => i,
            Err(_) => {
                info!("spin declined: all {} actions used", self.pool.total_count());
                self.emit(SessionEventKind::Exhausted);
                return SpinRequest::Exhausted;
            }
        };

        let now = self.scheduler.now();
        self.drawn = Some(index);
        self.caption_visible = false;
        self.fullscreen_visible = false;
        for reel in self.reels.iter_mut() {
            reel.start(now);
        }
        self.scheduler
            .schedule_in(self.timings.free_spin_ms, PhaseTimer::FreeSpinElapsed);
        self.set_phase(SpinPhase::Spinning);
        self.emit(SessionEventKind::SpinStarted);
        SpinRequest::Started
    }

    /// Тап по полноэкранному показу. `false`, если закрывать нечего.
    pub fn dismiss(&mut self) -> bool {
        if self.phase != SpinPhase::Fullscreen {
            return false;
        }
        self.drawn = None;
        self.caption_visible = false;
        self.fullscreen_visible = false;
        for reel in self.reels.iter_mut() {
            reel.rewind();
        }
        self.set_phase(SpinPhase::Idle);
        self.emit(SessionEventKind::Dismissed);
        true
    }

    /// Сброс из любой фазы: отменить все таймеры, остановить барабаны,
    /// очистить выбор и пул, спрятать оверлеи.
    pub fn reset(&mut self) {
        let was_spinning = matches!(self.phase, SpinPhase::Spinning | SpinPhase::Settling);

        let cancelled = self.scheduler.cancel_all();
        for reel in self.reels.iter_mut() {
            reel.stop();
            reel.rewind();
        }
        self.drawn = None;
        self.caption_visible = false;
        self.fullscreen_visible = false;
        self.pool.reset();
        self.spins_completed = 0;

        if was_spinning {
            self.emit(SessionEventKind::SpinStopped);
        }
        self.set_phase(SpinPhase::Idle);
        self.emit(SessionEventKind::Reset);
        debug!("session reset, {} pending timer(s) cancelled", cancelled);
    }

    /// Размер ячейки барабанов поменялся (ресайз окна).
    pub fn set_item_extent(&mut self, item_extent: f64) {
        for reel in self.reels.iter_mut() {
            reel.set_item_extent(item_extent);
        }
    }

    // ---------- время ----------

    /// Прошло `elapsed` мс.
    pub fn advance(&mut self, elapsed: Millis) {
        let target = self.scheduler.now().saturating_add(elapsed);
        self.advance_to(target);
    }

    /// Довести часы до `target`, по дороге отработав все наступившие переходы
    /// в порядке их времени.
    pub fn advance_to(&mut self, target: Millis) {
        while let Some((at, timer)) = self.scheduler.pop_due(target) {
            self.tick_reels(at);
            self.on_timer(timer);
        }
        self.scheduler.advance_clock_to(target);
        self.tick_reels(self.scheduler.now());
    }

    fn tick_reels(&mut self, now: Millis) {
        let mut stopped = Vec::new();
        for (i, reel) in self.reels.iter_mut().enumerate() {
            if reel.tick(now) {
                stopped.push(i);
            }
        }
        for reel in stopped {
            self.emit(SessionEventKind::ReelStopped { reel });
        }
    }

    fn on_timer(&mut self, timer: PhaseTimer) {
        match (timer, self.phase) {
            (PhaseTimer::FreeSpinElapsed, SpinPhase::Spinning) => self.begin_settling(),
            (PhaseTimer::AllReelsSettled, SpinPhase::Settling) => self.reveal(),
            (PhaseTimer::CaptionDwellElapsed, SpinPhase::Revealing) => {
                self.fullscreen_visible = true;
                self.set_phase(SpinPhase::Fullscreen);
            }
            (timer, phase) => {
                error!("timer {:?} fired in unexpected phase {:?}", timer, phase);
            }
        }
    }

    fn begin_settling(&mut self) {
        let Some(target) = self.drawn else {
            error!("settling without a drawn action");
            return;
        };
        let now = self.scheduler.now();
        for (reel, delay) in self
            .reels
            .iter_mut()
            .zip(self.timings.reel_settle_delays_ms.iter().copied())
        {
            let extent = reel.geometry().item_extent;
            reel.settle_to(target, extent, delay, now);
        }
        self.scheduler
            .schedule_in(self.timings.settling_window_ms(), PhaseTimer::AllReelsSettled);
        self.set_phase(SpinPhase::Settling);
    }

    fn reveal(&mut self) {
        let Some(index) = self.drawn else {
            error!("reveal without a drawn action");
            return;
        };
        self.emit(SessionEventKind::SpinStopped);

        if let Err(e) = self.pool.mark_used(index) {
            error!("failed to commit action {}: {}", index, e);
        }
        self.spins_completed += 1;
        self.caption_visible = true;
        self.set_phase(SpinPhase::Revealing);
        self.emit(SessionEventKind::Revealed { index });

        self.scheduler
            .schedule_in(self.timings.caption_dwell_ms, PhaseTimer::CaptionDwellElapsed);
    }

    fn set_phase(&mut self, phase: SpinPhase) {
        if self.phase != phase {
            debug!(
                "phase {:?} -> {:?} at {} ms",
                self.phase,
                phase,
                self.scheduler.now()
            );
        }
        self.phase = phase;
    }

    fn emit(&mut self, kind: SessionEventKind) {
        self.history.push(self.scheduler.now(), kind.clone());
        if self.muted {
            return;
        }
        if let Some(sound) = self.sound.as_deref_mut() {
            dispatch_cue(sound, &kind);
        }
    }
}
