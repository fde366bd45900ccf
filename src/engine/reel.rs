//! Модель движения одного барабана.
//!
//! Барабан — вертикальная лента из списка действий, повторённого
//! `strip_repeat_count` раз. Пока идёт спин, лента едет с постоянной
//! скоростью; при торможении целевая позиция считается заново из
//! дискретного индекса, а не экстраполируется из свободного движения,
//! поэтому все барабаны встают ровно на нужную строку.

use serde::{Deserialize, Serialize};

use crate::domain::{ActionIndex, Millis};
use crate::engine::easing::Easing;
use crate::engine::errors::EngineError;

/// Геометрия ленты барабана.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReelGeometry {
    /// Высота одной ячейки в пикселях.
    pub item_extent: f64,
    /// Скорость свободного вращения, px/мс.
    pub speed_px_per_ms: f64,
    /// Сколько раз список действий повторён на ленте.
    pub strip_repeat_count: u32,
    /// На каком повторе ленты барабан останавливается.
    pub base_repeat_count: u32,
    /// После скольких циклов свободное смещение «заворачивается» назад...
    pub wrap_at_cycles: u32,
    /// ...и до какого цикла.
    pub wrap_to_cycles: u32,
}

impl ReelGeometry {
    /// Десктопный размер ячейки.
    pub const fn desktop() -> Self {
        Self {
            item_extent: 384.0,
            speed_px_per_ms: 1.8,
            strip_repeat_count: 50,
            base_repeat_count: 25,
            wrap_at_cycles: 20,
            wrap_to_cycles: 10,
        }
    }

    /// Узкий экран.
    pub const fn compact() -> Self {
        Self {
            item_extent: 208.0,
            ..Self::desktop()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.item_extent > 0.0) {
            return Err(EngineError::InvalidGeometry("item extent must be > 0"));
        }
        if !(self.speed_px_per_ms > 0.0) {
            return Err(EngineError::InvalidGeometry("speed must be > 0"));
        }
        if self.wrap_to_cycles >= self.wrap_at_cycles {
            return Err(EngineError::InvalidGeometry("wrap_to must be below wrap_at"));
        }
        // Свободное смещение не должно обгонять точку остановки,
        // иначе торможение пошло бы назад.
        if self.wrap_at_cycles > self.base_repeat_count {
            return Err(EngineError::InvalidGeometry("wrap_at must not exceed base repeat"));
        }
        if self.base_repeat_count >= self.strip_repeat_count {
            return Err(EngineError::InvalidGeometry("base repeat must fit into the strip"));
        }
        Ok(())
    }
}

impl Default for ReelGeometry {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Режим барабана.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReelMode {
    Free,
    Settling,
    Stopped,
}

/// Отложенное торможение: начнётся в `begins_at`.
#[derive(Clone, Copy, Debug)]
struct SettlePlan {
    begins_at: Millis,
    target: ActionIndex,
}

/// Идущая анимация торможения.
#[derive(Clone, Copy, Debug)]
struct SettleMotion {
    started_at: Millis,
    from: f64,
    to: f64,
}

#[derive(Clone, Debug)]
pub struct ReelAnimator {
    action_count: usize,
    geometry: ReelGeometry,
    easing: Easing,
    settle_duration_ms: Millis,

    offset: f64,
    mode: ReelMode,
    last_frame: Option<Millis>,
    plan: Option<SettlePlan>,
    motion: Option<SettleMotion>,
    target: Option<ActionIndex>,
}

impl ReelAnimator {
    pub fn new(
        action_count: usize,
        geometry: ReelGeometry,
        easing: Easing,
        settle_duration_ms: Millis,
    ) -> Self {
        Self {
            action_count,
            geometry,
            easing,
            settle_duration_ms,
            offset: 0.0,
            mode: ReelMode::Stopped,
            last_frame: None,
            plan: None,
            motion: None,
            target: None,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn mode(&self) -> ReelMode {
        self.mode
    }

    pub fn geometry(&self) -> &ReelGeometry {
        &self.geometry
    }

    /// Длина одного цикла ленты (все действия по разу).
    pub fn cycle_len(&self) -> f64 {
        self.action_count as f64 * self.geometry.item_extent
    }

    /// Смещение, на котором барабан встанет для данного индекса.
    pub fn target_offset(&self, index: ActionIndex, item_extent: f64) -> f64 {
        let row = self.geometry.base_repeat_count as usize * self.action_count + index;
        row as f64 * item_extent
    }

    /// Начать свободное вращение с момента `now`.
    pub fn start(&mut self, now: Millis) {
        self.mode = ReelMode::Free;
        self.last_frame = Some(now);
        self.plan = None;
        self.motion = None;
        self.target = None;
    }

    /// Запланировать остановку на `target` через `after_delay` мс от `now`.
    ///
    /// До начала торможения барабан продолжает крутиться свободно.
    pub fn settle_to(
        &mut self,
        target: ActionIndex,
        item_extent: f64,
        after_delay: Millis,
        now: Millis,
    ) {
        if item_extent != self.geometry.item_extent {
            self.set_item_extent(item_extent);
        }
        self.target = Some(target);
        self.plan = Some(SettlePlan {
            begins_at: now.saturating_add(after_delay),
            target,
        });
        if self.mode == ReelMode::Stopped {
            // Барабан не крутился: начинаем отсчёт от `now`.
            self.mode = ReelMode::Free;
            self.last_frame = Some(now);
        }
    }

    /// Мгновенная остановка без доводки (сброс / прерывание).
    pub fn stop(&mut self) {
        self.mode = ReelMode::Stopped;
        self.plan = None;
        self.motion = None;
    }

    /// Вернуть ленту в начало.
    pub fn rewind(&mut self) {
        self.offset = 0.0;
        self.target = None;
    }

    /// Поменять размер ячейки (ресайз окна). Смещение масштабируется,
    /// так что видимая строка не меняется.
    pub fn set_item_extent(&mut self, item_extent: f64) {
        if !(item_extent > 0.0) || item_extent == self.geometry.item_extent {
            return;
        }
        let k = item_extent / self.geometry.item_extent;
        self.offset *= k;
        if let Some(m) = self.motion.as_mut() {
            m.from *= k;
            m.to *= k;
        }
        self.geometry.item_extent = item_extent;
    }

    /// Кадр анимации на момент `now`.
    ///
    /// Возвращает `true` ровно в том кадре, где барабан закончил торможение.
    pub fn tick(&mut self, now: Millis) -> bool {
        let prev = self.last_frame.unwrap_or(now);
        let now = now.max(prev);
        self.last_frame = Some(now);

        if self.mode == ReelMode::Free {
            let due = self.plan.filter(|p| p.begins_at <= now);
            let free_until = due.map(|p| p.begins_at.max(prev)).unwrap_or(now);
            self.advance_free(free_until - prev);

            if let Some(plan) = due {
                self.begin_settle(plan, free_until);
            }
        }

        if self.mode == ReelMode::Settling {
            return self.advance_settle(now);
        }
        false
    }

    /// Индекс строки, на которой барабан стоит (только в `Stopped`).
    pub fn landed_index(&self) -> Option<ActionIndex> {
        if self.mode != ReelMode::Stopped || self.action_count == 0 {
            return None;
        }
        let row = (self.offset / self.geometry.item_extent).round() as usize;
        Some(row % self.action_count)
    }

    /// Индекс строки, которая сейчас в окне (для отрисовки в любом режиме).
    pub fn visible_index(&self) -> ActionIndex {
        if self.action_count == 0 {
            return 0;
        }
        let row = (self.offset / self.geometry.item_extent).floor() as usize;
        row % self.action_count
    }

    /// Куда барабан должен встать в текущем спине.
    pub fn target(&self) -> Option<ActionIndex> {
        self.target
    }

    fn advance_free(&mut self, dt: Millis) {
        self.offset += self.geometry.speed_px_per_ms * dt as f64;

        let cycle = self.cycle_len();
        let g = &self.geometry;
        let step = g.wrap_at_cycles.saturating_sub(g.wrap_to_cycles) as f64 * cycle;
        if step <= 0.0 {
            return;
        }
        let wrap_at = g.wrap_at_cycles as f64 * cycle;
        while self.offset > wrap_at {
            self.offset -= step;
        }
    }

    fn begin_settle(&mut self, plan: SettlePlan, at: Millis) {
        self.plan = None;
        self.mode = ReelMode::Settling;
        self.motion = Some(SettleMotion {
            started_at: at,
            from: self.offset,
            to: self.target_offset(plan.target, self.geometry.item_extent),
        });
    }

    fn advance_settle(&mut self, now: Millis) -> bool {
        let Some(motion) = self.motion else {
            self.mode = ReelMode::Stopped;
            return false;
        };
        let elapsed = now.saturating_sub(motion.started_at);
        if elapsed >= self.settle_duration_ms {
            self.offset = motion.to;
            self.motion = None;
            self.mode = ReelMode::Stopped;
            return true;
        }
        let t = elapsed as f64 / self.settle_duration_ms as f64;
        self.offset = motion.from + (motion.to - motion.from) * self.easing.apply(t);
        false
    }
}
