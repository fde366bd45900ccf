use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::{ActionIndex, Millis};

/// Тип события игровой сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionEventKind {
    /// Спин начался (индекс уже выбран, но наружу не показывается).
    SpinStarted,

    /// Один барабан закончил торможение.
    ReelStopped { reel: usize },

    /// Все барабаны стоят / спин прерван сбросом.
    SpinStopped,

    /// Выпавшее действие показано и зафиксировано в пуле.
    Revealed { index: ActionIndex },

    /// Просили спин, а действий не осталось.
    Exhausted,

    /// Игрок закрыл полноэкранный показ.
    Dismissed,

    /// Сессия сброшена.
    Reset,
}

/// Событие с порядковым номером и временем.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEvent {
    pub index: usize,
    pub at: Millis,
    pub kind: SessionEventKind,
}

/// Сколько последних событий хранит журнал.
pub const HISTORY_LIMIT: usize = 512;

/// Журнал событий сессии (только в памяти).
///
/// Хранит не больше `HISTORY_LIMIT` последних событий; номера событий
/// продолжают расти и после вытеснения старых.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionHistory {
    pub events: VecDeque<SessionEvent>,
    next_index: usize,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: Millis, kind: SessionEventKind) {
        if self.events.len() == HISTORY_LIMIT {
            self.events.pop_front();
        }
        self.events.push_back(SessionEvent {
            index: self.next_index,
            at,
            kind,
        });
        self.next_index += 1;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Сколько событий записано за всё время, включая вытесненные.
    pub fn total_recorded(&self) -> usize {
        self.next_index
    }

    pub fn last(&self) -> Option<&SessionEvent> {
        self.events.back()
    }

    /// Все события заданного типа (сравнение по варианту, без полей).
    pub fn count_of(&self, kind: &SessionEventKind) -> usize {
        let want = std::mem::discriminant(kind);
        self.events
            .iter()
            .filter(|e| std::mem::discriminant(&e.kind) == want)
            .count()
    }
}

/// Звуковые эффекты на границах фаз.
///
/// Вызовы «выстрелил и забыл»: ошибки воспроизведения реализация
/// глотает сама, на машину состояний они не влияют.
pub trait SoundEffects {
    fn on_spin_start(&mut self);
    fn on_spin_stop(&mut self);
    fn on_reveal(&mut self);
    fn on_exhausted(&mut self);

    /// Щелчок остановки отдельного барабана.
    fn on_reel_stop(&mut self, _reel: usize) {}
}

/// Передать событие звуковой подсистеме.
pub fn dispatch_cue(sound: &mut dyn SoundEffects, kind: &SessionEventKind) {
    match kind {
        SessionEventKind::SpinStarted => sound.on_spin_start(),
        SessionEventKind::ReelStopped { reel } => sound.on_reel_stop(*reel),
        SessionEventKind::SpinStopped => sound.on_spin_stop(),
        SessionEventKind::Revealed { .. } => sound.on_reveal(),
        SessionEventKind::Exhausted => sound.on_exhausted(),
        SessionEventKind::Dismissed | SessionEventKind::Reset => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_only_latest_events() {
        let mut h = SessionHistory::new();
        for i in 0..HISTORY_LIMIT + 10 {
            h.push(i as Millis, SessionEventKind::SpinStarted);
        }
        assert_eq!(h.len(), HISTORY_LIMIT);
        assert_eq!(h.total_recorded(), HISTORY_LIMIT + 10);
        assert_eq!(h.events.front().map(|e| e.index), Some(10));
        assert_eq!(h.last().map(|e| e.index), Some(HISTORY_LIMIT + 9));
    }
}
