//! Однопоточный планировщик отложенных событий на виртуальных часах.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Millis;

/// Хэндл запланированного события. Через него событие можно отменить.
///
/// Порядок срабатывания: сначала по времени, при равенстве — по порядку
/// постановки (`seq`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle {
    pub fire_at: Millis,
    seq: u64,
}

/// Очередь отложенных событий.
///
/// Отменённое событие удаляется из очереди и сработать уже не может.
#[derive(Clone, Debug)]
pub struct Scheduler<E> {
    now: Millis,
    next_seq: u64,
    pending: BTreeMap<TimerHandle, E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Текущее виртуальное время.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Запланировать событие через `delay` мс от текущего момента.
    pub fn schedule_in(&mut self, delay: Millis, event: E) -> TimerHandle {
        self.schedule_at(self.now.saturating_add(delay), event)
    }

    /// Запланировать событие на абсолютный момент.
    /// Момент в прошлом считается «прямо сейчас».
    pub fn schedule_at(&mut self, at: Millis, event: E) -> TimerHandle {
        let handle = TimerHandle {
            fire_at: at.max(self.now),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(handle, event);
        handle
    }

    /// Отменить событие. `false`, если оно уже сработало или было отменено.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Отменить всё разом (сброс игры, закрытие экрана).
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Сколько событий ждёт срабатывания.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Когда сработает ближайшее событие.
    pub fn next_fire_at(&self) -> Option<Millis> {
        self.pending.keys().next().map(|h| h.fire_at)
    }

    /// Достать ближайшее событие, если оно наступает не позже `until`.
    ///
    /// Часы переводятся на момент срабатывания события, так что обработчик
    /// видит корректное `now()` и может планировать следующие шаги от него.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, E)> {
        let handle = *self.pending.keys().next()?;
        if handle.fire_at > until {
            return None;
        }
        let event = self.pending.remove(&handle)?;
        self.now = self.now.max(handle.fire_at);
        Some((handle.fire_at, event))
    }

    /// Перевести часы вперёд без срабатывания событий.
    /// Вызывать после того, как `pop_due(until)` вернул `None`.
    pub fn advance_clock_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_fire_time_keeps_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule_in(10, "b");
        s.schedule_in(5, "a");
        s.schedule_in(10, "c");

        let order: Vec<_> = std::iter::from_fn(|| s.pop_due(100)).map(|(_, e)| e).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(s.now(), 10);
    }
}
