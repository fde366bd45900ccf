use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::ActionIndex;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Пул действий на одну игровую сессию.
///
/// Выбор (`draw`) и фиксация (`mark_used`) разделены: выбор ничего не меняет,
/// поэтому прерванный спин не «съедает» действие.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionPool {
    total_count: usize,
    used: BTreeSet<ActionIndex>,
}

impl ActionPool {
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            used: BTreeSet::new(),
        }
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Сколько действий ещё не выпало.
    pub fn remaining(&self) -> usize {
        self.total_count - self.used.len()
    }

    pub fn is_used(&self, index: ActionIndex) -> bool {
        self.used.contains(&index)
    }

    /// Индексы, которые ещё можно вытянуть (по возрастанию).
    pub fn available(&self) -> Vec<ActionIndex> {
        (0..self.total_count)
            .filter(|i| !self.used.contains(i))
            .collect()
    }

    /// Равновероятно выбрать одно из неиспользованных действий.
    /// Состояние пула НЕ меняется.
    pub fn draw<R: RandomSource>(&self, rng: &mut R) -> Result<ActionIndex, EngineError> {
        let available = self.available();
        if available.is_empty() {
            return Err(EngineError::Exhausted);
        }
        let pick = rng.pick_index(available.len());
        Ok(available[pick % available.len()])
    }

    /// Зафиксировать действие как выпавшее.
    pub fn mark_used(&mut self, index: ActionIndex) -> Result<(), EngineError> {
        if index >= self.total_count {
            return Err(EngineError::ActionOutOfRange(index));
        }
        if !self.used.insert(index) {
            return Err(EngineError::AlreadyUsed(index));
        }
        Ok(())
    }

    /// Очистить пул; `total_count` не меняется (тот же конфиг, новая партия).
    pub fn reset(&mut self) {
        self.used.clear();
    }

    pub fn used_indices(&self) -> impl Iterator<Item = ActionIndex> + '_ {
        self.used.iter().copied()
    }
}
