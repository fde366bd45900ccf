//! Политика таймингов фаз спина.
//!
//! Конкретные числа — это политика, а не инвариант алгоритма.
//! Инвариантом является их относительный порядок, его проверяет `validate`.

use serde::{Deserialize, Serialize};

use crate::domain::Millis;
use crate::engine::easing::Easing;
use crate::engine::EngineError;

/// Профиль таймингов.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// Десктопное приложение: длинный свободный спин и драматичное торможение.
    #[default]
    Standard,
    /// Статическая страница: короткий спин, быстрые остановки слева направо.
    Classic,
}

/// Тайминги одного спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpinTimings {
    /// Сколько барабаны крутятся свободно до начала торможения.
    pub free_spin_ms: Millis,
    /// Задержка начала торможения для каждого барабана (слева направо).
    /// Длина вектора = число барабанов.
    pub reel_settle_delays_ms: Vec<Millis>,
    /// Длительность анимации торможения одного барабана.
    pub settle_duration_ms: Millis,
    /// Пауза между показом подписи и полноэкранной картинкой.
    pub caption_dwell_ms: Millis,
    /// Кривая торможения.
    pub easing: Easing,
}

impl SpinTimings {
    /// Десктоп: 5 с спина, барабаны стартуют торможение через 0/200/400 мс,
    /// торможение 3 с, подпись висит 1 с.
    pub fn standard() -> Self {
        Self {
            free_spin_ms: 5_000,
            reel_settle_delays_ms: vec![0, 200, 400],
            settle_duration_ms: 3_000,
            caption_dwell_ms: 1_000,
            easing: Easing::SLOW_STOP,
        }
    }

    /// Статическая страница: барабаны останавливаются на 1.5 / 2.0 / 2.5 с,
    /// доводка 0.5 с.
    pub fn classic() -> Self {
        Self {
            free_spin_ms: 1_500,
            reel_settle_delays_ms: vec![0, 500, 1_000],
            settle_duration_ms: 500,
            caption_dwell_ms: 1_500,
            easing: Easing::CubicOut,
        }
    }

    pub fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Classic => Self::classic(),
        }
    }

    /// Число барабанов.
    pub fn reel_count(&self) -> usize {
        self.reel_settle_delays_ms.len()
    }

    /// Задержка самого последнего барабана.
    pub fn last_settle_delay_ms(&self) -> Millis {
        self.reel_settle_delays_ms.iter().copied().max().unwrap_or(0)
    }

    /// Сколько длится фаза Settling: последний барабан + его доводка.
    pub fn settling_window_ms(&self) -> Millis {
        self.last_settle_delay_ms() + self.settle_duration_ms
    }

    /// Полное время от нажатия «крутить» до полноэкранного показа.
    pub fn spin_to_fullscreen_ms(&self) -> Millis {
        self.free_spin_ms + self.settling_window_ms() + self.caption_dwell_ms
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.free_spin_ms == 0 {
            return Err(EngineError::InvalidTimings("free spin duration must be > 0"));
        }
        if self.reel_settle_delays_ms.is_empty() {
            return Err(EngineError::InvalidTimings("at least one reel is required"));
        }
        if self
            .reel_settle_delays_ms
            .windows(2)
            .any(|w| w[1] <= w[0])
        {
            return Err(EngineError::InvalidTimings(
                "reel settle delays must be strictly increasing",
            ));
        }
        if self.settle_duration_ms == 0 {
            return Err(EngineError::InvalidTimings("settle duration must be > 0"));
        }
        if self.caption_dwell_ms == 0 {
            return Err(EngineError::InvalidTimings("caption dwell must be > 0"));
        }
        Ok(())
    }
}

impl Default for SpinTimings {
    fn default() -> Self {
        Self::standard()
    }
}
