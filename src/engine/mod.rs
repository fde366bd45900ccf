//! Движок слот-машины: пул действий, барабаны, машина состояний спина.
//!
//! Высокоуровневый объект: `SpinSession`
//! Основные операции:
//!   - `request_spin` – начать спин (выбор действия из пула);
//!   - `advance` – протекание времени, переходы фаз и кадры барабанов;
//!   - `dismiss` – закрыть полноэкранный показ;
//!   - `reset` – сброс из любой фазы.

pub mod easing;
pub mod errors;
pub mod events;
pub mod pool;
pub mod reel;
pub mod session;

pub use easing::Easing;
pub use errors::EngineError;
pub use events::{SessionEvent, SessionEventKind, SessionHistory, SoundEffects, HISTORY_LIMIT};
pub use pool::ActionPool;
pub use reel::{ReelAnimator, ReelGeometry, ReelMode};
pub use session::{SpinPhase, SpinRequest, SpinSession};

/// Источник случайности для движка.
/// Реализации — в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равновероятное число из `[0, upper)`. `upper` > 0.
    fn pick_index(&mut self, upper: usize) -> usize;
}
