//! Контроль времени слот-машины.
//!
//! Здесь собираем:
//! - виртуальный планировщик отложенных событий с отменяемыми хэндлами (`Scheduler`);
//! - политику таймингов фаз спина (`SpinTimings`, `TimeProfile`).
//!
//! Реальные часы сюда не попадают: время двигает вызывающий код
//! (кадровый колбэк UI, dev-CLI или тест с «виртуальным» временем).

pub mod scheduler;
pub mod timings;

pub use scheduler::{Scheduler, TimerHandle};
pub use timings::{SpinTimings, TimeProfile};
