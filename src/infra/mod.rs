//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации;
//! - поиск и чтение конфига;
//! - проверка картинок при отрисовке;
//! - звуковые приёмники;
//! - хранение выбранной темы.

pub mod assets;
pub mod loader;
pub mod persistence;
pub mod rng;
pub mod sound;

pub use assets::*;
pub use loader::*;
pub use persistence::*;
pub use rng::*;
pub use sound::*;
