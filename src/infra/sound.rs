//! Звуковые «приёмники» для `SoundEffects`.
//!
//! Синтез тонов живёт в слое отрисовки; здесь только то, что нужно
//! самому движку и dev-CLI.

use log::info;

use crate::engine::SoundEffects;

/// Без звука.
#[derive(Clone, Debug, Default)]
pub struct SilentSound;

impl SoundEffects for SilentSound {
    fn on_spin_start(&mut self) {}
    fn on_spin_stop(&mut self) {}
    fn on_reveal(&mut self) {}
    fn on_exhausted(&mut self) {}
}

/// Пишет звуковые сигналы в лог (dev-CLI, отладка таймингов).
#[derive(Clone, Debug, Default)]
pub struct LogSound;

impl SoundEffects for LogSound {
    fn on_spin_start(&mut self) {
        info!("[sound] spin loop start");
    }

    fn on_spin_stop(&mut self) {
        info!("[sound] spin loop stop");
    }

    fn on_reveal(&mut self) {
        info!("[sound] win fanfare");
    }

    fn on_exhausted(&mut self) {
        info!("[sound] beep: nothing left");
    }

    fn on_reel_stop(&mut self, reel: usize) {
        info!("[sound] reel {} stop click", reel + 1);
    }
}
