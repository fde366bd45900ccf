//! Кривые торможения барабана.
//!
//! Любая кривая здесь возвращает прогресс в `[0, 1]`, поэтому анимация
//! торможения никогда не перелетает целевую позицию.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Easing {
    /// `1 - (1 - t)^3`: быстрый старт, плавная остановка.
    CubicOut,
    /// CSS-подобная кубическая кривая Безье с точками (x1, y1), (x2, y2).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Долгое «драматичное» торможение.
    pub const SLOW_STOP: Easing = Easing::CubicBezier {
        x1: 0.1,
        y1: 0.0,
        x2: 0.1,
        y2: 1.0,
    };

    /// Прогресс анимации для нормированного времени `t`.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let y = match *self {
            Easing::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                let s = solve_bezier_param(t, x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
                bezier_axis(s, y1, y2)
            }
        };
        y.clamp(0.0, 1.0)
    }
}

/// Одна координата кубической Безье с концами 0 и 1.
fn bezier_axis(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Найти параметр `s`, при котором x(s) = t. При x1, x2 в [0, 1] x(s)
/// монотонна, поэтому хватает бисекции.
fn solve_bezier_param(t: f64, x1: f64, x2: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if bezier_axis(mid, x1, x2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
