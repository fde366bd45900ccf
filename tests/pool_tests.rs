//! Тесты пула действий.
//!
//! Проверяем:
//! - draw не меняет пул, mark_used фиксирует ровно одно действие;
//! - исчерпание → Exhausted без мутаций;
//! - reset возвращает всё;
//! - равномерность выбора;
//! - ошибки mark_used.

use std::collections::HashSet;

use photo_slot_engine::engine::{ActionPool, EngineError};
use photo_slot_engine::infra::DeterministicRng;

//
// TEST 1 — draw + mark_used: уникальные индексы в диапазоне
//
#[test]
fn draw_and_commit_until_full() {
    let mut rng = DeterministicRng::from_seed(7);
    let mut pool = ActionPool::new(5);
    let mut seen = HashSet::new();

    for step in 1..=5 {
        let idx = pool.draw(&mut rng).expect("pool not exhausted yet");
        assert!(idx < 5);
        assert!(!pool.is_used(idx), "draw must return an unused index");
        pool.mark_used(idx).unwrap();
        assert!(seen.insert(idx));
        assert_eq!(pool.used_count(), step);
        assert_eq!(pool.remaining(), 5 - step);
    }

    let mut used: Vec<usize> = pool.used_indices().collect();
    let mut expected: Vec<usize> = seen.into_iter().collect();
    used.sort();
    expected.sort();
    assert_eq!(used, expected);
}

//
// TEST 2 — draw сам по себе ничего не меняет
//
#[test]
fn draw_does_not_mutate() {
    let mut rng = DeterministicRng::from_seed(1);
    let pool = ActionPool::new(3);
    let before = pool.clone();
    for _ in 0..10 {
        pool.draw(&mut rng).unwrap();
    }
    assert_eq!(pool, before);
}

//
// TEST 3 — пример: total=2, два спина, третий → Exhausted, reset → 2
//
#[test]
fn exhausted_after_all_drawn_then_reset() {
    let mut rng = DeterministicRng::from_seed(99);
    let mut pool = ActionPool::new(2);

    let a = pool.draw(&mut rng).unwrap();
    pool.mark_used(a).unwrap();
    let b = pool.draw(&mut rng).unwrap();
    pool.mark_used(b).unwrap();
    assert_ne!(a, b);

    let snapshot = pool.clone();
    let err = pool.draw(&mut rng).unwrap_err();
    assert!(matches!(err, EngineError::Exhausted));
    assert_eq!(pool, snapshot, "failed draw must not mutate state");

    pool.reset();
    assert_eq!(pool.remaining(), 2);
    assert_eq!(pool.total_count(), 2);
    assert!((0..2).all(|i| !pool.is_used(i)));
}

//
// TEST 4 — reset из любого состояния
//
#[test]
fn reset_from_partial_state() {
    let mut pool = ActionPool::new(4);
    pool.mark_used(1).unwrap();
    pool.mark_used(3).unwrap();
    pool.reset();
    assert_eq!(pool.remaining(), 4);
    assert_eq!(pool.available(), vec![0, 1, 2, 3]);
}

//
// TEST 5 — draw выбирает только из оставшихся
//
#[test]
fn draw_only_returns_remaining_indices() {
    let mut rng = DeterministicRng::from_seed(3);
    let mut pool = ActionPool::new(4);
    pool.mark_used(0).unwrap();
    pool.mark_used(2).unwrap();
    for _ in 0..200 {
        let idx = pool.draw(&mut rng).unwrap();
        assert!(idx == 1 || idx == 3, "got used index {}", idx);
    }
}

//
// TEST 6 — равномерность (детерминированный seed)
//
#[test]
fn draw_is_roughly_uniform() {
    let mut rng = DeterministicRng::from_seed(2024);
    let pool = ActionPool::new(3);
    let mut counts = [0u32; 3];
    for _ in 0..3000 {
        counts[pool.draw(&mut rng).unwrap()] += 1;
    }
    for (i, c) in counts.iter().enumerate() {
        assert!((800..=1200).contains(c), "index {} drawn {} times", i, c);
    }
}

//
// TEST 7 — ошибки mark_used
//
#[test]
fn mark_used_rejects_out_of_range_and_duplicates() {
    let mut pool = ActionPool::new(2);
    assert!(matches!(pool.mark_used(2), Err(EngineError::ActionOutOfRange(2))));
    pool.mark_used(0).unwrap();
    assert!(matches!(pool.mark_used(0), Err(EngineError::AlreadyUsed(0))));
    assert_eq!(pool.used_count(), 1);
}
