//! Unit tests for the debounce filter and the multi-press classifier.
//!
//! These run on the host and drive the state machines with explicit
//! timestamps, so the press-window and glitch-floor edge cases are
//! exercised without wall-clock sleeps.

use super::debounce::{Debouncer, Edge};
use super::multipress::MultiPress;

// ═══════════════════════════════════════════════════════════════════════════
// Debouncer Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn debounce_commits_after_settle_window() {
    let mut d = Debouncer::new();
    assert_eq!(d.update(true, 0), None);
    assert_eq!(d.update(true, 30), None); // 30 ms held, not yet trusted
    assert_eq!(d.update(true, 51), Some(Edge::Press)); // > 50 ms held
    assert!(d.is_pressed());
}

#[test]
fn debounce_emits_at_most_one_edge() {
    let mut d = Debouncer::new();
    d.update(true, 0);
    assert_eq!(d.update(true, 60), Some(Edge::Press));
    assert_eq!(d.update(true, 90), None);
    assert_eq!(d.update(true, 500), None);
}

#[test]
fn debounce_rejects_bounce_that_reverts() {
    let mut d = Debouncer::new();
    // Flicker faster than the settle window: no edge ever.
    assert_eq!(d.update(true, 0), None);
    assert_eq!(d.update(false, 20), None);
    assert_eq!(d.update(true, 40), None);
    assert_eq!(d.update(false, 60), None);
    assert!(!d.is_pressed());
    // Long quiet released stretch stays edge-free.
    assert_eq!(d.update(false, 500), None);
}

#[test]
fn debounce_release_edge() {
    let mut d = Debouncer::new();
    d.update(true, 0);
    assert_eq!(d.update(true, 60), Some(Edge::Press));
    assert_eq!(d.update(false, 100), None);
    assert_eq!(d.update(false, 140), None); // 40 ms: still inside settle
    assert_eq!(d.update(false, 151), Some(Edge::Release));
    assert!(!d.is_pressed());
}

#[test]
fn debounce_bounce_during_press_restarts_settle() {
    let mut d = Debouncer::new();
    d.update(true, 0);
    d.update(false, 20); // bounce
    d.update(true, 40); // settles again from here
    assert_eq!(d.update(true, 80), None); // only 40 ms since t=40
    assert_eq!(d.update(true, 91), Some(Edge::Press));
}

#[test]
fn debounce_survives_counter_wraparound() {
    let mut d = Debouncer::new();
    let start = u32::MAX - 20;
    assert_eq!(d.update(true, start), None);
    assert_eq!(d.update(true, start.wrapping_add(30)), None); // now past 0
    assert_eq!(d.update(true, start.wrapping_add(60)), Some(Edge::Press));
}

// ═══════════════════════════════════════════════════════════════════════════
// Multi-Press Classifier Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn first_press_at_time_zero_is_accepted() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    assert!(!m.take_triple(0));
    assert!(!m.sweep(0));
    assert!(!m.sweep(799));
    assert!(m.sweep(800)); // window elapsed: deferred single commits
    assert!(!m.sweep(830)); // exactly once
}

#[test]
fn triple_fires_on_third_press_and_suppresses_single() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    assert!(!m.take_triple(0));
    m.on_press_edge(300);
    assert!(!m.take_triple(300));
    m.on_press_edge(650);
    assert!(m.take_triple(650));
    // Terminal: the pending single is gone and the triple is consumed.
    assert!(!m.take_triple(650));
    assert!(!m.sweep(1500));
}

#[test]
fn double_press_commits_exactly_one_single() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(300);
    assert!(!m.take_triple(300));
    // Re-armed by the second press: quiet until 300 + window.
    assert!(!m.sweep(1099));
    assert!(m.sweep(1100));
    assert!(!m.sweep(2000));
}

#[test]
fn glitch_press_does_not_advance_count() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(20); // 20 < min interval: ignored
    m.on_press_edge(100);
    m.on_press_edge(200);
    // If the glitch had counted, this run would already be a triple
    // at t=100; it completes at t=200 instead.
    let mut probe = m;
    assert!(probe.take_triple(200));

    // And with only the glitch pair, the run stays a single.
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(20);
    assert!(!m.take_triple(20));
    assert!(m.sweep(800)); // deferred single from t=0
}

#[test]
fn press_after_window_opens_fresh_window() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    assert!(m.sweep(850)); // first single commits
    m.on_press_edge(900); // new window
    m.on_press_edge(1000);
    m.on_press_edge(1100);
    assert!(m.take_triple(1100)); // counted from 900, not from 0
}

#[test]
fn burst_beyond_three_is_one_triple() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(100);
    m.on_press_edge(200);
    assert!(m.take_triple(200));
    // Press 4 and 5 of the burst land in a fresh window.
    m.on_press_edge(300);
    m.on_press_edge(400);
    assert!(!m.take_triple(400));
    assert!(m.sweep(1200)); // they settle as one deferred single
}

#[test]
fn third_press_on_window_boundary_is_a_triple() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(300);
    m.on_press_edge(800); // exactly window_start + PRESS_WINDOW
    assert!(m.take_triple(800));
    assert!(!m.sweep(2000));
}

#[test]
fn third_press_just_past_boundary_restarts() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(300);
    m.on_press_edge(801); // one ms too late: opens a new window
    assert!(!m.take_triple(801));
    // The pending single re-armed at 801 commits a window later.
    assert!(!m.sweep(1600));
    assert!(m.sweep(1601));
}

#[test]
fn bounce_tail_after_triple_cannot_seed_window() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(100);
    m.on_press_edge(200);
    assert!(m.take_triple(200));
    m.on_press_edge(230); // within min interval of the last press
    assert!(!m.sweep(2000)); // nothing pending: tail was rejected
}

#[test]
fn stale_count_resets_without_gesture() {
    let mut m = MultiPress::new();
    m.on_press_edge(0);
    m.on_press_edge(100);
    m.on_press_edge(200);
    // Triple never consumed in time (no tick until the window lapsed).
    assert!(!m.take_triple(1100));
    // The deferred single armed at t=100 then commits on the sweep.
    assert!(m.sweep(1100));
}

#[test]
fn classifier_survives_counter_wraparound() {
    let start = u32::MAX - 400;
    let mut m = MultiPress::new();
    m.on_press_edge(start);
    m.on_press_edge(start.wrapping_add(300));
    m.on_press_edge(start.wrapping_add(650)); // past the rollover
    assert!(m.take_triple(start.wrapping_add(650)));

    let mut m = MultiPress::new();
    m.on_press_edge(start);
    assert!(!m.sweep(start.wrapping_add(799)));
    assert!(m.sweep(start.wrapping_add(800)));
}
