//! Host-testable core for spotideck.
//!
//! Everything in the library is pure logic over a monotonic
//! millisecond clock: the button input state machine, the press-to-
//! command dispatch table, device-list selection, and the feedback
//! tone tables. It builds for the host with no ESP-IDF toolchain and
//! is exercised by `cargo test`.
//!
//! The firmware binary (src/main.rs) requires the `embedded` feature
//! and wires these modules to GPIO, the TFT, the buzzer, and the
//! Spotify Web API.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod feedback;
pub mod input;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
