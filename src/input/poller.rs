//! Polling driver owning all per-button state.
//!
//! One [`InputPoller::poll_tick`] per main-loop iteration advances
//! every channel in fixed index order: debounce, press-edge
//! accounting, triple check, pending-single sweep, dispatch. Nothing
//! blocks and nothing allocates, so the loop's display refresh budget
//! is never starved.

use heapless::Vec;
use log::debug;

use super::debounce::{Debouncer, Edge};
use super::dispatch::{self, Command};
use super::multipress::MultiPress;
use super::PressKind;
use crate::config::BUTTON_COUNT;
use crate::ui::Screen;

/// Per-channel record: debounce state, press classification state,
/// and the one-tick edge flags behind the level queries.
#[derive(Clone, Copy, Debug)]
struct Channel {
    debouncer: Debouncer,
    multipress: MultiPress,
    just_pressed: bool,
    just_released: bool,
}

impl Channel {
    const fn new() -> Self {
        Self {
            debouncer: Debouncer::new(),
            multipress: MultiPress::new(),
            just_pressed: false,
            just_released: false,
        }
    }
}

/// Tick-driven input driver for the fixed button set.
///
/// Owns the channel and counter records for process lifetime; nothing
/// else mutates them.
pub struct InputPoller {
    channels: [Channel; BUTTON_COUNT],
}

impl InputPoller {
    /// Fresh driver with every channel released and idle.
    pub const fn new() -> Self {
        Self {
            channels: [Channel::new(); BUTTON_COUNT],
        }
    }

    /// Advance every channel one tick.
    ///
    /// `samples` are the polarity-normalized raw levels read this
    /// tick, `now_ms` the monotonic millisecond clock, `screen` the
    /// screen currently showing (it decides what single presses map
    /// to). Returns the commands produced this tick in channel order -
    /// at most one per channel.
    pub fn poll_tick(
        &mut self,
        samples: [bool; BUTTON_COUNT],
        now_ms: u32,
        screen: Screen,
    ) -> Vec<Command, BUTTON_COUNT> {
        let mut commands = Vec::new();

        for (idx, channel) in self.channels.iter_mut().enumerate() {
            channel.just_pressed = false;
            channel.just_released = false;

            match channel.debouncer.update(samples[idx], now_ms) {
                Some(Edge::Press) => {
                    channel.just_pressed = true;
                    channel.multipress.on_press_edge(now_ms);
                }
                Some(Edge::Release) => channel.just_released = true,
                None => {}
            }

            // Triple check strictly before the sweep: a third press on
            // the window boundary must win over the deferred single.
            let kind = if channel.multipress.take_triple(now_ms) {
                Some(PressKind::Triple)
            } else if channel.multipress.sweep(now_ms) {
                Some(PressKind::Single)
            } else {
                None
            };

            if let Some(kind) = kind {
                if let Some(command) = dispatch::dispatch(screen, idx, kind) {
                    debug!("button {}: {:?} -> {:?}", idx, kind, command);
                    // Capacity is one command per channel per tick.
                    let _ = commands.push(command);
                }
            }
        }

        commands
    }

    /// Debounced level of `channel`; out-of-range reads as released.
    pub fn is_pressed(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|c| c.debouncer.is_pressed())
    }

    /// True for the one tick on which `channel` became pressed.
    pub fn was_just_pressed(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|c| c.just_pressed)
    }

    /// True for the one tick on which `channel` became released.
    pub fn was_just_released(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|c| c.just_released)
    }
}

impl Default for InputPoller {
    fn default() -> Self {
        Self::new()
    }
}
