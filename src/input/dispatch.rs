//! Press-event to command mapping.
//!
//! The mapping is a pure lookup keyed by `(screen, channel, gesture)`:
//! what a button does depends on which screen is showing, and the
//! triple-press screen toggle deliberately ignores channel identity.
//! No side effects here - the poller forwards the returned command to
//! the playback / navigation layer.

use super::PressKind;
use crate::ui::Screen;

/// Abstract commands handed to the playback and navigation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    NextTrack,
    PreviousTrack,
    NavigateUp,
    NavigateDown,
    SelectItem,
    ToggleScreen,
}

/// Look up the command for a classified press.
///
/// Returns `None` for channel indices outside the fixed button set;
/// an unmapped combination is a no-op, never a fault.
pub fn dispatch(screen: Screen, channel: usize, kind: PressKind) -> Option<Command> {
    match (screen, channel, kind) {
        // A triple press on any button flips between the now-playing
        // and device screens.
        (_, 0..=2, PressKind::Triple) => Some(Command::ToggleScreen),

        (Screen::NowPlaying, 0, PressKind::Single) => Some(Command::PlayPause),
        (Screen::NowPlaying, 1, PressKind::Single) => Some(Command::NextTrack),
        (Screen::NowPlaying, 2, PressKind::Single) => Some(Command::PreviousTrack),

        (Screen::Devices, 0, PressKind::Single) => Some(Command::SelectItem),
        (Screen::Devices, 1, PressKind::Single) => Some(Command::NavigateDown),
        (Screen::Devices, 2, PressKind::Single) => Some(Command::NavigateUp),

        _ => None,
    }
}
