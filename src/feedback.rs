//! Audible feedback tone tables.
//!
//! Every command is acknowledged with a short beep sequence on the
//! piezo. The tables are const data so the mapping is testable on the
//! host; the `audio` module in the firmware binary actually plays
//! them over LEDC PWM.

use crate::input::Command;
use crate::ui::Screen;

/// One beep: square-wave frequency and duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beep {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

const fn beep(freq_hz: u32, duration_ms: u32) -> Beep {
    Beep {
        freq_hz,
        duration_ms,
    }
}

/// Silent gap inserted between the beeps of a sequence (ms).
pub const BEEP_GAP_MS: u32 = 50;

/// Acknowledgement tones for entering a screen: a rising triad into
/// the device picker, a falling one back to now-playing.
pub fn screen_enter(screen: Screen) -> &'static [Beep] {
    const ENTER_DEVICES: &[Beep] = &[beep(1000, 100), beep(1200, 100), beep(1400, 100)];
    const ENTER_NOW_PLAYING: &[Beep] = &[beep(800, 100), beep(600, 100), beep(400, 100)];

    match screen {
        Screen::Devices => ENTER_DEVICES,
        Screen::NowPlaying => ENTER_NOW_PLAYING,
    }
}

/// Acknowledgement tones for a playback or navigation command.
///
/// `ToggleScreen` maps to the rising triad; callers that know the
/// target screen should prefer [`screen_enter`].
pub fn sequence(command: Command) -> &'static [Beep] {
    const PLAY_PAUSE: &[Beep] = &[beep(800, 150)];
    const NEXT: &[Beep] = &[beep(1000, 100), beep(1200, 100)];
    const PREVIOUS: &[Beep] = &[beep(600, 100), beep(500, 100)];
    const NAV_UP: &[Beep] = &[beep(400, 80)];
    const NAV_DOWN: &[Beep] = &[beep(800, 80)];
    const SELECT: &[Beep] = &[beep(1000, 150), beep(1200, 150)];

    match command {
        Command::PlayPause => PLAY_PAUSE,
        Command::NextTrack => NEXT,
        Command::PreviousTrack => PREVIOUS,
        Command::NavigateUp => NAV_UP,
        Command::NavigateDown => NAV_DOWN,
        Command::SelectItem => SELECT,
        Command::ToggleScreen => screen_enter(Screen::Devices),
    }
}
