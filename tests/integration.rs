//! Integration tests for the spotideck input pipeline.
//!
//! Each test scripts raw GPIO levels over simulated time, runs the
//! polling driver at a fixed tick cadence, and asserts on the commands
//! that come out the far end - the same path the firmware loop drives,
//! minus the hardware.

use spotideck::input::{Command, InputPoller};
use spotideck::ui::Screen;

/// Simulated poll cadence. Finer than the firmware's 30 ms so the
/// commit-time assertions are tight.
const TICK_MS: u32 = 10;

/// Raw-level script: half-open `(start, end)` intervals per channel
/// during which the (polarity-normalized) sample reads pressed.
struct Script<'a> {
    presses: [&'a [(u32, u32)]; 3],
}

impl Script<'_> {
    fn sample(&self, channel: usize, t: u32) -> bool {
        self.presses[channel].iter().any(|&(s, e)| t >= s && t < e)
    }
}

/// Run the script from t=0 to `until_ms`, collecting (time, command).
fn run(script: &Script, screen: Screen, until_ms: u32) -> Vec<(u32, Command)> {
    let mut poller = InputPoller::new();
    let mut out = Vec::new();
    let mut t = 0;
    while t <= until_ms {
        let samples = [
            script.sample(0, t),
            script.sample(1, t),
            script.sample(2, t),
        ];
        for command in poller.poll_tick(samples, t, screen) {
            out.push((t, command));
        }
        t += TICK_MS;
    }
    out
}

// Clean 100 ms presses starting at t produce a debounced press edge at
// t + 60 with this tick cadence: the raw transition lands on a tick,
// and the first tick strictly past the 50 ms settle window commits.

#[test]
fn triple_press_toggles_screen() {
    // Presses at 0 / 300 / 650: edges at 60 / 360 / 710, all inside
    // one 800 ms window.
    let script = Script {
        presses: [&[(0, 100), (300, 400), (650, 750)], &[], &[]],
    };
    let out = run(&script, Screen::NowPlaying, 3_000);
    assert_eq!(out, vec![(710, Command::ToggleScreen)]);
}

#[test]
fn lone_press_commits_deferred_single() {
    let script = Script {
        presses: [&[], &[(0, 100)], &[]],
    };
    let out = run(&script, Screen::NowPlaying, 3_000);
    // Edge at 60, window closes 800 ms later, committed on that tick.
    assert_eq!(out, vec![(860, Command::NextTrack)]);
}

#[test]
fn double_press_is_a_single_not_a_double() {
    let script = Script {
        presses: [&[(0, 100), (300, 400)], &[], &[]],
    };
    let out = run(&script, Screen::NowPlaying, 3_000);
    // The second press (edge at 360) re-arms the deferred single; one
    // PlayPause fires a full window after it, and nothing else.
    assert_eq!(out, vec![(1160, Command::PlayPause)]);
}

#[test]
fn channels_classify_independently() {
    // Triple on channel 0 interleaved with a lone press on channel 2:
    // each channel's outcome matches its outcome in isolation.
    let script = Script {
        presses: [
            &[(0, 100), (300, 400), (650, 750)],
            &[],
            &[(100, 200)],
        ],
    };
    let out = run(&script, Screen::NowPlaying, 3_000);
    assert_eq!(
        out,
        vec![
            (710, Command::ToggleScreen),
            (960, Command::PreviousTrack),
        ]
    );
}

#[test]
fn contact_bounce_produces_nothing() {
    // Raw level flickering faster than the settle window.
    let script = Script {
        presses: [&[(0, 20), (40, 60), (80, 100)], &[], &[]],
    };
    let out = run(&script, Screen::NowPlaying, 3_000);
    assert!(out.is_empty());
}

#[test]
fn device_screen_remaps_singles() {
    for (channel, expected) in [
        (0, Command::SelectItem),
        (1, Command::NavigateDown),
        (2, Command::NavigateUp),
    ] {
        let mut presses: [&[(u32, u32)]; 3] = [&[], &[], &[]];
        presses[channel] = &[(0, 100)];
        let out = run(&Script { presses }, Screen::Devices, 3_000);
        assert_eq!(out, vec![(860, expected)]);
    }
}

#[test]
fn screen_follows_toggle_between_gestures() {
    // Firmware-loop shape: the screen flips when ToggleScreen comes
    // out, so a later single lands on the device picker mapping.
    let script = Script {
        presses: [
            &[(0, 100), (200, 300), (400, 500)],
            &[(2_000, 2_100)],
            &[],
        ],
    };
    let mut poller = InputPoller::new();
    let mut screen = Screen::NowPlaying;
    let mut out = Vec::new();
    let mut t = 0;
    while t <= 4_000 {
        let samples = [
            script.sample(0, t),
            script.sample(1, t),
            script.sample(2, t),
        ];
        for command in poller.poll_tick(samples, t, screen) {
            if command == Command::ToggleScreen {
                screen = screen.toggled();
            }
            out.push((t, command));
        }
        t += TICK_MS;
    }
    assert_eq!(
        out,
        vec![
            (460, Command::ToggleScreen),
            (2_860, Command::NavigateDown),
        ]
    );
    assert_eq!(screen, Screen::Devices);
}

#[test]
fn pipeline_survives_tick_counter_wraparound() {
    let start = u32::MAX - 205; // press spans the rollover
    let mut poller = InputPoller::new();
    let mut out = Vec::new();
    let mut t = start;
    for _ in 0..400 {
        let pressed = t.wrapping_sub(start) < 100;
        for command in poller.poll_tick([false, pressed, false], t, Screen::NowPlaying) {
            out.push((t.wrapping_sub(start), command));
        }
        t = t.wrapping_add(TICK_MS);
    }
    // Edge 60 ms after the raw press, single one window later - the
    // same shape as the no-wraparound run.
    assert_eq!(out, vec![(860, Command::NextTrack)]);
}

#[test]
fn held_button_is_one_press() {
    // Holding for three seconds is still a single press: one edge,
    // one deferred single, no repeats.
    let script = Script {
        presses: [&[(0, 3_000)], &[], &[]],
    };
    let out = run(&script, Screen::NowPlaying, 5_000);
    assert_eq!(out, vec![(860, Command::PlayPause)]);
}
