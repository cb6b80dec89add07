//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Buttons

/// Number of physical buttons on the device.
pub const BUTTON_COUNT: usize = 3;

/// Settle time (ms) before a raw level change is trusted as real.
pub const DEBOUNCE_MS: u32 = 50;

/// Max span (ms) for three presses to count as a triple, and the delay
/// before a deferred single press fires.
pub const PRESS_WINDOW_MS: u32 = 800;

/// Glitch-rejection floor (ms): presses closer together than this are
/// electrical noise, not fingers.
pub const MIN_PRESS_INTERVAL_MS: u32 = 50;

/// Input poll cadence (ms). Bounded by the UI refresh budget - the
/// same loop also services the display.
pub const POLL_PERIOD_MS: u32 = 30;

// GPIO pin assignments (ESP32-S3 devkit wiring)
//
//   Button 1 (play/pause, select)   → GPIO1
//   Button 2 (next, down)           → GPIO2
//   Button 3 (previous, up)         → GPIO3
//   TFT MOSI                        → GPIO13
//   TFT SCLK                        → GPIO14
//   TFT CS                          → GPIO15
//   TFT DC                          → GPIO16
//   TFT RST                         → GPIO17
//   Piezo buzzer                    → GPIO21
//
// Buttons are active-low with internal pull-ups; polarity is
// normalized at the sampling site so "pressed" reads as `true`
// everywhere past the GPIO layer.

// Display

/// TFT panel size in pixels (landscape).
pub const DISPLAY_WIDTH: u16 = 320;
pub const DISPLAY_HEIGHT: u16 = 240;

/// TFT SPI clock (Hz). The ST7789 is happy at 40 MHz.
pub const DISPLAY_SPI_HZ: u32 = 40_000_000;

// Spotify

/// How often (ms) to poll the playback state when idle.
pub const SPOTIFY_POLL_INTERVAL_MS: u32 = 5_000;

/// Settle delay (ms) after a control command before re-reading the
/// playback state - the API reflects changes with a small lag.
pub const SPOTIFY_SETTLE_MS: u32 = 500;

/// Maximum number of Spotify Connect devices shown in the picker.
pub const DEVICE_LIST_MAX: usize = 10;

// WiFi

/// Reconnect backoff cap (ms).
pub const WIFI_BACKOFF_MAX_MS: u32 = 60_000;
