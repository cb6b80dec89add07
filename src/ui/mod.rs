//! User interface subsystem - TFT screens and device-list state.
//!
//! Two screens share the three buttons: the now-playing view (default)
//! and the Spotify Connect device picker, reached with a triple press
//! on any button. The selection state for the picker lives here so it
//! can be exercised in host tests; rendering is in [`display`] and
//! only compiles for the device target.

pub mod input_logic;

#[cfg(feature = "embedded")]
pub mod display;

use heapless::{String, Vec};

use crate::config::DEVICE_LIST_MAX;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Default view: current track, artist, album, progress.
    NowPlaying,
    /// Spotify Connect device picker.
    Devices,
}

impl Screen {
    /// The screen a `ToggleScreen` command switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::NowPlaying => Self::Devices,
            Self::Devices => Self::NowPlaying,
        }
    }
}

/// One Spotify Connect playback device shown in the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Vendor device id (opaque, used for playback transfer).
    pub id: String<64>,
    /// Human-readable name shown in the list.
    pub name: String<48>,
    /// Whether playback is currently routed to this device.
    pub is_active: bool,
}

/// Device picker state: the discovered devices plus a selection cursor.
#[derive(Clone, Debug, Default)]
pub struct DeviceList {
    entries: Vec<DeviceEntry, DEVICE_LIST_MAX>,
    selected: usize,
}

impl DeviceList {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
        }
    }

    /// Replace the list contents, keeping the cursor in range.
    pub fn set_entries(&mut self, entries: Vec<DeviceEntry, DEVICE_LIST_MAX>) {
        self.entries = entries;
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    /// Move the cursor one item up (wraps to the bottom).
    pub fn navigate_up(&mut self) {
        self.selected = input_logic::select_prev(self.selected, self.entries.len());
    }

    /// Move the cursor one item down (wraps to the top).
    pub fn navigate_down(&mut self) {
        self.selected = input_logic::select_next(self.selected, self.entries.len());
    }

    /// Currently highlighted device, if the list is non-empty.
    pub fn selected_entry(&self) -> Option<&DeviceEntry> {
        self.entries.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
