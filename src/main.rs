//! spotideck firmware entry point.
//!
//! One cooperative loop owns everything: sample the buttons, advance
//! the input state machine, execute the resulting commands against
//! the Spotify API, refresh the playback snapshot periodically, and
//! repaint the TFT when something changed. Nothing in the loop blocks
//! longer than a feedback beep, so input polling and the display stay
//! responsive.

use std::time::Instant;

use display_interface_spi::SPIInterface;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, OutputPin as _, PinDriver, Pull};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi::{config as spi_config, SpiDeviceDriver, SpiDriverConfig};
use esp_idf_svc::log::EspLogger;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};
use mipidsi::models::ST7789;
use mipidsi::Builder;

use spotideck::config::{
    DISPLAY_HEIGHT, DISPLAY_SPI_HZ, DISPLAY_WIDTH, POLL_PERIOD_MS, SPOTIFY_POLL_INTERVAL_MS,
    SPOTIFY_SETTLE_MS,
};
use spotideck::feedback::{self, Beep};
use spotideck::input::{Command, InputPoller};
use spotideck::ui::display;
use spotideck::ui::{DeviceList, Screen};

mod audio;
mod error;
mod spotify;
mod storage;
mod wifi;

use audio::Buzzer;
use error::{Error, Result};
use spotify::{PlaybackState, SpotifyClient};
use storage::Storage;
use wifi::Wifi;

/// Tone for "selected device is already active, nothing to transfer".
const ALREADY_ACTIVE: &[Beep] = &[Beep {
    freq_hz: 800,
    duration_ms: 200,
}];

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();
    info!("spotideck starting");

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // Buttons are active-low with internal pull-ups; the `is_low`
    // sampling below is the polarity normalization the input core
    // expects ("pressed" == true).
    let mut button1 = PinDriver::input(peripherals.pins.gpio1)?;
    let mut button2 = PinDriver::input(peripherals.pins.gpio2)?;
    let mut button3 = PinDriver::input(peripherals.pins.gpio3)?;
    button1.set_pull(Pull::Up)?;
    button2.set_pull(Pull::Up)?;
    button3.set_pull(Pull::Up)?;

    // TFT on SPI2.
    let spi = SpiDeviceDriver::new_single(
        peripherals.spi2,
        peripherals.pins.gpio14,
        peripherals.pins.gpio13,
        Option::<AnyIOPin>::None,
        Some(peripherals.pins.gpio15),
        &SpiDriverConfig::new(),
        &spi_config::Config::new().baudrate(DISPLAY_SPI_HZ.Hz()),
    )?;
    let dc = PinDriver::output(peripherals.pins.gpio16)?;
    let rst = PinDriver::output(peripherals.pins.gpio17)?;
    let mut delay = FreeRtos;
    let mut tft = Builder::new(ST7789, SPIInterface::new(spi, dc))
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .reset_pin(rst)
        .init(&mut delay)
        .map_err(|_| Error::Display)?;

    let mut buzzer = Buzzer::new(
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        peripherals.pins.gpio21.downgrade_output(),
    );

    display::draw_status(&mut tft, "connecting to wifi...");

    let mut storage = Storage::open(nvs.clone())?;
    let creds = storage.credentials()?.ok_or(Error::NoCredentials)?;
    let mut wifi = Wifi::new(peripherals.modem, sysloop, nvs)?;
    wifi.connect(&creds)?;

    let refresh_token = storage.refresh_token()?.ok_or(Error::NoRefreshToken)?;
    let mut spotify = SpotifyClient::new(refresh_token);
    match spotify.refresh_access_token() {
        Ok(()) => storage.set_refresh_token(spotify.refresh_token())?,
        Err(e) => warn!("spotify: initial token refresh failed: {e}"),
    }

    display::draw_status(&mut tft, "fetching playback...");

    // Loop state.
    let boot = Instant::now();
    let mut poller = InputPoller::new();
    let mut screen = Screen::NowPlaying;
    let mut device_list = DeviceList::new();
    let mut playback: Option<PlaybackState> = None;
    let mut last_fetch_ms: u32 = 0;
    let mut fetch_due = true;
    let mut dirty = true;
    let mut wifi_retries: u32 = 0;

    loop {
        let now_ms = boot.elapsed().as_millis() as u32;

        if !wifi.is_up() {
            wifi_retries += 1;
            if let Err(e) = wifi.reconnect(wifi_retries) {
                warn!("wifi: reconnect failed: {e}");
            } else {
                wifi_retries = 0;
                dirty = true;
            }
        }

        let samples = [button1.is_low(), button2.is_low(), button3.is_low()];
        for command in poller.poll_tick(samples, now_ms, screen) {
            let refetch = handle_command(
                command,
                &mut screen,
                &mut spotify,
                &mut device_list,
                &mut buzzer,
                playback.as_ref(),
            );
            if refetch {
                // Give the API a moment to reflect the change before
                // reading the state back.
                FreeRtos::delay_ms(SPOTIFY_SETTLE_MS);
                fetch_due = true;
            }
            dirty = true;
        }

        if fetch_due || now_ms.wrapping_sub(last_fetch_ms) >= SPOTIFY_POLL_INTERVAL_MS {
            if wifi.is_up() {
                match spotify.playback_state() {
                    Ok(state) => {
                        if state != playback {
                            playback = state;
                            dirty = true;
                        }
                    }
                    Err(e) => warn!("spotify: playback fetch failed: {e}"),
                }
            }
            last_fetch_ms = now_ms;
            fetch_due = false;
        }

        if dirty {
            redraw(&mut tft, screen, playback.as_ref(), &device_list, wifi.is_up());
            dirty = false;
        }

        FreeRtos::delay_ms(POLL_PERIOD_MS);
    }
}

/// Execute one classified input command. Returns `true` when the
/// playback snapshot should be re-fetched because we changed it.
fn handle_command(
    command: Command,
    screen: &mut Screen,
    spotify: &mut SpotifyClient,
    device_list: &mut DeviceList,
    buzzer: &mut Buzzer,
    playback: Option<&PlaybackState>,
) -> bool {
    info!("command: {:?}", command);

    match command {
        Command::PlayPause => {
            let _ = buzzer.play(feedback::sequence(command));
            let result = match playback {
                Some(state) if state.is_playing => spotify.pause(),
                _ => spotify.play(),
            };
            if let Err(e) = result {
                warn!("spotify: play/pause failed: {e}");
            }
            true
        }
        Command::NextTrack => {
            let _ = buzzer.play(feedback::sequence(command));
            if let Err(e) = spotify.next() {
                warn!("spotify: next failed: {e}");
            }
            true
        }
        Command::PreviousTrack => {
            let _ = buzzer.play(feedback::sequence(command));
            if let Err(e) = spotify.previous() {
                warn!("spotify: previous failed: {e}");
            }
            true
        }
        Command::NavigateUp => {
            device_list.navigate_up();
            let _ = buzzer.play(feedback::sequence(command));
            false
        }
        Command::NavigateDown => {
            device_list.navigate_down();
            let _ = buzzer.play(feedback::sequence(command));
            false
        }
        Command::SelectItem => {
            let Some(entry) = device_list.selected_entry() else {
                let _ = buzzer.play(ALREADY_ACTIVE);
                return false;
            };
            if entry.is_active {
                // Playback already routed here, nothing to transfer.
                let _ = buzzer.play(ALREADY_ACTIVE);
                return false;
            }
            let _ = buzzer.play(feedback::sequence(command));
            match spotify.transfer(entry.id.as_str()) {
                Ok(()) => true,
                Err(e) => {
                    warn!("spotify: transfer failed: {e}");
                    false
                }
            }
        }
        Command::ToggleScreen => {
            *screen = screen.toggled();
            let _ = buzzer.play(feedback::screen_enter(*screen));
            if *screen == Screen::Devices {
                // Entering the picker refreshes the list.
                match spotify.devices() {
                    Ok(entries) => device_list.set_entries(entries),
                    Err(e) => warn!("spotify: device list failed: {e}"),
                }
            }
            false
        }
    }
}

fn redraw<DI, RST>(
    tft: &mut display::Tft<DI, RST>,
    screen: Screen,
    playback: Option<&PlaybackState>,
    device_list: &DeviceList,
    wifi_up: bool,
) where
    DI: display_interface::WriteOnlyDataCommand,
    RST: embedded_hal::digital::OutputPin,
{
    match screen {
        Screen::NowPlaying => match playback {
            Some(state) => {
                let progress_permille = if state.duration_ms > 0 {
                    ((u64::from(state.progress_ms) * 1000) / u64::from(state.duration_ms)) as u16
                } else {
                    0
                };
                display::draw_now_playing(
                    tft,
                    &state.track,
                    &state.artist,
                    &state.album,
                    state.is_playing,
                    progress_permille,
                    wifi_up,
                );
            }
            None => display::draw_status(tft, "nothing playing"),
        },
        Screen::Devices => {
            display::draw_devices(tft, device_list.entries(), device_list.selected_index())
        }
    }
}
