//! ST7789 TFT rendering.
//!
//! Whole-screen redraws with embedded-graphics primitives - no
//! framebuffer, the panels are small enough that a full repaint fits
//! the loop budget. Draw errors are swallowed: a dropped frame is
//! invisible, a panicking loop is not.

use display_interface::WriteOnlyDataCommand;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_hal::digital::OutputPin;
use mipidsi::models::ST7789;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::ui::DeviceEntry;

/// Concrete panel type; generic over the SPI interface and reset pin
/// so callers pass in their HAL's peripherals.
pub type Tft<DI, RST> = mipidsi::Display<DI, ST7789, RST>;

fn title_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(Rgb565::WHITE)
        .build()
}

fn body_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(Rgb565::CSS_LIGHT_GRAY)
        .build()
}

fn accent_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(Rgb565::GREEN)
        .build()
}

fn clear<DI, RST>(display: &mut Tft<DI, RST>)
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    let _ = display.clear(Rgb565::BLACK);
}

/// Render the now-playing screen.
pub fn draw_now_playing<DI, RST>(
    display: &mut Tft<DI, RST>,
    track: &str,
    artist: &str,
    album: &str,
    is_playing: bool,
    progress_permille: u16,
    wifi_up: bool,
) where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    clear(display);

    let _ = Text::new(track, Point::new(8, 40), title_style()).draw(display);
    let _ = Text::new(artist, Point::new(8, 64), body_style()).draw(display);
    let _ = Text::new(album, Point::new(8, 80), body_style()).draw(display);

    let state = if is_playing { "> playing" } else { "|| paused" };
    let _ = Text::new(state, Point::new(8, 110), accent_style()).draw(display);

    // Progress bar along the bottom.
    let bar_y = i32::from(DISPLAY_HEIGHT) - 24;
    let full_width = u32::from(DISPLAY_WIDTH) - 16;
    let filled = full_width * u32::from(progress_permille.min(1000)) / 1000;
    let _ = Rectangle::new(
        Point::new(8, bar_y),
        Size::new(full_width, 6),
    )
    .into_styled(PrimitiveStyle::with_stroke(Rgb565::CSS_DIM_GRAY, 1))
    .draw(display);
    let _ = Rectangle::new(Point::new(8, bar_y), Size::new(filled, 6))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
        .draw(display);

    draw_wifi_badge(display, wifi_up);
}

/// Render the device picker with the current selection marker.
pub fn draw_devices<DI, RST>(display: &mut Tft<DI, RST>, entries: &[DeviceEntry], selected: usize)
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    clear(display);

    let _ = Text::new("Select device", Point::new(8, 24), title_style()).draw(display);

    if entries.is_empty() {
        let _ = Text::new("No devices found", Point::new(8, 56), body_style()).draw(display);
        return;
    }

    for (row, entry) in entries.iter().enumerate() {
        let marker = if row == selected { ">" } else { " " };
        let style = if entry.is_active {
            accent_style()
        } else {
            body_style()
        };
        let mut line: heapless::String<56> = heapless::String::new();
        let _ = line.push_str(marker);
        let _ = line.push_str(" ");
        let _ = line.push_str(entry.name.as_str());
        let y = 48 + (row as i32 * 14);
        let _ = Text::new(line.as_str(), Point::new(8, y), style).draw(display);
    }
}

/// Render a full-screen status message (boot, WiFi connect, errors).
pub fn draw_status<DI, RST>(display: &mut Tft<DI, RST>, message: &str)
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    clear(display);
    let _ = Text::new("spotideck", Point::new(8, 24), title_style()).draw(display);
    let _ = Text::new(message, Point::new(8, 56), body_style()).draw(display);
}

fn draw_wifi_badge<DI, RST>(display: &mut Tft<DI, RST>, wifi_up: bool)
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    let (label, style) = if wifi_up {
        ("wifi", accent_style())
    } else {
        ("no wifi", body_style())
    };
    let x = i32::from(DISPLAY_WIDTH) - 60;
    let _ = Text::new(label, Point::new(x, 16), style).draw(display);
}
