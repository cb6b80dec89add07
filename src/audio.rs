//! Piezo feedback tones over LEDC PWM.
//!
//! A passive piezo needs a square wave; the LEDC peripheral at 50%
//! duty gives us one, and varying the timer frequency per beep plays
//! the short acknowledgement sequences from the `feedback` tables.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::AnyOutputPin;
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, CHANNEL0, TIMER0};
use esp_idf_svc::hal::prelude::*;

use spotideck::feedback::{Beep, BEEP_GAP_MS};

use crate::error::Result;

/// Owns the LEDC timer/channel peripherals and the buzzer pin; the
/// drivers themselves are rebuilt per beep so the timer frequency can
/// change between notes.
pub struct Buzzer {
    timer: TIMER0,
    channel: CHANNEL0,
    pin: AnyOutputPin,
}

impl Buzzer {
    pub fn new(timer: TIMER0, channel: CHANNEL0, pin: AnyOutputPin) -> Self {
        Self {
            timer,
            channel,
            pin,
        }
    }

    /// Play a beep sequence, blocking for its total duration.
    ///
    /// Sequences are three beeps at most, so the longest block is
    /// under half a second - tolerable for direct user feedback.
    pub fn play(&mut self, sequence: &[Beep]) -> Result<()> {
        for beep in sequence {
            let timer_driver = LedcTimerDriver::new(
                &mut self.timer,
                &TimerConfig::default().frequency(beep.freq_hz.Hz()),
            )?;
            let mut channel_driver =
                LedcDriver::new(&mut self.channel, &timer_driver, &mut self.pin)?;

            let max_duty = channel_driver.get_max_duty();
            channel_driver.set_duty(max_duty / 2)?;
            FreeRtos::delay_ms(beep.duration_ms);
            channel_driver.set_duty(0)?;
            FreeRtos::delay_ms(BEEP_GAP_MS);
        }
        Ok(())
    }
}
