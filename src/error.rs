//! Unified error type for the firmware binary.
//!
//! Collaborator failures (WiFi, HTTP, JSON, NVS, display) funnel into
//! one enum so the main loop can log and degrade uniformly. The input
//! core has no error states by design and never produces these.

use core::fmt;

use esp_idf_svc::sys::EspError;

/// Top-level error type used across the firmware.
#[derive(Debug)]
pub enum Error {
    /// ESP-IDF service call failed (WiFi, NVS, GPIO, LEDC, ...).
    Esp(EspError),

    /// WiFi connected but never got an IP inside the timeout.
    WifiTimeout,

    /// No stored WiFi credentials and none compiled in.
    NoCredentials,

    /// The Spotify API rejected our token even after a refresh.
    Auth,

    /// Unexpected HTTP status from the Spotify API.
    Http(u16),

    /// Response body was not the JSON shape we expect.
    Json,

    /// No Spotify refresh token provisioned.
    NoRefreshToken,

    /// SPI transaction to the display failed.
    Display,
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Esp(e) => write!(f, "esp-idf error: {e}"),
            Error::WifiTimeout => write!(f, "wifi connect timed out"),
            Error::NoCredentials => write!(f, "no wifi credentials provisioned"),
            Error::Auth => write!(f, "spotify auth failed after token refresh"),
            Error::Http(status) => write!(f, "spotify api returned http {status}"),
            Error::Json => write!(f, "unexpected spotify response shape"),
            Error::NoRefreshToken => write!(f, "no spotify refresh token provisioned"),
            Error::Display => write!(f, "display spi transaction failed"),
        }
    }
}

// Convenience conversions

impl From<EspError> for Error {
    fn from(e: EspError) -> Self {
        Error::Esp(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Error::Json
    }
}
