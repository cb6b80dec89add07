//! Spotify Web API client.
//!
//! Blocking HTTPS against `api.spotify.com`, authenticated with a
//! bearer token kept fresh from the stored refresh token. Every call
//! is short and synchronous; the main loop invokes them between input
//! polls, accepting the latency because playback control is the whole
//! point of the device.
//!
//! Only the fields the TFT can show are parsed out of the JSON; the
//! rest of each response is dropped on the floor.

use embedded_svc::http::client::Client as HttpClient;
use embedded_svc::http::{Method, Status};
use embedded_svc::io::Write;
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
use log::{debug, info, warn};
use serde::Deserialize;

use spotideck::config::DEVICE_LIST_MAX;
use spotideck::ui::DeviceEntry;

use crate::error::{Error, Result};

const API_BASE: &str = "https://api.spotify.com/v1";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Response bodies above this size are truncated before parsing; the
/// player endpoint stays well below it.
const MAX_BODY: usize = 16 * 1024;

// OAuth app credentials are compiled in, like the WiFi defaults.
const CLIENT_ID: &str = match option_env!("SPOTIDECK_CLIENT_ID") {
    Some(id) => id,
    None => "",
};
const CLIENT_SECRET: &str = match option_env!("SPOTIDECK_CLIENT_SECRET") {
    Some(secret) => secret,
    None => "",
};

/// Playback snapshot reduced to what the now-playing screen shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub track: String,
    pub artist: String,
    pub album: String,
    pub image_url: String,
    pub duration_ms: u32,
    pub progress_ms: u32,
    pub is_playing: bool,
}

// Wire shapes (serde renames where the API names clash with Rust)

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct PlayerResponse {
    is_playing: bool,
    #[serde(default)]
    progress_ms: Option<u32>,
    item: Option<TrackItem>,
}

#[derive(Deserialize)]
struct TrackItem {
    name: String,
    duration_ms: u32,
    album: AlbumItem,
    artists: Vec<ArtistItem>,
}

#[derive(Deserialize)]
struct AlbumItem {
    name: String,
    #[serde(default)]
    images: Vec<ImageItem>,
}

#[derive(Deserialize)]
struct ArtistItem {
    name: String,
}

#[derive(Deserialize)]
struct ImageItem {
    url: String,
}

#[derive(Deserialize)]
struct DevicesResponse {
    devices: Vec<DeviceItem>,
}

#[derive(Deserialize)]
struct DeviceItem {
    id: Option<String>,
    name: String,
    is_active: bool,
}

pub struct SpotifyClient {
    access_token: Option<String>,
    refresh_token: String,
}

impl SpotifyClient {
    pub fn new(refresh_token: String) -> Self {
        Self {
            access_token: None,
            refresh_token,
        }
    }

    /// Current refresh token; the accounts endpoint occasionally
    /// rotates it, so the caller persists this after a refresh.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    fn connection() -> Result<HttpClient<EspHttpConnection>> {
        let connection = EspHttpConnection::new(&HttpConfiguration {
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })?;
        Ok(HttpClient::wrap(connection))
    }

    /// Exchange the refresh token for a fresh access token.
    pub fn refresh_access_token(&mut self) -> Result<()> {
        if self.refresh_token.is_empty() {
            return Err(Error::NoRefreshToken);
        }

        let body = format!(
            "grant_type=refresh_token&refresh_token={}&client_id={}&client_secret={}",
            self.refresh_token, CLIENT_ID, CLIENT_SECRET
        );

        let mut client = Self::connection()?;
        let content_length = body.len().to_string();
        let headers = [
            ("Content-Type", "application/x-www-form-urlencoded"),
            ("Content-Length", content_length.as_str()),
        ];
        let mut request = client.request(Method::Post, TOKEN_URL, &headers)?;
        request.write_all(body.as_bytes()).map_err(|_| Error::Auth)?;
        let mut response = request.submit()?;

        let status = response.status();
        let raw = read_body(&mut response)?;
        if status != 200 {
            warn!("spotify: token refresh failed, http {}", status);
            return Err(Error::Http(status));
        }

        let token: TokenResponse = serde_json::from_slice(&raw)?;
        self.access_token = Some(token.access_token);
        if let Some(rotated) = token.refresh_token {
            self.refresh_token = rotated;
        }
        info!("spotify: access token refreshed");
        Ok(())
    }

    /// Authenticated request with a single refresh-and-retry on 401.
    fn request(&mut self, method: Method, url: &str, body: &[u8]) -> Result<(u16, Vec<u8>)> {
        if self.access_token.is_none() {
            self.refresh_access_token()?;
        }

        for attempt in 0..2 {
            let token = self.access_token.as_deref().unwrap_or("");
            let auth = format!("Bearer {token}");
            let content_length = body.len().to_string();
            let headers = [
                ("Authorization", auth.as_str()),
                ("Content-Type", "application/json"),
                ("Content-Length", content_length.as_str()),
            ];

            let mut client = Self::connection()?;
            let mut request = client.request(method, url, &headers)?;
            if !body.is_empty() {
                request.write_all(body).map_err(|_| Error::Http(0))?;
            }
            let mut response = request.submit()?;
            let status = response.status();
            let raw = read_body(&mut response)?;

            if status == 401 && attempt == 0 {
                debug!("spotify: 401, refreshing token");
                self.refresh_access_token()?;
                continue;
            }
            return Ok((status, raw));
        }

        Err(Error::Auth)
    }

    /// Current playback, or `None` when nothing is active (HTTP 204).
    pub fn playback_state(&mut self) -> Result<Option<PlaybackState>> {
        let url = format!("{API_BASE}/me/player");
        let (status, raw) = self.request(Method::Get, &url, &[])?;
        match status {
            200 => {}
            204 => return Ok(None),
            _ => return Err(Error::Http(status)),
        }

        let player: PlayerResponse = serde_json::from_slice(&raw)?;
        let Some(item) = player.item else {
            return Ok(None);
        };

        let artist = item
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Some(PlaybackState {
            track: item.name,
            artist,
            album: item.album.name,
            image_url: item
                .album
                .images
                .first()
                .map(|i| i.url.clone())
                .unwrap_or_default(),
            duration_ms: item.duration_ms,
            progress_ms: player.progress_ms.unwrap_or(0),
            is_playing: player.is_playing,
        }))
    }

    pub fn play(&mut self) -> Result<()> {
        self.control(Method::Put, "play")
    }

    pub fn pause(&mut self) -> Result<()> {
        self.control(Method::Put, "pause")
    }

    pub fn next(&mut self) -> Result<()> {
        self.control(Method::Post, "next")
    }

    pub fn previous(&mut self) -> Result<()> {
        self.control(Method::Post, "previous")
    }

    fn control(&mut self, method: Method, action: &str) -> Result<()> {
        let url = format!("{API_BASE}/me/player/{action}");
        let (status, _) = self.request(method, &url, &[])?;
        // 404 means no active device - not worth failing the loop over.
        if status < 400 || status == 404 {
            debug!("spotify: {} -> http {}", action, status);
            Ok(())
        } else {
            Err(Error::Http(status))
        }
    }

    /// Available Spotify Connect devices, shaped for the picker.
    pub fn devices(&mut self) -> Result<heapless::Vec<DeviceEntry, DEVICE_LIST_MAX>> {
        let url = format!("{API_BASE}/me/player/devices");
        let (status, raw) = self.request(Method::Get, &url, &[])?;
        if status != 200 {
            return Err(Error::Http(status));
        }

        let parsed: DevicesResponse = serde_json::from_slice(&raw)?;
        let mut entries = heapless::Vec::new();
        for device in parsed.devices {
            let Some(id) = device.id else {
                continue; // restricted devices carry no id
            };
            let entry = DeviceEntry {
                id: truncated(&id),
                name: truncated(&device.name),
                is_active: device.is_active,
            };
            if entries.push(entry).is_err() {
                break;
            }
        }
        Ok(entries)
    }

    /// Route playback to `device_id`.
    pub fn transfer(&mut self, device_id: &str) -> Result<()> {
        let url = format!("{API_BASE}/me/player");
        let body = format!("{{\"device_ids\":[\"{device_id}\"],\"play\":true}}");
        let (status, _) = self.request(Method::Put, &url, body.as_bytes())?;
        if status < 400 {
            info!("spotify: playback transferred");
            Ok(())
        } else {
            Err(Error::Http(status))
        }
    }
}

/// Copy a str into a heapless string, truncating on overflow.
fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn read_body(response: &mut impl embedded_svc::io::Read) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = response.read(&mut chunk).map_err(|_| Error::Json)?;
        if n == 0 {
            break;
        }
        if raw.len() + n > MAX_BODY {
            warn!("spotify: response body truncated at {} bytes", MAX_BODY);
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
    }
    Ok(raw)
}
