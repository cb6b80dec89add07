//! NVS-backed provisioning storage.
//!
//! One namespace holds the WiFi credentials and the Spotify refresh
//! token so a device survives power cycles without re-provisioning.
//! Compile-time defaults from the build environment
//! (`SPOTIDECK_WIFI_SSID`, `SPOTIDECK_WIFI_PASS`,
//! `SPOTIDECK_REFRESH_TOKEN`) seed the very first boot of a freshly
//! flashed unit.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::info;

use crate::error::Result;

const NAMESPACE: &str = "spotideck";
const KEY_SSID: &str = "wifi_ssid";
const KEY_PASS: &str = "wifi_pass";
const KEY_REFRESH: &str = "sp_refresh";

/// WiFi station credentials.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

pub struct Storage {
    nvs: EspNvs<NvsDefault>,
}

impl Storage {
    pub fn open(partition: EspDefaultNvsPartition) -> Result<Self> {
        Ok(Self {
            nvs: EspNvs::new(partition, NAMESPACE, true)?,
        })
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        // Refresh tokens are the longest value we store (~300 bytes).
        let mut buf = [0u8; 512];
        Ok(self.nvs.get_str(key, &mut buf)?.map(str::to_owned))
    }

    /// Stored WiFi credentials, or the compiled-in defaults.
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        let ssid = match self.get_string(KEY_SSID)? {
            Some(ssid) => ssid,
            None => match option_env!("SPOTIDECK_WIFI_SSID") {
                Some(ssid) => ssid.to_owned(),
                None => return Ok(None),
            },
        };
        let password = match self.get_string(KEY_PASS)? {
            Some(password) => password,
            None => option_env!("SPOTIDECK_WIFI_PASS").unwrap_or("").to_owned(),
        };
        Ok(Some(Credentials { ssid, password }))
    }

    pub fn set_credentials(&mut self, creds: &Credentials) -> Result<()> {
        self.nvs.set_str(KEY_SSID, &creds.ssid)?;
        self.nvs.set_str(KEY_PASS, &creds.password)?;
        info!("storage: wifi credentials saved");
        Ok(())
    }

    /// Stored Spotify refresh token, or the compiled-in default.
    pub fn refresh_token(&self) -> Result<Option<String>> {
        match self.get_string(KEY_REFRESH)? {
            Some(token) => Ok(Some(token)),
            None => Ok(option_env!("SPOTIDECK_REFRESH_TOKEN").map(str::to_owned)),
        }
    }

    /// Persist a rotated refresh token handed back by the accounts
    /// endpoint.
    pub fn set_refresh_token(&mut self, token: &str) -> Result<()> {
        self.nvs.set_str(KEY_REFRESH, token)?;
        info!("storage: refresh token updated");
        Ok(())
    }
}
