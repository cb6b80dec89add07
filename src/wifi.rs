//! WiFi station management.
//!
//! Connects with provisioned credentials and brings the link back up
//! after drops with a capped exponential backoff. The main loop never
//! talks to the network while the link is down; it keeps servicing
//! buttons and the display.

use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{info, warn};

use spotideck::config::WIFI_BACKOFF_MAX_MS;

use crate::error::{Error, Result};
use crate::storage::Credentials;

pub struct Wifi<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl Wifi<'_> {
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<Wifi<'static>> {
        let wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        let wifi = BlockingWifi::wrap(wifi, sysloop)?;
        Ok(Wifi { wifi })
    }

    /// Connect as a station and block until DHCP hands out an address.
    pub fn connect(&mut self, creds: &Credentials) -> Result<()> {
        let config = Configuration::Client(ClientConfiguration {
            ssid: creds
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| Error::NoCredentials)?,
            password: creds
                .password
                .as_str()
                .try_into()
                .map_err(|_| Error::NoCredentials)?,
            auth_method: if creds.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        });

        self.wifi.set_configuration(&config)?;
        self.wifi.start()?;
        info!("wifi: connecting to '{}'", creds.ssid);
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        let ip_info = self.wifi.wifi().sta_netif().get_ip_info()?;
        info!("wifi: up, ip {}", ip_info.ip);
        Ok(())
    }

    pub fn is_up(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    /// One reconnect attempt, preceded by a backoff that doubles per
    /// consecutive failure up to the cap.
    pub fn reconnect(&mut self, attempt: u32) -> Result<()> {
        let backoff = 1_000u32
            .saturating_mul(1 << attempt.min(6))
            .min(WIFI_BACKOFF_MAX_MS);
        warn!("wifi: link down, retry {} in {} ms", attempt, backoff);
        FreeRtos::delay_ms(backoff);
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        info!("wifi: reconnected");
        Ok(())
    }
}
