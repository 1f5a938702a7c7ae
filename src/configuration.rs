use anyhow::Context;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "../../data/kocaeli_transport_data";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ARRIVALS_BASE_URL: &str = "https://service.kentkart.com/rl1/web";
// Kocaeli
const DEFAULT_ARRIVALS_REGION: &str = "004";
const DEFAULT_ARRIVALS_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub bind_address: IpAddr,
    pub port: u16,
    pub arrivals: ArrivalsConfiguration,
}

#[derive(Debug, Clone)]
pub struct ArrivalsConfiguration {
    pub base_url: String,
    pub region: String,
    pub timeout: Duration,
}

impl Configuration {
    /// Reads `GTFS_DATA_DIR`, `PORT`, `KENTKART_BASE_URL`, `KENTKART_REGION` and
    /// `ARRIVALS_TIMEOUT_SECS`. Unset or empty variables take their default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match var("ARRIVALS_TIMEOUT_SECS") {
            Some(secs) => secs.parse().with_context(|| {
                format!("ARRIVALS_TIMEOUT_SECS is not a number of seconds: {secs}")
            })?,
            None => DEFAULT_ARRIVALS_TIMEOUT_SECS,
        };

        Ok(Configuration {
            data_dir: var("GTFS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
            arrivals: ArrivalsConfiguration {
                base_url: var("KENTKART_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ARRIVALS_BASE_URL.to_owned()),
                region: var("KENTKART_REGION")
                    .unwrap_or_else(|| DEFAULT_ARRIVALS_REGION.to_owned()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
