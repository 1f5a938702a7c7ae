mod arrivals;
mod configuration;
mod web;
mod web_app_data;

use anyhow::Context;
use gtfs_structure::Gtfs;
use log::info;
use std::sync::Arc;

use crate::arrivals::KentkartClient;
use crate::configuration::Configuration;
use crate::web_app_data::AppData;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Configuration::from_env()?;

    info!("Loading GTFS data from {}", config.data_dir.display());
    let gtfs = Gtfs::from_path(&config.data_dir).with_context(|| {
        format!("failed to load GTFS data from {}", config.data_dir.display())
    })?;
    gtfs.print_stats();

    let arrivals = KentkartClient::new(&config.arrivals)?;
    let appdata = AppData::new(gtfs, Arc::new(arrivals));

    let rt = tokio::runtime::Runtime::new().context("starting the tokio runtime")?;
    rt.block_on(web::main(appdata, &config));
    Ok(())
}
