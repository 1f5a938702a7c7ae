use crate::arrivals::ArrivalsSource;
use gtfs_structure::Gtfs;
use std::sync::Arc;

/// State shared by every request. Nothing in it changes after startup
pub struct AppData {
    pub gtfs: Arc<Gtfs>,
    pub arrivals: Arc<dyn ArrivalsSource>,
}

impl AppData {
    pub fn new(gtfs: Gtfs, arrivals: Arc<dyn ArrivalsSource>) -> Arc<AppData> {
        Arc::new(AppData {
            gtfs: Arc::new(gtfs),
            arrivals,
        })
    }
}
