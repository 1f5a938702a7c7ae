use crate::objects::*;
use crate::Error;
use crate::GtfsReader;
use log::info;
use std::path::Path;

/// Data structure that maps the CSV files with little intelligence
///
/// Every file keeps its own [Result], so a broken file does not hide what could be read from the
/// others. To query the transit data, [crate::Gtfs] is what you want.
#[derive(Debug)]
pub struct RawGtfs {
    /// Time needed to read and parse the directory in milliseconds
    pub read_duration: i64,
    /// All Agencies
    pub agencies: Result<Vec<Agency>, Error>,
    /// All Stops
    pub stops: Result<Vec<Stop>, Error>,
    /// All Routes
    pub routes: Result<Vec<Route>, Error>,
    /// All Trips
    pub trips: Result<Vec<Trip>, Error>,
    /// All Calendar
    pub calendar: Result<Vec<Calendar>, Error>,
    /// All shapes points, in file order
    pub shapes: Result<Vec<ShapePoint>, Error>,
    /// All places, None if the reader was told to skip them
    pub places: Option<Result<Vec<Place>, Error>>,
    /// All files that are present in the directory
    pub files: Vec<String>,
}

impl RawGtfs {
    /// Logs some basic statistics about the feed (numbers of elements for each file). Mostly to be sure that everything was read
    pub fn print_stats(&self) {
        info!("GTFS data read in {} ms", self.read_duration);
        info!("  Agencies: {}", mandatory_file_summary(&self.agencies));
        info!("  Stops: {}", mandatory_file_summary(&self.stops));
        info!("  Routes: {}", mandatory_file_summary(&self.routes));
        info!("  Trips: {}", mandatory_file_summary(&self.trips));
        info!("  Calendar: {}", mandatory_file_summary(&self.calendar));
        info!("  Shape points: {}", mandatory_file_summary(&self.shapes));
        info!("  Places: {}", optional_file_summary(&self.places));
    }

    /// Reads the raw GTFS from a local directory
    pub fn from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        GtfsReader::default().raw().read_from_path(path)
    }
}

fn mandatory_file_summary<T>(objs: &Result<Vec<T>, Error>) -> String {
    match objs {
        Ok(vec) => format!("{} objects", vec.len()),
        Err(e) => format!("Could not read {}", e),
    }
}

fn optional_file_summary<T>(objs: &Option<Result<Vec<T>, Error>>) -> String {
    match objs {
        Some(objs) => mandatory_file_summary(objs),
        None => "Not read".to_string(),
    }
}
