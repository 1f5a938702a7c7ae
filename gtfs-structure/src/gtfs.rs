use crate::geo::haversine_distance;
use crate::gtfs_reader::PLACES_FILE;
use crate::{objects::*, Error, GtfsReader, RawGtfs};
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::convert::TryFrom;
use std::path::Path;

/// Search radius used when a caller asks for nearby stops without giving one
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

/// Data structure with all the GTFS objects, indexed by identifier
///
/// It is built once by [GtfsReader] and never modified afterwards, so it can be shared freely
/// between threads.
///
/// ```no_run
/// let gtfs = gtfs_structure::Gtfs::from_path("data/kocaeli")?;
/// let nearby = gtfs.nearby_stops(40.7654, 29.9408, gtfs_structure::DEFAULT_RADIUS_METERS);
/// # Ok::<(), gtfs_structure::Error>(())
/// ```
///
/// The maps are [FxHashMap]: their iteration order is arbitrary but does not change from one run
/// to another for the same feed.
#[derive(Default, Debug)]
pub struct Gtfs {
    /// Time needed to read and parse the directory in milliseconds
    pub read_duration: i64,
    /// All agencies by `agency_id`
    pub agencies: FxHashMap<String, Agency>,
    /// All stops by `stop_id`
    pub stops: FxHashMap<String, Stop>,
    /// All routes by `route_id`
    pub routes: FxHashMap<String, Route>,
    /// All trips by `trip_id`
    pub trips: FxHashMap<String, Trip>,
    /// All calendars by `service_id`
    pub calendar: FxHashMap<String, Calendar>,
    /// All shapes by `shape_id`, each sorted by `shape_pt_sequence`
    pub shapes: FxHashMap<String, Vec<ShapePoint>>,
    /// All places by `place_id`. Empty if `places.csv` could not be read
    pub places: FxHashMap<String, Place>,
    /// Every stop of [Gtfs::stops], sorted by identifier
    pub stops_list: Vec<Stop>,
    /// Every route of [Gtfs::routes], sorted by identifier
    pub routes_list: Vec<Route>,
}

impl TryFrom<RawGtfs> for Gtfs {
    type Error = Error;
    /// Tries to build a [Gtfs] from a [RawGtfs]
    ///
    /// It fails if any mandatory file couldn’t be read. A failure on `places.csv` is only logged.
    fn try_from(raw: RawGtfs) -> Result<Gtfs, Error> {
        let agencies = to_map(raw.agencies?);
        let stops = to_map(raw.stops?);
        let routes = to_map(raw.routes?);
        let trips = to_map(raw.trips?);
        let calendar = to_map(raw.calendar?);
        let shapes = to_shape_map(raw.shapes?);

        let places = match raw.places {
            Some(Ok(places)) => to_map(places.into_iter().filter(|p| !p.id.is_empty())),
            Some(Err(e)) => {
                warn!("{} not loaded: {}", PLACES_FILE, e);
                FxHashMap::default()
            }
            None => FxHashMap::default(),
        };

        let stops_list = to_sorted_list(&stops);
        let routes_list = to_sorted_list(&routes);

        Ok(Gtfs {
            read_duration: raw.read_duration,
            agencies,
            stops,
            routes,
            trips,
            calendar,
            shapes,
            places,
            stops_list,
            routes_list,
        })
    }
}

impl Gtfs {
    /// Logs some basic statistics about the GTFS (numbers of elements for each object). Mostly to be sure that everything was read
    pub fn print_stats(&self) {
        info!("GTFS data read in {} ms", self.read_duration);
        info!("  Agencies: {}", self.agencies.len());
        info!("  Stops: {}", self.stops.len());
        info!("  Routes: {}", self.routes.len());
        info!("  Trips: {}", self.trips.len());
        info!("  Calendar entries: {}", self.calendar.len());
        info!("  Shapes: {}", self.shapes.len());
        info!("  Places: {}", self.places.len());
    }

    /// Reads the GTFS from a local directory
    pub fn from_path<P>(path: P) -> Result<Gtfs, Error>
    where
        P: AsRef<Path>,
    {
        GtfsReader::default().read_from_path(path)
    }

    /// All the stops, sorted by identifier
    pub fn stops(&self) -> &[Stop] {
        &self.stops_list
    }

    /// All the routes, sorted by identifier
    pub fn routes(&self) -> &[Route] {
        &self.routes_list
    }

    /// Stops at most `radius` meters (inclusive) from the given point
    ///
    /// This is a linear scan over every stop. The result keeps the order of [Gtfs::stops].
    pub fn nearby_stops(&self, latitude: f64, longitude: f64, radius: f64) -> Vec<&Stop> {
        self.stops_list
            .iter()
            .filter(|stop| {
                haversine_distance(latitude, longitude, stop.latitude, stop.longitude) <= radius
            })
            .collect()
    }

    /// The stop closest to the given point with its distance in meters. None if there are no stops
    pub fn nearest_stop(&self, latitude: f64, longitude: f64) -> Option<(&Stop, f64)> {
        self.stops_list
            .iter()
            .map(|stop| {
                let dist = haversine_distance(latitude, longitude, stop.latitude, stop.longitude);
                (stop, dist)
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    /// Gets a [Stop] by its `stop_id`
    pub fn get_stop<'a>(&'a self, id: &str) -> Result<&'a Stop, Error> {
        self.stops
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Stop, id))
    }

    /// Gets a [Route] by its `route_id`
    pub fn get_route<'a>(&'a self, id: &str) -> Result<&'a Route, Error> {
        self.routes
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Route, id))
    }

    /// Gets a [Trip] by its `trip_id`
    pub fn get_trip<'a>(&'a self, id: &str) -> Result<&'a Trip, Error> {
        self.trips
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Trip, id))
    }

    /// Gets an [Agency] by its `agency_id`
    pub fn get_agency<'a>(&'a self, id: &str) -> Result<&'a Agency, Error> {
        self.agencies
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Agency, id))
    }

    /// Gets a [Calendar] by its `service_id`
    pub fn get_calendar<'a>(&'a self, id: &str) -> Result<&'a Calendar, Error> {
        self.calendar
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Calendar, id))
    }

    /// Gets all [ShapePoint] of a `shape_id`
    pub fn get_shape<'a>(&'a self, id: &str) -> Result<&'a Vec<ShapePoint>, Error> {
        self.shapes
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Shape, id))
    }

    /// Gets a [Place] by its `place_id`
    pub fn get_place<'a>(&'a self, id: &str) -> Result<&'a Place, Error> {
        self.places
            .get(id)
            .ok_or_else(|| not_found(ObjectType::Place, id))
    }

    /// Points of the shape drawn by a route
    ///
    /// The first trip of the route with a `shape_id`, in the iteration order of [Gtfs::trips],
    /// gives the shape. When the trips of a route use several shapes, which one is returned is
    /// arbitrary (but stable for a given feed).
    ///
    /// The result is empty if the route has no such trip or if that shape has no point. An
    /// unknown route is not an error either; check it with [Gtfs::get_route] first.
    pub fn route_shape(&self, route_id: &str) -> &[ShapePoint] {
        self.trips
            .values()
            .find(|trip| trip.route_id == route_id && !trip.shape_id.is_empty())
            .and_then(|trip| self.shapes.get(&trip.shape_id))
            .map(|points| points.as_slice())
            .unwrap_or(&[])
    }

    /// All places, sorted by identifier
    pub fn places(&self) -> Vec<&Place> {
        let mut places: Vec<&Place> = self.places.values().collect();
        places.sort_by(|a, b| a.id.cmp(&b.id));
        places
    }

    /// Places at most `radius` meters (inclusive) from the given point, sorted by identifier
    pub fn nearby_places(&self, latitude: f64, longitude: f64, radius: f64) -> Vec<&Place> {
        self.places()
            .into_iter()
            .filter(|place| {
                haversine_distance(latitude, longitude, place.latitude, place.longitude) <= radius
            })
            .collect()
    }
}

fn not_found(object_type: ObjectType, id: &str) -> Error {
    Error::NotFound {
        object_type,
        id: id.to_owned(),
    }
}

/// Indexes the objects by identifier. The last object with a given identifier wins
fn to_map<O: Id>(elements: impl IntoIterator<Item = O>) -> FxHashMap<String, O> {
    elements
        .into_iter()
        .map(|e| (e.id().to_owned(), e))
        .collect()
}

fn to_sorted_list<O: Id + Clone>(map: &FxHashMap<String, O>) -> Vec<O> {
    let mut list: Vec<O> = map.values().cloned().collect();
    list.sort_by(|a, b| a.id().cmp(b.id()));
    list
}

pub(crate) fn to_shape_map(shapes: Vec<ShapePoint>) -> FxHashMap<String, Vec<ShapePoint>> {
    let mut res = FxHashMap::default();
    for s in shapes {
        let shape = res.entry(s.shape_id.to_owned()).or_insert_with(Vec::new);
        shape.push(s);
    }
    // sort_by_key is stable: points with the same sequence keep their file order
    for shapes in res.values_mut() {
        shapes.sort_by_key(|s| s.sequence);
    }

    res
}
