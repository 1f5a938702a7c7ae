pub use crate::enums::*;
use crate::fields::{FromRow, Row};
use serde::Serialize;

/// Objects that have an identifier implement this trait
///
/// Those identifier are technical and should not be shown to travellers
pub trait Id {
    /// Identifier of the object
    fn id(&self) -> &str;
}

/// A transit agency. See <https://gtfs.org/reference/static/#agencytxt>
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Agency {
    /// Unique technical identifier of the agency
    #[serde(rename = "agency_id")]
    pub id: String,
    /// Full name of the transit agency
    #[serde(rename = "agency_name")]
    pub name: String,
    /// URL of the transit agency
    #[serde(rename = "agency_url")]
    pub url: String,
    /// Timezone where the transit agency is located
    #[serde(rename = "agency_timezone")]
    pub timezone: String,
    /// Primary language used by this transit agency
    #[serde(rename = "agency_lang")]
    pub lang: String,
}

impl FromRow for Agency {
    fn from_row(row: &Row) -> Self {
        Agency {
            id: row.string("agency_id"),
            name: row.string("agency_name"),
            url: row.string("agency_url"),
            timezone: row.string("agency_timezone"),
            lang: row.string("agency_lang"),
        }
    }
}

impl Id for Agency {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A physical location where vehicles pick up or drop off riders. See <https://gtfs.org/reference/static/#stopstxt>
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Stop {
    /// Unique technical identifier (not for the traveller) of the stop
    #[serde(rename = "stop_id")]
    pub id: String,
    /// Name of the location
    #[serde(rename = "stop_name")]
    pub name: String,
    /// Latitude of the stop
    #[serde(rename = "stop_lat")]
    pub latitude: f64,
    /// Longitude of the stop
    #[serde(rename = "stop_lon")]
    pub longitude: f64,
    /// Whether wheelchair boardings are possible: 0 unknown, 1 possible, 2 not possible
    pub wheelchair_boarding: i32,
    /// URL of a web page about the location
    #[serde(rename = "stop_url", skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Kind of location: 0 stop or platform, 1 station, 2 entrance…
    pub location_type: i32,
    /// Station this stop belongs to, empty if none
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_station: String,
}

impl FromRow for Stop {
    fn from_row(row: &Row) -> Self {
        Stop {
            id: row.string("stop_id"),
            name: row.string("stop_name"),
            latitude: row.float("stop_lat"),
            longitude: row.float("stop_lon"),
            wheelchair_boarding: row.int("wheelchair_boarding"),
            url: row.string("stop_url"),
            location_type: row.int("location_type"),
            parent_station: row.string("parent_station"),
        }
    }
}

impl Id for Stop {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A group of trips shown to riders as a single service. See <https://gtfs.org/reference/static/#routestxt>
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Route {
    /// Unique technical (not for the traveller) identifier for the route
    #[serde(rename = "route_id")]
    pub id: String,
    /// Agency operating the route
    pub agency_id: String,
    /// Short name of a route, like "32" or "100X"
    #[serde(rename = "route_short_name")]
    pub short_name: String,
    /// Full name of a route
    #[serde(rename = "route_long_name")]
    pub long_name: String,
    /// Raw GTFS route type (0 tram, 3 bus, 4 ferry…). Not validated, see [Route::kind]
    pub route_type: i32,
    /// Description of the route
    #[serde(rename = "route_desc", skip_serializing_if = "String::is_empty")]
    pub desc: String,
    /// Route color, as given in the feed (usually RRGGBB)
    #[serde(rename = "route_color", skip_serializing_if = "String::is_empty")]
    pub color: String,
    /// Color of the text drawn against [Route::color]
    #[serde(rename = "route_text_color", skip_serializing_if = "String::is_empty")]
    pub text_color: String,
    /// URL of a web page about the route
    #[serde(rename = "route_url", skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Route {
    /// Readable view of [Route::route_type]
    pub fn kind(&self) -> RouteType {
        RouteType::from(self.route_type)
    }
}

impl FromRow for Route {
    fn from_row(row: &Row) -> Self {
        Route {
            id: row.string("route_id"),
            agency_id: row.string("agency_id"),
            short_name: row.string("route_short_name"),
            long_name: row.string("route_long_name"),
            route_type: row.int("route_type"),
            desc: row.string("route_desc"),
            color: row.string("route_color"),
            text_color: row.string("route_text_color"),
            url: row.string("route_url"),
        }
    }
}

impl Id for Route {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A trip is a sequence of two or more stops that occurs at specific time. See <https://gtfs.org/reference/static/#tripstxt>
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Trip {
    /// References the [Route] of this trip
    pub route_id: String,
    /// References the [Calendar] on which this trip runs
    pub service_id: String,
    /// Unique technical identifier (not for the traveller) for the Trip
    #[serde(rename = "trip_id")]
    pub id: String,
    /// Direction of travel, 0 or 1
    pub direction_id: i32,
    /// Shape of the trip, empty if the feed has none
    pub shape_id: String,
    /// Text that appears on signage identifying the trip's destination to riders
    #[serde(rename = "trip_headsign", skip_serializing_if = "String::is_empty")]
    pub headsign: String,
    /// Public facing text used to identify the trip to riders
    #[serde(rename = "trip_short_name", skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    /// Wheelchair accessibility: 0 unknown, 1 accessible, 2 not accessible
    pub wheelchair_accessible: i32,
    /// Bikes on board: 0 unknown, 1 allowed, 2 not allowed
    pub bikes_allowed: i32,
}

impl FromRow for Trip {
    fn from_row(row: &Row) -> Self {
        Trip {
            route_id: row.string("route_id"),
            service_id: row.string("service_id"),
            id: row.string("trip_id"),
            direction_id: row.int("direction_id"),
            shape_id: row.string("shape_id"),
            headsign: row.string("trip_headsign"),
            short_name: row.string("trip_short_name"),
            wheelchair_accessible: row.int("wheelchair_accessible"),
            bikes_allowed: row.int("bikes_allowed"),
        }
    }
}

impl Id for Trip {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A calender describes on which days the vehicle runs. See <https://gtfs.org/reference/static/#calendartxt>
///
/// Day flags are kept as they appear in the feed (1 runs, 0 does not)
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Calendar {
    /// Unique technical identifier (not for the traveller) of this calendar
    #[serde(rename = "service_id")]
    pub id: String,
    /// Does the service run on mondays
    pub monday: i32,
    /// Does the service run on tuesdays
    pub tuesday: i32,
    /// Does the service run on wednesdays
    pub wednesday: i32,
    /// Does the service run on thursdays
    pub thursday: i32,
    /// Does the service run on fridays
    pub friday: i32,
    /// Does the service run on saturdays
    pub saturday: i32,
    /// Does the service run on sundays
    pub sunday: i32,
    /// Start service day for the service interval, YYYYMMDD
    pub start_date: String,
    /// End service day for the service interval, YYYYMMDD
    pub end_date: String,
}

/// Day of the week, used to read the flags of a [Calendar]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Calendar {
    /// Returns true if the flag of that day is set. Service dates are not considered
    pub fn runs_on(&self, day: Weekday) -> bool {
        let flag = match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        };
        flag == 1
    }
}

impl FromRow for Calendar {
    fn from_row(row: &Row) -> Self {
        Calendar {
            id: row.string("service_id"),
            monday: row.int("monday"),
            tuesday: row.int("tuesday"),
            wednesday: row.int("wednesday"),
            thursday: row.int("thursday"),
            friday: row.int("friday"),
            saturday: row.int("saturday"),
            sunday: row.int("sunday"),
            start_date: row.string("start_date"),
            end_date: row.string("end_date"),
        }
    }
}

impl Id for Calendar {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A point of the path that a vehicle travels along. See <https://gtfs.org/reference/static/#shapestxt>
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ShapePoint {
    /// Identifier of the shape this point belongs to
    pub shape_id: String,
    /// Latitude of a shape point
    #[serde(rename = "shape_pt_lat")]
    pub latitude: f64,
    /// Longitude of a shape point
    #[serde(rename = "shape_pt_lon")]
    pub longitude: f64,
    /// Sequence in which the shape points connect to form the shape. Values increase along the trip but do not need to be consecutive.
    #[serde(rename = "shape_pt_sequence")]
    pub sequence: i64,
}

impl FromRow for ShapePoint {
    fn from_row(row: &Row) -> Self {
        ShapePoint {
            shape_id: row.string("shape_id"),
            latitude: row.float("shape_pt_lat"),
            longitude: row.float("shape_pt_lon"),
            sequence: row.parse("shape_pt_sequence"),
        }
    }
}

impl Id for ShapePoint {
    fn id(&self) -> &str {
        &self.shape_id
    }
}

/// A place where transit cards are sold or topped up, from the optional `places.csv`
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Place {
    /// Unique identifier of the place
    #[serde(rename = "place_id")]
    pub id: String,
    /// Name of the place
    #[serde(rename = "place_name")]
    pub name: String,
    /// Latitude of the place
    #[serde(rename = "place_lat")]
    pub latitude: f64,
    /// Longitude of the place
    #[serde(rename = "place_lon")]
    pub longitude: f64,
    /// Kind of place, free text from the feed
    pub place_type: String,
}

impl FromRow for Place {
    fn from_row(row: &Row) -> Self {
        Place {
            id: row.string("place_id"),
            name: row.string("place_name"),
            latitude: row.float("place_lat"),
            longitude: row.float("place_lon"),
            place_type: row.string("place_type"),
        }
    }
}

impl Id for Place {
    fn id(&self) -> &str {
        &self.id
    }
}
