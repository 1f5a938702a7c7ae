use serde::Serialize;
use std::fmt;

/// All the objects type that this library reads
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectType {
    /// [Agency] <https://gtfs.org/reference/static/#agencytxt>
    Agency,
    /// [Stop] <https://gtfs.org/reference/static/#stopstxt>
    Stop,
    /// [Route] <https://gtfs.org/reference/static/#routestxt>
    Route,
    /// [Trip] <https://gtfs.org/reference/static/#tripstxt>
    Trip,
    /// [Calendar] <https://gtfs.org/reference/static/#calendartxt>
    Calendar,
    /// [ShapePoint] <https://gtfs.org/reference/static/#shapestxt>
    Shape,
    /// [Place], a transit card kiosk
    Place,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Agency => "agency",
            ObjectType::Stop => "stop",
            ObjectType::Route => "route",
            ObjectType::Trip => "trip",
            ObjectType::Calendar => "calendar",
            ObjectType::Shape => "shape",
            ObjectType::Place => "place",
        };
        f.write_str(name)
    }
}

/// Describes the kind of [Route]. See <https://gtfs.org/reference/static/#routestxt> `route_type`
///
/// The raw integer stays in [Route::route_type]; this is only a readable view of it and any
/// value is accepted.
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq, Hash)]
#[derivative(Default(bound = ""))]
pub enum RouteType {
    /// Tram, Streetcar, Light rail. Any light rail or street level system within a metropolitan area
    Tramway,
    /// Any underground rail system within a metropolitan area
    Subway,
    /// Used for intercity or long-distance travel
    Rail,
    /// Used for short- and long-distance bus routes
    #[derivative(Default)]
    Bus,
    /// Used for short- and long-distance boat service
    Ferry,
    /// Used for street-level rail cars where the cable runs beneath the vehicle
    CableTram,
    /// Aerial lift, suspended cable car (e.g., gondola lift, aerial tramway)
    Gondola,
    /// Any rail system designed for steep inclines. Some feeds use it for their cable car
    Funicular,
    /// Any other value
    Other(i32),
}

impl From<i32> for RouteType {
    fn from(i: i32) -> Self {
        match i {
            0 => RouteType::Tramway,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableTram,
            6 => RouteType::Gondola,
            7 => RouteType::Funicular,
            _ => RouteType::Other(i),
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteType::Tramway => f.write_str("tram"),
            RouteType::Subway => f.write_str("subway"),
            RouteType::Rail => f.write_str("rail"),
            RouteType::Bus => f.write_str("bus"),
            RouteType::Ferry => f.write_str("ferry"),
            RouteType::CableTram => f.write_str("cable tram"),
            RouteType::Gondola => f.write_str("gondola"),
            RouteType::Funicular => f.write_str("funicular"),
            RouteType::Other(i) => write!(f, "other ({i})"),
        }
    }
}
