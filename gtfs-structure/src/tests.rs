use crate::geo::haversine_distance;
use crate::objects::*;
use crate::{Error, Gtfs, GtfsReader, RawGtfs};
use std::collections::HashSet;

fn basic() -> Gtfs {
    Gtfs::from_path("fixtures/basic").expect("impossible to read gtfs")
}

#[test]
fn read_agencies() {
    let gtfs = basic();
    assert_eq!(1, gtfs.agencies.len());
    let agency = gtfs.get_agency("KK").unwrap();
    assert_eq!("Kocaeli Buyuksehir", agency.name);
    assert_eq!("Europe/Istanbul", agency.timezone);
    assert_eq!("tr", agency.lang);
}

#[test]
fn read_stop() {
    let gtfs = basic();
    let stop = gtfs.get_stop("stop1").unwrap();
    assert_eq!(
        &Stop {
            id: "stop1".to_owned(),
            name: "Izmit Otogar".to_owned(),
            latitude: 40.7654,
            longitude: 29.9408,
            wheelchair_boarding: 1,
            url: "https://example.org/stop1".to_owned(),
            location_type: 0,
            parent_station: String::new(),
        },
        stop
    );
    assert_eq!("station1", gtfs.get_stop("stop2").unwrap().parent_station);
    assert_eq!(1, gtfs.get_stop("stop3").unwrap().location_type);
}

#[test]
fn invalid_number_is_zero() {
    let gtfs = basic();
    assert_eq!(0, gtfs.get_stop("stop3").unwrap().wheelchair_boarding);
}

#[test]
fn duplicate_stop_id_last_wins() {
    let gtfs = basic();
    assert_eq!(4, gtfs.stops.len());
    assert_eq!("Second Name", gtfs.get_stop("dup").unwrap().name);
    assert_eq!(1, gtfs.stops().iter().filter(|s| s.id == "dup").count());
}

#[test]
fn stops_list_matches_map() {
    let gtfs = basic();
    assert_eq!(gtfs.stops.len(), gtfs.stops().len());
    let ids: HashSet<&str> = gtfs.stops().iter().map(|s| s.id.as_str()).collect();
    let expected: HashSet<&str> = gtfs.stops.keys().map(|k| k.as_str()).collect();
    assert_eq!(expected, ids);
}

#[test]
fn read_routes() {
    let gtfs = basic();
    assert_eq!(4, gtfs.routes().len());
    let route = gtfs.get_route("r1").unwrap();
    assert_eq!("200", route.short_name);
    assert_eq!("Otogar - Sahil", route.long_name);
    assert_eq!(3, route.route_type);
    assert_eq!(RouteType::Bus, route.kind());
    assert_eq!("1E88E5", route.color);
    assert_eq!(RouteType::Tramway, gtfs.get_route("r2").unwrap().kind());
    assert_eq!("Tram line", gtfs.get_route("r2").unwrap().desc);
}

#[test]
fn unknown_route_is_not_found() {
    let gtfs = basic();
    let err = gtfs.get_route("r42").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        Error::NotFound {
            object_type: ObjectType::Route,
            ref id
        } if id == "r42"
    ));
    assert!(gtfs.get_stop("nowhere").unwrap_err().is_not_found());
}

#[test]
fn read_trips() {
    let gtfs = basic();
    assert_eq!(4, gtfs.trips.len());
    let trip = gtfs.get_trip("t2").unwrap();
    assert_eq!("r1", trip.route_id);
    assert_eq!(1, trip.direction_id);
    assert_eq!("sh1", trip.shape_id);
    assert_eq!("Otogar", trip.headsign);
    assert_eq!("", gtfs.get_trip("t3").unwrap().shape_id);
}

#[test]
fn read_calendar() {
    let gtfs = basic();
    assert_eq!(2, gtfs.calendar.len());
    let weekdays = gtfs.get_calendar("weekdays").unwrap();
    assert!(weekdays.runs_on(Weekday::Mon));
    assert!(!weekdays.runs_on(Weekday::Sat));
    assert_eq!("20240101", weekdays.start_date);
    assert!(gtfs.get_calendar("weekend").unwrap().runs_on(Weekday::Sun));
}

#[test]
fn shapes_are_sorted_by_sequence() {
    let gtfs = basic();
    let raw = RawGtfs::from_path("fixtures/basic").unwrap();
    let raw_shapes = raw.shapes.unwrap();

    for (shape_id, points) in &gtfs.shapes {
        assert!(points.windows(2).all(|w| w[0].sequence <= w[1].sequence));
        let rows = raw_shapes.iter().filter(|p| &p.shape_id == shape_id).count();
        assert_eq!(rows, points.len());
    }
}

#[test]
fn equal_sequences_keep_file_order() {
    let gtfs = basic();
    let sh1 = gtfs.get_shape("sh1").unwrap();
    let sequences: Vec<i64> = sh1.iter().map(|p| p.sequence).collect();
    assert_eq!(vec![1, 2, 3, 3], sequences);
    assert_eq!(40.7660, sh1[2].latitude);
    assert_eq!(40.7663, sh1[3].latitude);
}

#[test]
fn route_shape() {
    let gtfs = basic();
    let points = gtfs.route_shape("r1");
    assert_eq!(4, points.len());
    assert!(points.iter().all(|p| p.shape_id == "sh1"));
}

#[test]
fn route_shape_is_empty_without_shaped_trips() {
    let gtfs = basic();
    // only trips without shape_id
    assert!(gtfs.route_shape("r2").is_empty());
    // no trip at all
    assert!(gtfs.route_shape("r3").is_empty());
    // shape_id not in shapes.csv
    assert!(gtfs.route_shape("r4").is_empty());
    assert!(gtfs.route_shape("r42").is_empty());
}

#[test]
fn nearby_stops_boundary() {
    let gtfs = basic();
    let stop1 = gtfs.get_stop("stop1").unwrap();

    let ids = |radius: f64| -> HashSet<String> {
        gtfs.nearby_stops(stop1.latitude, stop1.longitude, radius)
            .into_iter()
            .map(|s| s.id.clone())
            .collect()
    };

    assert!(ids(500.0).contains("stop2"));
    assert!(!ids(499.0).contains("stop2"));
    assert!(ids(499.0).contains("stop1"));
}

#[test]
fn nearby_stops_radius_is_inclusive() {
    let gtfs = basic();
    let stop1 = gtfs.get_stop("stop1").unwrap();
    let stop2 = gtfs.get_stop("stop2").unwrap();
    let exact = haversine_distance(
        stop1.latitude,
        stop1.longitude,
        stop2.latitude,
        stop2.longitude,
    );

    let nearby = gtfs.nearby_stops(stop1.latitude, stop1.longitude, exact);
    assert!(nearby.iter().any(|s| s.id == "stop2"));
}

#[test]
fn nearby_stops_is_exactly_the_stops_in_radius() {
    let gtfs = basic();
    let (lat, lon, radius) = (40.75, 29.9, 5_000.0);
    let expected: HashSet<&str> = gtfs
        .stops()
        .iter()
        .filter(|s| haversine_distance(lat, lon, s.latitude, s.longitude) <= radius)
        .map(|s| s.id.as_str())
        .collect();
    let found: HashSet<&str> = gtfs
        .nearby_stops(lat, lon, radius)
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(expected, found);
}

#[test]
fn nearby_stops_can_be_empty() {
    let gtfs = basic();
    assert!(gtfs.nearby_stops(0.0, 0.0, 500.0).is_empty());
}

#[test]
fn nearest_stop() {
    let gtfs = basic();
    let (stop, dist) = gtfs.nearest_stop(40.7653, 29.9407).unwrap();
    assert_eq!("stop1", stop.id);
    assert!(dist < 20.0);
    assert!(Gtfs::default().nearest_stop(40.0, 29.0).is_none());
}

#[test]
fn read_places() {
    let gtfs = basic();
    // the row without place_id is dropped
    assert_eq!(2, gtfs.places.len());
    let p1 = gtfs.get_place("p1").unwrap();
    assert_eq!("kiosk", p1.place_type);
    assert_eq!(40.7655, p1.latitude);
    let ids: Vec<&str> = gtfs.places().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(vec!["p1", "p2"], ids);
    let nearby = gtfs.nearby_places(40.7654, 29.9408, 100.0);
    assert_eq!(1, nearby.len());
}

#[test]
fn missing_columns_are_zero_values() {
    let gtfs = Gtfs::from_path("fixtures/minimal").expect("impossible to read gtfs");
    let stop = gtfs.get_stop("s1").unwrap();
    assert_eq!(0.0, stop.latitude);
    assert_eq!(0.0, stop.longitude);
    assert_eq!(0, stop.location_type);
    assert_eq!("", stop.url);

    let route = gtfs.get_route("r1").unwrap();
    assert_eq!(0, route.route_type);
    assert_eq!("", route.short_name);

    let agency = gtfs.get_agency("").unwrap();
    assert_eq!("Kocaeli Buyuksehir", agency.name);

    let calendar = gtfs.get_calendar("everyday").unwrap();
    assert_eq!(0, calendar.monday);

    let place = gtfs.get_place("k1").unwrap();
    assert_eq!(0.0, place.latitude);
    assert_eq!("", place.place_type);

    assert!(gtfs.shapes.is_empty());
    assert!(gtfs.route_shape("r1").is_empty());
}

#[test]
fn missing_stops_fails() {
    let err = Gtfs::from_path("fixtures/missing_stops")
        .err()
        .expect("loading without stops.csv should fail");
    assert!(matches!(err, Error::MissingFile(_)));
    assert_eq!(Some("stops.csv"), err.file_name());
}

#[test]
fn empty_stops_fails() {
    let err = Gtfs::from_path("fixtures/empty_stops")
        .err()
        .expect("loading with an empty stops.csv should fail");
    assert!(matches!(err, Error::EmptyFile(_)));
    assert_eq!(Some("stops.csv"), err.file_name());
}

#[test]
fn missing_places_is_not_fatal() {
    let raw = RawGtfs::from_path("fixtures/no_places").unwrap();
    assert!(matches!(raw.places, Some(Err(Error::MissingFile(_)))));

    let gtfs = Gtfs::from_path("fixtures/no_places").expect("places.csv is optional");
    assert!(gtfs.places.is_empty());
    assert_eq!(4, gtfs.stops.len());
}

#[test]
fn broken_places_is_not_fatal() {
    let gtfs = Gtfs::from_path("fixtures/broken_places").expect("places.csv is optional");
    assert!(gtfs.places.is_empty());
}

#[test]
fn places_can_be_skipped() {
    let gtfs = GtfsReader::default()
        .read_places(false)
        .read_from_path("fixtures/basic")
        .unwrap();
    assert!(gtfs.places.is_empty());
    assert_eq!(4, gtfs.routes.len());
}

#[test]
fn not_a_directory() {
    let err = Gtfs::from_path("fixtures/basic/stops.csv").err().unwrap();
    assert!(matches!(err, Error::NotFileNorDirectory(_)));
}

#[test]
fn raw_gtfs_lists_files() {
    let raw = RawGtfs::from_path("fixtures/basic").unwrap();
    assert_eq!(7, raw.files.len());
    assert!(raw.files.iter().any(|f| f == "shapes.csv"));
    assert_eq!(5, raw.stops.unwrap().len());
}

#[test]
fn serialization_uses_gtfs_names() {
    let gtfs = basic();
    let stop = serde_json::to_value(gtfs.get_stop("stop2").unwrap()).unwrap();
    assert_eq!("stop2", stop["stop_id"]);
    assert_eq!(40.769895, stop["stop_lat"]);
    assert_eq!("station1", stop["parent_station"]);
    // empty optional strings are left out
    assert!(stop.get("stop_url").is_none());

    let route = serde_json::to_value(gtfs.get_route("r1").unwrap()).unwrap();
    assert_eq!("200", route["route_short_name"]);
    assert_eq!(3, route["route_type"]);

    let point = serde_json::to_value(&gtfs.route_shape("r1")[0]).unwrap();
    assert_eq!(1, point["shape_pt_sequence"]);
}
