use gtfs_structure::{Gtfs, DEFAULT_RADIUS_METERS};

/// prints some stats about the feed directory given as a cli argument, and the stops around a
/// point when latitude and longitude follow
fn main() {
    let dir = std::env::args()
        .nth(1)
        .expect("you should put the path of the feed directory to load");

    println!("reading feed {}", &dir);
    let gtfs = match Gtfs::from_path(&dir) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {:?}", e);
            return;
        }
    };
    println!(
        "{} stops, {} routes, {} trips, {} shapes, {} places (read in {} ms)",
        gtfs.stops.len(),
        gtfs.routes.len(),
        gtfs.trips.len(),
        gtfs.shapes.len(),
        gtfs.places.len(),
        gtfs.read_duration
    );

    let coords: Vec<f64> = std::env::args()
        .skip(2)
        .filter_map(|a| a.parse().ok())
        .collect();
    if let [lat, lon] = coords[..] {
        for stop in gtfs.nearby_stops(lat, lon, DEFAULT_RADIUS_METERS) {
            println!("{}: {}", stop.id, stop.name);
        }
    }
}
