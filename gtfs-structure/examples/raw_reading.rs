use gtfs_structure::GtfsReader;

fn main() {
    let raw_gtfs = GtfsReader::default()
        .read_places(false)
        .raw()
        .read_from_path("fixtures/basic")
        .expect("impossible to read gtfs");

    println!("files: {:?}", raw_gtfs.files);
    for stop in raw_gtfs.stops.expect("impossible to read stops.csv") {
        println!("stop: {} ({}, {})", stop.name, stop.latitude, stop.longitude);
    }
}
