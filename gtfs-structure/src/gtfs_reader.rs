use crate::fields::{FromRow, Header};
use crate::{Error, Gtfs, RawGtfs};
use log::debug;
use std::path::Path;
use std::time::Instant;

/// Files of the feed, in the order they are read
pub(crate) const AGENCY_FILE: &str = "agency.csv";
pub(crate) const STOPS_FILE: &str = "stops.csv";
pub(crate) const ROUTES_FILE: &str = "routes.csv";
pub(crate) const TRIPS_FILE: &str = "trips.csv";
pub(crate) const CALENDAR_FILE: &str = "calendar.csv";
pub(crate) const SHAPES_FILE: &str = "shapes.csv";
pub(crate) const PLACES_FILE: &str = "places.csv";

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Allows to parameterize how the parsing library behaves
///
/// ```no_run
///let gtfs = gtfs_structure::GtfsReader::default()
///    .read_places(false) // Won’t read places.csv, even if present
///    .read_from_path("data/kocaeli")?;
///assert!(gtfs.places.is_empty());
/// # Ok::<(), gtfs_structure::Error>(())
///```
#[derive(Derivative)]
#[derivative(Default)]
pub struct GtfsReader {
    /// `places.csv` is not part of GTFS and not always needed. This allows to skip reading it
    #[derivative(Default(value = "true"))]
    pub read_places: bool,
    /// Trim the whitespace around column names and values, quoted ones included
    pub trim_fields: bool,
}

impl GtfsReader {
    /// Configures the reader to read or not `places.csv` (default: true)
    ///
    /// Returns Self and can be chained
    pub fn read_places(mut self, read_places: bool) -> Self {
        self.read_places = read_places;
        self
    }

    /// Should the fields be trimmed (default: false, cells are kept as written)
    ///
    /// Returns Self and can be chained
    pub fn trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Reads the GTFS from a local directory
    pub fn read_from_path<P>(self, path: P) -> Result<Gtfs, Error>
    where
        P: AsRef<Path>,
    {
        self.raw().read_from_path(path).and_then(Gtfs::try_from)
    }

    /// Read the Gtfs as a [RawGtfs].
    pub fn raw(self) -> RawGtfsReader {
        RawGtfsReader { reader: self }
    }
}

/// This reader generates [RawGtfs]. It must be built using [GtfsReader::raw]
pub struct RawGtfsReader {
    reader: GtfsReader,
}

impl RawGtfsReader {
    /// Reads the raw GTFS from a local directory
    pub fn read_from_path<P>(&self, path: P) -> Result<RawGtfs, Error>
    where
        P: AsRef<Path>,
    {
        let p = path.as_ref();
        if p.is_dir() {
            self.read_from_directory(p)
        } else {
            Err(Error::NotFileNorDirectory(format!("{}", p.display())))
        }
    }

    fn read_from_directory(&self, p: &Path) -> Result<RawGtfs, Error> {
        let now = Instant::now();
        let files = std::fs::read_dir(p)?
            .filter_map(|d| d.ok().and_then(|p| p.file_name().to_str().map(|s| s.to_owned())))
            .collect();

        Ok(RawGtfs {
            agencies: self.read_objs_from_path(p, AGENCY_FILE),
            stops: self.read_objs_from_path(p, STOPS_FILE),
            routes: self.read_objs_from_path(p, ROUTES_FILE),
            trips: self.read_objs_from_path(p, TRIPS_FILE),
            calendar: self.read_objs_from_path(p, CALENDAR_FILE),
            shapes: self.read_objs_from_path(p, SHAPES_FILE),
            places: if self.reader.read_places {
                Some(self.read_objs_from_path(p, PLACES_FILE))
            } else {
                None
            },
            read_duration: now.elapsed().as_millis() as i64,
            files,
        })
    }

    fn read_objs<O: FromRow>(&self, content: &[u8], file_name: &str) -> Result<Vec<O>, Error> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(if self.reader.trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(content);
        let csv_error = |e: csv::Error| Error::CSVError {
            file_name: file_name.to_owned(),
            line: e.position().map(|p| p.line()),
            source: e,
        };

        let header_record = reader.headers().map_err(csv_error)?.clone();
        if header_record.is_empty() {
            return Err(Error::EmptyFile(file_name.to_owned()));
        }
        let header = Header::from_record(&header_record);

        // Pre-allocate a StringRecord for performance reasons
        let mut rec = csv::StringRecord::new();
        let mut objs = Vec::new();

        while reader.read_record(&mut rec).map_err(csv_error)? {
            objs.push(O::from_row(&header.row(&rec)));
        }
        debug!("{}: {} rows, {} columns", file_name, objs.len(), header.len());
        Ok(objs)
    }

    fn read_objs_from_path<O: FromRow>(
        &self,
        dir_path: &Path,
        file_name: &str,
    ) -> Result<Vec<O>, Error> {
        let path = dir_path.join(file_name);
        if !path.exists() {
            return Err(Error::MissingFile(file_name.to_owned()));
        }
        let content = std::fs::read(&path).map_err(|e| Error::NamedFileIO {
            file_name: file_name.to_owned(),
            source: Box::new(e),
        })?;
        self.read_objs(&content, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShapePoint, Stop};

    fn read<O: FromRow>(content: &str) -> Result<Vec<O>, Error> {
        GtfsReader::default().raw().read_objs(content.as_bytes(), "test.csv")
    }

    #[test]
    fn empty_content_is_an_error() {
        let err = read::<Stop>("").unwrap_err();
        assert!(matches!(err, Error::EmptyFile(ref f) if f == "test.csv"));
    }

    #[test]
    fn header_only_gives_no_objects() {
        let stops = read::<Stop>("stop_id,stop_name\n").unwrap();
        assert!(stops.is_empty());
    }

    #[test]
    fn bom_is_stripped() {
        let stops = read::<Stop>("\u{feff}stop_id,stop_name\ns1,Izmit\n").unwrap();
        assert_eq!("s1", stops[0].id);
    }

    #[test]
    fn fields_are_kept_as_written() {
        let stops =
            read::<Stop>("stop_id,stop_name,stop_lat\ns1,\" Izmit Otogar \", 40.5\n").unwrap();
        assert_eq!(" Izmit Otogar ", stops[0].name);
        // " 40.5" is not a number
        assert_eq!(0.0, stops[0].latitude);
    }

    #[test]
    fn fields_can_be_trimmed() {
        let stops = GtfsReader::default()
            .trim_fields(true)
            .raw()
            .read_objs::<Stop>(
                b"stop_id , stop_name, stop_lat\n s1 ,\" Izmit Otogar \", 40.5 \n",
                "stops.csv",
            )
            .unwrap();
        assert_eq!("s1", stops[0].id);
        assert_eq!("Izmit Otogar", stops[0].name);
        assert_eq!(40.5, stops[0].latitude);
    }

    #[test]
    fn large_sequences_are_sorted_last() {
        let points =
            read::<ShapePoint>("shape_id,shape_pt_sequence\nsh1,3000000000\nsh1,1\n").unwrap();
        assert_eq!(3_000_000_000, points[0].sequence);
        let shapes = crate::gtfs::to_shape_map(points);
        let sequences: Vec<i64> = shapes["sh1"].iter().map(|p| p.sequence).collect();
        assert_eq!(vec![1, 3_000_000_000], sequences);
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let points = read::<ShapePoint>(
            "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\nsh1,40.1\nsh1,40.2,29.9,2,extra\n",
        )
        .unwrap();
        assert_eq!(2, points.len());
        assert_eq!(0, points[0].sequence);
        assert_eq!(2, points[1].sequence);
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let err = GtfsReader::default()
            .raw()
            .read_objs::<Stop>(b"stop_id\n\xff\xfe\n", "stops.csv")
            .unwrap_err();
        assert!(matches!(err, Error::CSVError { .. }));
        assert_eq!(Some("stops.csv"), err.file_name());
    }
}
