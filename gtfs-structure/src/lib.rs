/*! In-memory model of a [GTFS](https://gtfs.org/) style transit feed, read from a directory of CSV files.

To get started, see [Gtfs] and [GtfsReader].

## What is read

A feed is a directory holding `agency.csv`, `stops.csv`, `routes.csv`, `trips.csv`,
`calendar.csv` and `shapes.csv` (all mandatory) and optionally `places.csv`, a list of
transit card kiosks. Each file is a comma separated file whose first row names the columns.

## Design decisions

### Lenient fields

Columns are looked up by name, so their order does not matter and unknown columns are ignored.
A missing column, a short row or a value that does not parse gives the zero value of the field
(`""`, `0` or `0.0`). This is done by [fields::parse_or_default] and never raises an error:
real feeds vary a lot in completeness and we prefer serving them to rejecting them.

### Two representations

The [RawGtfs] representation holds the objects of each file as they were read, with one
[Result] per file. [Gtfs] indexes them by identifier, groups the shape points and is what the
queries run against. Building a [Gtfs] fails if any mandatory file could not be read; an
unreadable `places.csv` is only logged.

### Immutability

A [Gtfs] is never modified once built. It can be shared between threads (for instance behind an
[std::sync::Arc]) without any lock.
*/
#![warn(missing_docs)]

#[macro_use]
extern crate derivative;

mod enums;
pub mod error;
pub mod fields;
pub mod geo;
mod gtfs;
mod gtfs_reader;
pub(crate) mod objects;
mod raw_gtfs;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use gtfs::{Gtfs, DEFAULT_RADIUS_METERS};
pub use gtfs_reader::{GtfsReader, RawGtfsReader};
pub use objects::*;
pub use raw_gtfs::RawGtfs;
