//! Name based access to the cells of a CSV record
//!
//! Feeds do not agree on which columns they provide nor in which order, so every field is looked
//! up through the [Header] of its file. Absent values degrade to the zero value of the field.
use csv::StringRecord;
use rustc_hash::FxHashMap;
use std::str::FromStr;

/// Maps each column name of a file to its index
#[derive(Debug, Default, Clone)]
pub struct Header(FxHashMap<String, usize>);

impl Header {
    /// Builds the mapping from the header record. If a name is repeated, the last column wins
    pub fn from_record(record: &StringRecord) -> Self {
        Header(
            record
                .iter()
                .enumerate()
                .map(|(i, name)| (name.to_owned(), i))
                .collect(),
        )
    }

    /// Index of the column, if the file has it
    pub fn index(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    /// Number of distinct column names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the file declared no column
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs a record of the file with this header
    pub fn row<'a>(&'a self, record: &'a StringRecord) -> Row<'a> {
        Row {
            header: self,
            record,
        }
    }
}

/// One record of a file, readable by column name
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    header: &'a Header,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// The raw cell, or `""` if the column is unknown or the record is too short
    pub fn str(&self, name: &str) -> &'a str {
        self.header
            .index(name)
            .and_then(|i| self.record.get(i))
            .unwrap_or("")
    }

    /// Owned version of [Row::str]
    pub fn string(&self, name: &str) -> String {
        self.str(name).to_owned()
    }

    /// The cell parsed as a float, `0.0` if empty or invalid
    pub fn float(&self, name: &str) -> f64 {
        parse_or_default(self.str(name))
    }

    /// The cell parsed as an integer, `0` if empty or invalid
    pub fn int(&self, name: &str) -> i32 {
        parse_or_default(self.str(name))
    }

    /// The cell parsed as any [FromStr] type, its default if empty or invalid
    pub fn parse<T: FromStr + Default>(&self, name: &str) -> T {
        parse_or_default(self.str(name))
    }
}

/// Parses a value, falling back to `T::default()` on empty input or parse failure
///
/// This is the whole coercion policy of the crate: a malformed number is read as zero and is
/// never reported as an error.
pub fn parse_or_default<T: FromStr + Default>(s: &str) -> T {
    if s.is_empty() {
        return T::default();
    }
    s.parse().unwrap_or_default()
}

/// Objects that are built from one CSV record
pub trait FromRow {
    /// Builds the object, using zero values for anything the row lacks
    fn from_row(row: &Row) -> Self;
}
