//! Module for the error management
use crate::ObjectType;
use thiserror::Error;

/// An error that can occur when loading or querying GTFS data.
#[derive(Error, Debug)]
pub enum Error {
    /// A file of the feed is not present in the directory
    #[error("Could not find file {0}")]
    MissingFile(String),
    /// A file has no row at all, not even a header
    #[error("'{0}' is empty")]
    EmptyFile(String),
    /// No object with this identifier exists in the feed
    #[error("{object_type} '{id}' not found")]
    NotFound {
        /// Kind of object that was looked up
        object_type: ObjectType,
        /// The identifier that has no match
        id: String,
    },
    /// The given path to the GTFS is not a directory
    #[error("Could not read GTFS: {0} is not a directory")]
    NotFileNorDirectory(String),
    /// Generic Input/Output error while reading a file
    #[error("impossible to read file")]
    IO(#[from] std::io::Error),
    /// Impossible to read a file
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        /// The file name that could not be read
        file_name: String,
        /// The inital error that caused the unability to read the file
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Impossible to read a CSV file
    #[error("impossible to read csv file '{file_name}'")]
    CSVError {
        /// File name that could not be parsed as CSV
        file_name: String,
        /// The initial error by the csv library
        #[source]
        source: csv::Error,
        /// Line of the file where reading stopped, when known
        line: Option<u64>,
    },
}

impl Error {
    /// Name of the feed file this error comes from, if it is a loading error
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Error::MissingFile(file_name) | Error::EmptyFile(file_name) => Some(file_name),
            Error::NamedFileIO { file_name, .. } | Error::CSVError { file_name, .. } => {
                Some(file_name)
            }
            _ => None,
        }
    }

    /// True if this is a [Error::NotFound]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
