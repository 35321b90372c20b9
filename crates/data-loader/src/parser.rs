//! Parser for the movies and ratings CSV files.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating[,timestamp]
//!
//! Both files carry a header row. Columns are matched by name, so order is
//! free and extra columns are ignored; a missing required column is a
//! [`DataLoadError::SchemaError`] rather than a per-row parse failure.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Columns that must be present in movies.csv
pub const MOVIE_COLUMNS: [&str; 3] = ["movieId", "title", "genres"];

/// Columns that must be present in ratings.csv
pub const RATING_COLUMNS: [&str; 3] = ["userId", "movieId", "rating"];

/// Open a data file, reporting a missing file distinctly from other I/O failures
fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = open_file(path)?;
    parse_movies_from_reader(file, &source_name(path))
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = open_file(path)?;
    parse_ratings_from_reader(file, &source_name(path))
}

/// Parse movie rows from any reader.
///
/// `file` names the source in error messages.
pub fn parse_movies_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Movie>> {
    parse_table(reader, file, &MOVIE_COLUMNS)
}

/// Parse rating rows from any reader.
pub fn parse_ratings_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Rating>> {
    parse_table(reader, file, &RATING_COLUMNS)
}

/// Shared table parsing: header check first, then typed rows in file order.
fn parse_table<R, T>(reader: R, file: &str, required: &[&str]) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| to_parse_error(file, e))?
        .clone();

    // A completely empty file has no header row at all
    if headers.is_empty() {
        return Err(DataLoadError::SchemaError {
            file: file.to_string(),
            column: required.first().copied().unwrap_or_default().to_string(),
        });
    }

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::SchemaError {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<T>() {
        rows.push(record.map_err(|e| to_parse_error(file, e))?);
    }
    Ok(rows)
}

/// Convert a csv error into our ParseError, keeping the line it happened on
fn to_parse_error(file: &str, err: csv::Error) -> DataLoadError {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    let reason = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    };
    DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason,
    }
}
