// SPDX-License-Identifier: MPL-2.0
//! EXIF field extraction for JPEG files.
//!
//! [`extract`] checks the file signature and then hands the file to the
//! decoder, which produces a [`FieldRecord`] plus the fixed column order
//! ([`HEADERS`]) used when the record is written as a table row.
//!
//! # Examples
//!
//! ```no_run
//! use exif_report::metadata::{self, Column};
//!
//! let (record, headers) = metadata::extract("holiday.jpg")?;
//! for column in headers {
//!     let cell = record.get(*column).map(ToString::to_string).unwrap_or_default();
//!     println!("{}: {}", column, cell);
//! }
//! assert!(record.get(Column::Path).is_some());
//! # Ok::<(), exif_report::error::Error>(())
//! ```

pub mod container;
pub mod decoder;
pub mod gps;
pub mod labels;
pub mod tags;

use crate::error::{Error, Result};
use crate::signature;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub use container::{ContainerBackend, JpegBackend, JpegContainer};
pub use decoder::{apply_tags, decode, decode_with, DecodeOptions, TimestampZone};
pub use gps::dms_to_decimal;
pub use tags::{Ratio, TagTable, TagValue};

/// A report column, one per extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Path,
    Name,
    Size,
    FilesystemCTime,
    FilesystemMTime,
    OriginalDate,
    DigitizedDate,
    Make,
    Model,
    Software,
    Latitude,
    LatitudeReference,
    Longitude,
    LongitudeReference,
    ExifVersion,
    Height,
    Width,
    Flash,
    SceneType,
}

impl Column {
    /// Column title as written in the report header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Column::Path => "Path",
            Column::Name => "Name",
            Column::Size => "Size",
            Column::FilesystemCTime => "Filesystem CTime",
            Column::FilesystemMTime => "Filesystem MTime",
            Column::OriginalDate => "Original Date",
            Column::DigitizedDate => "Digitized Date",
            Column::Make => "Make",
            Column::Model => "Model",
            Column::Software => "Software",
            Column::Latitude => "Latitude",
            Column::LatitudeReference => "Latitude Reference",
            Column::Longitude => "Longitude",
            Column::LongitudeReference => "Longitude Reference",
            Column::ExifVersion => "Exif Version",
            Column::Height => "Height",
            Column::Width => "Width",
            Column::Flash => "Flash",
            Column::SceneType => "Scene Type",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output column order.
pub const HEADERS: [Column; 19] = [
    Column::Path,
    Column::Name,
    Column::Size,
    Column::FilesystemCTime,
    Column::FilesystemMTime,
    Column::OriginalDate,
    Column::DigitizedDate,
    Column::Make,
    Column::Model,
    Column::Software,
    Column::Latitude,
    Column::LatitudeReference,
    Column::Longitude,
    Column::LongitudeReference,
    Column::ExifVersion,
    Column::Height,
    Column::Width,
    Column::Flash,
    Column::SceneType,
];

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Fields extracted from one file. Columns without a value are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: BTreeMap<Column, FieldValue>,
}

impl FieldRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: Column, value: impl Into<FieldValue>) {
        self.fields.insert(column, value.into());
    }

    pub fn get(&self, column: Column) -> Option<&FieldValue> {
        self.fields.get(&column)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.fields.contains_key(&column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Present columns, in header order.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, &FieldValue)> {
        self.fields.iter().map(|(column, value)| (*column, value))
    }
}

/// Extracts the report fields from a JPEG file using the default backend.
///
/// Fails with [`Error::FormatMismatch`] before any parsing when the leading
/// bytes are not a known JPEG signature.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<(FieldRecord, &'static [Column])> {
    extract_with(path, &JpegBackend, &DecodeOptions::default())
}

/// Like [`extract`], with an explicit backend and decode options.
pub fn extract_with<P, B>(
    path: P,
    backend: &B,
    options: &DecodeOptions,
) -> Result<(FieldRecord, &'static [Column])>
where
    P: AsRef<Path>,
    B: ContainerBackend,
{
    let path = path.as_ref();
    if !signature::is_jpeg(path)? {
        return Err(Error::FormatMismatch {
            path: path.to_path_buf(),
        });
    }
    decode_with(path, backend, options)
}
