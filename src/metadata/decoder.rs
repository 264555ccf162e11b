// SPDX-License-Identifier: MPL-2.0
//! Tag table walk producing the report fields of one file.

use super::container::{ContainerBackend, JpegBackend};
use super::gps::dms_to_decimal;
use super::labels;
use super::tags::{self, TagTable, TagValue};
use super::{Column, FieldRecord, FieldValue, HEADERS};
use crate::error::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

/// EXIF date layout, e.g. `2020:01:15 13:45:30`.
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Date layout used in the report.
const REPORT_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Time zone used to render filesystem timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub timestamp_zone: TimestampZone,
}

/// A tag whose value does not have the expected shape. The field is dropped.
#[derive(Debug, Error)]
enum MalformedField {
    #[error("expected text, found {0:?}")]
    NotText(TagValue),

    #[error("'{value}' is not an EXIF date")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("coordinate is not a degrees/minutes/seconds triple: {0:?}")]
    Coordinate(TagValue),

    #[error("value cannot be copied into a report cell: {0:?}")]
    Unprintable(TagValue),
}

/// Decodes a file with the default backend and options.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<(FieldRecord, &'static [Column])> {
    decode_with(path, &JpegBackend, &DecodeOptions::default())
}

/// Opens and checks the container, fills the filesystem fields and then the
/// EXIF fields when the file carries an EXIF block.
pub fn decode_with<P, B>(
    path: P,
    backend: &B,
    options: &DecodeOptions,
) -> Result<(FieldRecord, &'static [Column])>
where
    P: AsRef<Path>,
    B: ContainerBackend,
{
    let path = path.as_ref();
    let container = backend.open(path)?;
    if !backend.verify(&container) {
        return Err(Error::corrupt(path, "container failed its integrity check"));
    }

    let mut record = filesystem_fields(path, options)?;

    match backend.read_metadata_block(&container)? {
        Some(table) => apply_tags(&mut record, &table),
        None => debug!(path = %path.display(), "no EXIF block"),
    }

    Ok((record, &HEADERS))
}

/// Copies every recognised tag of `table` into `record`.
///
/// Unknown tags and unknown enumeration codes are skipped. A tag with a
/// malformed value is skipped without affecting the others.
pub fn apply_tags(record: &mut FieldRecord, table: &TagTable) {
    for (&tag, value) in table {
        match tag {
            tags::EXIF_VERSION => put(record, Column::ExifVersion, verbatim(value)),
            tags::DATE_TIME_ORIGINAL => put(record, Column::OriginalDate, reformat_date(value)),
            tags::DATE_TIME_DIGITIZED => {
                put(record, Column::DigitizedDate, reformat_date(value))
            }
            tags::SCENE_CAPTURE_TYPE => {
                if let Some(label) = value.as_int().and_then(labels::scene_type) {
                    record.insert(Column::SceneType, label);
                } else {
                    debug!(?value, "unknown scene capture type");
                }
            }
            tags::FLASH => {
                if let Some(label) = value.as_int().and_then(labels::flash) {
                    record.insert(Column::Flash, label);
                } else {
                    debug!(?value, "unknown flash code");
                }
            }
            tags::MAKE => put(record, Column::Make, verbatim(value)),
            tags::MODEL => put(record, Column::Model, verbatim(value)),
            tags::SOFTWARE => put(record, Column::Software, verbatim(value)),
            tags::PIXEL_X_DIMENSION => put(record, Column::Width, verbatim(value)),
            tags::PIXEL_Y_DIMENSION => put(record, Column::Height, verbatim(value)),
            tags::GPS_INFO => {
                if let TagValue::Directory(gps) = value {
                    apply_gps(record, gps);
                }
            }
            _ => {}
        }
    }
}

fn apply_gps(record: &mut FieldRecord, gps: &TagTable) {
    for (&key, value) in gps {
        match key {
            tags::GPS_LATITUDE_REF => put(record, Column::LatitudeReference, verbatim(value)),
            tags::GPS_LATITUDE => put(record, Column::Latitude, coordinate(value)),
            tags::GPS_LONGITUDE_REF => {
                put(record, Column::LongitudeReference, verbatim(value))
            }
            tags::GPS_LONGITUDE => put(record, Column::Longitude, coordinate(value)),
            _ => {}
        }
    }
}

fn put(
    record: &mut FieldRecord,
    column: Column,
    value: std::result::Result<FieldValue, MalformedField>,
) {
    match value {
        Ok(value) => record.insert(column, value),
        Err(e) => debug!(column = column.name(), error = %e, "skipping malformed field"),
    }
}

fn verbatim(value: &TagValue) -> std::result::Result<FieldValue, MalformedField> {
    match value {
        TagValue::Text(text) => Ok(FieldValue::Text(text.clone())),
        TagValue::Unsigned(v) => Ok(FieldValue::Integer(i64::from(*v))),
        TagValue::Signed(v) => Ok(FieldValue::Integer(i64::from(*v))),
        TagValue::Float(v) => Ok(FieldValue::Text(v.to_string())),
        TagValue::Bytes(bytes) => Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string(),
        )),
        TagValue::Rational(ratios) => Ok(FieldValue::Text(
            ratios
                .iter()
                .map(|r| format!("{}/{}", r.num, r.denom))
                .collect::<Vec<_>>()
                .join(", "),
        )),
        TagValue::Directory(_) => Err(MalformedField::Unprintable(value.clone())),
    }
}

fn reformat_date(value: &TagValue) -> std::result::Result<FieldValue, MalformedField> {
    let TagValue::Text(text) = value else {
        return Err(MalformedField::NotText(value.clone()));
    };
    let parsed = NaiveDateTime::parse_from_str(text, EXIF_DATE_FORMAT).map_err(|source| {
        MalformedField::Date {
            value: text.clone(),
            source,
        }
    })?;
    Ok(FieldValue::Text(
        parsed.format(REPORT_DATE_FORMAT).to_string(),
    ))
}

fn coordinate(value: &TagValue) -> std::result::Result<FieldValue, MalformedField> {
    match value {
        TagValue::Rational(dms) => dms_to_decimal(dms)
            .map(FieldValue::Text)
            .ok_or_else(|| MalformedField::Coordinate(value.clone())),
        _ => Err(MalformedField::Coordinate(value.clone())),
    }
}

/// Path, name, size and filesystem timestamps. Always present.
fn filesystem_fields(path: &Path, options: &DecodeOptions) -> Result<FieldRecord> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let modified = metadata.modified().map_err(|e| Error::io(path, e))?;
    let created = metadata.created().unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "creation time unavailable, using mtime");
        modified
    });

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let mut record = FieldRecord::new();
    record.insert(Column::Path, path.to_string_lossy().into_owned());
    record.insert(Column::Name, name);
    record.insert(
        Column::Size,
        FieldValue::Integer(i64::try_from(metadata.len()).unwrap_or(i64::MAX)),
    );
    record.insert(
        Column::FilesystemCTime,
        format_timestamp(created, options.timestamp_zone),
    );
    record.insert(
        Column::FilesystemMTime,
        format_timestamp(modified, options.timestamp_zone),
    );
    Ok(record)
}

fn format_timestamp(time: SystemTime, zone: TimestampZone) -> String {
    match zone {
        TimestampZone::Local => DateTime::<Local>::from(time)
            .format(REPORT_DATE_FORMAT)
            .to_string(),
        TimestampZone::Utc => DateTime::<Utc>::from(time)
            .format(REPORT_DATE_FORMAT)
            .to_string(),
    }
}
