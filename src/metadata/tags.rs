// SPDX-License-Identifier: MPL-2.0
//! In-memory tag table built from an embedded EXIF block.
//!
//! The table is keyed by the numeric tag identifier. Fields from the TIFF and
//! Exif contexts of the primary image share one namespace; the GPS directory
//! is nested under [`GPS_INFO`] as its own table.

use std::collections::BTreeMap;

/// Tag identifiers the decoder maps to report columns.
pub const MAKE: u16 = 271;
pub const MODEL: u16 = 272;
pub const SOFTWARE: u16 = 305;
pub const GPS_INFO: u16 = 34853;
pub const EXIF_VERSION: u16 = 36864;
pub const DATE_TIME_ORIGINAL: u16 = 36867;
pub const DATE_TIME_DIGITIZED: u16 = 36868;
pub const FLASH: u16 = 37385;
pub const PIXEL_X_DIMENSION: u16 = 40962;
pub const PIXEL_Y_DIMENSION: u16 = 40963;
pub const SCENE_CAPTURE_TYPE: u16 = 41990;

/// Keys inside the GPS directory.
pub const GPS_LATITUDE_REF: u16 = 1;
pub const GPS_LATITUDE: u16 = 2;
pub const GPS_LONGITUDE_REF: u16 = 3;
pub const GPS_LONGITUDE: u16 = 4;

/// A rational as stored in the file: numerator over denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub num: i64,
    pub denom: i64,
}

impl Ratio {
    pub const fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }
}

/// Raw value of a single tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Unsigned(u32),
    Signed(i32),
    Float(f64),
    Rational(Vec<Ratio>),
    Bytes(Vec<u8>),
    /// Nested directory (GPS).
    Directory(TagTable),
}

impl TagValue {
    /// Integer view of the value, if it holds one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Unsigned(v) => Some(i64::from(*v)),
            TagValue::Signed(v) => Some(i64::from(*v)),
            _ => None,
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        TagValue::Unsigned(value)
    }
}

/// Mapping from tag identifier to raw value. Read-only once built.
pub type TagTable = BTreeMap<u16, TagValue>;

/// Builds a [`TagTable`] from a parsed EXIF block.
///
/// Only primary-image fields are kept; thumbnail fields are ignored.
pub fn table_from_exif(exif: &exif::Exif) -> TagTable {
    let mut table = TagTable::new();
    let mut gps = TagTable::new();

    for field in exif.fields() {
        if field.ifd_num != exif::In::PRIMARY {
            continue;
        }
        let Some(value) = convert_value(&field.value) else {
            continue;
        };
        match field.tag.context() {
            exif::Context::Gps => {
                gps.insert(field.tag.number(), value);
            }
            exif::Context::Tiff | exif::Context::Exif => {
                // The GPS pointer itself is replaced by the nested table below.
                if field.tag.number() != GPS_INFO {
                    table.insert(field.tag.number(), value);
                }
            }
            _ => {}
        }
    }

    if !gps.is_empty() {
        table.insert(GPS_INFO, TagValue::Directory(gps));
    }
    table
}

fn convert_value(value: &exif::Value) -> Option<TagValue> {
    use exif::Value;

    let converted = match value {
        Value::Ascii(strings) => {
            let first = strings.first()?;
            let text = String::from_utf8_lossy(first);
            TagValue::Text(text.trim_end_matches('\0').to_string())
        }
        Value::Byte(v) if v.len() == 1 => TagValue::Unsigned(u32::from(v[0])),
        Value::Short(v) if v.len() == 1 => TagValue::Unsigned(u32::from(v[0])),
        Value::Long(v) if v.len() == 1 => TagValue::Unsigned(v[0]),
        Value::SByte(v) if v.len() == 1 => TagValue::Signed(i32::from(v[0])),
        Value::SShort(v) if v.len() == 1 => TagValue::Signed(i32::from(v[0])),
        Value::SLong(v) if v.len() == 1 => TagValue::Signed(v[0]),
        Value::Rational(v) => TagValue::Rational(
            v.iter()
                .map(|r| Ratio::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(v) => TagValue::Rational(
            v.iter()
                .map(|r| Ratio::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::Float(v) if v.len() == 1 => TagValue::Float(f64::from(v[0])),
        Value::Double(v) if v.len() == 1 => TagValue::Float(v[0]),
        Value::Unknown(..) => return None,
        other => TagValue::Text(other.display_as(exif::Tag(exif::Context::Tiff, 0)).to_string()),
    };
    Some(converted)
}
