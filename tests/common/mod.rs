// SPDX-License-Identifier: MPL-2.0
//! Builders for JPEG fixtures with and without an EXIF block.
#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::codecs::png::PngEncoder;
use image_rs::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 16;
pub const HEIGHT: u32 = 8;

/// A small baseline JPEG without any EXIF segment.
pub fn plain_jpeg() -> Vec<u8> {
    let pixels = vec![200u8; (WIDTH * HEIGHT * 3) as usize];
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90)
        .write_image(&pixels, WIDTH, HEIGHT, ExtendedColorType::Rgb8)
        .expect("encode jpeg");
    out
}

pub fn plain_png() -> Vec<u8> {
    let pixels = vec![10u8; (WIDTH * HEIGHT * 3) as usize];
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&pixels, WIDTH, HEIGHT, ExtendedColorType::Rgb8)
        .expect("encode png");
    out
}

/// Serializes `fields` as a TIFF structure.
pub fn tiff_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write tiff");
    buf.into_inner()
}

/// Inserts an APP1 Exif segment right after the start-of-image marker.
pub fn with_exif(jpeg: &[u8], fields: &[Field]) -> Vec<u8> {
    with_tiff(jpeg, &tiff_block(fields))
}

/// Like [`with_exif`], with a TIFF structure built by hand.
pub fn with_tiff(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    let payload_len = 2 + 6 + tiff.len();
    let len = u16::try_from(payload_len).expect("segment fits in u16");

    let mut out = Vec::with_capacity(jpeg.len() + payload_len + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Big-endian IFD0 whose ImageDescription points past the end of the block,
/// optionally followed by an inline Make of "Cnn".
pub fn tiff_with_dangling_offset(with_make: bool) -> Vec<u8> {
    let count: u16 = if with_make { 2 } else { 1 };
    let mut tiff = b"MM\0\x2a\0\0\0\x08".to_vec();
    tiff.extend_from_slice(&count.to_be_bytes());
    // ImageDescription, ASCII, 100 bytes at offset 0xFFFF
    tiff.extend_from_slice(&[0x01, 0x0E, 0x00, 0x02, 0, 0, 0, 100, 0, 0, 0xFF, 0xFF]);
    if with_make {
        // Make, ASCII, 4 bytes inline
        tiff.extend_from_slice(&[0x01, 0x0F, 0x00, 0x02, 0, 0, 0, 4]);
        tiff.extend_from_slice(b"Cnn\0");
    }
    tiff.extend_from_slice(&[0, 0, 0, 0]);
    tiff
}

pub fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

pub fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

pub fn dms(deg: u32, min: u32, sec_thousandths: u32) -> Value {
    Value::Rational(vec![
        Rational { num: deg, denom: 1 },
        Rational { num: min, denom: 1 },
        Rational {
            num: sec_thousandths,
            denom: 1000,
        },
    ])
}

/// The fields of a typical phone camera shot.
pub fn camera_fields() -> Vec<Field> {
    vec![
        field(Tag::Make, ascii("Canon")),
        field(Tag::Model, ascii("Canon EOS 5D Mark IV")),
        field(Tag::Software, ascii("Firmware 1.0.4")),
        field(Tag::ExifVersion, Value::Undefined(b"0230".to_vec(), 0)),
        field(Tag::DateTimeOriginal, ascii("2020:01:15 13:45:30")),
        field(Tag::DateTimeDigitized, ascii("2020:01:15 13:45:31")),
        field(Tag::Flash, Value::Short(vec![9])),
        field(Tag::SceneCaptureType, Value::Short(vec![2])),
        field(Tag::PixelXDimension, Value::Long(vec![WIDTH])),
        field(Tag::PixelYDimension, Value::Long(vec![HEIGHT])),
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, dms(40, 30, 0)),
        field(Tag::GPSLongitudeRef, ascii("W")),
        field(Tag::GPSLongitude, dms(73, 59, 36_000)),
    ]
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
