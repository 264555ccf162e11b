// SPDX-License-Identifier: MPL-2.0
//! `exif_report` reads capture metadata from JPEG files for tabular reporting.
//!
//! A file is first checked against the known JPEG magic bytes, then its EXIF
//! block is decoded into a fixed set of report columns (camera, dates, GPS
//! position, flash and scene settings). The [`batch`] module drives the
//! extractor over directories and writes the rows as CSV.

#![doc(html_root_url = "https://docs.rs/exif_report/0.1.0")]

pub mod batch;
pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod metadata;
pub mod report;
pub mod signature;

pub use error::{Error, Result};
pub use metadata::{extract, Column, FieldRecord, FieldValue, HEADERS};
