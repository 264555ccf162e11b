// SPDX-License-Identifier: MPL-2.0
//! Container access used by the decoder.
//!
//! Opening the image, its cheap integrity check and reading the embedded EXIF
//! block sit behind [`ContainerBackend`] so the decoder does not depend on a
//! particular decoding library. [`JpegBackend`] is the default implementation,
//! built on the `image` crate for the container and `kamadak-exif` for the
//! metadata block.

use super::tags::{self, TagTable};
use crate::error::{Error, Result};
use image_rs::ImageDecoder;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens a container, checks it and exposes its EXIF tag table.
pub trait ContainerBackend {
    type Container;

    /// Opens the file as an image container.
    ///
    /// Fails with [`Error::CorruptFile`] when the container cannot be parsed.
    fn open(&self, path: &Path) -> Result<Self::Container>;

    /// Structural sanity check that does not decode pixel data.
    fn verify(&self, container: &Self::Container) -> bool;

    /// Returns the embedded tag table, or `None` when the file has none.
    fn read_metadata_block(&self, container: &Self::Container) -> Result<Option<TagTable>>;
}

/// A JPEG file held in memory.
#[derive(Debug, Clone)]
pub struct JpegContainer {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl JpegContainer {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Default backend for JPEG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegBackend;

impl ContainerBackend for JpegBackend {
    type Container = JpegContainer;

    fn open(&self, path: &Path) -> Result<JpegContainer> {
        // The handle is dropped at the end of this block on every path.
        let bytes = {
            let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| Error::io(path, e))?;
            bytes
        };

        match image_rs::guess_format(&bytes) {
            Ok(image_rs::ImageFormat::Jpeg) => Ok(JpegContainer {
                path: path.to_path_buf(),
                bytes,
            }),
            Ok(other) => Err(Error::corrupt(
                path,
                format!("container parsed as {other:?}, expected JPEG"),
            )),
            Err(e) => Err(Error::corrupt(path, e.to_string())),
        }
    }

    fn verify(&self, container: &JpegContainer) -> bool {
        match image_rs::codecs::jpeg::JpegDecoder::new(Cursor::new(container.bytes())) {
            Ok(decoder) => {
                let (width, height) = decoder.dimensions();
                width > 0 && height > 0
            }
            Err(e) => {
                debug!(path = %container.path.display(), error = %e, "JPEG header check failed");
                false
            }
        }
    }

    fn read_metadata_block(&self, container: &JpegContainer) -> Result<Option<TagTable>> {
        let mut cursor = Cursor::new(container.bytes());
        let mut reader = exif::Reader::new();
        reader.continue_on_error(true);

        match reader.read_from_container(&mut cursor) {
            Ok(exif) => Ok(Some(tags::table_from_exif(&exif))),
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                if exif.fields().len() == 0 {
                    let reason = errors
                        .first()
                        .map_or_else(|| "no readable fields".to_string(), ToString::to_string);
                    return Err(Error::corrupt(
                        &container.path,
                        format!("unreadable EXIF block: {reason}"),
                    ));
                }
                for e in &errors {
                    debug!(path = %container.path.display(), error = %e, "skipping unreadable EXIF entry");
                }
                Ok(Some(tags::table_from_exif(&exif)))
            }
            Err(e) => Err(Error::corrupt(
                &container.path,
                format!("unreadable EXIF block: {e}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::codecs::jpeg::JpegEncoder;
    use image_rs::{ExtendedColorType, ImageEncoder};
    use std::fs;
    use tempfile::tempdir;

    fn encoded_jpeg() -> Vec<u8> {
        let pixels = vec![128u8; 8 * 8 * 3];
        let mut out = Vec::new();
        JpegEncoder::new(&mut out)
            .write_image(&pixels, 8, 8, ExtendedColorType::Rgb8)
            .expect("encode jpeg");
        out
    }

    #[test]
    fn open_and_verify_plain_jpeg() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("plain.jpg");
        fs::write(&path, encoded_jpeg()).expect("write");

        let backend = JpegBackend;
        let container = backend.open(&path).expect("open");
        assert!(backend.verify(&container));
        assert_eq!(container.path(), path.as_path());
    }

    #[test]
    fn plain_jpeg_has_no_metadata_block() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("plain.jpg");
        fs::write(&path, encoded_jpeg()).expect("write");

        let backend = JpegBackend;
        let container = backend.open(&path).expect("open");
        assert_eq!(backend.read_metadata_block(&container).expect("read"), None);
    }

    #[test]
    fn truncated_jpeg_fails_verification() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cut.jpg");
        let bytes = encoded_jpeg();
        fs::write(&path, &bytes[..6]).expect("write");

        let backend = JpegBackend;
        let container = backend.open(&path).expect("signature still guessed");
        assert!(!backend.verify(&container));
    }

    #[test]
    fn non_jpeg_container_is_corrupt() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("not.jpg");
        fs::write(&path, b"\x89PNG\r\n\x1a\n0000").expect("write");

        let err = JpegBackend.open(&path).expect_err("png bytes");
        assert!(matches!(err, Error::CorruptFile { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JpegBackend
            .open(Path::new("/nonexistent/path/image.jpg"))
            .expect_err("missing");
        assert!(matches!(err, Error::Io { .. }));
    }
}
