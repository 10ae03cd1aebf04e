//! Whole-file reads

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read the full text content of a file.
///
/// The read is all-or-nothing: any failure to open the file or decode it
/// as UTF-8 is reported as [`Error::Io`] carrying the native path. Decode
/// failures carry [`std::io::ErrorKind::InvalidData`].
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    if native_path.is_dir() {
        return Err(Error::io(
            &native_path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is a directory"),
        ));
    }
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
