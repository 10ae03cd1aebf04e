//! Loading the located configuration file into a document

use serde_json::Value;
use stackctx_content::ConfigDocument;
use stackctx_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};

/// Reads and parses configuration files into [`ConfigDocument`]s.
///
/// Loading is all-or-nothing. Besides syntax errors, a file whose top
/// level is not a mapping is rejected as a parse error. No schema checks
/// happen here; missing project fields surface when the identity is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader {
    store: ConfigStore,
}

impl ConfigLoader {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn load(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        let value: Value = self.store.load(path)?;
        let document = ConfigDocument::from_value(value).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: self.store.format_for(path).name().into(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path, "Loaded configuration document");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scalar_root_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.json");
        fs::write(&file, "[1, 2, 3]").unwrap();

        let err = ConfigLoader::default()
            .load(&NormalizedPath::new(&file))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigParse);
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = ConfigLoader::default()
            .load(&NormalizedPath::new(temp.path().join("absent.json")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigRead);
    }
}
