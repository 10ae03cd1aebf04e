//! [`ConfigFixture`] for writing configuration files into a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary directory holding configuration files.
///
/// # Example
///
/// ```rust
/// use stackctx_test_utils::{ConfigFixture, acme_config};
///
/// let fixture = ConfigFixture::new();
/// let path = fixture.write_json("config/app-config-dev.json", &acme_config());
/// assert!(path.is_file());
/// ```
pub struct ConfigFixture {
    temp_dir: TempDir,
}

impl Default for ConfigFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFixture {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `value` as pretty JSON to `relative`, creating parent
    /// directories. Returns the absolute path.
    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write_raw(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Write raw text to `relative`, creating parent directories.
    pub fn write_raw(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Absolute path of `relative` as a string, for use as a config value.
    pub fn path_str(&self, relative: &str) -> String {
        self.root().join(relative).to_string_lossy().into_owned()
    }
}

/// The reference configuration: project `acme`, stage `dev`, one stack `x`.
pub fn acme_config() -> Value {
    json!({
        "project": {
            "name": "acme",
            "stage": "dev",
            "account": "111",
            "region": "us-east-1"
        },
        "stacks": {
            "x": {"size": 1}
        }
    })
}

/// Path to a file under the workspace `test-fixtures/` directory.
///
/// # Panics
/// Panics if the file does not exist.
pub fn workspace_fixture(relative: &str) -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures")
        .join(relative);
    assert!(
        path.exists(),
        "Expected fixture to exist: {}",
        path.display()
    );
    path
}
