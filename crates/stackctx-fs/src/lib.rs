//! Filesystem access for stackctx
//!
//! Provides normalized path handling, whole-file text reads and
//! extension-driven loading of structured configuration files.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, FileFormat};
pub use error::{Error, Result};
pub use path::NormalizedPath;
