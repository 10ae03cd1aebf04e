//! Configuration document tree and dot-path traversal for stackctx
//!
//! A [`ConfigDocument`] holds an arbitrary nested configuration tree.
//! Values are addressed with dot-separated paths such as
//! `stacks.webhookECS.rds.allocatedStorage`; see [`path`] for the syntax.

pub mod document;
pub mod error;
pub mod path;

pub use document::ConfigDocument;
pub use error::{Error, Result};
pub use path::{PathSegment, parse_path};
