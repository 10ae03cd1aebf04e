//! Configuration resolution for multi-stack infrastructure deployments
//!
//! `stackctx-core` turns invocation inputs into a single
//! [`SharedProvisioningContext`] that every stack builder reads:
//!
//! - **Sources**: inline `KEY=VALUE` arguments, the environment and an
//!   optional fallback path, asked in that order
//! - **Locator**: finds the configuration file path under a lookup key
//! - **Loader**: reads and parses the file into a [`ConfigDocument`]
//! - **Overrides**: applies dot-path overrides from the inline arguments
//! - **Prefix**: derives the deployment prefix from project name and stage
//! - **Assembler**: runs the steps once, in order, failing fast
//!
//! # Architecture
//!
//! ```text
//!                  stackctx-cli
//!                       |
//!                 stackctx-core
//!                       |
//!         +-------------+-------------+
//!         |                           |
//!    stackctx-fs               stackctx-content
//! ```

pub mod assembler;
pub mod context;
pub mod error;
pub mod loader;
pub mod locator;
pub mod options;
pub mod overrides;
pub mod prefix;
pub mod project;
pub mod source;

pub use assembler::{AssemblerOptions, AssemblyFailure, AssemblyPhase, ContextAssembler};
pub use context::SharedProvisioningContext;
pub use error::{Error, ErrorKind, Result};
pub use loader::ConfigLoader;
pub use locator::{ConfigLocation, ConfigLocator, DEFAULT_CONFIG_KEY};
pub use options::{RecognizedOptions, ResolvedOptions};
pub use overrides::{AppliedOverride, OverrideApplier, OverrideEntry, OverrideReport, ValueCoercion};
pub use prefix::{NamingPolicy, resolve_prefix};
pub use project::{PROJECT_SECTIONS, ProjectIdentity, STACK_SECTIONS};
pub use source::{
    FallbackPath, InvocationArgs, MapSource, ProcessEnv, SourceKind, SourceSet, ValueSource,
};
pub use stackctx_content::ConfigDocument;
