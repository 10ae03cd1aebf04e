//! Shared test utilities for the stackctx workspace.
//!
//! This crate provides standardised configuration fixtures so crate test
//! suites do not each hand-roll temp directories and sample documents. It
//! is a dev-dependency only and is never published.

pub mod fixture;

pub use fixture::{ConfigFixture, acme_config, workspace_fixture};
