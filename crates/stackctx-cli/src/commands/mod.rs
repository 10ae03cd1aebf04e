//! Command implementations for stackctx-cli

pub mod get;
pub mod show;
pub mod stacks;

pub use get::run_get;
pub use show::run_show;
pub use stacks::run_stacks;
