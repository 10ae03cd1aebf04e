//! Builds the assembler inputs from parsed arguments

use stackctx_core::source::parse_entry;
use stackctx_core::{
    AssemblerOptions, ContextAssembler, FallbackPath, InvocationArgs, SharedProvisioningContext,
    SourceSet,
};

use crate::cli::ResolveArgs;
use crate::error::Result;

/// Inline arguments from `--context` followed by `--set` entries.
pub fn invocation_args(args: &ResolveArgs) -> Result<InvocationArgs> {
    let mut parsed = InvocationArgs::parse(&args.context)?;
    for entry in &args.set {
        let (path, value) = parse_entry(entry)?;
        parsed.insert(path, value);
    }
    Ok(parsed)
}

/// Inline arguments, then the process environment, then the default path.
pub fn sources(args: &ResolveArgs) -> Result<SourceSet> {
    let mut sources = SourceSet::standard(invocation_args(args)?);
    if let Some(default) = &args.default_config {
        sources = sources.with_source(FallbackPath::new(default.as_str()));
    }
    Ok(sources)
}

pub fn assembler_options(args: &ResolveArgs) -> Result<AssemblerOptions> {
    let mut paths = args.overrides.clone();
    for entry in &args.set {
        let (path, _) = parse_entry(entry)?;
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    Ok(AssemblerOptions::new(args.config_key.as_str())
        .with_overrides(paths)
        .with_naming_policy(args.prefix_type.into())
        .with_coercion(args.coercion()))
}

/// Assemble the context for one invocation.
pub fn assemble(args: &ResolveArgs) -> Result<SharedProvisioningContext> {
    let sources = sources(args)?;
    let mut assembler = ContextAssembler::new(assembler_options(args)?);
    let context = assembler.assemble(&sources)?.clone();

    let report = assembler.override_report();
    if !report.skipped.is_empty() {
        tracing::debug!(skipped = ?report.skipped, "Overrides without a value");
    }
    Ok(context)
}
