//! Context assembly
//!
//! The assembler runs the resolution pipeline exactly once:
//!
//! ```text
//! Unresolved -> Located -> Loaded -> Overridden -> Assembled
//!      \___________\__________\___________\______> Failed
//! ```
//!
//! Each step is synchronous and fails fast; there are no retries. Once
//! the assembler has settled in `Assembled` or `Failed` it never runs
//! again.

use std::fmt;

use stackctx_fs::ConfigStore;

use crate::context::SharedProvisioningContext;
use crate::error::{Error, ErrorKind, Result};
use crate::loader::ConfigLoader;
use crate::locator::{ConfigLocator, DEFAULT_CONFIG_KEY};
use crate::overrides::{OverrideApplier, OverrideReport, ValueCoercion};
use crate::prefix::NamingPolicy;
use crate::project::ProjectIdentity;
use crate::source::SourceSet;

/// Inputs that shape one assembly run
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// Key the configuration path is looked up under
    pub config_key: String,
    /// Override paths, applied in order
    pub override_paths: Vec<String>,
    pub naming_policy: NamingPolicy,
    pub coercion: ValueCoercion,
    pub store: ConfigStore,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            config_key: DEFAULT_CONFIG_KEY.to_string(),
            override_paths: Vec::new(),
            naming_policy: NamingPolicy::default(),
            coercion: ValueCoercion::default(),
            store: ConfigStore::default(),
        }
    }
}

impl AssemblerOptions {
    pub fn new(config_key: impl Into<String>) -> Self {
        Self {
            config_key: config_key.into(),
            ..Self::default()
        }
    }

    pub fn with_overrides<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.override_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_naming_policy(mut self, policy: NamingPolicy) -> Self {
        self.naming_policy = policy;
        self
    }

    pub fn with_coercion(mut self, coercion: ValueCoercion) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn with_store(mut self, store: ConfigStore) -> Self {
        self.store = store;
        self
    }
}

/// Observable progress of an assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    Unresolved,
    Located,
    Loaded,
    Overridden,
    Assembled,
    Failed,
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unresolved => "unresolved",
            Self::Located => "located",
            Self::Loaded => "loaded",
            Self::Overridden => "overridden",
            Self::Assembled => "assembled",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Snapshot of the error a failed run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyFailure {
    pub kind: ErrorKind,
    pub message: String,
    /// Last phase reached before the failure
    pub after: AssemblyPhase,
}

impl AssemblyFailure {
    fn to_error(&self) -> Error {
        Error::AssemblyFailed {
            kind: self.kind,
            message: self.message.clone(),
        }
    }
}

/// Builds the [`SharedProvisioningContext`] for one invocation.
///
/// # Example
///
/// ```no_run
/// use stackctx_core::{AssemblerOptions, ContextAssembler, InvocationArgs, SourceSet};
///
/// let args = InvocationArgs::parse(["APP_CONFIG=config/app-config-dev.json"])?;
/// let mut assembler = ContextAssembler::new(AssemblerOptions::default());
/// let context = assembler.assemble(&SourceSet::standard(args))?;
/// println!("{}", context.project_prefix());
/// # Ok::<(), stackctx_core::Error>(())
/// ```
#[derive(Debug)]
pub struct ContextAssembler {
    options: AssemblerOptions,
    phase: AssemblyPhase,
    outcome: Option<std::result::Result<SharedProvisioningContext, AssemblyFailure>>,
    overrides: OverrideReport,
}

impl ContextAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self {
            options,
            phase: AssemblyPhase::Unresolved,
            outcome: None,
            overrides: OverrideReport::default(),
        }
    }

    /// Run the pipeline, or return the settled result of an earlier run.
    ///
    /// # Errors
    ///
    /// The first run returns the originating error. Later calls after a
    /// failure return [`Error::AssemblyFailed`] carrying the same kind and
    /// message.
    pub fn assemble(&mut self, sources: &SourceSet) -> Result<&SharedProvisioningContext> {
        let outcome = match self.outcome.take() {
            Some(settled) => settled,
            None => match self.run(sources) {
                Ok(context) => {
                    self.transition(AssemblyPhase::Assembled);
                    Ok(context)
                }
                Err(err) => {
                    let failure = AssemblyFailure {
                        kind: err.kind(),
                        message: err.to_string(),
                        after: self.phase,
                    };
                    tracing::debug!(phase = %self.phase, kind = %failure.kind, "Context assembly failed");
                    self.phase = AssemblyPhase::Failed;
                    self.outcome = Some(Err(failure));
                    return Err(err);
                }
            },
        };

        match &*self.outcome.insert(outcome) {
            Ok(context) => Ok(context),
            Err(failure) => Err(failure.to_error()),
        }
    }

    fn run(&mut self, sources: &SourceSet) -> Result<SharedProvisioningContext> {
        let location = ConfigLocator::new(&self.options.config_key).locate(sources)?;
        self.transition(AssemblyPhase::Located);

        let mut document = ConfigLoader::new(self.options.store).load(&location.path)?;
        ProjectIdentity::from_document(&document)?;
        self.transition(AssemblyPhase::Loaded);

        self.overrides = OverrideApplier::new(self.options.coercion).apply_paths(
            &mut document,
            self.options.override_paths.as_slice(),
            sources.args(),
        )?;
        self.transition(AssemblyPhase::Overridden);

        // Overrides may have touched the project section.
        let identity = ProjectIdentity::from_document(&document)?;
        let prefix = self
            .options
            .naming_policy
            .resolve(&identity.name, &identity.stage);
        tracing::debug!(%prefix, policy = %self.options.naming_policy, "Resolved project prefix");

        Ok(SharedProvisioningContext::new(
            prefix, identity, document, location,
        ))
    }

    fn transition(&mut self, next: AssemblyPhase) {
        tracing::debug!(from = %self.phase, to = %next, "Assembly transition");
        self.phase = next;
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    pub fn phase(&self) -> AssemblyPhase {
        self.phase
    }

    /// Whether a context was assembled.
    pub fn ready(&self) -> bool {
        self.phase == AssemblyPhase::Assembled
    }

    pub fn context(&self) -> Option<&SharedProvisioningContext> {
        match &self.outcome {
            Some(Ok(context)) => Some(context),
            _ => None,
        }
    }

    pub fn into_context(self) -> Option<SharedProvisioningContext> {
        self.outcome.and_then(|outcome| outcome.ok())
    }

    pub fn failure(&self) -> Option<&AssemblyFailure> {
        match &self.outcome {
            Some(Err(failure)) => Some(failure),
            _ => None,
        }
    }

    /// Overrides applied and skipped by the run.
    pub fn override_report(&self) -> &OverrideReport {
        &self.overrides
    }
}
