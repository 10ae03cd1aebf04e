//! The shared provisioning context handed to stack builders

use serde::Serialize;
use serde_json::{Map, Value};
use stackctx_content::ConfigDocument;
use stackctx_fs::NormalizedPath;

use crate::locator::ConfigLocation;
use crate::project::{ProjectIdentity, STACK_SECTIONS};
use crate::source::SourceKind;

/// Everything a stack builder needs to declare its resources.
///
/// Built once per invocation by the
/// [`ContextAssembler`](crate::ContextAssembler). The configuration is
/// read-only from here on; builders keep their own scratch state in
/// `variables`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProvisioningContext {
    project_prefix: String,
    identity: ProjectIdentity,
    config: ConfigDocument,
    config_source_path: NormalizedPath,
    config_source: SourceKind,
    target_account: String,
    target_region: String,
    variables: Map<String, Value>,
}

impl SharedProvisioningContext {
    pub(crate) fn new(
        project_prefix: String,
        identity: ProjectIdentity,
        config: ConfigDocument,
        location: ConfigLocation,
    ) -> Self {
        Self {
            target_account: identity.account.clone(),
            target_region: identity.region.clone(),
            project_prefix,
            identity,
            config,
            config_source_path: location.path,
            config_source: location.source,
            variables: Map::new(),
        }
    }

    pub fn project_prefix(&self) -> &str {
        &self.project_prefix
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    pub fn config(&self) -> &ConfigDocument {
        &self.config
    }

    pub fn config_source_path(&self) -> &NormalizedPath {
        &self.config_source_path
    }

    pub fn config_source(&self) -> SourceKind {
        self.config_source
    }

    pub fn target_account(&self) -> &str {
        &self.target_account
    }

    pub fn target_region(&self) -> &str {
        &self.target_region
    }

    /// Read a value of the configuration by dot path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.config.read(path)
    }

    /// Names of the stacks declared in the stack section, sorted by name.
    pub fn stacks(&self) -> Vec<&str> {
        self.stack_section()
            .and_then(Value::as_object)
            .map(|stacks| stacks.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Configuration of a single stack.
    pub fn stack(&self, name: &str) -> Option<&Value> {
        self.stack_section()?.get(name)
    }

    fn stack_section(&self) -> Option<&Value> {
        self.config.section(&STACK_SECTIONS).map(|(_, value)| value)
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Record builder scratch state. Returns the value it replaced.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.variables.insert(name.into(), value)
    }
}
