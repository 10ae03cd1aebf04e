//! End-to-end tests for the provisioning flow
//!
//! These tests exercise the complete flow: locate -> load -> override ->
//! prefix -> context, and then read the context the way stack builders do.

use pretty_assertions::assert_eq;
use serde_json::json;
use stackctx_core::{
    AssemblerOptions, ContextAssembler, ErrorKind, FallbackPath, InvocationArgs, MapSource,
    RecognizedOptions, SharedProvisioningContext, SourceKind, SourceSet, ValueCoercion,
};
use stackctx_test_utils::{ConfigFixture, acme_config, workspace_fixture};

fn dev_config_path() -> String {
    workspace_fixture("configs/app-config-dev.json")
        .to_string_lossy()
        .into_owned()
}

fn assemble(args: InvocationArgs, options: AssemblerOptions) -> SharedProvisioningContext {
    let mut assembler = ContextAssembler::new(options);
    assembler.assemble(&SourceSet::new(args)).unwrap();
    assembler.into_context().unwrap()
}

/// Stand-in for a cache stack builder reading its section with defaults
fn cache_node_count(context: &SharedProvisioningContext, stack: &str) -> u64 {
    let options = RecognizedOptions::new()
        .option("engine", "redis")
        .option("cacheNodeType", "cache.t3.micro")
        .option("numCacheNodes", 1);
    let section = context.stack(stack).and_then(|s| s.get("elasticCache"));
    options
        .resolve(section)
        .get("numCacheNodes")
        .and_then(|v| v.as_u64())
        .unwrap_or_default()
}

#[test]
fn builders_share_one_context() {
    let args = InvocationArgs::new().with("APP_CONFIG", dev_config_path());
    let mut context = assemble(args, AssemblerOptions::default());

    assert_eq!(context.project_prefix(), "WebhookDev");
    assert_eq!(context.stacks(), vec!["webhookECS"]);
    assert_eq!(cache_node_count(&context, "webhookECS"), 1);

    // The network builder publishes its VPC id for later builders.
    let vpc_id = format!(
        "{}-{}",
        context.project_prefix(),
        context.get("stacks.webhookECS.vpc.name").and_then(|v| v.as_str()).unwrap()
    );
    context.set_variable("vpcId", json!(vpc_id));

    assert_eq!(context.variable("vpcId"), Some(&json!("WebhookDev-WebhookVpc")));
}

#[test]
fn overrides_reach_builders() {
    let args = InvocationArgs::new()
        .with("APP_CONFIG", dev_config_path())
        .with("stacks.webhookECS.elasticCache.numCacheNodes", "3");
    let options = AssemblerOptions::default()
        .with_overrides(["stacks.webhookECS.elasticCache.numCacheNodes"])
        .with_coercion(ValueCoercion::JsonLiteral);

    let context = assemble(args, options);

    assert_eq!(cache_node_count(&context, "webhookECS"), 3);
}

#[test]
fn stage_override_changes_prefix() {
    let args = InvocationArgs::new()
        .with("APP_CONFIG", dev_config_path())
        .with("project.stage", "Qa");
    let options = AssemblerOptions::default().with_overrides(["project.stage"]);

    let context = assemble(args, options);

    assert_eq!(context.project_prefix(), "WebhookQa");
    assert_eq!(context.identity().stage, "Qa");
}

#[test]
fn yaml_and_toml_configs_assemble_alike() {
    let fixture = ConfigFixture::new();
    fixture.write_raw(
        "config/app.yaml",
        "project:\n  name: acme\n  stage: dev\n  account: '111'\n  region: us-east-1\nstacks:\n  x:\n    size: 1\n",
    );
    fixture.write_raw(
        "config/app.toml",
        "[project]\nname = \"acme\"\nstage = \"dev\"\naccount = \"111\"\nregion = \"us-east-1\"\n\n[stacks.x]\nsize = 1\n",
    );

    for file in ["config/app.yaml", "config/app.toml"] {
        let args = InvocationArgs::new().with("APP_CONFIG", fixture.path_str(file));
        let context = assemble(args, AssemblerOptions::default());

        assert_eq!(context.project_prefix(), "acmedev");
        assert_eq!(context.config().root(), &acme_config());
    }
}

#[test]
fn fallback_path_is_used_last() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/default.json", &acme_config());

    let sources = SourceSet::new(InvocationArgs::new())
        .with_source(MapSource::new(SourceKind::EnvironmentVariable))
        .with_source(FallbackPath::new(fixture.path_str("config/default.json")));
    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let context = assembler.assemble(&sources).unwrap();

    assert_eq!(context.config_source(), SourceKind::Fallback);
}

#[test]
fn assembly_runs_once() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());
    let first = SourceSet::new(InvocationArgs::new().with("APP_CONFIG", fixture.path_str("config/app.json")));
    let second = SourceSet::new(InvocationArgs::new().with("APP_CONFIG", dev_config_path()));

    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let prefix = assembler.assemble(&first).unwrap().project_prefix().to_string();
    let again = assembler.assemble(&second).unwrap().project_prefix().to_string();

    assert_eq!(prefix, "acmedev");
    assert_eq!(again, "acmedev");
}

#[test]
fn failed_assembly_stays_failed() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());
    let broken = SourceSet::new(InvocationArgs::new().with("APP_CONFIG", fixture.path_str("config/missing.json")));
    let good = SourceSet::new(InvocationArgs::new().with("APP_CONFIG", fixture.path_str("config/app.json")));

    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let first = assembler.assemble(&broken).unwrap_err();
    let second = assembler.assemble(&good).unwrap_err();

    assert_eq!(first.kind(), ErrorKind::ConfigRead);
    assert_eq!(second.kind(), ErrorKind::ConfigRead);
    assert!(matches!(second, stackctx_core::Error::AssemblyFailed { .. }));
    assert!(!assembler.ready());
}

#[test]
fn context_serializes_camel_case() {
    let args = InvocationArgs::new().with("APP_CONFIG", dev_config_path());
    let context = assemble(args, AssemblerOptions::default());

    let value = serde_json::to_value(&context).unwrap();

    assert_eq!(value["projectPrefix"], json!("WebhookDev"));
    assert_eq!(value["targetAccount"], json!("111111111111"));
    assert_eq!(value["configSource"], json!("InLine-Argument"));
    assert_eq!(value["config"]["stacks"]["webhookECS"]["rds"]["allocatedStorage"], json!(20));
}
