//! End-to-end tests for context assembly

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use stackctx_core::{
    AssemblerOptions, AssemblyPhase, ConfigLoader, ContextAssembler, Error, ErrorKind,
    InvocationArgs, MapSource, NamingPolicy, OverrideApplier, OverrideEntry, SourceKind,
    SourceSet, ValueCoercion, resolve_prefix,
};
use stackctx_fs::NormalizedPath;
use stackctx_test_utils::{ConfigFixture, acme_config, workspace_fixture};

fn inline(fixture: &ConfigFixture, extra: &[(&str, &str)]) -> SourceSet {
    let mut args = InvocationArgs::new().with("APP_CONFIG", fixture.path_str("config/app.json"));
    for (key, value) in extra {
        args.insert(*key, *value);
    }
    SourceSet::new(args)
}

#[test]
fn test_override_scenario_without_coercion() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());

    let mut assembler =
        ContextAssembler::new(AssemblerOptions::default().with_overrides(["stacks.x.size"]));
    let context = assembler
        .assemble(&inline(&fixture, &[("stacks.x.size", "5")]))
        .unwrap();

    assert_eq!(context.project_prefix(), "acmedev");
    assert_eq!(context.get("stacks.x.size"), Some(&json!("5")));
    assert_eq!(context.target_account(), "111");
    assert_eq!(context.target_region(), "us-east-1");
    assert_eq!(context.config_source(), SourceKind::InlineArgument);
    assert_eq!(
        context.config_source_path().as_str(),
        NormalizedPath::new(fixture.path_str("config/app.json")).as_str()
    );
    assert!(context.variables().is_empty());
    assert!(assembler.ready());
}

#[test]
fn test_override_scenario_with_json_coercion() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());

    let options = AssemblerOptions::default()
        .with_overrides(["stacks.x.size"])
        .with_coercion(ValueCoercion::JsonLiteral);
    let mut assembler = ContextAssembler::new(options);
    let context = assembler
        .assemble(&inline(&fixture, &[("stacks.x.size", "5")]))
        .unwrap();

    assert_eq!(context.get("stacks.x.size"), Some(&json!(5)));
}

#[test]
fn test_override_of_missing_stack_never_assembles() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());

    let mut assembler =
        ContextAssembler::new(AssemblerOptions::default().with_overrides(["stacks.y.size"]));
    let err = assembler
        .assemble(&inline(&fixture, &[("stacks.y.size", "5")]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OverridePath);
    assert_eq!(err.override_segment().as_deref(), Some("y"));
    assert!(err.to_string().contains("'y'"));
    assert_eq!(assembler.phase(), AssemblyPhase::Failed);
    assert_eq!(assembler.failure().unwrap().after, AssemblyPhase::Loaded);
    assert!(!assembler.ready());
    assert!(assembler.into_context().is_none());
}

#[test]
fn test_unsupplied_override_is_skipped() {
    let fixture = ConfigFixture::new();
    fixture.write_json("config/app.json", &acme_config());

    let options = AssemblerOptions::default().with_overrides(["stacks.x.size", "stacks.y.size"]);
    let mut assembler = ContextAssembler::new(options);
    let context = assembler.assemble(&inline(&fixture, &[])).unwrap();

    assert_eq!(context.get("stacks.x.size"), Some(&json!(1)));
    assert_eq!(
        assembler.override_report().skipped,
        vec!["stacks.x.size", "stacks.y.size"]
    );
}

#[test]
fn test_batch_is_not_atomic() {
    let fixture = ConfigFixture::new();
    let path = fixture.write_json("config/app.json", &acme_config());
    let mut document = ConfigLoader::default()
        .load(&NormalizedPath::new(path))
        .unwrap();

    let entries = [
        OverrideEntry::new("stacks.x.size", Some("7".into())),
        OverrideEntry::new("stacks.y.size", Some("5".into())),
    ];
    let err = OverrideApplier::default()
        .apply(&mut document, &entries)
        .unwrap_err();

    assert!(matches!(err, Error::OverridePath { .. }));
    assert_eq!(document.read("stacks.x.size"), Some(&json!("7")));
    assert_eq!(document.read("stacks.y"), None);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let args = InvocationArgs::new().with(
        "APP_CONFIG",
        workspace_fixture("configs/malformed.json")
            .to_string_lossy()
            .into_owned(),
    );

    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let err = assembler.assemble(&SourceSet::new(args)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigParse);
    assert_eq!(assembler.failure().unwrap().after, AssemblyPhase::Located);
}

#[test]
fn test_non_utf8_file_is_parse_error() {
    let fixture = ConfigFixture::new();
    std::fs::create_dir_all(fixture.root().join("config")).unwrap();
    std::fs::write(
        fixture.root().join("config/app.json"),
        b"{\"project\": \"\xff\xfe\"}",
    )
    .unwrap();

    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let err = assembler.assemble(&inline(&fixture, &[])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigParse);
    assert_eq!(assembler.failure().unwrap().after, AssemblyPhase::Located);
}

#[test]
fn test_missing_file_is_read_error() {
    let fixture = ConfigFixture::new();
    let mut assembler = ContextAssembler::new(AssemblerOptions::default());

    let err = assembler.assemble(&inline(&fixture, &[])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigRead);
}

#[test]
fn test_missing_stage_is_config_not_found() {
    let args = InvocationArgs::new().with(
        "APP_CONFIG",
        workspace_fixture("configs/app-config-no-stage.json")
            .to_string_lossy()
            .into_owned(),
    );

    let mut assembler = ContextAssembler::new(AssemblerOptions::default());
    let err = assembler.assemble(&SourceSet::new(args)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    assert!(matches!(err, Error::MissingProjectField { ref field, .. } if field == "stage"));
}

#[test]
fn test_legacy_capitalized_layout() {
    let env = MapSource::new(SourceKind::EnvironmentVariable).with(
        "APP_CONFIG",
        workspace_fixture("configs/app-config-legacy.json")
            .to_string_lossy()
            .into_owned(),
    );
    let sources = SourceSet::new(InvocationArgs::new()).with_source(env);

    let options = AssemblerOptions::default().with_naming_policy(NamingPolicy::NameHyphenStage);
    let mut assembler = ContextAssembler::new(options);
    let context = assembler.assemble(&sources).unwrap();

    assert_eq!(context.project_prefix(), "Hooks-Prod");
    assert_eq!(context.identity().profile.as_deref(), Some("prod"));
    assert_eq!(context.stacks(), vec!["VpcInfra"]);
    assert_eq!(context.config_source(), SourceKind::EnvironmentVariable);
}

#[test]
fn test_nested_override_into_fixture() {
    let path = workspace_fixture("configs/app-config-dev.json")
        .to_string_lossy()
        .into_owned();
    let args = InvocationArgs::new()
        .with("APP_CONFIG", path)
        .with("stacks.webhookECS.rds.allocatedStorage", "100")
        .with("stacks.webhookECS.ecs.services[1].name", "consumer");
    let options = AssemblerOptions::default()
        .with_overrides([
            "stacks.webhookECS.rds.allocatedStorage",
            "stacks.webhookECS.ecs.services[1].name",
        ])
        .with_coercion(ValueCoercion::JsonLiteral);

    let mut assembler = ContextAssembler::new(options);
    let context = assembler.assemble(&SourceSet::new(args)).unwrap();

    assert_eq!(context.project_prefix(), "WebhookDev");
    assert_eq!(
        context.get("stacks.webhookECS.rds.allocatedStorage"),
        Some(&json!(100))
    );
    assert_eq!(
        context.get("stacks.webhookECS.ecs.services[1].name"),
        Some(&json!("consumer"))
    );
    assert_eq!(
        context.get("stacks.webhookECS.rds.credentials.username"),
        Some(&json!("webhook"))
    );
}

proptest! {
    #[test]
    fn test_prefix_is_pure(name in "[a-zA-Z0-9]{1,12}", stage in "[a-zA-Z0-9]{1,8}") {
        for policy in [NamingPolicy::NameAndStage, NamingPolicy::NameHyphenStage, NamingPolicy::NameOnly] {
            prop_assert_eq!(resolve_prefix(&name, &stage, policy), resolve_prefix(&name, &stage, policy));
        }
        prop_assert_eq!(resolve_prefix(&name, &stage, NamingPolicy::NameAndStage), format!("{name}{stage}"));
        prop_assert_eq!(resolve_prefix(&name, &stage, NamingPolicy::NameHyphenStage), format!("{name}-{stage}"));
        prop_assert_eq!(resolve_prefix(&name, &stage, NamingPolicy::NameOnly), name.clone());
    }
}
