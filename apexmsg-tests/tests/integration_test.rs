//! End-to-end tests for the generation pipeline
//!
//! Each test builds a throwaway project in a temp directory from the JSON
//! fixtures (`force.json` plus a `.sfschema/` describe snapshot) and drives
//! either the offline capabilities (snapshot provider, file system sink) or
//! recording fakes that count every call. Runs against a live login are in
//! `remote_test.rs`.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use apexmsg_codegen::codegen::{build_field_table, render_class, ClassSpec};
use apexmsg_codegen::parser::{FieldDescriptor, ObjectDescribe, ObjectTypeSummary};
use apexmsg_codegen::provider::{
    ArtifactSink, FixedPicker, FsSink, Picker, SchemaProvider, SchemaSession, SnapshotProvider,
};
use apexmsg_codegen::{
    run_pipeline, CodegenBuilder, CodegenConfig, CodegenError, ForceConfig, Outcome, Stage,
};
use tempfile::TempDir;

const FORCE_JSON: &str = include_str!("../fixtures/force.json");
const GLOBAL_JSON: &str = include_str!("../fixtures/schema/global.json");
const ACCOUNT_JSON: &str = include_str!("../fixtures/schema/Account.json");
const INVOICE_JSON: &str = include_str!("../fixtures/schema/Acme__Invoice__c.json");

/// A project with force.json and the describe snapshot in place
fn setup_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join(".sfschema");
    std::fs::create_dir_all(&schema).unwrap();
    std::fs::write(dir.path().join("force.json"), FORCE_JSON).unwrap();
    std::fs::write(schema.join("global.json"), GLOBAL_JSON).unwrap();
    std::fs::write(schema.join("Account.json"), ACCOUNT_JSON).unwrap();
    std::fs::write(schema.join("Acme__Invoice__c.json"), INVOICE_JSON).unwrap();
    dir
}

fn config_for(project: &Path) -> CodegenConfig {
    let mut config = CodegenConfig::default_with_project(project.to_path_buf());
    config.open_in_editor = false;
    config
}

fn classes_dir(project: &Path) -> PathBuf {
    project.join("src").join("classes")
}

// ============================================================================
// Recording fakes
// ============================================================================

#[derive(Default)]
struct Calls {
    connect: usize,
    list: usize,
    describe: Vec<String>,
    picked_from: Vec<Vec<String>>,
    writes: Vec<PathBuf>,
    opened: Vec<PathBuf>,
}

struct FakeProvider<'a> {
    calls: &'a RefCell<Calls>,
    objects: Vec<ObjectTypeSummary>,
    fields: Vec<FieldDescriptor>,
    fail_connect: bool,
}

struct FakeSession<'a> {
    calls: &'a RefCell<Calls>,
    objects: Vec<ObjectTypeSummary>,
    fields: Vec<FieldDescriptor>,
}

impl<'a> SchemaProvider for FakeProvider<'a> {
    type Session = FakeSession<'a>;

    fn connect(&self, _config: &ForceConfig) -> apexmsg_codegen::Result<FakeSession<'a>> {
        self.calls.borrow_mut().connect += 1;
        if self.fail_connect {
            return Err(CodegenError::ConnectionError("INVALID_LOGIN".into()));
        }
        Ok(FakeSession {
            calls: self.calls,
            objects: self.objects.clone(),
            fields: self.fields.clone(),
        })
    }
}

impl SchemaSession for FakeSession<'_> {
    fn list_object_types(&self) -> apexmsg_codegen::Result<Vec<ObjectTypeSummary>> {
        self.calls.borrow_mut().list += 1;
        Ok(self.objects.clone())
    }

    fn describe(&self, object_type: &str) -> apexmsg_codegen::Result<ObjectDescribe> {
        self.calls
            .borrow_mut()
            .describe
            .push(object_type.to_string());
        Ok(ObjectDescribe {
            name: object_type.to_string(),
            label: None,
            fields: self.fields.clone(),
        })
    }
}

struct RecordingPicker<'a> {
    calls: &'a RefCell<Calls>,
    inner: FixedPicker,
}

impl Picker for RecordingPicker<'_> {
    fn pick_one(&self, candidates: &[String]) -> apexmsg_codegen::Result<Option<String>> {
        self.calls.borrow_mut().picked_from.push(candidates.to_vec());
        self.inner.pick_one(candidates)
    }
}

struct RecordingSink<'a> {
    calls: &'a RefCell<Calls>,
}

impl ArtifactSink for RecordingSink<'_> {
    fn write_text(&self, path: &Path, _content: &str) -> apexmsg_codegen::Result<()> {
        self.calls.borrow_mut().writes.push(path.to_path_buf());
        Ok(())
    }

    fn open_for_display(&self, path: &Path) -> apexmsg_codegen::Result<()> {
        self.calls.borrow_mut().opened.push(path.to_path_buf());
        Ok(())
    }
}

fn summary(name: &str, createable: bool) -> ObjectTypeSummary {
    ObjectTypeSummary {
        name: name.to_string(),
        createable,
        deletable: false,
        updateable: false,
    }
}

fn fake_provider(calls: &RefCell<Calls>) -> FakeProvider<'_> {
    FakeProvider {
        calls,
        objects: vec![
            summary("Opportunity", true),
            summary("LoginHistory", false),
            summary("Account", true),
        ],
        fields: vec![
            FieldDescriptor::new("Id", "id", Some(false)),
            FieldDescriptor::new("Name", "string", Some(true)),
        ],
        fail_connect: false,
    }
}

// ============================================================================
// Snapshot-backed runs
// ============================================================================

#[test]
fn test_generate_account_end_to_end() {
    let project = setup_project();
    let outcome = CodegenBuilder::new(project.path())
        .offline()
        .object("Account")
        .open_in_editor(false)
        .generate()
        .unwrap();

    let artifacts = match outcome {
        Outcome::Generated(artifacts) => artifacts,
        Outcome::Cancelled => panic!("expected a generated class"),
    };
    assert_eq!(artifacts.class_name, "AccountMsg");
    assert_eq!(
        artifacts.class_path,
        classes_dir(project.path()).join("AccountMsg.cls")
    );
    assert_eq!(
        artifacts.metadata_path,
        classes_dir(project.path()).join("AccountMsg.cls-meta.xml")
    );

    let class_body = std::fs::read_to_string(&artifacts.class_path).unwrap();
    assert!(class_body.starts_with("public with sharing class AccountMsg {\n"));
    let properties: Vec<&str> = class_body
        .lines()
        .filter(|l| l.ends_with("{get; set;}"))
        .collect();
    assert_eq!(
        properties,
        vec![
            "\tpublic String recordId {get; set;}",
            "\tpublic Boolean someField {get; set;}",
        ]
    );
    assert!(class_body.contains("\t\tthis.someField = a.Package__Some_Field__c;\n"));
    assert!(class_body.contains(
        "\t\tif(!String.isBlank(this.recordId)) {\n\t\t\ta.Id = this.recordId;\n\t\t}\n"
    ));

    let metadata = std::fs::read_to_string(&artifacts.metadata_path).unwrap();
    assert!(metadata.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(metadata.contains("<apiVersion>42.0</apiVersion>"));
    assert!(metadata.contains("<status>Active</status>"));
}

#[test]
fn test_generate_custom_object_from_sf_cli_snapshot() {
    let project = setup_project();
    let outcome = CodegenBuilder::new(project.path())
        .offline()
        .object("Acme__Invoice__c")
        .open_in_editor(false)
        .generate()
        .unwrap();

    let Outcome::Generated(artifacts) = outcome else {
        panic!("expected a generated class");
    };
    assert_eq!(artifacts.class_name, "InvoiceMsg");

    let class_body = std::fs::read_to_string(&artifacts.class_path).unwrap();
    let properties: Vec<&str> = class_body
        .lines()
        .filter(|l| l.ends_with("{get; set;}"))
        .map(str::trim)
        .collect();
    assert_eq!(
        properties,
        vec![
            "public String account {get; set;}",
            "public Double amount {get; set;}",
            "public String dueDate {get; set;}",
            "public String guid {get; set;}",
            "public Boolean isPaid {get; set;}",
            "public String name {get; set;}",
            "public String recordId {get; set;}",
            "public Boolean slaViolation {get; set;}",
        ]
    );
    // Not updateable
    assert!(!class_body.contains("CreatedDate"));
    assert!(class_body.contains("\tpublic InvoiceMsg(Acme__Invoice__c a) {\n"));
    assert!(class_body.contains("\t\ta.Acme__SLAViolation__c = this.slaViolation;\n"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let project = setup_project();
    let generate = || {
        CodegenBuilder::new(project.path())
            .offline()
            .object("Acme__Invoice__c")
            .open_in_editor(false)
            .generate()
            .unwrap();
        let dir = classes_dir(project.path());
        (
            std::fs::read(dir.join("InvoiceMsg.cls")).unwrap(),
            std::fs::read(dir.join("InvoiceMsg.cls-meta.xml")).unwrap(),
        )
    };

    let first = generate();
    let second = generate();
    assert_eq!(first, second);
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = setup_project();
    let outcome = CodegenBuilder::new(project.path())
        .offline()
        .object("Account")
        .dry_run()
        .generate()
        .unwrap();

    assert!(matches!(outcome, Outcome::Generated(_)));
    assert!(!classes_dir(project.path()).exists());
}

#[test]
fn test_unknown_object_fails_at_pick() {
    let project = setup_project();
    // AccountHistory exists but cannot be modified, so it is never offered
    let err = CodegenBuilder::new(project.path())
        .offline()
        .object("AccountHistory")
        .open_in_editor(false)
        .generate()
        .unwrap_err();

    assert!(matches!(
        err,
        CodegenError::Stage {
            stage: Stage::Pick,
            ..
        }
    ));
    assert!(matches!(err.root(), CodegenError::UnknownObjectType(_)));
    assert!(!classes_dir(project.path()).exists());
}

#[test]
fn test_missing_describe_fails_without_writing() {
    let project = setup_project();
    // Contact is offered but has no describe document in the snapshot
    let err = CodegenBuilder::new(project.path())
        .offline()
        .object("Contact")
        .open_in_editor(false)
        .generate()
        .unwrap_err();

    assert!(matches!(
        err,
        CodegenError::Stage {
            stage: Stage::Describe,
            ..
        }
    ));
    assert!(!classes_dir(project.path()).exists());
}

#[test]
fn test_missing_force_json_aborts_before_connecting() {
    let project = setup_project();
    std::fs::remove_file(project.path().join("force.json")).unwrap();

    let calls = RefCell::new(Calls::default());
    let err = run_pipeline(
        &config_for(project.path()),
        &fake_provider(&calls),
        &RecordingPicker {
            calls: &calls,
            inner: FixedPicker::new("Account"),
        },
        &RecordingSink { calls: &calls },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CodegenError::Stage {
            stage: Stage::Config,
            ..
        }
    ));
    assert!(err.to_string().contains("force.json"));
    assert_eq!(calls.borrow().connect, 0);
}

#[test]
fn test_incomplete_force_json_names_missing_field() {
    let project = setup_project();
    let incomplete = r#"{
        "url": "https://login.salesforce.com",
        "username": "dev@example.com",
        "apiVersion": "42.0"
    }"#;
    std::fs::write(project.path().join("force.json"), incomplete).unwrap();

    let err = CodegenBuilder::new(project.path())
        .offline()
        .object("Account")
        .open_in_editor(false)
        .generate()
        .unwrap_err();

    assert_eq!(
        err.root().to_string(),
        "Validation error: No value for \"password\" is set in \"force.json\"."
    );
}

#[test]
fn test_snapshot_provider_lists_fixture_objects() {
    let project = setup_project();
    let force = ForceConfig::from_json(FORCE_JSON).unwrap();
    let session = SnapshotProvider::new(project.path().join(".sfschema"))
        .connect(&force)
        .unwrap();

    let names = apexmsg_codegen::pipeline::offerable_object_types(
        &session.list_object_types().unwrap(),
    );
    assert_eq!(names, vec!["Account", "Acme__Invoice__c", "Contact"]);
}

// ============================================================================
// Pipeline behaviour with recording fakes
// ============================================================================

#[test]
fn test_pipeline_calls_each_capability_once() {
    let project = setup_project();
    let calls = RefCell::new(Calls::default());

    let outcome = run_pipeline(
        &config_for(project.path()),
        &fake_provider(&calls),
        &RecordingPicker {
            calls: &calls,
            inner: FixedPicker::new("Account"),
        },
        &RecordingSink { calls: &calls },
    )
    .unwrap();

    assert!(matches!(outcome, Outcome::Generated(_)));
    let calls = calls.borrow();
    assert_eq!(calls.connect, 1);
    assert_eq!(calls.list, 1);
    // Only modifiable object types, sorted ascending
    assert_eq!(
        calls.picked_from,
        vec![vec!["Account".to_string(), "Opportunity".to_string()]]
    );
    assert_eq!(calls.describe, vec!["Account".to_string()]);

    let class_path = classes_dir(project.path()).join("AccountMsg.cls");
    assert_eq!(
        calls.writes,
        vec![
            class_path.clone(),
            classes_dir(project.path()).join("AccountMsg.cls-meta.xml"),
        ]
    );
    assert_eq!(calls.opened, vec![class_path]);
}

#[test]
fn test_cancelled_pick_short_circuits() {
    let project = setup_project();
    let calls = RefCell::new(Calls::default());

    let outcome = run_pipeline(
        &config_for(project.path()),
        &fake_provider(&calls),
        &RecordingPicker {
            calls: &calls,
            inner: FixedPicker::cancel(),
        },
        &RecordingSink { calls: &calls },
    )
    .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    let calls = calls.borrow();
    assert_eq!(calls.picked_from.len(), 1);
    assert!(calls.describe.is_empty());
    assert!(calls.writes.is_empty());
    assert!(calls.opened.is_empty());
}

#[test]
fn test_connect_failure_aborts_chain() {
    let project = setup_project();
    let calls = RefCell::new(Calls::default());
    let mut provider = fake_provider(&calls);
    provider.fail_connect = true;

    let err = run_pipeline(
        &config_for(project.path()),
        &provider,
        &RecordingPicker {
            calls: &calls,
            inner: FixedPicker::new("Account"),
        },
        &RecordingSink { calls: &calls },
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "connect stage failed: Connection error: INVALID_LOGIN"
    );
    let calls = calls.borrow();
    assert_eq!(calls.list, 0);
    assert!(calls.picked_from.is_empty());
    assert!(calls.writes.is_empty());
}

#[test]
fn test_fs_sink_writes_through_pipeline() {
    let project = setup_project();
    let calls = RefCell::new(Calls::default());

    run_pipeline(
        &config_for(project.path()),
        &fake_provider(&calls),
        &FixedPicker::new("Opportunity"),
        &FsSink::new(false, false),
    )
    .unwrap();

    let class_path = classes_dir(project.path()).join("OpportunityMsg.cls");
    let class_body = std::fs::read_to_string(class_path).unwrap();
    assert!(class_body.contains("\tpublic String name {get; set;}\n"));
    assert!(class_body.contains("\t\to.Name = this.name;\n"));
}

// ============================================================================
// Properties over the field table
// ============================================================================

#[test]
fn test_id_always_kept_and_read_only_fields_dropped() {
    let cases: Vec<Vec<FieldDescriptor>> = vec![
        vec![FieldDescriptor::new("Id", "id", Some(false))],
        vec![FieldDescriptor::new("ID", "id", Some(true))],
        vec![
            FieldDescriptor::new("LastModifiedDate", "datetime", Some(false)),
            FieldDescriptor::new("id", "id", None),
            FieldDescriptor::new("Acme__Score__c", "double", Some(false)),
        ],
    ];

    for fields in cases {
        let table = build_field_table(&fields);
        let ids: Vec<_> = table.iter().filter(|f| f.is_record_id()).collect();
        assert_eq!(ids.len(), 1, "fields: {:?}", fields);
        assert_eq!(ids[0].pretty_name, "recordId");

        for row in &table {
            assert!(row.is_record_id() || row.metadata.updateable != Some(false));
        }
    }
}

#[test]
fn test_empty_describe_renders_fieldless_class() {
    let spec = ClassSpec::new("Task", build_field_table(&[]), "58.0");
    let rendered = render_class(&spec);

    assert_eq!(rendered.class_name, "TaskMsg");
    assert!(!rendered.class_body.contains("{get; set;}"));
    assert!(rendered.class_body.ends_with("\t\treturn t;\n\t}\n}\n"));
}

#[test]
fn test_describe_fixture_parses_like_snapshot() -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(INVOICE_JSON)?;
    let field_count = value["result"]["fields"]
        .as_array()
        .map(|a| a.len())
        .unwrap_or_default();

    let describe = apexmsg_codegen::parser::parse_object_describe(INVOICE_JSON)?;
    assert_eq!(describe.fields.len(), field_count);
    assert_eq!(build_field_table(&describe.fields).len(), field_count - 1);
    Ok(())
}
