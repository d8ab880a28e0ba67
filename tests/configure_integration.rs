//! Integration tests for the full plugin lifecycle.
//!
//! These tests apply the plugin to a project, evaluate it and check the
//! frozen graph, the provider order and the code generation arguments.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use anyhow::{bail, Result};
use tempfile::TempDir;

use modweave::core::names::{buckets, plugins};
use modweave::graph::PublishingMode;
use modweave::toolchain::invoker::options;
use modweave::util::config::load_config;
use modweave::util::OrderingViolationError;
use modweave::{
    BucketName, CodegenInvoker, DependencyManager, GraphError, InvokerSet, ModPlugin, ModSettings,
    Project, Provider, ProviderError, ProviderKind, RemappedEntry, Toolchain,
};

type Log<T> = Rc<RefCell<Vec<T>>>;

/// Provider that logs its kind and optionally fills a bucket.
struct StepProvider {
    kind: ProviderKind,
    log: Log<ProviderKind>,
    fail: bool,
    fills: Option<(&'static str, &'static str)>,
}

impl Provider for StepProvider {
    fn provide(&mut self, project: &mut Project) -> Result<()> {
        self.log.borrow_mut().push(self.kind);
        if self.fail {
            bail!("download failed");
        }
        if let Some((bucket, coordinate)) = self.fills {
            project
                .buckets_mut()
                .get_or_create(bucket)?
                .add_dependency(coordinate);
        }
        Ok(())
    }
}

fn providers(failing: Option<ProviderKind>) -> (DependencyManager, Log<ProviderKind>) {
    let log = Log::default();
    let step = |kind, fills| StepProvider {
        kind,
        log: Rc::clone(&log),
        fail: failing == Some(kind),
        fills,
    };

    let manager = DependencyManager::new(
        step(
            ProviderKind::RuntimeArtifact,
            Some((
                buckets::MINECRAFT_NAMED,
                "net.minecraft:minecraft-named:1.20.1",
            )),
        ),
        step(
            ProviderKind::Mappings,
            Some((buckets::MAPPINGS_FINAL, "mappings/mappings-final.tiny")),
        ),
        step(ProviderKind::Launch, None),
    );
    (manager, log)
}

struct LoggingInvoker {
    toolchain: Toolchain,
    log: Log<Toolchain>,
}

impl CodegenInvoker for LoggingInvoker {
    fn configure_code_generation(&mut self, _project: &mut Project) -> Result<()> {
        self.log.borrow_mut().push(self.toolchain);
        Ok(())
    }
}

fn logging_invokers() -> (InvokerSet, Log<Toolchain>) {
    let log = Log::default();
    let invoker = |toolchain| LoggingInvoker {
        toolchain,
        log: Rc::clone(&log),
    };
    let set = InvokerSet::new(
        invoker(Toolchain::Java),
        invoker(Toolchain::Scala),
        invoker(Toolchain::Kapt),
    );
    (set, log)
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_full_lifecycle_with_defaults() {
    let (manager, log) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager).apply(&mut project).unwrap();
    let graph = project.evaluate().unwrap();

    assert!(graph.includes("compileClasspath", "modImplementationMapped"));
    assert!(graph.includes("runtimeClasspath", "modLocalRuntimeMapped"));
    assert!(!graph.includes("compileClasspath", "modLocalRuntimeMapped"));
    assert!(graph.includes("runtimeClasspath", "mappingsFinal"));
    assert!(graph
        .bucket("runtimeElements")
        .unwrap()
        .directly_extends("modImplementation"));

    // Parents are resolved before the buckets extending them
    let order = graph.resolution_order();
    let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
    assert!(position("modApiMapped") < position("compileClasspath"));
    assert!(position("minecraftLibraries") < position("minecraftNamed"));

    assert_eq!(*log.borrow(), ProviderKind::ORDER);

    let args = project.compile_options(Toolchain::Java).unwrap().args();
    assert!(args
        .contains(&"-AinMapFileNamedIntermediary=mappings/mappings-final.tiny".to_string()));
}

#[test]
fn test_applying_twice_runs_providers_once() {
    let (first, log) = providers(None);
    let (second, second_log) = providers(None);
    let (invokers, invoked) = logging_invokers();
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(first)
        .with_invokers(invokers)
        .apply(&mut project)
        .unwrap();
    ModPlugin::new(second).apply(&mut project).unwrap();
    project.evaluate().unwrap();

    assert_eq!(log.borrow().len(), 3);
    assert!(second_log.borrow().is_empty());
    assert_eq!(*invoked.borrow(), vec![Toolchain::Java]);
}

#[test]
fn test_graph_snapshot_serializes() {
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();
    ModPlugin::new(manager).apply(&mut project).unwrap();

    let json = project.evaluate().unwrap().to_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let named = value["buckets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["name"] == "minecraftNamed")
        .unwrap();
    assert_eq!(named["transitive"], false);
    assert_eq!(
        named["dependencies"][0],
        "net.minecraft:minecraft-named:1.20.1"
    );
}

#[test]
fn test_mapping_provider_failure_aborts_evaluation() {
    let (manager, log) = providers(Some(ProviderKind::Mappings));
    let (invokers, invoked) = logging_invokers();
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager)
        .with_invokers(invokers)
        .apply(&mut project)
        .unwrap();
    let err = project.evaluate().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProviderError>(),
        Some(ProviderError::Failed {
            kind: ProviderKind::Mappings,
            ..
        })
    ));
    assert_eq!(
        *log.borrow(),
        vec![ProviderKind::RuntimeArtifact, ProviderKind::Mappings]
    );
    assert!(invoked.borrow().is_empty());
    assert!(!project.tasks().contains("remapJar"));
    assert!(project.graph().is_none());
}

// ============================================================================
// Plugin ordering
// ============================================================================

#[test]
fn test_kapt_applied_first_is_rejected() {
    let (manager, log) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();
    project.apply_plugin(plugins::KAPT).unwrap();

    let err = ModPlugin::new(manager).apply(&mut project).unwrap_err();
    let violation = err.downcast_ref::<OrderingViolationError>().unwrap();

    assert_eq!(violation.required_first, "modweave");
    assert!(err.to_string().contains("BEFORE"));
    assert!(!project.buckets().contains("modApi"));

    // Nothing was deferred either
    project.evaluate().unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_kapt_applied_after_is_configured() {
    let (manager, _) = providers(None);
    let (invokers, invoked) = logging_invokers();
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager)
        .with_invokers(invokers)
        .apply(&mut project)
        .unwrap();
    project.apply_plugin(plugins::KAPT).unwrap();
    project.apply_plugin(plugins::SCALA).unwrap();
    project.evaluate().unwrap();

    assert_eq!(
        *invoked.borrow(),
        vec![Toolchain::Java, Toolchain::Scala, Toolchain::Kapt]
    );
}

#[test]
fn test_standard_kapt_invoker_sets_processor_options() {
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager).apply(&mut project).unwrap();
    project.apply_plugin(plugins::KAPT).unwrap();
    project.evaluate().unwrap();

    let kapt = project.compile_options(Toolchain::Kapt).unwrap();
    assert_eq!(kapt.encoding.as_deref(), Some("UTF-8"));
    assert_eq!(
        kapt.processor_option(options::IN_MAP_FILE),
        Some("mappings/mappings-final.tiny")
    );
    assert!(project
        .compile_options(Toolchain::Scala)
        .unwrap()
        .args()
        .is_empty());
}

// ============================================================================
// Output modes and configuration
// ============================================================================

#[test]
fn test_remap_mode_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let global = tmp.path().join("global.toml");
    let project_file = tmp.path().join(".modweave").join("config.toml");
    fs::create_dir_all(project_file.parent().unwrap()).unwrap();

    fs::write(&global, "[remap]\narchives = false\n").unwrap();
    fs::write(&project_file, "[mixin]\nrefmap-name = \"example.refmap.json\"\n").unwrap();

    let config = load_config(Some(&global), &project_file);
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod")
        .unwrap()
        .with_settings(ModSettings::from_config(&config));

    ModPlugin::new(manager).apply(&mut project).unwrap();
    let graph = project.evaluate().unwrap();

    let named = graph.bucket("namedElements").unwrap();
    assert_eq!(named.artifacts().collect::<Vec<_>>(), vec!["jar"]);
    assert_eq!(project.unmapped_outputs(), &["jar"]);
    assert!(!project.tasks().contains("remapJar"));

    let args = project.compile_options(Toolchain::Java).unwrap().args();
    assert!(args
        .iter()
        .any(|a| a.starts_with("-AoutRefMapFile=") && a.ends_with("example.refmap.json")));
}

#[test]
fn test_remap_mode_by_default() {
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager).apply(&mut project).unwrap();
    project.evaluate().unwrap();

    assert!(project.tasks().contains("remapJar"));
    assert!(project.unmapped_outputs().is_empty());
    assert!(project.settings_mut().remap_archives.set(false).is_err());
}

// ============================================================================
// Graph errors
// ============================================================================

#[test]
fn test_reference_to_missing_bucket_fails_evaluation() {
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();

    ModPlugin::new(manager).apply(&mut project).unwrap();
    project
        .buckets_mut()
        .extends_from("modCompileClasspath", "modShade")
        .unwrap();

    let err = project.evaluate().unwrap_err();
    match err.downcast_ref::<GraphError>() {
        Some(GraphError::UnknownBucket {
            bucket,
            referenced_by,
        }) => {
            assert_eq!(bucket, "modShade");
            assert_eq!(referenced_by, &["modCompileClasspath"]);
        }
        other => panic!("expected unknown bucket, got {other:?}"),
    }
}

#[test]
fn test_user_declared_entry_is_wired_later() {
    let (manager, _) = providers(None);
    let mut project = Project::with_java("examplemod").unwrap();

    let entries = vec![RemappedEntry::new("modShade", true, true, PublishingMode::CompileOnly)];
    ModPlugin::new(manager)
        .with_entries(entries)
        .apply(&mut project)
        .unwrap();
    let graph = project.evaluate().unwrap();

    assert!(graph.includes("testRuntimeClasspath", "modShadeMapped"));
    assert_eq!(
        graph.dependents("modShade"),
        vec![
            BucketName::new("apiElements"),
            BucketName::new("modCompileClasspath")
        ]
    );
    assert!(!graph.bucket("modShadeMapped").unwrap().is_transitive());
}
