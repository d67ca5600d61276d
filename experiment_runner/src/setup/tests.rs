//!
//! The experiment setup tests.
//!

#![cfg(test)]

use std::path::Path;

use crate::context::arguments::Arguments;
use crate::context::paths::Paths;
use crate::context::seed::Seed;
use crate::context::Context;
use crate::error::Error;

use super::Setup;

const EXPERIMENT: &str = r#"
packages:
  llvm: { prefix: /opt/r2c-llvm, version: "17" }
  gperftools: { prefix: gperftools }
instances:
  - optlevel: 3
  - optlevel: s
    lto: true
    allocator: tcmalloc
  - name: baseline
    optlevel: 3
    all_flags: ["-flto=thin"]
    linker_flags: ["-Wl,--plugin-opt,-fast-isel=false"]
  - name: r2c
    optlevel: "3"
    randomize: true
    benchmark_env: { HEAP_BOOBYTRAP_SEED: RNGSEED }
    linker_flags: ["-Wl,--plugin-opt,-rng-seed=RNGSEED"]
targets:
  - name: echo-target
    root: ./demo
    build: ["make"]
    run: ["./run.sh"]
    parallel: true
  - name: spec
    root: /srv/spec
    build: ["runspec", "--action=build"]
    link: ["runspec", "--action=link"]
    run: ["runspec", "--action=run"]
"#;

fn setup() -> Setup {
    Setup::from_yaml(EXPERIMENT, Path::new("/work")).expect("Always valid")
}

fn context() -> Context {
    Context::new(Paths::new("/work".into(), None), Arguments::default())
}

#[test]
fn registers_in_declaration_order() {
    let setup = setup();
    assert_eq!(
        setup.instances.names(),
        vec!["clang-O3", "clang-Os-lto-tcmalloc", "baseline", "r2c"]
    );
    assert_eq!(setup.targets.names(), vec!["echo-target", "spec"]);
}

#[test]
fn packages_are_resolved_against_the_experiment_directory() {
    let setup = setup();
    assert_eq!(setup.package("llvm").expect("Always valid").ident(), "llvm-17");

    let mut context = context();
    setup
        .instances
        .get("clang-Os-lto-tcmalloc")
        .expect("Always valid")
        .configure(&mut context)
        .expect("Always valid");
    assert_eq!(context.cc, "/opt/r2c-llvm/bin/clang");
    assert!(context
        .ldflags
        .contains(&"-L/work/gperftools/lib".to_owned()));
}

#[test]
fn unknown_package_lists_the_available_ones() {
    let error = setup().package("musl").expect_err("Must fail");
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::UnknownPackage { available, .. }) if available == "gperftools, llvm"
    ));
}

#[test]
fn parameterized_extras_follow_the_base_flags() {
    let setup = setup();
    let mut context = context();
    setup
        .instances
        .get("baseline")
        .expect("Always valid")
        .configure(&mut context)
        .expect("Always valid");

    assert_eq!(context.cflags, vec!["-O3", "-flto=thin"]);
    assert_eq!(
        context.ldflags,
        vec!["-flto=thin", "-Wl,--plugin-opt,-fast-isel=false"]
    );
}

#[test]
fn randomized_instance_substitutes_the_seed() {
    let setup = setup();
    let instance = setup.instances.get("r2c").expect("Always valid");

    let mut context = context();
    let error = instance.configure(&mut context).expect_err("Must fail");
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::MissingSeed { instance }) if instance == "r2c"
    ));

    let mut context = self::context();
    context.install_seed(Seed::new(42).expect("Always valid"));
    instance.configure(&mut context).expect("Always valid");
    assert_eq!(context.ldflags, vec!["-Wl,--plugin-opt,-rng-seed=42"]);
    assert_eq!(
        context.benchenv.get("HEAP_BOOBYTRAP_SEED").map(String::as_str),
        Some("42")
    );
}

#[test]
fn target_root_is_resolved() {
    let setup = setup();
    let mut context = context();

    let error = setup
        .targets
        .get("echo-target")
        .expect("Always valid")
        .goto_rootdir(&mut context)
        .expect_err("Must fail");
    assert!(error.to_string().contains("/work/./demo"));
    assert!(setup
        .targets
        .get("echo-target")
        .expect("Always valid")
        .supports_parallel_runs());
    assert!(!setup
        .targets
        .get("spec")
        .expect("Always valid")
        .supports_parallel_runs());
}

#[test]
fn from_path_uses_the_file_directory() {
    let directory = tempfile::tempdir().expect("Always valid");
    let root = directory.path().join("demo");
    std::fs::create_dir_all(root.as_path()).expect("Always valid");
    let path = directory.path().join(Setup::DEFAULT_PATH);
    std::fs::write(
        path.as_path(),
        "targets:\n  - { name: demo, root: demo, build: [make], run: [./run.sh] }\n",
    )
    .expect("Always valid");

    let setup = Setup::from_path(path.as_path()).expect("Always valid");
    let mut context = context();
    setup
        .targets
        .get("demo")
        .expect("Always valid")
        .goto_rootdir(&mut context)
        .expect("Always valid");
    assert_eq!(context.working_directory, Some(root));
}

#[test]
fn unknown_fields_rejected() {
    let result = Setup::from_yaml(
        "instances:\n  - { name: x, optlevel: 3, sanitize: true }\n",
        Path::new("/"),
    );
    assert!(result.is_err());
}

#[test]
fn decorated_instance_needs_a_name() {
    let result = Setup::from_yaml("instances:\n  - { cflags: [-g] }\n", Path::new("/"));
    assert!(result.is_err());
}

#[test]
fn tcmalloc_needs_gperftools() {
    let result = Setup::from_yaml(
        "instances:\n  - { allocator: tcmalloc }\n",
        Path::new("/"),
    );
    assert!(result.is_err());
}

#[test]
fn lto_at_o0_rejected() {
    let result = Setup::from_yaml(
        "instances:\n  - { optlevel: 0, lto: true }\n",
        Path::new("/"),
    );
    assert!(result.is_err());
}

#[test]
fn duplicate_derived_names_rejected() {
    let error = Setup::from_yaml(
        "instances:\n  - { optlevel: 3 }\n  - { optlevel: \"3\" }\n",
        Path::new("/"),
    )
    .expect_err("Must fail");
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::DuplicateInstance { name }) if name == "clang-O3"
    ));
}

#[test]
fn empty_experiment_has_only_llvm() {
    let setup = Setup::from_yaml("{}", Path::new("/")).expect("Always valid");
    assert!(setup.instances.names().is_empty());
    assert!(setup.package("llvm").is_ok());
}
