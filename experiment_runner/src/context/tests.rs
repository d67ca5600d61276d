//!
//! The context tests.
//!

#![cfg(test)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::arguments::Arguments;
use super::parallel_mode::ParallelMode;
use super::paths::Paths;
use super::seed::Seed;
use super::Context;

fn populated() -> Context {
    let arguments = Arguments {
        target: Some("echo-target".to_owned()),
        targets: vec!["echo-target".to_owned()],
        packages: vec!["llvm".to_owned()],
        instances: vec!["demo".to_owned(), "r2c".to_owned()],
        iterations: 3,
        jobs: 4,
        dry_run: true,
        deps_only: true,
        clean: true,
        relink: true,
        parallel: Some(ParallelMode::Ssh),
        parallel_max: 2,
        ssh_nodes: vec!["node1".to_owned()],
    };

    let mut context = Context::new(Paths::new(PathBuf::from("/tmp/root"), None), arguments);
    context.cflags.push("-O3".to_owned());
    context.cxxflags.push("-O3".to_owned());
    context.ldflags.push("-flto".to_owned());
    context.lib_ldflags.push("-flto".to_owned());
    context
        .benchenv
        .insert("HEAP_BOOBYTRAP_SEED".to_owned(), "RNGSEED".to_owned());
    context
        .runenv
        .insert("LD_LIBRARY_PATH".to_owned(), "/opt/lib".to_owned());
    context.prepend_runenv_path("PATH", "/opt/llvm/bin");
    context.install_seed(Seed::new(1234).expect("Always valid"));
    context.working_directory = Some(PathBuf::from("/tmp/root/demo"));
    context
}

#[test]
fn snapshot_copies_every_field() {
    let context = populated();
    let snapshot = context.snapshot();
    assert_eq!(snapshot, context);

    // Adding a field to the context without covering it here fails to compile.
    let Context {
        paths,
        cc,
        cxx,
        ar,
        nm,
        ranlib,
        cflags,
        cxxflags,
        ldflags,
        lib_ldflags,
        benchenv,
        runenv,
        runenv_paths,
        seed,
        unique_id,
        working_directory,
        args,
    } = snapshot;
    assert_eq!(paths, context.paths);
    assert_eq!(
        (cc, cxx, ar, nm, ranlib),
        (
            context.cc.clone(),
            context.cxx.clone(),
            context.ar.clone(),
            context.nm.clone(),
            context.ranlib.clone()
        )
    );
    assert_eq!(cflags, context.cflags);
    assert_eq!(cxxflags, context.cxxflags);
    assert_eq!(ldflags, context.ldflags);
    assert_eq!(lib_ldflags, context.lib_ldflags);
    assert_eq!(benchenv, context.benchenv);
    assert_eq!(runenv, context.runenv);
    assert_eq!(runenv_paths, context.runenv_paths);
    assert_eq!(seed, context.seed);
    assert_eq!(unique_id, context.unique_id);
    assert_eq!(working_directory, context.working_directory);
    assert_eq!(args, context.args);
}

#[test]
fn snapshot_is_independent() {
    let original = populated();
    let mut context = original.snapshot();
    context.cflags.push("-g".to_owned());
    context.benchenv.insert("EXTRA".to_owned(), "1".to_owned());
    context.args.instances.push("other".to_owned());
    context.seed = None;

    assert_ne!(context, original);
    assert_eq!(original.cflags, vec!["-O3".to_owned()]);
    assert_eq!(original.args.instances.len(), 2);

    context.restore(original.clone());
    assert_eq!(context, original);
}

#[test]
fn restore_arguments_keeps_seed() {
    let original = populated();
    let mut context = original.snapshot();
    context.install_seed(Seed::new(99).expect("Always valid"));
    context.args.scope_to_single_build("echo-target", "demo");

    context.restore_arguments(&original);
    assert_eq!(context.args, original.args);
    assert_eq!(context.unique_id.as_deref(), Some("99"));
}

#[test]
fn install_seed_sets_run_identifier() {
    let mut context = Context::new(
        Paths::new(PathBuf::from("/tmp"), None),
        Arguments::default(),
    );
    context.install_seed(Seed::new(0xFFFFFF).expect("Always valid"));
    assert_eq!(context.seed.map(|seed| seed.value()), Some(0xFFFFFF));
    assert_eq!(context.unique_id.as_deref(), Some("16777215"));
}

#[test]
fn scope_to_single_build() {
    let mut arguments = populated().args;
    arguments.scope_to_single_build("echo-target", "demo");

    assert!(!arguments.dry_run);
    assert!(!arguments.deps_only);
    assert!(!arguments.clean);
    assert!(!arguments.relink);
    assert_eq!(arguments.targets, vec!["echo-target".to_owned()]);
    assert!(arguments.packages.is_empty());
    assert_eq!(arguments.instances, vec!["demo".to_owned()]);
    assert_eq!(arguments.iterations, 1);
    assert_eq!(arguments.parallel, Some(ParallelMode::Ssh));
    assert_eq!(arguments.ssh_nodes, vec!["node1".to_owned()]);
}

#[test]
fn disable_remote_dispatch() {
    let mut arguments = populated().args;
    assert!(arguments.is_remote());
    arguments.disable_remote_dispatch();
    assert!(!arguments.is_remote());
    assert_eq!(arguments.parallel, None);
    assert!(arguments.ssh_nodes.is_empty());
}

#[test]
fn prepend_runenv_path_is_idempotent() {
    let mut context = populated();
    context.prepend_runenv_path("LD_LIBRARY_PATH", "/opt/tcmalloc/lib");
    context.prepend_runenv_path("LD_LIBRARY_PATH", "/opt/tcmalloc/lib");
    context.prepend_runenv_path("LD_LIBRARY_PATH", "/opt/gperftools/lib");
    assert_eq!(
        context.runenv_paths.get("LD_LIBRARY_PATH"),
        Some(&vec!["/opt/gperftools/lib".to_owned(), "/opt/tcmalloc/lib".to_owned()])
    );
    assert_eq!(
        context.runenv.get("LD_LIBRARY_PATH").map(String::as_str),
        Some("/opt/lib")
    );
}

#[test]
fn build_directory_is_per_run() {
    let mut context = populated();
    assert_eq!(
        context.build_directory("echo-target", "demo"),
        PathBuf::from("/tmp/root/build/targets/echo-target/demo/1234")
    );

    context.install_seed(Seed::new(99).expect("Always valid"));
    assert_eq!(
        context.build_directory("echo-target", "demo"),
        PathBuf::from("/tmp/root/build/targets/echo-target/demo/99")
    );

    context.unique_id = None;
    assert_eq!(
        context.build_directory("echo-target", "demo"),
        PathBuf::from("/tmp/root/build/targets/echo-target/demo")
    );
}

#[test]
fn build_environment_joins_flags() {
    let context = populated();
    let environment = context.build_environment();
    assert_eq!(environment.get("CFLAGS").map(String::as_str), Some("-O3"));
    assert_eq!(environment.get("LDFLAGS").map(String::as_str), Some("-flto"));
    assert_eq!(environment.get("CC").map(String::as_str), Some("cc"));
    assert_eq!(environment.get("JOBS").map(String::as_str), Some("4"));
    assert_eq!(environment.get("MAKEFLAGS").map(String::as_str), Some("-j4"));
    assert!(!environment.contains_key("PATH"));
    assert_eq!(
        environment.get("LD_LIBRARY_PATH").map(String::as_str),
        Some("/opt/lib")
    );
}

#[test]
fn run_environment_carries_run_identifier() {
    let context = populated();
    let environment = context.run_environment();
    let expected: BTreeMap<String, String> = [
        ("HEAP_BOOBYTRAP_SEED", "RNGSEED"),
        ("LD_LIBRARY_PATH", "/opt/lib"),
        ("RUN_ID", "1234"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();
    assert_eq!(environment, expected);
}
