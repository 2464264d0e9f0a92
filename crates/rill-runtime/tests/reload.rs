// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! End-to-end import and live-reload scenarios driven through a
//! [`Session`], the way the REPL host drives one.

use rill_runtime::{ModuleResolver, RuntimeError, SearchPath, Session};
use rill_script::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn session_in(dir: &Path) -> Session {
    Session::new(ModuleResolver::new(
        dir.to_path_buf(),
        SearchPath::default(),
    ))
}

#[test]
fn import_then_call() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("math.rl"),
        "fn add(a, b) { return a + b; }\nlet pi = 3.14;\n",
    )
    .unwrap();

    let mut session = session_in(dir.path());
    session.eval("import math;").unwrap();

    assert_eq!(session.eval("math.add(1, 2);").unwrap(), Value::Number(3.0));
    assert_eq!(session.eval("math.pi;").unwrap(), Value::Number(3.14));
}

#[test]
fn edit_reload_same_handle_new_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("math.rl");
    fs::write(&path, "fn combine(a, b) { return a + b; }").unwrap();

    let mut session = session_in(dir.path());
    session.eval("import math;").unwrap();
    let handle = session.registry().get("math").unwrap().namespace;
    assert_eq!(
        session.eval("math.combine(1, 2);").unwrap(),
        Value::Number(3.0)
    );

    fs::write(&path, "fn combine(a, b) { return a * b; }").unwrap();
    let report = session.check_and_reload_all();
    assert_eq!(report.reloaded, vec!["math".to_string()]);
    assert!(!report.has_errors());

    // Same namespace object, new definition visible through it.
    let after = session.registry().get("math").unwrap().namespace;
    assert!(Arc::ptr_eq(&handle, &after));
    assert_eq!(
        session.eval("math.combine(1, 2);").unwrap(),
        Value::Number(2.0)
    );
}

#[test]
fn held_function_value_sees_reloaded_globals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.rl");
    fs::write(&path, "let limit = 10;\nfn current() { return limit; }").unwrap();

    let mut session = session_in(dir.path());
    session.eval("import cfg;").unwrap();
    // Hold the function value in an interactive binding across the reload.
    session.eval("let probe = cfg.current;").unwrap();
    assert_eq!(session.eval("probe();").unwrap(), Value::Number(10.0));

    fs::write(&path, "let limit = 99;\nfn current() { return limit; }").unwrap();
    let report = session.check_and_reload_all();
    assert_eq!(report.reloaded, vec!["cfg".to_string()]);

    // The held value is the old function object, but it resolves its
    // free names through the module namespace at call time.
    assert_eq!(session.eval("probe();").unwrap(), Value::Number(99.0));
}

#[test]
fn broken_edit_keeps_old_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("math.rl");
    fs::write(&path, "fn add(a, b) { return a + b; }").unwrap();

    let mut session = session_in(dir.path());
    session.eval("import math;").unwrap();

    fs::write(&path, "fn add(a, b) { return a + ; }").unwrap();
    let report = session.check_and_reload_all();
    assert!(report.reloaded.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].0, "math");
    assert!(matches!(report.errors[0].1, RuntimeError::Load { .. }));

    // The module keeps working with its last good definitions.
    assert_eq!(session.eval("math.add(1, 2);").unwrap(), Value::Number(3.0));

    // Once the file is fixed the next sweep picks it up.
    fs::write(&path, "fn add(a, b) { return a * b; }").unwrap();
    let report = session.check_and_reload_all();
    assert_eq!(report.reloaded, vec!["math".to_string()]);
    assert_eq!(session.eval("math.add(2, 3);").unwrap(), Value::Number(6.0));
}

#[test]
fn missing_module_leaves_session_usable() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    let err = session.eval("import nothing_here;").unwrap_err();
    assert!(matches!(err, RuntimeError::ModuleNotFound(_)));
    assert!(session.registry().is_empty());

    assert_eq!(session.eval("1 + 1;").unwrap(), Value::Number(2.0));
}

#[test]
fn unchanged_modules_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.rl"), "let x = 1;").unwrap();
    fs::write(dir.path().join("b.rl"), "let y = 2;").unwrap();

    let mut session = session_in(dir.path());
    session.eval("import a; import b;").unwrap();

    let report = session.check_and_reload_all();
    assert!(report.is_empty());
}

#[test]
fn search_path_order_decides_which_module_loads() {
    let base = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(first.path().join("util.rl"), "let origin = \"first\";").unwrap();
    fs::write(second.path().join("util.rl"), "let origin = \"second\";").unwrap();

    let search = SearchPath::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    let mut session = Session::new(ModuleResolver::new(base.path().to_path_buf(), search));

    session.eval("import util;").unwrap();
    assert_eq!(
        session.eval("util.origin;").unwrap(),
        Value::String("first".to_string())
    );
}

#[test]
fn modules_importing_modules() {
    // A reload of a dependency is visible through the dependent module,
    // because the dependent holds the same namespace handle.
    let dir = tempfile::tempdir().unwrap();
    let dep = dir.path().join("dep.rl");
    fs::write(&dep, "let base = 5;").unwrap();

    let mut session = session_in(dir.path());
    session.eval("import dep;").unwrap();
    session
        .eval("fn doubled() { return dep.base * 2; }")
        .unwrap();
    assert_eq!(session.eval("doubled();").unwrap(), Value::Number(10.0));

    fs::write(&dep, "let base = 7;").unwrap();
    session.check_and_reload_all();
    assert_eq!(session.eval("doubled();").unwrap(), Value::Number(14.0));
}
