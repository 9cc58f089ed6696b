// Mon Oct 19 2026 - Alex

use classgen::engine::{EngineError, GenerationReport};
use classgen::output::OutputError;
use classgen::structure::StructureError;
use classgen::{ClassModel, Config, Driver};
use std::fs;
use std::path::Path;
use std::process::Command;

const USER_MODEL: &str = r#"{
  "classes": [
    { "name": "Object" },
    { "name": "User", "base": "Object",
      "fields": [{ "name": "age", "type": "int" }],
      "constructor": [{ "name": "age", "type": "int" }, { "name": "a", "type": "int" }],
      "methods": [{ "name": "get_age", "returns": "int", "body": { "return_field": "age" } }] }
  ],
  "main": [
    { "new": { "var": "u", "class": "User", "args": [10, 1] } },
    { "print": { "field": { "var": "u", "field": "age" } } },
    { "let": { "var": "age", "type": "int", "value": { "call": { "var": "u", "method": "get_age" } } } },
    { "print": { "var": "age" } },
    { "delete": "u" },
    { "return": 0 }
  ]
}"#;

const ANIMAL_MODEL: &str = r#"{
  "classes": [
    { "name": "Animal",
      "fields": [{ "name": "legs", "type": "int" }],
      "methods": [
        { "name": "speak", "virtual": true, "returns": "int",
          "params": [{ "name": "volume", "type": "int" }],
          "body": { "return_value": 1 } },
        { "name": "legs_count", "returns": "int", "body": { "return_field": "legs" } }
      ] },
    { "name": "Dog", "base": "Animal",
      "fields": [{ "name": "age", "type": "int" }],
      "methods": [
        { "name": "speak", "virtual": true, "returns": "int",
          "params": [{ "name": "volume", "type": "int" }],
          "body": { "return_field": "age" } }
      ] },
    { "name": "Cat", "base": "Animal" }
  ],
  "main": [
    { "new": { "var": "d", "class": "Dog", "args": [4, 7] } },
    { "new": { "var": "c", "class": "Cat", "args": [3] } },
    { "print": { "call": { "var": "d", "method": "speak", "args": [3] } } },
    { "print": { "call": { "var": "c", "method": "speak", "args": [3] } } },
    { "print": { "call": { "var": "d", "method": "legs_count" } } },
    { "call": { "var": "c", "method": "set_legs", "args": [5] } },
    { "print": { "call": { "var": "c", "method": "get_legs" } } },
    { "delete": "d" },
    { "delete": "c" }
  ]
}"#;

fn generate_report(model: &str) -> GenerationReport {
    let model = ClassModel::from_json(model).unwrap();
    let config = Config::default().with_layout_asserts(cfg!(target_pointer_width = "64"));
    Driver::new(config).generate(&model)
}

fn generate(model: &str) -> String {
    let report = generate_report(model);
    for failure in report.failures() {
        eprintln!("{}", failure);
    }
    assert!(report.is_complete());
    report.source
}

fn compiler_available() -> bool {
    Command::new("cc")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Compiles and runs `source`, returning its stdout, or `None` when there is
/// no C compiler on the PATH.
fn compile_and_run(source: &str, dir: &Path) -> Option<String> {
    if !compiler_available() {
        eprintln!("cc not found; checking generated text only");
        return None;
    }
    let c_path = dir.join("program.c");
    let bin_path = dir.join("program");
    fs::write(&c_path, source).unwrap();

    let compile = Command::new("cc")
        .arg("-std=c11")
        .arg("-o")
        .arg(&bin_path)
        .arg(&c_path)
        .output()
        .unwrap();
    assert!(
        compile.status.success(),
        "cc failed:\n{}\n{}",
        String::from_utf8_lossy(&compile.stderr),
        source
    );

    let run = Command::new(&bin_path).output().unwrap();
    assert!(run.status.success());
    Some(String::from_utf8(run.stdout).unwrap())
}

/// Compiles `source` to an object file. Returns `false` when there is no C
/// compiler on the PATH.
fn compiles(source: &str, dir: &Path) -> bool {
    if !compiler_available() {
        eprintln!("cc not found; checking generated text only");
        return false;
    }
    let c_path = dir.join("partial.c");
    fs::write(&c_path, source).unwrap();
    let compile = Command::new("cc")
        .args(["-std=c11", "-c", "-o"])
        .arg(dir.join("partial.o"))
        .arg(&c_path)
        .output()
        .unwrap();
    assert!(
        compile.status.success(),
        "cc failed:\n{}\n{}",
        String::from_utf8_lossy(&compile.stderr),
        source
    );
    true
}

#[test]
fn user_program_prints_age_twice() {
    let source = generate(USER_MODEL);

    assert!(source.contains("struct User {\n    vfn_t* vtable;\n    // Fields of User\n    int age;\n};"));
    assert!(source.contains("User* create_User(int age, int a)"));
    assert!(source.contains("fprintf(stderr, \"Memory allocation failed for User\\n\");"));
    assert!(source.contains("int User_get_age(User* self);"));
    assert!(source.contains("printf(\"%d\\n\", u->age);"));
    assert!(source.contains("int age = User_get_age(u);"));

    let dir = tempfile::tempdir().unwrap();
    if let Some(stdout) = compile_and_run(&source, dir.path()) {
        assert_eq!(stdout, "10\n10\n");
    }
}

#[test]
fn virtual_calls_dispatch_to_overrides() {
    let source = generate(ANIMAL_MODEL);

    assert!(source.contains("obj->vtable[0] = (vfn_t)Dog_speak_impl;"));
    assert!(source.contains("obj->vtable[0] = (vfn_t)Animal_speak_impl;"));
    assert!(source.contains("int Cat_legs_count(Cat* self)"));

    let dir = tempfile::tempdir().unwrap();
    if let Some(stdout) = compile_and_run(&source, dir.path()) {
        assert_eq!(stdout, "7\n1\n4\n5\n");
    }
}

#[test]
fn generation_is_deterministic() {
    let first = generate(ANIMAL_MODEL);
    let second = generate(ANIMAL_MODEL);
    assert_eq!(first, second);

    let model = ClassModel::from_json(ANIMAL_MODEL).unwrap();
    let parallel = Driver::new(Config::default().with_parallel(true).with_max_threads(2)).generate(&model);
    let sequential = Driver::new(Config::default()).generate(&model);
    assert_eq!(parallel.source, sequential.source);
}

#[test]
fn cycle_fails_only_its_members() {
    let model = ClassModel::from_json(
        r#"{ "classes": [
            { "name": "A", "base": "B" },
            { "name": "B", "base": "A" },
            { "name": "Standalone", "fields": [{ "name": "x", "type": "int" }] }
        ] }"#,
    )
    .unwrap();
    let report = Driver::new(Config::default()).generate(&model);

    assert!(!report.is_complete());
    assert_eq!(report.failure_count(), 2);
    assert!(report.failures().all(|f| matches!(
        f.error,
        EngineError::Structure(StructureError::CyclicInheritance { .. })
    )));
    assert!(report.source.contains("struct Standalone {"));
    assert!(!report.source.contains("struct A {"));
}

#[test]
fn duplicate_inherited_field_fails_subtree() {
    let model = ClassModel::from_json(
        r#"{ "classes": [
            { "name": "Base", "fields": [{ "name": "id", "type": "int" }] },
            { "name": "Child", "base": "Base", "fields": [{ "name": "id", "type": "i64" }] },
            { "name": "GrandChild", "base": "Child" },
            { "name": "Sibling", "base": "Base" }
        ] }"#,
    )
    .unwrap();
    let plan = Driver::new(Config::default()).plan(&model);

    assert!(matches!(
        plan.failure_for("Child").map(|f| &f.error),
        Some(EngineError::Structure(StructureError::DuplicateField { declared_in, .. })) if declared_in == "Base"
    ));
    assert!(plan.failure_for("GrandChild").unwrap().error.is_base_failure());
    assert_eq!(plan.layouts.keys().collect::<Vec<_>>(), vec!["Base", "Sibling"]);
}

#[test]
fn cli_writes_output_and_rejects_failures() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("user.json");
    let out_path = dir.path().join("out").join("user.c");
    fs::write(&model_path, USER_MODEL).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_classgen"))
        .args(["--quiet", "generate", "-i"])
        .arg(&model_path)
        .arg("-o")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(fs::read_to_string(&out_path).unwrap().contains("struct User {"));

    let broken_path = dir.path().join("broken.json");
    fs::write(&broken_path, r#"{ "classes": [{ "name": "Lonely", "base": "Nobody" }] }"#).unwrap();
    let broken_out = dir.path().join("broken.c");
    let status = Command::new(env!("CARGO_BIN_EXE_classgen"))
        .args(["--quiet", "generate", "-i"])
        .arg(&broken_path)
        .arg("-o")
        .arg(&broken_out)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!broken_out.exists());

    let status = Command::new(env!("CARGO_BIN_EXE_classgen"))
        .args(["--quiet", "generate", "--allow-partial", "-i"])
        .arg(&broken_path)
        .arg("-o")
        .arg(&broken_out)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(broken_out.exists());
}

#[test]
fn upcast_instance_dispatches_to_override() {
    let source = generate(
        r#"{
  "classes": [
    { "name": "Animal",
      "methods": [{ "name": "speak", "virtual": true, "returns": "int",
                    "params": [{ "name": "volume", "type": "int" }], "body": { "return_value": 1 } }] },
    { "name": "Dog", "base": "Animal",
      "fields": [{ "name": "age", "type": "int" }],
      "methods": [{ "name": "speak", "virtual": true, "returns": "int",
                    "params": [{ "name": "volume", "type": "int" }], "body": { "return_field": "age" } }] }
  ],
  "main": [
    { "new": { "var": "pet", "class": "Dog", "args": [9] } },
    { "let": { "var": "animal", "type": "Animal", "value": { "var": "pet" } } },
    { "print": { "call": { "var": "animal", "method": "speak", "args": [1] } } },
    { "delete": "pet" }
  ]
}"#,
    );
    assert!(source.contains("Animal* animal = (Animal*)pet;"));
    assert!(source.contains("printf(\"%d\\n\", Animal_speak(animal, 1));"));

    let dir = tempfile::tempdir().unwrap();
    if let Some(stdout) = compile_and_run(&source, dir.path()) {
        assert_eq!(stdout, "9\n");
    }
}

#[test]
fn implementation_name_clash_is_rejected() {
    let report = generate_report(
        r#"{ "classes": [
            { "name": "A", "methods": [
                { "name": "m", "virtual": true, "returns": "int", "body": { "return_value": 1 } },
                { "name": "m_impl", "returns": "int", "body": { "return_value": 2 } }
            ] },
            { "name": "B", "methods": [{ "name": "m", "virtual": true, "returns": "int" }] }
        ] }"#,
    );
    assert!(matches!(
        report.plan.failure_for("A").map(|f| &f.error),
        Some(EngineError::Structure(StructureError::NameClash { .. }))
    ));
    assert!(report.source.contains("int B_m_impl(B* self)"));

    let dir = tempfile::tempdir().unwrap();
    compiles(&report.source, dir.path());
}

#[test]
fn library_names_are_rejected() {
    let report = generate_report(
        r#"{ "classes": [
            { "name": "Box", "fields": [{ "name": "exit", "type": "int" }] },
            { "name": "size_t" },
            { "name": "Crate", "fields": [{ "name": "items", "type": "int" }] }
        ] }"#,
    );
    for class in ["Box", "size_t"] {
        assert!(matches!(
            report.plan.failure_for(class).map(|f| &f.error),
            Some(EngineError::Structure(StructureError::ReservedName { .. }))
        ));
    }
    assert_eq!(report.generated_classes().collect::<Vec<_>>(), vec!["Crate"]);

    let dir = tempfile::tempdir().unwrap();
    compiles(&report.source, dir.path());
}

#[test]
fn partial_output_declares_failed_classes_it_references() {
    let report = generate_report(
        r#"{ "classes": [
            { "name": "Bad", "fields": [{ "name": "x", "type": "int" }, { "name": "x", "type": "int" }] },
            { "name": "Holder",
              "fields": [{ "name": "held", "type": "Bad" }],
              "methods": [{ "name": "swap", "returns": "Bad",
                            "params": [{ "name": "other", "type": "Bad" }],
                            "body": { "return_field": "held" } }] }
        ] }"#,
    );
    assert_eq!(report.failure_count(), 1);
    assert!(report.plan.failure_for("Bad").is_some());
    assert!(report.source.contains("typedef struct Bad Bad;"));
    assert!(!report.source.contains("struct Bad {"));
    assert!(report.source.contains("Holder* create_Holder(Bad* held)"));

    let dir = tempfile::tempdir().unwrap();
    compiles(&report.source, dir.path());
}

#[test]
fn entry_program_names_and_types_are_checked() {
    let bad_name = generate_report(
        r#"{ "classes": [{ "name": "Object" }],
            "main": [{ "new": { "var": "printf", "class": "Object" } }] }"#,
    );
    assert!(matches!(
        bad_name.main_failure.as_ref().map(|f| &f.error),
        Some(EngineError::Program(OutputError::InvalidName(_)))
    ));

    let void_let = generate_report(
        r#"{ "classes": [{ "name": "Object" }],
            "main": [{ "let": { "var": "x", "type": "void", "value": 1 } }] }"#,
    );
    assert!(matches!(
        void_let.main_failure.as_ref().map(|f| &f.error),
        Some(EngineError::Program(OutputError::VoidVariable(_)))
    ));
    assert!(!void_let.source.contains("int main(void)"));

    let dir = tempfile::tempdir().unwrap();
    compiles(&bad_name.source, dir.path());
    compiles(&void_let.source, dir.path());
}
