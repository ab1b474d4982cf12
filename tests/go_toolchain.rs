//! End-to-end runs through a real `go` binary. Skipped when none is on PATH.

use std::process::Command;

use goeval::{Config, eval};

fn go_available() -> bool {
    Command::new("go")
        .arg("version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Each test writes its own program file so the tests can run in parallel.
fn config(test: &str) -> Config {
    Config {
        temp_dir: Some(std::env::temp_dir()),
        file_name: format!("goeval_it_{test}_{}.go", std::process::id()),
        ..Config::default()
    }
}

#[test]
fn test_bare_expression() {
    if !go_available() {
        eprintln!("go not found; skipping");
        return;
    }
    let outcome = eval("println(200*300)", &config("bare"));
    assert_eq!(outcome.error, "");
    assert_eq!(outcome.output, "60000\n");
}

#[test]
fn test_print_alias() {
    if !go_available() {
        eprintln!("go not found; skipping");
        return;
    }
    let outcome = eval("p \"hi\"", &config("alias"));
    assert_eq!(outcome.error, "");
    assert_eq!(outcome.output, "hi\n");
}

#[test]
fn test_type_block_and_inferred_import() {
    if !go_available() {
        eprintln!("go not found; skipping");
        return;
    }
    let code = "type Point struct {\n\tx, y int\n}\npt := Point{1, 2}\np pt\nt pt\nfmt.Println(strings.ToUpper(\"done\"))\n";
    let outcome = eval(code, &config("types"));

    assert_eq!(outcome.error, "");
    assert_eq!(outcome.output, "{x:1 y:2}\nmain.Point\nDONE\n");
}

#[test]
fn test_explicit_import_is_repaired() {
    if !go_available() {
        eprintln!("go not found; skipping");
        return;
    }
    let code = "import \"fmt\"\nfmt.Println(\"x\")\n";
    let outcome = eval(code, &config("repair"));

    assert_eq!(outcome.error, "");
    assert_eq!(outcome.output, "x\n");
}

#[test]
fn test_errors_point_at_user_lines() {
    if !go_available() {
        eprintln!("go not found; skipping");
        return;
    }
    let code = "x := 1\np x\ny := undefinedThing\n";
    let outcome = eval(code, &config("lines"));

    assert_eq!(outcome.output, "");
    assert!(
        outcome
            .error
            .lines()
            .any(|l| l.starts_with("3:") && l.contains("undefined")),
        "got {:?}",
        outcome.error
    );
}
