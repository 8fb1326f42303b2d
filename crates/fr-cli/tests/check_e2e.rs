use std::path::PathBuf;

use fr_cli::cmd_check::{check_file, format_diag, summary};
use fr_cli::cmd_order::type_order;
use fr_config::CheckConfig;
use fr_lang::{CheckMode, Options};

const GEOMETRY: &str = include_str!("../../fr-lang/tests/fixtures/geometry.json");
const BROKEN: &str = include_str!("../../fr-lang/tests/fixtures/broken.json");

fn write_model(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn clean_model_passes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "geometry.json", GEOMETRY);

    let report = check_file(&path, Options::default()).unwrap();
    assert!(!report.failed(true));
    assert_eq!(summary(&report.diagnostics), "No issues found.");
}

#[test]
fn broken_model_fails_with_every_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "broken.json", BROKEN);

    let report = check_file(&path, Options::default()).unwrap();
    assert!(report.failed(false));
    assert_eq!(summary(&report.diagnostics), "3 error(s), 0 warning(s)");

    let lines: Vec<_> = report
        .diagnostics
        .iter()
        .map(|d| format_diag(&report.model, d, false))
        .collect();
    assert_eq!(
        lines[0],
        "error[cyclic-dependency]: type 'A' is part of a self-referential or cyclic type dependency \
         (at typeCollection Shapes / struct A)"
    );
    assert!(lines[2].ends_with("(at interface Pen / method lift)"));
}

#[test]
fn colored_output_keeps_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "broken.json", BROKEN);
    let report = check_file(&path, Options::default()).unwrap();
    let line = format_diag(&report.model, &report.diagnostics.as_slice()[0], true);
    assert!(line.starts_with("\x1b[1;31merror\x1b[0m[cyclic-dependency]"));
    assert!(line.contains("type 'A' is part of"));
}

#[test]
fn warnings_fail_only_when_denied() {
    // Move the contract in front of the types so they trail it.
    let json = GEOMETRY.replace(
        r#""contract": {"#,
        r#""contract": { "span": { "start": 10, "end": 20 },"#,
    );
    let json = json.replace(
        r#""name": "Point","#,
        r#""name": "Point", "span": { "start": 30, "end": 40 },"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "late.json", &json);

    let report = check_file(&path, Options::default()).unwrap();
    assert_eq!(summary(&report.diagnostics), "0 error(s), 1 warning(s)");
    assert!(!report.failed(false));
    assert!(report.failed(true));

    let quiet = Options {
        element_order: false,
        ..Options::default()
    };
    assert!(check_file(&path, quiet).unwrap().diagnostics.is_empty());
}

#[test]
fn config_file_drives_options() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("franca-check.toml");
    std::fs::write(
        &config_path,
        "[validation]\nmode = \"fast\"\nelement_order = false\n",
    )
    .unwrap();
    let config = CheckConfig::load(&config_path).unwrap();
    let options = Options::from(config.validation);
    assert_eq!(options.mode, CheckMode::Fast);
    assert!(!options.element_order);
}

#[test]
fn order_lists_dependencies_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "geometry.json", GEOMETRY);
    assert_eq!(type_order(&path).unwrap(), vec!["I1.Point", "I1.Segment"]);
}

#[test]
fn order_fails_on_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, "broken.json", BROKEN);
    let err = type_order(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cyclic type dependency among 2 type(s): Shapes.A, Shapes.B"
    );
}

#[test]
fn unreadable_model_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = check_file(&dir.path().join("missing.json"), Options::default()).unwrap_err();
    assert!(err.to_string().contains("failed to read model snapshot"), "got: {err}");
}
