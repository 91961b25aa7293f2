use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CANONICAL, CliTest, stderr, stdout};

#[test]
fn test_canonical_catalogue() -> Result<()> {
    let test = CliTest::with_file("messages.json", CANONICAL)?;

    let output = test.run(&["check", "messages.json", "--key", "Arez"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Checked 2 messages in messages.json\n");

    Ok(())
}

#[test]
fn test_duplicate_codes() -> Result<()> {
    let test = CliTest::with_file(
        "messages.json",
        r#"[{"code":3,"type":"FAIL","messagePattern":"A"},{"code":3,"type":"FAIL","messagePattern":"B"}]"#,
    )?;

    let output = test.run(&["check", "messages.json"])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "error: Failed to load diagnostic messages file messages.json as it is incorrectly \
         formatted with duplicate entries for code 3\n  --> messages.json\n\
         \u{2718} 1 error, 0 warnings\n"
    );

    Ok(())
}

#[test]
fn test_unformatted_catalogue_is_a_warning() -> Result<()> {
    let test = CliTest::with_file(
        "messages.json",
        r#"[{"code":1,"type":"FAIL","messagePattern":"A","callers":[]}]"#,
    )?;

    let output = test.run(&["check", "messages.json"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "warning: file is not in canonical format (run `diagcat fmt --apply`)\n  --> messages.json\n\
         \u{2718} 0 errors, 1 warning\n"
    );

    Ok(())
}

#[test]
fn test_missing_catalogue() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check", "messages.json"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("error: Failed to read messages.json: "));

    Ok(())
}

#[test]
fn test_catalogue_from_config() -> Result<()> {
    let test = CliTest::with_file(
        ".diagcatrc.json",
        r#"{"key": "Arez", "file": "catalogue/messages.json"}"#,
    )?;
    test.write_file("catalogue/messages.json", CANONICAL)?;

    let output = test.run(&["check"])?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Checked 2 messages in"));
    assert!(stdout(&output).contains("messages.json"));

    Ok(())
}

#[test]
fn test_invalid_key() -> Result<()> {
    let test = CliTest::with_file("messages.json", CANONICAL)?;

    let output = test.run(&["check", "messages.json", "--key", "A B"])?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: Invalid 'key': \"A B\" must not contain whitespace\n"
    );

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check", "--help"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Validate a diagnostic message catalogue"));
    assert!(stdout(&output).contains("--key <KEY>"));

    Ok(())
}
