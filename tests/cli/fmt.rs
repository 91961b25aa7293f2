use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CANONICAL, CliTest, stdout};

const UNFORMATTED: &str = r#"[{"code":12,"type":"INVARIANT","messagePattern":"Hello %s"},
{"code":1,"type":"API_INVARIANT","messagePattern":"Invoked createZone() but zones are not enabled.",
 "callers":[{"class":"app::zone","method":"create_zone","file":"src/zone.rs","lineNumber":185}]}]"#;

#[test]
fn test_fmt_formatted_file() -> Result<()> {
    let test = CliTest::with_file("messages.json", CANONICAL)?;

    let output = test.run(&["fmt", "messages.json"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} messages.json is already formatted\n");

    Ok(())
}

#[test]
fn test_fmt_dry_run_leaves_file() -> Result<()> {
    let test = CliTest::with_file("messages.json", UNFORMATTED)?;

    let output = test.run(&["fmt", "messages.json"])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Would reformat messages.json\nRun with --apply to rewrite the file.\n"
    );
    assert_eq!(test.read_file("messages.json")?, UNFORMATTED);

    Ok(())
}

#[test]
fn test_fmt_apply_rewrites_file() -> Result<()> {
    let test = CliTest::with_file("messages.json", UNFORMATTED)?;

    let output = test.run(&["fmt", "messages.json", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Formatted messages.json\n");
    assert_eq!(test.read_file("messages.json")?, CANONICAL);

    let output = test.run(&["check", "messages.json"])?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_fmt_drops_callers_when_not_recorded() -> Result<()> {
    let test = CliTest::with_file(
        ".diagcatrc.json",
        r#"{"key": "Arez", "file": "messages.json", "recordCallers": false}"#,
    )?;
    test.write_file("messages.json", CANONICAL)?;

    let output = test.run(&["fmt", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("messages.json")?,
        r#"[
  {
    "code": 1,
    "type": "API_INVARIANT",
    "messagePattern": "Invoked createZone() but zones are not enabled."
  },
  {
    "code": 12,
    "type": "INVARIANT",
    "messagePattern": "Hello %s"
  }
]
"#
    );

    Ok(())
}
