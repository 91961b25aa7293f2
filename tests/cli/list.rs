use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CANONICAL, CliTest, stderr, stdout};

#[test]
fn test_list_messages() -> Result<()> {
    let test = CliTest::with_file("messages.json", CANONICAL)?;

    let output = test.run(&["list", "messages.json", "--key", "Arez"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Arez-0001  API_INVARIANT  Invoked createZone() but zones are not enabled.\n\
         Arez-0012  INVARIANT      Hello %s\n"
    );

    Ok(())
}

#[test]
fn test_list_messages_with_callers() -> Result<()> {
    let test = CliTest::with_file("messages.json", CANONICAL)?;

    let output = test.run(&["list", "messages.json", "--key", "Arez", "-v"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Arez-0001  API_INVARIANT  Invoked createZone() but zones are not enabled.\n      \
         at app::zone::create_zone (src/zone.rs:185)\n\
         Arez-0012  INVARIANT      Hello %s\n"
    );

    Ok(())
}

#[test]
fn test_list_missing_catalogue() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["list", "messages.json"])?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: messages.json does not exist\n");

    Ok(())
}
