use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .routegenrc.json"));

    let content = test.read_file(".routegenrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["pagesDir"], "src/pages/seo");
    assert_eq!(parsed["routerSource"], "src/routes/SEORoutes.tsx");
    assert!(parsed["sitemap"]["categories"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".routegenrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".routegenrc.json already exists"));
    assert_eq!(test.read_file(".routegenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_site()?;

    test.command().arg("init").output()?;

    let output = test.all_command().output()?;
    assert!(
        output.status.success(),
        "All command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
