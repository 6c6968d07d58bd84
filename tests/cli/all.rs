use anyhow::Result;

use crate::{CliTest, stderr};

#[test]
fn test_all_runs_every_stage() -> Result<()> {
    let test = CliTest::with_site()?;

    let output = test.all_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.root().join(".routegen/routes.txt").exists());
    assert!(test.root().join("src/routes/GeneratedRoutes.tsx").exists());
    assert!(test.root().join("public/sitemap.xml").exists());

    Ok(())
}

#[test]
fn test_all_uses_config_file() -> Result<()> {
    let test = CliTest::with_site()?;
    test.write_file(
        ".routegenrc.json",
        r#"{
  "routeModule": { "output": "src/routes/Extra.tsx", "functionName": "getExtraRoutes" },
  "sitemap": { "siteUrl": "https://tools.example.org/", "outputDir": "static" }
}"#,
    )?;

    let output = test.all_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let module = test.read_file("src/routes/Extra.tsx")?;
    assert!(module.contains("export function getExtraRoutes() {"));

    let tools = test.read_file("static/sitemap-tools.xml")?;
    assert!(tools.contains("<loc>https://tools.example.org/tools/calc</loc>"));

    Ok(())
}
