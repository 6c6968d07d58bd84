use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_routes_skips_declared_paths() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    let output = test.routes_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let module = test.read_file("src/routes/GeneratedRoutes.tsx")?;
    assert!(module.contains("// 3 routes"));
    assert!(module.contains("const CalculatorPage = lazy(() => import('@/pages/seo/CalculatorPage'));"));
    assert!(module.contains("path=\"/compare/us-vs-them\""));
    assert!(module.contains("export function getGeneratedRoutes() {"));
    assert!(!module.contains("LegacyGuidePage"));

    assert!(stdout(&output).contains("(written)"));

    Ok(())
}

#[test]
fn test_routes_is_idempotent() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    test.routes_command().output()?;
    let first = test.read_file("src/routes/GeneratedRoutes.tsx")?;

    let output = test.routes_command().output()?;
    assert!(stdout(&output).contains("(unchanged)"));
    assert_eq!(test.read_file("src/routes/GeneratedRoutes.tsx")?, first);

    Ok(())
}

#[test]
fn test_routes_stdout() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    let output = test.routes_command().arg("--stdout").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(stdout(&output).starts_with("import { lazy } from 'react';\n"));
    assert!(!test.root().join("src/routes/GeneratedRoutes.tsx").exists());

    Ok(())
}

#[test]
fn test_routes_extra_existing_list() -> Result<()> {
    let test = CliTest::with_site()?;
    test.write_file("wired.txt", "# already live\n/tools/calc\n\n")?;
    test.scan_command().output()?;

    let output = test
        .routes_command()
        .args(["--existing", "wired.txt", "--stdout"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let module = stdout(&output);
    assert!(module.contains("// 2 routes"));
    assert!(!module.contains("CalculatorPage"));

    Ok(())
}

#[test]
fn test_routes_without_registry() -> Result<()> {
    let test = CliTest::with_site()?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("run `routegen scan` first"));

    Ok(())
}
