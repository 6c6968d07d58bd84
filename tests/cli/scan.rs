use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_scan_writes_registry() -> Result<()> {
    let test = CliTest::with_site()?;

    let output = test.scan_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file(".routegen/routes.txt")?,
        "VsCompetitorPage|/compare/us-vs-them\n\
         LegacyGuidePage|/guides/legacy\n\
         PricingGuidePage|/guides/pricing\n\
         CalculatorPage|/tools/calc\n"
    );

    let out = stdout(&output);
    assert!(out.contains("Scanned 4 page files"));
    assert!(out.contains("unknown: DraftPage"));
    assert!(out.contains("Router inventory: 1 lazy route"));
    assert!(out.contains("Registry: 4 routes (3 from page files, 1 from router, 0 duplicates resolved)"));

    Ok(())
}

#[test]
fn test_scan_resolves_duplicates_by_source_size() -> Result<()> {
    let test = CliTest::with_site()?;
    test.write_page(
        "CalcPage",
        "export const PAGE_PATH = '/tools/calc';\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let registry = test.read_file(".routegen/routes.txt")?;
    assert!(registry.contains("CalculatorPage|/tools/calc\n"));
    assert!(!registry.contains("CalcPage"));

    let out = stdout(&output);
    assert!(out.contains("duplicate: \"/tools/calc\""));
    assert!(out.contains("CalcPage"));
    assert!(out.contains("smaller source"));

    Ok(())
}

#[test]
fn test_scan_json() -> Result<()> {
    let test = CliTest::with_site()?;

    let output = test.scan_command().arg("--json").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["filesScanned"], 4);
    assert_eq!(json["byStrategy"]["page-constant"], 1);
    assert_eq!(json["byStrategy"]["template-prop"], 1);
    assert_eq!(json["byStrategy"]["breadcrumb-list"], 1);
    assert_eq!(json["unknown"][0], "DraftPage");
    assert_eq!(json["inventoryEntries"], 1);

    Ok(())
}

#[test]
fn test_scan_rejects_delimiter_in_path() -> Result<()> {
    let test = CliTest::with_site()?;
    test.write_page("PipePage", "export const PAGE_PATH = '/tools/a|b';\n")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let registry = test.read_file(".routegen/routes.txt")?;
    assert!(!registry.contains("PipePage"));
    assert!(registry.contains("CalculatorPage|/tools/calc\n"));
    assert!(stdout(&output).contains("1 record rejected"));

    Ok(())
}

#[test]
fn test_scan_missing_pages_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/routes/SEORoutes.tsx", crate::ROUTER)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Page directory does not exist"));

    Ok(())
}

#[test]
fn test_scan_pages_dir_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/routes/SEORoutes.tsx", crate::ROUTER)?;
    test.write_file(
        "app/pages/ToolsPage.tsx",
        "export const PAGE_PATH = \"/tools/all\";\n",
    )?;

    let output = test
        .scan_command()
        .args(["--pages-dir", "app/pages"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.read_file(".routegen/routes.txt")?.contains("ToolsPage|/tools/all\n"));

    Ok(())
}
