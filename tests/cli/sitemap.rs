use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_sitemap_writes_categories_and_index() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    let output = test.sitemap_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let tools = test.read_file("public/sitemap-tools.xml")?;
    assert!(tools.contains("<loc>https://example.com/tools/calc</loc>"));
    assert!(tools.contains("<lastmod>2026-10-19</lastmod>"));
    assert!(tools.contains("<changefreq>weekly</changefreq>"));
    assert!(tools.contains("<priority>0.7</priority>"));

    let guides = test.read_file("public/sitemap-guides.xml")?;
    assert!(guides.contains("/guides/legacy"));
    assert!(guides.contains("/guides/pricing"));
    assert!(guides.contains("<changefreq>monthly</changefreq>"));

    let pages = test.read_file("public/sitemap-pages.xml")?;
    assert!(pages.contains("<loc>https://example.com/</loc>"));
    assert!(pages.contains("<priority>1.0</priority>"));

    let index = test.read_file("public/sitemap.xml")?;
    assert!(index.contains("<sitemapindex"));
    assert!(index.contains("<loc>https://example.com/sitemap-compare.xml</loc>"));
    assert!(!test.root().join("public/sitemap-training.xml").exists());
    assert!(!index.contains("sitemap-training.xml"));

    assert!(stdout(&output).contains("Sitemaps: 9 urls in 5 files"));

    Ok(())
}

#[test]
fn test_sitemap_today_flag_overrides_env() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    let output = test
        .sitemap_command()
        .args(["--today", "2027-01-02", "--out", "dist"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let index = test.read_file("dist/sitemap.xml")?;
    assert!(index.contains("<lastmod>2027-01-02</lastmod>"));

    Ok(())
}

#[test]
fn test_sitemap_reports_uncategorized_paths() -> Result<()> {
    let test = CliTest::with_site()?;
    test.write_page("BlogPage", "export const PAGE_PATH = '/blog/launch';\n")?;
    test.scan_command().output()?;

    let output = test.sitemap_command().arg("-v").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("1 path outside every sitemap category"));
    assert!(out.contains("/blog/launch"));

    Ok(())
}

#[test]
fn test_sitemap_is_idempotent() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;

    test.sitemap_command().output()?;
    let first = test.read_file("public/sitemap-tools.xml")?;

    let output = test.sitemap_command().output()?;
    assert!(stdout(&output).contains("(0 changed)"));
    assert_eq!(test.read_file("public/sitemap-tools.xml")?, first);

    Ok(())
}

#[test]
fn test_sitemap_removes_emptied_category() -> Result<()> {
    let test = CliTest::with_site()?;
    test.scan_command().output()?;
    test.sitemap_command().output()?;
    assert!(test.root().join("public/sitemap-compare.xml").exists());

    std::fs::remove_file(test.root().join("src/pages/seo/VsCompetitorPage.tsx"))?;
    test.scan_command().output()?;

    let output = test.sitemap_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(!test.root().join("public/sitemap-compare.xml").exists());
    assert!(!test.read_file("public/sitemap.xml")?.contains("sitemap-compare.xml"));
    assert!(stdout(&output).contains("sitemap-compare.xml  removed (empty)"));

    Ok(())
}
