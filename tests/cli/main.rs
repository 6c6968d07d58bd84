use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod all;
mod init;
mod routes;
mod scan;
mod sitemap;

const BIN_NAME: &str = "routegen";

pub const TODAY: &str = "2026-10-19";

pub const ROUTER: &str = r#"import { lazy } from 'react';
import { Route } from 'react-router-dom';
import { LazyRoute } from '@/components/LazyRoute';

const LegacyGuidePage = lazy(() => import('@/pages/seo/LegacyGuidePage'));

export function SEORoutes() {
  return (
    <>
      <Route path="/guides/legacy" element={<LazyRoute><LegacyGuidePage /></LazyRoute>} />
      <Route path="/pricing" element={<Pricing />} />
    </>
  );
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with the default router and one page per path convention.
    pub fn with_site() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("src/routes/SEORoutes.tsx", ROUTER)?;
        test.write_page(
            "CalculatorPage",
            "export const PAGE_PATH = '/tools/calc';\n\nexport default function CalculatorPage() {\n  return <ToolPage pagePath={PAGE_PATH} />;\n}\n",
        )?;
        test.write_page(
            "PricingGuidePage",
            "export default function PricingGuidePage() {\n  return <GuideTemplate pagePath=\"/guides/pricing\" title=\"Pricing\" />;\n}\n",
        )?;
        test.write_page(
            "VsCompetitorPage",
            "const breadcrumbs = [\n  { name: 'Home', href: '/' },\n  { name: 'Compare', href: '/compare' },\n  { name: 'Us vs Them', href: '/compare/us-vs-them' },\n];\n",
        )?;
        test.write_page(
            "DraftPage",
            "export default function DraftPage() {\n  return <div>Coming soon</div>;\n}\n",
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn write_page(&self, identifier: &str, content: &str) -> Result<()> {
        self.write_file(&format!("src/pages/seo/{}.tsx", identifier), content)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for stable assertions
        cmd.env("ROUTEGEN_TODAY", TODAY);
        cmd
    }

    pub fn scan_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("scan");
        cmd
    }

    pub fn routes_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("routes");
        cmd
    }

    pub fn sitemap_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sitemap");
        cmd
    }

    pub fn all_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("all");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
