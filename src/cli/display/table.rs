//! Table rendering for CLI output

use super::StatusIcon;
use crate::domain::status::InstallStatus;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
#[derive(Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render an install run as a per-unit table, headed by the profile name.
    pub fn render_install_status(&self, status: &InstallStatus) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("UNIT").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Left),
            ]);

        for package in &status.packages {
            let (icon, text, color) = match &package.error {
                None => (StatusIcon::SUCCESS, "installed".to_string(), Color::Green),
                Some(error) => (StatusIcon::ERROR, error.clone(), Color::Red),
            };
            table.add_row(vec![
                Cell::new(&package.name),
                Cell::new(&package.namespace),
                Cell::new(format!("{} {}", icon, text)).fg(color),
            ]);
        }

        let headline = if status.succeeded() {
            format!("Profile {} installed", status.profile).green()
        } else {
            format!("Profile {} finished with failures", status.profile).red()
        };
        format!("{}\n{}", headline, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Profile;
    use crate::domain::status::PackageInstallStatus;

    #[test]
    fn renders_one_row_per_unit() {
        let status = InstallStatus {
            profile: Profile::BasicDependencies,
            fail_on_error: false,
            packages: vec![
                PackageInstallStatus::succeeded("cert-manager", "cert-manager"),
                PackageInstallStatus::failed("zookeeper-operator", "zookeeper", "boom"),
            ],
        };
        let rendered = TableRenderer::new().render_install_status(&status);
        assert!(rendered.contains("cert-manager"));
        assert!(rendered.contains("zookeeper-operator"));
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("failures"));
    }
}
