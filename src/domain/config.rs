// Copyright 2025 Kafka Stack Kube Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Install configuration: a pure value object. Client construction happens
//! separately in `Installer::connect`, so resolution timing and failure are
//! visible at the call site.

use crate::infrastructure::constants::{
    KAFKA_OPERATOR_IMAGE_REPOSITORY, KAFKA_OPERATOR_IMAGE_TAG,
};
use crate::shared::error::Result;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// What to do when applying a unit's CRD manifest fails.
///
/// The default tolerates rejection so a pre-provisioned CRD set can satisfy
/// the prerequisite; some CRD manifests exceed the admission annotation size
/// limit on strict clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrdFailurePolicy {
    /// Log a warning and continue with the unit's main install step.
    #[default]
    Warn,
    /// Fail the unit.
    Propagate,
}

/// Value object passed into every unit operation; units never mutate it.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Directory holding chart archives and chart directories.
    pub chart_dir: PathBuf,
    /// Directory holding manifest files.
    pub manifest_dir: PathBuf,
    /// Explicit kubeconfig override; `KUBECONFIG` and `~/.kube/config`
    /// apply otherwise.
    pub kubeconfig: Option<PathBuf>,
    pub crd_failures: CrdFailurePolicy,
    /// kafka-operator image override, for installing a locally built image.
    pub operator_image_repository: String,
    pub operator_image_tag: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            chart_dir: PathBuf::from("charts"),
            manifest_dir: PathBuf::from("manifests"),
            kubeconfig: None,
            crd_failures: CrdFailurePolicy::default(),
            operator_image_repository: KAFKA_OPERATOR_IMAGE_REPOSITORY.to_string(),
            operator_image_tag: KAFKA_OPERATOR_IMAGE_TAG.to_string(),
        }
    }
}

impl InstallConfig {
    pub fn chart_path(&self, chart: &str) -> PathBuf {
        self.chart_dir.join(chart)
    }

    pub fn manifest_path(&self, manifest: &str) -> PathBuf {
        self.manifest_dir.join(manifest)
    }
}

/// Optional TOML file counterpart of [`InstallConfig`]; command-line flags
/// take precedence over file values, file values over defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InstallFileConfig {
    pub chart_dir: Option<PathBuf>,
    pub manifest_dir: Option<PathBuf>,
    pub kubeconfig: Option<PathBuf>,
    pub crd_failures: Option<CrdFailurePolicy>,
    pub operator_image: Option<OperatorImageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OperatorImageConfig {
    pub repository: Option<String>,
    pub tag: Option<String>,
}

impl InstallFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Fill in defaults for everything the file left unset.
    pub fn into_config(self) -> InstallConfig {
        let defaults = InstallConfig::default();
        let image = self.operator_image.unwrap_or_default();
        InstallConfig {
            chart_dir: self.chart_dir.unwrap_or(defaults.chart_dir),
            manifest_dir: self.manifest_dir.unwrap_or(defaults.manifest_dir),
            kubeconfig: self.kubeconfig,
            crd_failures: self.crd_failures.unwrap_or_default(),
            operator_image_repository: image
                .repository
                .unwrap_or(defaults.operator_image_repository),
            operator_image_tag: image.tag.unwrap_or(defaults.operator_image_tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults() {
        let toml = r#"
chart-dir = "/opt/charts"
crd-failures = "propagate"

[operator-image]
repository = "registry.example.com/kafka-operator"
"#;
        let file: InstallFileConfig = toml::from_str(toml).expect("parse");
        let config = file.into_config();
        assert_eq!(config.chart_dir, PathBuf::from("/opt/charts"));
        assert_eq!(config.manifest_dir, PathBuf::from("manifests"));
        assert_eq!(config.crd_failures, CrdFailurePolicy::Propagate);
        assert_eq!(
            config.operator_image_repository,
            "registry.example.com/kafka-operator"
        );
        assert_eq!(config.operator_image_tag, KAFKA_OPERATOR_IMAGE_TAG);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file: InstallFileConfig = toml::from_str("").expect("parse");
        let config = file.into_config();
        assert_eq!(config.chart_dir, PathBuf::from("charts"));
        assert_eq!(config.crd_failures, CrdFailurePolicy::Warn);
        assert!(config.kubeconfig.is_none());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "manifest-dir = \"samples\"").expect("write");
        let loaded = InstallFileConfig::load(file.path()).expect("load");
        assert_eq!(loaded.manifest_dir, Some(PathBuf::from("samples")));
    }

    #[test]
    fn chart_and_manifest_paths_join_directories() {
        let config = InstallConfig::default();
        assert_eq!(
            config.chart_path("cert-manager-v1.6.2.tgz"),
            PathBuf::from("charts/cert-manager-v1.6.2.tgz")
        );
        assert_eq!(
            config.manifest_path("zookeeperCluster.yaml"),
            PathBuf::from("manifests/zookeeperCluster.yaml")
        );
    }
}
