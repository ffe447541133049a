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

//! Install, uninstall, and status subcommands.

use crate::cli::display::TableRenderer;
use crate::domain::config::{CrdFailurePolicy, InstallConfig, InstallFileConfig};
use crate::domain::installer::Installer;
use crate::domain::profile::Profile;
use crate::domain::status::InstallStatus;
use crate::infrastructure::constants::{
    CLUSTER_RUNNING_TIMEOUT, KAFKA_CLUSTER_NAME, KAFKA_NAMESPACE,
};
use crate::infrastructure::kubernetes::kafka_cluster::{
    check_brokers, wait_for_kafka_cluster_running,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by install and uninstall. All flags are optional so an
/// explicitly passed value always overrides the config file, even when it
/// matches the built-in default.
#[derive(Parser, Debug, Clone)]
pub struct CommonOpts {
    /// Directory holding chart archives [default: charts]
    #[arg(long)]
    pub chart_dir: Option<PathBuf>,

    /// Directory holding manifest files [default: manifests]
    #[arg(long)]
    pub manifest_dir: Option<PathBuf>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Path to an install configuration file (TOML)
    /// Command-line flags take precedence over file values
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// What to do when applying a unit's CRD manifest fails [default: warn]
    #[arg(long, value_enum)]
    pub crd_failures: Option<CrdFailurePolicy>,
}

impl CommonOpts {
    /// Merge flags over the optional config file over defaults.
    pub fn resolve_config(&self) -> anyhow::Result<InstallConfig> {
        let mut config = match &self.config_file {
            Some(path) => InstallFileConfig::load(path)?.into_config(),
            None => InstallConfig::default(),
        };
        if let Some(chart_dir) = &self.chart_dir {
            config.chart_dir = chart_dir.clone();
        }
        if let Some(manifest_dir) = &self.manifest_dir {
            config.manifest_dir = manifest_dir.clone();
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            config.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(crd_failures) = self.crd_failures {
            config.crd_failures = crd_failures;
        }
        Ok(config)
    }
}

#[derive(Parser, Debug)]
pub struct InstallCommand {
    /// Profile to install
    #[arg(value_enum)]
    pub profile: Profile,

    #[command(flatten)]
    pub common: CommonOpts,

    /// Halt the sequence at the first failing unit
    #[arg(long)]
    pub fail_fast: bool,

    /// Skip the basic-dependencies prerequisite when installing basic-kafka
    #[arg(long)]
    pub skip_prereqs: bool,

    /// kafka-operator image repository override
    #[arg(long)]
    pub operator_image_repository: Option<String>,

    /// kafka-operator image tag override
    #[arg(long)]
    pub operator_image_tag: Option<String>,
}

impl InstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let mut config = self.common.resolve_config()?;
        if let Some(repository) = &self.operator_image_repository {
            config.operator_image_repository = repository.clone();
        }
        if let Some(tag) = &self.operator_image_tag {
            config.operator_image_tag = tag.clone();
        }

        let installer = Installer::connect(config).await?;
        let renderer = TableRenderer::new();
        let mut failed = false;

        // basic-kafka assumes its dependency stack is present; install it
        // first unless explicitly skipped. Dependencies run continue-on-error
        // so a pre-provisioned component does not halt the sequence.
        if self.profile == Profile::BasicKafka && !self.skip_prereqs {
            let status = installer
                .install_profile(Profile::BasicDependencies, false)
                .await;
            println!("{}", renderer.render_install_status(&status));
            failed |= !status.succeeded();
        }

        let status = installer.install_profile(self.profile, self.fail_fast).await;
        println!("{}", renderer.render_install_status(&status));
        failed |= !status.succeeded();

        if failed {
            anyhow::bail!("one or more units failed to install; see the status table above");
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct UninstallCommand {
    /// Profile to uninstall
    #[arg(value_enum)]
    pub profile: Profile,

    #[command(flatten)]
    pub common: CommonOpts,

    /// Leave the basic-dependencies stack in place when uninstalling basic-kafka
    #[arg(long)]
    pub skip_prereqs: bool,
}

impl UninstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = self.common.resolve_config()?;
        let installer = Installer::connect(config).await?;

        installer
            .uninstall(&InstallStatus::for_profile(self.profile))
            .await?;

        if self.profile == Profile::BasicKafka && !self.skip_prereqs {
            installer
                .uninstall(&InstallStatus::for_profile(Profile::BasicDependencies))
                .await?;
        }
        println!("Uninstalled profile {}", self.profile);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct StatusCommand {
    /// KafkaCluster name
    #[arg(long, short = 'c', default_value = KAFKA_CLUSTER_NAME)]
    pub cluster: String,

    /// Kubernetes namespace
    #[arg(long, short = 'n', default_value = KAFKA_NAMESPACE)]
    pub namespace: String,

    /// Seconds to wait for the cluster to reach its running state
    #[arg(long, default_value_t = CLUSTER_RUNNING_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Path to kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,
}

impl StatusCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = InstallConfig {
            kubeconfig: self.kubeconfig.clone(),
            ..Default::default()
        };
        let installer = Installer::connect(config).await?;
        let handle = &installer.context().handle;

        let cluster = wait_for_kafka_cluster_running(
            handle,
            &self.namespace,
            &self.cluster,
            Duration::from_secs(self.timeout),
        )
        .await?;
        println!(
            "KafkaCluster {}/{} is {}",
            cluster.namespace,
            cluster.name,
            cluster.status.state.as_deref().unwrap_or("<unset>")
        );

        check_brokers(handle, &cluster).await?;
        println!("All {} broker(s) have active pods", cluster.spec.brokers.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{}", contents).expect("write");
        file
    }

    #[test]
    fn flags_override_file_even_when_they_match_the_defaults() {
        let file = config_file("chart-dir = \"/opt/charts\"\ncrd-failures = \"propagate\"\n");
        let opts = CommonOpts::parse_from([
            "test",
            "--config-file",
            file.path().to_str().unwrap(),
            "--chart-dir",
            "charts",
            "--crd-failures",
            "warn",
        ]);
        let config = opts.resolve_config().expect("resolve");
        assert_eq!(config.chart_dir, PathBuf::from("charts"));
        assert_eq!(config.crd_failures, CrdFailurePolicy::Warn);
    }

    #[test]
    fn file_values_apply_when_flags_are_absent() {
        let file = config_file("manifest-dir = \"samples\"\ncrd-failures = \"propagate\"\n");
        let opts = CommonOpts::parse_from([
            "test",
            "--config-file",
            file.path().to_str().unwrap(),
        ]);
        let config = opts.resolve_config().expect("resolve");
        assert_eq!(config.manifest_dir, PathBuf::from("samples"));
        assert_eq!(config.crd_failures, CrdFailurePolicy::Propagate);
        assert_eq!(config.chart_dir, PathBuf::from("charts"));
    }

    #[test]
    fn no_flags_and_no_file_yields_defaults() {
        let opts = CommonOpts::parse_from(["test"]);
        let config = opts.resolve_config().expect("resolve");
        assert_eq!(config.chart_dir, PathBuf::from("charts"));
        assert_eq!(config.manifest_dir, PathBuf::from("manifests"));
        assert_eq!(config.crd_failures, CrdFailurePolicy::Warn);
        assert!(config.kubeconfig.is_none());
    }
}
