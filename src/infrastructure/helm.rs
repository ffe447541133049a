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

//! Chart install/uninstall through the `helm` binary.
//!
//! Value overrides are a nested mapping applied on top of the chart's own
//! defaults; they are piped to helm as a YAML values document on stdin.
//! This adapter never retries; retry policy belongs to the readiness poller.

use crate::shared::error::{InstallError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::info;

#[derive(Clone)]
pub struct HelmCli {
    kubeconfig: PathBuf,
}

impl HelmCli {
    pub fn new(kubeconfig: impl Into<PathBuf>) -> Self {
        Self {
            kubeconfig: kubeconfig.into(),
        }
    }

    /// Install a chart as `release` into `namespace`, with optional value
    /// overrides on top of the chart defaults.
    pub async fn install(
        &self,
        release: &str,
        namespace: &str,
        chart: &Path,
        values: Option<&serde_json::Value>,
    ) -> Result<()> {
        let args = self.install_args(release, namespace, chart, values.is_some());
        let stdin = match values {
            Some(values) => Some(serde_yaml::to_string(values)?),
            None => None,
        };
        self.run("install", release, namespace, &args, stdin).await?;
        info!(release, namespace, "installed helm release");
        Ok(())
    }

    /// Uninstall `release` from `namespace`.
    pub async fn uninstall(&self, release: &str, namespace: &str) -> Result<()> {
        let args = self.uninstall_args(release, namespace);
        self.run("uninstall", release, namespace, &args, None).await?;
        info!(release, namespace, "uninstalled helm release");
        Ok(())
    }

    fn install_args(
        &self,
        release: &str,
        namespace: &str,
        chart: &Path,
        with_values: bool,
    ) -> Vec<String> {
        let mut args = vec![
            "install".to_string(),
            release.to_string(),
            chart.display().to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
            "--kubeconfig".to_string(),
            self.kubeconfig.display().to_string(),
        ];
        if with_values {
            args.push("--values".to_string());
            args.push("-".to_string());
        }
        args
    }

    fn uninstall_args(&self, release: &str, namespace: &str) -> Vec<String> {
        vec![
            "uninstall".to_string(),
            release.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
            "--kubeconfig".to_string(),
            self.kubeconfig.display().to_string(),
        ]
    }

    async fn run(
        &self,
        verb: &'static str,
        release: &str,
        namespace: &str,
        args: &[String],
        stdin: Option<String>,
    ) -> Result<()> {
        let mut command = Command::new("helm");
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| InstallError::helm(verb, release, namespace, e.to_string()))?;
        if let (Some(values), Some(mut handle)) = (stdin, child.stdin.take()) {
            handle
                .write_all(values.as_bytes())
                .await
                .map_err(|e| InstallError::helm(verb, release, namespace, e.to_string()))?;
            // Dropping the handle closes helm's stdin.
        }
        let output = child
            .wait_with_output()
            .await
            .map_err(|e| InstallError::helm(verb, release, namespace, e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(InstallError::helm(verb, release, namespace, stderr));
        }
        Ok(())
    }
}
