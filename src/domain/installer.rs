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

//! Profile orchestrator: sequential unit execution with fail-fast-or-continue
//! on install and continue-on-error on uninstall.

use crate::domain::config::InstallConfig;
use crate::domain::profile::Profile;
use crate::domain::status::{InstallStatus, PackageInstallStatus};
use crate::domain::units::{InstallContext, InstallableUnit};
use crate::infrastructure::helm::HelmCli;
use crate::infrastructure::kubernetes::{ClusterHandle, ManifestClient};
use crate::shared::error::{InstallError, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Drives one target cluster. Construction is two-phase: `connect` resolves
/// the cluster handle up front, so connection failure is visible before any
/// unit runs and the handle is passed explicitly from then on.
pub struct Installer {
    ctx: InstallContext,
}

impl Installer {
    /// Resolve the cluster handle for `config` and build the shared unit
    /// collaborators. Fails with [`InstallError::Connection`] without side
    /// effects if the cluster is unreachable or the kubeconfig is bad.
    pub async fn connect(config: InstallConfig) -> Result<Self> {
        let handle = Arc::new(ClusterHandle::resolve(config.kubeconfig.as_deref()).await?);
        let helm = HelmCli::new(handle.kubeconfig_path());
        let manifests = ManifestClient::new(handle.client());
        Ok(Self {
            ctx: InstallContext {
                config,
                handle,
                helm,
                manifests,
            },
        })
    }

    pub fn context(&self) -> &InstallContext {
        &self.ctx
    }

    /// Install every unit of `profile` in order.
    ///
    /// Under `fail_on_error` the sequence halts at the first failing unit and
    /// the returned status list ends with that unit's entry; otherwise all
    /// units are attempted. Individual unit failures live only in the
    /// per-unit entries, never as a top-level error.
    pub async fn install_profile(&self, profile: Profile, fail_on_error: bool) -> InstallStatus {
        info!(profile = %profile, fail_on_error, "installing profile");
        let units = profile.units(&self.ctx);
        let packages = run_install_sequence(&units, fail_on_error).await;
        InstallStatus {
            profile,
            fail_on_error,
            packages,
        }
    }

    /// Tear down everything a previous install attempted, in reverse install
    /// order. Every unit is attempted even when earlier ones fail, so a
    /// single stuck resource does not block the rest of the cleanup; the
    /// last error observed is returned after all attempts.
    pub async fn uninstall(&self, status: &InstallStatus) -> Result<()> {
        info!(profile = %status.profile, "uninstalling profile");
        let units = status.profile.units(&self.ctx);
        run_uninstall_sequence(&units, status).await
    }
}

/// Execute units in order, recording one status entry per attempted unit.
pub async fn run_install_sequence(
    units: &[Box<dyn InstallableUnit>],
    fail_on_error: bool,
) -> Vec<PackageInstallStatus> {
    let mut packages = Vec::with_capacity(units.len());
    for unit in units {
        info!(unit = unit.name(), namespace = unit.namespace(), "installing unit");
        let entry = match unit.install().await {
            Ok(()) => PackageInstallStatus::succeeded(unit.name(), unit.namespace()),
            Err(e) => {
                error!(unit = unit.name(), error = %e, "unit install failed");
                PackageInstallStatus::failed(unit.name(), unit.namespace(), e)
            }
        };
        let failed = !entry.is_ok();
        packages.push(entry);
        if failed && fail_on_error {
            warn!(unit = unit.name(), "halting on first failure");
            break;
        }
    }
    packages
}

/// Uninstall units in reverse install order, continue-on-error. Namespaces
/// come from the captured status entries when present, so the status list
/// alone is sufficient to drive cleanup.
pub async fn run_uninstall_sequence(
    units: &[Box<dyn InstallableUnit>],
    status: &InstallStatus,
) -> Result<()> {
    let mut last_error: Option<InstallError> = None;
    for unit in units.iter().rev() {
        let namespace = status
            .namespace_for(unit.name())
            .unwrap_or_else(|| unit.namespace())
            .to_string();
        info!(unit = unit.name(), namespace = %namespace, "uninstalling unit");
        if let Err(e) = unit.uninstall(&namespace).await {
            error!(unit = unit.name(), error = %e, "unit uninstall failed, continuing");
            last_error = Some(e);
        }
    }
    match last_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
