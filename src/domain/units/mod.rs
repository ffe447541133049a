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

//! Installable units: the concrete named installation steps, each built from
//! the helm adapter, the manifest client, and the readiness poller.

pub mod cert_manager;
pub mod kafka;
pub mod prometheus;
pub mod zookeeper;

pub use cert_manager::CertManagerUnit;
pub use kafka::{KafkaClusterUnit, KafkaOperatorUnit};
pub use prometheus::PrometheusOperatorUnit;
pub use zookeeper::{ZookeeperClusterUnit, ZookeeperOperatorUnit};

use crate::domain::config::{CrdFailurePolicy, InstallConfig};
use crate::infrastructure::helm::HelmCli;
use crate::infrastructure::kubernetes::{ClusterHandle, ManifestClient};
use crate::shared::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Read-only collaborators shared by every unit of one profile operation.
#[derive(Clone)]
pub struct InstallContext {
    pub config: InstallConfig,
    pub handle: Arc<ClusterHandle>,
    pub helm: HelmCli,
    pub manifests: ManifestClient,
}

/// One installable component with symmetric install/uninstall operations.
///
/// `uninstall` receives the target namespace explicitly so it can be driven
/// by a captured status list rather than the unit's default.
#[async_trait]
pub trait InstallableUnit: Send + Sync {
    fn name(&self) -> &'static str;

    /// Namespace the unit installs into by default.
    fn namespace(&self) -> &'static str;

    async fn install(&self) -> Result<()>;

    async fn uninstall(&self, namespace: &str) -> Result<()>;
}

/// Apply a unit's CRD manifest according to the configured policy. Under
/// `Warn`, a rejection is logged and the unit proceeds; a pre-provisioned
/// CRD set still satisfies the prerequisite.
pub(crate) async fn apply_crds(ctx: &InstallContext, unit: &str, manifest: &Path) -> Result<()> {
    match ctx.manifests.apply_files("", &[manifest]).await {
        Ok(()) => Ok(()),
        Err(e) => match ctx.config.crd_failures {
            CrdFailurePolicy::Warn => {
                warn!(unit, error = %e, "CRD apply failed, continuing");
                Ok(())
            }
            CrdFailurePolicy::Propagate => Err(e),
        },
    }
}
