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

use super::{InstallContext, InstallableUnit};
use crate::infrastructure::constants::{
    ZOOKEEPER_CLUSTER_MANIFEST, ZOOKEEPER_NAMESPACE, ZOOKEEPER_OPERATOR_CHART,
    ZOOKEEPER_OPERATOR_RELEASE,
};
use crate::shared::error::Result;
use async_trait::async_trait;

/// The zookeeper-operator chart; its CRDs ship inside the chart.
pub struct ZookeeperOperatorUnit {
    ctx: InstallContext,
}

impl ZookeeperOperatorUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for ZookeeperOperatorUnit {
    fn name(&self) -> &'static str {
        "zookeeper-operator"
    }

    fn namespace(&self) -> &'static str {
        ZOOKEEPER_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        self.ctx.handle.ensure_namespace(self.namespace()).await?;
        self.ctx
            .helm
            .install(
                ZOOKEEPER_OPERATOR_RELEASE,
                self.namespace(),
                &self.ctx.config.chart_path(ZOOKEEPER_OPERATOR_CHART),
                None,
            )
            .await
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        self.ctx
            .helm
            .uninstall(ZOOKEEPER_OPERATOR_RELEASE, namespace)
            .await
    }
}

/// A ZookeeperCluster custom resource applied from a fixed manifest.
pub struct ZookeeperClusterUnit {
    ctx: InstallContext,
}

impl ZookeeperClusterUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for ZookeeperClusterUnit {
    fn name(&self) -> &'static str {
        "ZookeeperCluster"
    }

    fn namespace(&self) -> &'static str {
        ZOOKEEPER_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        let manifest = self.ctx.config.manifest_path(ZOOKEEPER_CLUSTER_MANIFEST);
        self.ctx
            .manifests
            .apply_files(self.namespace(), &[&manifest])
            .await
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        let manifest = self.ctx.config.manifest_path(ZOOKEEPER_CLUSTER_MANIFEST);
        self.ctx.manifests.delete_files(namespace, &[&manifest]).await
    }
}
