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

use super::{apply_crds, InstallContext, InstallableUnit};
use crate::infrastructure::constants::{
    KAFKA_CLUSTER_MANIFEST, KAFKA_NAMESPACE, KAFKA_OPERATOR_CHART_DIR,
    KAFKA_OPERATOR_CRDS_MANIFEST, KAFKA_OPERATOR_RELEASE, KAFKA_OPERATOR_SELECTOR,
    OPERATOR_READY_TIMEOUT, TEARDOWN_SETTLE_DELAY, WEBHOOK_SETTLE_DELAY,
};
use crate::infrastructure::kubernetes::poll::wait_for_active_pods_any;
use crate::shared::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// The kafka-operator: CRDs, then the chart, then a readiness wait. The
/// KafkaCluster unit that follows cannot be admitted until the operator's
/// webhook is serving, so install blocks until an operator pod is active and
/// then sits out a fixed settle delay.
pub struct KafkaOperatorUnit {
    ctx: InstallContext,
}

impl KafkaOperatorUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for KafkaOperatorUnit {
    fn name(&self) -> &'static str {
        "kafka-operator"
    }

    fn namespace(&self) -> &'static str {
        KAFKA_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        self.ctx.handle.ensure_namespace(self.namespace()).await?;
        let crds = self.ctx.config.manifest_path(KAFKA_OPERATOR_CRDS_MANIFEST);
        apply_crds(&self.ctx, self.name(), &crds).await?;
        self.ctx
            .helm
            .install(
                KAFKA_OPERATOR_RELEASE,
                self.namespace(),
                &self.ctx.config.chart_path(KAFKA_OPERATOR_CHART_DIR),
                Some(&operator_image_values(
                    &self.ctx.config.operator_image_repository,
                    &self.ctx.config.operator_image_tag,
                )),
            )
            .await?;

        wait_for_active_pods_any(
            &self.ctx.handle,
            self.namespace(),
            KAFKA_OPERATOR_SELECTOR,
            OPERATOR_READY_TIMEOUT,
        )
        .await?;
        // The webhook has no readiness signal of its own yet; an active
        // operator pod does not mean the webhook is serving.
        debug!(delay = ?WEBHOOK_SETTLE_DELAY, "operator active, waiting for webhook to settle");
        tokio::time::sleep(WEBHOOK_SETTLE_DELAY).await;
        Ok(())
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        self.ctx
            .helm
            .uninstall(KAFKA_OPERATOR_RELEASE, namespace)
            .await
    }
}

fn operator_image_values(repository: &str, tag: &str) -> Value {
    json!({
        "operator": { "image": { "repository": repository, "tag": tag } }
    })
}

/// A KafkaCluster custom resource applied from a fixed manifest.
pub struct KafkaClusterUnit {
    ctx: InstallContext,
}

impl KafkaClusterUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for KafkaClusterUnit {
    fn name(&self) -> &'static str {
        "KafkaCluster"
    }

    fn namespace(&self) -> &'static str {
        KAFKA_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        let manifest = self.ctx.config.manifest_path(KAFKA_CLUSTER_MANIFEST);
        self.ctx
            .manifests
            .apply_files(self.namespace(), &[&manifest])
            .await
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        let manifest = self.ctx.config.manifest_path(KAFKA_CLUSTER_MANIFEST);
        self.ctx.manifests.delete_files(namespace, &[&manifest]).await?;
        // Give the operator time to run the cluster's finalizers before it
        // is uninstalled itself.
        debug!(delay = ?TEARDOWN_SETTLE_DELAY, "KafkaCluster deleted, letting finalizers run");
        tokio::time::sleep(TEARDOWN_SETTLE_DELAY).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_values_override_repository_and_tag() {
        let values = operator_image_values("registry.example.com/kafka-operator", "pr-42");
        assert_eq!(
            values["operator"]["image"]["repository"],
            Value::String("registry.example.com/kafka-operator".to_string())
        );
        assert_eq!(
            values["operator"]["image"]["tag"],
            Value::String("pr-42".to_string())
        );
    }
}
