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
    CERT_MANAGER_CHART, CERT_MANAGER_CRDS_MANIFEST, CERT_MANAGER_NAMESPACE, CERT_MANAGER_RELEASE,
};
use crate::shared::error::Result;
use async_trait::async_trait;

/// cert-manager: the certificate authority the kafka-operator's webhook
/// certificates depend on. CRDs are applied first, then the chart.
pub struct CertManagerUnit {
    ctx: InstallContext,
}

impl CertManagerUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for CertManagerUnit {
    fn name(&self) -> &'static str {
        "cert-manager"
    }

    fn namespace(&self) -> &'static str {
        CERT_MANAGER_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        self.ctx.handle.ensure_namespace(self.namespace()).await?;
        let crds = self.ctx.config.manifest_path(CERT_MANAGER_CRDS_MANIFEST);
        apply_crds(&self.ctx, self.name(), &crds).await?;
        self.ctx
            .helm
            .install(
                CERT_MANAGER_RELEASE,
                self.namespace(),
                &self.ctx.config.chart_path(CERT_MANAGER_CHART),
                None,
            )
            .await
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        self.ctx.helm.uninstall(CERT_MANAGER_RELEASE, namespace).await
    }
}
