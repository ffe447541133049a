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
    PROMETHEUS_NAMESPACE, PROMETHEUS_OPERATOR_CHART, PROMETHEUS_OPERATOR_RELEASE,
};
use crate::shared::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// kube-prometheus-stack trimmed down to the operator itself: every bundled
/// sub-component is disabled so only CRDs and the operator deployment land.
pub struct PrometheusOperatorUnit {
    ctx: InstallContext,
}

impl PrometheusOperatorUnit {
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl InstallableUnit for PrometheusOperatorUnit {
    fn name(&self) -> &'static str {
        "prometheus-operator"
    }

    fn namespace(&self) -> &'static str {
        PROMETHEUS_NAMESPACE
    }

    async fn install(&self) -> Result<()> {
        self.ctx
            .helm
            .install(
                PROMETHEUS_OPERATOR_RELEASE,
                self.namespace(),
                &self.ctx.config.chart_path(PROMETHEUS_OPERATOR_CHART),
                Some(&operator_only_values()),
            )
            .await
    }

    async fn uninstall(&self, namespace: &str) -> Result<()> {
        self.ctx
            .helm
            .uninstall(PROMETHEUS_OPERATOR_RELEASE, namespace)
            .await
    }
}

const DISABLED_COMPONENTS: &[&str] = &[
    "defaultRules",
    "alertmanager",
    "grafana",
    "kubeApiServer",
    "kubelet",
    "kubeControllerManager",
    "coreDNS",
    "kubeEtcd",
    "kubeScheduler",
    "kubeProxy",
    "kubeStateMetrics",
    "nodeExporter",
    "prometheus",
];

fn operator_only_values() -> Value {
    let mut values = json!({
        "prometheusOperator": { "createCustomResource": "true" }
    });
    for component in DISABLED_COMPONENTS {
        values[component] = json!({ "enabled": false });
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_disable_every_bundled_component() {
        let values = operator_only_values();
        for component in DISABLED_COMPONENTS {
            assert_eq!(
                values[component]["enabled"],
                Value::Bool(false),
                "{} should be disabled",
                component
            );
        }
    }

    #[test]
    fn values_keep_the_operator_enabled() {
        let values = operator_only_values();
        assert_eq!(
            values["prometheusOperator"]["createCustomResource"],
            Value::String("true".to_string())
        );
        assert!(values["prometheusOperator"].get("enabled").is_none());
    }
}
