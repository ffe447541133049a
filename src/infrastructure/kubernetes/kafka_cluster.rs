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

//! KafkaCluster custom resource access and convergence checks.
//!
//! The resource is fetched through the dynamic API and decoded into the
//! narrow view below; only the fields the checks need are typed.

use crate::infrastructure::constants::{
    BROKER_PODS_TIMEOUT, CLUSTER_POLL_INTERVAL, KAFKA_BROKER_APP_LABEL, KAFKA_BROKER_ID_LABEL,
    KAFKA_CLUSTER_GROUP, KAFKA_CLUSTER_KIND, KAFKA_CLUSTER_RUNNING_STATE, KAFKA_CLUSTER_VERSION,
};
use crate::infrastructure::kubernetes::client::ClusterHandle;
use crate::infrastructure::kubernetes::poll::{wait_for, wait_for_active_pods_all, PollState};
use crate::shared::error::Result;
use kube::api::{ApiResource, DynamicObject};
use kube::core::GroupVersionKind;
use kube::Api;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct KafkaBroker {
    pub id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KafkaClusterSpec {
    pub brokers: Vec<KafkaBroker>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KafkaClusterStatus {
    pub state: Option<String>,
}

/// Decoded view of a KafkaCluster custom resource.
#[derive(Debug, Clone)]
pub struct KafkaCluster {
    pub name: String,
    pub namespace: String,
    pub spec: KafkaClusterSpec,
    pub status: KafkaClusterStatus,
}

impl KafkaCluster {
    pub fn is_running(&self) -> bool {
        self.status.state.as_deref() == Some(KAFKA_CLUSTER_RUNNING_STATE)
    }

    fn from_dynamic(obj: DynamicObject, namespace: &str) -> Result<Self> {
        let name = obj.metadata.name.clone().unwrap_or_default();
        let namespace = obj
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| namespace.to_string());
        let spec = match obj.data.get("spec") {
            Some(spec) => serde_json::from_value(spec.clone())?,
            None => KafkaClusterSpec::default(),
        };
        let status = match obj.data.get("status") {
            Some(status) => serde_json::from_value(status.clone())?,
            None => KafkaClusterStatus::default(),
        };
        Ok(Self {
            name,
            namespace,
            spec,
            status,
        })
    }
}

fn kafka_cluster_resource() -> ApiResource {
    let gvk = GroupVersionKind::gvk(
        KAFKA_CLUSTER_GROUP,
        KAFKA_CLUSTER_VERSION,
        KAFKA_CLUSTER_KIND,
    );
    ApiResource::from_gvk(&gvk)
}

/// Fetch and decode a KafkaCluster.
pub async fn get_kafka_cluster(
    handle: &ClusterHandle,
    namespace: &str,
    name: &str,
) -> Result<KafkaCluster> {
    let ar = kafka_cluster_resource();
    let api: Api<DynamicObject> = Api::namespaced_with(handle.client(), namespace, &ar);
    let obj = api.get(name).await?;
    KafkaCluster::from_dynamic(obj, namespace)
}

/// Poll a KafkaCluster until its status reaches the running state. Fetch
/// failures during the wait are logged and treated as not-yet-ready; the
/// operator recreates the resource's status during rollout.
pub async fn wait_for_kafka_cluster_running(
    handle: &ClusterHandle,
    namespace: &str,
    name: &str,
    timeout: Duration,
) -> Result<KafkaCluster> {
    let what = format!("KafkaCluster '{}/{}' to reach {}", namespace, name, KAFKA_CLUSTER_RUNNING_STATE);
    let cluster = wait_for(&what, timeout, CLUSTER_POLL_INTERVAL, || async move {
        match get_kafka_cluster(handle, namespace, name).await {
            Ok(cluster) if cluster.is_running() => PollState::Ready(cluster),
            Ok(cluster) => PollState::Pending(Some(format!(
                "state is {}",
                cluster.status.state.as_deref().unwrap_or("<unset>")
            ))),
            Err(e) => {
                warn!(error = %e, name, "failed to fetch KafkaCluster, retrying");
                PollState::Pending(None)
            }
        }
    })
    .await?;
    info!(name = %cluster.name, "KafkaCluster reached running state");
    Ok(cluster)
}

/// Wait for every broker declared in the cluster spec to have all its pods
/// active.
pub async fn check_brokers(handle: &ClusterHandle, cluster: &KafkaCluster) -> Result<()> {
    for broker in &cluster.spec.brokers {
        let selector = broker_selector(broker.id);
        let pods = wait_for_active_pods_all(
            handle,
            &cluster.namespace,
            &selector,
            BROKER_PODS_TIMEOUT,
        )
        .await?;
        info!(broker = broker.id, pods = pods.len(), "broker pods active");
    }
    Ok(())
}

fn broker_selector(id: i32) -> String {
    format!("{},{}={}", KAFKA_BROKER_APP_LABEL, KAFKA_BROKER_ID_LABEL, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dynamic_cluster(value: serde_json::Value) -> DynamicObject {
        serde_json::from_value(value).expect("dynamic object")
    }

    #[test]
    fn decodes_spec_and_status() {
        let obj = dynamic_cluster(json!({
            "apiVersion": "kafka.banzaicloud.io/v1beta1",
            "kind": "KafkaCluster",
            "metadata": { "name": "kafka", "namespace": "kafka" },
            "spec": { "brokers": [{ "id": 0 }, { "id": 1 }] },
            "status": { "state": "ClusterRunning" }
        }));
        let cluster = KafkaCluster::from_dynamic(obj, "fallback").expect("decode");
        assert_eq!(cluster.name, "kafka");
        assert_eq!(cluster.namespace, "kafka");
        assert_eq!(cluster.spec.brokers.len(), 2);
        assert!(cluster.is_running());
    }

    #[test]
    fn missing_status_is_not_running() {
        let obj = dynamic_cluster(json!({
            "apiVersion": "kafka.banzaicloud.io/v1beta1",
            "kind": "KafkaCluster",
            "metadata": { "name": "kafka" },
            "spec": { "brokers": [] }
        }));
        let cluster = KafkaCluster::from_dynamic(obj, "kafka").expect("decode");
        assert_eq!(cluster.namespace, "kafka");
        assert!(!cluster.is_running());
        assert!(cluster.status.state.is_none());
    }

    #[test]
    fn reconciling_state_is_not_running() {
        let obj = dynamic_cluster(json!({
            "apiVersion": "kafka.banzaicloud.io/v1beta1",
            "kind": "KafkaCluster",
            "metadata": { "name": "kafka", "namespace": "kafka" },
            "spec": {},
            "status": { "state": "ClusterReconciling" }
        }));
        let cluster = KafkaCluster::from_dynamic(obj, "kafka").expect("decode");
        assert!(!cluster.is_running());
    }

    #[test]
    fn broker_selector_includes_app_and_id() {
        assert_eq!(broker_selector(2), "app=kafka,brokerId=2");
    }
}
