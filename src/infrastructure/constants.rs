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

use std::time::Duration;

/// Kubeconfig resolution
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const KUBECONFIG_DEFAULT_RELATIVE: &str = ".kube/config";

/// Field manager used for server-side apply
pub const FIELD_MANAGER: &str = "kafka-stack-kube";

/// Chart artifacts, resolved against the configured chart directory
pub const CERT_MANAGER_CHART: &str = "cert-manager-v1.6.2.tgz";
pub const ZOOKEEPER_OPERATOR_CHART: &str = "zookeeper-operator-0.2.14.tgz";
pub const PROMETHEUS_OPERATOR_CHART: &str = "kube-prometheus-stack-45.8.0.tgz";
pub const KAFKA_OPERATOR_CHART_DIR: &str = "kafka-operator";

/// Manifest files, resolved against the configured manifest directory
pub const CERT_MANAGER_CRDS_MANIFEST: &str = "cert-manager.crds.yaml";
pub const ZOOKEEPER_CLUSTER_MANIFEST: &str = "zookeeperCluster.yaml";
pub const KAFKA_OPERATOR_CRDS_MANIFEST: &str = "kafka-operator.crds.yaml";
pub const KAFKA_CLUSTER_MANIFEST: &str = "simplekafkacluster.yaml";

/// Helm release names
pub const CERT_MANAGER_RELEASE: &str = "cert-manager";
pub const ZOOKEEPER_OPERATOR_RELEASE: &str = "zookeeper";
pub const PROMETHEUS_OPERATOR_RELEASE: &str = "prometheus";
pub const KAFKA_OPERATOR_RELEASE: &str = "kafka-operator";

/// Target namespaces
pub const CERT_MANAGER_NAMESPACE: &str = "cert-manager";
pub const ZOOKEEPER_NAMESPACE: &str = "zookeeper";
pub const PROMETHEUS_NAMESPACE: &str = "default";
pub const KAFKA_NAMESPACE: &str = "kafka";

/// Default kafka-operator image, overridable via install configuration
pub const KAFKA_OPERATOR_IMAGE_REPOSITORY: &str = "local/kafka-operator";
pub const KAFKA_OPERATOR_IMAGE_TAG: &str = "ci-test";

/// Label selectors
pub const KAFKA_OPERATOR_SELECTOR: &str = "app.kubernetes.io/name=kafka-operator";
pub const KAFKA_BROKER_APP_LABEL: &str = "app=kafka";
pub const KAFKA_BROKER_ID_LABEL: &str = "brokerId";

/// KafkaCluster custom resource coordinates
pub const KAFKA_CLUSTER_GROUP: &str = "kafka.banzaicloud.io";
pub const KAFKA_CLUSTER_VERSION: &str = "v1beta1";
pub const KAFKA_CLUSTER_KIND: &str = "KafkaCluster";
pub const KAFKA_CLUSTER_NAME: &str = "kafka";
pub const KAFKA_CLUSTER_RUNNING_STATE: &str = "ClusterRunning";

/// Polling budgets and intervals
pub const MIN_WAIT_TIMEOUT: Duration = Duration::from_secs(1);
pub const POD_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const CLUSTER_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const OPERATOR_READY_TIMEOUT: Duration = Duration::from_secs(30);
pub const BROKER_PODS_TIMEOUT: Duration = Duration::from_secs(120);
pub const CLUSTER_RUNNING_TIMEOUT: Duration = Duration::from_secs(180);

/// Fixed settle delay after the operator reports ready; its webhook has no
/// reliable readiness signal yet, so readiness alone is not enough.
pub const WEBHOOK_SETTLE_DELAY: Duration = Duration::from_secs(10);

/// Settle delay after deleting a KafkaCluster before uninstalling the
/// operator that owns its finalizers.
pub const TEARDOWN_SETTLE_DELAY: Duration = Duration::from_secs(30);
