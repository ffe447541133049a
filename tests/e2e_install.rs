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

//! Full install/verify/uninstall round trip against a live cluster.
//!
//! Requires a reachable cluster (KUBECONFIG or ~/.kube/config), the helm
//! binary on PATH, and the chart/manifest directories present in the working
//! directory. Run explicitly with `cargo test --test e2e_install -- --ignored`.

use kafka_stack_kube::infrastructure::kubernetes::kafka_cluster::{
    check_brokers, wait_for_kafka_cluster_running,
};
use kafka_stack_kube::{InstallConfig, Installer, Profile};
use std::time::Duration;

const KAFKA_CLUSTER_NAME: &str = "kafka";
const KAFKA_NAMESPACE: &str = "kafka";
const CLUSTER_RUNNING_TIMEOUT: Duration = Duration::from_secs(180);

#[tokio::test]
#[ignore = "needs a live cluster and helm on PATH"]
async fn basic_kafka_round_trip() {
    tracing_subscriber::fmt::try_init().ok();

    let installer = Installer::connect(InstallConfig::default())
        .await
        .expect("cluster connection");

    // Dependencies first, attempting every unit so one flaky chart does not
    // mask the state of the rest.
    let deps = installer
        .install_profile(Profile::BasicDependencies, false)
        .await;
    assert!(
        deps.succeeded(),
        "dependency install failed: {:?}",
        deps.first_failure()
    );

    let kafka = installer.install_profile(Profile::BasicKafka, true).await;
    assert!(
        kafka.succeeded(),
        "kafka install failed: {:?}",
        kafka.first_failure()
    );

    let handle = &installer.context().handle;
    let cluster = wait_for_kafka_cluster_running(
        handle,
        KAFKA_NAMESPACE,
        KAFKA_CLUSTER_NAME,
        CLUSTER_RUNNING_TIMEOUT,
    )
    .await
    .expect("KafkaCluster running");
    assert!(!cluster.spec.brokers.is_empty(), "cluster declares no brokers");
    check_brokers(handle, &cluster).await.expect("broker pods active");

    // Tear down in reverse, kafka profile before its dependencies.
    installer.uninstall(&kafka).await.expect("kafka uninstall");
    installer.uninstall(&deps).await.expect("dependency uninstall");
}
