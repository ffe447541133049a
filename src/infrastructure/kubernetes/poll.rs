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

//! Bounded-time polling against live cluster state.
//!
//! The predicate is evaluated against a fresh fetch on every tick, never a
//! cache. The wait is an ordinary future built on `tokio::time`, so a caller
//! can cancel it early by dropping it or racing it in a `select!`.

use crate::infrastructure::constants::{MIN_WAIT_TIMEOUT, POD_POLL_INTERVAL};
use crate::infrastructure::kubernetes::client::ClusterHandle;
use crate::shared::error::{InstallError, Result};
use k8s_openapi::api::core::v1::Pod;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// One observation of the polled state.
pub enum PollState<T> {
    /// The predicate holds; the wait finishes with this value.
    Ready(T),
    /// Not yet; an optional human-readable description of what was seen is
    /// kept and reported if the deadline elapses.
    Pending(Option<String>),
}

/// Retry `poll` on a fixed interval until it reports ready or `timeout`
/// elapses. Timeouts below one second are raised to one second; shorter
/// budgets are indistinguishable from immediate failure given network
/// latency. The predicate is always evaluated at least once.
pub async fn wait_for<T, F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut poll: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollState<T>>,
{
    let timeout = timeout.max(MIN_WAIT_TIMEOUT);
    let start = tokio::time::Instant::now();
    let mut last_observed = None;
    loop {
        match poll().await {
            PollState::Ready(value) => return Ok(value),
            PollState::Pending(observed) => {
                if observed.is_some() {
                    last_observed = observed;
                }
            }
        }
        if start.elapsed() >= timeout {
            return Err(InstallError::timeout(what, timeout, last_observed));
        }
        tokio::time::sleep(interval).await;
    }
}

/// A pod is active when its phase is Running and no readiness condition that
/// is present reports false. Absent conditions are tolerated; some clusters
/// omit them transiently.
pub fn is_pod_active(pod: &Pod) -> bool {
    let Some(status) = pod.status.as_ref() else {
        return false;
    };
    if status.phase.as_deref() != Some("Running") {
        return false;
    }
    for condition in status.conditions.as_deref().unwrap_or_default() {
        if (condition.type_ == "ContainersReady" || condition.type_ == "Ready")
            && condition.status != "True"
        {
            return false;
        }
    }
    true
}

/// Any-active predicate. An empty set never succeeds.
pub fn any_pod_active(pods: &[Pod]) -> bool {
    pods.iter().any(is_pod_active)
}

/// All-active predicate. An empty set is not-yet-ready, not vacuously true;
/// success before any pod has been scheduled would be a false positive.
pub fn all_pods_active(pods: &[Pod]) -> bool {
    !pods.is_empty() && pods.iter().all(is_pod_active)
}

fn describe_pods(pods: &[Pod]) -> String {
    let active = pods.iter().filter(|p| is_pod_active(p)).count();
    format!("{}/{} pods active", active, pods.len())
}

/// Wait until at least one pod matching `selector` is active.
pub async fn wait_for_active_pods_any(
    handle: &ClusterHandle,
    namespace: &str,
    selector: &str,
    timeout: Duration,
) -> Result<Vec<Pod>> {
    let what = format!("any active pod matching '{}' in '{}'", selector, namespace);
    wait_for(&what, timeout, POD_POLL_INTERVAL, || async move {
        match handle.pods_by_labels(namespace, selector).await {
            Ok(pods) if any_pod_active(&pods) => PollState::Ready(pods),
            Ok(pods) => PollState::Pending(Some(describe_pods(&pods))),
            Err(e) => {
                // Transient API errors are expected during rollout.
                debug!(error = %e, selector, "pod list failed, retrying");
                PollState::Pending(None)
            }
        }
    })
    .await
}

/// Wait until every pod matching `selector` is active.
pub async fn wait_for_active_pods_all(
    handle: &ClusterHandle,
    namespace: &str,
    selector: &str,
    timeout: Duration,
) -> Result<Vec<Pod>> {
    let what = format!("all pods matching '{}' in '{}' active", selector, namespace);
    wait_for(&what, timeout, POD_POLL_INTERVAL, || async move {
        match handle.pods_by_labels(namespace, selector).await {
            Ok(pods) if all_pods_active(&pods) => PollState::Ready(pods),
            Ok(pods) => PollState::Pending(Some(describe_pods(&pods))),
            Err(e) => {
                debug!(error = %e, selector, "pod list failed, retrying");
                PollState::Pending(None)
            }
        }
    })
    .await
}
