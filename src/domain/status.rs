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

use crate::domain::profile::Profile;

/// Outcome of one attempted unit. The list order mirrors execution order and
/// is the only record of what succeeded.
#[derive(Debug, Clone)]
pub struct PackageInstallStatus {
    pub name: String,
    pub namespace: String,
    pub error: Option<String>,
}

impl PackageInstallStatus {
    pub fn succeeded(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            error: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        namespace: impl Into<String>,
        error: impl ToString,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of one profile install run. A returned `InstallStatus` is
/// a sufficient input to `Installer::uninstall`, whether the run succeeded,
/// partially failed, or halted under fail-fast.
#[derive(Debug, Clone)]
pub struct InstallStatus {
    pub profile: Profile,
    pub fail_on_error: bool,
    pub packages: Vec<PackageInstallStatus>,
}

impl InstallStatus {
    /// A status with no captured package entries, for tearing down a profile
    /// installed by an earlier process run.
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            fail_on_error: false,
            packages: Vec::new(),
        }
    }

    pub fn first_failure(&self) -> Option<&PackageInstallStatus> {
        self.packages.iter().find(|p| !p.is_ok())
    }

    pub fn succeeded(&self) -> bool {
        self.first_failure().is_none()
    }

    /// Namespace recorded for `unit_name`, if the unit was attempted.
    pub fn namespace_for(&self, unit_name: &str) -> Option<&str> {
        self.packages
            .iter()
            .rev()
            .find(|p| p.name == unit_name)
            .map(|p| p.namespace.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_finds_the_failed_entry() {
        let status = InstallStatus {
            profile: Profile::BasicDependencies,
            fail_on_error: false,
            packages: vec![
                PackageInstallStatus::succeeded("cert-manager", "cert-manager"),
                PackageInstallStatus::failed("zookeeper-operator", "zookeeper", "helm exploded"),
                PackageInstallStatus::succeeded("ZookeeperCluster", "zookeeper"),
            ],
        };
        assert!(!status.succeeded());
        let failure = status.first_failure().expect("failure");
        assert_eq!(failure.name, "zookeeper-operator");
        assert_eq!(failure.error.as_deref(), Some("helm exploded"));
    }

    #[test]
    fn empty_status_counts_as_succeeded() {
        let status = InstallStatus::for_profile(Profile::BasicKafka);
        assert!(status.succeeded());
        assert!(status.namespace_for("KafkaCluster").is_none());
    }

    #[test]
    fn namespace_for_reads_the_captured_entry() {
        let status = InstallStatus {
            profile: Profile::BasicKafka,
            fail_on_error: true,
            packages: vec![PackageInstallStatus::succeeded("kafka-operator", "kafka-alt")],
        };
        assert_eq!(status.namespace_for("kafka-operator"), Some("kafka-alt"));
    }
}
