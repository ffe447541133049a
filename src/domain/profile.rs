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

use crate::domain::units::{
    CertManagerUnit, InstallContext, InstallableUnit, KafkaClusterUnit, KafkaOperatorUnit,
    PrometheusOperatorUnit, ZookeeperClusterUnit, ZookeeperOperatorUnit,
};
use crate::shared::error::InstallError;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// The closed set of installable profiles. The profile set is fixed, so
/// dispatch is an exhaustive match; adding a profile is a compile error
/// until every match arm handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// cert-manager, zookeeper-operator + cluster, prometheus-operator.
    BasicDependencies,
    /// kafka-operator and a simple KafkaCluster.
    BasicKafka,
}

impl Profile {
    pub fn name(&self) -> &'static str {
        match self {
            Profile::BasicDependencies => "basic-dependencies",
            Profile::BasicKafka => "basic-kafka",
        }
    }

    /// The profile's units in install order.
    pub fn units(&self, ctx: &InstallContext) -> Vec<Box<dyn InstallableUnit>> {
        match self {
            Profile::BasicDependencies => vec![
                Box::new(CertManagerUnit::new(ctx.clone())),
                Box::new(ZookeeperOperatorUnit::new(ctx.clone())),
                Box::new(ZookeeperClusterUnit::new(ctx.clone())),
                Box::new(PrometheusOperatorUnit::new(ctx.clone())),
            ],
            Profile::BasicKafka => vec![
                Box::new(KafkaOperatorUnit::new(ctx.clone())),
                Box::new(KafkaClusterUnit::new(ctx.clone())),
            ],
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic-dependencies" => Ok(Profile::BasicDependencies),
            "basic-kafka" => Ok(Profile::BasicKafka),
            other => Err(InstallError::UnknownProfile(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_profiles() {
        assert_eq!(
            "basic-dependencies".parse::<Profile>().ok(),
            Some(Profile::BasicDependencies)
        );
        assert_eq!("basic-kafka".parse::<Profile>().ok(), Some(Profile::BasicKafka));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        match "full-mesh".parse::<Profile>() {
            Err(InstallError::UnknownProfile(name)) => assert_eq!(name, "full-mesh"),
            other => panic!("expected unknown profile error, got {:?}", other),
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for profile in [Profile::BasicDependencies, Profile::BasicKafka] {
            assert_eq!(profile.to_string().parse::<Profile>().ok(), Some(profile));
        }
    }
}
