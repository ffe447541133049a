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

// CLI command definitions

use super::install::{InstallCommand, StatusCommand, UninstallCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kafka-stack-kube",
    version,
    about = "Install and verify a Kafka operator stack on Kubernetes",
    long_about = "A standalone CLI tool that installs a Kafka operator stack \
                  (cert-manager, zookeeper, prometheus-operator, kafka-operator) \
                  onto a target Kubernetes cluster, verifies convergence, and \
                  tears it back down"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Install a profile onto the target cluster
    Install(InstallCommand),

    /// Uninstall a previously installed profile
    Uninstall(UninstallCommand),

    /// Check KafkaCluster convergence and broker pods
    Status(StatusCommand),
}
