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

use crate::infrastructure::constants::{KUBECONFIG_DEFAULT_RELATIVE, KUBECONFIG_ENV};
use crate::shared::error::{InstallError, Result};
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{ListParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolved connection to exactly one target cluster.
///
/// Constructed once via [`ClusterHandle::resolve`] and shared read-only by
/// every installable unit; no network call is made until first use.
pub struct ClusterHandle {
    kubeconfig: PathBuf,
    client: Client,
}

impl ClusterHandle {
    /// Resolve a kubeconfig locator and build a client from it.
    ///
    /// Precedence: explicit override, then `KUBECONFIG`, then
    /// `~/.kube/config`. An unreadable or malformed kubeconfig is a
    /// [`InstallError::Connection`].
    pub async fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let kubeconfig_path =
            resolve_kubeconfig_path(explicit, std::env::var_os(KUBECONFIG_ENV), home_dir());
        debug!(kubeconfig = %kubeconfig_path.display(), "resolving cluster connection");

        let kubeconfig = Kubeconfig::read_from(&kubeconfig_path).map_err(|e| {
            InstallError::Connection(format!(
                "failed to read kubeconfig {}: {}",
                kubeconfig_path.display(),
                e
            ))
        })?;
        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                InstallError::Connection(format!("failed to build client config: {}", e))
            })?;
        let client = Client::try_from(config).map_err(|e| {
            InstallError::Connection(format!("failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            kubeconfig: kubeconfig_path,
            client,
        })
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn kubeconfig_path(&self) -> &Path {
        &self.kubeconfig
    }

    /// Get-or-create a namespace. Presence is not an error.
    pub async fn ensure_namespace(&self, name: &str) -> Result<()> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        match api.get(name).await {
            Ok(_) => {
                debug!(namespace = name, "namespace already exists");
                Ok(())
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                let ns = Namespace {
                    metadata: kube::api::ObjectMeta {
                        name: Some(name.to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                };
                api.create(&PostParams::default(), &ns).await?;
                info!(namespace = name, "created namespace");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List pods in a namespace matching a label selector.
    pub async fn pods_by_labels(&self, namespace: &str, selector: &str) -> Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().labels(selector);
        let pods = api.list(&lp).await?;
        Ok(pods.items)
    }
}

/// Kubeconfig precedence: explicit flag, `KUBECONFIG`, `~/.kube/config`.
fn resolve_kubeconfig_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(env) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(env);
    }
    home.unwrap_or_default().join(KUBECONFIG_DEFAULT_RELATIVE)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_env() {
        let path = resolve_kubeconfig_path(
            Some(Path::new("/tmp/explicit.conf")),
            Some(OsString::from("/tmp/env.conf")),
            Some(PathBuf::from("/home/me")),
        );
        assert_eq!(path, PathBuf::from("/tmp/explicit.conf"));
    }

    #[test]
    fn env_wins_over_default() {
        let path = resolve_kubeconfig_path(
            None,
            Some(OsString::from("/tmp/env.conf")),
            Some(PathBuf::from("/home/me")),
        );
        assert_eq!(path, PathBuf::from("/tmp/env.conf"));
    }

    #[test]
    fn falls_back_to_home_kube_config() {
        let path = resolve_kubeconfig_path(None, None, Some(PathBuf::from("/home/me")));
        assert_eq!(path, PathBuf::from("/home/me/.kube/config"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let path = resolve_kubeconfig_path(
            None,
            Some(OsString::new()),
            Some(PathBuf::from("/home/me")),
        );
        assert_eq!(path, PathBuf::from("/home/me/.kube/config"));
    }
}
