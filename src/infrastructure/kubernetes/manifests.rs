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

//! Declarative apply/delete of multi-document YAML manifest files.
//!
//! Each document's API group/version/kind is resolved through server
//! discovery and applied via server-side apply, so reapplying an existing
//! manifest is idempotent.

use crate::infrastructure::constants::FIELD_MANAGER;
use crate::shared::error::{InstallError, Result};
use kube::api::{DeleteParams, DynamicObject, Patch, PatchParams};
use kube::core::GroupVersionKind;
use kube::discovery::{pinned_kind, ApiResource, Scope};
use kube::{Api, Client};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ManifestClient {
    client: Client,
}

impl ManifestClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Apply every document in every file against `namespace`. A document
    /// carrying its own namespace keeps it; cluster-scoped kinds ignore the
    /// namespace entirely.
    pub async fn apply_files(&self, namespace: &str, files: &[&Path]) -> Result<()> {
        for file in files {
            let docs = read_documents(file)?;
            debug!(file = %file.display(), count = docs.len(), "applying manifests");
            for doc in docs {
                self.apply_document(namespace, doc, file).await?;
            }
        }
        Ok(())
    }

    /// Delete every document in every file. Documents are removed in reverse
    /// order within a file; already-gone resources are not errors.
    pub async fn delete_files(&self, namespace: &str, files: &[&Path]) -> Result<()> {
        for file in files {
            let docs = read_documents(file)?;
            debug!(file = %file.display(), count = docs.len(), "deleting manifests");
            for doc in docs.into_iter().rev() {
                self.delete_document(namespace, doc, file).await?;
            }
        }
        Ok(())
    }

    async fn dynamic_api(
        &self,
        namespace: &str,
        doc: &DynamicObject,
        file: &Path,
    ) -> Result<(Api<DynamicObject>, String)> {
        let types = doc.types.as_ref().ok_or_else(|| {
            InstallError::manifest(
                file.display().to_string(),
                "document is missing apiVersion/kind",
            )
        })?;
        let gvk = GroupVersionKind::try_from(types).map_err(|e| {
            InstallError::manifest(file.display().to_string(), e.to_string())
        })?;
        let (ar, caps): (ApiResource, _) = pinned_kind(&self.client, &gvk)
            .await
            .map_err(|e| {
                InstallError::manifest(
                    file.display().to_string(),
                    format!("discovery failed for {}/{}: {}", gvk.api_version(), gvk.kind, e),
                )
            })?;

        let name = doc.metadata.name.clone().ok_or_else(|| {
            InstallError::manifest(file.display().to_string(), "document is missing a name")
        })?;
        let api = if caps.scope == Scope::Cluster {
            Api::all_with(self.client.clone(), &ar)
        } else {
            let ns = doc
                .metadata
                .namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .unwrap_or(if namespace.is_empty() { "default" } else { namespace });
            Api::namespaced_with(self.client.clone(), ns, &ar)
        };
        Ok((api, name))
    }

    async fn apply_document(
        &self,
        namespace: &str,
        doc: DynamicObject,
        file: &Path,
    ) -> Result<()> {
        let (api, name) = self.dynamic_api(namespace, &doc, file).await?;
        let pp = PatchParams::apply(FIELD_MANAGER).force();
        api.patch(&name, &pp, &Patch::Apply(&doc)).await?;
        info!(name, file = %file.display(), "applied manifest document");
        Ok(())
    }

    async fn delete_document(
        &self,
        namespace: &str,
        doc: DynamicObject,
        file: &Path,
    ) -> Result<()> {
        let (api, name) = self.dynamic_api(namespace, &doc, file).await?;
        match api.delete(&name, &DeleteParams::default()).await {
            Ok(_) => {
                info!(name, file = %file.display(), "deleted manifest document");
                Ok(())
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                warn!(name, file = %file.display(), "resource already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn read_documents(file: &Path) -> Result<Vec<DynamicObject>> {
    let contents = std::fs::read_to_string(file)
        .map_err(|e| InstallError::manifest(file.display().to_string(), e.to_string()))?;
    parse_documents(&contents)
}

/// Split a multi-document YAML string into dynamic objects, skipping empty
/// documents (comment-only or `---` separators at the edges).
pub fn parse_documents(yaml: &str) -> Result<Vec<DynamicObject>> {
    let mut objects = Vec::new();
    for doc in serde_yaml::Deserializer::from_str(yaml) {
        let value = serde_yaml::Value::deserialize(doc)?;
        if value.is_null() {
            continue;
        }
        objects.push(serde_yaml::from_value(value)?);
    }
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DOCS: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: first
  namespace: kafka
data:
  key: value
---
apiVersion: zookeeper.pravega.io/v1beta1
kind: ZookeeperCluster
metadata:
  name: zookeeper
spec:
  replicas: 3
---
# trailing comment-only document
"#;

    #[test]
    fn splits_documents_and_skips_empty_ones() {
        let docs = parse_documents(TWO_DOCS).expect("parse");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].metadata.name.as_deref(), Some("first"));
        assert_eq!(docs[0].metadata.namespace.as_deref(), Some("kafka"));
        let types = docs[1].types.as_ref().expect("type meta");
        assert_eq!(types.kind, "ZookeeperCluster");
        assert_eq!(types.api_version, "zookeeper.pravega.io/v1beta1");
    }

    #[test]
    fn empty_input_yields_no_documents() {
        assert!(parse_documents("").expect("parse").is_empty());
        assert!(parse_documents("---\n").expect("parse").is_empty());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_documents("kind: [unclosed").is_err());
    }
}
