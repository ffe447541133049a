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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, InstallError>;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    Timeout {
        what: String,
        timeout: std::time::Duration,
        last_observed: Option<String>,
    },

    #[error("Helm {verb} failed for release '{release}' in namespace '{namespace}': {message}")]
    Helm {
        verb: &'static str,
        release: String,
        namespace: String,
        message: String,
    },

    #[error("Manifest error for {file}: {message}")]
    Manifest { file: String, message: String },

    #[error("Kubernetes API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for InstallError {
    fn from(err: kube::Error) -> Self {
        InstallError::Api(err.to_string())
    }
}

impl InstallError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn manifest(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn helm(
        verb: &'static str,
        release: impl Into<String>,
        namespace: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Helm {
            verb,
            release: release.into(),
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// Timeout carrying the most recent observation, so callers can report
    /// partial progress instead of only "timed out".
    pub fn timeout(
        what: impl Into<String>,
        timeout: std::time::Duration,
        last_observed: Option<String>,
    ) -> Self {
        Self::Timeout {
            what: what.into(),
            timeout,
            last_observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timeout_display_names_the_wait() {
        let err = InstallError::timeout(
            "active zookeeper pods",
            Duration::from_secs(30),
            Some("0/3 pods active".to_string()),
        );
        assert!(err.to_string().contains("active zookeeper pods"));
    }

    #[test]
    fn helm_error_names_release_and_namespace() {
        let err = InstallError::helm("install", "cert-manager", "cert-manager", "exit 1");
        let msg = err.to_string();
        assert!(msg.contains("cert-manager"));
        assert!(msg.contains("install"));
    }
}
