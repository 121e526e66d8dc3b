//! Typed payloads for the Quay repository and robot endpoints

use serde::{Deserialize, Serialize};

/// A container image repository as returned by `GET /repository`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Unix timestamp in seconds; only present when `last_modified=true` is requested
    #[serde(default)]
    pub last_modified: Option<i64>,
    #[serde(default)]
    pub is_starred: Option<bool>,
}

impl Repository {
    /// `namespace/name`, or just the name when the namespace is missing
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }
}

/// A robot account scoped to an organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotAccount {
    /// Fully qualified name, `organization+shortname`
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_accessed: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl RobotAccount {
    /// Name without the `organization+` prefix, as used in robot URLs
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('+')
            .map(|(_, short)| short)
            .unwrap_or(&self.name)
    }
}

/// Error body returned by Quay on failed requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    pub error_message: String,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RepositoryList {
    #[serde(default, alias = "Repositories")]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RobotList {
    #[serde(default, alias = "Robots")]
    pub robots: Vec<RobotAccount>,
}
