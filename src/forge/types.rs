//! Domain types for repository provisioning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner under which a repository is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// A GitHub organization, e.g. `Now-AI-Foundry`
    Organization(String),
    /// The authenticated user's own account
    Personal,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Organization(org) => write!(f, "{} organization", org),
            Namespace::Personal => write!(f, "your account"),
        }
    }
}

/// Body of a repository creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

impl CreateRepoRequest {
    /// Private, empty repository (no README, so the local project can be pushed as-is)
    pub fn private_empty(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            private: true,
            auto_init: false,
        }
    }
}

/// Repository returned by the forge after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepository {
    pub clone_url: String,
    pub html_url: String,
}

/// Where a repository ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub repository: RemoteRepository,
    pub namespace: Namespace,
}
