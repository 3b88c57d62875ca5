//! Hosted repository provisioning.
//!
//! "Do X": Create a private repository for a new project and wire it up locally.
//!
//! # Design
//!
//! - **ForgeWriter**: one REST call, create a repository in a namespace
//! - **create_repository**: organization first, personal account on permission errors
//! - **provision**: create, then `git init` + `origin` + `main` locally
//!
//! # Example
//!
//! ```ignore
//! use now_sc::forge::{self, GitHubWriter};
//!
//! let writer = GitHubWriter::new(client, "https://api.github.com", token);
//! let description = "Presales project for Acme";
//! let done = forge::provision(&writer, "Now-AI-Foundry", path, "acme-poc", description)?;
//! println!("{}", done.repository.html_url);
//! ```

mod github;
mod types;

pub use github::GitHubWriter;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::git;

/// Failure of a single repository creation call.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// Token lacks rights in this namespace (HTTP 403 / "admin access")
    #[error("GitHub API returned status {status}: {body}")]
    PermissionDenied { status: u16, body: String },

    #[error("repository \"{name}\" already exists in {namespace}")]
    AlreadyExists { name: String, namespace: Namespace },

    #[error("GitHub API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to create repository: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ForgeError {
    /// Classify a non-201 response.
    pub fn from_response(status: u16, body: String, namespace: &Namespace, name: &str) -> Self {
        let already_exists = || ForgeError::AlreadyExists {
            name: name.to_string(),
            namespace: namespace.clone(),
        };

        match (status, namespace) {
            (422, Namespace::Organization(_)) => already_exists(),
            (422, Namespace::Personal) if body.contains("already exists") => already_exists(),
            (403, _) => ForgeError::PermissionDenied { status, body },
            _ if body.contains("admin access") => ForgeError::PermissionDenied { status, body },
            _ => ForgeError::Api { status, body },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ForgeError::PermissionDenied { .. })
    }
}

/// Write operations on a forge platform.
pub trait ForgeWriter {
    /// Create a repository under `namespace`.
    fn create_repo(
        &self,
        namespace: &Namespace,
        request: &CreateRepoRequest,
    ) -> Result<RemoteRepository, ForgeError>;
}

/// Map every character outside `[A-Za-z0-9_-]` to `-`.
pub fn sanitize_repo_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Create a repository in `org`, falling back to the personal account when
/// the organization rejects the token.
///
/// Any other failure, including "already exists", is returned as-is.
pub fn create_repository(
    writer: &dyn ForgeWriter,
    org: &str,
    request: &CreateRepoRequest,
) -> Result<Provisioned, ForgeError> {
    let org_ns = Namespace::Organization(org.to_string());

    match writer.create_repo(&org_ns, request) {
        Ok(repository) => Ok(Provisioned {
            repository,
            namespace: org_ns,
        }),
        Err(e) if e.is_permission_denied() => {
            tracing::info!(org, error = %e, "organization rejected repository creation");
            println!(
                "Note: Cannot create in {} organization. Creating in your personal account instead...",
                org
            );
            let repository = writer.create_repo(&Namespace::Personal, request)?;
            Ok(Provisioned {
                repository,
                namespace: Namespace::Personal,
            })
        }
        Err(e) => Err(e),
    }
}

/// Create the hosted repository for a project and initialize `local_path` against it.
pub fn provision(
    writer: &dyn ForgeWriter,
    org: &str,
    local_path: &Path,
    project_name: &str,
    description: &str,
) -> Result<Provisioned> {
    let request = CreateRepoRequest::private_empty(sanitize_repo_name(project_name), description);
    let provisioned = create_repository(writer, org, &request)?;

    git::init_with_remote(local_path, &provisioned.repository.clone_url)
        .context("failed to initialize git")?;

    Ok(provisioned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Replays canned results and records the namespaces it was asked for.
    struct FakeWriter {
        results: RefCell<Vec<Result<RemoteRepository, ForgeError>>>,
        calls: RefCell<Vec<Namespace>>,
    }

    impl FakeWriter {
        fn new(results: Vec<Result<RemoteRepository, ForgeError>>) -> Self {
            Self {
                results: RefCell::new(results),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ForgeWriter for FakeWriter {
        fn create_repo(
            &self,
            namespace: &Namespace,
            _request: &CreateRepoRequest,
        ) -> Result<RemoteRepository, ForgeError> {
            self.calls.borrow_mut().push(namespace.clone());
            self.results.borrow_mut().remove(0)
        }
    }

    fn repo(owner: &str) -> RemoteRepository {
        RemoteRepository {
            clone_url: format!("https://github.com/{}/acme-poc.git", owner),
            html_url: format!("https://github.com/{}/acme-poc", owner),
        }
    }

    fn request() -> CreateRepoRequest {
        CreateRepoRequest::private_empty("acme-poc", "Presales project for Acme Corp")
    }

    #[test]
    fn test_sanitize_repo_name() {
        assert_eq!(sanitize_repo_name("acme-poc"), "acme-poc");
        assert_eq!(sanitize_repo_name("Acme Corp POC!"), "Acme-Corp-POC-");
        assert_eq!(sanitize_repo_name("a.b/c_d"), "a-b-c_d");
        assert_eq!(sanitize_repo_name("café"), "caf-");
        // Pure: same input, same output
        assert_eq!(sanitize_repo_name("x y"), sanitize_repo_name("x y"));
    }

    #[test]
    fn test_org_success_does_not_fall_back() {
        let writer = FakeWriter::new(vec![Ok(repo("Now-AI-Foundry"))]);
        let done = create_repository(&writer, "Now-AI-Foundry", &request()).unwrap();

        assert_eq!(done.namespace, Namespace::Organization("Now-AI-Foundry".into()));
        assert_eq!(writer.calls.borrow().len(), 1);
    }

    #[test]
    fn test_admin_access_falls_back_to_personal() {
        let denied = ForgeError::from_response(
            403,
            r#"{"message":"You need admin access to the organization"}"#.into(),
            &Namespace::Organization("Now-AI-Foundry".into()),
            "acme-poc",
        );
        let writer = FakeWriter::new(vec![Err(denied), Ok(repo("octocat"))]);

        let done = create_repository(&writer, "Now-AI-Foundry", &request()).unwrap();

        assert_eq!(done.namespace, Namespace::Personal);
        assert_eq!(done.repository.html_url, "https://github.com/octocat/acme-poc");
        assert_eq!(
            *writer.calls.borrow(),
            vec![
                Namespace::Organization("Now-AI-Foundry".into()),
                Namespace::Personal
            ]
        );
    }

    #[test]
    fn test_org_already_exists_is_fatal() {
        let org = Namespace::Organization("Now-AI-Foundry".into());
        let exists = ForgeError::from_response(422, "{}".into(), &org, "acme-poc");
        let writer = FakeWriter::new(vec![Err(exists)]);

        let err = create_repository(&writer, "Now-AI-Foundry", &request()).unwrap_err();

        assert!(matches!(err, ForgeError::AlreadyExists { .. }));
        assert_eq!(
            err.to_string(),
            "repository \"acme-poc\" already exists in Now-AI-Foundry organization"
        );
        assert_eq!(writer.calls.borrow().len(), 1);
    }

    #[test]
    fn test_personal_failure_after_fallback_is_returned() {
        let org = Namespace::Organization("Now-AI-Foundry".into());
        let writer = FakeWriter::new(vec![
            Err(ForgeError::from_response(403, "Forbidden".into(), &org, "acme-poc")),
            Err(ForgeError::from_response(
                422,
                r#"{"errors":[{"message":"name already exists on this account"}]}"#.into(),
                &Namespace::Personal,
                "acme-poc",
            )),
        ]);

        let err = create_repository(&writer, "Now-AI-Foundry", &request()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "repository \"acme-poc\" already exists in your account"
        );
    }

    #[test]
    fn test_other_org_errors_do_not_fall_back() {
        let org = Namespace::Organization("Now-AI-Foundry".into());
        let writer = FakeWriter::new(vec![Err(ForgeError::from_response(
            404,
            r#"{"message":"Not Found"}"#.into(),
            &org,
            "acme-poc",
        ))]);

        let err = create_repository(&writer, "Now-AI-Foundry", &request()).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"GitHub API returned status 404: {"message":"Not Found"}"#
        );
        assert_eq!(writer.calls.borrow().len(), 1);
    }

    #[test]
    fn test_classify_personal_422_without_exists() {
        let err = ForgeError::from_response(
            422,
            r#"{"message":"Validation Failed"}"#.into(),
            &Namespace::Personal,
            "acme-poc",
        );
        assert!(matches!(err, ForgeError::Api { status: 422, .. }));
    }
}
