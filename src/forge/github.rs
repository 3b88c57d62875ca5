//! GitHub ForgeWriter implementation.
//!
//! Talks to the REST API directly with a personal access token.

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::{CreateRepoRequest, ForgeError, ForgeWriter, Namespace, RemoteRepository};

/// GitHub implementation of ForgeWriter.
pub struct GitHubWriter {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubWriter {
    pub fn new(client: Client, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Creation endpoint for a namespace.
    fn repos_url(&self, namespace: &Namespace) -> String {
        match namespace {
            Namespace::Organization(org) => format!("{}/orgs/{}/repos", self.api_url, org),
            Namespace::Personal => format!("{}/user/repos", self.api_url),
        }
    }
}

impl ForgeWriter for GitHubWriter {
    fn create_repo(
        &self,
        namespace: &Namespace,
        request: &CreateRepoRequest,
    ) -> Result<RemoteRepository, ForgeError> {
        let url = self.repos_url(namespace);
        tracing::debug!(%url, name = %request.name, "creating repository");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .json(request)
            .send()
            .map_err(ForgeError::Transport)?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().unwrap_or_default();
            return Err(ForgeError::from_response(
                status.as_u16(),
                body,
                namespace,
                &request.name,
            ));
        }

        response
            .json::<RemoteRepository>()
            .map_err(ForgeError::Decode)
    }
}
