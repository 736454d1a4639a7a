// GitHub API HTTP client.
// Sends unauthenticated requests with the headers the REST API expects and maps failure statuses.

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::ProjectsConfig;
use crate::error::{CardsError, Result};

const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub API client bound to one API host.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("repo-cards"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CardsError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for the API host named in `config`.
    pub fn from_config(config: &ProjectsConfig) -> Result<Self> {
        Self::new(config.api_base.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(CardsError::Api)?;

        check_response(response)
    }
}

/// Pass through 2xx responses, turn everything else into a status error.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CardsError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_sends_github_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello")
            .match_header("accept", GITHUB_MEDIA_TYPE)
            .match_header("user-agent", "repo-cards")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GitHubClient::new(server.url()).unwrap();
        let response = client.get("/repos/octo/hello").await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_maps_failure_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/missing")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url()).unwrap();
        let err = client.get("/repos/octo/missing").await.unwrap_err();

        match err {
            CardsError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/repos/octo/missing"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::new("https://example.test/").unwrap();
        assert_eq!(client.base_url(), "https://example.test");
    }
}
