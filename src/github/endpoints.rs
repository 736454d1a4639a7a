// GitHub API endpoint functions.
// Typed wrappers over the raw client for the resources this crate reads.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

impl GitHubClient {
    /// Get a specific repository.
    ///
    /// The body is read as text and decoded separately so that transport
    /// failures and malformed payloads surface as distinct errors.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, repo)).await?;
        let body = response.text().await?;
        let repository: Repository = serde_json::from_str(&body)?;
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardsError;

    #[tokio::test]
    async fn test_get_repo() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name": "hello", "html_url": "https://github.com/octo/hello",
                    "description": null, "topics": ["cli-tool"]}"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(server.url()).unwrap();
        let repo = client.get_repo("octo", "hello").await.unwrap();

        assert_eq!(repo.name, "hello");
        assert!(repo.description.is_none());
        assert_eq!(repo.topics, vec!["cli-tool"]);
    }

    #[tokio::test]
    async fn test_get_repo_bad_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/garbled")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = GitHubClient::new(server.url()).unwrap();
        let err = client.get_repo("octo", "garbled").await.unwrap_err();

        assert!(matches!(err, CardsError::Json(_)));
    }
}
