// GitHub API response types.
// Only the repository fields the cards consume are modelled; everything else is ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// GitHub repository, as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent or null topics read as an empty list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "id": 1296269,
            "name": "portfolio",
            "full_name": "mstanimirovic/portfolio",
            "html_url": "https://github.com/mstanimirovic/portfolio",
            "description": "Personal site",
            "topics": ["rust", "static-site"],
            "stargazers_count": 3
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "portfolio");
        assert_eq!(repo.html_url, "https://github.com/mstanimirovic/portfolio");
        assert_eq!(repo.description.as_deref(), Some("Personal site"));
        assert_eq!(repo.topics, vec!["rust", "static-site"]);
    }

    #[test]
    fn test_null_description_and_missing_topics() {
        let json = r#"{"name": "berba", "html_url": "https://github.com/x/berba", "description": null}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.description.is_none());
        assert!(repo.topics.is_empty());
    }

    #[test]
    fn test_null_topics() {
        let json = r#"{"name": "skocko", "html_url": "https://github.com/x/skocko", "topics": null}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.topics.is_empty());
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let json = r#"{"html_url": "https://github.com/x/y"}"#;
        assert!(serde_json::from_str::<Repository>(json).is_err());
    }
}
