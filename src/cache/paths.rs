// Cache path utilities.
// Locates the per-session store files under the user cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Session used when none is named on the command line.
pub const DEFAULT_SESSION: &str = "default";

/// Get the base cache directory (~/.cache/repo-cards on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repo-cards").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one store file per session.
pub fn sessions_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("sessions"))
}

/// Path to a session's store file.
pub fn session_path(session: &str) -> Option<PathBuf> {
    sessions_dir().map(|dir| dir.join(format!("{}.json", sanitize_name(session))))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect();

    if cleaned.is_empty() {
        DEFAULT_SESSION.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("../escape"), "___escape");
        assert_eq!(sanitize_name(""), "default");
    }

    #[test]
    fn test_session_path() {
        // Path construction only, nothing touches the filesystem
        assert_eq!(
            session_path("tab:1"),
            sessions_dir().map(|dir| dir.join("tab_1.json"))
        );
        assert_eq!(
            sessions_dir(),
            cache_dir().map(|dir| dir.join("sessions"))
        );
    }
}
