//! Direct GitHub lookups used by the trigger flow.
//!
//! The backend proxies commit history for the dashboard; this module covers
//! the one call the console makes to GitHub itself — resolving the latest
//! commit SHA of a branch before triggering, so the execution record can
//! carry a commit hash. Every failure here degrades to "no hash".

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

/// Parse the `owner/repo` slug from a GitHub repository URL.
///
/// Handles:
/// - `https://github.com/owner/repo`
/// - `https://github.com/owner/repo.git`
/// - bare `owner/repo`
pub fn parse_owner_repo(url: &str) -> Option<String> {
    let path = url
        .trim()
        .trim_end_matches('/')
        .trim_end_matches(".git");
    let path = path
        .strip_prefix("https://github.com/")
        .or_else(|| path.strip_prefix("http://github.com/"))
        .unwrap_or(path);

    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() == 2
        && !parts[0].is_empty()
        && !parts[1].is_empty()
        && !parts[0].contains(':')
        && !parts[0].contains('.')
    {
        Some(format!("{}/{}", parts[0], parts[1]))
    } else {
        None
    }
}

/// Resolve the latest commit SHA on `branch`, or `None` when the repository
/// URL is unparseable, the API call fails, or the response is unexpected.
pub async fn latest_commit_sha(repo_url: &str, branch: &str) -> Option<String> {
    let owner_repo = parse_owner_repo(repo_url)?;
    let url = format!(
        "https://api.github.com/repos/{}/commits/{}",
        owner_repo, branch
    );
    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "pipewatch")
        .send()
        .await
        .ok()?;
    if !resp.status().is_success() {
        tracing::debug!(status = %resp.status(), %url, "commit lookup rejected");
        return None;
    }
    let commit: BranchCommit = resp.json().await.ok()?;
    Some(commit.sha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_https_url() {
        assert_eq!(
            parse_owner_repo("https://github.com/owner/repo"),
            Some("owner/repo".to_string())
        );
    }

    #[test]
    fn parses_url_with_git_suffix() {
        assert_eq!(
            parse_owner_repo("https://github.com/owner/repo.git"),
            Some("owner/repo".to_string())
        );
    }

    #[test]
    fn parses_url_with_trailing_slash() {
        assert_eq!(
            parse_owner_repo("https://github.com/owner/repo/"),
            Some("owner/repo".to_string())
        );
    }

    #[test]
    fn parses_bare_slug() {
        assert_eq!(parse_owner_repo("owner/repo"), Some("owner/repo".to_string()));
    }

    #[test]
    fn rejects_missing_repo_segment() {
        assert_eq!(parse_owner_repo("https://github.com/owner"), None);
    }

    #[test]
    fn rejects_extra_segments() {
        assert_eq!(parse_owner_repo("https://github.com/owner/repo/extra"), None);
    }

    #[test]
    fn rejects_ssh_urls() {
        assert_eq!(parse_owner_repo("git@github.com:owner/repo.git"), None);
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(parse_owner_repo(""), None);
    }
}
