//! Decomposition of a component source URL

use crate::error::FetchError;
use url::Url;

/// A directory at a branch of a hosted repository
///
/// Accepted layouts after `scheme://host/<owner>/<repo>/`:
/// - `refs/heads/<branch>/<path>` (raw-content layout)
/// - `blob/<branch>/<path>` or `tree/<branch>/<path>`
/// - `blob/refs/heads/<branch>/<path>` or `tree/refs/heads/<branch>/<path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Slash-joined path inside the repository, never empty
    pub path: String,
}

impl SourceLocation {
    pub fn parse(source: &str) -> Result<Self, FetchError> {
        let invalid = || FetchError::LocationInvalid {
            url: source.to_string(),
        };

        let url = Url::parse(source).map_err(|_| invalid())?;
        if url.host_str().is_none() {
            return Err(invalid());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|s| !s.is_empty())
            .collect();

        let (owner, repo, rest) = match segments.as_slice() {
            [owner, repo, rest @ ..] => (*owner, *repo, rest),
            _ => return Err(invalid()),
        };

        let (branch, path) = match rest {
            ["refs", "heads", branch, path @ ..] => (*branch, path),
            ["blob" | "tree", "refs", "heads", branch, path @ ..] => (*branch, path),
            ["blob" | "tree", branch, path @ ..] => (*branch, path),
            _ => return Err(invalid()),
        };

        if path.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            path: path.join("/"),
        })
    }

    /// `<api>/repos/<owner>/<repo>/contents/<path>?ref=<branch>`
    pub fn contents_url(&self, api_base: &Url) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/repos/{}/{}/contents/{}",
            api_base.as_str().trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path
        );
        let mut url =
            Url::parse(&raw).map_err(|_| FetchError::LocationInvalid { url: raw.clone() })?;
        url.set_query(Some(&format!("ref={}", self.branch)));
        Ok(url)
    }
}
