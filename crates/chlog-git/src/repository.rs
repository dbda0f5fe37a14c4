//! Git repository wrapper.

use std::cmp::Reverse;
use std::path::Path;

use git2::Repository as Git2Repo;
use semver::Version;
use tracing::debug;

use crate::{GitError, GitResult, RemoteInfo};

/// Revision keyword for the largest tag.
const LAST_TAG: &str = "last";
/// Revision keyword for the second largest tag.
const PREV_TAG: &str = "prev";
/// Revision keyword for `HEAD`.
const HEAD: &str = "head";

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository containing the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner =
            Git2Repo::discover(path).map_err(|_| GitError::RepoNotFound(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns all tags, largest version first.
    ///
    /// Tags are compared as semantic versions with a leading `v` ignored;
    /// tags that are not versions sort after all versions, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn tags(&self) -> GitResult<Vec<String>> {
        let names = self.inner.tag_names(None)?;
        let mut tags: Vec<String> = names.iter().flatten().map(String::from).collect();
        sort_tags(&mut tags);
        Ok(tags)
    }

    /// Returns the largest tag.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn largest_tag(&self) -> GitResult<Option<String>> {
        Ok(self.tags()?.into_iter().next())
    }

    /// Returns the second largest tag.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn previous_tag(&self) -> GitResult<Option<String>> {
        Ok(self.tags()?.into_iter().nth(1))
    }

    /// Resolves `last`, `prev` and `head` to revisions. Other values are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagNotFound`] if the keyword needs a tag that does
    /// not exist.
    pub fn resolve_revision(&self, revision: &str) -> GitResult<String> {
        let resolved = if revision.eq_ignore_ascii_case(LAST_TAG) {
            self.largest_tag()?
                .ok_or_else(|| GitError::TagNotFound(LAST_TAG.to_string()))?
        } else if revision.eq_ignore_ascii_case(PREV_TAG) {
            self.previous_tag()?
                .ok_or_else(|| GitError::TagNotFound(PREV_TAG.to_string()))?
        } else if revision.eq_ignore_ascii_case(HEAD) {
            "HEAD".to_string()
        } else {
            revision.to_string()
        };

        if resolved != revision {
            debug!(revision, %resolved, "revision keyword resolved");
        }
        Ok(resolved)
    }

    /// Returns the URL of a remote.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RemoteNotFound`] if the remote does not exist or
    /// has no URL.
    pub fn remote_url(&self, name: &str) -> GitResult<String> {
        match self.inner.find_remote(name) {
            Ok(remote) => remote
                .url()
                .map(String::from)
                .ok_or_else(|| GitError::RemoteNotFound(name.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Returns the web URL of a remote, e.g. `https://github.com/acme/widget`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote is missing or its URL cannot be parsed.
    pub fn remote_web_url(&self, name: &str) -> GitResult<String> {
        let url = self.remote_url(name)?;
        Ok(RemoteInfo::parse(&url)?.https_url())
    }
}

/// Parses a tag as a version, ignoring a leading `v`.
fn tag_version(tag: &str) -> Option<Version> {
    let raw = tag.strip_prefix(['v', 'V']).unwrap_or(tag);
    Version::parse(raw).ok()
}

/// Sorts tags in descending order: versions first, then the rest by name.
fn sort_tags(tags: &mut [String]) {
    tags.sort_by_cached_key(|tag| Reverse((tag_version(tag), tag.clone())));
}
