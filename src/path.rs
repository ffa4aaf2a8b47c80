//! Logical path handling.
//!
//! iRODS addresses collections and data objects by absolute logical paths
//! rooted at the zone (`/<zone>/home/<user>/...`). Users may type relative
//! paths; those are resolved against the current collection before anything
//! else sees them, so a [`LogicalPath`] is always absolute.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute iRODS logical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogicalPath(String);

/// Error returned when a string is not an absolute logical path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an absolute logical path: '{0}'")]
pub struct NotAbsolute(pub String);

impl LogicalPath {
    /// Create a logical path from an absolute string.
    pub fn new(path: impl Into<String>) -> Result<Self, NotAbsolute> {
        let path = path.into();
        if path.starts_with('/') {
            Ok(Self(path))
        } else {
            Err(NotAbsolute(path))
        }
    }

    /// The root collection, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// The home collection of `user` in `zone`.
    pub fn home(zone: &str, user: &str) -> Self {
        Self(format!("/{}/home/{}", zone, user))
    }

    /// Resolve a user-supplied path against the working collection.
    ///
    /// Absolute input is returned unchanged; relative input is appended to
    /// `working_directory` with a single `/`. Resolution is purely syntactic:
    /// no existence check and no `.`/`..` folding.
    pub fn resolve(raw: &str, working_directory: &LogicalPath) -> Self {
        if raw.starts_with('/') {
            Self(raw.to_string())
        } else {
            Self(format!("{}/{}", working_directory.0, raw))
        }
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, ignoring a trailing slash.
    pub fn name(&self) -> &str {
        let trimmed = self.0.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or_default()
    }

    /// Parent collection, or `None` for the root.
    pub fn parent(&self) -> Option<LogicalPath> {
        let trimmed = self.0.trim_end_matches('/');
        match trimmed.rfind('/') {
            None => None,
            Some(0) if trimmed.len() <= 1 => None,
            Some(0) => Some(Self("/".to_string())),
            Some(idx) => Some(Self(trimmed[..idx].to_string())),
        }
    }

    /// Zone name: the first path segment.
    pub fn zone(&self) -> &str {
        self.0.trim_start_matches('/').split('/').next().unwrap_or_default()
    }

    /// Append a child segment.
    pub fn join(&self, name: &str) -> Self {
        if self.0.ends_with('/') {
            Self(format!("{}{}", self.0, name))
        } else {
            Self(format!("{}/{}", self.0, name))
        }
    }

    /// Whether `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &LogicalPath) -> bool {
        let prefix = ancestor.0.trim_end_matches('/');
        self.0.len() > prefix.len() + 1
            && self.0.starts_with(prefix)
            && self.0.as_bytes()[prefix.len()] == b'/'
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LogicalPath {
    type Error = NotAbsolute;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogicalPath> for String {
    fn from(path: LogicalPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> LogicalPath {
        LogicalPath::home("tempZone", "rods")
    }

    #[test]
    fn absolute_input_is_unchanged() {
        for raw in ["/tempZone", "/tempZone/home/alice/x", "/other/zone/", "/"] {
            assert_eq!(LogicalPath::resolve(raw, &home()).as_str(), raw);
        }
    }

    #[test]
    fn absolute_input_ignores_working_directory() {
        let cwd = LogicalPath::new("/tempZone/home/rods/deep/nested").unwrap();
        let resolved = LogicalPath::resolve("/tempZone/trash", &cwd);
        assert_eq!(resolved.as_str(), "/tempZone/trash");
    }

    #[test]
    fn relative_input_is_appended() {
        let resolved = LogicalPath::resolve("nopes", &home());
        assert_eq!(resolved.as_str(), "/tempZone/home/rods/nopes");
    }

    #[test]
    fn relative_input_is_not_normalized() {
        let resolved = LogicalPath::resolve("a/../b", &home());
        assert_eq!(resolved.as_str(), "/tempZone/home/rods/a/../b");
    }

    #[test]
    fn new_rejects_relative() {
        assert_eq!(
            LogicalPath::new("home/rods"),
            Err(NotAbsolute("home/rods".to_string()))
        );
        assert!(LogicalPath::new("").is_err());
    }

    #[test]
    fn home_collection_layout() {
        assert_eq!(home().as_str(), "/tempZone/home/rods");
    }

    #[test]
    fn name_and_parent() {
        let path = LogicalPath::new("/tempZone/home/rods/file.txt").unwrap();
        assert_eq!(path.name(), "file.txt");
        assert_eq!(path.parent().unwrap().as_str(), "/tempZone/home/rods");
        assert_eq!(path.zone(), "tempZone");
    }

    #[test]
    fn parent_of_zone_is_root() {
        let zone = LogicalPath::new("/tempZone").unwrap();
        assert_eq!(zone.parent().unwrap().as_str(), "/");
        assert!(LogicalPath::new("/").unwrap().parent().is_none());
    }

    #[test]
    fn trailing_slash_is_ignored_for_name() {
        let path = LogicalPath::new("/tempZone/home/").unwrap();
        assert_eq!(path.name(), "home");
        assert_eq!(path.parent().unwrap().as_str(), "/tempZone");
    }

    #[test]
    fn join_appends_segment() {
        assert_eq!(home().join("one").as_str(), "/tempZone/home/rods/one");
        let root = LogicalPath::new("/").unwrap();
        assert_eq!(root.join("tempZone").as_str(), "/tempZone");
    }

    #[test]
    fn descendant_check() {
        let one = home().join("one");
        assert!(one.join("2").is_descendant_of(&one));
        assert!(!one.is_descendant_of(&one));
        assert!(!home().join("one2").is_descendant_of(&one));
    }

    #[test]
    fn serde_rejects_relative() {
        let parsed: Result<LogicalPath, _> = serde_json::from_str("\"relative\"");
        assert!(parsed.is_err());
        let parsed: LogicalPath = serde_json::from_str("\"/tempZone\"").unwrap();
        assert_eq!(parsed.as_str(), "/tempZone");
    }
}
