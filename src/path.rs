//! Path Resolver
//!
//! Maps browser-style locations (`/contents/src/lib`) to repository-relative
//! paths (`contents/src/lib`) and back. Every resolved path starts with the
//! configured root prefix exactly once, and nothing resolves above it.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::fmt;

/// Characters escaped when a path segment is placed in a location.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Slash-separated path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RepoPath(String);

impl RepoPath {
    fn from_segments(segments: &[String]) -> Self {
        RepoPath(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One breadcrumb link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    pub location: String,
}

/// Decode a percent-encoded name for display.
pub fn decode_segment(name: &str) -> String {
    percent_decode_str(name).decode_utf8_lossy().into_owned()
}

/// Resolves locations against a fixed root prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: Vec<String>,
}

impl PathResolver {
    /// `root` may hold several segments (`docs/contents`) or be empty, in
    /// which case the repository root is the browsing root.
    pub fn new(root: &str) -> Self {
        Self {
            root: split_segments(root),
        }
    }

    /// The root as a repository path.
    pub fn root(&self) -> RepoPath {
        RepoPath::from_segments(&self.root)
    }

    /// Location of the root, e.g. `/contents`.
    pub fn root_location(&self) -> String {
        self.path_to_location(&self.root())
    }

    /// Resolve a browser location to a repository path.
    ///
    /// Query strings and fragments are ignored, repeated slashes collapse,
    /// `.` is dropped and `..` never climbs above the root. Leading copies of
    /// the root prefix collapse into one and the prefix is added when absent.
    pub fn location_to_path(&self, location: &str) -> RepoPath {
        let location = strip_origin(location);
        let location = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let decoded = decode_segment(location);

        let mut stack: Vec<String> = Vec::new();
        for segment in split_segments(&decoded) {
            match segment.as_str() {
                "." => {}
                ".." => {
                    stack.pop();
                }
                _ => stack.push(segment),
            }
        }

        let mut rest: &[String] = &stack;
        if !self.root.is_empty() {
            while rest.starts_with(&self.root) {
                rest = &rest[self.root.len()..];
            }
        }

        let mut segments = self.root.clone();
        segments.extend(rest.iter().cloned());
        RepoPath::from_segments(&segments)
    }

    /// Build the location whose resolution yields `path` again.
    pub fn path_to_location(&self, path: &RepoPath) -> String {
        let encoded: Vec<String> = path
            .segments()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        format!("/{}", encoded.join("/"))
    }

    /// Path of a child entry of `dir`.
    pub fn join(&self, dir: &RepoPath, name: &str) -> RepoPath {
        let mut segments: Vec<String> = dir.segments().map(str::to_string).collect();
        segments.extend(split_segments(name));
        RepoPath::from_segments(&segments)
    }

    /// Whether `path` is the browsing root.
    pub fn is_root(&self, path: &RepoPath) -> bool {
        path.segments().count() <= self.root.len()
    }

    /// Parent of `path`, or `None` at the root.
    pub fn parent(&self, path: &RepoPath) -> Option<RepoPath> {
        if self.is_root(path) {
            return None;
        }
        let segments: Vec<String> = path.segments().map(str::to_string).collect();
        Some(RepoPath::from_segments(&segments[..segments.len() - 1]))
    }

    /// `Home` followed by one crumb per segment below the root.
    pub fn breadcrumbs(&self, path: &RepoPath) -> Vec<Crumb> {
        let mut crumbs = vec![Crumb {
            label: "Home".to_string(),
            location: self.root_location(),
        }];
        let mut current = self.root.clone();
        for segment in path.segments().skip(self.root.len()) {
            current.push(segment.to_string());
            crumbs.push(Crumb {
                label: decode_segment(segment),
                location: self.path_to_location(&RepoPath::from_segments(&current)),
            });
        }
        crumbs
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop `scheme://host` from absolute URLs so pasted addresses resolve too.
/// Root-relative locations are returned unchanged.
fn strip_origin(location: &str) -> &str {
    if location.starts_with('/') {
        return location;
    }
    match location.split_once("://") {
        Some((_, rest)) => match rest.find('/') {
            Some(idx) => &rest[idx..],
            None => "",
        },
        None => location,
    }
}
