//! Hierarchical actor addressing (C2).
//!
//! `emberrt` has no remote transport, so `ActorPath` is the local-only
//! subset of the classic actor-path tree: a root followed by zero or more
//! `/`-separated segments, displayed as `/user/segment/segment`.

// Layer 1: Standard library imports
use std::fmt::{self, Display};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// A validated, non-empty path segment must not contain `/`.
fn validate_segment(segment: &str) {
    assert!(!segment.is_empty(), "actor path segment must not be empty");
    assert!(
        !segment.contains('/'),
        "actor path segment must not contain '/': {segment}"
    );
}

#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum Inner {
    Root,
    Child { parent: Arc<ActorPath>, segment: String },
}

/// A hierarchical address for an actor, independent of its current
/// `ActorId` incarnation.
///
/// Two actors spawned at the same path, one after the other (e.g. across
/// a restart), compare equal by path even though their `ActorId`s differ.
///
/// # Examples
///
/// ```rust
/// use emberrt::util::ActorPath;
///
/// let root = ActorPath::root();
/// let worker = root.child("worker");
/// assert_eq!(worker.to_string(), "/worker");
///
/// let nested = worker.child("child-1");
/// assert_eq!(nested.to_string(), "/worker/child-1");
/// assert_eq!(nested.parent().to_string(), "/worker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorPath(Arc<Inner>);

impl ActorPath {
    /// The root path, displayed as `/`.
    pub fn root() -> Self {
        Self(Arc::new(Inner::Root))
    }

    /// Appends a single segment, returning a new child path.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is empty or contains `/` — actor names are
    /// chosen by the caller at spawn time and are a programming error to
    /// get wrong, not a runtime condition to recover from.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        validate_segment(&segment);
        Self(Arc::new(Inner::Child {
            parent: Arc::new(self.clone()),
            segment,
        }))
    }

    /// Parses a `/`-separated path string such as `/user/worker`.
    ///
    /// # Panics
    ///
    /// Panics on an empty string, a string not starting with `/`, or any
    /// empty intermediate segment (`//`).
    pub fn parse(s: &str) -> Self {
        assert!(s.starts_with('/'), "actor path must start with '/': {s}");
        let mut path = Self::root();
        for segment in s.split('/').skip(1) {
            if segment.is_empty() {
                continue;
            }
            path = path.child(segment);
        }
        path
    }

    /// Is this the root path?
    pub fn is_root(&self) -> bool {
        matches!(&*self.0, Inner::Root)
    }

    /// The last path segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        match &*self.0 {
            Inner::Root => None,
            Inner::Child { segment, .. } => Some(segment),
        }
    }

    /// The parent path. Returns the root unchanged when called on root.
    pub fn parent(&self) -> ActorPath {
        match &*self.0 {
            Inner::Root => self.clone(),
            Inner::Child { parent, .. } => (**parent).clone(),
        }
    }

    /// All segments from root to this path, in order.
    pub fn segments(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        loop {
            match &*cur.0 {
                Inner::Root => break,
                Inner::Child { parent, segment } => {
                    out.push(segment.clone());
                    cur = (**parent).clone();
                }
            }
        }
        out.reverse();
        out
    }
}

impl Display for ActorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments();
        if segments.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", segments.join("/"))
        }
    }
}
