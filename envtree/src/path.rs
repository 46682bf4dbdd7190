//! Dotted, lower-case addresses into the configuration tree.

use std::fmt;

/// Ordered sequence of lower-case segments addressing a node in the tree.
///
/// Externally a path is written with dots (`db.1.user`). The empty string is
/// the root path. Otherwise every dot separates a segment, so `a..b` has an
/// empty middle segment; such paths are accepted but never useful.
///
/// # Examples
///
/// ```
/// use envtree::ConfigPath;
///
/// let path = ConfigPath::parse("DB.1.User");
/// assert_eq!(path.segments(), ["db", "1", "user"]);
/// assert_eq!(path.to_string(), "db.1.user");
/// assert!(ConfigPath::parse("").is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// The empty path addressing the whole tree.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a dotted path, lower-casing every segment.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::from_segments(dotted.split('.'))
    }

    /// Build a path from individual segments, lower-casing each one.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|segment| segment.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The path's segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments. Equivalent to [`Self::is_root`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append `other` to this path.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Append a single segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_lowercase());
        Self { segments }
    }

    /// Whether `prefix` is this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Whether either path is an ancestor of (or equal to) the other.
    pub(crate) fn overlaps(&self, other: &Self) -> bool {
        self.starts_with(other) || other.starts_with(self)
    }
}

/// Interpret `segment` as a 1-based sequence position.
///
/// Only canonical positive integers qualify: `"1"` and `"12"` do, `"0"` and
/// `"01"` do not. Returns the 0-based offset.
pub(crate) fn sequence_offset(segment: &str) -> Option<usize> {
    if segment.starts_with('0') || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let position: usize = segment.parse().ok()?;
    position.checked_sub(1)
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for ConfigPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for ConfigPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&String> for ConfigPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<&ConfigPath> for ConfigPath {
    fn from(path: &Self) -> Self {
        path.clone()
    }
}
