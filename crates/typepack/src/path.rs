//! Diagnostic location of the value being encoded.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

/// Logical location of a value inside the structure being encoded, e.g.
/// `user.tags[2]`.
///
/// Each segment borrows its parent, so extending a path is a stack
/// allocation and never touches the parent. Paths only feed error messages;
/// they are never serialized.
///
/// ```
/// use typepack::Path;
///
/// let root = Path::root();
/// let user = root.key("user");
/// let tag = user.key("tags");
/// assert_eq!(tag.index(2).to_string(), "user.tags[2]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    parent: Option<&'a Path<'a>>,
    segment: Segment<'a>,
}

impl Default for Path<'_> {
    fn default() -> Self {
        Self::root()
    }
}

impl<'a> Path<'a> {
    /// The empty path of a top-level value.
    pub const fn root() -> Self {
        Self {
            parent: None,
            segment: Segment::Root,
        }
    }

    /// A top-level path with a caller-supplied name, such as a field path a
    /// schema layer has already rendered.
    pub const fn named(name: &'a str) -> Self {
        Self {
            parent: None,
            segment: Segment::Key(name),
        }
    }

    /// Extends the path with an object member.
    pub fn key(&'a self, key: &'a str) -> Path<'a> {
        Path {
            parent: Some(self),
            segment: Segment::Key(key),
        }
    }

    /// Extends the path with an array index.
    pub fn index(&'a self, index: usize) -> Path<'a> {
        Path {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.segment == Segment::Root
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        let own = usize::from(self.segment != Segment::Root);
        own + self.parent.map_or(0, |p| p.depth())
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parent_empty = match self.parent {
            Some(parent) => {
                parent.fmt(f)?;
                parent.is_root()
            }
            None => true,
        };
        match self.segment {
            Segment::Root => Ok(()),
            Segment::Key(key) if parent_empty => f.write_str(key),
            Segment::Key(key) => write!(f, ".{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_root());
        assert_eq!(Path::root().depth(), 0);
    }

    #[test]
    fn nested_keys_and_indices() {
        let root = Path::root();
        let a = root.key("a");
        let b = a.index(0);
        let c = b.key("c");
        assert_eq!(c.to_string(), "a[0].c");
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn index_directly_under_root() {
        let root = Path::root();
        assert_eq!(root.index(4).to_string(), "[4]");
    }

    #[test]
    fn named_root() {
        let named = Path::named("order.items");
        assert!(!named.is_root());
        assert_eq!(named.key("sku").to_string(), "order.items.sku");
    }
}
