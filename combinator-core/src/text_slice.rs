use std::ops::Deref;
use std::sync::Arc;

/// Immutable slice referencing a shared input buffer.
///
/// The slice keeps an `Arc<str>` alive so that parse outcomes can be freely
/// cloned and moved around without lifetime bookkeeping. It implements
/// `Deref<Target = str>`, so it is usable as `&str` in most places.
///
/// `Default` produces the empty slice; compiled fragments rely on it to
/// definitely-initialize a value symbol before any unit has assigned it.
#[derive(Clone, Debug)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }
}

impl Default for TextSlice {
    fn default() -> Self {
        Self {
            buffer: Arc::from(""),
            start: 0,
            end: 0,
        }
    }
}

impl std::fmt::Display for TextSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.deref())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.buffer[self.start..self.end]
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.deref() == *other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.deref()
    }
}

/// Slices compare by range and content, not by buffer identity, so outcomes
/// produced by independent parses of the same input compare equal.
impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.deref() == other.deref()
    }
}

impl Eq for TextSlice {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_deref_and_len() {
        let buffer: Arc<str> = Arc::from("hello world");
        let slice = TextSlice::new(Arc::clone(&buffer), 0, 5);
        assert_eq!(&*slice, "hello");
        assert_eq!(slice.len(), 5);
        assert!(!slice.is_empty());
    }

    #[test]
    fn test_slice_default_is_empty() {
        let slice = TextSlice::default();
        assert!(slice.is_empty());
        assert_eq!(slice, "");
    }

    #[test]
    fn test_slice_equality_across_buffers() {
        let a = TextSlice::new(Arc::from("if x"), 0, 2);
        let b = TextSlice::new(Arc::from("if y"), 0, 2);
        assert_eq!(a, b);
        assert_eq!(a, "if");
    }
}
