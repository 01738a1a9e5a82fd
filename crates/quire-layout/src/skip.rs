//! Resumable cursors into a box tree.

use serde::Serialize;

/// How far into a box (and recursively into one of its children) content has
/// already been laid out.
///
/// `Option<SkipStack>::None` means "start from the beginning". For a box with
/// children, `index` is the child to resume in and `child` is where to resume
/// inside that child. For a text box, `index` is an offset in Unicode scalar
/// values into its text and `child` is always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipStack {
    /// Child index, or character offset for a text box.
    pub index: usize,
    /// Where to resume inside the child at `index`.
    pub child: Option<Box<SkipStack>>,
}

impl SkipStack {
    /// A cursor into the child at `index`, resuming inside it at `child`.
    #[must_use]
    pub fn new(index: usize, child: Option<Self>) -> Self {
        Self {
            index,
            child: child.map(Box::new),
        }
    }

    /// A terminal cursor, either a text offset or "start of child `index`".
    #[must_use]
    pub const fn leaf(index: usize) -> Self {
        Self { index, child: None }
    }

    /// The nested cursor, if any.
    #[must_use]
    pub fn child(&self) -> Option<&Self> {
        self.child.as_deref()
    }

    /// Number of levels in this cursor.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.child().map_or(0, Self::depth)
    }
}

/// Split an optional cursor into the index to start at and the nested cursor.
#[must_use]
pub fn split_skip(skip_stack: Option<&SkipStack>) -> (usize, Option<&SkipStack>) {
    skip_stack.map_or((0, None), |stack| (stack.index, stack.child()))
}
