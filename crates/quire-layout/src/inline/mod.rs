//! Inline formatting: line breaking and layout of inline-level boxes.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. [...] The
//! rectangular area that contains the boxes that form a line is called a
//! line box."
//!
//! "When an inline box exceeds the width of a line box, it is split into
//! several boxes and these boxes are distributed across several line boxes."
//!
//! Every split returns a [`SkipStack`] that resumes exactly where the line
//! ended, so that pagination can stop and restart line generation at will.

mod atomic;
mod line_builder;
mod split;
mod whitespace;

pub use atomic::{find_in_flow_baseline, inline_block_baseline};
pub use line_builder::{Line, LineBoxes, iter_line_boxes};
pub use split::{InlineSplit, TextSplit, split_text_box};
pub use whitespace::{LineStart, remove_last_whitespace, skip_first_whitespace};

use crate::box_model::Rect;
use crate::context::LayoutSession;
use crate::error::{LayoutError, Result};
use crate::placeholder::AbsolutePlaceholder;
use crate::skip::SkipStack;
use crate::tree::{BoxKind, LayoutBox};

/// Result of fitting an inline-level box into the rest of a line.
#[derive(Debug, Clone)]
pub struct Split {
    /// The part that fits, `None` when an empty text box produced nothing.
    pub new_box: Option<LayoutBox>,
    /// Where the next line resumes inside the box, `None` when all of it fit.
    pub resume_at: Option<SkipStack>,
    /// Whether the line ends on a preserved line break rather than a wrap.
    pub preserved_line_break: bool,
}

/// Fits inline-level content into lines.
///
/// Holds what stays the same for every box of one line: the containing
/// block, the top of the line, and the lists out-of-flow boxes go to.
pub struct InlineSplitter<'l, 's> {
    session: &'l LayoutSession<'s>,
    containing_block: Rect,
    position_y: f32,
    absolute_boxes: &'l mut Vec<AbsolutePlaceholder>,
    line_placeholders: &'l mut Vec<AbsolutePlaceholder>,
    first_line: bool,
}

impl<'l, 's> InlineSplitter<'l, 's> {
    /// A splitter for the line starting at `position_y`.
    ///
    /// Absolutely positioned boxes met on the line are appended to
    /// `absolute_boxes` (unless a relatively positioned inline box is their
    /// containing block); all out-of-flow boxes, fixed ones included, are
    /// appended to `line_placeholders` so their static position can be
    /// fixed once the line is placed.
    pub fn new(
        session: &'l LayoutSession<'s>,
        containing_block: Rect,
        position_y: f32,
        absolute_boxes: &'l mut Vec<AbsolutePlaceholder>,
        line_placeholders: &'l mut Vec<AbsolutePlaceholder>,
    ) -> Self {
        Self {
            session,
            containing_block,
            position_y,
            absolute_boxes,
            line_placeholders,
            first_line: false,
        }
    }

    /// Mark the line as the first one of its box.
    ///
    /// The skip stack of a first line only crosses leading collapsible
    /// spaces, so the boxes it enters still get their start decoration.
    #[must_use]
    pub const fn first_line(mut self, first_line: bool) -> Self {
        self.first_line = first_line;
        self
    }

    /// Fit as much content as possible from an inline-level box between
    /// `position_x` and `max_x`.
    ///
    /// The new box is non-empty (unless the box is empty) and as big as
    /// possible while staying narrower than the available width. It may
    /// overflow when no split is possible.
    ///
    /// # Errors
    /// Fails on block-level boxes and on skip stacks that do not match the
    /// shape of `node`.
    pub fn split_inline_level(
        &mut self,
        node: &LayoutBox,
        position_x: f32,
        max_x: f32,
        skip_stack: Option<&SkipStack>,
    ) -> Result<Split> {
        match &node.kind {
            BoxKind::Text(_) => {
                let skip = match skip_stack {
                    None => 0,
                    Some(SkipStack { index, child: None }) => *index,
                    Some(_) => return Err(LayoutError::MalformedSkipStack { context: "text" }),
                };
                let split = split_text_box(self.session, node, max_x - position_x, skip)?;
                let new_box = split.new_box.map(|mut text| {
                    text.position_x = position_x;
                    text.position_y = self.position_y;
                    text
                });
                Ok(Split {
                    new_box,
                    resume_at: split.resume_at.map(SkipStack::leaf),
                    preserved_line_break: split.preserved_line_break,
                })
            }
            BoxKind::Inline => {
                let split = self.split_inline_box(node, position_x, max_x, skip_stack)?;
                Ok(Split {
                    new_box: Some(split.new_box),
                    resume_at: split.resume_at,
                    preserved_line_break: split.preserved_line_break,
                })
            }
            BoxKind::Replaced(_) | BoxKind::InlineBlock => {
                let mut new_box = atomic::atomic_box(
                    self.session,
                    node,
                    position_x,
                    skip_stack,
                    self.containing_block,
                    self.absolute_boxes,
                )?;
                new_box.position_x = position_x;
                Ok(Split {
                    new_box: Some(new_box),
                    resume_at: None,
                    preserved_line_break: false,
                })
            }
            other => Err(LayoutError::UnexpectedBox {
                context: "inline content",
                kind: other.name(),
            }),
        }
    }
}
