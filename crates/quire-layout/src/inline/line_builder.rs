//! Line box generation.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)

use super::split::InlineSplit;
use super::whitespace::{LineStart, remove_last_whitespace, skip_first_whitespace};
use super::InlineSplitter;
use crate::box_model::Rect;
use crate::context::LayoutSession;
use crate::error::Result;
use crate::placeholder::AbsolutePlaceholder;
use crate::positioned::relative_positioning;
use crate::skip::SkipStack;
use crate::text_align::text_align;
use crate::tree::{BoxNode, LayoutBox};
use crate::vertical_align::inline_box_verticality;

/// One laid-out line.
#[derive(Debug, Clone)]
pub struct Line {
    /// The line box, positioned, with its fragments.
    pub line_box: LayoutBox,
    /// Where the next line starts, `None` after the last line.
    pub resume_at: Option<SkipStack>,
    /// Whether the line ends on a preserved line break.
    pub preserved_line_break: bool,
}

/// Lazy iterator over the lines of an inline formatting context.
///
/// Stops after the last line or after the first error. Every [`Line`]
/// carries the skip stack of the next one, so a caller running out of room
/// can drop the iterator and restart later with [`iter_line_boxes`].
pub struct LineBoxes<'l, 's> {
    session: &'l LayoutSession<'s>,
    line_box: LayoutBox,
    position_y: f32,
    skip_stack: Option<SkipStack>,
    containing_block: Rect,
    absolute_boxes: &'l mut Vec<AbsolutePlaceholder>,
    finished: bool,
}

/// Lines of `line_box`, the first one at `position_y`, resuming from
/// `skip_stack`.
///
/// `containing_block` is the content box of the block container; absolute
/// boxes met on the way are appended to `absolute_boxes`.
pub fn iter_line_boxes<'l, 's>(
    session: &'l LayoutSession<'s>,
    line_box: LayoutBox,
    position_y: f32,
    skip_stack: Option<SkipStack>,
    containing_block: Rect,
    absolute_boxes: &'l mut Vec<AbsolutePlaceholder>,
) -> LineBoxes<'l, 's> {
    LineBoxes {
        session,
        line_box,
        position_y,
        skip_stack,
        containing_block,
        absolute_boxes,
        finished: false,
    }
}

impl Iterator for LineBoxes<'_, '_> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = get_next_linebox(
            self.session,
            &self.line_box,
            self.position_y,
            self.skip_stack.as_ref(),
            self.containing_block,
            &mut *self.absolute_boxes,
        );
        match next {
            Ok(Some(line)) => {
                self.position_y = line.line_box.position_y + line.line_box.height;
                match &line.resume_at {
                    Some(resume_at) => self.skip_stack = Some(resume_at.clone()),
                    None => self.finished = true,
                }
                Some(Ok(line))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

fn get_next_linebox(
    session: &LayoutSession<'_>,
    line_box: &LayoutBox,
    position_y: f32,
    skip_stack: Option<&SkipStack>,
    containing_block: Rect,
    absolute_boxes: &mut Vec<AbsolutePlaceholder>,
) -> Result<Option<Line>> {
    let _trace = session.trace_enter("line", line_box, containing_block);

    // [§ 16.1 Indentation](https://www.w3.org/TR/CSS2/text.html#indentation-prop)
    //
    // "'Text-indent' only affects a line if it is the first formatted line
    // of an element."
    let first_line = skip_stack.is_none();
    let mut position_x = line_box.position_x;
    if first_line {
        position_x += line_box.style.text_indent.resolve(containing_block.width);
    }

    let skip_stack = match skip_first_whitespace(line_box, skip_stack)? {
        LineStart::Exhausted => return Ok(None),
        LineStart::At(skip_stack) => skip_stack,
    };

    let mut line_placeholders = Vec::new();
    let InlineSplit {
        new_box: mut line,
        resume_at,
        preserved_line_break,
    } = InlineSplitter::new(
        session,
        containing_block,
        position_y,
        absolute_boxes,
        &mut line_placeholders,
    )
    .first_line(first_line)
    .split_inline_box(
        line_box,
        position_x,
        line_box.position_x + containing_block.width,
        skip_stack.as_ref(),
    )?;
    line.position_y = position_y;

    let _ = remove_last_whitespace(session, &mut line);

    let (max_y, min_y) = inline_box_verticality(&mut line, 0.0);
    let last = resume_at.is_none() || preserved_line_break;
    let offset_x = text_align(session, &mut line, containing_block, last);

    let strut_height = line.style.used_line_height();
    let offset_y = if let (Some(bottom), Some(top)) = (max_y, min_y) {
        line.baseline = -top;
        line.position_y = top;
        line.height = (bottom - top).max(strut_height);
        position_y - top
    } else if preserved_line_break {
        // An empty line ended by a forced break keeps its strut.
        line.height += line.margin.top + line.margin.bottom;
        0.0
    } else {
        line.height = 0.0;
        line.baseline = 0.0;
        0.0
    };
    line.margin.top = 0.0;
    line.margin.bottom = 0.0;
    line.translate(offset_x, offset_y);

    // [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
    //
    // The static position of an out-of-flow box is where it would have been
    // in the normal flow: on this line when it is inline-level, at the start
    // of the next line otherwise.
    for placeholder in &line_placeholders {
        if placeholder.is_laid_out() {
            continue;
        }
        let (x, y) = placeholder.position();
        if placeholder.style().specified_display.is_inline_level() {
            placeholder.translate(0.0, position_y - y);
        } else {
            placeholder.translate(line_box.position_x - x, position_y + line.height - y);
        }
    }

    // The line box itself never moves.
    for child in &mut line.children {
        if let BoxNode::Box(child) = child {
            relative_positioning(child, containing_block);
        }
    }

    Ok(Some(Line {
        line_box: line,
        resume_at,
        preserved_line_break,
    }))
}
