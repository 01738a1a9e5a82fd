//! Splitting inline boxes and text runs at the end of a line.

use std::mem;
use std::rc::Rc;

use super::InlineSplitter;
use crate::absolute::absolute_layout;
use crate::context::LayoutSession;
use crate::error::{LayoutError, Result};
use crate::placeholder::AbsolutePlaceholder;
use crate::skip::{SkipStack, split_skip};
use crate::style::PositionType;
use crate::text::{byte_to_char_offsets, char_to_byte_offset};
use crate::tree::{BoxKind, BoxNode, LayoutBox, TextBox};
use crate::values::resolve_percentages;

/// Result of splitting a line box or an inline box.
#[derive(Debug, Clone)]
pub struct InlineSplit {
    /// The fragment that fits on the current line.
    pub new_box: LayoutBox,
    /// Where the next fragment starts, `None` when the box is exhausted.
    pub resume_at: Option<SkipStack>,
    /// Whether the fragment ends on a preserved line break.
    pub preserved_line_break: bool,
}

/// Result of splitting a text box. Offsets count characters of the whole
/// text, not of the part that was split.
#[derive(Debug, Clone)]
pub struct TextSplit {
    /// The text on the current line, `None` when nothing is left to show.
    pub new_box: Option<LayoutBox>,
    /// Character offset of the next line.
    pub resume_at: Option<usize>,
    /// Whether the line ends on a preserved line break.
    pub preserved_line_break: bool,
}

/// Children fitted into one fragment of an inline box.
struct FittedChildren {
    children: Vec<BoxNode>,
    position_x: f32,
    resume_at: Option<SkipStack>,
    preserved_line_break: bool,
}

impl InlineSplitter<'_, '_> {
    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    ///
    /// Fit as many children of a line box or inline box as possible between
    /// `position_x` and `max_x`.
    ///
    /// A child that would overflow is pushed whole to the next line, unless
    /// it is the first one: a line always makes progress.
    pub(super) fn split_inline_box(
        &mut self,
        node: &LayoutBox,
        position_x: f32,
        max_x: f32,
        skip_stack: Option<&SkipStack>,
    ) -> Result<InlineSplit> {
        if !node.kind.is_inline_container() {
            return Err(LayoutError::UnexpectedBox {
                context: "inline box",
                kind: node.kind.name(),
            });
        }
        let session = self.session;
        let _trace = session.trace_enter("split_inline_box", node, self.containing_block);

        let is_start = skip_stack.is_none() || self.first_line;
        let ltr = node.style.is_ltr();
        let initial_position_x = position_x;

        // STEP 1: Resolve the decoration of the box.
        let sizes = resolve_percentages(&node.style, self.containing_block);
        let mut decorated = node.shallow_clone();
        decorated.margin = sizes.margin.auto_to_zero();
        decorated.padding = sizes.padding;
        decorated.border = sizes.border;
        let left_decoration =
            decorated.margin.left + decorated.border.left + decorated.padding.left;

        // In ltr the left side only exists on the first fragment. In rtl it
        // is the end side, unknown until the children are split.
        let left_spacing = if ltr && !is_start { 0.0 } else { left_decoration };

        // STEP 2: Split the children. A relatively positioned box is the
        // containing block of the absolute boxes found inside it.
        let relative =
            matches!(node.kind, BoxKind::Inline) && node.style.position == PositionType::Relative;
        let outer_absolute_boxes = if relative {
            Some(mem::take(&mut *self.absolute_boxes))
        } else {
            None
        };
        let fitted = self.fit_children(node, position_x + left_spacing, max_x, skip_stack);
        let own_absolute_boxes = match outer_absolute_boxes {
            Some(outer) => mem::replace(&mut *self.absolute_boxes, outer),
            None => Vec::new(),
        };
        let FittedChildren {
            mut children,
            position_x: end_x,
            resume_at,
            preserved_line_break,
        } = fitted?;
        let is_end = resume_at.is_none();

        // STEP 3: Build the fragment.
        if !ltr && !is_end {
            for child in &mut children {
                child.translate(-left_decoration, 0.0);
            }
        }
        let mut new_box = decorated.copy_with_children(children, is_start, is_end);
        if matches!(node.kind, BoxKind::Line) {
            new_box.width = end_x - new_box.position_x;
        } else {
            new_box.position_x = initial_position_x;
            new_box.position_y = self.position_y;
            let end_x = if !ltr && !is_end {
                end_x - left_decoration
            } else {
                end_x
            };
            new_box.width = end_x - new_box.content_box_x();
        }

        // STEP 4: The strut. The margin box of an inline box is exactly one
        // line high, the content area is the height of the font.
        //
        // [§ 10.8.1](https://www.w3.org/TR/CSS2/visudet.html#leading)
        let strut = session.strut(&new_box.style);
        let half_leading = (new_box.style.used_line_height() - strut.height) / 2.0;
        new_box.height = strut.height;
        new_box.margin.top = half_leading - new_box.border.top - new_box.padding.top;
        new_box.margin.bottom = half_leading - new_box.border.bottom - new_box.padding.bottom;
        new_box.baseline = strut.baseline + half_leading;

        // STEP 5: Absolute boxes positioned against this fragment.
        if relative {
            let containing_block = new_box.padding_box();
            for placeholder in &own_absolute_boxes {
                absolute_layout(session, placeholder, containing_block)?;
            }
        }

        Ok(InlineSplit {
            new_box,
            resume_at,
            preserved_line_break,
        })
    }

    fn fit_children(
        &mut self,
        node: &LayoutBox,
        start_x: f32,
        max_x: f32,
        skip_stack: Option<&SkipStack>,
    ) -> Result<FittedChildren> {
        let (skip, mut child_skip) = split_skip(skip_stack);
        if skip > node.children.len() {
            return Err(LayoutError::MalformedSkipStack {
                context: "inline box",
            });
        }

        let mut position_x = start_x;
        let mut children = Vec::new();
        let mut resume_at = None;
        let mut preserved_line_break = false;

        for (index, child) in node.children.iter().enumerate().skip(skip) {
            let child_skip_stack = child_skip.take();
            let BoxNode::Box(child) = child else {
                return Err(LayoutError::UnexpectedBox {
                    context: "inline box",
                    kind: "placeholder",
                });
            };

            if !child.is_in_normal_flow() {
                children.push(BoxNode::Placeholder(self.out_of_flow(child, position_x)));
                continue;
            }

            let split = self.split_inline_level(child, position_x, max_x, child_skip_stack)?;
            let Some(new_child) = split.new_box else {
                if let Some(child_resume) = split.resume_at {
                    resume_at = Some(SkipStack::new(index, Some(child_resume)));
                    break;
                }
                continue;
            };

            let new_position_x = new_child.position_x + new_child.margin_width();
            if new_position_x > max_x && !children.is_empty() {
                // Too wide: the whole child goes to the next line.
                resume_at = Some(SkipStack::new(index, child_skip_stack.cloned()));
                break;
            }

            position_x = new_position_x;
            preserved_line_break = split.preserved_line_break;
            children.push(new_child.into());
            if let Some(child_resume) = split.resume_at {
                resume_at = Some(SkipStack::new(index, Some(child_resume)));
                break;
            }
        }

        Ok(FittedChildren {
            children,
            position_x,
            resume_at,
            preserved_line_break,
        })
    }

    /// A placeholder for an out-of-flow child, at the current pen position.
    fn out_of_flow(&mut self, child: &LayoutBox, position_x: f32) -> AbsolutePlaceholder {
        let mut pending = child.clone();
        pending.position_x = position_x;
        pending.position_y = self.position_y;
        let placeholder = AbsolutePlaceholder::new(pending);
        self.line_placeholders.push(placeholder.clone());
        if child.style.position == PositionType::Fixed {
            self.session.push_fixed_box(placeholder.clone());
        } else {
            self.absolute_boxes.push(placeholder.clone());
        }
        placeholder
    }
}

/// Fit as much of a text box as possible in `available_width`, starting
/// `skip` characters into its text.
///
/// The new box gets the half-leading as vertical margins, so that its
/// margin box is exactly one line high.
///
/// # Errors
/// Fails when `skip` is past the end of the text, and when the shaper breaks
/// its contract: offsets inside a character, no progress, or characters
/// skipped between two lines that are not a line break.
pub fn split_text_box(
    session: &LayoutSession<'_>,
    node: &LayoutBox,
    available_width: f32,
    skip: usize,
) -> Result<TextSplit> {
    let BoxKind::Text(text_box) = &node.kind else {
        return Err(LayoutError::UnexpectedBox {
            context: "text",
            kind: node.kind.name(),
        });
    };
    let start = char_to_byte_offset(&text_box.text, skip)
        .ok_or(LayoutError::MalformedSkipStack { context: "text" })?;
    let text = &text_box.text[start..];

    if node.style.font_size == 0.0 || text.is_empty() {
        return Ok(TextSplit {
            new_box: None,
            resume_at: None,
            preserved_line_break: false,
        });
    }

    let shaped = session
        .shaper()
        .split_first_line(text, &node.style, Some(available_width));
    let offsets = byte_to_char_offsets(text, shaped.length, shaped.resume_at)?;
    if offsets.resume_at == Some(0) {
        return Err(LayoutError::NoProgress {
            text: text.to_owned(),
        });
    }

    let preserved_line_break = offsets.resume_at.is_some() && !offsets.between.is_empty();
    if preserved_line_break && offsets.between != "\n" && offsets.between != "\u{2029}" {
        return Err(LayoutError::UnexpectedLineBreak {
            found: offsets.between,
        });
    }

    let half_leading = (node.style.used_line_height() - shaped.height) / 2.0;
    let mut new_box = LayoutBox::new(
        BoxKind::Text(TextBox {
            text: offsets.line,
            glyphs: shaped.glyphs,
        }),
        Rc::clone(&node.style),
    );
    new_box.width = shaped.width;
    new_box.height = shaped.height;
    new_box.margin.top = half_leading;
    new_box.margin.bottom = half_leading;
    new_box.baseline = shaped.baseline + half_leading;
    new_box.is_start = skip == 0;
    new_box.is_end = offsets.resume_at.is_none();

    Ok(TextSplit {
        new_box: Some(new_box),
        resume_at: offsets.resume_at.map(|resume_at| resume_at + skip),
        preserved_line_break,
    })
}
