//! Collapsible whitespace at the start and end of lines.
//!
//! [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
//!
//! "As each line is laid out, [...] If a space (U+0020) at the beginning of a
//! line has 'white-space' set to 'normal', 'nowrap', or 'pre-line', it is
//! removed. [...] If a space (U+0020) at the end of a line has 'white-space'
//! set to 'normal', 'nowrap', or 'pre-line', it is also removed."

use std::rc::Rc;

use crate::context::LayoutSession;
use crate::error::{LayoutError, Result};
use crate::skip::{SkipStack, split_skip};
use crate::text::GlyphRun;
use crate::tree::{BoxKind, BoxNode, LayoutBox};

/// Where a line really starts once leading spaces are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStart {
    /// Only collapsible spaces are left: there is no further line.
    Exhausted,
    /// Start at this cursor, `None` meaning the very beginning.
    At(Option<SkipStack>),
}

/// Skip the collapsible spaces at the start of `node`, from `skip_stack`.
///
/// # Errors
/// Fails when the skip stack does not match the shape of `node`.
pub fn skip_first_whitespace(node: &LayoutBox, skip_stack: Option<&SkipStack>) -> Result<LineStart> {
    let (index, next_skip) = split_skip(skip_stack);

    if let BoxKind::Text(text_box) = &node.kind {
        let length = text_box.text.chars().count();
        if next_skip.is_some() || index > length {
            return Err(LayoutError::MalformedSkipStack { context: "text" });
        }
        let mut start = index;
        if node.style.white_space.collapses_spaces() {
            start += text_box
                .text
                .chars()
                .skip(index)
                .take_while(|&ch| ch == ' ')
                .count();
        }
        return Ok(match start {
            _ if start == length => LineStart::Exhausted,
            0 => LineStart::At(None),
            _ => LineStart::At(Some(SkipStack::leaf(start))),
        });
    }

    if !node.kind.is_inline_container() {
        if skip_stack.is_some() {
            return Err(LayoutError::MalformedSkipStack {
                context: "atomic inline",
            });
        }
        return Ok(LineStart::At(None));
    }

    if index > node.children.len() {
        return Err(LayoutError::MalformedSkipStack {
            context: "inline box",
        });
    }
    if node.children.is_empty() {
        // An empty inline box is content of its own, once.
        return Ok(if index == 0 {
            LineStart::At(None)
        } else {
            LineStart::Exhausted
        });
    }

    let mut child_skip = next_skip;
    for (child_index, child) in node.children.iter().enumerate().skip(index) {
        let start = match child {
            BoxNode::Box(child) if child.is_in_normal_flow() => {
                skip_first_whitespace(child, child_skip.take())?
            }
            _ => LineStart::At(child_skip.take().cloned()),
        };
        if let LineStart::At(inner) = start {
            let cursor = if child_index == 0 && inner.is_none() {
                None
            } else {
                Some(SkipStack::new(child_index, inner))
            };
            return Ok(LineStart::At(cursor));
        }
    }
    Ok(LineStart::Exhausted)
}

/// Remove the collapsible spaces at the end of the last text of `node`,
/// shrinking every box on the way. Returns the width removed.
pub fn remove_last_whitespace(session: &LayoutSession<'_>, node: &mut LayoutBox) -> f32 {
    if node.kind.is_inline_container() {
        let Some(last) = node.children.iter_mut().rev().find_map(BoxNode::as_box_mut) else {
            return 0.0;
        };
        let removed = remove_last_whitespace(session, last);
        node.width -= removed;
        return removed;
    }

    let style = Rc::clone(&node.style);
    let BoxKind::Text(text_box) = &mut node.kind else {
        return 0.0;
    };
    if !style.white_space.collapses_spaces() {
        return 0.0;
    }
    let trimmed_length = text_box.text.trim_end_matches(' ').len();
    if trimmed_length == text_box.text.len() {
        return 0.0;
    }

    let previous_width = node.width;
    text_box.text.truncate(trimmed_length);
    if text_box.text.is_empty() {
        text_box.glyphs = GlyphRun::default();
        node.width = 0.0;
    } else {
        let shaped = session.shaper().split_first_line(&text_box.text, &style, None);
        text_box.glyphs = shaped.glyphs;
        node.width = shaped.width;
    }
    previous_width - node.width
}
