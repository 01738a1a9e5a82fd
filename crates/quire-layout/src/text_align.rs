//! Horizontal alignment and justification of line boxes.
//!
//! [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)

use std::rc::Rc;

use crate::box_model::Rect;
use crate::context::LayoutSession;
use crate::style::{Direction, TextAlign};
use crate::tree::{BoxKind, BoxNode, LayoutBox};

/// How far `line` must move right to honour 'text-align'.
///
/// "This property describes how inline-level content of a block container is
/// aligned. [...] If 'text-align' is 'justify', the user agent may stretch
/// spaces [...] in inline boxes in addition to adjusting their positions."
///
/// `last` marks the last line of a paragraph, or one that ends with a
/// preserved line break. Such a line is aligned to the start edge instead of
/// being justified. Justified lines are stretched in place and not moved.
pub fn text_align(
    session: &LayoutSession<'_>,
    line: &mut LayoutBox,
    containing_block: Rect,
    last: bool,
) -> f32 {
    let rtl = line.style.direction == Direction::Rtl;
    let mut align = match line.style.text_align {
        TextAlign::Start if rtl => TextAlign::Right,
        TextAlign::Start => TextAlign::Left,
        TextAlign::End if rtl => TextAlign::Left,
        TextAlign::End => TextAlign::Right,
        other => other,
    };
    if align == TextAlign::Justify && last {
        align = if rtl { TextAlign::Right } else { TextAlign::Left };
    }

    let offset = containing_block.width - line.width;
    match align {
        TextAlign::Justify => {
            justify_line(session, line, offset);
            0.0
        }
        TextAlign::Center => offset / 2.0,
        TextAlign::Right => offset,
        TextAlign::Left | TextAlign::Start | TextAlign::End => 0.0,
    }
}

/// Spread `extra_width` evenly over the spaces of `line`.
///
/// A line without spaces is left untouched.
pub fn justify_line(session: &LayoutSession<'_>, line: &mut LayoutBox, extra_width: f32) {
    let spaces = count_spaces(line);
    if spaces == 0 {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let extra_word_spacing = extra_width / spaces as f32;
    let _ = add_word_spacing(session, line, extra_word_spacing, 0.0);
}

/// Number of space characters in the text of this subtree.
#[must_use]
pub fn count_spaces(node: &LayoutBox) -> usize {
    match &node.kind {
        BoxKind::Text(text) => text.text.matches(' ').count(),
        BoxKind::Line | BoxKind::Inline => node.child_boxes().map(count_spaces).sum(),
        _ => 0,
    }
}

/// [§ 16.4 Spacing: the 'word-spacing' property](https://www.w3.org/TR/CSS2/text.html#spacing-props)
///
/// Add `extra_word_spacing` to every space in this subtree, shifting
/// everything by the spacing added before it. `x_advance` is the shift
/// accumulated so far; the new total is returned.
pub fn add_word_spacing(
    session: &LayoutSession<'_>,
    node: &mut LayoutBox,
    extra_word_spacing: f32,
    mut x_advance: f32,
) -> f32 {
    if matches!(node.kind, BoxKind::Text(_)) {
        node.position_x += x_advance;
        Rc::make_mut(&mut node.style).word_spacing += extra_word_spacing;
        let spaces = count_spaces(node);
        if spaces > 0 {
            let style = Rc::clone(&node.style);
            if let BoxKind::Text(text) = &mut node.kind {
                let shaped = session.shaper().split_first_line(&text.text, &style, None);
                text.glyphs = shaped.glyphs;
                node.width = shaped.width;
            }
            #[allow(clippy::cast_precision_loss)]
            {
                x_advance += extra_word_spacing * spaces as f32;
            }
        }
    } else if node.kind.is_inline_container() {
        node.position_x += x_advance;
        let previous_x_advance = x_advance;
        for child in &mut node.children {
            match child {
                BoxNode::Box(child) => {
                    x_advance = add_word_spacing(session, child, extra_word_spacing, x_advance);
                }
                BoxNode::Placeholder(placeholder) => placeholder.translate(x_advance, 0.0),
            }
        }
        node.width += x_advance - previous_x_advance;
    } else {
        // Atomic inline-level box
        node.translate(x_advance, 0.0);
    }
    x_advance
}
