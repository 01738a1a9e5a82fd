//! Atomic inline-level boxes: inline replaced elements and inline-blocks.
//!
//! [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
//! [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)

use crate::box_model::Rect;
use crate::context::{FlowConstraints, LayoutSession};
use crate::error::{LayoutError, Result};
use crate::placeholder::AbsolutePlaceholder;
use crate::replaced::inline_replaced_box_width_height;
use crate::skip::SkipStack;
use crate::style::Overflow;
use crate::tree::{BoxKind, BoxNode, LayoutBox};
use crate::values::{AutoOr, clamp_min_max, resolve_percentages};

/// Lay out an atomic inline-level box in one piece.
pub(super) fn atomic_box(
    session: &LayoutSession<'_>,
    node: &LayoutBox,
    position_x: f32,
    skip_stack: Option<&SkipStack>,
    containing_block: Rect,
    absolute_boxes: &mut Vec<AbsolutePlaceholder>,
) -> Result<LayoutBox> {
    match &node.kind {
        BoxKind::Replaced(replacement) => {
            if skip_stack.is_some() {
                return Err(LayoutError::MalformedSkipStack {
                    context: "replaced",
                });
            }
            let sizes = resolve_percentages(&node.style, containing_block);
            let mut new_box = node.shallow_clone();
            // "A computed value of 'auto' for 'margin-left' or 'margin-right'
            // becomes a used value of '0'."
            new_box.margin = sizes.margin.auto_to_zero();
            new_box.padding = sizes.padding;
            new_box.border = sizes.border;
            (new_box.width, new_box.height) = inline_replaced_box_width_height(&sizes, *replacement);
            // The bottom margin edge sits on the baseline.
            new_box.baseline = new_box.margin_height();
            Ok(new_box)
        }
        BoxKind::InlineBlock => inline_block_box_layout(
            session,
            node,
            position_x,
            skip_stack,
            containing_block,
            absolute_boxes,
        ),
        other => Err(LayoutError::UnexpectedBox {
            context: "atomic inline",
            kind: other.name(),
        }),
    }
}

fn inline_block_box_layout(
    session: &LayoutSession<'_>,
    node: &LayoutBox,
    position_x: f32,
    skip_stack: Option<&SkipStack>,
    containing_block: Rect,
    absolute_boxes: &mut Vec<AbsolutePlaceholder>,
) -> Result<LayoutBox> {
    let _trace = session.trace_enter("inline_block", node, containing_block);
    let sizes = resolve_percentages(&node.style, containing_block);
    let mut block = node.clone();
    block.margin = sizes.margin.auto_to_zero();
    block.padding = sizes.padding;
    block.border = sizes.border;

    if block.is_table_wrapper {
        session.flow().table_wrapper_width(
            session,
            &mut block,
            (containing_block.width, containing_block.height),
            absolute_boxes,
        )?;
    } else {
        // "If 'width' is 'auto', the used value is the shrink-to-fit width
        // as for floating elements."
        let width = match sizes.width {
            AutoOr::Length(width) => width,
            AutoOr::Auto => {
                let available = containing_block.width
                    - block.margin.horizontal()
                    - sizes.horizontal_decoration();
                session.flow().shrink_to_fit(session, &block, available)?.max(0.0)
            }
        };
        block.width = clamp_min_max(width, sizes.min_width, sizes.max_width);
    }

    block.position_x = position_x;
    block.position_y = 0.0;
    let outcome = session.flow().block_container_layout(
        session,
        block,
        FlowConstraints {
            height: sizes.height,
            max_position_y: f32::INFINITY,
            skip_stack: skip_stack.cloned(),
            page_is_empty: true,
        },
        absolute_boxes,
    )?;
    let mut new_box = outcome.new_box;
    new_box.baseline = inline_block_baseline(&new_box);
    Ok(new_box)
}

/// [§ 10.8.1](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
///
/// "The baseline of an 'inline-block' is the baseline of its last line box
/// in the normal flow, unless it has either no in-flow line boxes or if its
/// 'overflow' property has a computed value other than 'visible', in which
/// case the baseline is the bottom margin edge."
///
/// Measured from the top of the margin box.
#[must_use]
pub fn inline_block_baseline(node: &LayoutBox) -> f32 {
    if node.style.overflow == Overflow::Visible
        && let Some(baseline) = find_in_flow_baseline(node, true)
    {
        return baseline - node.position_y;
    }
    node.margin_height()
}

/// Absolute position of the first (or `last`) in-flow line baseline inside
/// `node`.
#[must_use]
pub fn find_in_flow_baseline(node: &LayoutBox, last: bool) -> Option<f32> {
    match node.kind {
        BoxKind::Line => Some(node.position_y + node.baseline),
        BoxKind::Block | BoxKind::InlineBlock => {
            let mut children = node
                .children
                .iter()
                .filter_map(BoxNode::as_box)
                .filter(|child| child.is_in_normal_flow());
            if last {
                children.rev().find_map(|child| find_in_flow_baseline(child, last))
            } else {
                children.find_map(|child| find_in_flow_baseline(child, last))
            }
        }
        _ => None,
    }
}
