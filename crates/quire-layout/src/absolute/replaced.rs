//! Absolutely positioned replaced elements.

use super::axis::{Axis, AxisInput, solve_replaced_axis};
use crate::box_model::Rect;
use crate::replaced::inline_replaced_box_width_height;
use crate::tree::{LayoutBox, Replacement};
use crate::values::{AutoOr, ResolvedSizes};

/// [§ 10.3.8 Absolutely positioned, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width)
///
/// "The used value of 'width' is determined as for inline replaced
/// elements." Then margins and offsets are solved on both axes, and the box
/// is moved to its final position. A replaced box has no children to lay out.
pub(super) fn absolute_replaced(
    mut node: LayoutBox,
    sizes: &ResolvedSizes,
    replacement: Replacement,
    containing_block: Rect,
) -> LayoutBox {
    let (width, height) = inline_replaced_box_width_height(sizes, replacement);
    node.width = width;
    node.height = height;
    node.padding = sizes.padding;
    node.border = sizes.border;

    let (margin_left, margin_right, left) = solve_replaced_axis(&AxisInput {
        axis: Axis::Horizontal {
            ltr: node.style.is_ltr(),
        },
        start: sizes.offsets.left,
        size: AutoOr::Length(width),
        end: sizes.offsets.right,
        margin_start: sizes.margin.left,
        margin_end: sizes.margin.right,
        decoration: sizes.horizontal_decoration(),
        cb_start: containing_block.x,
        cb_size: containing_block.width,
        static_position: node.position_x,
    });
    // [§ 10.6.5](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-height)
    let (margin_top, margin_bottom, top) = solve_replaced_axis(&AxisInput {
        axis: Axis::Vertical,
        start: sizes.offsets.top,
        size: AutoOr::Length(height),
        end: sizes.offsets.bottom,
        margin_start: sizes.margin.top,
        margin_end: sizes.margin.bottom,
        decoration: sizes.vertical_decoration(),
        cb_start: containing_block.y,
        cb_size: containing_block.height,
        static_position: node.position_y,
    });

    node.margin.left = margin_left;
    node.margin.right = margin_right;
    node.margin.top = margin_top;
    node.margin.bottom = margin_bottom;
    node.position_x = containing_block.x + left;
    node.position_y = containing_block.y + top;
    node
}
