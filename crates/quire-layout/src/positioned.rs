//! Relative positioning.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
//!
//! "In CSS 2, a box may be laid out according to three positioning schemes:
//! [...] Normal flow. In CSS 2, normal flow includes block formatting of
//! block-level boxes, inline formatting of inline-level boxes, and relative
//! positioning of block-level and inline-level boxes."
//!
//! Absolute positioning lives in [`crate::absolute`].

use crate::box_model::Rect;
use crate::style::{ComputedStyle, PositionType};
use crate::tree::{BoxNode, LayoutBox};
use crate::values::AutoOr;

/// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
///
/// "Once a box has been laid out according to the normal flow, it may be
/// shifted relative to its normal position."
///
/// Returns the `(dx, dy)` shift of a relatively positioned box, with
/// percentages resolved against `containing_block`.
#[must_use]
pub fn relative_offset(style: &ComputedStyle, containing_block: Rect) -> (f32, f32) {
    let left = style.offsets.left.resolve(containing_block.width);
    let right = style.offsets.right.resolve(containing_block.width);
    let top = style.offsets.top.resolve(containing_block.height);
    let bottom = style.offsets.bottom.resolve(containing_block.height);

    // "If both 'left' and 'right' are 'auto', the used values are both 0."
    //
    // "If 'left' is 'auto', its used value is minus the value of 'right'."
    //
    // "If neither 'left' nor 'right' is 'auto', the position is
    //  over-constrained, and one of them has to be ignored. If the
    //  'direction' property of the containing block is 'ltr', the value
    //  of 'left' wins and 'right' becomes -'left'. If 'direction' of the
    //  containing block is 'rtl', 'right' wins and 'left' is ignored."
    let offset_x = match (left, right) {
        (AutoOr::Auto, AutoOr::Auto) => 0.0,
        (AutoOr::Length(left), AutoOr::Auto) => left,
        (AutoOr::Auto, AutoOr::Length(right)) => -right,
        (AutoOr::Length(left), AutoOr::Length(right)) => {
            if style.is_ltr() {
                left
            } else {
                -right
            }
        }
    };

    // "If neither is 'auto', 'bottom' is ignored (i.e., the used value
    //  of 'bottom' will be minus the value of 'top')."
    let offset_y = match (top, bottom) {
        (AutoOr::Auto, AutoOr::Auto) => 0.0,
        (AutoOr::Length(top), _) => top,
        (AutoOr::Auto, AutoOr::Length(bottom)) => -bottom,
    };

    (offset_x, offset_y)
}

/// Shift `node` if it is relatively positioned, then do the same for the
/// inline-level boxes inside it. Placeholders are left alone: out-of-flow
/// boxes follow their containing block, not their parent.
pub fn relative_positioning(node: &mut LayoutBox, containing_block: Rect) {
    if node.style.position == PositionType::Relative {
        let (dx, dy) = relative_offset(&node.style, containing_block);
        node.translate(dx, dy);
    }
    if node.kind.is_inline_container() {
        for child in &mut node.children {
            if let BoxNode::Box(child) = child {
                relative_positioning(child, containing_block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Direction, Sides};
    use crate::values::LengthPercentageOrAuto;

    fn offsets(left: LengthPercentageOrAuto, right: LengthPercentageOrAuto) -> ComputedStyle {
        ComputedStyle {
            position: PositionType::Relative,
            offsets: Sides {
                top: LengthPercentageOrAuto::Px(3.0),
                right,
                bottom: LengthPercentageOrAuto::Px(100.0),
                left,
            },
            ..ComputedStyle::default()
        }
    }

    #[test]
    fn test_left_wins_in_ltr_and_top_wins() {
        let style = offsets(LengthPercentageOrAuto::Px(10.0), LengthPercentageOrAuto::Px(20.0));
        assert_eq!(relative_offset(&style, Rect::default()), (10.0, 3.0));
    }

    #[test]
    fn test_right_wins_in_rtl() {
        let style = ComputedStyle {
            direction: Direction::Rtl,
            ..offsets(LengthPercentageOrAuto::Px(10.0), LengthPercentageOrAuto::Px(20.0))
        };
        assert_eq!(relative_offset(&style, Rect::default()).0, -20.0);
    }

    #[test]
    fn test_percentages_use_containing_block() {
        let style = offsets(LengthPercentageOrAuto::Percent(10.0), LengthPercentageOrAuto::Auto);
        let cb = Rect::new(0.0, 0.0, 300.0, 100.0);
        assert_eq!(relative_offset(&style, cb), (30.0, 3.0));
    }
}
