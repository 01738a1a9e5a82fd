//! Integration tests for absolute positioning.

mod common;

use std::rc::Rc;

use common::{SHAPER, StackFlow, absolute, base_style, line, style_with, text};
use quire_layout::style::{ComputedStyle, Direction, DisplayValue, PositionType};
use quire_layout::values::{LengthPercentage, LengthPercentageOrAuto as Lpa};
use quire_layout::{
    AbsolutePlaceholder, BoxKind, BoxNode, LayoutBox, LayoutError, LayoutSession, Rect,
    Replacement, absolute_box_layout, absolute_layout, layout_fixed_boxes,
};

const CONTAINING_BLOCK: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

fn lay_out(node: LayoutBox) -> LayoutBox {
    let session = LayoutSession::new(&SHAPER, &StackFlow);
    absolute_box_layout(&session, node, CONTAINING_BLOCK).expect("absolute layout should succeed")
}

fn block(change: impl FnOnce(&mut ComputedStyle)) -> LayoutBox {
    absolute(DisplayValue::Block, change, Vec::new())
}

/// An absolute block holding one line of `content`, at a static position.
fn block_with_text(
    change: impl FnOnce(&mut ComputedStyle),
    content: &str,
    static_position: (f32, f32),
) -> LayoutBox {
    let mut node = absolute(DisplayValue::Block, change, vec![line(vec![text(content)]).into()]);
    (node.position_x, node.position_y) = static_position;
    node
}

fn image(change: impl FnOnce(&mut ComputedStyle)) -> LayoutBox {
    let style = style_with(|style| {
        style.display = DisplayValue::Block;
        style.position = PositionType::Absolute;
        change(style);
    });
    LayoutBox::new(BoxKind::Replaced(Replacement::new(80.0, 40.0)), style)
}

// ---------------------------------------------------------------------------
// Horizontal axis
//
// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
// ---------------------------------------------------------------------------

#[test]
fn test_all_auto_keeps_static_position_and_shrinks() {
    let laid_out = lay_out(block_with_text(|_| {}, "abcd", (30.0, 40.0)));
    assert_eq!((laid_out.position_x, laid_out.position_y), (30.0, 40.0));
    assert_eq!(laid_out.width, 40.0);
    assert_eq!(laid_out.height, 10.0);
}

#[test]
fn test_over_constrained_ltr_drops_right() {
    let laid_out = lay_out(block(|style| {
        style.offsets.left = Lpa::Px(10.0);
        style.width = Lpa::Px(50.0);
        style.offsets.right = Lpa::Px(10.0);
    }));
    assert_eq!(laid_out.position_x, 10.0);
    assert_eq!(laid_out.width, 50.0);
    assert_eq!(laid_out.margin.left, 0.0);
    assert_eq!(laid_out.margin.right, 30.0);
}

#[test]
fn test_over_constrained_rtl_drops_left() {
    let laid_out = lay_out(block(|style| {
        style.direction = Direction::Rtl;
        style.offsets.left = Lpa::Px(10.0);
        style.width = Lpa::Px(50.0);
        style.offsets.right = Lpa::Px(10.0);
    }));
    assert_eq!(laid_out.margin.left, 30.0);
    assert_eq!(laid_out.margin.right, 0.0);
    // The border box ends 'right' away from the containing block edge.
    assert_eq!(laid_out.position_x + laid_out.margin_width(), 90.0);
}

#[test]
fn test_right_and_width_solve_left() {
    let laid_out = lay_out(block(|style| {
        style.width = Lpa::Px(40.0);
        style.offsets.right = Lpa::Px(20.0);
    }));
    assert_eq!(laid_out.position_x, 40.0);
}

#[test]
fn test_right_with_auto_width_shrinks_to_fit() {
    let laid_out = lay_out(block_with_text(
        |style| style.offsets.right = Lpa::Px(10.0),
        "abcd",
        (30.0, 0.0),
    ));
    assert_eq!(laid_out.width, 40.0);
    assert_eq!(laid_out.position_x, 50.0);
    // The content follows the box.
    let first_line = laid_out.child_boxes().next().expect("a line");
    assert_eq!(first_line.position_x, 50.0);
}

#[test]
fn test_left_and_right_stretch_auto_width() {
    let laid_out = lay_out(block(|style| {
        style.offsets.left = Lpa::Px(10.0);
        style.offsets.right = Lpa::Px(30.0);
        style.padding.left = LengthPercentage::Px(5.0);
    }));
    assert_eq!(laid_out.position_x, 10.0);
    assert_eq!(laid_out.width, 55.0);
}

#[test]
fn test_auto_margins_center_the_box() {
    let laid_out = lay_out(block(|style| {
        style.offsets.left = Lpa::Px(0.0);
        style.offsets.right = Lpa::Px(0.0);
        style.width = Lpa::Px(40.0);
        style.margin.left = Lpa::Auto;
        style.margin.right = Lpa::Auto;
    }));
    assert_eq!(laid_out.position_x, 0.0);
    assert_eq!(laid_out.margin.left, 30.0);
    assert_eq!(laid_out.margin.right, 30.0);
}

#[test]
fn test_max_width_reruns_with_its_value() {
    let laid_out = lay_out(block(|style| {
        style.offsets.left = Lpa::Px(0.0);
        style.offsets.right = Lpa::Px(0.0);
        style.max_width = Some(LengthPercentage::Px(50.0));
    }));
    assert_eq!(laid_out.width, 50.0);
    assert_eq!(laid_out.margin.right, 50.0);
}

#[test]
fn test_min_width_wins_over_width() {
    let laid_out = lay_out(block(|style| {
        style.offsets.left = Lpa::Px(0.0);
        style.width = Lpa::Px(10.0);
        style.min_width = LengthPercentage::Px(30.0);
    }));
    assert_eq!(laid_out.width, 30.0);
}

#[test]
fn test_percentages_refer_to_containing_block() {
    let session = LayoutSession::new(&SHAPER, &StackFlow);
    let node = block(|style| {
        style.offsets.left = Lpa::Percent(10.0);
        style.width = Lpa::Percent(50.0);
        style.offsets.top = Lpa::Percent(50.0);
    });
    let laid_out = absolute_box_layout(&session, node, Rect::new(0.0, 0.0, 200.0, 100.0))
        .expect("absolute layout should succeed");
    assert_eq!(laid_out.position_x, 20.0);
    assert_eq!(laid_out.width, 100.0);
    assert_eq!(laid_out.position_y, 50.0);
}

// ---------------------------------------------------------------------------
// Vertical axis
//
// [§ 10.6.4 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
// ---------------------------------------------------------------------------

#[test]
fn test_bottom_and_height_solve_top() {
    let laid_out = lay_out(block(|style| {
        style.height = Lpa::Px(20.0);
        style.offsets.bottom = Lpa::Px(20.0);
    }));
    assert_eq!(laid_out.position_y, 60.0);
    assert_eq!(laid_out.height, 20.0);
}

#[test]
fn test_over_constrained_vertical_drops_bottom() {
    let laid_out = lay_out(block(|style| {
        style.offsets.top = Lpa::Px(10.0);
        style.height = Lpa::Px(50.0);
        style.offsets.bottom = Lpa::Px(10.0);
    }));
    assert_eq!(laid_out.position_y, 10.0);
    assert_eq!(laid_out.margin.bottom, 30.0);
}

#[test]
fn test_content_height_is_clamped_by_min_height() {
    let laid_out = lay_out(block_with_text(
        |style| {
            style.offsets.top = Lpa::Px(0.0);
            style.min_height = LengthPercentage::Px(25.0);
        },
        "ab",
        (0.0, 0.0),
    ));
    assert_eq!(laid_out.height, 25.0);
}

#[test]
fn test_bottom_with_auto_height_uses_content_height() {
    let laid_out = lay_out(block_with_text(
        |style| style.offsets.bottom = Lpa::Px(0.0),
        "ab",
        (0.0, 0.0),
    ));
    assert_eq!(laid_out.height, 10.0);
    assert_eq!(laid_out.position_y, 90.0);
}

// ---------------------------------------------------------------------------
// Replaced elements
//
// [§ 10.3.8](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width)
// ---------------------------------------------------------------------------

#[test]
fn test_replaced_box_at_static_position() {
    let mut node = image(|_| {});
    (node.position_x, node.position_y) = (5.0, 7.0);
    let laid_out = lay_out(node);
    assert_eq!((laid_out.position_x, laid_out.position_y), (5.0, 7.0));
    assert_eq!((laid_out.width, laid_out.height), (80.0, 40.0));
}

#[test]
fn test_replaced_box_anchored_right() {
    let laid_out = lay_out(image(|style| style.offsets.right = Lpa::Px(10.0)));
    assert_eq!(laid_out.position_x, 10.0);
}

#[test]
fn test_replaced_box_keeps_ratio_with_one_dimension() {
    let laid_out = lay_out(image(|style| {
        style.offsets.top = Lpa::Px(0.0);
        style.width = Lpa::Px(40.0);
    }));
    assert_eq!((laid_out.width, laid_out.height), (40.0, 20.0));
}

// ---------------------------------------------------------------------------
// Containing blocks
// ---------------------------------------------------------------------------

#[test]
fn test_absolute_child_uses_absolute_parent_padding_box() {
    let child = absolute(
        DisplayValue::Block,
        |style| {
            style.offsets.left = Lpa::Px(5.0);
            style.offsets.top = Lpa::Px(5.0);
            style.width = Lpa::Px(10.0);
            style.height = Lpa::Px(10.0);
        },
        Vec::new(),
    );
    let parent = absolute(
        DisplayValue::Block,
        |style| {
            style.offsets.left = Lpa::Px(10.0);
            style.offsets.top = Lpa::Px(10.0);
            style.width = Lpa::Px(50.0);
            style.height = Lpa::Px(50.0);
        },
        vec![child.into()],
    );
    let laid_out = lay_out(parent);

    let Some(BoxNode::Placeholder(placeholder)) = laid_out.children.first() else {
        panic!("the child should stay as a placeholder");
    };
    let child = placeholder.laid_out_box().expect("laid out with its parent");
    assert_eq!((child.position_x, child.position_y), (15.0, 15.0));
}

#[test]
fn test_fixed_boxes_use_the_viewport() {
    let session = LayoutSession::new(&SHAPER, &StackFlow);
    session.push_fixed_box(AbsolutePlaceholder::new(block(|style| {
        style.position = PositionType::Fixed;
        style.offsets.right = Lpa::Px(0.0);
        style.offsets.bottom = Lpa::Px(0.0);
        style.width = Lpa::Px(10.0);
        style.height = Lpa::Px(10.0);
    })));

    let laid_out =
        layout_fixed_boxes(&session, Rect::new(0.0, 0.0, 800.0, 600.0)).expect("fixed layout");
    assert_eq!(laid_out.len(), 1);
    assert_eq!(laid_out[0].position(), (790.0, 590.0));
    assert_eq!(session.fixed_box_count(), 0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_text_cannot_be_positioned() {
    let session = LayoutSession::new(&SHAPER, &StackFlow);
    let node = LayoutBox::text(Rc::new(base_style()), "ab");
    assert!(matches!(
        absolute_box_layout(&session, node, CONTAINING_BLOCK),
        Err(LayoutError::UnexpectedBox { .. })
    ));
}

#[test]
fn test_placeholder_is_laid_out_once() {
    let session = LayoutSession::new(&SHAPER, &StackFlow);
    let placeholder = AbsolutePlaceholder::new(block(|_| {}));
    assert!(absolute_layout(&session, &placeholder, CONTAINING_BLOCK).is_ok());
    assert!(matches!(
        absolute_layout(&session, &placeholder, CONTAINING_BLOCK),
        Err(LayoutError::PlaceholderAlreadyResolved)
    ));
}
