//! Shared helpers for the integration tests.
//!
//! [`StackFlow`] is a minimal block layout: children are stacked from the
//! top of the content box, lines through [`iter_line_boxes`], with no
//! margin collapsing and no pagination. Metrics come from [`SHAPER`], where
//! every character is as wide as the font size.

#![allow(dead_code)]

use std::rc::Rc;

use quire_layout::context::{FlowConstraints, FlowLayout, FlowOutcome, LayoutSession};
use quire_layout::style::{DisplayValue, LineHeight, PositionType};
use quire_layout::values::AutoOr;
use quire_layout::{
    AbsolutePlaceholder, ApproximateShaper, BoxKind, BoxNode, ComputedStyle, LayoutBox, Line,
    Rect, Replacement, Result, iter_line_boxes,
};

/// 10px characters for a 10px font; ascent 8px, descent 2px.
pub const SHAPER: ApproximateShaper = ApproximateShaper {
    char_width_ratio: 1.0,
    ascent_ratio: 0.8,
    descent_ratio: 0.2,
};

/// Stacks block-level children and breaks lines, nothing more.
pub struct StackFlow;

impl FlowLayout for StackFlow {
    fn block_container_layout(
        &self,
        session: &LayoutSession<'_>,
        mut block: LayoutBox,
        constraints: FlowConstraints,
        absolute_boxes: &mut Vec<AbsolutePlaceholder>,
    ) -> Result<FlowOutcome> {
        let content = block.content_box();
        let mut position_y = content.y;
        let mut children = Vec::new();

        for child in std::mem::take(&mut block.children) {
            let BoxNode::Box(mut child) = child else {
                children.push(child);
                continue;
            };
            child.position_x = content.x;

            if !child.is_in_normal_flow() {
                child.position_y = position_y;
                let placeholder = AbsolutePlaceholder::new(child);
                if placeholder.style().position == PositionType::Fixed {
                    session.push_fixed_box(placeholder.clone());
                } else {
                    absolute_boxes.push(placeholder.clone());
                }
                children.push(BoxNode::Placeholder(placeholder));
                continue;
            }

            if matches!(child.kind, BoxKind::Line) {
                let containing_block =
                    Rect::new(content.x, position_y, content.width, f32::INFINITY);
                for line in iter_line_boxes(
                    session,
                    child,
                    position_y,
                    None,
                    containing_block,
                    absolute_boxes,
                ) {
                    let line = line?;
                    position_y = line.line_box.position_y + line.line_box.height;
                    children.push(line.line_box.into());
                }
            } else {
                child.position_y = position_y;
                child.width = content.width;
                let outcome = self.block_container_layout(
                    session,
                    child,
                    FlowConstraints {
                        height: AutoOr::Auto,
                        max_position_y: constraints.max_position_y,
                        skip_stack: None,
                        page_is_empty: false,
                    },
                    absolute_boxes,
                )?;
                position_y += outcome.new_box.margin_height();
                children.push(outcome.new_box.into());
            }
        }

        block.children = children;
        block.height = match constraints.height {
            AutoOr::Length(height) => height,
            AutoOr::Auto => position_y - content.y,
        };
        Ok(FlowOutcome {
            new_box: block,
            resume_at: None,
        })
    }

    fn shrink_to_fit(
        &self,
        session: &LayoutSession<'_>,
        block: &LayoutBox,
        available_width: f32,
    ) -> Result<f32> {
        Ok(max_content_width(session, block).min(available_width.max(0.0)))
    }

    fn table_wrapper_width(
        &self,
        _session: &LayoutSession<'_>,
        _wrapper: &mut LayoutBox,
        _containing_block: (f32, f32),
        _absolute_boxes: &mut Vec<AbsolutePlaceholder>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Width of the content laid out on a single line.
fn max_content_width(session: &LayoutSession<'_>, node: &LayoutBox) -> f32 {
    match &node.kind {
        BoxKind::Text(text) => {
            session
                .shaper()
                .split_first_line(&text.text, &node.style, None)
                .width
        }
        BoxKind::Line | BoxKind::Inline => node
            .child_boxes()
            .map(|child| max_content_width(session, child))
            .sum(),
        BoxKind::Replaced(replacement) | BoxKind::BlockReplaced(replacement) => {
            replacement.intrinsic_width
        }
        _ => node
            .child_boxes()
            .map(|child| max_content_width(session, child))
            .fold(0.0, f32::max),
    }
}

/// A 10px font on 10px lines: no half-leading.
pub fn base_style() -> ComputedStyle {
    ComputedStyle {
        font_size: 10.0,
        line_height: LineHeight::Number(1.0),
        ..ComputedStyle::default()
    }
}

/// [`base_style`] with some changes.
pub fn style_with(change: impl FnOnce(&mut ComputedStyle)) -> Rc<ComputedStyle> {
    let mut style = base_style();
    change(&mut style);
    Rc::new(style)
}

/// A text box in the base style.
pub fn text(content: &str) -> BoxNode {
    LayoutBox::text(Rc::new(base_style()), content).into()
}

/// A line box holding `children`.
pub fn line(children: Vec<BoxNode>) -> LayoutBox {
    line_with(|_| {}, children)
}

/// A line box with a custom style.
pub fn line_with(change: impl FnOnce(&mut ComputedStyle), children: Vec<BoxNode>) -> LayoutBox {
    LayoutBox::with_children(BoxKind::Line, style_with(change), children)
}

/// An inline box holding `children`.
pub fn inline(change: impl FnOnce(&mut ComputedStyle), children: Vec<BoxNode>) -> BoxNode {
    LayoutBox::with_children(BoxKind::Inline, style_with(change), children).into()
}

/// An inline image with the given natural size.
pub fn image(width: f32, height: f32) -> BoxNode {
    LayoutBox::new(
        BoxKind::Replaced(Replacement::new(width, height)),
        Rc::new(base_style()),
    )
    .into()
}

/// An absolutely positioned block, written inline or as a block.
pub fn absolute(
    specified_display: DisplayValue,
    change: impl FnOnce(&mut ComputedStyle),
    children: Vec<BoxNode>,
) -> LayoutBox {
    let style = style_with(|style| {
        style.display = DisplayValue::Block;
        style.specified_display = specified_display;
        style.position = PositionType::Absolute;
        change(style);
    });
    LayoutBox::with_children(BoxKind::Block, style, children)
}

/// Every line of `line_box` in a block `width` wide at the origin.
pub fn lay_out_lines(
    session: &LayoutSession<'_>,
    line_box: LayoutBox,
    width: f32,
    absolute_boxes: &mut Vec<AbsolutePlaceholder>,
) -> Vec<Line> {
    iter_line_boxes(
        session,
        line_box,
        0.0,
        None,
        Rect::new(0.0, 0.0, width, f32::INFINITY),
        absolute_boxes,
    )
    .collect::<Result<Vec<_>>>()
    .expect("line layout should succeed")
}

/// Text of a subtree, in document order.
pub fn text_of(node: &LayoutBox) -> String {
    match node.text_content() {
        Some(content) => content.to_owned(),
        None => node.child_boxes().map(text_of).collect(),
    }
}

/// The in-flow child boxes of a line, flattened through inline boxes.
pub fn leaves(node: &LayoutBox) -> Vec<&LayoutBox> {
    if matches!(node.kind, BoxKind::Line | BoxKind::Inline) {
        node.child_boxes().flat_map(leaves).collect()
    } else {
        vec![node]
    }
}
