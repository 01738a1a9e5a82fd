//! Absolute positioning.
//!
//! [§ 9.6 Absolute positioning](https://www.w3.org/TR/CSS2/visuren.html#absolute-positioning)
//!
//! "In the absolute positioning model, a box is explicitly offset with
//! respect to its containing block. It is removed from the normal flow
//! entirely (it has no impact on later siblings)."
//!
//! Out-of-flow boxes are collected as [`AbsolutePlaceholder`]s while their
//! containing block is laid out, at their static position. Once the size and
//! position of the containing block are known, each of them is resolved
//! here, and in turn becomes the containing block of the out-of-flow boxes
//! found in its own content.

mod axis;
mod replaced;

pub use axis::{Axis, AxisInput, AxisSolution, UsedSize, solve_axis, solve_replaced_axis};

use crate::box_model::Rect;
use crate::context::{FlowConstraints, LayoutSession};
use crate::error::{LayoutError, Result};
use crate::placeholder::AbsolutePlaceholder;
use crate::tree::{BoxKind, LayoutBox};
use crate::values::{AutoOr, ResolvedSizes, clamp_min_max, resolve_percentages};

/// Lay out the box behind `placeholder` in `containing_block`, the padding
/// box of its nearest positioned ancestor (or the viewport for fixed boxes).
///
/// # Errors
/// Fails when the placeholder was already laid out, when the box is not a
/// block or a replaced element, and on any error of its content.
pub fn absolute_layout(
    session: &LayoutSession<'_>,
    placeholder: &AbsolutePlaceholder,
    containing_block: Rect,
) -> Result<()> {
    let pending = placeholder.pending_box()?;
    let laid_out = absolute_box_layout(session, pending, containing_block)?;
    log::debug!(
        "absolute {} at ({:.1}, {:.1}), {:.1}x{:.1}",
        laid_out.kind.name(),
        laid_out.position_x,
        laid_out.position_y,
        laid_out.width,
        laid_out.height,
    );
    placeholder.set_laid_out_box(laid_out);
    Ok(())
}

/// Lay out an out-of-flow box, given at its static position.
///
/// # Errors
/// Fails on box kinds that cannot be absolutely positioned and on any error
/// of the content.
pub fn absolute_box_layout(
    session: &LayoutSession<'_>,
    node: LayoutBox,
    containing_block: Rect,
) -> Result<LayoutBox> {
    let _trace = session.trace_enter("absolute", &node, containing_block);
    let sizes = resolve_percentages(&node.style, containing_block);
    match node.kind {
        BoxKind::Block | BoxKind::InlineBlock => {
            absolute_block(session, node, sizes, containing_block)
        }
        BoxKind::Replaced(replacement) | BoxKind::BlockReplaced(replacement) => Ok(
            replaced::absolute_replaced(node, &sizes, replacement, containing_block),
        ),
        _ => Err(LayoutError::UnexpectedBox {
            context: "absolute layout",
            kind: node.kind.name(),
        }),
    }
}

/// Lay out every fixed-position box recorded in the session against the
/// viewport, including the ones found while laying out the others.
///
/// # Errors
/// Stops at the first box that fails.
pub fn layout_fixed_boxes(
    session: &LayoutSession<'_>,
    viewport: Rect,
) -> Result<Vec<AbsolutePlaceholder>> {
    let mut laid_out = Vec::new();
    loop {
        let fixed_boxes = session.take_fixed_boxes();
        if fixed_boxes.is_empty() {
            return Ok(laid_out);
        }
        for placeholder in fixed_boxes {
            absolute_layout(session, &placeholder, viewport)?;
            laid_out.push(placeholder);
        }
    }
}

/// [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
/// and [§ 10.6.4](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
fn absolute_block(
    session: &LayoutSession<'_>,
    mut node: LayoutBox,
    mut sizes: ResolvedSizes,
    containing_block: Rect,
) -> Result<LayoutBox> {
    node.padding = sizes.padding;
    node.border = sizes.border;
    let cb_size = (containing_block.width, containing_block.height);
    let mut absolute_boxes = Vec::new();

    if node.is_table_wrapper {
        session
            .flow()
            .table_wrapper_width(session, &mut node, cb_size, &mut absolute_boxes)?;
        sizes.width = AutoOr::Length(node.width);
    }

    // STEP 1: Horizontal axis. The width is clamped by re-solving with
    // 'max-width', then 'min-width', as the computed 'width'.
    let horizontal = AxisInput {
        axis: Axis::Horizontal {
            ltr: node.style.is_ltr(),
        },
        start: sizes.offsets.left,
        size: sizes.width,
        end: sizes.offsets.right,
        margin_start: sizes.margin.left,
        margin_end: sizes.margin.right,
        decoration: sizes.horizontal_decoration(),
        cb_start: containing_block.x,
        cb_size: containing_block.width,
        static_position: node.position_x,
    };
    let (mut width, mut horizontal_solution) = used_width(session, &node, &horizontal)?;
    if width > sizes.max_width {
        (width, horizontal_solution) = used_width(
            session,
            &node,
            &AxisInput {
                size: AutoOr::Length(sizes.max_width),
                ..horizontal
            },
        )?;
    }
    if width < sizes.min_width {
        (width, horizontal_solution) = used_width(
            session,
            &node,
            &AxisInput {
                size: AutoOr::Length(sizes.min_width),
                ..horizontal
            },
        )?;
    }
    node.width = width.max(0.0);
    node.margin.left = horizontal_solution.margin_start;
    node.margin.right = horizontal_solution.margin_end;

    // STEP 2: Vertical axis. A height that stays 'auto' comes from the
    // content and is clamped after layout.
    let vertical = AxisInput {
        axis: Axis::Vertical,
        start: sizes.offsets.top,
        size: sizes.height,
        end: sizes.offsets.bottom,
        margin_start: sizes.margin.top,
        margin_end: sizes.margin.bottom,
        decoration: sizes.vertical_decoration(),
        cb_start: containing_block.y,
        cb_size: containing_block.height,
        static_position: node.position_y,
    };
    let mut vertical_solution = solve_axis(&vertical);
    if let UsedSize::Fixed(height) = vertical_solution.size {
        let clamped = clamp_min_max(height, sizes.min_height, sizes.max_height);
        if clamped != height {
            vertical_solution = solve_axis(&AxisInput {
                size: AutoOr::Length(clamped),
                ..vertical
            });
        }
    }
    node.margin.top = vertical_solution.margin_start;
    node.margin.bottom = vertical_solution.margin_end;
    let height = match vertical_solution.size {
        UsedSize::Fixed(height) => AutoOr::Length(height.max(0.0)),
        UsedSize::Content { .. } => AutoOr::Auto,
    };

    // STEP 3: Content, at the static position.
    let outcome = session.flow().block_container_layout(
        session,
        node,
        FlowConstraints {
            height,
            max_position_y: f32::INFINITY,
            skip_stack: None,
            page_is_empty: false,
        },
        &mut absolute_boxes,
    )?;
    let mut new_box = outcome.new_box;
    match height {
        AutoOr::Length(height) => new_box.height = height,
        AutoOr::Auto => {
            new_box.height = clamp_min_max(new_box.height, sizes.min_height, sizes.max_height);
        }
    }

    // STEP 4: Final position.
    let mut dx = horizontal_solution.translate;
    if horizontal_solution.translate_by_size {
        dx -= new_box.width;
    }
    let mut dy = vertical_solution.translate;
    if vertical_solution.translate_by_size {
        dy -= new_box.height;
    }
    new_box.translate(dx, dy);

    // STEP 5: This box is the containing block of the out-of-flow boxes
    // found in its content.
    let padding_box = new_box.padding_box();
    for placeholder in &absolute_boxes {
        absolute_layout(session, placeholder, padding_box)?;
    }

    Ok(new_box)
}

/// Solve the horizontal axis and turn a content-based width into a length.
fn used_width(
    session: &LayoutSession<'_>,
    node: &LayoutBox,
    input: &AxisInput,
) -> Result<(f32, AxisSolution)> {
    let solution = solve_axis(input);
    let width = match solution.size {
        UsedSize::Fixed(width) => width,
        UsedSize::Content { available } => {
            session.flow().shrink_to_fit(session, node, available)?
        }
    };
    Ok((width, solution))
}
