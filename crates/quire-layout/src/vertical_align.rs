//! Vertical alignment of inline-level boxes.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)

use crate::style::{VerticalAlign, VerticalAlignKeyword};
use crate::tree::{BoxKind, BoxNode, LayoutBox};

/// Lowest bottom and highest top of margin boxes, `None` when nothing
/// contributes.
pub type Extents = (Option<f32>, Option<f32>);

/// Fraction of the font size used as the x-height.
const X_HEIGHT_RATIO: f32 = 0.5;

fn min_opt(a: Option<f32>, b: f32) -> Option<f32> {
    Some(a.map_or(b, |a| a.min(b)))
}

fn max_opt(a: Option<f32>, b: f32) -> Option<f32> {
    Some(a.map_or(b, |a| a.max(b)))
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#phantom-line-box)
///
/// "Line boxes that contain no text, no preserved white space, no inline
/// elements with non-zero margins, padding, or borders or other in-flow
/// content [...] must be treated as zero-height line boxes."
fn is_phantom(child: &LayoutBox, children_extents: Extents) -> bool {
    children_extents.0.is_none()
        && child.margin_width() == 0.0
        // A negative margin may compensate something else.
        && child.margin.left == 0.0
        && child.margin.right == 0.0
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
///
/// Place every in-flow child of `parent` vertically, assuming the baseline
/// of `parent` is at `baseline_y`. Returns `(max_y, min_y)`, the bottom-most
/// and top-most margin edges of the children and their descendants.
///
/// Inline children are placed by setting their `position_y` and recursing
/// with their own baseline; inline-blocks are translated as a whole. Empty
/// inline boxes without horizontal decoration are phantoms: they get a zero
/// height and contribute nothing.
pub fn inline_box_verticality(parent: &mut LayoutBox, baseline_y: f32) -> Extents {
    let parent_baseline = parent.baseline;
    let parent_content_top = parent.margin.top + parent.border.top + parent.padding.top;
    let parent_height = parent.height;
    let one_ex = parent.style.font_size * X_HEIGHT_RATIO;

    let mut max_y = None;
    let mut min_y = None;
    for child in &mut parent.children {
        let BoxNode::Box(child) = child else {
            continue;
        };
        if !child.is_in_normal_flow() {
            continue;
        }

        let child_baseline_y = match child.style.vertical_align {
            VerticalAlign::Keyword(VerticalAlignKeyword::Baseline) => baseline_y,
            // "Align the vertical midpoint of the box with the baseline of
            // the parent box plus half the x-height of the parent."
            VerticalAlign::Keyword(VerticalAlignKeyword::Middle) => {
                let top = baseline_y - (one_ex + child.margin_height()) / 2.0;
                top + child.baseline
            }
            // "Align the top of the box with the top of the parent's content area"
            VerticalAlign::Keyword(VerticalAlignKeyword::TextTop | VerticalAlignKeyword::Top) => {
                let top = baseline_y - parent_baseline + parent_content_top;
                top + child.baseline
            }
            // "Align the bottom of the box with the bottom of the parent's content area"
            VerticalAlign::Keyword(
                VerticalAlignKeyword::TextBottom | VerticalAlignKeyword::Bottom,
            ) => {
                let bottom = baseline_y - parent_baseline + parent_content_top + parent_height;
                bottom - child.margin_height() + child.baseline
            }
            // "Raise (positive value) or lower (negative value) the box by this distance."
            VerticalAlign::Length(raise) => baseline_y - raise,
            VerticalAlign::Percent(pct) => {
                baseline_y - child.style.used_line_height() * pct / 100.0
            }
        };

        // The child's top is `child.baseline` above its baseline.
        let top = child_baseline_y - child.baseline;
        if matches!(child.kind, BoxKind::InlineBlock) {
            let dy = top - child.position_y;
            child.translate(0.0, dy);
        } else {
            let dy = top - child.position_y;
            child.position_y = top;
            // Absolute boxes already laid out follow the inline box that
            // contains them.
            for grandchild in &mut child.children {
                if let BoxNode::Placeholder(placeholder) = grandchild {
                    placeholder.translate(0.0, dy);
                }
            }
        }
        let bottom = top + child.margin_height();

        if matches!(child.kind, BoxKind::Inline) {
            let children_extents = inline_box_verticality(child, child_baseline_y);
            if is_phantom(child, children_extents) {
                child.position_y = child_baseline_y;
                child.height = 0.0;
                continue;
            }
            if let (Some(children_max), Some(children_min)) = children_extents {
                max_y = max_opt(max_y, children_max);
                min_y = min_opt(min_y, children_min);
            }
        }

        min_y = min_opt(min_y, top);
        max_y = max_opt(max_y, bottom);
    }
    (max_y, min_y)
}
