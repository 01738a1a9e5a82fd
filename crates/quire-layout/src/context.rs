//! Layout session and normal-flow collaborators.
//!
//! A [`LayoutSession`] is built once per layout pass and passed by reference
//! to every operation. It holds the collaborators this crate does not
//! implement (text shaping, block layout) and the per-pass caches.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::box_model::Rect;
use crate::error::Result;
use crate::placeholder::AbsolutePlaceholder;
use crate::skip::SkipStack;
use crate::style::ComputedStyle;
use crate::text::TextShaper;
use crate::tree::LayoutBox;
use crate::values::AutoOr;

/// Constraints for laying out the content of a block container.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConstraints {
    /// Used height, or 'auto' for a content-based height.
    pub height: AutoOr,
    /// Content below this position goes to the next page.
    pub max_position_y: f32,
    /// Where to resume, `None` to start from the beginning.
    pub skip_stack: Option<SkipStack>,
    /// Whether nothing has been placed on the page yet.
    pub page_is_empty: bool,
}

/// Result of laying out a block container.
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    /// The laid-out box.
    pub new_box: LayoutBox,
    /// Where to resume on the next page, `None` when everything fit.
    pub resume_at: Option<SkipStack>,
}

/// Block-level layout in normal flow.
///
/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
pub trait FlowLayout {
    /// Lay out the children of `block`, whose position, width and
    /// decorations are already set. Out-of-flow descendants whose containing
    /// block is `block` or one of its ancestors are appended to
    /// `absolute_boxes` as pending placeholders; fixed-position ones go to
    /// [`LayoutSession::push_fixed_box`].
    ///
    /// # Errors
    /// Propagates any layout error of the content.
    fn block_container_layout(
        &self,
        session: &LayoutSession<'_>,
        block: LayoutBox,
        constraints: FlowConstraints,
        absolute_boxes: &mut Vec<AbsolutePlaceholder>,
    ) -> Result<FlowOutcome>;

    /// [§ 10.3.5](https://www.w3.org/TR/CSS2/visudet.html#float-width)
    ///
    /// "min(max(preferred minimum width, available width), preferred width)"
    ///
    /// # Errors
    /// Propagates any layout error of the content.
    fn shrink_to_fit(
        &self,
        session: &LayoutSession<'_>,
        block: &LayoutBox,
        available_width: f32,
    ) -> Result<f32>;

    /// Set the width of a table wrapper from its table's column widths.
    ///
    /// # Errors
    /// Propagates any layout error of the table.
    fn table_wrapper_width(
        &self,
        session: &LayoutSession<'_>,
        wrapper: &mut LayoutBox,
        containing_block: (f32, f32),
        absolute_boxes: &mut Vec<AbsolutePlaceholder>,
    ) -> Result<()>;
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// "Each line box starts with a zero-width inline box with the element's
/// font and line height properties. We call that imaginary box a 'strut'."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strut {
    /// Height of the content area of an empty line.
    pub height: f32,
    /// Distance from the top of the content area to the baseline.
    pub baseline: f32,
}

/// State shared by every operation of one layout pass.
pub struct LayoutSession<'a> {
    shaper: &'a dyn TextShaper,
    flow: &'a dyn FlowLayout,
    struts: RefCell<HashMap<u32, Strut>>,
    fixed_boxes: RefCell<Vec<AbsolutePlaceholder>>,
    depth: Cell<usize>,
}

impl<'a> LayoutSession<'a> {
    /// A session using `shaper` for text and `flow` for block content.
    #[must_use]
    pub fn new(shaper: &'a dyn TextShaper, flow: &'a dyn FlowLayout) -> Self {
        Self {
            shaper,
            flow,
            struts: RefCell::new(HashMap::new()),
            fixed_boxes: RefCell::new(Vec::new()),
            depth: Cell::new(0),
        }
    }

    /// The text shaper.
    #[must_use]
    pub fn shaper(&self) -> &'a dyn TextShaper {
        self.shaper
    }

    /// The normal-flow collaborator.
    #[must_use]
    pub fn flow(&self) -> &'a dyn FlowLayout {
        self.flow
    }

    /// Metrics of an empty line in the font of `style`.
    ///
    /// Cached per font size, the only style input [`TextShaper`] vertical
    /// metrics may depend on. Other fields of `style` never reach the cache.
    pub fn strut(&self, style: &ComputedStyle) -> Strut {
        let key = style.font_size.to_bits();
        if let Some(strut) = self.struts.borrow().get(&key) {
            return *strut;
        }
        let line = self.shaper.split_first_line("", style, None);
        let strut = Strut {
            height: line.height,
            baseline: line.baseline,
        };
        let _ = self.struts.borrow_mut().insert(key, strut);
        strut
    }

    /// Record a fixed-position box; its containing block is the viewport.
    pub fn push_fixed_box(&self, placeholder: AbsolutePlaceholder) {
        self.fixed_boxes.borrow_mut().push(placeholder);
    }

    /// Take every fixed-position box recorded so far.
    pub fn take_fixed_boxes(&self) -> Vec<AbsolutePlaceholder> {
        self.fixed_boxes.take()
    }

    /// Number of fixed-position boxes waiting for layout.
    #[must_use]
    pub fn fixed_box_count(&self) -> usize {
        self.fixed_boxes.borrow().len()
    }

    /// Trace entry into the layout of `node`. The depth drops back when the
    /// guard goes out of scope.
    ///
    /// Output goes to `log::trace!` when the `layout-trace` feature is on.
    pub(crate) fn trace_enter(&self, operation: &str, node: &LayoutBox, area: Rect) -> DepthGuard<'_> {
        let depth = self.depth.get();
        if cfg!(feature = "layout-trace") {
            log::trace!(
                "{:indent$}{operation} {} at ({:.1}, {:.1}) in {:.1}x{:.1}",
                "",
                node.kind.name(),
                node.position_x,
                node.position_y,
                area.width,
                area.height,
                indent = depth * 2,
            );
        }
        self.depth.set(depth + 1);
        DepthGuard { depth: &self.depth }
    }
}

/// Decrements the trace depth on drop.
pub(crate) struct DepthGuard<'s> {
    depth: &'s Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::NoFlow;
    use crate::text::{ApproximateShaper, ShapedLine};

    /// Counts the lines it shapes.
    struct CountingShaper {
        calls: Cell<usize>,
    }

    impl TextShaper for CountingShaper {
        fn split_first_line(
            &self,
            text: &str,
            style: &ComputedStyle,
            available_width: Option<f32>,
        ) -> ShapedLine {
            self.calls.set(self.calls.get() + 1);
            ApproximateShaper::default().split_first_line(text, style, available_width)
        }
    }

    #[test]
    fn test_strut_is_shaped_once_per_font_size() {
        let shaper = CountingShaper {
            calls: Cell::new(0),
        };
        let session = LayoutSession::new(&shaper, &NoFlow);
        let small = ComputedStyle {
            font_size: 10.0,
            ..ComputedStyle::default()
        };
        let spaced = ComputedStyle {
            letter_spacing: 3.0,
            ..small.clone()
        };
        let large = ComputedStyle {
            font_size: 20.0,
            ..small.clone()
        };

        let first = session.strut(&small);
        assert_eq!(session.strut(&spaced), first);
        assert_eq!(shaper.calls.get(), 1);

        let larger = session.strut(&large);
        assert_eq!(shaper.calls.get(), 2);
        assert_eq!(larger.height, 2.0 * first.height);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Leaves block content alone and offers the whole available width.
    pub(crate) struct NoFlow;

    impl FlowLayout for NoFlow {
        fn block_container_layout(
            &self,
            _session: &LayoutSession<'_>,
            block: LayoutBox,
            _constraints: FlowConstraints,
            _absolute_boxes: &mut Vec<AbsolutePlaceholder>,
        ) -> Result<FlowOutcome> {
            Ok(FlowOutcome {
                new_box: block,
                resume_at: None,
            })
        }

        fn shrink_to_fit(
            &self,
            _session: &LayoutSession<'_>,
            _block: &LayoutBox,
            available_width: f32,
        ) -> Result<f32> {
            Ok(available_width)
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
}
