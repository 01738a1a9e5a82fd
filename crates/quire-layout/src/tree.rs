//! Layout tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! The box tree is built top-down before layout. Layout never mutates the
//! input tree: splitting a box produces fragments ("copy with children") that
//! share the style of the original through an `Rc`.

use std::rc::Rc;

use serde::Serialize;
use strum_macros::IntoStaticStr;

use crate::box_model::{EdgeSizes, Rect};
use crate::placeholder::AbsolutePlaceholder;
use crate::style::ComputedStyle;
use crate::text::GlyphRun;

/// Natural dimensions of replaced content such as an image.
///
/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Replacement {
    /// Intrinsic width in pixels.
    pub intrinsic_width: f32,
    /// Intrinsic height in pixels.
    pub intrinsic_height: f32,
}

impl Replacement {
    /// Replaced content with the given natural size.
    #[must_use]
    pub const fn new(intrinsic_width: f32, intrinsic_height: f32) -> Self {
        Self {
            intrinsic_width,
            intrinsic_height,
        }
    }
}

/// A run of text and the glyphs the shaper produced for it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBox {
    /// The text of this fragment.
    pub text: String,
    /// Shaped glyphs, empty until the text has been split into a line.
    pub glyphs: GlyphRun,
}

/// What a box is.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxKind {
    /// One line of an inline formatting context.
    Line,
    /// An inline box; may nest and may be split across lines.
    Inline,
    /// A run of text; the leaf of inline content.
    Text(TextBox),
    /// Inline-level replaced content, never split.
    Replaced(Replacement),
    /// An inline-level block container, never split.
    InlineBlock,
    /// A block container.
    Block,
    /// Block-level replaced content.
    BlockReplaced(Replacement),
}

impl BoxKind {
    /// Atomic inline-level boxes are laid out as a single opaque unit.
    ///
    /// [§ 2 Glossary](https://www.w3.org/TR/css-display-3/#atomic-inline)
    #[must_use]
    pub const fn is_atomic_inline(&self) -> bool {
        matches!(self, Self::Replaced(_) | Self::InlineBlock)
    }

    /// Line and inline boxes contain inline-level children.
    #[must_use]
    pub const fn is_inline_container(&self) -> bool {
        matches!(self, Self::Line | Self::Inline)
    }

    /// Kebab-case name of this kind, for errors and snapshots.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// A child slot: either a box or an out-of-flow box awaiting (or done with)
/// absolute layout.
#[derive(Debug, Clone)]
pub enum BoxNode {
    /// An ordinary child box.
    Box(LayoutBox),
    /// An absolutely positioned box. Cloning the node shares the placeholder.
    Placeholder(AbsolutePlaceholder),
}

impl BoxNode {
    /// Move this child and everything inside it.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Self::Box(child) => child.translate(dx, dy),
            Self::Placeholder(placeholder) => placeholder.translate(dx, dy),
        }
    }

    /// The box, if this is not a placeholder.
    #[must_use]
    pub const fn as_box(&self) -> Option<&LayoutBox> {
        match self {
            Self::Box(child) => Some(child),
            Self::Placeholder(_) => None,
        }
    }

    /// The box, mutably, if this is not a placeholder.
    pub const fn as_box_mut(&mut self) -> Option<&mut LayoutBox> {
        match self {
            Self::Box(child) => Some(child),
            Self::Placeholder(_) => None,
        }
    }
}

impl From<LayoutBox> for BoxNode {
    fn from(child: LayoutBox) -> Self {
        Self::Box(child)
    }
}

/// A node of the layout tree.
///
/// `position_x`/`position_y` are the top-left corner of the margin box;
/// `width`/`height` are the content box size.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// What this box is.
    pub kind: BoxKind,
    /// Computed style, shared by every fragment of the same element.
    pub style: Rc<ComputedStyle>,
    /// Left edge of the margin box.
    pub position_x: f32,
    /// Top edge of the margin box.
    pub position_y: f32,
    /// Content width.
    pub width: f32,
    /// Content height.
    pub height: f32,
    /// Used margins.
    pub margin: EdgeSizes,
    /// Used paddings.
    pub padding: EdgeSizes,
    /// Used border widths.
    pub border: EdgeSizes,
    /// Distance from the top of the margin box to the baseline.
    pub baseline: f32,
    /// Children in document order.
    pub children: Vec<BoxNode>,
    /// Whether this fragment contains the start of the element.
    pub is_start: bool,
    /// Whether this fragment contains the end of the element.
    pub is_end: bool,
    /// Whether this box wraps a table and its captions.
    pub is_table_wrapper: bool,
}

impl LayoutBox {
    /// A box with no geometry yet.
    #[must_use]
    pub const fn new(kind: BoxKind, style: Rc<ComputedStyle>) -> Self {
        Self {
            kind,
            style,
            position_x: 0.0,
            position_y: 0.0,
            width: 0.0,
            height: 0.0,
            margin: EdgeSizes::uniform(0.0),
            padding: EdgeSizes::uniform(0.0),
            border: EdgeSizes::uniform(0.0),
            baseline: 0.0,
            children: Vec::new(),
            is_start: true,
            is_end: true,
            is_table_wrapper: false,
        }
    }

    /// A box with the given children.
    #[must_use]
    pub fn with_children(kind: BoxKind, style: Rc<ComputedStyle>, children: Vec<BoxNode>) -> Self {
        let mut new_box = Self::new(kind, style);
        new_box.children = children;
        new_box
    }

    /// A text box for `text`.
    #[must_use]
    pub fn text(style: Rc<ComputedStyle>, text: impl Into<String>) -> Self {
        Self::new(
            BoxKind::Text(TextBox {
                text: text.into(),
                glyphs: GlyphRun::default(),
            }),
            style,
        )
    }

    /// The text of a text box.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            BoxKind::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Whether this box is laid out in the normal flow.
    #[must_use]
    pub fn is_in_normal_flow(&self) -> bool {
        self.style.is_in_normal_flow()
    }

    /// Width of the border box.
    #[must_use]
    pub fn border_width(&self) -> f32 {
        self.width + self.padding.horizontal() + self.border.horizontal()
    }

    /// Height of the border box.
    #[must_use]
    pub fn border_height(&self) -> f32 {
        self.height + self.padding.vertical() + self.border.vertical()
    }

    /// Width of the margin box.
    #[must_use]
    pub fn margin_width(&self) -> f32 {
        self.border_width() + self.margin.horizontal()
    }

    /// Height of the margin box.
    #[must_use]
    pub fn margin_height(&self) -> f32 {
        self.border_height() + self.margin.vertical()
    }

    /// Left edge of the content box.
    #[must_use]
    pub fn content_box_x(&self) -> f32 {
        self.position_x + self.margin.left + self.border.left + self.padding.left
    }

    /// Top edge of the content box.
    #[must_use]
    pub fn content_box_y(&self) -> f32 {
        self.position_y + self.margin.top + self.border.top + self.padding.top
    }

    /// [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "If the element has 'position: absolute', the containing block is
    /// established by the nearest ancestor with a 'position' of 'absolute',
    /// 'relative' or 'fixed' [...] formed by the padding edge of the ancestor."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        Rect {
            x: self.position_x + self.margin.left + self.border.left,
            y: self.position_y + self.margin.top + self.border.top,
            width: self.width + self.padding.horizontal(),
            height: self.height + self.padding.vertical(),
        }
    }

    /// The content box as a rectangle.
    #[must_use]
    pub fn content_box(&self) -> Rect {
        Rect::new(
            self.content_box_x(),
            self.content_box_y(),
            self.width,
            self.height,
        )
    }

    /// Move this box and all its descendants.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.position_x += dx;
        self.position_y += dy;
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }

    /// A copy of this box without its children.
    #[must_use]
    pub fn shallow_clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            style: Rc::clone(&self.style),
            position_x: self.position_x,
            position_y: self.position_y,
            width: self.width,
            height: self.height,
            margin: self.margin,
            padding: self.padding,
            border: self.border,
            baseline: self.baseline,
            children: Vec::new(),
            is_start: self.is_start,
            is_end: self.is_end,
            is_table_wrapper: self.is_table_wrapper,
        }
    }

    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    ///
    /// A fragment of this box holding `children`. Fragments that do not
    /// contain the start (or end) of the element lose the margin, border and
    /// padding of their inline-start (or inline-end) side.
    #[must_use]
    pub fn copy_with_children(&self, children: Vec<BoxNode>, is_start: bool, is_end: bool) -> Self {
        let mut new_box = self.shallow_clone();
        new_box.children = children;
        if !is_start {
            new_box.remove_decoration(self.style.is_ltr());
        }
        if !is_end {
            new_box.remove_decoration(!self.style.is_ltr());
        }
        new_box.is_start = is_start;
        new_box.is_end = is_end;
        new_box
    }

    /// Drop margin, border and padding on the left (`true`) or right side.
    pub(crate) const fn remove_decoration(&mut self, left: bool) {
        if left {
            self.margin.left = 0.0;
            self.border.left = 0.0;
            self.padding.left = 0.0;
        } else {
            self.margin.right = 0.0;
            self.border.right = 0.0;
            self.padding.right = 0.0;
        }
    }

    /// Replace every laid-out placeholder in this subtree by its box.
    ///
    /// Pending placeholders stay in place; call this once every containing
    /// block has resolved its out-of-flow descendants.
    pub fn splice_placeholders(&mut self) {
        for child in &mut self.children {
            if let BoxNode::Placeholder(placeholder) = child
                && let Some(laid_out) = placeholder.laid_out_box()
            {
                *child = BoxNode::Box(laid_out);
            }
            if let BoxNode::Box(inner) = child {
                inner.splice_placeholders();
            }
        }
    }

    /// Child boxes, skipping placeholders.
    pub fn child_boxes(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(BoxNode::as_box)
    }
}
