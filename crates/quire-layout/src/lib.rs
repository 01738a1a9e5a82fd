//! Inline formatting and absolute positioning for the Quire paged layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Absolute positioning** ([§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width),
//!   [§ 10.6.4](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height))
//!   - Constraint resolution of offsets, size and margins on both axes
//!   - Replaced elements ([§ 10.3.8](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width))
//!   - Deferred layout through shared placeholders
//!
//! - **Line boxes** ([§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting))
//!   - Restartable line breaking driven by skip stacks
//!   - Splitting of inline boxes and text runs
//!   - Atomic inline-level boxes (inline replaced elements, inline-blocks)
//!   - Collapsible whitespace at line edges
//!
//! - **Line height** ([§ 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height))
//!   - Struts, half-leading and 'vertical-align'
//!   - Phantom line boxes
//!
//! - **Text alignment** ([§ 16.2](https://www.w3.org/TR/CSS2/text.html#alignment-prop))
//!   - 'text-align', 'text-indent' and justification through word spacing
//!
//! - **Relative positioning** ([§ 9.4.3](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning))
//!
//! Block layout and text shaping are collaborators: see [`FlowLayout`] and
//! [`TextShaper`].
//!
//! # Not Yet Implemented
//!
//! - Floats
//! - Bidirectional reordering (rtl only swaps sides)
//! - Hyphenation

/// Rectangles and edge sizes per [CSS Box Model Level 3](https://www.w3.org/TR/css-box-3/).
pub mod box_model;
/// Computed style values consumed by layout.
pub mod style;
/// Auto and percentage values, resolved against a containing block.
pub mod values;

/// Absolute positioning per [§ 9.6](https://www.w3.org/TR/CSS2/visuren.html#absolute-positioning).
pub mod absolute;
/// Layout session and normal-flow collaborators.
pub mod context;
/// Layout errors.
pub mod error;
/// Inline formatting per [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting).
pub mod inline;
/// Deferred out-of-flow boxes.
pub mod placeholder;
/// Relative positioning per [§ 9.4.3](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning).
pub mod positioned;
/// Sizing of replaced elements per [§ 10.3.2](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width).
pub mod replaced;
/// Resumable cursors into the box tree.
pub mod skip;
/// JSON snapshots of laid-out trees.
pub mod snapshot;
/// 'text-align' and justification per [§ 16.2](https://www.w3.org/TR/CSS2/text.html#alignment-prop).
pub mod text_align;
/// Text shaping interface.
pub mod text;
/// The layout tree.
pub mod tree;
/// 'vertical-align' per [§ 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height).
pub mod vertical_align;

pub use absolute::{absolute_box_layout, absolute_layout, layout_fixed_boxes};
pub use box_model::{EdgeSizes, Rect};
pub use context::{FlowConstraints, FlowLayout, FlowOutcome, LayoutSession, Strut};
pub use error::{LayoutError, Result};
pub use inline::{InlineSplitter, Line, LineBoxes, Split, iter_line_boxes};
pub use placeholder::AbsolutePlaceholder;
pub use skip::SkipStack;
pub use snapshot::BoxSnapshot;
pub use style::ComputedStyle;
pub use text::{ApproximateShaper, ShapedLine, TextShaper};
pub use tree::{BoxKind, BoxNode, LayoutBox, Replacement};
