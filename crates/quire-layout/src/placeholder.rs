//! Placeholders for absolutely positioned boxes.
//!
//! [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
//!
//! "The static position for 'left' is the distance from the left edge of the
//! containing block to the left margin edge of a hypothetical box that would
//! have been the first box of the element if its 'position' property had been
//! 'static' and 'float' had been 'none'."
//!
//! An out-of-flow box is found during normal-flow layout, where only its
//! static position is known. It is laid out later, once its containing block
//! has been sized. Meanwhile the placeholder stands in the tree and follows
//! every translation of its ancestors.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::{LayoutError, Result};
use crate::style::ComputedStyle;
use crate::tree::LayoutBox;

#[derive(Debug)]
enum PlaceholderState {
    /// Not laid out yet: the position is the static position.
    Pending(LayoutBox),
    /// Laid out: the box is final apart from later translations.
    Done(LayoutBox),
}

/// Shared handle to an out-of-flow box.
///
/// Clones share the same box: the placeholder sits both in its parent's
/// children and in the `absolute_boxes` list of its containing block.
#[derive(Debug, Clone)]
pub struct AbsolutePlaceholder(Rc<RefCell<PlaceholderState>>);

impl AbsolutePlaceholder {
    /// Wrap an out-of-flow box positioned at its static position.
    #[must_use]
    pub fn new(pending: LayoutBox) -> Self {
        Self(Rc::new(RefCell::new(PlaceholderState::Pending(pending))))
    }

    /// Whether absolute layout has run.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        matches!(*self.0.borrow(), PlaceholderState::Done(_))
    }

    /// The wrapped box, pending or laid out.
    #[must_use]
    pub fn borrow_box(&self) -> Ref<'_, LayoutBox> {
        Ref::map(self.0.borrow(), |state| match state {
            PlaceholderState::Pending(inner) | PlaceholderState::Done(inner) => inner,
        })
    }

    /// Style of the wrapped box.
    #[must_use]
    pub fn style(&self) -> Rc<ComputedStyle> {
        Rc::clone(&self.borrow_box().style)
    }

    /// Current position of the margin box.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        let inner = self.borrow_box();
        (inner.position_x, inner.position_y)
    }

    /// A copy of the pending box, to be laid out.
    ///
    /// # Errors
    /// Returns [`LayoutError::PlaceholderAlreadyResolved`] once laid out.
    pub fn pending_box(&self) -> Result<LayoutBox> {
        match &*self.0.borrow() {
            PlaceholderState::Pending(pending) => Ok(pending.clone()),
            PlaceholderState::Done(_) => Err(LayoutError::PlaceholderAlreadyResolved),
        }
    }

    /// Store the result of absolute layout.
    pub fn set_laid_out_box(&self, laid_out: LayoutBox) {
        *self.0.borrow_mut() = PlaceholderState::Done(laid_out);
    }

    /// A copy of the laid-out box, if layout has run.
    #[must_use]
    pub fn laid_out_box(&self) -> Option<LayoutBox> {
        match &*self.0.borrow() {
            PlaceholderState::Done(laid_out) => Some(laid_out.clone()),
            PlaceholderState::Pending(_) => None,
        }
    }

    /// Move the placeholder.
    ///
    /// A pending box has no laid-out descendants yet, so only its own
    /// position moves; a laid-out box moves with its whole subtree.
    pub fn translate(&self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        match &mut *self.0.borrow_mut() {
            PlaceholderState::Pending(pending) => {
                pending.position_x += dx;
                pending.position_y += dy;
            }
            PlaceholderState::Done(laid_out) => laid_out.translate(dx, dy),
        }
    }

    /// Whether two handles share the same box.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
