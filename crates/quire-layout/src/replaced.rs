//! Sizing of replaced elements.
//!
//! [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
//! [§ 10.6.2 Inline replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
//! [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)

use quire_common::warning::warn_once;

use crate::tree::Replacement;
use crate::values::{AutoOr, ResolvedSizes, clamp_min_max};

/// Stand-in for a zero intrinsic dimension, so that ratios stay finite.
pub const ZERO_DIMENSION_EPSILON: f32 = 1e-6;

/// Width over height, `None` when the height is zero.
fn intrinsic_ratio(replacement: Replacement) -> Option<f32> {
    (replacement.intrinsic_height != 0.0)
        .then(|| replacement.intrinsic_width / replacement.intrinsic_height)
}

/// [§ 10.3.2](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// "If 'height' and 'width' both have computed values of 'auto' and the
/// element also has an intrinsic width, then that intrinsic width is the used
/// value of 'width'."
///
/// "If 'width' has a computed value of 'auto', 'height' has some other
/// computed value, and the element does have an intrinsic ratio; then the
/// used value of 'width' is: (used height) * (intrinsic ratio)"
#[must_use]
pub fn replaced_box_width(width: AutoOr, height: AutoOr, replacement: Replacement) -> f32 {
    match (width, height) {
        (AutoOr::Length(width), _) => width,
        (AutoOr::Auto, AutoOr::Length(height)) => intrinsic_ratio(replacement)
            .map_or(replacement.intrinsic_width, |ratio| height * ratio),
        (AutoOr::Auto, AutoOr::Auto) => replacement.intrinsic_width,
    }
}

/// [§ 10.6.2](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
///
/// "If 'height' and 'width' both have computed values of 'auto' and the
/// element also has an intrinsic height, then that intrinsic height is the
/// used value of 'height'."
///
/// "Otherwise, if 'height' has a computed value of 'auto', and the element
/// has an intrinsic ratio then the used value of 'height' is:
/// (used width) / (intrinsic ratio)"
///
/// A zero intrinsic height is an infinite ratio: the derived height is zero
/// whatever the used width.
#[must_use]
pub fn replaced_box_height(
    width: AutoOr,
    height: AutoOr,
    used_width: f32,
    replacement: Replacement,
) -> f32 {
    match (width, height) {
        (_, AutoOr::Length(height)) => height,
        (AutoOr::Auto, AutoOr::Auto) => replacement.intrinsic_height,
        (AutoOr::Length(_), AutoOr::Auto) => {
            intrinsic_ratio(replacement).map_or(0.0, |ratio| used_width / ratio)
        }
    }
}

/// Used width and height of a replaced box with resolved `sizes`.
///
/// When both are 'auto' the intrinsic size goes through the constraint
/// table of [`min_max_auto_replaced`]; otherwise each axis is clamped on
/// its own, width first.
#[must_use]
pub fn inline_replaced_box_width_height(
    sizes: &ResolvedSizes,
    replacement: Replacement,
) -> (f32, f32) {
    if sizes.width.is_auto() && sizes.height.is_auto() {
        let width = replaced_box_width(sizes.width, sizes.height, replacement);
        let height = replaced_box_height(sizes.width, sizes.height, width, replacement);
        return min_max_auto_replaced(width, height, sizes);
    }

    let width = clamp_min_max(
        replaced_box_width(sizes.width, sizes.height, replacement),
        sizes.min_width,
        sizes.max_width,
    );
    let height = clamp_min_max(
        replaced_box_height(sizes.width, sizes.height, width, replacement),
        sizes.min_height,
        sizes.max_height,
    );
    (width, height)
}

/// Which bound a tentative dimension breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Violation {
    None,
    Min,
    Max,
}

impl Violation {
    fn of(value: f32, min: f32, max: f32) -> Self {
        if value < min {
            Self::Min
        } else if value > max {
            Self::Max
        } else {
            Self::None
        }
    }
}

/// [§ 10.4](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// "However, for replaced elements with an intrinsic ratio and both 'width'
/// and 'height' specified as 'auto', the algorithm is as follows: Select from
/// the table the resolved height and width values for the appropriate
/// constraint violation."
///
/// Zero dimensions are replaced by [`ZERO_DIMENSION_EPSILON`] before any
/// ratio is taken.
#[must_use]
pub fn min_max_auto_replaced(width: f32, height: f32, sizes: &ResolvedSizes) -> (f32, f32) {
    let min_width = sizes.min_width;
    let min_height = sizes.min_height;
    // "Take the max-width and max-height as max(min, max) so that min ≤ max holds true."
    let max_width = min_width.max(sizes.max_width);
    let max_height = min_height.max(sizes.max_height);

    let violations = (
        Violation::of(width, min_width, max_width),
        Violation::of(height, min_height, max_height),
    );

    let (w, h) = if width == 0.0 || height == 0.0 {
        warn_once(
            "Replaced",
            "zero intrinsic dimension, ratio computed with an epsilon",
        );
        (
            if width == 0.0 { ZERO_DIMENSION_EPSILON } else { width },
            if height == 0.0 { ZERO_DIMENSION_EPSILON } else { height },
        )
    } else {
        (width, height)
    };

    match violations {
        (Violation::None, Violation::None) => (width, height),
        (Violation::Max, Violation::None) => (max_width, (max_width * h / w).max(min_height)),
        (Violation::Min, Violation::None) => (min_width, (min_width * h / w).min(max_height)),
        (Violation::None, Violation::Max) => ((max_height * w / h).max(min_width), max_height),
        (Violation::None, Violation::Min) => ((min_height * w / h).min(max_width), min_height),
        (Violation::Max, Violation::Max) => {
            if max_width / w <= max_height / h {
                (max_width, min_height.max(max_width * h / w))
            } else {
                (min_width.max(max_height * w / h), max_height)
            }
        }
        (Violation::Min, Violation::Min) => {
            if min_width / w <= min_height / h {
                (max_width.min(min_height * w / h), min_height)
            } else {
                (min_width, max_height.min(min_width * h / w))
            }
        }
        (Violation::Min, Violation::Max) => (min_width, max_height),
        (Violation::Max, Violation::Min) => (max_width, min_height),
    }
}
