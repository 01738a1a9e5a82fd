//! Unresolved and auto value types for CSS layout.
//!
//! [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)

use serde::Serialize;

use crate::box_model::{EdgeSizes, Rect};
use crate::style::ComputedStyle;

/// [§ 4.3.3 Percentages](https://www.w3.org/TR/CSS2/syndata.html#percentage-units)
///
/// A length in pixels or a percentage of some reference length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthPercentage {
    /// Absolute length in pixels.
    Px(f32),
    /// Percentage (0-100) of the reference length.
    Percent(f32),
}

impl LengthPercentage {
    /// Resolve against `base`, the reference length for percentages.
    #[must_use]
    pub fn resolve(self, base: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => base * pct / 100.0,
        }
    }
}

/// A length, percentage or 'auto'.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub enum LengthPercentageOrAuto {
    /// 'auto'.
    #[default]
    Auto,
    /// Absolute length in pixels.
    Px(f32),
    /// Percentage (0-100) of the reference length.
    Percent(f32),
}

impl LengthPercentageOrAuto {
    /// Resolve against `base`.
    ///
    /// [§ 10.5](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    ///
    /// "If the height of the containing block is not specified explicitly
    /// (i.e., it depends on content height), and this element is not
    /// absolutely positioned, the value computes to 'auto'."
    ///
    /// A percentage of an unknown (infinite) base resolves to 'auto'.
    #[must_use]
    pub fn resolve(self, base: f32) -> AutoOr {
        match self {
            Self::Auto => AutoOr::Auto,
            Self::Px(px) => AutoOr::Length(px),
            Self::Percent(_) if !base.is_finite() => AutoOr::Auto,
            Self::Percent(pct) => AutoOr::Length(base * pct / 100.0),
        }
    }
}

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// "Some properties can take the keyword 'auto' as a value. This keyword
/// allows the user agent to compute the value based on other properties."
///
/// This enum represents a value that can either be 'auto' or a specific length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum AutoOr {
    /// The value is 'auto' and must be resolved during layout.
    #[default]
    Auto,
    /// The value is a specific length in pixels.
    Length(f32),
}

impl AutoOr {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Get the length value, or a default if 'auto'.
    #[must_use]
    pub const fn to_px_or(&self, default: f32) -> f32 {
        match self {
            Self::Length(v) => *v,
            Self::Auto => default,
        }
    }

    /// The length, if not 'auto'.
    #[must_use]
    pub const fn length(&self) -> Option<f32> {
        match self {
            Self::Length(v) => Some(*v),
            Self::Auto => None,
        }
    }
}

/// [§ 8 Box model](https://www.w3.org/TR/CSS2/box.html)
///
/// Edge values where each side can be 'auto' or a specific length.
/// Used for margins where 'auto' has special meaning (centering), and for
/// the box offsets of positioned boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AutoEdgeSizes {
    /// Top edge value.
    pub top: AutoOr,
    /// Right edge value.
    pub right: AutoOr,
    /// Bottom edge value.
    pub bottom: AutoOr,
    /// Left edge value.
    pub left: AutoOr,
}

impl AutoEdgeSizes {
    /// Replace every 'auto' with zero.
    #[must_use]
    pub const fn auto_to_zero(&self) -> EdgeSizes {
        EdgeSizes {
            top: self.top.to_px_or(0.0),
            right: self.right.to_px_or(0.0),
            bottom: self.bottom.to_px_or(0.0),
            left: self.left.to_px_or(0.0),
        }
    }
}

/// [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
///
/// Sizes of one box with every percentage resolved against its containing
/// block. 'auto' is preserved for the width and height solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSizes {
    /// 'width'.
    pub width: AutoOr,
    /// 'height'.
    pub height: AutoOr,
    /// 'min-width'.
    pub min_width: f32,
    /// 'max-width', infinite for 'none'.
    pub max_width: f32,
    /// 'min-height'.
    pub min_height: f32,
    /// 'max-height', infinite for 'none'.
    pub max_height: f32,
    /// 'margin-*'.
    pub margin: AutoEdgeSizes,
    /// 'padding-*'.
    pub padding: EdgeSizes,
    /// 'border-*-width'.
    pub border: EdgeSizes,
    /// 'top', 'right', 'bottom', 'left'.
    pub offsets: AutoEdgeSizes,
}

impl ResolvedSizes {
    /// Padding plus border on the left and right sides.
    #[must_use]
    pub fn horizontal_decoration(&self) -> f32 {
        self.padding.horizontal() + self.border.horizontal()
    }

    /// Padding plus border on the top and bottom sides.
    #[must_use]
    pub fn vertical_decoration(&self) -> f32 {
        self.padding.vertical() + self.border.vertical()
    }
}

/// [§ 10.2 Content width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
/// and [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// "The percentage is calculated with respect to the width of the generated
/// box's containing block." This holds for horizontal *and* vertical margins
/// and paddings. Heights and 'top'/'bottom' refer to the containing block
/// height instead.
#[must_use]
pub fn resolve_percentages(style: &ComputedStyle, containing_block: Rect) -> ResolvedSizes {
    let cb_width = containing_block.width;
    let cb_height = containing_block.height;
    let definite_height = containing_block.has_definite_height();

    let height_or = |value: LengthPercentage, fallback: f32| match value {
        LengthPercentage::Percent(_) if !definite_height => fallback,
        other => other.resolve(cb_height),
    };

    ResolvedSizes {
        width: style.width.resolve(cb_width),
        height: style.height.resolve(cb_height),
        min_width: style.min_width.resolve(cb_width),
        max_width: style
            .max_width
            .map_or(f32::INFINITY, |max| max.resolve(cb_width)),
        min_height: height_or(style.min_height, 0.0),
        max_height: style
            .max_height
            .map_or(f32::INFINITY, |max| height_or(max, f32::INFINITY)),
        margin: AutoEdgeSizes {
            top: style.margin.top.resolve(cb_width),
            right: style.margin.right.resolve(cb_width),
            bottom: style.margin.bottom.resolve(cb_width),
            left: style.margin.left.resolve(cb_width),
        },
        padding: EdgeSizes {
            top: style.padding.top.resolve(cb_width),
            right: style.padding.right.resolve(cb_width),
            bottom: style.padding.bottom.resolve(cb_width),
            left: style.padding.left.resolve(cb_width),
        },
        border: EdgeSizes {
            top: style.border_width.top,
            right: style.border_width.right,
            bottom: style.border_width.bottom,
            left: style.border_width.left,
        },
        offsets: AutoEdgeSizes {
            top: style.offsets.top.resolve(cb_height),
            right: style.offsets.right.resolve(cb_width),
            bottom: style.offsets.bottom.resolve(cb_height),
            left: style.offsets.left.resolve(cb_width),
        },
    }
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// "If the tentative used width is greater than 'max-width', the rules above
/// are applied again, but this time using the computed value of 'max-width'
/// as the computed value for 'width'. If the resulting width is smaller than
/// 'min-width', the rules above are applied again, but this time using the
/// value of 'min-width' as the computed value for 'width'."
#[must_use]
pub fn clamp_min_max(value: f32, min: f32, max: f32) -> f32 {
    let mut used = value;
    if used > max {
        used = max;
    }
    if used < min {
        used = min;
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Sides;

    #[test]
    fn test_percent_height_of_unknown_block_is_auto() {
        let style = ComputedStyle {
            height: LengthPercentageOrAuto::Percent(50.0),
            ..ComputedStyle::default()
        };
        let sizes = resolve_percentages(&style, Rect::new(0.0, 0.0, 100.0, f32::INFINITY));
        assert_eq!(sizes.height, AutoOr::Auto);
        let sizes = resolve_percentages(&style, Rect::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(sizes.height, AutoOr::Length(40.0));
    }

    #[test]
    fn test_vertical_margins_use_containing_block_width() {
        let style = ComputedStyle {
            margin: Sides::all(LengthPercentageOrAuto::Percent(10.0)),
            padding: Sides::all(LengthPercentage::Percent(5.0)),
            ..ComputedStyle::default()
        };
        let sizes = resolve_percentages(&style, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(sizes.margin.top, AutoOr::Length(20.0));
        assert_eq!(sizes.padding.bottom, 10.0);
    }

    #[test]
    fn test_offsets_use_matching_axis() {
        let style = ComputedStyle {
            offsets: Sides {
                top: LengthPercentageOrAuto::Percent(50.0),
                right: LengthPercentageOrAuto::Auto,
                bottom: LengthPercentageOrAuto::Auto,
                left: LengthPercentageOrAuto::Percent(50.0),
            },
            ..ComputedStyle::default()
        };
        let sizes = resolve_percentages(&style, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(sizes.offsets.top, AutoOr::Length(25.0));
        assert_eq!(sizes.offsets.left, AutoOr::Length(100.0));
        assert!(sizes.offsets.right.is_auto());
    }

    #[test]
    fn test_clamp_min_wins_over_max() {
        assert_eq!(clamp_min_max(50.0, 0.0, 30.0), 30.0);
        assert_eq!(clamp_min_max(50.0, 60.0, 30.0), 60.0);
        assert_eq!(clamp_min_max(10.0, 0.0, f32::INFINITY), 10.0);
    }
}
