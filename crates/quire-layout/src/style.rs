//! Computed style values consumed by layout.
//!
//! Styles are produced by the cascade (outside this crate) and shared between
//! the fragments of a split box through an `Rc`. Keyword enums can be parsed
//! from and printed as their CSS keywords.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::values::{LengthPercentage, LengthPercentageOrAuto};

/// [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
///
/// Only the values that reach inline and out-of-flow layout are modelled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DisplayValue {
    /// "This value causes an element to generate one or more inline boxes."
    #[default]
    Inline,
    /// "This value causes an element to generate a block box."
    Block,
    /// "This value causes an element to generate an inline-level block container."
    InlineBlock,
}

impl DisplayValue {
    /// Whether boxes with this display participate in an inline formatting context.
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        matches!(self, Self::Inline | Self::InlineBlock)
    }
}

/// [§ 9.3.1 Choosing a positioning scheme: 'position' property](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PositionType {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but in addition, the box is fixed with respect to some reference."
    Fixed,
}

impl PositionType {
    /// Absolutely and fixed positioned boxes are taken out of the normal flow.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// [§ 9.10 Text direction: the 'direction' property](https://www.w3.org/TR/CSS2/visuren.html#direction)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Start edge of the line, resolved with 'direction'.
    #[default]
    Start,
    /// End edge of the line, resolved with 'direction'.
    End,
    /// Left edge of the line box.
    Left,
    /// Right edge of the line box.
    Right,
    /// Centered within the line box.
    Center,
    /// Stretched to both edges by adding word spacing.
    Justify,
}

/// [§ 16.6 Whitespace: the 'white-space' property](https://www.w3.org/TR/CSS2/text.html#white-space-prop)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    /// Collapse whitespace, wrap lines.
    #[default]
    Normal,
    /// Preserve whitespace, only break at newlines.
    Pre,
    /// Collapse whitespace, never wrap.
    Nowrap,
    /// Preserve whitespace, wrap lines.
    PreWrap,
    /// Collapse spaces, preserve newlines, wrap lines.
    PreLine,
}

impl WhiteSpace {
    /// Spaces at the start and end of a line are removed.
    #[must_use]
    pub const fn collapses_spaces(self) -> bool {
        matches!(self, Self::Normal | Self::Nowrap | Self::PreLine)
    }

    /// Newlines in the source force a line break.
    #[must_use]
    pub const fn preserves_newlines(self) -> bool {
        matches!(self, Self::Pre | Self::PreWrap | Self::PreLine)
    }

    /// Lines may be broken at soft wrap opportunities.
    #[must_use]
    pub const fn allows_wrap(self) -> bool {
        matches!(self, Self::Normal | Self::PreWrap | Self::PreLine)
    }
}

/// [§ 11.1.1 Overflow: the 'overflow' property](https://www.w3.org/TR/CSS2/visufx.html#overflow)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    /// Content is not clipped.
    #[default]
    Visible,
    /// Content is clipped.
    Hidden,
    /// Content is clipped, scrolling is available.
    Scroll,
    /// User agent dependent.
    Auto,
}

/// Keyword values of [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlignKeyword {
    /// "Align the baseline of the box with the baseline of the parent box."
    #[default]
    Baseline,
    /// "Align the vertical midpoint of the box with the baseline of the
    /// parent box plus half the x-height of the parent."
    Middle,
    /// "Align the top of the box with the top of the parent's content area."
    TextTop,
    /// "Align the bottom of the box with the bottom of the parent's content area."
    TextBottom,
    /// Aligned like `text-top`; line-relative alignment is not modelled.
    Top,
    /// Aligned like `text-bottom`; line-relative alignment is not modelled.
    Bottom,
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum VerticalAlign {
    /// One of the keyword values.
    Keyword(VerticalAlignKeyword),
    /// "Raise (positive value) or lower (negative value) the box by this distance."
    Length(f32),
    /// "Raise (positive value) or lower (negative value) the box by this
    /// distance (a percentage of the 'line-height' value)."
    Percent(f32),
}

impl Default for VerticalAlign {
    fn default() -> Self {
        Self::Keyword(VerticalAlignKeyword::Baseline)
    }
}

/// [§ 10.8.1 'line-height'](https://www.w3.org/TR/CSS2/visudet.html#propdef-line-height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value based
    /// on the font of the element."
    #[default]
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(f32),
    /// "The specified length is used in the calculation of the line box height."
    Length(f32),
}

/// Ratio of the font size used for `line-height: normal`.
pub const NORMAL_LINE_HEIGHT: f32 = 1.2;

/// One value per physical side, before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides<T> {
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
    /// Left side.
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on all four sides.
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Computed values of the properties that inline and out-of-flow layout read.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// Computed 'display' (absolutely positioned boxes are blockified).
    pub display: DisplayValue,
    /// 'display' as specified, before blockification. Decides whether the
    /// static position of an out-of-flow box is inline- or block-level.
    pub specified_display: DisplayValue,
    /// 'position'.
    pub position: PositionType,
    /// 'top', 'right', 'bottom' and 'left'.
    pub offsets: Sides<LengthPercentageOrAuto>,
    /// 'width'.
    pub width: LengthPercentageOrAuto,
    /// 'height'.
    pub height: LengthPercentageOrAuto,
    /// 'min-width'.
    pub min_width: LengthPercentage,
    /// 'max-width', `None` for 'none'.
    pub max_width: Option<LengthPercentage>,
    /// 'min-height'.
    pub min_height: LengthPercentage,
    /// 'max-height', `None` for 'none'.
    pub max_height: Option<LengthPercentage>,
    /// 'margin-*'.
    pub margin: Sides<LengthPercentageOrAuto>,
    /// 'padding-*'.
    pub padding: Sides<LengthPercentage>,
    /// 'border-*-width', in pixels.
    pub border_width: Sides<f32>,
    /// 'font-size', in pixels.
    pub font_size: f32,
    /// 'line-height'.
    pub line_height: LineHeight,
    /// 'vertical-align'.
    pub vertical_align: VerticalAlign,
    /// 'text-align'.
    pub text_align: TextAlign,
    /// 'direction'.
    pub direction: Direction,
    /// 'white-space'.
    pub white_space: WhiteSpace,
    /// 'text-indent'.
    pub text_indent: LengthPercentage,
    /// 'word-spacing', in pixels.
    pub word_spacing: f32,
    /// 'letter-spacing', in pixels.
    pub letter_spacing: f32,
    /// 'overflow'.
    pub overflow: Overflow,
}

impl Default for ComputedStyle {
    /// Initial values of every property.
    fn default() -> Self {
        Self {
            display: DisplayValue::Inline,
            specified_display: DisplayValue::Inline,
            position: PositionType::Static,
            offsets: Sides::all(LengthPercentageOrAuto::Auto),
            width: LengthPercentageOrAuto::Auto,
            height: LengthPercentageOrAuto::Auto,
            min_width: LengthPercentage::Px(0.0),
            max_width: None,
            min_height: LengthPercentage::Px(0.0),
            max_height: None,
            margin: Sides::all(LengthPercentageOrAuto::Px(0.0)),
            padding: Sides::all(LengthPercentage::Px(0.0)),
            border_width: Sides::all(0.0),
            font_size: 16.0,
            line_height: LineHeight::Normal,
            vertical_align: VerticalAlign::default(),
            text_align: TextAlign::Start,
            direction: Direction::Ltr,
            white_space: WhiteSpace::Normal,
            text_indent: LengthPercentage::Px(0.0),
            word_spacing: 0.0,
            letter_spacing: 0.0,
            overflow: Overflow::Visible,
        }
    }
}

impl ComputedStyle {
    /// [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
    ///
    /// "The properties of anonymous boxes are inherited from the enclosing
    /// non-anonymous box. Non-inherited properties have their initial value."
    ///
    /// Used for line boxes and anonymous text boxes.
    #[must_use]
    pub fn anonymous_from(parent: &Self) -> Self {
        Self {
            font_size: parent.font_size,
            line_height: parent.line_height,
            text_align: parent.text_align,
            direction: parent.direction,
            white_space: parent.white_space,
            text_indent: parent.text_indent,
            word_spacing: parent.word_spacing,
            letter_spacing: parent.letter_spacing,
            ..Self::default()
        }
    }

    /// [§ 10.8.1](https://www.w3.org/TR/CSS2/visudet.html#propdef-line-height)
    ///
    /// The used value of 'line-height' in pixels.
    #[must_use]
    pub fn used_line_height(&self) -> f32 {
        match self.line_height {
            LineHeight::Normal => self.font_size * NORMAL_LINE_HEIGHT,
            LineHeight::Number(factor) => self.font_size * factor,
            LineHeight::Length(px) => px,
        }
    }

    /// Whether this box is laid out in the normal flow.
    #[must_use]
    pub const fn is_in_normal_flow(&self) -> bool {
        !self.position.is_out_of_flow()
    }

    /// Whether the inline-start side is the physical left side.
    #[must_use]
    pub fn is_ltr(&self) -> bool {
        self.direction == Direction::Ltr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_keywords_parse_from_css() {
        assert_eq!(PositionType::from_str("absolute"), Ok(PositionType::Absolute));
        assert_eq!(TextAlign::from_str("justify"), Ok(TextAlign::Justify));
        assert_eq!(WhiteSpace::from_str("pre-line"), Ok(WhiteSpace::PreLine));
        assert_eq!(
            VerticalAlignKeyword::from_str("text-top"),
            Ok(VerticalAlignKeyword::TextTop)
        );
        assert!(DisplayValue::from_str("table-cell").is_err());
    }

    #[test]
    fn test_keywords_print_as_css() {
        assert_eq!(DisplayValue::InlineBlock.to_string(), "inline-block");
        let name: &'static str = WhiteSpace::PreWrap.into();
        assert_eq!(name, "pre-wrap");
    }

    #[test]
    fn test_used_line_height() {
        let mut style = ComputedStyle {
            font_size: 10.0,
            ..ComputedStyle::default()
        };
        assert!((style.used_line_height() - 12.0).abs() < 1e-5);
        style.line_height = LineHeight::Number(2.0);
        assert_eq!(style.used_line_height(), 20.0);
        style.line_height = LineHeight::Length(15.0);
        assert_eq!(style.used_line_height(), 15.0);
    }

    #[test]
    fn test_anonymous_style_resets_non_inherited() {
        let parent = ComputedStyle {
            font_size: 20.0,
            text_align: TextAlign::Center,
            position: PositionType::Relative,
            padding: Sides::all(LengthPercentage::Px(5.0)),
            ..ComputedStyle::default()
        };
        let anonymous = ComputedStyle::anonymous_from(&parent);
        assert_eq!(anonymous.font_size, 20.0);
        assert_eq!(anonymous.text_align, TextAlign::Center);
        assert_eq!(anonymous.position, PositionType::Static);
        assert_eq!(anonymous.padding.left, LengthPercentage::Px(0.0));
    }
}
