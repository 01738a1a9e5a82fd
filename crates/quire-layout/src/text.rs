//! Text shaping interface.
//!
//! Layout does not measure text itself. A [`TextShaper`] splits a run of
//! text into its first line for a given width and reports the metrics of that
//! line. Offsets coming back from the shaper are UTF-8 byte offsets; the
//! layout tree counts text offsets in Unicode scalar values, and
//! [`byte_to_char_offsets`] maps one onto the other.

use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::style::ComputedStyle;

/// One glyph placed on a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedGlyph {
    /// The character this glyph renders.
    pub ch: char,
    /// Horizontal offset from the start of the run.
    pub x: f32,
}

/// Glyphs of a shaped line, in logical order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GlyphRun {
    /// Positioned glyphs.
    pub glyphs: Vec<PositionedGlyph>,
}

/// The first line of a shaped run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedLine {
    /// Glyphs of the line.
    pub glyphs: GlyphRun,
    /// Length of the line in UTF-8 bytes.
    pub length: usize,
    /// Advance width of the line.
    pub width: f32,
    /// Height of the content area.
    pub height: f32,
    /// Distance from the top of the content area to the baseline.
    pub baseline: f32,
    /// Where the next line starts, in UTF-8 bytes, or `None` when the whole
    /// text fits. Anything between `length` and `resume_at` is a preserved
    /// line break that was consumed.
    pub resume_at: Option<usize>,
}

/// A text shaping engine.
///
/// `split_first_line` must make progress: when `resume_at` is `Some`, either
/// `length` or `resume_at` is non-zero. When nothing fits in
/// `available_width` it must still return the first unbreakable segment.
///
/// `height` and `baseline` are vertical font metrics and may only depend on
/// `font_size`: [`LayoutSession::strut`](crate::context::LayoutSession::strut)
/// caches them per font size.
pub trait TextShaper {
    /// Shape as much of `text` as fits in `available_width` (unbounded when
    /// `None`) on one line.
    fn split_first_line(
        &self,
        text: &str,
        style: &ComputedStyle,
        available_width: Option<f32>,
    ) -> ShapedLine;
}

/// Fixed-ratio font metrics.
///
/// Every character advances by `char_width_ratio` times the font size, the
/// ascent and descent are fixed fractions of the font size. Good enough for
/// tests and as a fallback when no font is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateShaper {
    /// Advance of one character, as a fraction of the font size.
    pub char_width_ratio: f32,
    /// Ascent, as a fraction of the font size.
    pub ascent_ratio: f32,
    /// Descent, as a fraction of the font size.
    pub descent_ratio: f32,
}

impl Default for ApproximateShaper {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
        }
    }
}

impl ApproximateShaper {
    fn advance(&self, ch: char, style: &ComputedStyle) -> f32 {
        let mut advance = style.font_size * self.char_width_ratio + style.letter_spacing;
        if ch == ' ' {
            advance += style.word_spacing;
        }
        advance
    }

    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        text.chars().map(|ch| self.advance(ch, style)).sum()
    }

    fn glyphs(&self, text: &str, style: &ComputedStyle) -> GlyphRun {
        let mut x = 0.0;
        let glyphs = text
            .chars()
            .map(|ch| {
                let glyph = PositionedGlyph { ch, x };
                x += self.advance(ch, style);
                glyph
            })
            .collect();
        GlyphRun { glyphs }
    }

    /// [UAX #14](https://unicode.org/reports/tr14/): soft wrap opportunities
    /// sit after a run of spaces, before the next non-space character.
    fn wrap_opportunities(text: &str) -> impl Iterator<Item = usize> + '_ {
        let mut previous_was_space = false;
        text.char_indices().filter_map(move |(index, ch)| {
            let opportunity = previous_was_space && ch != ' ';
            previous_was_space = ch == ' ';
            opportunity.then_some(index)
        })
    }
}

impl TextShaper for ApproximateShaper {
    fn split_first_line(
        &self,
        text: &str,
        style: &ComputedStyle,
        available_width: Option<f32>,
    ) -> ShapedLine {
        // STEP 1: A preserved newline ends the line no matter what.
        let mut length = text.len();
        let mut resume_at = None;
        if style.white_space.preserves_newlines()
            && let Some((index, ch)) = text
                .char_indices()
                .find(|&(_, ch)| ch == '\n' || ch == '\u{2029}')
        {
            length = index;
            resume_at = Some(index + ch.len_utf8());
        }

        // STEP 2: Soft wrap at the last opportunity that fits, or at the
        // first one when even that overflows.
        let mut wrapped = false;
        if let Some(max_width) = available_width
            && style.white_space.allows_wrap()
        {
            let candidate = &text[..length];
            if self.measure(candidate.trim_end_matches(' '), style) > max_width {
                let mut chosen = None;
                for opportunity in Self::wrap_opportunities(candidate) {
                    let fits = self.measure(candidate[..opportunity].trim_end_matches(' '), style)
                        <= max_width;
                    if fits || chosen.is_none() {
                        chosen = Some(opportunity);
                    }
                    if !fits {
                        break;
                    }
                }
                if let Some(opportunity) = chosen {
                    length = opportunity;
                    resume_at = Some(opportunity);
                    wrapped = true;
                }
            }
        }

        let line = &text[..length];
        // Spaces at a soft wrap hang past the end of the line.
        let width = if wrapped {
            self.measure(line.trim_end_matches(' '), style)
        } else {
            self.measure(line, style)
        };

        ShapedLine {
            glyphs: self.glyphs(line, style),
            length,
            width,
            height: style.font_size * (self.ascent_ratio + self.descent_ratio),
            baseline: style.font_size * self.ascent_ratio,
            resume_at,
        }
    }
}

/// Offsets of a shaped line converted to Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharOffsets {
    /// Text of the line.
    pub line: String,
    /// Number of characters on the line.
    pub length: usize,
    /// Character offset of the next line, if any.
    pub resume_at: Option<usize>,
    /// Characters consumed between the line and the next one.
    pub between: String,
}

/// Byte offset of the `chars`-th character of `text`, `None` past the end.
#[must_use]
pub fn char_to_byte_offset(text: &str, chars: usize) -> Option<usize> {
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .nth(chars)
}

/// Convert the byte offsets reported by a shaper for `text` to character
/// offsets. One character is one or more bytes, so character offsets are
/// never larger than byte offsets.
///
/// # Errors
/// Returns [`LayoutError::InvalidShapingOffset`] when an offset is past the
/// end of `text` or falls inside a multi-byte character.
pub fn byte_to_char_offsets(
    text: &str,
    length: usize,
    resume_at: Option<usize>,
) -> Result<CharOffsets> {
    let invalid = |offset: usize| LayoutError::InvalidShapingOffset {
        offset,
        text: text.to_owned(),
    };
    let end = resume_at.unwrap_or(length);
    let partial = text.get(..end).ok_or_else(|| invalid(end))?;
    let line = partial.get(..length).ok_or_else(|| invalid(length))?;
    let between = partial.get(length..).ok_or_else(|| invalid(length))?;
    let length = line.chars().count();
    Ok(CharOffsets {
        line: line.to_owned(),
        length,
        resume_at: resume_at.map(|_| length + between.chars().count()),
        between: between.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::WhiteSpace;

    fn style_10px() -> ComputedStyle {
        ComputedStyle {
            font_size: 10.0,
            ..ComputedStyle::default()
        }
    }

    fn unit_shaper() -> ApproximateShaper {
        ApproximateShaper {
            char_width_ratio: 1.0,
            ..ApproximateShaper::default()
        }
    }

    #[test]
    fn test_whole_text_fits() {
        let line = unit_shaper().split_first_line("ab cd", &style_10px(), Some(100.0));
        assert_eq!(line.length, 5);
        assert_eq!(line.resume_at, None);
        assert_eq!(line.width, 50.0);
        assert_eq!(line.height, 10.0);
        assert_eq!(line.baseline, 8.0);
    }

    #[test]
    fn test_wraps_at_last_fitting_space() {
        let line = unit_shaper().split_first_line("ab cd ef", &style_10px(), Some(55.0));
        assert_eq!(line.length, 6);
        assert_eq!(line.resume_at, Some(6));
        assert_eq!(line.width, 50.0);
    }

    #[test]
    fn test_overflowing_first_word_is_kept() {
        let line = unit_shaper().split_first_line("abcdef gh", &style_10px(), Some(20.0));
        assert_eq!(line.length, 7);
        assert_eq!(line.resume_at, Some(7));
        assert_eq!(line.width, 60.0);
    }

    #[test]
    fn test_preserved_newline_breaks() {
        let style = ComputedStyle {
            white_space: WhiteSpace::Pre,
            ..style_10px()
        };
        let line = unit_shaper().split_first_line("ab\ncd", &style, Some(1000.0));
        assert_eq!(line.length, 2);
        assert_eq!(line.resume_at, Some(3));
    }

    #[test]
    fn test_nowrap_never_wraps() {
        let style = ComputedStyle {
            white_space: WhiteSpace::Nowrap,
            ..style_10px()
        };
        let line = unit_shaper().split_first_line("ab cd ef", &style, Some(10.0));
        assert_eq!(line.resume_at, None);
    }

    #[test]
    fn test_word_spacing_widens_spaces() {
        let style = ComputedStyle {
            word_spacing: 5.0,
            ..style_10px()
        };
        let line = unit_shaper().split_first_line("a b", &style, None);
        assert_eq!(line.width, 35.0);
        assert_eq!(line.glyphs.glyphs[2].x, 25.0);
    }

    #[test]
    fn test_byte_offsets_map_to_chars() {
        // "é" is two bytes, "\u{2029}" three.
        let text = "été\u{2029}ok";
        let offsets = byte_to_char_offsets(text, 5, Some(8)).ok();
        assert_eq!(
            offsets,
            Some(CharOffsets {
                line: "été".to_owned(),
                length: 3,
                resume_at: Some(4),
                between: "\u{2029}".to_owned(),
            })
        );
    }

    #[test]
    fn test_offset_inside_a_character_is_rejected() {
        assert!(matches!(
            byte_to_char_offsets("été", 1, None),
            Err(LayoutError::InvalidShapingOffset { offset: 1, .. })
        ));
    }

    #[test]
    fn test_char_to_byte_offset() {
        assert_eq!(char_to_byte_offset("été", 0), Some(0));
        assert_eq!(char_to_byte_offset("été", 2), Some(3));
        assert_eq!(char_to_byte_offset("été", 3), Some(5));
        assert_eq!(char_to_byte_offset("été", 4), None);
    }
}
