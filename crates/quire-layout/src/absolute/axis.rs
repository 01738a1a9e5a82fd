//! Constraint resolution along one axis of an absolutely positioned box.
//!
//! [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
//! and [§ 10.6.4](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
//! are the same equation in two directions:
//!
//! "'left' + 'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
//! 'padding-right' + 'border-right-width' + 'margin-right' + 'right' = width
//! of containing block"
//!
//! The box arrives at its static position. Instead of an absolute position,
//! a solution gives the distance to move it by.

use crate::values::AutoOr;

/// Which equation is being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// 'left', 'width', 'right'. `ltr` is the direction of the box.
    Horizontal {
        /// Whether the inline direction runs left to right.
        ltr: bool,
    },
    /// 'top', 'height', 'bottom'.
    Vertical,
}

/// Computed values along one axis, percentages already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisInput {
    /// The axis.
    pub axis: Axis,
    /// 'left' or 'top'.
    pub start: AutoOr,
    /// 'width' or 'height'.
    pub size: AutoOr,
    /// 'right' or 'bottom'.
    pub end: AutoOr,
    /// 'margin-left' or 'margin-top'.
    pub margin_start: AutoOr,
    /// 'margin-right' or 'margin-bottom'.
    pub margin_end: AutoOr,
    /// Padding plus border along the axis.
    pub decoration: f32,
    /// Position of the containing block along the axis.
    pub cb_start: f32,
    /// Size of the containing block along the axis.
    pub cb_size: f32,
    /// Static position of the margin box along the axis.
    pub static_position: f32,
}

/// How the size along the axis is found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsedSize {
    /// The size is known.
    Fixed(f32),
    /// The size comes from the content: shrink-to-fit within `available`
    /// horizontally, content height vertically.
    Content {
        /// Space left for the content box.
        available: f32,
    },
}

/// Solution of the constraint equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSolution {
    /// The used size, or how to get it.
    pub size: UsedSize,
    /// Used 'margin-left' or 'margin-top'.
    pub margin_start: f32,
    /// Used 'margin-right' or 'margin-bottom'.
    pub margin_end: f32,
    /// Distance from the static position to the final position.
    pub translate: f32,
    /// Whether the used size must also be subtracted from `translate`: the
    /// box is anchored at its end edge and its size is only known after
    /// layout.
    pub translate_by_size: bool,
}

/// Solve the constraint equation of a non-replaced box.
///
/// Over-constrained values ignore 'right' in ltr, 'left' in rtl and 'bottom'
/// vertically; the used size is never the value that gives way.
#[must_use]
pub fn solve_axis(input: &AxisInput) -> AxisSolution {
    let AxisInput {
        axis: _,
        start,
        size,
        end,
        margin_start,
        margin_end,
        decoration,
        cb_start,
        cb_size,
        static_position,
    } = *input;
    let default_translate = cb_start - static_position;

    // Unless everything is set: "set 'auto' values for 'margin-left' and
    // 'margin-right' to 0, and pick the one of the following six rules that
    // applies."
    let margin_start = margin_start.to_px_or(0.0);
    let margin_end = margin_end.to_px_or(0.0);
    let spacing = decoration + margin_start + margin_end;
    let solution = |size, translate, translate_by_size| AxisSolution {
        size,
        margin_start,
        margin_end,
        translate,
        translate_by_size,
    };

    match (start, size, end) {
        // "If all three of 'left', 'width', and 'right' are 'auto': [...]
        // set 'left' to the static position and apply rule number three."
        (AutoOr::Auto, AutoOr::Auto, AutoOr::Auto) => solution(
            UsedSize::Content {
                available: cb_size - spacing,
            },
            0.0,
            false,
        ),
        // "1. 'left' and 'width' are 'auto' and 'right' is not 'auto', then
        // the width is shrink-to-fit. Then solve for 'left'."
        (AutoOr::Auto, AutoOr::Auto, AutoOr::Length(end)) => solution(
            UsedSize::Content {
                available: cb_size - spacing - end,
            },
            cb_size - end - spacing + default_translate,
            true,
        ),
        // "2. 'left' and 'right' are 'auto' and 'width' is not 'auto', then
        // [...] set 'left' to the static position."
        (AutoOr::Auto, AutoOr::Length(size), AutoOr::Auto) => {
            solution(UsedSize::Fixed(size), 0.0, false)
        }
        // "3. 'width' and 'right' are 'auto' and 'left' is not 'auto', then
        // the width is shrink-to-fit. Then solve for 'right'."
        (AutoOr::Length(start), AutoOr::Auto, AutoOr::Auto) => solution(
            UsedSize::Content {
                available: cb_size - spacing - start,
            },
            start + default_translate,
            false,
        ),
        // "4. 'left' is 'auto', 'width' and 'right' are not 'auto', then
        // solve for 'left'."
        (AutoOr::Auto, AutoOr::Length(size), AutoOr::Length(end)) => solution(
            UsedSize::Fixed(size),
            cb_size + default_translate - end - spacing - size,
            false,
        ),
        // "5. 'width' is 'auto', 'left' and 'right' are not 'auto', then
        // solve for 'width'."
        (AutoOr::Length(start), AutoOr::Auto, AutoOr::Length(end)) => solution(
            UsedSize::Fixed((cb_size - end - start - spacing).max(0.0)),
            start + default_translate,
            false,
        ),
        // "6. 'right' is 'auto', 'left' and 'width' are not 'auto', then
        // solve for 'right'."
        (AutoOr::Length(start), AutoOr::Length(size), AutoOr::Auto) => solution(
            UsedSize::Fixed(size),
            start + default_translate,
            false,
        ),
        (AutoOr::Length(start), AutoOr::Length(size), AutoOr::Length(end)) => {
            fully_specified(input, start, size, end)
        }
    }
}

/// All of the offsets and the size are set: only the margins give way.
fn fully_specified(input: &AxisInput, start: f32, size: f32, end: f32) -> AxisSolution {
    let default_translate = input.cb_start - input.static_position;
    let free = input.cb_size - (start + end + input.decoration + size);
    let (margin_start, margin_end) = match (input.margin_start, input.margin_end) {
        // "If both 'margin-left' and 'margin-right' are 'auto', solve the
        // equation under the extra constraint that the two margins get
        // equal values, unless this would make them negative, in which
        // case when direction of the containing block is 'ltr' ('rtl'),
        // set 'margin-left' ('margin-right') to zero and solve for
        // 'margin-right' ('margin-left')."
        (AutoOr::Auto, AutoOr::Auto) => match input.axis {
            Axis::Horizontal { ltr: true } if free < 0.0 => (0.0, free),
            Axis::Horizontal { ltr: false } if free < 0.0 => (free, 0.0),
            _ => (free / 2.0, free / 2.0),
        },
        // "If one of 'margin-left' or 'margin-right' is 'auto', solve the
        // equation for that value."
        (AutoOr::Auto, AutoOr::Length(margin_end)) => (free - margin_end, margin_end),
        (AutoOr::Length(margin_start), AutoOr::Auto) => (margin_start, free - margin_start),
        // "If the values are over-constrained, ignore the value for
        // 'left' (in case the 'direction' property of the containing
        // block is 'rtl') or 'right' (in case 'direction' is 'ltr') and
        // solve for that value."
        (AutoOr::Length(margin_start), AutoOr::Length(margin_end)) => match input.axis {
            Axis::Horizontal { ltr: false } => (free - margin_end, margin_end),
            _ => (margin_start, free - margin_start),
        },
    };
    AxisSolution {
        size: UsedSize::Fixed(size),
        margin_start,
        margin_end,
        translate: start + default_translate,
        translate_by_size: false,
    }
}

/// Used margins and offset from the containing block edge of a replaced
/// box, whose size is `input.size`.
///
/// [§ 10.3.8](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width)
/// and [§ 10.6.5](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-height)
#[must_use]
pub fn solve_replaced_axis(input: &AxisInput) -> (f32, f32, f32) {
    let size = input.size.to_px_or(0.0);

    match (input.start, input.end) {
        // "If both 'left' and 'right' have the value 'auto', then [...] set
        // 'left' to the static position."
        (AutoOr::Auto, AutoOr::Auto) => (
            input.margin_start.to_px_or(0.0),
            input.margin_end.to_px_or(0.0),
            input.static_position - input.cb_start,
        ),
        // "If at this point there is an 'auto' left, solve the equation for
        // that value."
        (AutoOr::Length(start), AutoOr::Auto) => (
            input.margin_start.to_px_or(0.0),
            input.margin_end.to_px_or(0.0),
            start,
        ),
        (AutoOr::Auto, AutoOr::Length(end)) => {
            let margin_start = input.margin_start.to_px_or(0.0);
            let margin_end = input.margin_end.to_px_or(0.0);
            let remaining = input.cb_size - (size + input.decoration + margin_start + margin_end);
            (margin_start, margin_end, remaining - end)
        }
        (AutoOr::Length(start), AutoOr::Length(end)) => {
            let remaining = input.cb_size - (size + input.decoration + start + end);
            match (input.margin_start, input.margin_end) {
                // "If 'margin-left' and 'margin-right' are both 'auto', solve
                // the equation under the extra constraint that the two margins
                // must get equal values, unless this would make them negative."
                (AutoOr::Auto, AutoOr::Auto) => match input.axis {
                    Axis::Horizontal { ltr: true } if remaining < 0.0 => (0.0, remaining, start),
                    Axis::Horizontal { ltr: false } if remaining < 0.0 => {
                        (remaining, 0.0, start)
                    }
                    _ => (remaining / 2.0, remaining / 2.0, start),
                },
                (AutoOr::Auto, AutoOr::Length(margin_end)) => {
                    (remaining - margin_end, margin_end, start)
                }
                (AutoOr::Length(margin_start), AutoOr::Auto) => {
                    (margin_start, remaining - margin_start, start)
                }
                // "If at this point the values are over-constrained, ignore
                // the value for either 'left' (in case the 'direction'
                // property of the containing block is 'rtl') or 'right' (in
                // case 'direction' is 'ltr') and solve for that value."
                (AutoOr::Length(margin_start), AutoOr::Length(margin_end)) => match input.axis {
                    Axis::Horizontal { ltr: false } => {
                        let margin_box = size + input.decoration + margin_start + margin_end;
                        (margin_start, margin_end, input.cb_size - margin_box - end)
                    }
                    _ => (margin_start, margin_end, start),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> AutoOr {
        AutoOr::Length(value)
    }

    const AUTO: AutoOr = AutoOr::Auto;

    fn horizontal(start: AutoOr, size: AutoOr, end: AutoOr) -> AxisInput {
        AxisInput {
            axis: Axis::Horizontal { ltr: true },
            start,
            size,
            end,
            margin_start: px(0.0),
            margin_end: px(0.0),
            decoration: 0.0,
            cb_start: 0.0,
            cb_size: 100.0,
            static_position: 0.0,
        }
    }

    #[test]
    fn test_over_constrained_ltr_ignores_right() {
        let solution = solve_axis(&horizontal(px(10.0), px(50.0), px(10.0)));
        assert_eq!(solution.size, UsedSize::Fixed(50.0));
        assert_eq!(solution.margin_start, 0.0);
        assert_eq!(solution.margin_end, 30.0);
        assert_eq!(solution.translate, 10.0);
    }

    #[test]
    fn test_over_constrained_rtl_ignores_left() {
        let input = AxisInput {
            axis: Axis::Horizontal { ltr: false },
            ..horizontal(px(10.0), px(50.0), px(10.0))
        };
        let solution = solve_axis(&input);
        assert_eq!((solution.margin_start, solution.margin_end), (30.0, 0.0));
    }

    #[test]
    fn test_auto_margins_center() {
        let input = AxisInput {
            margin_start: AUTO,
            margin_end: AUTO,
            ..horizontal(px(10.0), px(50.0), px(10.0))
        };
        let solution = solve_axis(&input);
        assert_eq!((solution.margin_start, solution.margin_end), (15.0, 15.0));
    }

    #[test]
    fn test_negative_auto_margins_go_to_the_end() {
        let input = AxisInput {
            margin_start: AUTO,
            margin_end: AUTO,
            ..horizontal(px(10.0), px(100.0), px(10.0))
        };
        let solution = solve_axis(&input);
        assert_eq!((solution.margin_start, solution.margin_end), (0.0, -20.0));

        let vertical = AxisInput {
            axis: Axis::Vertical,
            ..input
        };
        let solution = solve_axis(&vertical);
        assert_eq!((solution.margin_start, solution.margin_end), (-10.0, -10.0));
    }

    #[test]
    fn test_all_auto_keeps_static_position() {
        let input = AxisInput {
            static_position: 42.0,
            ..horizontal(AUTO, AUTO, AUTO)
        };
        let solution = solve_axis(&input);
        assert_eq!(solution.translate, 0.0);
        assert_eq!(solution.size, UsedSize::Content { available: 100.0 });
    }

    #[test]
    fn test_right_anchored_shrink_to_fit() {
        let input = AxisInput {
            static_position: 5.0,
            ..horizontal(AUTO, AUTO, px(20.0))
        };
        let solution = solve_axis(&input);
        assert_eq!(solution.size, UsedSize::Content { available: 80.0 });
        // Moved to 100 - 20 from 5, minus the width once known.
        assert_eq!(solution.translate, 75.0);
        assert!(solution.translate_by_size);
    }

    #[test]
    fn test_width_from_offsets_is_never_negative() {
        let solution = solve_axis(&horizontal(px(60.0), AUTO, px(60.0)));
        assert_eq!(solution.size, UsedSize::Fixed(0.0));
    }

    #[test]
    fn test_left_solved_from_right() {
        let input = AxisInput {
            decoration: 4.0,
            ..horizontal(AUTO, px(30.0), px(10.0))
        };
        assert_eq!(solve_axis(&input).translate, 56.0);
    }

    #[test]
    fn test_replaced_static_position() {
        let input = AxisInput {
            cb_start: 10.0,
            static_position: 25.0,
            ..horizontal(AUTO, px(40.0), AUTO)
        };
        assert_eq!(solve_replaced_axis(&input), (0.0, 0.0, 15.0));
    }

    #[test]
    fn test_replaced_right_anchored() {
        let input = horizontal(AUTO, px(40.0), px(10.0));
        assert_eq!(solve_replaced_axis(&input), (0.0, 0.0, 50.0));
    }

    #[test]
    fn test_replaced_over_constrained_rtl() {
        let input = AxisInput {
            axis: Axis::Horizontal { ltr: false },
            ..horizontal(px(10.0), px(40.0), px(10.0))
        };
        assert_eq!(solve_replaced_axis(&input), (0.0, 0.0, 50.0));
    }
}
