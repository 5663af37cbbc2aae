/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed style values consumed by the float manager. Lengths and
//! percentages have already been resolved against the reference box.

use app_units::Au;
use euclid::default::{Point2D, SideOffsets2D};
use geometry::WritingMode;
use smallvec::SmallVec;

/// The computed value of the `float` property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StyleFloat {
    None,
    Left,
    Right,
    InlineStart,
    InlineEnd,
}

/// The line-relative side a float is placed against. Float-logical space has
/// its inline axis running from line-left to line-right, so `Left` is the
/// line-left side in every writing mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FloatSide {
    Left,
    Right,
}

impl FloatSide {
    /// Resolves a computed `float` value against the writing mode of the
    /// containing block. Returns `None` for boxes that do not float.
    pub fn from_style_and_container_writing_mode(
        float: StyleFloat,
        container_writing_mode: WritingMode,
    ) -> Option<FloatSide> {
        Some(match float {
            StyleFloat::None => return None,
            StyleFloat::Left => Self::Left,
            StyleFloat::Right => Self::Right,
            StyleFloat::InlineStart if container_writing_mode.is_bidi_ltr() => Self::Left,
            StyleFloat::InlineStart => Self::Right,
            StyleFloat::InlineEnd if container_writing_mode.is_bidi_ltr() => Self::Right,
            StyleFloat::InlineEnd => Self::Left,
        })
    }
}

/// The computed value of the `clear` property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StyleClear {
    None,
    Left,
    Right,
    Both,
    InlineStart,
    InlineEnd,
}

/// Which line-relative sides to clear floats on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClearSide {
    None,
    Left,
    Right,
    Both,
}

impl ClearSide {
    pub fn from_style_and_container_writing_mode(
        clear: StyleClear,
        container_writing_mode: WritingMode,
    ) -> Self {
        match clear {
            StyleClear::None => Self::None,
            StyleClear::Both => Self::Both,
            StyleClear::Left => Self::Left,
            StyleClear::Right => Self::Right,
            StyleClear::InlineStart if container_writing_mode.is_bidi_ltr() => Self::Left,
            StyleClear::InlineStart => Self::Right,
            StyleClear::InlineEnd if container_writing_mode.is_bidi_ltr() => Self::Right,
            StyleClear::InlineEnd => Self::Left,
        }
    }

    #[inline]
    pub fn clears_left(self) -> bool {
        matches!(self, ClearSide::Left | ClearSide::Both)
    }

    #[inline]
    pub fn clears_right(self) -> bool {
        matches!(self, ClearSide::Right | ClearSide::Both)
    }
}

/// The `<shape-box>` a shape is positioned and sized against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReferenceBox {
    MarginBox,
    BorderBox,
    PaddingBox,
    ContentBox,
}

/// The radius of a `circle()` or one semi-axis of an `ellipse()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShapeRadius {
    Length(Au),
    ClosestSide,
    FarthestSide,
}

/// A `<basic-shape>`. Points are physical offsets from the origin of the
/// reference box.
#[derive(Clone, Debug, PartialEq)]
pub enum BasicShape {
    Inset {
        insets: SideOffsets2D<Au>,
        /// Physical half-corner radii of the `round` clause, if any.
        radii: Option<[Au; 8]>,
    },
    Circle {
        center: Point2D<Au>,
        radius: ShapeRadius,
    },
    Ellipse {
        center: Point2D<Au>,
        radius_x: ShapeRadius,
        radius_y: ShapeRadius,
    },
    Polygon {
        vertices: SmallVec<[Point2D<Au>; 8]>,
    },
}

/// The computed value of the `shape-outside` property.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeOutside {
    None,
    /// `url()` sources are only valid for `clip-path`.
    Url,
    Box(ReferenceBox),
    Shape(BasicShape, ReferenceBox),
    /// An image; `threshold` is the computed `shape-image-threshold`.
    Image { threshold: f32 },
}

#[cfg(test)]
mod tests {
    use geometry::{Direction, WritingModeProperty};

    use super::*;

    #[test]
    fn logical_floats_follow_bidi_direction() {
        let ltr = WritingMode::horizontal_tb();
        let rtl = WritingMode::new(WritingModeProperty::HorizontalTb, Direction::Rtl);
        let side = FloatSide::from_style_and_container_writing_mode;
        assert_eq!(side(StyleFloat::InlineStart, ltr), Some(FloatSide::Left));
        assert_eq!(side(StyleFloat::InlineStart, rtl), Some(FloatSide::Right));
        assert_eq!(side(StyleFloat::InlineEnd, rtl), Some(FloatSide::Left));
        assert_eq!(side(StyleFloat::Right, rtl), Some(FloatSide::Right));
        assert_eq!(side(StyleFloat::None, ltr), None);
    }

    #[test]
    fn logical_clear_follows_bidi_direction() {
        let rtl = WritingMode::new(WritingModeProperty::VerticalRl, Direction::Rtl);
        let clear = ClearSide::from_style_and_container_writing_mode;
        assert_eq!(clear(StyleClear::InlineStart, rtl), ClearSide::Right);
        assert_eq!(clear(StyleClear::InlineEnd, rtl), ClearSide::Left);
        assert!(ClearSide::Both.clears_left() && ClearSide::Both.clears_right());
        assert!(!ClearSide::None.clears_left());
    }
}
