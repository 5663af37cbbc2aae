/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Float areas defined by `shape-outside`.
//!
//! Shapes live in float-logical space: `x` runs from line-left to line-right
//! and `y` from block-start to block-end, whatever the writing mode.
//!
//! See <https://drafts.csswg.org/css-shapes-1/#shape-outside-property>

mod construction;
mod ellipse;
mod image;
mod polygon;
mod rounded_box;

use std::fmt;

use app_units::Au;
use euclid::default::{Point2D, Rect, Size2D};
use geometry::{LogicalPoint, LogicalRect, WritingMode};

pub use self::construction::shape_box_rect;
pub use self::ellipse::EllipseShape;
pub use self::image::ImageShape;
pub use self::polygon::PolygonShape;
pub use self::rounded_box::RoundedBoxShape;

/// Why a float ended up without a shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShapeError {
    /// The shape source can not define a float area.
    UnsupportedShapeSource,
    /// The shape image has not been decoded yet, or failed to draw.
    ImageNotReady,
    /// The rendered alpha buffer does not cover its declared size.
    MalformedAlphaMask,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShapeError::UnsupportedShapeSource => {
                write!(f, "shape-outside source cannot define a float area")
            },
            ShapeError::ImageNotReady => write!(f, "shape-outside image is not ready"),
            ShapeError::MalformedAlphaMask => {
                write!(f, "shape-outside image produced a malformed alpha buffer")
            },
        }
    }
}

impl std::error::Error for ShapeError {}

/// The float area of a float with a `shape-outside`.
#[derive(Clone, Debug)]
pub enum ShapeInfo {
    /// `<shape-box>` and `inset()`.
    RoundedBox(RoundedBoxShape),
    /// `circle()` and `ellipse()`.
    Ellipse(EllipseShape),
    Polygon(PolygonShape),
    Image(ImageShape),
}

impl ShapeInfo {
    /// The line-left edge of the shape within the band `b_start..=b_end`.
    pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.line_left(b_start, b_end),
            ShapeInfo::Ellipse(shape) => shape.line_left(b_start, b_end),
            ShapeInfo::Polygon(shape) => shape.line_left(b_start, b_end),
            ShapeInfo::Image(shape) => shape.line_left(b_start, b_end),
        }
    }

    /// The line-right edge of the shape within the band `b_start..=b_end`.
    pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.line_right(b_start, b_end),
            ShapeInfo::Ellipse(shape) => shape.line_right(b_start, b_end),
            ShapeInfo::Polygon(shape) => shape.line_right(b_start, b_end),
            ShapeInfo::Image(shape) => shape.line_right(b_start, b_end),
        }
    }

    pub fn b_start(&self) -> Au {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.b_start(),
            ShapeInfo::Ellipse(shape) => shape.b_start(),
            ShapeInfo::Polygon(shape) => shape.b_start(),
            ShapeInfo::Image(shape) => shape.b_start(),
        }
    }

    pub fn b_end(&self) -> Au {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.b_end(),
            ShapeInfo::Ellipse(shape) => shape.b_end(),
            ShapeInfo::Polygon(shape) => shape.b_end(),
            ShapeInfo::Image(shape) => shape.b_end(),
        }
    }

    /// Whether the shape encloses no area.
    pub fn is_empty(&self) -> bool {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.is_empty(),
            ShapeInfo::Ellipse(shape) => shape.is_empty(),
            ShapeInfo::Polygon(shape) => shape.is_empty(),
            ShapeInfo::Image(shape) => shape.is_empty(),
        }
    }

    /// Moves the shape into the float manager's coordinate space.
    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        match self {
            ShapeInfo::RoundedBox(shape) => shape.translate(line_left, block_start),
            ShapeInfo::Ellipse(shape) => shape.translate(line_left, block_start),
            ShapeInfo::Polygon(shape) => shape.translate(line_left, block_start),
            ShapeInfo::Image(shape) => shape.translate(line_left, block_start),
        }
    }
}

/// Converts a flow-relative rect to float-logical space.
pub fn to_float_logical_rect(
    rect: &LogicalRect<Au>,
    writing_mode: WritingMode,
    container_size: Size2D<Au>,
) -> Rect<Au> {
    Rect::new(
        Point2D::new(rect.line_left(writing_mode, container_size), rect.start.b),
        Size2D::new(rect.size.inline, rect.size.block),
    )
}

/// Converts a physical point to float-logical space.
pub fn to_float_logical_point(
    point: Point2D<Au>,
    writing_mode: WritingMode,
    container_size: Size2D<Au>,
) -> Point2D<Au> {
    let logical = LogicalPoint::from_physical(writing_mode, point, container_size);
    Point2D::new(
        logical.line_relative(writing_mode, container_size),
        logical.b,
    )
}

/// The distance between the flat line-axis edge of a box and the edge of
/// one of its elliptical corners, within the band `band_b_start..=band_b_end`.
/// `_l` radii run along the line axis and `_b` radii along the block axis.
///
/// Returns zero if the band does not reach into exactly one of the corners.
#[allow(clippy::too_many_arguments)]
pub(crate) fn ellipse_line_intercept_diff(
    box_b_start: Au,
    box_b_end: Au,
    b_start_corner_radius_l: Au,
    b_start_corner_radius_b: Au,
    b_end_corner_radius_l: Au,
    b_end_corner_radius_b: Au,
    band_b_start: Au,
    band_b_end: Au,
) -> Au {
    debug_assert!(box_b_start <= box_b_end, "bad shape box coordinates");
    debug_assert!(band_b_start <= band_b_end, "bad band coordinates");

    // A band reaching into both corners only happens for boxes thinner than
    // their radii, where the flat edge is used.
    if b_start_corner_radius_b > Au(0) &&
        band_b_end >= box_b_start &&
        band_b_end <= box_b_start + b_start_corner_radius_b
    {
        let b = b_start_corner_radius_b - (band_b_end - box_b_start);
        let intercept = x_intercept_at_y(b, b_start_corner_radius_l, b_start_corner_radius_b);
        b_start_corner_radius_l - intercept
    } else if b_end_corner_radius_b > Au(0) &&
        band_b_start >= box_b_end - b_end_corner_radius_b &&
        band_b_start <= box_b_end
    {
        let b = b_end_corner_radius_b - (box_b_end - band_b_start);
        let intercept = x_intercept_at_y(b, b_end_corner_radius_l, b_end_corner_radius_b);
        b_end_corner_radius_l - intercept
    } else {
        Au(0)
    }
}

/// Solves `(x / radius_x)^2 + (y / radius_y)^2 = 1` for `x`.
fn x_intercept_at_y(y: Au, radius_x: Au, radius_y: Au) -> Au {
    debug_assert!(radius_y > Au(0));
    let y = y.0 as f64;
    let radius_y = radius_y.0 as f64;
    let ratio = 1.0 - (y * y) / (radius_y * radius_y);
    Au((radius_x.0 as f64 * ratio.max(0.0).sqrt()) as i32)
}
